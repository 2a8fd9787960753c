//! Directive emitter: serialize a [`DirectiveList`] to a PyMOL script and run
//! the renderer on it as a single-shot, time-bounded subprocess.
//!
//! A render succeeds only when the process exits with status 0 **and** the
//! image named by the render directive exists afterwards.

mod process;
mod script;

use std::ffi::OsString;
use std::fmt;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;

pub use script::{render_script, OBJECT};

use self::process::ChildGuard;
use crate::compile::DirectiveList;

/// Environment variable naming the renderer binary.
pub const PYMOL_BIN_ENV: &str = "PYMOL_BIN";

/// Renderer run time limit unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

const SCRIPT_NAME: &str = "render.pml";
const STDOUT_NAME: &str = "renderer.stdout";
const STDERR_NAME: &str = "renderer.stderr";

// ── Errors ──

/// Renderer discovery or execution failure.
#[derive(Debug)]
pub enum ExecutionError {
    /// No executable renderer among the candidates.
    BinaryNotFound {
        /// Candidates checked, in order.
        tried: Vec<PathBuf>,
    },
    /// The directive list has no render directive, so no image is expected.
    NoRenderDirective,
    /// A structure or image path holds a line break or other control
    /// character and cannot be written into a script.
    UnscriptablePath {
        /// Offending path.
        path: PathBuf,
    },
    /// Writing the script or reading captured output failed.
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
    /// The process could not be started.
    Spawn {
        /// Binary that failed to start.
        binary: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
    /// The process exited unsuccessfully.
    Exit {
        /// Exit code, if the process was not killed by a signal.
        code: Option<i32>,
        /// Captured standard output, verbatim.
        stdout: String,
        /// Captured standard error, verbatim.
        stderr: String,
    },
    /// The process outlived its time limit and was killed.
    Timeout {
        /// Limit that was exceeded.
        after: Duration,
    },
    /// The process succeeded but the image is missing.
    MissingOutput {
        /// Expected image path.
        path: PathBuf,
    },
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BinaryNotFound { tried } => {
                write!(
                    f,
                    "PyMOL binary not found (set an explicit path, export \
                     {PYMOL_BIN_ENV}, or put 'pymol' on PATH)"
                )?;
                if !tried.is_empty() {
                    let tried: Vec<_> =
                        tried.iter().map(|p| p.display().to_string()).collect();
                    write!(f, "; tried: {}", tried.join(", "))?;
                }
                Ok(())
            }
            Self::NoRenderDirective => {
                write!(f, "directive list has no render directive")
            }
            Self::UnscriptablePath { path } => {
                write!(
                    f,
                    "{:?} contains control characters and cannot be passed \
                     to the renderer",
                    path.display().to_string()
                )
            }
            Self::Io { path, source } => {
                write!(f, "{}: {source}", path.display())
            }
            Self::Spawn { binary, source } => {
                write!(f, "failed to start {}: {source}", binary.display())
            }
            Self::Exit {
                code,
                stdout,
                stderr,
            } => {
                match code {
                    Some(code) => {
                        write!(f, "renderer exited with status {code}")?;
                    }
                    None => write!(f, "renderer was terminated by a signal")?,
                }
                write!(f, "\nSTDOUT:\n{stdout}\nSTDERR:\n{stderr}")
            }
            Self::Timeout { after } => {
                write!(
                    f,
                    "renderer killed after {}s time limit",
                    after.as_secs_f32()
                )
            }
            Self::MissingOutput { path } => {
                write!(f, "renderer did not produce {}", path.display())
            }
        }
    }
}

impl std::error::Error for ExecutionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } | Self::Spawn { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }
}

// ── Binary discovery ──

/// Where to find the renderer and how long to let it run.
///
/// `PYMOL_BIN` and `PATH` are captured when the config is built, never read
/// again during a render.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Explicit binary, checked first.
    pub binary: Option<PathBuf>,
    /// Run time limit.
    pub timeout: Duration,
    env_binary: Option<PathBuf>,
    search_path: Option<OsString>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl RendererConfig {
    /// Capture `PYMOL_BIN` and `PATH` from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        let env_binary = std::env::var_os(PYMOL_BIN_ENV)
            .filter(|v| !v.to_string_lossy().trim().is_empty())
            .map(PathBuf::from);
        Self::with_environment(env_binary, std::env::var_os("PATH"))
    }

    /// Config with an explicit environment snapshot.
    #[must_use]
    pub fn with_environment(
        env_binary: Option<PathBuf>,
        search_path: Option<OsString>,
    ) -> Self {
        Self {
            binary: None,
            timeout: DEFAULT_TIMEOUT,
            env_binary,
            search_path,
        }
    }

    /// Prefer `binary` over every other candidate.
    #[must_use]
    pub fn binary(mut self, binary: impl Into<PathBuf>) -> Self {
        let binary = binary.into();
        self.binary = (!binary.as_os_str().is_empty()).then_some(binary);
        self
    }

    /// Override the run time limit.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Candidate binaries in priority order: explicit, environment, `PATH`.
    #[must_use]
    pub fn candidates(&self) -> Vec<PathBuf> {
        let mut candidates = self.explicit();
        if let Some(path) = &self.search_path {
            candidates.extend(std::env::split_paths(path).flat_map(|dir| {
                PROGRAM_NAMES.iter().map(move |name| dir.join(name))
            }));
        }
        candidates
    }

    /// The override and `PYMOL_BIN` candidates, without `PATH` entries.
    fn explicit(&self) -> Vec<PathBuf> {
        self.binary.iter().chain(&self.env_binary).cloned().collect()
    }

    /// First candidate that is an executable file.
    pub fn locate(&self) -> Result<PathBuf, ExecutionError> {
        let candidates = self.candidates();
        match candidates.iter().find(|p| is_executable(p)) {
            Some(found) => {
                log::debug!("using renderer {}", found.display());
                Ok(found.clone())
            }
            None => {
                // PATH entries are noise in the message; report explicit ones.
                Err(ExecutionError::BinaryNotFound {
                    tried: self.explicit(),
                })
            }
        }
    }
}

#[cfg(windows)]
const PROGRAM_NAMES: &[&str] = &["pymol.exe", "pymol.bat", "pymol"];
#[cfg(not(windows))]
const PROGRAM_NAMES: &[&str] = &["pymol"];

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path)
        .is_ok_and(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

// ── Emitter ──

/// Runs compiled directive lists through a located renderer binary.
#[derive(Debug, Clone)]
pub struct PymolEmitter {
    binary: PathBuf,
    timeout: Duration,
}

impl PymolEmitter {
    /// Emitter for a known binary.
    #[must_use]
    pub fn new(binary: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    /// Locate the binary described by `config`.
    pub fn from_config(
        config: &RendererConfig,
    ) -> Result<Self, ExecutionError> {
        Ok(Self::new(config.locate()?, config.timeout))
    }

    /// Binary this emitter launches.
    #[must_use]
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Write the script for `structure` into `workspace`, run the renderer
    /// and return the rendered image path.
    pub fn run(
        &self,
        structure: &Path,
        directives: &DirectiveList,
        workspace: &Path,
    ) -> Result<PathBuf, ExecutionError> {
        let output = directives
            .render_target()
            .ok_or(ExecutionError::NoRenderDirective)?
            .to_path_buf();
        for path in [structure, output.as_path()] {
            if path.to_string_lossy().contains(char::is_control) {
                return Err(ExecutionError::UnscriptablePath {
                    path: path.to_path_buf(),
                });
            }
        }

        let script_path = workspace.join(SCRIPT_NAME);
        let script = render_script(structure, directives);
        write_file(&script_path, script.as_bytes())?;
        log::debug!("wrote render script {}", script_path.display());

        let stdout_path = workspace.join(STDOUT_NAME);
        let stderr_path = workspace.join(STDERR_NAME);
        let child = Command::new(&self.binary)
            .arg("-cq")
            .arg(&script_path)
            .current_dir(workspace)
            .stdin(Stdio::null())
            .stdout(create_file(&stdout_path)?)
            .stderr(create_file(&stderr_path)?)
            .spawn()
            .map_err(|source| ExecutionError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;
        log::info!(
            "rendering {} with {}",
            output.display(),
            self.binary.display()
        );

        let mut guard = ChildGuard::new(child);
        let status = guard
            .wait_timeout(self.timeout)
            .map_err(|source| ExecutionError::Io {
                path: self.binary.clone(),
                source,
            })?;
        let Some(status) = status else {
            log::warn!("renderer exceeded {:?}, killing it", self.timeout);
            drop(guard);
            return Err(ExecutionError::Timeout {
                after: self.timeout,
            });
        };

        if !status.success() {
            return Err(ExecutionError::Exit {
                code: status.code(),
                stdout: read_lossy(&stdout_path)?,
                stderr: read_lossy(&stderr_path)?,
            });
        }
        if !output.is_file() {
            return Err(ExecutionError::MissingOutput { path: output });
        }
        Ok(output)
    }
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), ExecutionError> {
    fs::write(path, contents).map_err(|source| ExecutionError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn create_file(path: &Path) -> Result<File, ExecutionError> {
    File::create(path).map_err(|source| ExecutionError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_lossy(path: &Path) -> Result<String, ExecutionError> {
    fs::read(path)
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .map_err(|source| ExecutionError::Io {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidates_follow_priority_order() {
        let config = RendererConfig::with_environment(
            Some(PathBuf::from("/env/pymol")),
            Some(OsString::from("/opt/bin")),
        )
        .binary("/explicit/pymol");
        let candidates = config.candidates();
        assert_eq!(candidates[0], PathBuf::from("/explicit/pymol"));
        assert_eq!(candidates[1], PathBuf::from("/env/pymol"));
        assert!(candidates[2].starts_with("/opt/bin"));
    }

    #[test]
    fn empty_explicit_binary_is_ignored() {
        let config = RendererConfig::with_environment(None, None).binary("");
        assert!(config.candidates().is_empty());
    }

    #[test]
    fn missing_binary_names_the_explicit_candidates() {
        let config = RendererConfig::with_environment(None, None)
            .binary("/definitely/not/here/pymol");
        let err = config.locate().unwrap_err();
        assert!(matches!(
            &err,
            ExecutionError::BinaryNotFound { tried } if tried.len() == 1
        ));
        assert!(err.to_string().contains("/definitely/not/here/pymol"));
    }

    #[cfg(unix)]
    #[test]
    fn non_executable_files_are_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("pymol");
        fs::write(&plain, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&plain, fs::Permissions::from_mode(0o644)).unwrap();
        let config =
            RendererConfig::with_environment(None, None).binary(&plain);
        assert!(config.locate().is_err());

        fs::set_permissions(&plain, fs::Permissions::from_mode(0o755)).unwrap();
        assert_eq!(config.locate().unwrap(), plain);
    }

    #[test]
    fn empty_list_has_nothing_to_render() {
        let emitter = PymolEmitter::new("/bin/true", DEFAULT_TIMEOUT);
        let dir = tempfile::tempdir().unwrap();
        let err = emitter
            .run(Path::new("x.pdb"), &DirectiveList::default(), dir.path())
            .unwrap_err();
        assert!(matches!(err, ExecutionError::NoRenderDirective));
    }

    fn default_render(output: &Path) -> DirectiveList {
        let request = crate::options::RenderRequest::default();
        crate::compile::compile_request(&request, output)
            .unwrap()
            .directives
    }

    #[test]
    fn paths_with_line_breaks_never_reach_the_script() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = PymolEmitter::new("/bin/true", DEFAULT_TIMEOUT);
        let directives = default_render(&dir.path().join("out.png"));
        let err = emitter
            .run(Path::new("x.pdb\nsystem id"), &directives, dir.path())
            .unwrap_err();
        assert!(matches!(err, ExecutionError::UnscriptablePath { .. }));
        assert!(!dir.path().join(SCRIPT_NAME).exists());
    }

    #[cfg(unix)]
    #[test]
    fn unbounded_timeout_waits_instead_of_overflowing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.png");
        let emitter = PymolEmitter::new("/bin/true", Duration::MAX);
        let err = emitter
            .run(Path::new("x.pdb"), &default_render(&output), dir.path())
            .unwrap_err();
        match err {
            ExecutionError::MissingOutput { path } => assert_eq!(path, output),
            other => panic!("expected missing output, got {other}"),
        }
    }

    #[test]
    fn exit_display_keeps_diagnostics_verbatim() {
        let err = ExecutionError::Exit {
            code: Some(2),
            stdout: "loading\n".to_owned(),
            stderr: "Error: bad selection".to_owned(),
        };
        let text = err.to_string();
        assert!(text.starts_with("renderer exited with status 2"));
        assert!(text.ends_with("STDERR:\nError: bad selection"));
    }
}
