//! Structure references: local paths, downloads and inline uploads.
//!
//! A reference is one of
//!
//! - `base64file://<filename>/<payload>`: an uploaded file carried inline,
//! - `http://...` / `https://...`: downloaded once per request,
//! - anything else: a local path (`$VAR`, `${VAR}` and `~` expanded).
//!
//! Downloads and uploads are written into the caller's request workspace,
//! so nothing outlives the request.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use base64::Engine;

/// Prefix of inline uploads.
pub const INLINE_PREFIX: &str = "base64file://";

/// Download time limit.
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("pdbrender/", env!("CARGO_PKG_VERSION"));
const MAX_DOWNLOAD_BYTES: u64 = 256 * 1024 * 1024;
const STRUCTURE_EXTENSIONS: [&str; 4] = ["pdb", "cif", "mmcif", "ent"];
const FALLBACK_NAME: &str = "downloaded.pdb";

// ── Errors ──

/// Failure turning a reference into a readable local file.
#[derive(Debug)]
pub enum ResolutionError {
    /// The reference is blank.
    Empty,
    /// Inline reference without a `<filename>/<payload>` body.
    MalformedInline {
        /// What is missing.
        reason: &'static str,
    },
    /// Inline payload is not valid base64.
    Decode {
        /// File name carried by the reference.
        name: String,
        /// Decoder error.
        source: base64::DecodeError,
    },
    /// Download failed (connection, timeout or HTTP status).
    Network {
        /// Requested URL.
        url: String,
        /// Client error.
        source: Box<ureq::Error>,
    },
    /// Local path does not name an existing file.
    NotFound {
        /// Expanded, absolute path.
        path: PathBuf,
    },
    /// Writing into the workspace failed.
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
}

impl fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "structure reference is empty"),
            Self::MalformedInline { reason } => {
                write!(f, "malformed {INLINE_PREFIX} reference: {reason}")
            }
            Self::Decode { name, source } => {
                write!(f, "cannot decode inline file {name:?}: {source}")
            }
            Self::Network { url, source } => {
                write!(f, "download of {url} failed: {source}")
            }
            Self::NotFound { path } => {
                write!(f, "structure file not found: {}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "{}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ResolutionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode { source, .. } => Some(source),
            Self::Network { source, .. } => Some(source.as_ref()),
            Self::Io { source, .. } => Some(source),
            Self::Empty
            | Self::MalformedInline { .. }
            | Self::NotFound { .. } => None,
        }
    }
}

// ── Classification ──

/// A classified structure reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureSource {
    /// Expanded local path (not yet checked for existence).
    Local(PathBuf),
    /// Remote file.
    Url(String),
    /// Uploaded file carried in the reference itself.
    Inline {
        /// File name as uploaded.
        name: String,
        /// Base64 payload.
        payload: String,
    },
}

impl StructureSource {
    /// Classify a raw reference.
    pub fn parse(reference: &str) -> Result<Self, ResolutionError> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(ResolutionError::Empty);
        }
        if let Some(body) = reference.strip_prefix(INLINE_PREFIX) {
            let (name, payload) = body.split_once('/').ok_or(
                ResolutionError::MalformedInline {
                    reason: "expected <filename>/<payload>",
                },
            )?;
            if name.is_empty() {
                return Err(ResolutionError::MalformedInline {
                    reason: "missing file name",
                });
            }
            if payload.is_empty() {
                return Err(ResolutionError::MalformedInline {
                    reason: "missing payload",
                });
            }
            return Ok(Self::Inline {
                name: name.to_owned(),
                payload: payload.to_owned(),
            });
        }
        if ["http://", "https://"].iter().any(|s| reference.starts_with(s)) {
            return Ok(Self::Url(reference.to_owned()));
        }
        Ok(Self::Local(expand_path(reference)))
    }

    /// Produce a readable local file, writing into `workspace` if needed.
    pub fn resolve(
        &self,
        workspace: &Path,
    ) -> Result<PathBuf, ResolutionError> {
        match self {
            Self::Local(path) => {
                let path = std::path::absolute(path).map_err(|source| {
                    ResolutionError::Io {
                        path: path.clone(),
                        source,
                    }
                })?;
                if path.is_file() {
                    Ok(path)
                } else {
                    Err(ResolutionError::NotFound { path })
                }
            }
            Self::Url(url) => {
                let bytes = download(url)?;
                let name = structure_file_name(url_file_name(url));
                let dest = workspace.join(name);
                write(&dest, &bytes)?;
                log::info!("downloaded {url} ({} bytes)", bytes.len());
                Ok(dest)
            }
            Self::Inline { name, payload } => {
                let compact: String = payload
                    .chars()
                    .filter(|c| !c.is_ascii_whitespace())
                    .collect();
                let bytes = base64::engine::general_purpose::STANDARD
                    .decode(compact)
                    .map_err(|source| ResolutionError::Decode {
                        name: name.clone(),
                        source,
                    })?;
                let dest = workspace.join(structure_file_name(name));
                write(&dest, &bytes)?;
                log::debug!("decoded inline file {name} -> {}", dest.display());
                Ok(dest)
            }
        }
    }
}

/// Classify `reference` and resolve it into `workspace`.
pub fn resolve(
    reference: &str,
    workspace: &Path,
) -> Result<PathBuf, ResolutionError> {
    StructureSource::parse(reference)?.resolve(workspace)
}

fn download(url: &str) -> Result<Vec<u8>, ResolutionError> {
    let network = |source| ResolutionError::Network {
        url: url.to_owned(),
        source: Box::new(source),
    };
    let agent: ureq::Agent = ureq::Agent::config_builder()
        .timeout_global(Some(DOWNLOAD_TIMEOUT))
        .build()
        .into();
    let mut response = agent
        .get(url)
        .header("User-Agent", USER_AGENT)
        .call()
        .map_err(network)?;
    response
        .body_mut()
        .with_config()
        .limit(MAX_DOWNLOAD_BYTES)
        .read_to_vec()
        .map_err(network)
}

fn write(path: &Path, bytes: &[u8]) -> Result<(), ResolutionError> {
    std::fs::write(path, bytes).map_err(|source| ResolutionError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ── Names and paths ──

/// Last path segment of `url`, without query or fragment.
fn url_file_name(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/').next().unwrap_or_default()
}

/// Sanitize `raw` into a single file name with a structure extension.
///
/// `.pdb` is appended unless the name already ends in a known structure
/// extension.
#[must_use]
pub fn structure_file_name(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or_default();
    let mut name: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if name.trim_matches('.').is_empty() {
        return FALLBACK_NAME.to_owned();
    }
    let has_extension = Path::new(&name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| {
            STRUCTURE_EXTENSIONS
                .iter()
                .any(|known| e.eq_ignore_ascii_case(known))
        });
    if !has_extension {
        name.push_str(".pdb");
    }
    name
}

/// Expand `$VAR`, `${VAR}` and a leading `~` from the process environment.
/// Unknown variables are left untouched.
#[must_use]
pub fn expand_path(raw: &str) -> PathBuf {
    expand_with(raw, |name| std::env::var(name).ok())
}

fn expand_with(raw: &str, lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let (name, consumed) = if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => (&braced[..end], end + 2),
                None => ("", 0),
            }
        } else {
            let end = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            (&after[..end], end)
        };
        match (!name.is_empty()).then(|| lookup(name)).flatten() {
            Some(value) => out.push_str(&value),
            None => out.push_str(&rest[pos..=pos + consumed]),
        }
        rest = &after[consumed..];
    }
    out.push_str(rest);

    if out == "~" || out.starts_with("~/") {
        if let Some(home) = lookup("HOME") {
            let tail = out.trim_start_matches('~').trim_start_matches('/');
            return PathBuf::from(home).join(tail);
        }
    }
    PathBuf::from(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(name: &str) -> Option<String> {
        match name {
            "HOME" => Some("/home/ada".to_owned()),
            "DATA" => Some("/srv/data".to_owned()),
            _ => None,
        }
    }

    #[test]
    fn references_are_classified() {
        let url = "https://files.rcsb.org/download/1UBQ.pdb";
        assert_eq!(
            StructureSource::parse(url).unwrap(),
            StructureSource::Url(url.to_owned())
        );
        assert_eq!(
            StructureSource::parse("base64file://x.pdb/QUJD").unwrap(),
            StructureSource::Inline {
                name: "x.pdb".to_owned(),
                payload: "QUJD".to_owned(),
            }
        );
        assert!(matches!(
            StructureSource::parse("  ").unwrap_err(),
            ResolutionError::Empty
        ));
        assert!(matches!(
            StructureSource::parse("base64file://no-slash").unwrap_err(),
            ResolutionError::MalformedInline { .. }
        ));
    }

    #[test]
    fn inline_payload_is_decoded_into_the_workspace() {
        let dir = tempfile::tempdir().unwrap();
        let text = "HEADER test\nEND\n";
        let encoded = base64::engine::general_purpose::STANDARD.encode(text);
        let reference = format!("base64file://my protein/{encoded}");
        let path = resolve(&reference, dir.path()).unwrap();
        assert_eq!(path, dir.path().join("my_protein.pdb"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), text);
    }

    #[test]
    fn invalid_base64_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve("base64file://x.pdb/!!!not-base64", dir.path())
            .unwrap_err();
        assert!(matches!(
            err,
            ResolutionError::Decode { ref name, .. } if name == "x.pdb"
        ));
    }

    #[test]
    fn local_paths_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("1ubq.cif");
        std::fs::write(&file, "data_1UBQ\n").unwrap();
        assert_eq!(resolve(file.to_str().unwrap(), dir.path()).unwrap(), file);

        let missing = dir.path().join("missing.pdb");
        let err = resolve(missing.to_str().unwrap(), dir.path()).unwrap_err();
        assert!(matches!(err, ResolutionError::NotFound { .. }));
        assert!(err.to_string().contains("missing.pdb"));
    }

    #[test]
    fn file_names_get_a_structure_extension() {
        assert_eq!(structure_file_name("1UBQ.cif"), "1UBQ.cif");
        assert_eq!(structure_file_name("model.ENT"), "model.ENT");
        assert_eq!(structure_file_name("1ubq"), "1ubq.pdb");
        assert_eq!(structure_file_name("../../etc/passwd"), "passwd.pdb");
        assert_eq!(structure_file_name(""), FALLBACK_NAME);
        let from_url = |url: &str| structure_file_name(url_file_name(url));
        assert_eq!(
            from_url("https://x.org/files/4hhb.cif?download=1"),
            "4hhb.cif"
        );
        assert_eq!(from_url("https://x.org/"), FALLBACK_NAME);
    }

    #[test]
    fn variables_and_home_are_expanded() {
        for (raw, expanded) in [
            ("$DATA/a.pdb", "/srv/data/a.pdb"),
            ("${DATA}x/a.pdb", "/srv/datax/a.pdb"),
            ("~/a.pdb", "/home/ada/a.pdb"),
            ("$NOPE/a.pdb", "$NOPE/a.pdb"),
            ("${NOPE/a.pdb", "${NOPE/a.pdb"),
            ("cost$", "cost$"),
        ] {
            assert_eq!(expand_with(raw, vars), PathBuf::from(expanded));
        }
    }

    #[test]
    fn unreachable_host_is_a_network_error() {
        let dir = tempfile::tempdir().unwrap();
        let err =
            resolve("http://127.0.0.1:9/1ubq.pdb", dir.path()).unwrap_err();
        assert!(matches!(err, ResolutionError::Network { .. }));
    }
}
