//! One render request, end to end.
//!
//! Validation runs before anything touches the filesystem or spawns a
//! process. Downloads, uploads, the script and the renderer's captured output
//! live in a request-scoped temporary workspace that is removed on every exit
//! path; only the image survives.

use std::path::{Path, PathBuf};

use crate::compile::compile_request;
use crate::diagnostics::Warning;
use crate::emit::{PymolEmitter, RendererConfig};
use crate::error::RenderError;
use crate::options::RenderRequest;
use crate::source::StructureSource;

/// Successful render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutcome {
    /// Rendered PNG.
    pub image: PathBuf,
    /// Every degradation recorded while compiling, in order.
    pub warnings: Vec<Warning>,
}

/// A request bound to a renderer configuration.
#[derive(Debug, Clone)]
pub struct RenderJob {
    request: RenderRequest,
    renderer: RendererConfig,
}

impl RenderJob {
    /// Bind `request` to `renderer`.
    #[must_use]
    pub const fn new(request: RenderRequest, renderer: RendererConfig) -> Self {
        Self { request, renderer }
    }

    /// The request being rendered.
    #[must_use]
    pub const fn request(&self) -> &RenderRequest {
        &self.request
    }

    /// Run the job: compile, locate the renderer, resolve the structure and
    /// render.
    pub fn run(&self) -> Result<RenderOutcome, RenderError> {
        let output = absolute_output(&self.request.output.path)?;
        let compilation = compile_request(&self.request, &output)?;
        let source = StructureSource::parse(&self.request.structure)?;
        let emitter = PymolEmitter::from_config(&self.renderer)?;

        let tag = workspace_tag(&self.request.request_id);
        let workspace = tempfile::Builder::new()
            .prefix(&format!("pdbrender-{tag}-"))
            .tempdir()?;
        log::debug!("request workspace {}", workspace.path().display());

        let structure = source.resolve(workspace.path())?;
        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let image = emitter.run(
            &structure,
            &compilation.directives,
            workspace.path(),
        )?;
        log::info!(
            "rendered {} ({} warnings)",
            image.display(),
            compilation.warnings.len()
        );
        Ok(RenderOutcome {
            image,
            warnings: compilation.warnings,
        })
    }
}

/// Compile and run `request` with `renderer`.
pub fn run(
    request: &RenderRequest,
    renderer: &RendererConfig,
) -> Result<RenderOutcome, RenderError> {
    RenderJob::new(request.clone(), renderer.clone()).run()
}

fn absolute_output(path: &Path) -> Result<PathBuf, RenderError> {
    Ok(std::path::absolute(path)?)
}

/// Request id reduced to characters safe in a directory name.
fn workspace_tag(request_id: &str) -> String {
    let tag: String = request_id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
        .take(32)
        .collect();
    if tag.is_empty() {
        "render".to_owned()
    } else {
        tag
    }
}
