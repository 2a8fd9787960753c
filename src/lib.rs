// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Compile molecular render requests into PyMOL jobs.
//!
//! A [`options::RenderRequest`] carries every visual parameter of one image
//! (quality preset, geometry, coloring, camera, lighting, transparency,
//! labels, output). The pipeline turns it into a PNG in four stages:
//!
//! 1. [`quality`] expands the preset into a full ray-tracing and lighting
//!    baseline; explicit overrides only count under `custom`.
//! 2. [`compile`] validates the request and lowers it into an ordered,
//!    renderer-agnostic [`compile::DirectiveList`], degrading soft fields with
//!    recorded warnings.
//! 3. [`source`] turns the structure reference (path, URL or inline upload)
//!    into a local file.
//! 4. [`emit`] serializes the directives to a PyMOL script and runs the
//!    renderer as a bounded subprocess.
//!
//! [`job::RenderJob`] runs all four for one request inside a temporary
//! workspace. [`batch`] scans folders into ordered file lists for batch
//! rendering.
//!
//! # Example
//!
//! ```no_run
//! use pdbrender::emit::RendererConfig;
//! use pdbrender::job::RenderJob;
//! use pdbrender::options::RenderRequest;
//!
//! let request = RenderRequest::from_toml(
//!     r#"
//! structure = "1ubq.pdb"
//! preset = "publication"
//!
//! [color]
//! color_mode = "secondary_structure"
//! "#,
//! )?;
//! let outcome = RenderJob::new(request, RendererConfig::from_env()).run()?;
//! for warning in &outcome.warnings {
//!     log::warn!("{warning}");
//! }
//! # Ok::<(), pdbrender::error::RenderError>(())
//! ```

pub mod batch;
pub mod compile;
pub mod diagnostics;
pub mod emit;
pub mod error;
pub mod job;
mod keyword;
pub mod options;
pub mod quality;
pub mod source;
