//! `pdbrender` command-line front end.
#![allow(clippy::print_stdout)]

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use pdbrender::batch::{self, ScanOptions, SortKey, SortOrder};
use pdbrender::compile::compile_request;
use pdbrender::emit::{render_script, RendererConfig};
use pdbrender::job::RenderJob;
use pdbrender::options::RenderRequest;

#[derive(Parser)]
#[command(
    name = "pdbrender",
    version,
    about = "Render protein structures with PyMOL"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a request file to PNG.
    Render {
        #[command(flatten)]
        request: RequestArgs,
        /// PyMOL binary (falls back to $PYMOL_BIN, then PATH).
        #[arg(long)]
        pymol: Option<PathBuf>,
        /// Renderer time limit in seconds.
        #[arg(long, default_value_t = 300)]
        timeout: u64,
    },
    /// Print the PyMOL script a request compiles to, without rendering.
    Script {
        #[command(flatten)]
        request: RequestArgs,
    },
    /// Write a request file holding every default.
    Init {
        /// Destination TOML file.
        path: PathBuf,
    },
    /// List structure files in a folder, one per line.
    Scan {
        /// Folder to scan.
        folder: String,
        /// File name pattern.
        #[arg(long, default_value = batch::DEFAULT_PATTERN)]
        pattern: String,
        /// name, date_modified, date_created or size.
        #[arg(long, default_value = "name", value_parser = parse_sort)]
        sort: SortKey,
        /// ascending or descending.
        #[arg(long, default_value = "ascending", value_parser = parse_order)]
        order: SortOrder,
    },
    /// Pick one entry from a listing by index.
    Select {
        /// Listing file, or `-` for stdin.
        listing: PathBuf,
        /// Zero-based index.
        index: usize,
    },
    /// Print the request JSON Schema.
    Schema,
}

#[derive(clap::Args)]
struct RequestArgs {
    /// Request TOML file (defaults apply when omitted).
    #[arg(long, short)]
    request: Option<PathBuf>,
    /// Structure reference, overriding the request file.
    #[arg(long, short)]
    structure: Option<String>,
    /// Output PNG, overriding the request file.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

impl RequestArgs {
    fn load(&self) -> anyhow::Result<RenderRequest> {
        let mut request = match &self.request {
            Some(path) => RenderRequest::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => RenderRequest::default(),
        };
        if let Some(structure) = &self.structure {
            request.structure.clone_from(structure);
        }
        if let Some(output) = &self.output {
            request.output.path.clone_from(output);
        }
        Ok(request)
    }
}

fn expected(keywords: &[&str]) -> String {
    format!("expected one of {}", keywords.join(", "))
}

fn parse_sort(raw: &str) -> Result<SortKey, String> {
    SortKey::parse(raw).ok_or_else(|| expected(SortKey::KEYWORDS))
}

fn parse_order(raw: &str) -> Result<SortOrder, String> {
    SortOrder::parse(raw).ok_or_else(|| expected(SortOrder::KEYWORDS))
}

fn read_listing(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        let _ = std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Command::Render {
            request,
            pymol,
            timeout,
        } => {
            let mut renderer = RendererConfig::from_env()
                .timeout(Duration::from_secs(timeout));
            if let Some(pymol) = pymol {
                renderer = renderer.binary(pymol);
            }
            let outcome = RenderJob::new(request.load()?, renderer).run()?;
            println!("{}", outcome.image.display());
        }
        Command::Script { request } => {
            let request = request.load()?;
            let output = std::path::absolute(&request.output.path)?;
            let compilation = compile_request(&request, &output)?;
            let structure = Path::new(request.structure.trim());
            print!(
                "{}",
                render_script(structure, &compilation.directives)
            );
        }
        Command::Init { path } => {
            RenderRequest::default().save(&path)?;
            log::info!("wrote {}", path.display());
        }
        Command::Scan {
            folder,
            pattern,
            sort,
            order,
        } => {
            let files = batch::scan(
                &folder,
                &ScanOptions {
                    pattern,
                    sort,
                    order,
                },
            )?;
            println!("{}", batch::format_listing(&files));
        }
        Command::Select { listing, index } => {
            let entries = batch::parse_listing(&read_listing(&listing)?);
            if entries.is_empty() {
                bail!("listing {} is empty", listing.display());
            }
            let selected = batch::select(&entries, index)?;
            println!("{}\t{}", selected.item, selected.total_count);
        }
        Command::Schema => {
            let schema = RenderRequest::json_schema();
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }
    Ok(())
}
