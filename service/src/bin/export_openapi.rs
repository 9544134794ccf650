//! Export the `OpenAPI` document for the REST API as JSON.
//!
//! Usage: `cargo run --bin export_openapi -- --out openapi.json`
//! (prints to stdout without `--out`).

#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use speakup_api::rest::ApiDoc;
use utoipa::OpenApi;

#[derive(Parser)]
#[command(about = "Export the SpeakUp OpenAPI document")]
struct Args {
    /// Write to this file instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .context("serializing OpenAPI document")?;

    match args.out {
        Some(path) => std::fs::write(&path, json)
            .with_context(|| format!("writing {}", path.display()))?,
        None => print!("{json}"),
    }
    Ok(())
}
