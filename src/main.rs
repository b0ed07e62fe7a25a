use std::{fs, io, process::ExitCode};

use anyhow::Context;
use clap::Parser;
use owo_colors::{OwoColorize, Stream};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{cli::Cli, parser::bibtex::BiblatexParser};

mod cli;
mod config;
mod format;
mod names;
mod parser;
mod pipeline;
mod record;
mod render;
mod strip;

fn main() -> ExitCode {
    // Diagnostics go to stderr; stdout carries nothing but the rendered list items.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "bibhtml=warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Cli::parse();
    match run(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{} {e:#}",
                "error:".if_supports_color(Stream::Stderr, |t| t.red())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Cli) -> anyhow::Result<usize> {
    let config = args.config();
    let raw = fs::read_to_string(&args.bib)
        .with_context(|| format!("failed to read {}", args.bib.display()))?;
    tracing::debug!(path = %args.bib.display(), bytes = raw.len(), "read bibliography");
    let mut out = io::stdout().lock();
    pipeline::run(&raw, &BiblatexParser, &config, &mut out)
}
