use std::{
    fs::read_to_string,
    io::{self, Read},
    path::PathBuf,
    process::ExitCode,
    time::Instant,
};

use anyhow::Context;
use clap::Parser;
use frontend::{lexer::lexer::tokenize, parser::parser::parse_source, render_error};
use tracing_subscriber::EnvFilter;

/// Parses a source file and prints its canonical form.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// File to parse, stdin when omitted
    file: Option<PathBuf>,

    /// Print the token stream instead of parsing
    #[arg(long)]
    tokens: bool,

    /// Print the tree's debug form instead of its canonical rendering
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let (file_contents, file_name) = match &args.file {
        Some(path) => {
            let contents = read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            (contents, name)
        }
        None => {
            let mut contents = String::new();
            io::stdin()
                .read_to_string(&mut contents)
                .context("failed to read stdin")?;
            (contents, String::from("stdin"))
        }
    };

    if args.tokens {
        for token in tokenize(file_contents, Some(file_name)) {
            token.debug();
        }
        return Ok(ExitCode::SUCCESS);
    }

    let start = Instant::now();
    let parsed = parse_source(file_contents.clone(), Some(file_name.clone()));
    tracing::info!(elapsed = ?start.elapsed(), "parsed {}", file_name);

    if !parsed.is_ok() {
        for error in &parsed.errors {
            eprint!("{}", render_error(error, &file_contents, &file_name));
        }
        tracing::warn!(errors = parsed.errors.len(), "parsing failed");
        return Ok(ExitCode::FAILURE);
    }

    if args.debug {
        println!("{:#?}", parsed.program);
    } else {
        println!("{}", parsed.program);
    }

    Ok(ExitCode::SUCCESS)
}
