use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use adf2md::Config;
use clap::Parser;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_FILE: &str = "adf2md.toml";

#[derive(Parser)]
#[command(name = "adf2md")]
#[command(about = "Convert Atlassian Document Format (ADF) JSON to Markdown")]
struct Cli {
    /// Input ADF file (reads stdin when omitted or "-")
    input: Option<PathBuf>,

    /// Output Markdown file (writes stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file (defaults to ./adf2md.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Append a newline after the converted Markdown
    #[arg(long)]
    trailing_newline: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error converting ADF to Markdown: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> adf2md::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_strict(path)?,
        None => Config::load(Path::new(DEFAULT_CONFIG_FILE)),
    };
    if cli.trailing_newline {
        config.output.trailing_newline = true;
    }

    let input = match cli.input.as_deref() {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)?,
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let mut markdown = adf2md::convert_with_config(&input, &config)?;
    if config.output.trailing_newline {
        markdown.push('\n');
    }

    match &cli.output {
        Some(path) => fs::write(path, markdown)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(markdown.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
