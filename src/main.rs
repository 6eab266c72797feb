use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, error};

use wikipreview::{PreviewConfig, Result, render_all_in_dirs, render_file, render_markup};

/// Render wiki markup to an HTML preview fragment.
#[derive(Debug, Parser)]
#[command(name = "wikipreview", version)]
struct Cli {
    /// `.wiki` file to render; stdin when omitted or `-`.
    file: Option<PathBuf>,

    /// Print `{"html": ..., "shortDescription": ...}` instead of bare HTML.
    #[arg(long)]
    json: bool,

    /// Prepend a table of contents built from the headings.
    #[arg(long)]
    toc: bool,

    /// Preview server base URL; falls back to local rendering on failure.
    #[arg(long, value_name = "URL")]
    server: Option<String>,

    /// Render every `.wiki` file under DIR (requires --out).
    #[arg(long, value_name = "DIR", requires = "out", conflicts_with = "file")]
    all: Option<PathBuf>,

    /// Output directory for --all.
    #[arg(long, value_name = "DIR", requires = "all")]
    out: Option<PathBuf>,

    /// YAML config file; flags override its values.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .parse_default_env()
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut cfg = match &cli.config {
        Some(path) => PreviewConfig::load(path)?,
        None => PreviewConfig::default(),
    };
    if cli.toc {
        cfg.toc = true;
    }
    if let Some(server) = &cli.server {
        cfg.server_url = Some(server.clone());
    }

    if let (Some(wiki_root), Some(out_root)) = (&cli.all, &cli.out) {
        render_all_in_dirs(wiki_root, out_root, &cfg)?;
        return Ok(());
    }

    let out = match &cli.file {
        Some(path) if path.as_os_str() != "-" => render_file(path, &cfg)?,
        _ => {
            let mut bytes = Vec::new();
            io::stdin().read_to_end(&mut bytes)?;
            render_markup(&String::from_utf8_lossy(&bytes), &cfg)
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", out.html);
    }
    Ok(())
}
