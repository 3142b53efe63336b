use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::Parser;
use svgsort::{Config, Indent, process};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

#[derive(Parser)]
#[command(name = "svgsort")]
#[command(about = "Put <defs> first in SVG documents", long_about = None)]
struct Cli {
    /// Input file (use - for stdin)
    #[arg(default_value = "-")]
    input: PathBuf,

    /// Output file (use - for stdout)
    #[arg(short, long, default_value = "-")]
    output: PathBuf,

    /// Config file (default: ./svgsort.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Force pretty-printed output
    #[arg(long)]
    pretty: bool,

    /// Spaces per indentation level (0-255)
    #[arg(long)]
    indent: Option<u8>,

    /// Print size comparison
    #[arg(short, long)]
    stats: bool,

    /// Verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,
}

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::discover(&std::env::current_dir()?)?,
    };
    if cli.pretty {
        config.js2svg.pretty = true;
    }
    if let Some(indent) = cli.indent {
        config.js2svg.indent = Indent::Spaces(indent);
    }

    // Read input
    let input = if cli.input.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(&cli.input)?
    };

    let output = process(&input, &config)?;

    // Write output
    if cli.output.as_os_str() == "-" {
        io::stdout().write_all(output.as_bytes())?;
    } else {
        fs::write(&cli.output, &output)?;
    }

    if cli.stats {
        eprintln!("{} -> {} bytes", input.len(), output.len());
    }

    Ok(())
}

/// `-d` flags pick the level; `RUST_LOG`, when set, wins.
fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));

    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_filter(filter);

    tracing_subscriber::registry().with(fmt_layer).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::try_parse_from(["svgsort", "in.svg", "-o", "out.svg", "--indent", "3", "-dd"])
            .unwrap();
        assert_eq!(cli.input, PathBuf::from("in.svg"));
        assert_eq!(cli.indent, Some(3));
        assert_eq!(cli.debug, 2);
        assert!(!cli.pretty);
    }

    #[test]
    fn test_cli_rejects_oversized_indent() {
        assert!(Cli::try_parse_from(["svgsort", "--indent", "256"]).is_err());
        assert!(Cli::try_parse_from(["svgsort", "--indent", "9223372036854775807"]).is_err());
    }
}
