//! `smolv` - transcode SPIR-V modules to and from SMOL-V
//!
//! ```text
//! smolv encode shader.spv            # writes shader.smolv
//! smolv decode shader.smolv -o a.spv
//! smolv stats shaders/*.spv --top 20
//! smolv verify shaders/*.spv         # encode+decode round trip
//! ```

mod commands;

use anyhow::{bail, Result};
use clap::{ArgAction, Parser, Subcommand};
use smolv_stats::{StatsConfig, StreamForm};
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

use commands::{decode_file, default_output, encode_file, stats_report, verify_file};

#[derive(Parser, Debug)]
#[command(name = "smolv", version)]
#[command(about = "Lossless SPIR-V <-> SMOL-V transcoder")]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode a SPIR-V module into SMOL-V
    Encode {
        input: PathBuf,
        /// Defaults to the input path with a .smolv extension
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Decode a SMOL-V module back into SPIR-V
    Decode {
        input: PathBuf,
        /// Defaults to the input path with a .spv extension
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print per-opcode statistics over SPIR-V and SMOL-V files
    Stats {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Rows per table
        #[arg(long, default_value_t = StatsConfig::DEFAULT.top_n)]
        top: usize,
    },
    /// Check that every SPIR-V file survives an encode/decode round trip
    Verify {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Encode { input, output } => {
            let output = output.unwrap_or_else(|| default_output(&input, StreamForm::Verbose));
            let sizes = encode_file(&input, &output)?;
            println!(
                "{} -> {}: {} -> {} bytes ({:.1}%)",
                input.display(),
                output.display(),
                sizes.input,
                sizes.output,
                sizes.ratio()
            );
        }
        Command::Decode { input, output } => {
            let output = output.unwrap_or_else(|| default_output(&input, StreamForm::Compact));
            let sizes = decode_file(&input, &output)?;
            println!(
                "{} -> {}: {} -> {} bytes",
                input.display(),
                output.display(),
                sizes.input,
                sizes.output
            );
        }
        Command::Stats { files, top } => {
            let config = StatsConfig { top_n: top };
            print!("{}", stats_report(&files, &config)?);
        }
        Command::Verify { files } => {
            let mut failed = 0usize;
            for path in &files {
                match verify_file(path) {
                    Ok(sizes) => println!(
                        "ok   {}: {} -> {} bytes ({:.1}%)",
                        path.display(),
                        sizes.input,
                        sizes.output,
                        sizes.ratio()
                    ),
                    Err(err) => {
                        error!("{:#}", err);
                        println!("FAIL {}", path.display());
                        failed += 1;
                    }
                }
            }
            if failed > 0 {
                bail!("{} of {} files failed verification", failed, files.len());
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_encode_with_output() {
        let cli = Cli::try_parse_from(["smolv", "encode", "a.spv", "-o", "b.smolv"]).unwrap();
        match cli.command {
            Command::Encode { input, output } => {
                assert_eq!(input, PathBuf::from("a.spv"));
                assert_eq!(output, Some(PathBuf::from("b.smolv")));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_stats_defaults() {
        let cli = Cli::try_parse_from(["smolv", "-vv", "stats", "a.spv", "b.smolv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Stats { files, top } => {
                assert_eq!(files.len(), 2);
                assert_eq!(top, 15);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_verify_requires_files() {
        assert!(Cli::try_parse_from(["smolv", "verify"]).is_err());
    }
}
