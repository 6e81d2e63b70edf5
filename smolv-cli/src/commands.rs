//! File-level drivers for the `smolv` subcommands

use anyhow::{bail, Context, Result};
use smolv_codec::{decode, encode};
use smolv_spec::{SMOLV_MAGIC, SPIRV_MAGIC};
use smolv_stats::{InputStats, StatsConfig, StatsSnapshot, StreamForm};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Input and output sizes of one transcoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sizes {
    pub input: usize,
    pub output: usize,
}

impl Sizes {
    /// Output size as a percentage of the input size
    pub fn ratio(&self) -> f64 {
        if self.input == 0 {
            0.0
        } else {
            self.output as f64 / self.input as f64 * 100.0
        }
    }
}

/// Guess the form of a stream from its first word
pub fn detect_form(bytes: &[u8]) -> Option<StreamForm> {
    let magic = u32::from_le_bytes(bytes.get(..4)?.try_into().ok()?);
    match magic {
        SPIRV_MAGIC => Some(StreamForm::Verbose),
        SMOLV_MAGIC => Some(StreamForm::Compact),
        _ => None,
    }
}

/// `shader.spv` becomes `shader.smolv` and vice versa
pub fn default_output(input: &Path, form: StreamForm) -> PathBuf {
    match form {
        StreamForm::Verbose => input.with_extension("smolv"),
        StreamForm::Compact => input.with_extension("spv"),
    }
}

fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

fn write(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
}

pub fn encode_file(input: &Path, output: &Path) -> Result<Sizes> {
    let spirv = read(input)?;
    let smolv = encode(&spirv).with_context(|| format!("failed to encode {}", input.display()))?;
    write(output, &smolv)?;
    info!(input = %input.display(), output = %output.display(), "encoded");
    Ok(Sizes {
        input: spirv.len(),
        output: smolv.len(),
    })
}

pub fn decode_file(input: &Path, output: &Path) -> Result<Sizes> {
    let smolv = read(input)?;
    let spirv = decode(&smolv).with_context(|| format!("failed to decode {}", input.display()))?;
    write(output, &spirv)?;
    info!(input = %input.display(), output = %output.display(), "decoded");
    Ok(Sizes {
        input: smolv.len(),
        output: spirv.len(),
    })
}

/// Encode then decode `spirv` and check the result is byte-identical
pub fn verify_bytes(spirv: &[u8]) -> Result<Sizes> {
    let smolv = encode(spirv).context("encode failed")?;
    let restored = decode(&smolv).context("decode failed")?;
    if restored != spirv {
        let first_diff = restored
            .iter()
            .zip(spirv)
            .position(|(a, b)| a != b)
            .unwrap_or_else(|| restored.len().min(spirv.len()));
        bail!(
            "round trip mismatch at byte {} ({} bytes in, {} bytes out)",
            first_diff,
            spirv.len(),
            restored.len()
        );
    }
    Ok(Sizes {
        input: spirv.len(),
        output: smolv.len(),
    })
}

pub fn verify_file(path: &Path) -> Result<Sizes> {
    let spirv = read(path)?;
    verify_bytes(&spirv).with_context(|| format!("verification failed for {}", path.display()))
}

/// Statistics over a set of files, plus the paths that were skipped.
///
/// SPIR-V inputs are also encoded so the compact tables are filled in.
pub fn collect_stats(paths: &[PathBuf]) -> Result<(StatsSnapshot, Vec<PathBuf>)> {
    let mut stats = InputStats::new();
    let mut skipped = Vec::new();

    for path in paths {
        let bytes = read(path)?;
        let accepted = match detect_form(&bytes) {
            Some(StreamForm::Verbose) => {
                encode(&bytes).and_then(|smolv| stats.add_pair(&bytes, &smolv))
            }
            Some(StreamForm::Compact) => stats.add_smolv(&bytes),
            None => {
                warn!(path = %path.display(), "not a SPIR-V or SMOL-V file");
                skipped.push(path.clone());
                continue;
            }
        };
        if let Err(err) = accepted {
            warn!(path = %path.display(), error = %err, "skipping input");
            skipped.push(path.clone());
        }
    }

    if skipped.len() == paths.len() {
        bail!("none of the {} inputs could be read as SPIR-V or SMOL-V", paths.len());
    }
    Ok((stats.into_snapshot(), skipped))
}

pub fn stats_report(paths: &[PathBuf], config: &StatsConfig) -> Result<String> {
    config.validate()?;
    let (snapshot, skipped) = collect_stats(paths)?;
    let mut report = snapshot.render(config);
    for path in skipped {
        report.push_str(&format!("skipped {}\n", path.display()));
    }
    Ok(report)
}
