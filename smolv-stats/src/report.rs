//! Human-readable statistics report

use crate::config::StatsConfig;
use crate::stats::StatsSnapshot;
use std::fmt;

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

fn average(total: u64, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

fn kilobytes(bytes: u64) -> f64 {
    bytes as f64 / 1024.0
}

impl StatsSnapshot {
    /// Render the report: most frequent ops, largest ops in each form and
    /// the compression table
    pub fn render(&self, config: &StatsConfig) -> String {
        Report {
            snapshot: self,
            top_n: config.top_n.max(1),
        }
        .to_string()
    }

    fn write_report(&self, out: &mut fmt::Formatter<'_>, top_n: usize) -> fmt::Result {
        let verbose_bytes = self.total_words * 4;

        writeln!(
            out,
            "Stats for {} SPIR-V inputs, total size {} words ({:.1}KB):",
            self.verbose_inputs,
            self.total_words,
            kilobytes(verbose_bytes)
        )?;
        if self.unknown_ops > 0 {
            writeln!(out, "  ({} instructions with unknown opcodes)", self.unknown_ops)?;
        }

        writeln!(out, "Most frequent ops:")?;
        for (rank, (opcode, count)) in self.ranked(|op| op.count).into_iter().take(top_n).enumerate() {
            writeln!(
                out,
                " #{:2}: {:<24} {:6} ({:4.1}%)",
                rank,
                opcode.name(),
                count,
                percent(count, self.total_ops)
            )?;
        }

        writeln!(out, "Largest total size of ops:")?;
        for (rank, (opcode, words)) in self.ranked(|op| op.words).into_iter().take(top_n).enumerate() {
            let count = self.op(opcode).map_or(0, |op| op.count);
            writeln!(
                out,
                " #{:2}: {:<24} {:8} ({:4.1}%) avg len {:.1}",
                rank,
                opcode.name(),
                words * 4,
                percent(words, self.total_words),
                average(words * 4, count)
            )?;
        }

        writeln!(
            out,
            "Largest total size of ops in SMOL-V ({} inputs, {:.1}KB):",
            self.compact_inputs,
            kilobytes(self.total_compact_bytes)
        )?;
        for (rank, (opcode, bytes)) in self
            .ranked(|op| op.compact_bytes)
            .into_iter()
            .take(top_n)
            .enumerate()
        {
            let count = self.op(opcode).map_or(0, |op| op.compact_count);
            writeln!(
                out,
                " #{:2}: {:<24} {:8} ({:4.1}%) avg len {:.1}",
                rank,
                opcode.name(),
                bytes,
                percent(bytes, self.total_compact_bytes),
                average(bytes, count)
            )?;
        }

        writeln!(out, "Compression: original size {:.1}KB", kilobytes(verbose_bytes))?;
        for (name, bytes) in &self.compressed_sizes {
            writeln!(
                out,
                "{:<15}: {:7.1}KB ({:5.1}%)",
                name,
                kilobytes(*bytes),
                percent(*bytes, verbose_bytes)
            )?;
        }
        Ok(())
    }
}

/// A snapshot paired with its row limit
struct Report<'a> {
    snapshot: &'a StatsSnapshot,
    top_n: usize,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.snapshot.write_report(f, self.top_n)
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_report(f, StatsConfig::DEFAULT.top_n)
    }
}
