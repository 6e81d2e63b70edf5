//! Per-opcode tallies over many inputs
//!
//! Verbose inputs contribute occurrence counts and word sizes, compact
//! inputs contribute encoded byte sizes. An input that fails to parse
//! leaves the accumulator untouched: each input is walked into a fresh
//! snapshot which is merged only on success.

use serde::{Deserialize, Serialize};
use smolv_codec::Decoder;
use smolv_spec::module::{split_verbose, words_from_bytes};
use smolv_spec::{Instructions, Opcode, Result, KNOWN_OPCODE_COUNT};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Which format a byte stream is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StreamForm {
    /// SPIR-V words
    Verbose,
    /// SMOL-V bytes
    Compact,
}

/// Tallies for a single opcode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpStats {
    /// Occurrences in verbose inputs
    pub count: u64,
    /// Verbose words, the length/opcode word included
    pub words: u64,
    /// Occurrences in compact inputs
    pub compact_count: u64,
    /// Compact bytes, the length/opcode varint included
    pub compact_bytes: u64,
}

impl OpStats {
    fn merge(&mut self, other: &OpStats) {
        self.count += other.count;
        self.words += other.words;
        self.compact_count += other.compact_count;
        self.compact_bytes += other.compact_bytes;
    }
}

/// Aggregate statistics, detached from the accumulator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Indexed by opcode value, one entry per known opcode
    pub ops: Vec<OpStats>,
    pub verbose_inputs: u64,
    /// Every instruction seen in verbose inputs, unknown opcodes included
    pub total_ops: u64,
    /// Verbose words, headers included
    pub total_words: u64,
    /// Verbose instructions whose opcode is outside the table
    pub unknown_ops: u64,
    pub compact_inputs: u64,
    /// Compact bytes, headers included
    pub total_compact_bytes: u64,
    /// Compact instructions whose opcode is outside the table
    pub unknown_compact_ops: u64,
    /// Output sizes of external compressors, by name
    pub compressed_sizes: BTreeMap<String, u64>,
}

impl Default for StatsSnapshot {
    fn default() -> Self {
        Self {
            ops: vec![OpStats::default(); KNOWN_OPCODE_COUNT],
            verbose_inputs: 0,
            total_ops: 0,
            total_words: 0,
            unknown_ops: 0,
            compact_inputs: 0,
            total_compact_bytes: 0,
            unknown_compact_ops: 0,
            compressed_sizes: BTreeMap::new(),
        }
    }
}

impl StatsSnapshot {
    /// Tallies for one opcode, `None` for opcodes outside the table
    pub fn op(&self, opcode: Opcode) -> Option<&OpStats> {
        opcode.index().and_then(|index| self.ops.get(index))
    }

    fn op_mut(&mut self, opcode: Opcode) -> Option<&mut OpStats> {
        opcode.index().and_then(|index| self.ops.get_mut(index))
    }

    /// Fold `other` into `self`; used to combine results from separate workers
    pub fn merge(&mut self, other: &StatsSnapshot) {
        if self.ops.len() < other.ops.len() {
            self.ops.resize(other.ops.len(), OpStats::default());
        }
        for (mine, theirs) in self.ops.iter_mut().zip(&other.ops) {
            mine.merge(theirs);
        }
        self.verbose_inputs += other.verbose_inputs;
        self.total_ops += other.total_ops;
        self.total_words += other.total_words;
        self.unknown_ops += other.unknown_ops;
        self.compact_inputs += other.compact_inputs;
        self.total_compact_bytes += other.total_compact_bytes;
        self.unknown_compact_ops += other.unknown_compact_ops;
        for (name, bytes) in &other.compressed_sizes {
            *self.compressed_sizes.entry(name.clone()).or_default() += bytes;
        }
    }

    /// Opcodes with a non-zero value for `key`, largest first, ties by opcode
    pub fn ranked(&self, key: impl Fn(&OpStats) -> u64) -> Vec<(Opcode, u64)> {
        let mut ranked: Vec<(Opcode, u64)> = self
            .ops
            .iter()
            .enumerate()
            .map(|(index, stats)| (Opcode(index as u16), key(stats)))
            .filter(|&(_, value)| value > 0)
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked
    }
}

fn walk_verbose(spirv: &[u8]) -> Result<StatsSnapshot> {
    let words = words_from_bytes(spirv)?;
    let (_, code) = split_verbose(&words)?;

    let mut partial = StatsSnapshot {
        verbose_inputs: 1,
        total_words: words.len() as u64,
        ..StatsSnapshot::default()
    };
    for instruction in Instructions::new(code) {
        let instruction = instruction?;
        partial.total_ops += 1;
        let length = instruction.length() as u64;
        match partial.op_mut(instruction.opcode) {
            Some(op) => {
                op.count += 1;
                op.words += length;
            }
            None => partial.unknown_ops += 1,
        }
    }
    Ok(partial)
}

fn walk_compact(smolv: &[u8]) -> Result<StatsSnapshot> {
    let mut decoder = Decoder::new(smolv)?;

    let mut partial = StatsSnapshot {
        compact_inputs: 1,
        total_compact_bytes: smolv.len() as u64,
        ..StatsSnapshot::default()
    };
    while let Some(instruction) = decoder.next_instruction()? {
        let opcode = instruction.opcode;
        let encoded_len = instruction.encoded_len as u64;
        match partial.op_mut(opcode) {
            Some(op) => {
                op.compact_count += 1;
                op.compact_bytes += encoded_len;
            }
            None => partial.unknown_compact_ops += 1,
        }
    }
    Ok(partial)
}

/// Accumulates statistics across many inputs
#[derive(Debug, Clone, Default)]
pub struct InputStats {
    totals: StatsSnapshot,
}

impl InputStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally a SPIR-V module. On error nothing is recorded.
    pub fn add_spirv(&mut self, spirv: &[u8]) -> Result<()> {
        self.add(spirv, StreamForm::Verbose)
    }

    /// Tally a SMOL-V module. On error nothing is recorded.
    pub fn add_smolv(&mut self, smolv: &[u8]) -> Result<()> {
        self.add(smolv, StreamForm::Compact)
    }

    /// Tally a module in either form. On error nothing is recorded.
    pub fn add(&mut self, bytes: &[u8], form: StreamForm) -> Result<()> {
        let walked = match form {
            StreamForm::Verbose => walk_verbose(bytes),
            StreamForm::Compact => walk_compact(bytes),
        };
        match walked {
            Ok(partial) => {
                debug!(?form, bytes = bytes.len(), "collected stats");
                self.totals.merge(&partial);
                Ok(())
            }
            Err(err) => {
                warn!(?form, bytes = bytes.len(), error = %err, "rejected stats input");
                Err(err)
            }
        }
    }

    /// Tally a SPIR-V module together with its SMOL-V encoding. Either both
    /// forms are recorded or, on error, neither is.
    pub fn add_pair(&mut self, spirv: &[u8], smolv: &[u8]) -> Result<()> {
        let walked = walk_verbose(spirv).and_then(|mut partial| {
            partial.merge(&walk_compact(smolv)?);
            Ok(partial)
        });
        match walked {
            Ok(partial) => {
                debug!(spirv = spirv.len(), smolv = smolv.len(), "collected stats for both forms");
                self.totals.merge(&partial);
                Ok(())
            }
            Err(err) => {
                warn!(spirv = spirv.len(), smolv = smolv.len(), error = %err, "rejected stats pair");
                Err(err)
            }
        }
    }

    /// Add `bytes` to the running total for compressor `name`
    pub fn record_compressed_size(&mut self, name: &str, bytes: u64) {
        *self.totals.compressed_sizes.entry(name.to_string()).or_default() += bytes;
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        self.totals.clone()
    }

    pub fn into_snapshot(self) -> StatsSnapshot {
        self.totals
    }
}

/// Statistics for a single stream
pub fn compute_stats(bytes: &[u8], form: StreamForm) -> Result<StatsSnapshot> {
    let mut stats = InputStats::new();
    stats.add(bytes, form)?;
    Ok(stats.into_snapshot())
}
