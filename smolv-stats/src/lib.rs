//! # SMOL-V Statistics
//!
//! Read-only passes over SPIR-V and SMOL-V streams that tally, per opcode,
//! how often it occurs and how much space it takes in either form. The
//! passes share nothing with transcoding: a failure here never affects
//! `encode`/`decode` and vice versa.
//!
//! ```rust
//! use smolv_spec::{Module, Opcode};
//! use smolv_stats::{compute_stats, StatsConfig, StreamForm};
//!
//! let mut module = Module::default();
//! module.push(Opcode::TYPE_VOID, &[2]);
//! let snapshot = compute_stats(&module.to_bytes(), StreamForm::Verbose).unwrap();
//! assert_eq!(snapshot.op(Opcode::TYPE_VOID).unwrap().count, 1);
//! println!("{}", snapshot.render(&StatsConfig::default()));
//! ```

pub mod config;
pub mod report;
pub mod stats;

pub use config::{ConfigError, StatsConfig};
pub use stats::{compute_stats, InputStats, OpStats, StatsSnapshot, StreamForm};
