//! # SMOL-V Format Specification
//!
//! Core types shared by the SMOL-V encoder, decoder and statistics tools.
//!
//! SMOL-V is a lossless re-encoding of SPIR-V: the same header and
//! instructions, but with operands written as varints and IDs written as
//! small deltas, so the result is smaller and compresses better.
//!
//! ## Contents
//! - [`opcode`]: per-opcode encoding descriptors and names
//! - [`encoding`]: words, varints, zigzag and the length/opcode shuffle
//! - [`module`]: the five-word header and the verbose instruction walker
//! - [`error`]: [`FormatError`], shared by every crate in the workspace

pub mod encoding;
pub mod error;
pub mod module;
pub mod opcode;

pub use encoding::ByteReader;
pub use error::{FormatError, Result};
pub use module::{Instruction, Instructions, Module, ModuleHeader};
pub use opcode::{OpDescriptor, Opcode, KNOWN_OPCODE_COUNT};

/// Magic number of a SPIR-V module
pub const SPIRV_MAGIC: u32 = 0x07230203;

/// Magic number of a SMOL-V module: "SMOL" = 0x534D4F4C
pub const SMOLV_MAGIC: u32 = 0x534D4F4C;

/// SPIR-V 1.0
pub const VERSION_1_0: u32 = 0x0001_0000;

/// SPIR-V 1.1
pub const VERSION_1_1: u32 = 0x0001_0100;

/// The only versions accepted in either direction
pub const SUPPORTED_VERSIONS: [u32; 2] = [VERSION_1_0, VERSION_1_1];
