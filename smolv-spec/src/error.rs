//! # Format Errors
//!
//! Every way a verbose or compact stream can be rejected. Offsets are byte
//! offsets into the input buffer being read.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Input size {len} is not a multiple of 4 bytes")]
    UnalignedInput { len: usize },

    #[error("Header too short: expected {expected} bytes, found {found} bytes")]
    HeaderTooShort { expected: usize, found: usize },

    #[error("Invalid magic: expected {expected:#010x}, found {found:#010x}")]
    InvalidMagic { expected: u32, found: u32 },

    #[error("Unsupported version: {0:#010x}")]
    UnsupportedVersion(u32),

    #[error("Instruction at offset {offset} has zero length")]
    ZeroLengthInstruction { offset: usize },

    #[error("Instruction at offset {offset} claims {length} words, only {remaining} remain")]
    InstructionOverrun {
        offset: usize,
        length: usize,
        remaining: usize,
    },

    #[error("Unexpected end of data at offset {offset}")]
    UnexpectedEof { offset: usize },

    #[error("Varint at offset {offset} is longer than 5 bytes")]
    VarintOverflow { offset: usize },

    #[error("Instruction of {words} words exceeds the 65535 word limit")]
    InstructionTooLong { words: usize },
}

impl FormatError {
    /// Whether the input was cut short (as opposed to being foreign or corrupt)
    pub fn is_truncation(&self) -> bool {
        matches!(
            self,
            FormatError::HeaderTooShort { .. }
                | FormatError::InstructionOverrun { .. }
                | FormatError::UnexpectedEof { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, FormatError>;
