//! # Module Structure
//!
//! Header and instruction layout shared by both formats.
//!
//! Binary format (both forms start with five little-endian words):
//! ```text
//! Offset  Size  Field
//! ──────────────────────────────────
//! 0x00    4     magic (SPIR-V 0x07230203, compact "SMOL" 0x534D4F4C)
//! 0x04    4     version (1.0 or 1.1)
//! 0x08    4     generator
//! 0x0C    4     bound (all IDs are below this)
//! 0x10    4     schema
//! ```
//!
//! In the verbose form the header is followed by instructions of
//! `[(length << 16) | opcode, operand...]` words.

use crate::encoding::{write_word, ByteReader, WORD_SIZE};
use crate::error::{FormatError, Result};
use crate::opcode::Opcode;
use crate::{SPIRV_MAGIC, SUPPORTED_VERSIONS, VERSION_1_0};
use std::fmt;

/// Check that a version word is one this crate can transcode
pub fn check_version(version: u32) -> Result<()> {
    if SUPPORTED_VERSIONS.contains(&version) {
        Ok(())
    } else {
        Err(FormatError::UnsupportedVersion(version))
    }
}

/// The four header fields after the magic number
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ModuleHeader {
    pub version: u32,
    pub generator: u32,
    pub bound: u32,
    pub schema: u32,
}

impl ModuleHeader {
    /// Header size in words, magic included
    pub const WORDS: usize = 5;

    /// Header size in bytes
    pub const SIZE: usize = Self::WORDS * WORD_SIZE;

    /// Version 1.0 header with generator and schema zeroed
    pub fn new(bound: u32) -> Self {
        Self {
            version: VERSION_1_0,
            generator: 0,
            bound,
            schema: 0,
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_version(self.version)
    }

    /// Read and validate a header whose first word must be `magic`
    pub fn read(reader: &mut ByteReader<'_>, magic: u32) -> Result<Self> {
        if reader.remaining() < Self::SIZE {
            return Err(FormatError::HeaderTooShort {
                expected: Self::SIZE,
                found: reader.remaining(),
            });
        }
        let found = reader.read_word()?;
        if found != magic {
            return Err(FormatError::InvalidMagic {
                expected: magic,
                found,
            });
        }
        let header = Self {
            version: reader.read_word()?,
            generator: reader.read_word()?,
            bound: reader.read_word()?,
            schema: reader.read_word()?,
        };
        header.validate()?;
        Ok(header)
    }

    /// Append the header, led by `magic`, as five fixed words
    pub fn write(&self, out: &mut Vec<u8>, magic: u32) {
        write_word(out, magic);
        write_word(out, self.version);
        write_word(out, self.generator);
        write_word(out, self.bound);
        write_word(out, self.schema);
    }
}

impl Default for ModuleHeader {
    fn default() -> Self {
        Self::new(1)
    }
}

impl fmt::Display for ModuleHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Version:     {}.{}", self.version >> 16, (self.version >> 8) & 0xFF)?;
        writeln!(f, "  Generator:   {:#010x}", self.generator)?;
        writeln!(f, "  Bound:       {}", self.bound)?;
        writeln!(f, "  Schema:      {}", self.schema)?;
        Ok(())
    }
}

/// Split a verbose byte stream into little-endian words
pub fn words_from_bytes(bytes: &[u8]) -> Result<Vec<u32>> {
    if bytes.len() % WORD_SIZE != 0 {
        return Err(FormatError::UnalignedInput { len: bytes.len() });
    }
    Ok(bytes
        .chunks_exact(WORD_SIZE)
        .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}

/// Parse the header of a verbose word stream and return the instruction words
pub fn split_verbose(words: &[u32]) -> Result<(ModuleHeader, &[u32])> {
    if words.len() < ModuleHeader::WORDS {
        return Err(FormatError::HeaderTooShort {
            expected: ModuleHeader::SIZE,
            found: words.len() * WORD_SIZE,
        });
    }
    if words[0] != SPIRV_MAGIC {
        return Err(FormatError::InvalidMagic {
            expected: SPIRV_MAGIC,
            found: words[0],
        });
    }
    let header = ModuleHeader {
        version: words[1],
        generator: words[2],
        bound: words[3],
        schema: words[4],
    };
    header.validate()?;
    Ok((header, &words[ModuleHeader::WORDS..]))
}

/// Pack a literal string into nul-terminated little-endian words
pub fn literal_string(text: &str) -> Vec<u32> {
    let mut bytes = text.as_bytes().to_vec();
    bytes.push(0);
    bytes
        .chunks(WORD_SIZE)
        .map(|chunk| {
            let mut word = [0u8; WORD_SIZE];
            word[..chunk.len()].copy_from_slice(chunk);
            u32::from_le_bytes(word)
        })
        .collect()
}

/// One verbose instruction, borrowed from the word stream
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction<'a> {
    pub opcode: Opcode,
    /// All words of the instruction, the length/opcode word included
    pub words: &'a [u32],
    /// Byte offset of the instruction in the verbose stream
    pub offset: usize,
}

impl<'a> Instruction<'a> {
    /// Word count, the length/opcode word included
    #[inline]
    pub fn length(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn operands(&self) -> &'a [u32] {
        &self.words[1..]
    }
}

/// Walks the instructions that follow a verbose header.
///
/// Yields an error (and then stops) on a zero-length instruction or one
/// that runs past the end of the stream.
#[derive(Clone, Debug)]
pub struct Instructions<'a> {
    words: &'a [u32],
    pos: usize,
    failed: bool,
}

impl<'a> Instructions<'a> {
    /// `words` must start right after the header
    pub fn new(words: &'a [u32]) -> Self {
        Self {
            words,
            pos: 0,
            failed: false,
        }
    }

    fn byte_offset(&self) -> usize {
        (ModuleHeader::WORDS + self.pos) * WORD_SIZE
    }
}

impl<'a> Iterator for Instructions<'a> {
    type Item = Result<Instruction<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.words.len() {
            return None;
        }
        let first = self.words[self.pos];
        let length = (first >> 16) as usize;
        let offset = self.byte_offset();
        let remaining = self.words.len() - self.pos;

        if length == 0 {
            self.failed = true;
            return Some(Err(FormatError::ZeroLengthInstruction { offset }));
        }
        if length > remaining {
            self.failed = true;
            return Some(Err(FormatError::InstructionOverrun {
                offset,
                length,
                remaining,
            }));
        }

        let words = &self.words[self.pos..self.pos + length];
        self.pos += length;
        Some(Ok(Instruction {
            opcode: Opcode((first & 0xFFFF) as u16),
            words,
            offset,
        }))
    }
}

/// An owned verbose module, mostly useful for building streams by hand
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Module {
    pub header: ModuleHeader,
    /// Instruction words following the header
    pub code: Vec<u32>,
}

impl Module {
    pub fn new(header: ModuleHeader) -> Self {
        Self {
            header,
            code: Vec::new(),
        }
    }

    /// Append one instruction, rejecting it if it would exceed 65535 words.
    /// The module is unchanged on error.
    pub fn try_push(&mut self, opcode: Opcode, operands: &[u32]) -> Result<&mut Self> {
        let words = operands.len() + 1;
        if words > u16::MAX as usize {
            return Err(FormatError::InstructionTooLong { words });
        }
        self.code.push(((words as u32) << 16) | opcode.to_u16() as u32);
        self.code.extend_from_slice(operands);
        Ok(self)
    }

    /// Append one instruction.
    ///
    /// # Panics
    ///
    /// Panics if the instruction would exceed 65535 words; see [`Module::try_push`].
    pub fn push(&mut self, opcode: Opcode, operands: &[u32]) -> &mut Self {
        match self.try_push(opcode, operands) {
            Ok(module) => module,
            Err(err) => panic!("{}", err),
        }
    }

    /// Walk the instructions
    pub fn instructions(&self) -> Instructions<'_> {
        Instructions::new(&self.code)
    }

    /// Serialize to a verbose byte stream
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(ModuleHeader::SIZE + self.code.len() * WORD_SIZE);
        self.header.write(&mut bytes, SPIRV_MAGIC);
        for &word in &self.code {
            write_word(&mut bytes, word);
        }
        bytes
    }

    /// Parse a verbose byte stream, validating the header and every
    /// instruction boundary
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let words = words_from_bytes(bytes)?;
        let (header, code) = split_verbose(&words)?;
        for instruction in Instructions::new(code) {
            instruction?;
        }
        Ok(Self {
            header,
            code: code.to_vec(),
        })
    }
}
