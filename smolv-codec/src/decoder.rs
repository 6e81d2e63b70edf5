//! SMOL-V to SPIR-V decoding
//!
//! The exact mirror of [`crate::encoder`]. [`Decoder`] walks compact
//! instructions one at a time and reconstructs their verbose words; it is
//! also what the statistics pass uses to measure compact instruction sizes.

use smolv_spec::encoding::zigzag_decode;
use smolv_spec::{
    ByteReader, FormatError, ModuleHeader, Opcode, Result, SMOLV_MAGIC, SPIRV_MAGIC,
};
use tracing::{debug, trace};

use crate::state::IdState;

/// One decoded instruction, borrowed from the decoder's scratch buffer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedInstruction<'d> {
    pub opcode: Opcode,
    /// Verbose words, the length/opcode word included
    pub words: &'d [u32],
    /// Byte offset of the instruction in the compact stream
    pub offset: usize,
    /// Bytes the instruction occupies in the compact stream
    pub encoded_len: usize,
}

/// Streaming decoder over a SMOL-V buffer
#[derive(Debug)]
pub struct Decoder<'a> {
    reader: ByteReader<'a>,
    header: ModuleHeader,
    state: IdState,
    words: Vec<u32>,
}

impl<'a> Decoder<'a> {
    /// Validate the compact header and position the decoder on the first
    /// instruction
    pub fn new(smolv: &'a [u8]) -> Result<Self> {
        let mut reader = ByteReader::new(smolv);
        let header = ModuleHeader::read(&mut reader, SMOLV_MAGIC)?;
        Ok(Self {
            reader,
            header,
            state: IdState::default(),
            words: Vec::new(),
        })
    }

    pub fn header(&self) -> &ModuleHeader {
        &self.header
    }

    /// Decode the next instruction, `Ok(None)` at the end of the stream
    pub fn next_instruction(&mut self) -> Result<Option<DecodedInstruction<'_>>> {
        if self.reader.is_empty() {
            return Ok(None);
        }

        let offset = self.reader.position();
        let (length, opcode) = self.reader.read_length_op()?;
        if length == 0 {
            return Err(FormatError::ZeroLengthInstruction { offset });
        }
        let length = length as usize;
        let desc = opcode.descriptor();

        let reader = &mut self.reader;
        let state = &mut self.state;
        let words = &mut self.words;
        words.clear();
        words.push(((length as u32) << 16) | opcode.to_u16() as u32);

        if desc.has_type && words.len() < length {
            words.push(reader.read_varint()?);
        }
        if desc.has_result && words.len() < length {
            let delta = zigzag_decode(reader.read_varint()?);
            let id = state.prev_result.wrapping_add(delta as u32);
            words.push(id);
            state.prev_result = id;
        }
        if opcode.is_annotation() && words.len() < length {
            let delta = zigzag_decode(reader.read_varint()?);
            let target = state.prev_decorate.wrapping_add(delta as u32);
            words.push(target);
            state.prev_decorate = target;
        }

        let relative_count = desc.relative_count().min(length - words.len());
        for _ in 0..relative_count {
            let encoded = reader.read_varint()?;
            let delta = if desc.relative_is_signed() {
                zigzag_decode(encoded) as u32
            } else {
                encoded
            };
            words.push(state.prev_result.wrapping_sub(delta));
        }

        while words.len() < length {
            let word = if desc.varint_rest {
                reader.read_varint()?
            } else {
                reader.read_word()?
            };
            words.push(word);
        }

        let encoded_len = reader.position() - offset;
        trace!(offset, opcode = %opcode, length, encoded_len, "decoded instruction");

        Ok(Some(DecodedInstruction {
            opcode,
            words: &self.words,
            offset,
            encoded_len,
        }))
    }
}

/// Decode a SMOL-V module into a freshly allocated buffer
pub fn decode(smolv: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(smolv.len() * 2);
    decode_into(smolv, &mut out)?;
    Ok(out)
}

/// Decode a SMOL-V module, appending the SPIR-V bytes to `out`.
///
/// `out` is never cleared. On error its tail holds partial output that
/// must be discarded.
pub fn decode_into(smolv: &[u8], out: &mut Vec<u8>) -> Result<()> {
    let mut decoder = Decoder::new(smolv)?;
    let start = out.len();
    decoder.header().write(out, SPIRV_MAGIC);

    let mut count = 0usize;
    while let Some(instruction) = decoder.next_instruction()? {
        for &word in instruction.words {
            out.extend_from_slice(&word.to_le_bytes());
        }
        count += 1;
    }

    debug!(
        smolv_bytes = smolv.len(),
        spirv_bytes = out.len() - start,
        instructions = count,
        "decoded module"
    );
    Ok(())
}
