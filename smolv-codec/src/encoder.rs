//! SPIR-V to SMOL-V encoding
//!
//! Per instruction, in this order:
//! 1. length + opcode, shuffled, as a varint
//! 2. type ID as a varint (if the opcode has one)
//! 3. result ID as a zigzag delta from the previous result ID
//! 4. Decorate/MemberDecorate target as a zigzag delta from the previous target
//! 5. `delta_from_result` operands as `prev_result - operand`
//!    (zigzag-encoded when the count is negative)
//! 6. remaining operands as varints or raw words
//!
//! Every step is bounded by the instruction's declared length.

use smolv_spec::encoding::{write_length_op, write_varint, write_word, zigzag_encode};
use smolv_spec::module::{split_verbose, words_from_bytes};
use smolv_spec::{Instruction, Instructions, Result, SMOLV_MAGIC};
use tracing::{debug, trace};

use crate::state::IdState;

/// Encode a SPIR-V module into a freshly allocated buffer
pub fn encode(spirv: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(spirv.len());
    encode_into(spirv, &mut out)?;
    Ok(out)
}

/// Encode a SPIR-V module, appending to `out`.
///
/// `out` is never cleared. On error its tail holds partial output that
/// must be discarded.
pub fn encode_into(spirv: &[u8], out: &mut Vec<u8>) -> Result<()> {
    let words = words_from_bytes(spirv)?;
    let (header, code) = split_verbose(&words)?;

    let start = out.len();
    header.write(out, SMOLV_MAGIC);

    let mut state = IdState::default();
    let mut count = 0usize;
    for instruction in Instructions::new(code) {
        encode_instruction(&instruction?, &mut state, out);
        count += 1;
    }

    debug!(
        spirv_bytes = spirv.len(),
        smolv_bytes = out.len() - start,
        instructions = count,
        "encoded module"
    );
    Ok(())
}

fn encode_instruction(instruction: &Instruction<'_>, state: &mut IdState, out: &mut Vec<u8>) {
    let opcode = instruction.opcode;
    let desc = opcode.descriptor();
    let words = instruction.words;
    let length = words.len();
    let instruction_start = out.len();

    // verbose lengths come from the upper 16 bits of a word
    write_length_op(out, length as u16, opcode);

    let mut i = 1;
    if desc.has_type && i < length {
        write_varint(out, words[i]);
        i += 1;
    }
    if desc.has_result && i < length {
        let id = words[i];
        write_varint(out, zigzag_encode(id.wrapping_sub(state.prev_result) as i32));
        state.prev_result = id;
        i += 1;
    }
    if opcode.is_annotation() && i < length {
        let target = words[i];
        write_varint(out, zigzag_encode(target.wrapping_sub(state.prev_decorate) as i32));
        state.prev_decorate = target;
        i += 1;
    }

    let relative_end = (i + desc.relative_count()).min(length);
    for &id in &words[i..relative_end] {
        let delta = state.prev_result.wrapping_sub(id);
        if desc.relative_is_signed() {
            write_varint(out, zigzag_encode(delta as i32));
        } else {
            write_varint(out, delta);
        }
    }
    i = relative_end;

    if desc.varint_rest {
        for &word in &words[i..] {
            write_varint(out, word);
        }
    } else {
        for &word in &words[i..] {
            write_word(out, word);
        }
    }

    trace!(
        offset = instruction.offset,
        opcode = %opcode,
        length,
        encoded = out.len() - instruction_start,
        "encoded instruction"
    );
}
