//! Round-trip tests over hand-built shaders and generated modules

use proptest::prelude::*;
use smolv_codec::{decode, decode_into, encode, encode_into, Decoder};
use smolv_spec::module::literal_string;
use smolv_spec::{Module, ModuleHeader, Opcode, KNOWN_OPCODE_COUNT, VERSION_1_0, VERSION_1_1};

// ============================================================================
// Fixtures
// ============================================================================

/// A small fragment shader: `out_color = in_color * 0.5`
fn fragment_shader() -> Module {
    let mut module = Module::new(ModuleHeader::new(15));
    let mut entry = vec![4, 4];
    entry.extend(literal_string("main"));
    entry.extend([9, 11]);
    let mut ext = vec![1];
    ext.extend(literal_string("GLSL.std.450"));
    let mut name = vec![4];
    name.extend(literal_string("main"));

    module
        .push(Opcode::CAPABILITY, &[1])
        .push(Opcode::EXT_INST_IMPORT, &ext)
        .push(Opcode::MEMORY_MODEL, &[0, 1])
        .push(Opcode::ENTRY_POINT, &entry)
        .push(Opcode::EXECUTION_MODE, &[4, 7])
        .push(Opcode::NAME, &name)
        .push(Opcode::DECORATE, &[9, 30, 0])
        .push(Opcode::DECORATE, &[11, 30, 0])
        .push(Opcode::TYPE_VOID, &[2])
        .push(Opcode::TYPE_FUNCTION, &[3, 2])
        .push(Opcode::TYPE_FLOAT, &[6, 32])
        .push(Opcode::TYPE_VECTOR, &[7, 6, 4])
        .push(Opcode::TYPE_POINTER, &[8, 3, 7])
        .push(Opcode::VARIABLE, &[8, 9, 3])
        .push(Opcode::TYPE_POINTER, &[10, 1, 7])
        .push(Opcode::VARIABLE, &[10, 11, 1])
        .push(Opcode::CONSTANT, &[6, 12, 0x3F00_0000])
        .push(Opcode::FUNCTION, &[2, 4, 0, 3])
        .push(Opcode::LABEL, &[5])
        .push(Opcode::LOAD, &[7, 13, 11])
        .push(Opcode(142), &[7, 14, 13, 12]) // VectorTimesScalar
        .push(Opcode::STORE, &[9, 14])
        .push(Opcode::RETURN, &[])
        .push(Opcode::FUNCTION_END, &[]);
    module
}

/// Control flow with forward references: `if (x < 1.0) { ... }`
fn branching_shader() -> Module {
    let mut module = Module::new(ModuleHeader::new(30));
    module
        .push(Opcode::CAPABILITY, &[1])
        .push(Opcode::MEMORY_MODEL, &[0, 1])
        .push(Opcode::MEMBER_DECORATE, &[20, 0, 35, 0])
        .push(Opcode::MEMBER_DECORATE, &[20, 1, 35, 16])
        .push(Opcode::DECORATE, &[20, 2])
        .push(Opcode::DECORATE, &[18, 34, 0])
        .push(Opcode::DECORATE, &[18, 33, 0])
        .push(Opcode::TYPE_VOID, &[2])
        .push(Opcode::TYPE_BOOL, &[3])
        .push(Opcode::TYPE_FLOAT, &[6, 32])
        .push(Opcode::CONSTANT, &[6, 7, 0x3F80_0000])
        .push(Opcode::FUNCTION, &[2, 10, 0, 4])
        .push(Opcode::LABEL, &[11])
        .push(Opcode::F_ORD_LESS_THAN, &[3, 12, 7, 7])
        .push(Opcode::SELECTION_MERGE, &[14, 0])
        .push(Opcode::BRANCH_CONDITIONAL, &[12, 13, 14])
        .push(Opcode::LABEL, &[13])
        .push(Opcode::F_NEGATE, &[6, 15, 7])
        .push(Opcode::BRANCH, &[14])
        .push(Opcode::LABEL, &[14])
        .push(Opcode::PHI, &[6, 16, 7, 11, 15, 13])
        .push(Opcode::LOOP_MERGE, &[25, 24, 0])
        .push(Opcode::COMPOSITE_EXTRACT, &[6, 17, 16, 0, 1])
        .push(Opcode::SELECT, &[6, 18, 12, 16, 17])
        .push(Opcode::RETURN_VALUE, &[18])
        .push(Opcode::FUNCTION_END, &[]);
    module
}

// ============================================================================
// Hand-Built Shaders
// ============================================================================

#[test]
fn test_fragment_shader_roundtrip() {
    let spirv = fragment_shader().to_bytes();
    let smolv = encode(&spirv).unwrap();
    assert_eq!(decode(&smolv).unwrap(), spirv);
}

#[test]
fn test_fragment_shader_shrinks() {
    let spirv = fragment_shader().to_bytes();
    let smolv = encode(&spirv).unwrap();
    assert!(
        smolv.len() * 10 < spirv.len() * 7,
        "expected at least 30% savings: {} -> {}",
        spirv.len(),
        smolv.len()
    );
}

#[test]
fn test_branching_shader_roundtrip() {
    let spirv = branching_shader().to_bytes();
    let smolv = encode(&spirv).unwrap();
    assert_eq!(decode(&smolv).unwrap(), spirv);
}

#[test]
fn test_decoder_walks_every_instruction() {
    let module = fragment_shader();
    let smolv = encode(&module.to_bytes()).unwrap();
    let expected: Vec<_> = module.instructions().map(|i| i.unwrap()).collect();

    let mut decoder = Decoder::new(&smolv).unwrap();
    let mut total = 20;
    for verbose in &expected {
        let decoded = decoder.next_instruction().unwrap().unwrap();
        assert_eq!(decoded.opcode, verbose.opcode);
        assert_eq!(decoded.words, verbose.words);
        assert_eq!(decoded.offset, total);
        total += decoded.encoded_len;
    }
    assert!(decoder.next_instruction().unwrap().is_none());
    assert_eq!(total, smolv.len());
}

#[test]
fn test_ids_beyond_previous_result() {
    // Store and Load referencing IDs larger than the last result
    let mut module = Module::new(ModuleHeader::new(1000));
    module
        .push(Opcode::TYPE_VOID, &[2])
        .push(Opcode::STORE, &[900, 901])
        .push(Opcode::LOAD, &[2, 3, 999, 2])
        .push(Opcode::ACCESS_CHAIN, &[2, 4, u32::MAX, 0, 1]);
    let spirv = module.to_bytes();
    assert_eq!(decode(&encode(&spirv).unwrap()).unwrap(), spirv);
}

#[test]
fn test_extreme_id_deltas() {
    let mut module = Module::new(ModuleHeader::new(u32::MAX));
    module
        .push(Opcode::TYPE_VOID, &[u32::MAX])
        .push(Opcode::TYPE_BOOL, &[0])
        .push(Opcode::TYPE_INT, &[0x8000_0000, 32, 1])
        .push(Opcode::DECORATE, &[u32::MAX, 0])
        .push(Opcode::DECORATE, &[0, 0])
        .push(Opcode::BRANCH, &[0x7FFF_FFFF]);
    let spirv = module.to_bytes();
    assert_eq!(decode(&encode(&spirv).unwrap()).unwrap(), spirv);
}

#[test]
fn test_long_instruction_roundtrip() {
    let operands: Vec<u32> = (0..200).collect();
    let mut module = Module::default();
    module
        .push(Opcode::COMPOSITE_CONSTRUCT, &operands)
        .push(Opcode::ACCESS_CHAIN, &operands)
        .push(Opcode(12345), &operands);
    let spirv = module.to_bytes();
    assert_eq!(decode(&encode(&spirv).unwrap()).unwrap(), spirv);
}

#[test]
fn test_into_variants_append_after_existing_bytes() {
    let spirv = fragment_shader().to_bytes();

    let mut smolv = b"prefix".to_vec();
    encode_into(&spirv, &mut smolv).unwrap();
    assert_eq!(&smolv[..6], b"prefix");

    let mut restored = b"xy".to_vec();
    decode_into(&smolv[6..], &mut restored).unwrap();
    assert_eq!(&restored[..2], b"xy");
    assert_eq!(&restored[2..], &spirv[..]);
}

// ============================================================================
// Generated Modules
// ============================================================================

fn arb_opcode() -> impl Strategy<Value = Opcode> {
    prop_oneof![
        8 => (0..KNOWN_OPCODE_COUNT as u16).prop_map(Opcode),
        1 => any::<u16>().prop_map(Opcode),
    ]
}

fn arb_operand() -> impl Strategy<Value = u32> {
    prop_oneof![
        6 => 0u32..64,
        2 => 0u32..100_000,
        1 => any::<u32>(),
    ]
}

fn arb_module() -> impl Strategy<Value = Module> {
    let header = (
        prop_oneof![Just(VERSION_1_0), Just(VERSION_1_1)],
        any::<u32>(),
        any::<u32>(),
        any::<u32>(),
    )
        .prop_map(|(version, generator, bound, schema)| ModuleHeader {
            version,
            generator,
            bound,
            schema,
        });
    let instruction = (arb_opcode(), prop::collection::vec(arb_operand(), 0..12));
    (header, prop::collection::vec(instruction, 0..64)).prop_map(|(header, instructions)| {
        let mut module = Module::new(header);
        for (opcode, operands) in instructions {
            module.push(opcode, &operands);
        }
        module
    })
}

proptest! {
    #[test]
    fn test_roundtrip_generated(module in arb_module()) {
        let spirv = module.to_bytes();
        let smolv = encode(&spirv).unwrap();
        prop_assert_eq!(decode(&smolv).unwrap(), spirv);
    }

    #[test]
    fn test_encode_is_deterministic(module in arb_module()) {
        let spirv = module.to_bytes();
        prop_assert_eq!(encode(&spirv).unwrap(), encode(&spirv).unwrap());
    }

    #[test]
    fn test_truncated_compact_never_panics(module in arb_module(), cut in any::<prop::sample::Index>()) {
        let spirv = module.to_bytes();
        let smolv = encode(&spirv).unwrap();
        let cut = cut.index(smolv.len());
        match decode(&smolv[..cut]) {
            Ok(prefix) => prop_assert!(spirv.starts_with(&prefix)),
            Err(err) => prop_assert!(err.is_truncation(), "unexpected error {:?}", err),
        }
    }
}
