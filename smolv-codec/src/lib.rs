//! # SMOL-V Codec
//!
//! Lossless transcoding between SPIR-V and SMOL-V.
//!
//! Both directions are single forward passes that keep two running IDs on
//! the stack (the previous result ID and the previous decoration target),
//! so independent streams can be transcoded on as many threads as needed
//! without any synchronization.
//!
//! ## Example
//!
//! ```rust
//! use smolv_codec::{decode, encode};
//! use smolv_spec::{Module, Opcode};
//!
//! let mut module = Module::default();
//! module.push(Opcode::CAPABILITY, &[1]).push(Opcode::TYPE_VOID, &[2]);
//! let spirv = module.to_bytes();
//!
//! let smolv = encode(&spirv).unwrap();
//! assert!(smolv.len() < spirv.len());
//! assert_eq!(decode(&smolv).unwrap(), spirv);
//! ```

pub mod decoder;
pub mod encoder;
pub mod state;

pub use decoder::{decode, decode_into, DecodedInstruction, Decoder};
pub use encoder::{encode, encode_into};
pub use smolv_spec::{FormatError, Result};
pub use state::IdState;

#[cfg(test)]
mod tests {
    use super::*;
    use smolv_spec::{Module, ModuleHeader, Opcode, VERSION_1_1};

    #[test]
    fn test_public_exports() {
        let _ = IdState::default();
        let _ = FormatError::UnsupportedVersion(0);
    }

    #[test]
    fn test_minimal_module_roundtrip() {
        let spirv = Module::new(ModuleHeader::new(1)).to_bytes();
        let smolv = encode(&spirv).unwrap();
        assert_eq!(smolv.len(), 20);
        assert_eq!(decode(&smolv).unwrap(), spirv);
    }

    #[test]
    fn test_version_1_1_roundtrip() {
        let mut header = ModuleHeader::new(8);
        header.version = VERSION_1_1;
        header.generator = 0x000D_0007;
        let mut module = Module::new(header);
        module
            .push(Opcode::CAPABILITY, &[1])
            .push(Opcode::MEMORY_MODEL, &[0, 1]);
        let spirv = module.to_bytes();
        assert_eq!(decode(&encode(&spirv).unwrap()).unwrap(), spirv);
    }
}
