//! # SPIR-V Opcode Table
//!
//! Static per-opcode metadata that drives the compact encoding. Every known
//! opcode value (including unused numeric slots) has exactly one entry, so
//! the table index is the opcode itself.
//!
//! ## Descriptor Fields
//!
//! - `has_type`: the first operand is a type ID, written as a plain varint
//! - `has_result`: the next operand is a result ID, written as a zigzag delta
//!   from the previous result ID
//! - `delta_from_result`: how many following operands are written as deltas
//!   *from* the current result ID; a negative count means the deltas are
//!   zigzag-encoded (the operands may be forward references)
//! - `varint_rest`: whether the remaining operands are small integers written
//!   as varints instead of raw 32-bit words
//!
//! Opcodes outside the table get [`OpDescriptor::EMPTY`]: they still
//! round-trip, they just don't compress.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of opcodes known to the table (`OpModuleProcessed` + 1)
pub const KNOWN_OPCODE_COUNT: usize = 331;

/// Instruction opcode (low 16 bits of an instruction's first word)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Opcode(pub u16);

impl Opcode {
    pub const NOP: Opcode = Opcode(0);
    pub const UNDEF: Opcode = Opcode(1);
    pub const NAME: Opcode = Opcode(5);
    pub const MEMBER_NAME: Opcode = Opcode(6);
    pub const EXT_INST_IMPORT: Opcode = Opcode(11);
    pub const EXT_INST: Opcode = Opcode(12);
    pub const MEMORY_MODEL: Opcode = Opcode(14);
    pub const ENTRY_POINT: Opcode = Opcode(15);
    pub const EXECUTION_MODE: Opcode = Opcode(16);
    pub const CAPABILITY: Opcode = Opcode(17);
    pub const TYPE_VOID: Opcode = Opcode(19);
    pub const TYPE_BOOL: Opcode = Opcode(20);
    pub const TYPE_INT: Opcode = Opcode(21);
    pub const TYPE_FLOAT: Opcode = Opcode(22);
    pub const TYPE_VECTOR: Opcode = Opcode(23);
    pub const TYPE_POINTER: Opcode = Opcode(32);
    pub const TYPE_FUNCTION: Opcode = Opcode(33);
    pub const CONSTANT: Opcode = Opcode(43);
    pub const FUNCTION: Opcode = Opcode(54);
    pub const FUNCTION_END: Opcode = Opcode(56);
    pub const VARIABLE: Opcode = Opcode(59);
    pub const LOAD: Opcode = Opcode(61);
    pub const STORE: Opcode = Opcode(62);
    pub const ACCESS_CHAIN: Opcode = Opcode(65);
    pub const DECORATE: Opcode = Opcode(71);
    pub const MEMBER_DECORATE: Opcode = Opcode(72);
    pub const VECTOR_SHUFFLE: Opcode = Opcode(79);
    pub const COMPOSITE_CONSTRUCT: Opcode = Opcode(80);
    pub const COMPOSITE_EXTRACT: Opcode = Opcode(81);
    pub const IMAGE_SAMPLE_IMPLICIT_LOD: Opcode = Opcode(87);
    pub const F_NEGATE: Opcode = Opcode(127);
    pub const I_ADD: Opcode = Opcode(128);
    pub const F_MUL: Opcode = Opcode(133);
    pub const DOT: Opcode = Opcode(148);
    pub const SELECT: Opcode = Opcode(169);
    pub const F_ORD_LESS_THAN: Opcode = Opcode(184);
    pub const PHI: Opcode = Opcode(245);
    pub const LOOP_MERGE: Opcode = Opcode(246);
    pub const SELECTION_MERGE: Opcode = Opcode(247);
    pub const LABEL: Opcode = Opcode(248);
    pub const BRANCH: Opcode = Opcode(249);
    pub const BRANCH_CONDITIONAL: Opcode = Opcode(250);
    pub const RETURN: Opcode = Opcode(253);
    pub const RETURN_VALUE: Opcode = Opcode(254);
    pub const MODULE_PROCESSED: Opcode = Opcode(330);

    /// Highest opcode value present in the table
    pub const MAX_KNOWN: Opcode = Opcode(KNOWN_OPCODE_COUNT as u16 - 1);

    #[inline]
    pub const fn new(value: u16) -> Self {
        Opcode(value)
    }

    #[inline]
    pub const fn to_u16(self) -> u16 {
        self.0
    }

    /// Table index, or `None` for opcodes beyond the table
    #[inline]
    pub const fn index(self) -> Option<usize> {
        if (self.0 as usize) < KNOWN_OPCODE_COUNT {
            Some(self.0 as usize)
        } else {
            None
        }
    }

    #[inline]
    pub const fn is_known(self) -> bool {
        self.index().is_some()
    }

    /// Encoding descriptor; unknown opcodes get [`OpDescriptor::EMPTY`]
    #[inline]
    pub fn descriptor(self) -> OpDescriptor {
        match self.index() {
            Some(i) => OPCODE_TABLE[i].descriptor,
            None => OpDescriptor::EMPTY,
        }
    }

    /// Human-readable name without the `Op` prefix, `"???"` when unknown
    pub fn name(self) -> &'static str {
        match self.index() {
            Some(i) => OPCODE_TABLE[i].name,
            None => "???",
        }
    }

    /// Decorate and MemberDecorate carry a target ID that is delta-encoded
    /// against the previous annotation target.
    #[inline]
    pub const fn is_annotation(self) -> bool {
        self.0 == Self::DECORATE.0 || self.0 == Self::MEMBER_DECORATE.0
    }
}

impl From<u16> for Opcode {
    fn from(value: u16) -> Self {
        Opcode(value)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_known() {
            write!(f, "{}", self.name())
        } else {
            write!(f, "Op#{}", self.0)
        }
    }
}

/// How an opcode's operands are laid out in the compact encoding
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpDescriptor {
    /// Does it have a result ID?
    pub has_result: bool,
    /// Does it have a type ID?
    pub has_type: bool,
    /// Operands after type+result written as deltas from the result ID.
    /// Negative: same count, zigzag-encoded.
    pub delta_from_result: i8,
    /// Remaining operands written as varints
    pub varint_rest: bool,
}

impl OpDescriptor {
    /// Descriptor for unused slots and unknown opcodes
    pub const EMPTY: Self = Self {
        has_result: false,
        has_type: false,
        delta_from_result: 0,
        varint_rest: false,
    };

    /// Number of operands encoded relative to the result ID
    #[inline]
    pub const fn relative_count(&self) -> usize {
        self.delta_from_result.unsigned_abs() as usize
    }

    /// Whether result-relative deltas are zigzag-encoded
    #[inline]
    pub const fn relative_is_signed(&self) -> bool {
        self.delta_from_result < 0
    }
}

#[derive(Clone, Copy, Debug)]
struct OpInfo {
    name: &'static str,
    descriptor: OpDescriptor,
}

const fn info(
    name: &'static str,
    has_result: bool,
    has_type: bool,
    delta_from_result: i8,
    varint_rest: bool,
) -> OpInfo {
    OpInfo {
        name,
        descriptor: OpDescriptor {
            has_result,
            has_type,
            delta_from_result,
            varint_rest,
        },
    }
}

// Columns: name, has_result, has_type, delta_from_result, varint_rest
static OPCODE_TABLE: [OpInfo; KNOWN_OPCODE_COUNT] = [
    info("Nop", false, false, 0, false), // 0
    info("Undef", true, true, 0, false), // 1
    info("SourceContinued", false, false, 0, false), // 2
    info("Source", false, false, 0, false), // 3
    info("SourceExtension", false, false, 0, false), // 4
    info("Name", false, false, 0, false), // 5
    info("MemberName", false, false, 0, false), // 6
    info("String", false, false, 0, false), // 7
    info("Line", false, false, 0, false), // 8
    info("#9", false, false, 0, false), // 9
    info("Extension", false, false, 0, false), // 10
    info("ExtInstImport", true, false, 0, false), // 11
    info("ExtInst", true, true, 0, false), // 12
    info("#13", false, false, 0, false), // 13
    info("MemoryModel", false, false, 0, false), // 14
    info("EntryPoint", false, false, 0, false), // 15
    info("ExecutionMode", false, false, 0, false), // 16
    info("Capability", false, false, 0, false), // 17
    info("#18", false, false, 0, false), // 18
    info("TypeVoid", true, false, 0, false), // 19
    info("TypeBool", true, false, 0, false), // 20
    info("TypeInt", true, false, 0, false), // 21
    info("TypeFloat", true, false, 0, false), // 22
    info("TypeVector", true, false, 0, false), // 23
    info("TypeMatrix", true, false, 0, false), // 24
    info("TypeImage", true, false, 0, false), // 25
    info("TypeSampler", true, false, 0, false), // 26
    info("TypeSampledImage", true, false, 0, false), // 27
    info("TypeArray", true, false, 0, false), // 28
    info("TypeRuntimeArray", true, false, 0, false), // 29
    info("TypeStruct", true, false, 0, false), // 30
    info("TypeOpaque", true, false, 0, false), // 31
    info("TypePointer", true, false, 0, false), // 32
    info("TypeFunction", true, false, 0, false), // 33
    info("TypeEvent", true, false, 0, false), // 34
    info("TypeDeviceEvent", true, false, 0, false), // 35
    info("TypeReserveId", true, false, 0, false), // 36
    info("TypeQueue", true, false, 0, false), // 37
    info("TypePipe", true, false, 0, false), // 38
    info("TypeForwardPointer", false, false, 0, false), // 39
    info("#40", false, false, 0, false), // 40
    info("ConstantTrue", true, true, 0, false), // 41
    info("ConstantFalse", true, true, 0, false), // 42
    info("Constant", true, true, 0, false), // 43
    info("ConstantComposite", true, true, 0, false), // 44
    info("ConstantSampler", true, true, 0, false), // 45
    info("ConstantNull", true, true, 0, false), // 46
    info("#47", false, false, 0, false), // 47
    info("SpecConstantTrue", true, true, 0, false), // 48
    info("SpecConstantFalse", true, true, 0, false), // 49
    info("SpecConstant", true, true, 0, false), // 50
    info("SpecConstantComposite", true, true, 0, false), // 51
    info("SpecConstantOp", true, true, 0, false), // 52
    info("#53", false, false, 0, false), // 53
    info("Function", true, true, 0, false), // 54
    info("FunctionParameter", true, true, 0, false), // 55
    info("FunctionEnd", false, false, 0, false), // 56
    info("FunctionCall", true, true, 0, false), // 57
    info("#58", false, false, 0, false), // 58
    info("Variable", true, true, 0, false), // 59
    info("ImageTexelPointer", true, true, 0, false), // 60
    info("Load", true, true, 1, true), // 61
    info("Store", false, false, 2, true), // 62
    info("CopyMemory", false, false, 0, false), // 63
    info("CopyMemorySized", false, false, 0, false), // 64
    info("AccessChain", true, true, 0, true), // 65
    info("InBoundsAccessChain", true, true, 0, false), // 66
    info("PtrAccessChain", true, true, 0, false), // 67
    info("ArrayLength", true, true, 0, false), // 68
    info("GenericPtrMemSemantics", true, true, 0, false), // 69
    info("InBoundsPtrAccessChain", true, true, 0, false), // 70
    info("Decorate", false, false, 0, true), // 71
    info("MemberDecorate", false, false, 0, true), // 72
    info("DecorationGroup", true, false, 0, false), // 73
    info("GroupDecorate", false, false, 0, false), // 74
    info("GroupMemberDecorate", false, false, 0, false), // 75
    info("#76", false, false, 0, false), // 76
    info("VectorExtractDynamic", true, true, 2, false), // 77
    info("VectorInsertDynamic", true, true, 0, false), // 78
    info("VectorShuffle", true, true, 2, true), // 79
    info("CompositeConstruct", true, true, 0, false), // 80
    info("CompositeExtract", true, true, 1, true), // 81
    info("CompositeInsert", true, true, 2, true), // 82
    info("CopyObject", true, true, 1, false), // 83
    info("Transpose", true, true, 1, false), // 84
    info("#85", false, false, 0, false), // 85
    info("SampledImage", true, true, 2, false), // 86
    info("ImageSampleImplicitLod", true, true, 0, false), // 87
    info("ImageSampleExplicitLod", true, true, 0, false), // 88
    info("ImageSampleDrefImplicitLod", true, true, 0, false), // 89
    info("ImageSampleDrefExplicitLod", true, true, 0, false), // 90
    info("ImageSampleProjImplicitLod", true, true, 0, false), // 91
    info("ImageSampleProjExplicitLod", true, true, 0, false), // 92
    info("ImageSampleProjDrefImplicitLod", true, true, 0, false), // 93
    info("ImageSampleProjDrefExplicitLod", true, true, 0, false), // 94
    info("ImageFetch", true, true, 0, false), // 95
    info("ImageGather", true, true, 0, false), // 96
    info("ImageDrefGather", true, true, 0, false), // 97
    info("ImageRead", true, true, 0, false), // 98
    info("ImageWrite", false, false, 0, false), // 99
    info("Image", true, true, 0, false), // 100
    info("ImageQueryFormat", true, true, 0, false), // 101
    info("ImageQueryOrder", true, true, 0, false), // 102
    info("ImageQuerySizeLod", true, true, 0, false), // 103
    info("ImageQuerySize", true, true, 0, false), // 104
    info("ImageQueryLod", true, true, 0, false), // 105
    info("ImageQueryLevels", true, true, 0, false), // 106
    info("ImageQuerySamples", true, true, 0, false), // 107
    info("#108", false, false, 0, false), // 108
    info("ConvertFToU", true, true, 1, false), // 109
    info("ConvertFToS", true, true, 1, false), // 110
    info("ConvertSToF", true, true, 1, false), // 111
    info("ConvertUToF", true, true, 1, false), // 112
    info("UConvert", true, true, 1, false), // 113
    info("SConvert", true, true, 1, false), // 114
    info("FConvert", true, true, 1, false), // 115
    info("QuantizeToF16", true, true, 1, false), // 116
    info("ConvertPtrToU", true, true, 0, false), // 117
    info("SatConvertSToU", true, true, 0, false), // 118
    info("SatConvertUToS", true, true, 0, false), // 119
    info("ConvertUToPtr", true, true, 0, false), // 120
    info("PtrCastToGeneric", true, true, 0, false), // 121
    info("GenericCastToPtr", true, true, 0, false), // 122
    info("GenericCastToPtrExplicit", true, true, 0, false), // 123
    info("Bitcast", true, true, 1, false), // 124
    info("#125", false, false, 0, false), // 125
    info("SNegate", true, true, 1, false), // 126
    info("FNegate", true, true, 1, false), // 127
    info("IAdd", true, true, 2, false), // 128
    info("FAdd", true, true, 2, false), // 129
    info("ISub", true, true, 2, false), // 130
    info("FSub", true, true, 2, false), // 131
    info("IMul", true, true, 2, false), // 132
    info("FMul", true, true, 2, false), // 133
    info("UDiv", true, true, 2, false), // 134
    info("SDiv", true, true, 2, false), // 135
    info("FDiv", true, true, 2, false), // 136
    info("UMod", true, true, 2, false), // 137
    info("SRem", true, true, 2, false), // 138
    info("SMod", true, true, 2, false), // 139
    info("FRem", true, true, 2, false), // 140
    info("FMod", true, true, 2, false), // 141
    info("VectorTimesScalar", true, true, 2, false), // 142
    info("MatrixTimesScalar", true, true, 2, false), // 143
    info("VectorTimesMatrix", true, true, 2, false), // 144
    info("MatrixTimesVector", true, true, 2, false), // 145
    info("MatrixTimesMatrix", true, true, 2, false), // 146
    info("OuterProduct", true, true, 2, false), // 147
    info("Dot", true, true, 2, false), // 148
    info("IAddCarry", true, true, 2, false), // 149
    info("ISubBorrow", true, true, 2, false), // 150
    info("UMulExtended", true, true, 2, false), // 151
    info("SMulExtended", true, true, 2, false), // 152
    info("#153", false, false, 0, false), // 153
    info("Any", true, true, 1, false), // 154
    info("All", true, true, 1, false), // 155
    info("IsNan", true, true, 1, false), // 156
    info("IsInf", true, true, 1, false), // 157
    info("IsFinite", true, true, 1, false), // 158
    info("IsNormal", true, true, 1, false), // 159
    info("SignBitSet", true, true, 1, false), // 160
    info("LessOrGreater", true, true, 2, false), // 161
    info("Ordered", true, true, 2, false), // 162
    info("Unordered", true, true, 2, false), // 163
    info("LogicalEqual", true, true, 2, false), // 164
    info("LogicalNotEqual", true, true, 2, false), // 165
    info("LogicalOr", true, true, 2, false), // 166
    info("LogicalAnd", true, true, 2, false), // 167
    info("LogicalNot", true, true, 1, false), // 168
    info("Select", true, true, 3, false), // 169
    info("IEqual", true, true, 2, false), // 170
    info("INotEqual", true, true, 2, false), // 171
    info("UGreaterThan", true, true, 2, false), // 172
    info("SGreaterThan", true, true, 2, false), // 173
    info("UGreaterThanEqual", true, true, 2, false), // 174
    info("SGreaterThanEqual", true, true, 2, false), // 175
    info("ULessThan", true, true, 2, false), // 176
    info("SLessThan", true, true, 2, false), // 177
    info("ULessThanEqual", true, true, 2, false), // 178
    info("SLessThanEqual", true, true, 2, false), // 179
    info("FOrdEqual", true, true, 2, false), // 180
    info("FUnordEqual", true, true, 2, false), // 181
    info("FOrdNotEqual", true, true, 2, false), // 182
    info("FUnordNotEqual", true, true, 2, false), // 183
    info("FOrdLessThan", true, true, 2, false), // 184
    info("FUnordLessThan", true, true, 2, false), // 185
    info("FOrdGreaterThan", true, true, 2, false), // 186
    info("FUnordGreaterThan", true, true, 2, false), // 187
    info("FOrdLessThanEqual", true, true, 2, false), // 188
    info("FUnordLessThanEqual", true, true, 2, false), // 189
    info("FOrdGreaterThanEqual", true, true, 2, false), // 190
    info("FUnordGreaterThanEqual", true, true, 2, false), // 191
    info("#192", false, false, 0, false), // 192
    info("#193", false, false, 0, false), // 193
    info("ShiftRightLogical", true, true, 2, false), // 194
    info("ShiftRightArithmetic", true, true, 2, false), // 195
    info("ShiftLeftLogical", true, true, 2, false), // 196
    info("BitwiseOr", true, true, 2, false), // 197
    info("BitwiseXor", true, true, 2, false), // 198
    info("BitwiseAnd", true, true, 2, false), // 199
    info("Not", true, true, 1, false), // 200
    info("BitFieldInsert", true, true, 0, false), // 201
    info("BitFieldSExtract", true, true, 0, false), // 202
    info("BitFieldUExtract", true, true, 0, false), // 203
    info("BitReverse", true, true, 0, false), // 204
    info("BitCount", true, true, 0, false), // 205
    info("#206", false, false, 0, false), // 206
    info("DPdx", true, true, 1, false), // 207
    info("DPdy", true, true, 1, false), // 208
    info("Fwidth", true, true, 1, false), // 209
    info("DPdxFine", true, true, 1, false), // 210
    info("DPdyFine", true, true, 1, false), // 211
    info("FwidthFine", true, true, 1, false), // 212
    info("DPdxCoarse", true, true, 1, false), // 213
    info("DPdyCoarse", true, true, 1, false), // 214
    info("FwidthCoarse", true, true, 1, false), // 215
    info("#216", false, false, 0, false), // 216
    info("#217", false, false, 0, false), // 217
    info("EmitVertex", false, false, 0, false), // 218
    info("EndPrimitive", false, false, 0, false), // 219
    info("EmitStreamVertex", false, false, 0, false), // 220
    info("EndStreamPrimitive", false, false, 0, false), // 221
    info("#222", false, false, 0, false), // 222
    info("#223", false, false, 0, false), // 223
    info("ControlBarrier", false, false, 0, false), // 224
    info("MemoryBarrier", false, false, 0, false), // 225
    info("#226", false, false, 0, false), // 226
    info("AtomicLoad", true, true, 0, false), // 227
    info("AtomicStore", false, false, 0, false), // 228
    info("AtomicExchange", true, true, 0, false), // 229
    info("AtomicCompareExchange", true, true, 0, false), // 230
    info("AtomicCompareExchangeWeak", true, true, 0, false), // 231
    info("AtomicIIncrement", true, true, 0, false), // 232
    info("AtomicIDecrement", true, true, 0, false), // 233
    info("AtomicIAdd", true, true, 0, false), // 234
    info("AtomicISub", true, true, 0, false), // 235
    info("AtomicSMin", true, true, 0, false), // 236
    info("AtomicUMin", true, true, 0, false), // 237
    info("AtomicSMax", true, true, 0, false), // 238
    info("AtomicUMax", true, true, 0, false), // 239
    info("AtomicAnd", true, true, 0, false), // 240
    info("AtomicOr", true, true, 0, false), // 241
    info("AtomicXor", true, true, 0, false), // 242
    info("#243", false, false, 0, false), // 243
    info("#244", false, false, 0, false), // 244
    info("Phi", true, true, 0, false), // 245
    info("LoopMerge", false, false, -2, true), // 246
    info("SelectionMerge", false, false, -1, true), // 247
    info("Label", true, false, 0, false), // 248
    info("Branch", false, false, -1, false), // 249
    info("BranchConditional", false, false, -3, true), // 250
    info("Switch", false, false, 0, false), // 251
    info("Kill", false, false, 0, false), // 252
    info("Return", false, false, 0, false), // 253
    info("ReturnValue", false, false, 1, false), // 254
    info("Unreachable", false, false, 0, false), // 255
    info("LifetimeStart", false, false, 0, false), // 256
    info("LifetimeStop", false, false, 0, false), // 257
    info("#258", false, false, 0, false), // 258
    info("GroupAsyncCopy", true, true, 0, false), // 259
    info("GroupWaitEvents", false, false, 0, false), // 260
    info("GroupAll", true, true, 0, false), // 261
    info("GroupAny", true, true, 0, false), // 262
    info("GroupBroadcast", true, true, 0, false), // 263
    info("GroupIAdd", true, true, 0, false), // 264
    info("GroupFAdd", true, true, 0, false), // 265
    info("GroupFMin", true, true, 0, false), // 266
    info("GroupUMin", true, true, 0, false), // 267
    info("GroupSMin", true, true, 0, false), // 268
    info("GroupFMax", true, true, 0, false), // 269
    info("GroupUMax", true, true, 0, false), // 270
    info("GroupSMax", true, true, 0, false), // 271
    info("#272", false, false, 0, false), // 272
    info("#273", false, false, 0, false), // 273
    info("ReadPipe", true, true, 0, false), // 274
    info("WritePipe", true, true, 0, false), // 275
    info("ReservedReadPipe", true, true, 0, false), // 276
    info("ReservedWritePipe", true, true, 0, false), // 277
    info("ReserveReadPipePackets", true, true, 0, false), // 278
    info("ReserveWritePipePackets", true, true, 0, false), // 279
    info("CommitReadPipe", false, false, 0, false), // 280
    info("CommitWritePipe", false, false, 0, false), // 281
    info("IsValidReserveId", true, true, 0, false), // 282
    info("GetNumPipePackets", true, true, 0, false), // 283
    info("GetMaxPipePackets", true, true, 0, false), // 284
    info("GroupReserveReadPipePackets", true, true, 0, false), // 285
    info("GroupReserveWritePipePackets", true, true, 0, false), // 286
    info("GroupCommitReadPipe", false, false, 0, false), // 287
    info("GroupCommitWritePipe", false, false, 0, false), // 288
    info("#289", false, false, 0, false), // 289
    info("#290", false, false, 0, false), // 290
    info("EnqueueMarker", true, true, 0, false), // 291
    info("EnqueueKernel", true, true, 0, false), // 292
    info("GetKernelNDrangeSubGroupCount", true, true, 0, false), // 293
    info("GetKernelNDrangeMaxSubGroupSize", true, true, 0, false), // 294
    info("GetKernelWorkGroupSize", true, true, 0, false), // 295
    info("GetKernelPreferredWorkGroupSizeMultiple", true, true, 0, false), // 296
    info("RetainEvent", false, false, 0, false), // 297
    info("ReleaseEvent", false, false, 0, false), // 298
    info("CreateUserEvent", true, true, 0, false), // 299
    info("IsValidEvent", true, true, 0, false), // 300
    info("SetUserEventStatus", false, false, 0, false), // 301
    info("CaptureEventProfilingInfo", false, false, 0, false), // 302
    info("GetDefaultQueue", true, true, 0, false), // 303
    info("BuildNDRange", true, true, 0, false), // 304
    info("ImageSparseSampleImplicitLod", true, true, 0, false), // 305
    info("ImageSparseSampleExplicitLod", true, true, 0, false), // 306
    info("ImageSparseSampleDrefImplicitLod", true, true, 0, false), // 307
    info("ImageSparseSampleDrefExplicitLod", true, true, 0, false), // 308
    info("ImageSparseSampleProjImplicitLod", true, true, 0, false), // 309
    info("ImageSparseSampleProjExplicitLod", true, true, 0, false), // 310
    info("ImageSparseSampleProjDrefImplicitLod", true, true, 0, false), // 311
    info("ImageSparseSampleProjDrefExplicitLod", true, true, 0, false), // 312
    info("ImageSparseFetch", true, true, 0, false), // 313
    info("ImageSparseGather", true, true, 0, false), // 314
    info("ImageSparseDrefGather", true, true, 0, false), // 315
    info("ImageSparseTexelsResident", true, true, 0, false), // 316
    info("NoLine", false, false, 0, false), // 317
    info("AtomicFlagTestAndSet", true, true, 0, false), // 318
    info("AtomicFlagClear", false, false, 0, false), // 319
    info("ImageSparseRead", true, true, 0, false), // 320
    info("SizeOf", true, true, 0, false), // 321
    info("TypePipeStorage", true, false, 0, false), // 322
    info("ConstantPipeStorage", true, true, 0, false), // 323
    info("CreatePipeFromPipeStorage", true, true, 0, false), // 324
    info("GetKernelLocalSizeForSubgroupCount", true, true, 0, false), // 325
    info("GetKernelMaxNumSubgroups", true, true, 0, false), // 326
    info("TypeNamedBarrier", true, false, 0, false), // 327
    info("NamedBarrierInitialize", true, true, 0, false), // 328
    info("MemoryNamedBarrier", false, false, 0, false), // 329
    info("ModuleProcessed", false, false, 0, false), // 330
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_every_known_opcode() {
        assert_eq!(OPCODE_TABLE.len(), Opcode::MAX_KNOWN.0 as usize + 1);
        assert_eq!(Opcode::MAX_KNOWN, Opcode::MODULE_PROCESSED);
        assert_eq!(Opcode::MODULE_PROCESSED.name(), "ModuleProcessed");
    }

    #[test]
    fn test_named_constants_match_table() {
        let named = [
            (Opcode::NOP, "Nop"),
            (Opcode::NAME, "Name"),
            (Opcode::EXT_INST_IMPORT, "ExtInstImport"),
            (Opcode::CAPABILITY, "Capability"),
            (Opcode::TYPE_VOID, "TypeVoid"),
            (Opcode::TYPE_POINTER, "TypePointer"),
            (Opcode::CONSTANT, "Constant"),
            (Opcode::FUNCTION, "Function"),
            (Opcode::FUNCTION_END, "FunctionEnd"),
            (Opcode::VARIABLE, "Variable"),
            (Opcode::LOAD, "Load"),
            (Opcode::STORE, "Store"),
            (Opcode::ACCESS_CHAIN, "AccessChain"),
            (Opcode::DECORATE, "Decorate"),
            (Opcode::MEMBER_DECORATE, "MemberDecorate"),
            (Opcode::VECTOR_SHUFFLE, "VectorShuffle"),
            (Opcode::COMPOSITE_EXTRACT, "CompositeExtract"),
            (Opcode::F_NEGATE, "FNegate"),
            (Opcode::I_ADD, "IAdd"),
            (Opcode::F_MUL, "FMul"),
            (Opcode::DOT, "Dot"),
            (Opcode::SELECT, "Select"),
            (Opcode::F_ORD_LESS_THAN, "FOrdLessThan"),
            (Opcode::PHI, "Phi"),
            (Opcode::LOOP_MERGE, "LoopMerge"),
            (Opcode::SELECTION_MERGE, "SelectionMerge"),
            (Opcode::LABEL, "Label"),
            (Opcode::BRANCH, "Branch"),
            (Opcode::BRANCH_CONDITIONAL, "BranchConditional"),
            (Opcode::RETURN, "Return"),
            (Opcode::RETURN_VALUE, "ReturnValue"),
        ];
        for (op, name) in named {
            assert_eq!(op.name(), name, "opcode {}", op.0);
        }
    }

    #[test]
    fn test_unused_slots_are_empty() {
        for (i, entry) in OPCODE_TABLE.iter().enumerate() {
            if entry.name.starts_with('#') {
                assert_eq!(entry.name, format!("#{}", i));
                assert_eq!(entry.descriptor, OpDescriptor::EMPTY);
            }
        }
    }

    #[test]
    fn test_unknown_opcode_descriptor() {
        assert_eq!(Opcode(331).descriptor(), OpDescriptor::EMPTY);
        assert_eq!(Opcode(u16::MAX).descriptor(), OpDescriptor::EMPTY);
        assert_eq!(Opcode(5000).name(), "???");
        assert_eq!(Opcode(5000).to_string(), "Op#5000");
    }

    #[test]
    fn test_descriptor_samples() {
        let load = Opcode::LOAD.descriptor();
        assert!(load.has_type && load.has_result && load.varint_rest);
        assert_eq!(load.relative_count(), 1);
        assert!(!load.relative_is_signed());

        let store = Opcode::STORE.descriptor();
        assert!(!store.has_type && !store.has_result);
        assert_eq!(store.relative_count(), 2);

        let type_void = Opcode::TYPE_VOID.descriptor();
        assert!(type_void.has_result && !type_void.has_type);

        let branch = Opcode::BRANCH_CONDITIONAL.descriptor();
        assert_eq!(branch.relative_count(), 3);
        assert!(branch.relative_is_signed());
    }

    #[test]
    fn test_only_decorations_are_annotations() {
        let annotations: Vec<u16> = (0..KNOWN_OPCODE_COUNT as u16)
            .filter(|&op| Opcode(op).is_annotation())
            .collect();
        assert_eq!(annotations, vec![71, 72]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Opcode::I_ADD.to_string(), "IAdd");
        assert_eq!(Opcode(9).to_string(), "#9");
    }

    #[test]
    fn test_serializes_as_bare_u16() {
        let bytes = bincode::serialize(&Opcode::EXT_INST).unwrap();
        assert_eq!(bytes, bincode::serialize(&12u16).unwrap());
        assert_eq!(bincode::deserialize::<Opcode>(&bytes).unwrap(), Opcode::EXT_INST);

        let descriptor = Opcode::LOOP_MERGE.descriptor();
        let bytes = bincode::serialize(&descriptor).unwrap();
        assert_eq!(bincode::deserialize::<OpDescriptor>(&bytes).unwrap(), descriptor);
    }
}
