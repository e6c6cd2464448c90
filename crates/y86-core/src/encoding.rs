//! Instruction-set tables: operation codes, formats, and function fields.

use crate::state::{ConditionCodes, ConditionFlag};

/// Defined operation codes (`icode`, high nibble of the first byte).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Icode {
    Halt = 0x0,
    Nop = 0x1,
    Rrmovq = 0x2,
    Irmovq = 0x3,
    Rmmovq = 0x4,
    Mrmovq = 0x5,
    Opq = 0x6,
    Jxx = 0x7,
    Call = 0x8,
    Ret = 0x9,
    Pushq = 0xA,
    Popq = 0xB,
}

/// Highest defined operation code.
pub const MAX_ICODE: u8 = Icode::Popq as u8;

/// Byte layout of one instruction kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionFormat {
    /// Operation code.
    pub icode: Icode,
    /// Base mnemonic, used for unconditional forms.
    pub mnemonic: &'static str,
    /// Whether a register-selector byte follows the opcode byte.
    pub register_byte: bool,
    /// Whether an 8-byte little-endian constant follows.
    pub constant: bool,
}

impl InstructionFormat {
    /// Encoded length in bytes.
    #[must_use]
    pub fn length(self) -> u64 {
        1 + u64::from(self.register_byte) + if self.constant { 8 } else { 0 }
    }
}

const fn format(
    icode: Icode,
    mnemonic: &'static str,
    register_byte: bool,
    constant: bool,
) -> InstructionFormat {
    InstructionFormat {
        icode,
        mnemonic,
        register_byte,
        constant,
    }
}

/// Single source-of-truth instruction format table, indexed by `icode`.
pub const INSTRUCTION_FORMAT_TABLE: [InstructionFormat; MAX_ICODE as usize + 1] = [
    format(Icode::Halt, "halt", false, false),
    format(Icode::Nop, "nop", false, false),
    format(Icode::Rrmovq, "rrmovq", true, false),
    format(Icode::Irmovq, "irmovq", true, true),
    format(Icode::Rmmovq, "rmmovq", true, true),
    format(Icode::Mrmovq, "mrmovq", true, true),
    format(Icode::Opq, "opq", true, false),
    format(Icode::Jxx, "jmp", false, true),
    format(Icode::Call, "call", false, true),
    format(Icode::Ret, "ret", false, false),
    format(Icode::Pushq, "pushq", true, false),
    format(Icode::Popq, "popq", true, false),
];

impl Icode {
    /// Decodes a 4-bit operation code. Values above [`MAX_ICODE`] yield `None`.
    #[must_use]
    pub const fn from_u4(bits: u8) -> Option<Self> {
        match bits {
            0x0 => Some(Self::Halt),
            0x1 => Some(Self::Nop),
            0x2 => Some(Self::Rrmovq),
            0x3 => Some(Self::Irmovq),
            0x4 => Some(Self::Rmmovq),
            0x5 => Some(Self::Mrmovq),
            0x6 => Some(Self::Opq),
            0x7 => Some(Self::Jxx),
            0x8 => Some(Self::Call),
            0x9 => Some(Self::Ret),
            0xA => Some(Self::Pushq),
            0xB => Some(Self::Popq),
            _ => None,
        }
    }

    /// Format table entry for this operation code.
    #[must_use]
    pub const fn format(self) -> InstructionFormat {
        INSTRUCTION_FORMAT_TABLE[self as usize]
    }

    /// Whether a register-selector byte follows the opcode byte.
    #[must_use]
    pub const fn needs_register_byte(self) -> bool {
        self.format().register_byte
    }

    /// Whether an 8-byte constant follows.
    #[must_use]
    pub const fn needs_constant(self) -> bool {
        self.format().constant
    }
}

/// ALU function selected by `ifun` for [`Icode::Opq`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum AluFunction {
    Add = 0x0,
    Sub = 0x1,
    And = 0x2,
    Xor = 0x3,
}

impl AluFunction {
    /// Decodes a 4-bit function field.
    #[must_use]
    pub const fn from_u4(bits: u8) -> Option<Self> {
        match bits {
            0x0 => Some(Self::Add),
            0x1 => Some(Self::Sub),
            0x2 => Some(Self::And),
            0x3 => Some(Self::Xor),
            _ => None,
        }
    }

    /// Instruction mnemonic (`addq`, `subq`, `andq`, `xorq`).
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "addq",
            Self::Sub => "subq",
            Self::And => "andq",
            Self::Xor => "xorq",
        }
    }
}

/// Branch/move condition selected by `ifun` for [`Icode::Jxx`] and
/// [`Icode::Rrmovq`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Condition {
    Always = 0x0,
    Le = 0x1,
    L = 0x2,
    E = 0x3,
    Ne = 0x4,
    Ge = 0x5,
    G = 0x6,
}

impl Condition {
    /// Decodes a 4-bit function field.
    #[must_use]
    pub const fn from_u4(bits: u8) -> Option<Self> {
        match bits {
            0x0 => Some(Self::Always),
            0x1 => Some(Self::Le),
            0x2 => Some(Self::L),
            0x3 => Some(Self::E),
            0x4 => Some(Self::Ne),
            0x5 => Some(Self::Ge),
            0x6 => Some(Self::G),
            _ => None,
        }
    }

    /// Mnemonic suffix (`""`, `le`, `l`, `e`, `ne`, `ge`, `g`).
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Always => "",
            Self::Le => "le",
            Self::L => "l",
            Self::E => "e",
            Self::Ne => "ne",
            Self::Ge => "ge",
            Self::G => "g",
        }
    }

    /// Evaluates the condition against the current flags.
    #[must_use]
    pub const fn evaluate(self, cc: ConditionCodes) -> bool {
        let zf = cc.get(ConditionFlag::Zero);
        let less = cc.get(ConditionFlag::Sign) != cc.get(ConditionFlag::Overflow);
        match self {
            Self::Always => true,
            Self::Le => less || zf,
            Self::L => less,
            Self::E => zf,
            Self::Ne => !zf,
            Self::Ge => !less,
            Self::G => !less && !zf,
        }
    }
}
