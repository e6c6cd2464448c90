//! Fetch stage: splits the variable-length instruction at `PC` into fields.
//!
//! The opcode byte is always read. The register-selector byte and the 8-byte
//! constant are read only when the format table says the operation code has
//! them, and each optional field advances the running length that becomes
//! `valP`.

use std::fmt;

use crate::bits::get_bits;
use crate::encoding::{AluFunction, Condition, Icode, InstructionFormat};
use crate::memory::{AccessError, Memory};
use crate::state::Register;

/// Fields of one fetched instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchedInstruction {
    /// Address the instruction was fetched from.
    pub pc: u64,
    /// Raw operation code nibble.
    pub icode: u8,
    /// Raw function nibble.
    pub ifun: u8,
    /// Decoded operation, `None` when `icode` is undefined.
    pub kind: Option<Icode>,
    /// First register selector (`None` when absent or [`RNONE`](crate::state::RNONE)).
    pub ra: Option<Register>,
    /// Second register selector (`None` when absent or [`RNONE`](crate::state::RNONE)).
    pub rb: Option<Register>,
    /// 8-byte constant, zero when absent.
    pub val_c: u64,
    /// Address of the next sequential instruction.
    pub val_p: u64,
    /// First failed instruction-memory access, if any.
    pub imem_error: Option<AccessError>,
}

impl FetchedInstruction {
    /// Returns `true` when `icode` names a defined operation.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.kind.is_some()
    }

    /// Format of the fetched operation, when defined.
    #[must_use]
    pub fn format(&self) -> Option<InstructionFormat> {
        self.kind.map(Icode::format)
    }
}

impl fmt::Display for FetchedInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(format) = self.format() else {
            return write!(f, "invalid icode {:#x}", self.icode);
        };
        match format.icode {
            Icode::Opq => match AluFunction::from_u4(self.ifun) {
                Some(function) => f.write_str(function.mnemonic()),
                None => write!(f, "{} fn {:#x}", format.mnemonic, self.ifun),
            },
            Icode::Jxx | Icode::Rrmovq => match Condition::from_u4(self.ifun) {
                Some(Condition::Always) => f.write_str(format.mnemonic),
                Some(condition) => {
                    let stem = if format.icode == Icode::Jxx { "j" } else { "cmov" };
                    write!(f, "{stem}{}", condition.suffix())
                }
                None => write!(f, "{} fn {:#x}", format.mnemonic, self.ifun),
            },
            _ => f.write_str(format.mnemonic),
        }
    }
}

/// Stateless instruction fetcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder;

impl Decoder {
    /// Fetches the instruction at `pc`.
    ///
    /// Never fails: an out-of-bounds byte reads as zero and the first such
    /// access is reported through [`FetchedInstruction::imem_error`].
    #[must_use]
    pub fn fetch(memory: &Memory, pc: u64) -> FetchedInstruction {
        let mut imem_error = None;
        let mut read_byte = |address: u64| {
            memory.get_byte(address).unwrap_or_else(|error| {
                imem_error = imem_error.or(Some(error));
                0
            })
        };

        let opcode = u64::from(read_byte(pc));
        let icode = nibble(opcode, 4);
        let ifun = nibble(opcode, 0);
        let kind = Icode::from_u4(icode);

        let has_selectors = kind.is_some_and(Icode::needs_register_byte);
        let (mut ra, mut rb) = (None, None);
        if has_selectors {
            let selectors = u64::from(read_byte(pc.wrapping_add(1)));
            ra = Register::from_u4(nibble(selectors, 4));
            rb = Register::from_u4(nibble(selectors, 0));
        }

        let mut val_c = 0;
        if kind.is_some_and(Icode::needs_constant) {
            let offset = 1 + u64::from(has_selectors);
            val_c = memory.get_long(pc.wrapping_add(offset)).unwrap_or_else(|error| {
                imem_error = imem_error.or(Some(error));
                0
            });
        }

        // Undefined operation codes occupy a single byte.
        let val_p = pc.wrapping_add(kind.map_or(1, |kind| kind.format().length()));

        FetchedInstruction {
            pc,
            icode,
            ifun,
            kind,
            ra,
            rb,
            val_c,
            val_p,
            imem_error,
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
const fn nibble(byte: u64, low: i32) -> u8 {
    get_bits(byte, low, low + 3) as u8
}
