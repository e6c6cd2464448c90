//! Per-operation signal selection for the decode, execute, memory,
//! writeback, and PC-update stages.

use crate::encoding::Icode;
use crate::state::Register;

const STACK_POINTER: Option<Register> = Some(Register::Rsp);
const WORD_BYTES: u64 = 8;

/// Memory-stage operation selected for one instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemoryAccess {
    /// No data-memory traffic.
    #[default]
    None,
    /// Read one word.
    Read {
        /// Effective address.
        address: u64,
    },
    /// Write one word.
    Write {
        /// Effective address.
        address: u64,
        /// Word stored.
        value: u64,
    },
}

/// First register-read port.
#[must_use]
pub const fn src_a(kind: Option<Icode>, ra: Option<Register>) -> Option<Register> {
    match kind {
        Some(Icode::Rrmovq | Icode::Rmmovq | Icode::Opq | Icode::Pushq) => ra,
        Some(Icode::Popq | Icode::Ret) => STACK_POINTER,
        _ => None,
    }
}

/// Second register-read port.
#[must_use]
pub const fn src_b(kind: Option<Icode>, rb: Option<Register>) -> Option<Register> {
    match kind {
        Some(Icode::Opq | Icode::Rmmovq | Icode::Mrmovq) => rb,
        Some(Icode::Pushq | Icode::Popq | Icode::Call | Icode::Ret) => STACK_POINTER,
        _ => None,
    }
}

/// First ALU input.
#[must_use]
pub const fn alu_a(kind: Option<Icode>, val_a: u64, val_c: u64) -> u64 {
    match kind {
        Some(Icode::Rrmovq | Icode::Opq) => val_a,
        Some(Icode::Irmovq | Icode::Rmmovq | Icode::Mrmovq) => val_c,
        Some(Icode::Call | Icode::Pushq) => WORD_BYTES.wrapping_neg(),
        Some(Icode::Ret | Icode::Popq) => WORD_BYTES,
        _ => 0,
    }
}

/// Second ALU input.
#[must_use]
pub const fn alu_b(kind: Option<Icode>, val_b: u64) -> u64 {
    match kind {
        Some(
            Icode::Rmmovq
            | Icode::Mrmovq
            | Icode::Opq
            | Icode::Call
            | Icode::Pushq
            | Icode::Ret
            | Icode::Popq,
        ) => val_b,
        _ => 0,
    }
}

/// Returns `true` when `ifun` selects a condition evaluated against the flags.
#[must_use]
pub const fn is_conditional(kind: Option<Icode>) -> bool {
    matches!(kind, Some(Icode::Rrmovq | Icode::Jxx))
}

/// Address and direction of the memory stage.
#[must_use]
pub const fn memory_access(kind: Option<Icode>, val_e: u64, val_a: u64, val_p: u64) -> MemoryAccess {
    match kind {
        Some(Icode::Rmmovq | Icode::Pushq) => MemoryAccess::Write {
            address: val_e,
            value: val_a,
        },
        Some(Icode::Call) => MemoryAccess::Write {
            address: val_e,
            value: val_p,
        },
        Some(Icode::Mrmovq) => MemoryAccess::Read { address: val_e },
        Some(Icode::Popq | Icode::Ret) => MemoryAccess::Read { address: val_a },
        _ => MemoryAccess::None,
    }
}

/// Destination of `valE`. A conditional move whose condition failed writes
/// nothing.
#[must_use]
pub const fn dst_e(kind: Option<Icode>, rb: Option<Register>, cnd: bool) -> Option<Register> {
    match kind {
        Some(Icode::Rrmovq) if !cnd => None,
        Some(Icode::Rrmovq | Icode::Irmovq | Icode::Opq) => rb,
        Some(Icode::Pushq | Icode::Popq | Icode::Call | Icode::Ret) => STACK_POINTER,
        _ => None,
    }
}

/// Destination of `valM`.
#[must_use]
pub const fn dst_m(kind: Option<Icode>, ra: Option<Register>) -> Option<Register> {
    match kind {
        Some(Icode::Mrmovq | Icode::Popq) => ra,
        _ => None,
    }
}

/// Address of the next instruction, before the status gate.
#[must_use]
pub const fn next_pc(kind: Option<Icode>, cnd: bool, val_c: u64, val_m: u64, val_p: u64) -> u64 {
    match kind {
        Some(Icode::Call) => val_c,
        Some(Icode::Jxx) if cnd => val_c,
        Some(Icode::Ret) => val_m,
        _ => val_p,
    }
}
