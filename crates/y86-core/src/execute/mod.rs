//! Sequential execution engine.
//!
//! Every cycle runs six stages to completion before the next cycle begins:
//! 1. Fetch the opcode, optional register selectors, and optional constant
//! 2. Decode by reading the two source registers
//! 3. Execute the ALU operation and evaluate the branch/move condition
//! 4. Perform at most one data-memory read or write
//! 5. Write `valE` and `valM` back to their destination registers
//! 6. Derive the cycle status and advance PC only when the status is normal
//!
//! A faulting or halting cycle still commits its register and flag updates,
//! but PC stays on the instruction that stopped the machine.

mod alu;
mod helpers;

pub use helpers::MemoryAccess;

use log::{debug, trace, warn};

use crate::decoder::{Decoder, FetchedInstruction};
use crate::encoding::{Condition, Icode};
use crate::memory::AccessError;
use crate::state::{Register, Status};
use crate::{
    CoreConfig, CoreState, FaultCode, RunOutcome, StepOutcome, StopReason, TraceSink,
};

/// Every intermediate signal produced while one instruction executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleSignals {
    /// Fetch-stage output.
    pub fetched: FetchedInstruction,
    /// First register-read port.
    pub src_a: Option<Register>,
    /// Second register-read port.
    pub src_b: Option<Register>,
    /// Value read through `src_a`.
    pub val_a: u64,
    /// Value read through `src_b`.
    pub val_b: u64,
    /// ALU or pass-through result.
    pub val_e: u64,
    /// Outcome of the branch/move condition.
    pub cnd: bool,
    /// Memory operation performed.
    pub access: MemoryAccess,
    /// Word read by the memory stage (`0` when nothing was read).
    pub val_m: u64,
    /// Data-memory bounds error.
    pub dmem_error: Option<AccessError>,
    /// Register receiving `val_e`.
    pub dst_e: Option<Register>,
    /// Register receiving `val_m`.
    pub dst_m: Option<Register>,
    /// Status computed for this cycle.
    pub status: Status,
    /// Fault behind a non-normal, non-halt status.
    pub fault: Option<FaultCode>,
    /// Program counter after the cycle.
    pub new_pc: u64,
}

/// Runs one full cycle and commits every state change it makes.
///
/// Returns `None` without touching `state` once its status is terminal.
#[must_use]
pub fn execute_cycle(state: &mut CoreState) -> Option<CycleSignals> {
    if state.status.is_terminal() {
        return None;
    }

    // Fetch
    let pc = state.arch.pc();
    let fetched = Decoder::fetch(&state.memory, pc);
    let kind = fetched.kind;
    trace!(
        "fetch pc={pc:#x} icode={:#x} ifun={:#x} valC={:#x} valP={:#x}",
        fetched.icode,
        fetched.ifun,
        fetched.val_c,
        fetched.val_p
    );

    // Decode
    let src_a = helpers::src_a(kind, fetched.ra);
    let src_b = helpers::src_b(kind, fetched.rb);
    let val_a = state.arch.gpr(src_a);
    let val_b = state.arch.gpr(src_b);
    trace!("decode srcA={src_a:?} valA={val_a:#x} srcB={src_b:?} valB={val_b:#x}");

    // Execute
    let alu_a = helpers::alu_a(kind, val_a, fetched.val_c);
    let alu_b = helpers::alu_b(kind, val_b);
    let val_e = if kind == Some(Icode::Opq) {
        let result = alu::evaluate(fetched.ifun, alu_a, alu_b);
        *state.arch.cc_mut() = result.flags;
        result.value
    } else {
        alu_b.wrapping_add(alu_a)
    };
    let cnd = helpers::is_conditional(kind)
        && Condition::from_u4(fetched.ifun).is_some_and(|cond| cond.evaluate(state.arch.cc()));
    trace!("execute valE={val_e:#x} cnd={cnd} cc={:?}", state.arch.cc());

    // Memory
    let access = helpers::memory_access(kind, val_e, val_a, fetched.val_p);
    let (val_m, dmem_error) = match access {
        MemoryAccess::None => (0, None),
        MemoryAccess::Read { address } => match state.memory.get_long(address) {
            Ok(word) => (word, None),
            Err(error) => (0, Some(error)),
        },
        MemoryAccess::Write { address, value } => {
            (0, state.memory.put_long(address, value).err())
        }
    };
    trace!("memory access={access:?} valM={val_m:#x} error={dmem_error:?}");

    // Writeback
    let dst_e = helpers::dst_e(kind, fetched.rb, cnd);
    let dst_m = helpers::dst_m(kind, fetched.ra);
    state.arch.set_gpr(dst_e, val_e);
    state.arch.set_gpr(dst_m, val_m);
    trace!("writeback dstE={dst_e:?} dstM={dst_m:?}");

    // PC update
    let fault = if fetched.imem_error.is_some() {
        Some(FaultCode::InstructionAddress)
    } else if dmem_error.is_some() {
        Some(FaultCode::DataAddress)
    } else if !fetched.is_valid() {
        Some(FaultCode::InvalidInstruction)
    } else {
        None
    };
    let status = match fault {
        Some(cause) => Status::from_fault(cause),
        None if kind == Some(Icode::Halt) => Status::Hlt,
        None => Status::Aok,
    };
    let new_pc = if status == Status::Aok {
        helpers::next_pc(kind, cnd, fetched.val_c, val_m, fetched.val_p)
    } else {
        pc
    };
    state.arch.set_pc(new_pc);
    state.status = status;
    state.latched_fault = fault;
    state.cycles = state.cycles.saturating_add(1);

    debug!(
        "cycle {} pc={pc:#x} {fetched} status={} next_pc={new_pc:#x}",
        state.cycles,
        status.mnemonic()
    );
    if let Some(cause) = fault {
        warn!("cycle {} at pc={pc:#x} stopped: {cause}", state.cycles);
    }

    Some(CycleSignals {
        fetched,
        src_a,
        src_b,
        val_a,
        val_b,
        val_e,
        cnd,
        access,
        val_m,
        dmem_error,
        dst_e,
        dst_m,
        status,
        fault,
        new_pc,
    })
}

/// Step outcome for a cycle that ended with `status`.
const fn outcome_of(status: Status, fault: Option<FaultCode>, pc: u64) -> StepOutcome {
    match (status, fault) {
        (_, Some(cause)) => StepOutcome::Fault { cause },
        (Status::Aok, None) => StepOutcome::Retired { next_pc: pc },
        (Status::Hlt, None) => StepOutcome::Halted,
        (Status::Adr, None) => StepOutcome::Fault {
            cause: FaultCode::DataAddress,
        },
        (Status::Ins, None) => StepOutcome::Fault {
            cause: FaultCode::InvalidInstruction,
        },
    }
}

/// Runs a single cycle unless the machine already stopped.
///
/// A terminal state is sticky: once halted or faulted, further calls report
/// the latched outcome and change nothing.
pub fn step_one(state: &mut CoreState) -> StepOutcome {
    match execute_cycle(state) {
        Some(signals) => outcome_of(signals.status, signals.fault, signals.new_pc),
        None => outcome_of(state.status, state.latched_fault, state.arch.pc()),
    }
}

/// Runs cycles until the status leaves normal or `config.max_cycles` cycles
/// have executed in total.
///
/// Each executed cycle is reported to `sink` when tracing is enabled.
pub fn run(state: &mut CoreState, config: &CoreConfig, sink: &mut dyn TraceSink) -> RunOutcome {
    let mut executed = 0_u32;
    loop {
        if state.status.is_terminal() {
            let stop = match outcome_of(state.status, state.latched_fault, state.arch.pc()) {
                StepOutcome::Fault { cause } => StopReason::Fault(cause),
                StepOutcome::Halted | StepOutcome::Retired { .. } => StopReason::Halted,
            };
            return RunOutcome {
                cycles: executed,
                stop,
            };
        }

        if state.cycles >= config.max_cycles {
            warn!(
                "cycle cap of {} reached at pc={:#x}",
                config.max_cycles,
                state.arch.pc()
            );
            return RunOutcome {
                cycles: executed,
                stop: StopReason::CycleLimit,
            };
        }

        let _ = step_one(state);
        executed += 1;
        if config.tracing_enabled {
            sink.on_cycle(state.snapshot());
        }
    }
}
