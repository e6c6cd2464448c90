//! Deterministic final-state fingerprint used for cross-host comparison.

use log as _;
use proptest as _;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;
use y86_core::{run, CoreConfig, CoreState, NullSink, StopReason};

/// Sums a countdown through a call/ret subroutine and a counted loop.
#[rustfmt::skip]
const PROGRAM: &[u8] = &[
    // irmovq $0x200, %rsp
    0x30, 0xF4, 0x00, 0x02, 0, 0, 0, 0, 0, 0,
    // call 0x14
    0x80, 0x14, 0, 0, 0, 0, 0, 0, 0,
    // halt
    0x00,
    // 0x14: irmovq $4, %rcx
    0x30, 0xF1, 0x04, 0, 0, 0, 0, 0, 0, 0,
    // irmovq $1, %rdx
    0x30, 0xF2, 0x01, 0, 0, 0, 0, 0, 0, 0,
    // 0x28: addq %rcx, %rax
    0x60, 0x10,
    // rrmovq %rax, %rbx
    0x20, 0x03,
    // subq %rdx, %rcx
    0x61, 0x21,
    // jne 0x28
    0x74, 0x28, 0, 0, 0, 0, 0, 0, 0,
    // ret
    0x90,
];

fn hash_bytes(hash: &mut u64, bytes: &[u8]) {
    for byte in bytes {
        *hash ^= u64::from(*byte);
        *hash = hash.wrapping_mul(0x1000_0000_01B3);
    }
}

fn fingerprint() -> String {
    let config = CoreConfig::default();
    let mut state = CoreState::with_config(&config);
    if state.memory.put_block(0, PROGRAM).is_err() {
        return String::from("program does not fit");
    }

    let outcome = run(&mut state, &config, &mut NullSink);

    let mut hash = 0xCBF2_9CE4_8422_2325_u64;
    match outcome.stop {
        StopReason::Halted => hash_bytes(&mut hash, &[0x10]),
        StopReason::Fault(cause) => hash_bytes(&mut hash, &[0x11, cause as u8]),
        StopReason::CycleLimit => hash_bytes(&mut hash, &[0x12]),
    }
    hash_bytes(&mut hash, &outcome.cycles.to_le_bytes());
    hash_bytes(&mut hash, &state.arch.pc().to_le_bytes());
    hash_bytes(&mut hash, &[state.status.code()]);
    for value in state.arch.registers().values() {
        hash_bytes(&mut hash, &value.to_le_bytes());
    }
    let cc = state.arch.cc();
    hash_bytes(&mut hash, &[u8::from(cc.zero), u8::from(cc.sign), u8::from(cc.overflow)]);
    hash_bytes(&mut hash, state.memory.as_bytes());

    format!("{hash:016x}")
}

fn main() {
    println!("{}", fingerprint());
}
