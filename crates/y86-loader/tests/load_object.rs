//! Loader-to-engine integration: object files loaded from disk and executed.

use clap as _;
use env_logger as _;
use log as _;
use rstest::rstest;
use serde_json as _;
use std::fs;
use thiserror as _;
use y86_core::{run, CoreConfig, NullSink, Register, Status, StopReason};
use y86_loader::{load_file, load_str, LoadError};

/// Object listing for a call/ret program with a stack at 0x200.
const STACK_PROGRAM: &str = "\
0x000:                      | .pos 0
0x000: 30f40002000000000000 |   irmovq stack, %rsp
0x00a: 801400000000000000   |   call proc
0x013: 00                   |   halt
0x014:                      | proc:
0x014: 30f00700000000000000 |   irmovq $7, %rax
0x01e: a00f                 |   pushq %rax
0x020: b03f                 |   popq %rbx
0x022: 90                   |   ret
0x200:                      | .pos 0x200
0x200:                      | stack:
";

#[test]
fn two_lines_land_at_their_addresses() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("two.yo");
    fs::write(
        &path,
        "0x000: 10                   |\n0x040: 0102                 |\n",
    )
    .unwrap();

    let state = load_file(&path, &CoreConfig::default()).expect("valid object file");

    assert_eq!(state.memory.get_byte(0x00), Ok(0x10));
    assert_eq!(state.memory.get_byte(0x40), Ok(0x01));
    assert_eq!(state.memory.get_byte(0x41), Ok(0x02));
    assert_eq!(state.memory.nonzero_words().count(), 2);
}

#[test]
fn decreasing_second_address_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.yo");
    fs::write(
        &path,
        "0x040: 10                   |\n0x000: 00                   |\n",
    )
    .unwrap();

    let result = load_file(&path, &CoreConfig::default());

    assert!(matches!(result, Err(LoadError::AddressOrder { line: 2, .. })));
}

#[test]
fn loaded_program_runs_to_halt() {
    let config = CoreConfig::default();
    let mut state = load_str(STACK_PROGRAM, &config).expect("valid object text");

    let outcome = run(&mut state, &config, &mut NullSink);

    assert_eq!(outcome.stop, StopReason::Halted);
    assert_eq!(outcome.cycles, 7);
    assert_eq!(state.status, Status::Hlt);
    assert_eq!(state.arch.pc(), 0x13);
    assert_eq!(state.arch.gpr(Some(Register::Rbx)), 7);
    assert_eq!(state.arch.gpr(Some(Register::Rsp)), 0x200);
}

#[rstest]
#[case::memory_bytes(0x100)]
#[case::tiny_memory(0x10)]
fn program_larger_than_memory_is_rejected(#[case] memory_bytes: usize) {
    let config = CoreConfig {
        memory_bytes,
        ..CoreConfig::default()
    };
    let text = "0x000: 10                   |\n0x100: 00                   |\n";

    let result = load_str(text, &config);

    assert!(matches!(result, Err(LoadError::Capacity { line: 2, .. })));
}
