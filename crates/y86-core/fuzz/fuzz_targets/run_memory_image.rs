#![no_main]

use libfuzzer_sys::fuzz_target;
use y86_core::{run, CoreConfig, CoreState, Decoder, NullSink, Status};

fuzz_target!(|data: &[u8]| {
    let config = CoreConfig {
        memory_bytes: 0x400,
        max_cycles: 256,
        tracing_enabled: false,
    };
    let mut state = CoreState::with_config(&config);
    let image = &data[..data.len().min(config.memory_bytes)];
    if state.memory.put_block(0, image).is_err() {
        return;
    }

    let _ = Decoder::fetch(&state.memory, 0);
    let outcome = run(&mut state, &config, &mut NullSink);

    assert!(outcome.cycles <= config.max_cycles);
    if state.status != Status::Aok {
        let frozen_pc = state.arch.pc();
        let _ = y86_core::step_one(&mut state);
        assert_eq!(state.arch.pc(), frozen_pc);
    }
});
