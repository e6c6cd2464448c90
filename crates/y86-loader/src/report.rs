//! Trace renderers for recorded cycle snapshots.
//!
//! The JSON form is an array with one object per cycle:
//!
//! ```text
//! {"CC": {"OF": 0, "SF": 0, "ZF": 1},
//!  "MEM": {"8": 5},
//!  "PC": 10,
//!  "REG": {"rax": 5, ...},
//!  "STAT": 1}
//! ```
//!
//! Memory and register values are shown as signed 64-bit integers and only
//! non-zero memory words appear under `MEM`, keyed by decimal address.

use std::fmt;

use clap::ValueEnum;
use serde_json::{json, Map, Value};
use y86_core::{CycleSnapshot, Register};

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TraceFormat {
    /// JSON array of per-cycle state objects.
    #[default]
    Json,
    /// Human-readable text blocks.
    Text,
}

#[allow(clippy::cast_possible_wrap)]
const fn signed(word: u64) -> i64 {
    word as i64
}

/// JSON object for one cycle.
#[must_use]
pub fn snapshot_json(snapshot: &CycleSnapshot) -> Value {
    let registers: Map<String, Value> = Register::ALL
        .iter()
        .map(|reg| {
            (
                reg.name().to_owned(),
                json!(signed(snapshot.registers[reg.index()])),
            )
        })
        .collect();
    let memory: Map<String, Value> = snapshot
        .memory
        .iter()
        .map(|&(address, word)| (address.to_string(), json!(signed(word))))
        .collect();

    json!({
        "CC": {
            "OF": u8::from(snapshot.flags.overflow),
            "SF": u8::from(snapshot.flags.sign),
            "ZF": u8::from(snapshot.flags.zero),
        },
        "MEM": memory,
        "PC": snapshot.pc,
        "REG": registers,
        "STAT": snapshot.status.code(),
    })
}

/// Renders a whole trace as a pretty-printed JSON array.
///
/// # Errors
///
/// Propagates serializer failures.
pub fn render_json(snapshots: &[CycleSnapshot]) -> Result<String, serde_json::Error> {
    let states: Vec<Value> = snapshots.iter().map(snapshot_json).collect();
    serde_json::to_string_pretty(&states)
}

/// Text rendering of a trace, one block per cycle.
#[derive(Debug, Clone, Copy)]
pub struct TextTrace<'a>(pub &'a [CycleSnapshot]);

impl fmt::Display for TextTrace<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for snapshot in self.0 {
            writeln!(
                f,
                "Cycle {}: PC={:#06x} STAT={} ZF={} SF={} OF={}",
                snapshot.cycle,
                snapshot.pc,
                snapshot.status.mnemonic(),
                u8::from(snapshot.flags.zero),
                u8::from(snapshot.flags.sign),
                u8::from(snapshot.flags.overflow),
            )?;
            for row in Register::ALL.chunks(4) {
                write!(f, " ")?;
                for reg in row {
                    write!(
                        f,
                        " %{:<3}={:#018x}",
                        reg.name(),
                        snapshot.registers[reg.index()]
                    )?;
                }
                writeln!(f)?;
            }
            for &(address, word) in &snapshot.memory {
                writeln!(f, "  M[{address:#06x}]={word:#018x}")?;
            }
        }
        Ok(())
    }
}

/// Renders `snapshots` in `format`.
///
/// # Errors
///
/// Propagates JSON serializer failures.
pub fn render(
    snapshots: &[CycleSnapshot],
    format: TraceFormat,
) -> Result<String, serde_json::Error> {
    match format {
        TraceFormat::Json => render_json(snapshots),
        TraceFormat::Text => Ok(TextTrace(snapshots).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::{render, snapshot_json, TextTrace, TraceFormat};
    use y86_core::{ConditionCodes, CycleSnapshot, Register, Status};

    fn sample() -> CycleSnapshot {
        let mut registers = [0; 15];
        registers[Register::Rax.index()] = 10;
        registers[Register::Rbx.index()] = u64::MAX;
        CycleSnapshot {
            cycle: 3,
            pc: 0x16,
            status: Status::Hlt,
            flags: ConditionCodes {
                zero: false,
                sign: true,
                overflow: false,
            },
            registers,
            memory: vec![(0x8, 5), (0x1f8, u64::MAX)],
        }
    }

    #[test]
    fn json_uses_signed_values_and_decimal_addresses() {
        let value = snapshot_json(&sample());

        assert_eq!(value["STAT"], 2);
        assert_eq!(value["PC"], 0x16);
        assert_eq!(value["CC"]["SF"], 1);
        assert_eq!(value["CC"]["ZF"], 0);
        assert_eq!(value["REG"]["rax"], 10);
        assert_eq!(value["REG"]["rbx"], -1);
        assert_eq!(value["REG"]["r14"], 0);
        assert_eq!(value["MEM"]["8"], 5);
        assert_eq!(value["MEM"]["504"], -1);
        assert_eq!(value["MEM"].as_object().map(|mem| mem.len()), Some(2));
    }

    #[test]
    fn json_keeps_register_and_address_order() {
        let value = snapshot_json(&sample());
        let keys = |field: &str| -> Vec<String> {
            value[field]
                .as_object()
                .map(|object| object.keys().cloned().collect())
                .unwrap_or_default()
        };

        let registers: Vec<&str> = Register::ALL.iter().map(|reg| reg.name()).collect();
        assert_eq!(keys("REG"), registers);
        assert_eq!(keys("MEM"), ["8", "504"]);
    }

    #[test]
    fn json_trace_is_an_array() {
        let rendered = render(&[sample(), sample()], TraceFormat::Json).expect("serializable");
        let parsed: serde_json::Value = serde_json::from_str(&rendered).expect("valid json");

        assert_eq!(parsed.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn text_trace_lists_state() {
        let rendered = TextTrace(&[sample()]).to_string();

        assert!(rendered.starts_with("Cycle 3: PC=0x0016 STAT=HLT ZF=0 SF=1 OF=0\n"));
        assert!(rendered.contains("%rax=0x000000000000000a"));
        assert!(rendered.contains("M[0x01f8]=0xffffffffffffffff"));
    }
}
