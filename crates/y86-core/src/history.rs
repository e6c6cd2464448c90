//! Recorded execution with a replay cursor.
//!
//! A run is executed once and every cycle snapshot is kept; hosts then walk
//! the recording forward, rewind it, or jump to the final state without
//! re-running the program.

use crate::execute::run;
use crate::{CoreConfig, CoreState, CycleSnapshot, RunOutcome, TraceSink};

/// Cursor view returned by the replay operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryStep<'a> {
    /// Snapshot at the cursor.
    pub snapshot: &'a CycleSnapshot,
    /// Zero-based cursor position.
    pub position: usize,
    /// `true` when the cursor is on the last recorded state.
    pub done: bool,
}

/// Every snapshot of one run plus a replay cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionHistory {
    states: Vec<CycleSnapshot>,
    cursor: usize,
}

impl TraceSink for ExecutionHistory {
    fn on_cycle(&mut self, snapshot: CycleSnapshot) {
        self.states.push(snapshot);
    }
}

impl ExecutionHistory {
    /// Runs `state` to completion and records every cycle.
    ///
    /// Tracing is forced on for the recording regardless of `config`.
    pub fn record(state: &mut CoreState, config: &CoreConfig) -> (Self, RunOutcome) {
        let config = CoreConfig {
            tracing_enabled: true,
            ..config.clone()
        };
        let mut history = Self::default();
        let outcome = run(state, &config, &mut history);
        (history, outcome)
    }

    /// Number of recorded snapshots.
    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.states.len()
    }

    /// All recorded snapshots in execution order.
    #[must_use]
    pub fn states(&self) -> &[CycleSnapshot] {
        &self.states
    }

    fn view(&self) -> Option<HistoryStep<'_>> {
        self.states.get(self.cursor).map(|snapshot| HistoryStep {
            snapshot,
            position: self.cursor,
            done: self.cursor + 1 >= self.states.len(),
        })
    }

    /// Snapshot at the cursor without moving it.
    #[must_use]
    pub fn current(&self) -> Option<HistoryStep<'_>> {
        self.view()
    }

    /// Advances the cursor by one. At the last state the cursor stays put and
    /// the same state is reported again with `done` set.
    pub fn step(&mut self) -> Option<HistoryStep<'_>> {
        if self.cursor + 1 < self.states.len() {
            self.cursor += 1;
        }
        self.view()
    }

    /// Moves the cursor back to the first recorded state.
    pub fn reset(&mut self) -> Option<HistoryStep<'_>> {
        self.cursor = 0;
        self.view()
    }

    /// Moves the cursor to the final recorded state.
    pub fn continue_to_end(&mut self) -> Option<HistoryStep<'_>> {
        self.cursor = self.states.len().saturating_sub(1);
        self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::ExecutionHistory;
    use crate::state::Status;
    use crate::{CoreConfig, CoreState, StopReason};

    fn recorded(program: &[u8]) -> ExecutionHistory {
        let mut state = CoreState::default();
        state.memory.put_block(0, program).expect("program fits");
        let config = CoreConfig {
            tracing_enabled: false,
            ..CoreConfig::default()
        };
        let (history, outcome) = ExecutionHistory::record(&mut state, &config);
        assert_eq!(outcome.stop, StopReason::Halted);
        history
    }

    #[test]
    fn records_every_cycle_even_with_tracing_disabled() {
        let history = recorded(&[0x10, 0x10, 0x00]);

        assert_eq!(history.total_steps(), 3);
        assert_eq!(history.states()[2].status, Status::Hlt);
    }

    #[test]
    fn step_reports_done_on_last_state() {
        let mut history = recorded(&[0x10, 0x00]);

        let first = history.current().expect("recorded");
        assert_eq!(first.position, 0);
        assert!(!first.done);

        let last = history.step().expect("recorded");
        assert_eq!(last.position, 1);
        assert!(last.done);

        let again = history.step().expect("recorded");
        assert_eq!(again.position, 1);
        assert!(again.done);
    }

    #[test]
    fn reset_and_continue_move_the_cursor() {
        let mut history = recorded(&[0x10, 0x10, 0x10, 0x00]);

        let end = history.continue_to_end().expect("recorded");
        assert_eq!(end.position, 3);
        assert_eq!(end.snapshot.pc, 3);

        let start = history.reset().expect("recorded");
        assert_eq!(start.position, 0);
        assert_eq!(start.snapshot.pc, 1);
    }

    #[test]
    fn empty_history_has_no_current_state() {
        let mut history = ExecutionHistory::default();

        assert!(history.current().is_none());
        assert!(history.step().is_none());
        assert!(history.continue_to_end().is_none());
    }
}
