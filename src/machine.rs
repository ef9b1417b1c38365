//! This module defines the `TuringMachine` struct, which executes a two-symbol transition
//! table on an unbounded tape while counting the ones written and the transitions taken.

use crate::encoder::encode;
use crate::table::TransitionTable;
use crate::tape::Tape;
use crate::types::{Direction, Halt, MachineError, RunReport, State, Status, Step, Symbol};
use tracing::{debug, trace};

/// A single-tape busy beaver machine.
///
/// The machine starts in state 0 on a blank tape and halts when it enters the state equal
/// to the table's state count. Executing an undefined slot stops it with
/// `Status::HaltedInvalid`, leaving the counters as they were before the attempt.
#[derive(Debug, Clone)]
pub struct TuringMachine {
    table: TransitionTable,
    state: State,
    halt_state: State,
    tape: Tape,
    ones: i64,
    transitions: u64,
    status: Status,
}

impl TuringMachine {
    /// Creates a new machine ready to run `table` from state 0 on a blank tape.
    pub fn new(table: TransitionTable) -> Self {
        let halt_state = table.halt_state();
        Self {
            table,
            state: 0,
            halt_state,
            tape: Tape::new(),
            ones: 0,
            transitions: 0,
            status: Status::Running,
        }
    }

    /// Executes a single transition.
    ///
    /// # Returns
    ///
    /// * `Step::Continue` if the machine is still running.
    /// * `Step::Halt(Halt::Ok)` once the halting state is entered.
    /// * `Step::Halt(Halt::Err(MachineError::UndefinedTransition))` if the slot for the
    ///   current state and symbol is undefined.
    ///
    /// Calling `step` on a halted machine reports the same result again without changes.
    pub fn step(&mut self) -> Step {
        match self.status {
            Status::HaltedNormal => return Step::Halt(Halt::Ok),
            Status::HaltedInvalid => return Step::Halt(Halt::Err(self.undefined())),
            Status::Running => {}
        }

        let symbol = self.tape.read();
        let transition = match self.table.get(self.state, symbol) {
            Some(t) => t,
            None => {
                self.status = Status::HaltedInvalid;
                debug!(
                    state = self.state,
                    %symbol,
                    transitions = self.transitions,
                    "undefined transition"
                );
                return Step::Halt(Halt::Err(self.undefined()));
            }
        };

        match (symbol, transition.write) {
            (Symbol::Zero, Symbol::One) => self.ones += 1,
            (Symbol::One, Symbol::Zero) => self.ones -= 1,
            _ => {}
        }
        self.transitions += 1;

        trace!(
            step = self.transitions,
            state = self.state,
            %symbol,
            next = transition.next_state,
            "transition"
        );

        self.tape.write(transition.write);
        self.state = transition.next_state;

        match transition.direction {
            Direction::Left => self.tape.move_left(),
            Direction::Right => self.tape.move_right(),
        };

        if self.state == self.halt_state {
            return self.halt();
        }

        Step::Continue
    }

    /// Runs the machine until it halts.
    ///
    /// There is no step limit: a machine that never halts keeps this call busy forever.
    /// Use [`crate::runner::run_with_limit`] to impose a budget.
    pub fn run(&mut self) -> Step {
        loop {
            match self.step() {
                Step::Continue => continue,
                halt => return halt,
            }
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Returns the halting state, equal to the table's state count.
    pub fn halt_state(&self) -> State {
        self.halt_state
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Checks if the machine has stopped, normally or not.
    pub fn is_halted(&self) -> bool {
        self.status != Status::Running
    }

    /// Ones written minus ones erased since the start (Σ once halted).
    pub fn ones(&self) -> i64 {
        self.ones
    }

    /// Transitions executed since the start (S once halted).
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Resets the machine to its initial configuration: state 0, a blank tape,
    /// and zeroed counters.
    pub fn reset(&mut self) {
        self.state = 0;
        self.tape = Tape::new();
        self.ones = 0;
        self.transitions = 0;
        self.status = Status::Running;
    }

    /// Summarizes the machine's current counters and status.
    pub fn report(&self) -> RunReport {
        RunReport {
            states: self.table.states(),
            number: encode(&self.table).ok().map(|n| n.to_string()),
            standard: self.table.to_string(),
            status: self.status,
            ones: self.ones,
            transitions: self.transitions,
        }
    }

    fn halt(&mut self) -> Step {
        self.status = Status::HaltedNormal;
        debug!(
            ones = self.ones,
            transitions = self.transitions,
            "machine halted"
        );
        Step::Halt(Halt::Ok)
    }

    fn undefined(&self) -> MachineError {
        MachineError::UndefinedTransition {
            state: self.state,
            symbol: self.tape.read(),
        }
    }
}
