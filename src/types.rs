//! This module defines the core data structures and types used throughout the busy beaver
//! simulator, including symbols, transitions, execution results, and error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::Rule;

/// Index of a machine state. Real states are `0..n`, the halting state is `n`.
pub type State = usize;

/// A binary tape symbol.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    /// The blank symbol every unvisited cell holds.
    #[default]
    Zero,
    /// A mark.
    One,
}

impl Symbol {
    /// Both symbols, in read order.
    pub const ALL: [Symbol; 2] = [Symbol::Zero, Symbol::One];

    /// Returns the symbol as a row index (`0` or `1`).
    pub fn index(self) -> usize {
        match self {
            Symbol::Zero => 0,
            Symbol::One => 1,
        }
    }

    /// Returns the symbol for a digit value; anything other than `0` is `One`.
    pub fn from_digit(digit: u32) -> Self {
        if digit == 0 {
            Symbol::Zero
        } else {
            Symbol::One
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Represents the possible directions the head can move after a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
}

impl Direction {
    /// Returns the single letter used by the standard format.
    pub fn letter(self) -> char {
        match self {
            Direction::Left => 'L',
            Direction::Right => 'R',
        }
    }
}

/// A single transition rule: what to write, where to move, which state comes next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    /// The next state. The value equal to the table's state count means halt.
    pub next_state: State,
    /// The symbol written under the head.
    pub write: Symbol,
    /// The direction the head moves after writing.
    pub direction: Direction,
}

impl Transition {
    pub fn new(next_state: State, write: Symbol, direction: Direction) -> Self {
        Self {
            next_state,
            write,
            direction,
        }
    }
}

/// Returns the standard-format letter of a state (`A` for state 0, and so on).
pub fn state_letter(state: State) -> char {
    u8::try_from(state)
        .ok()
        .and_then(|s| s.checked_add(b'A'))
        .filter(u8::is_ascii_uppercase)
        .map(char::from)
        .unwrap_or('?')
}

/// Represents the outcome of an execution step.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The machine performed a step and continues execution.
    Continue,
    /// The machine has stopped.
    Halt(Halt),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Halt {
    /// Reached the halting state.
    Ok,

    Err(MachineError),
}

/// The lifecycle of a machine.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Running,
    /// Entered the halting state.
    HaltedNormal,
    /// Tried to execute an undefined transition.
    HaltedInvalid,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Status::Running => "running",
            Status::HaltedNormal => "halted",
            Status::HaltedInvalid => "invalid",
        };
        f.write_str(text)
    }
}

/// Summary of a single run, as printed by the CLI and produced by scans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Number of non-halting states.
    pub states: usize,
    /// Machine number in base 10, when the table is fully defined.
    pub number: Option<String>,
    /// Standard-format rendering of the table.
    pub standard: String,
    pub status: Status,
    /// Ones on the tape (Σ when halted).
    pub ones: i64,
    /// Transitions executed (S when halted).
    pub transitions: u64,
}

impl RunReport {
    /// Serializes the report as a single JSON line.
    pub fn to_json(&self) -> Result<String, MachineError> {
        serde_json::to_string(self)
            .map_err(|e| MachineError::ValidationError(format!("Failed to serialize report: {e}")))
    }
}

/// Represents various errors that can occur while building, encoding, or running machines.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MachineError {
    /// A caller supplied an argument outside the accepted domain.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// There's no rule defined for the current state and symbol.
    #[error("No rule defined for state {} and symbol {}", state_letter(*.state), .symbol)]
    UndefinedTransition { state: State, symbol: Symbol },
    /// A standard-format table could not be parsed.
    #[error("Table parsing error: {0}")]
    ParseError(#[from] Box<pest::error::Error<Rule>>),
    /// A table failed a structural check.
    #[error("Table validation error: {0}")]
    ValidationError(String),
    /// Reading a machine list failed.
    #[error("File error: {0}")]
    FileError(String),
}
