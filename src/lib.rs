//! This crate provides the core logic for a busy beaver Turing machine simulator.
//! It includes the transition table model, the bijection between tables and machine numbers,
//! an unbounded tape, the execution engine, and a catalog of known champions.

pub mod analyzer;
pub mod encoder;
pub mod loader;
pub mod machine;
pub mod parser;
pub mod programs;
pub mod runner;
pub mod table;
pub mod tape;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the `analyze` function and `AnalysisError` enum from the analyzer module.
pub use analyzer::{analyze, AnalysisError};
/// Re-exports the machine-number codec from the encoder module.
pub use encoder::{decode, decode_unsigned, encode, parse_number, space_size};
/// Re-exports the `ProgramLoader` struct from the loader module.
pub use loader::ProgramLoader;
/// Re-exports the `TuringMachine` struct from the machine module.
pub use machine::TuringMachine;
/// Re-exports the `parse` function from the parser module.
pub use parser::parse;
/// Re-exports `Champion`, `ProgramManager`, and `CHAMPIONS` from the programs module.
pub use programs::{Champion, ProgramManager, CHAMPIONS};
/// Re-exports the budgeted runner.
pub use runner::{run_with_limit, scan, Outcome};
pub use table::TransitionTable;
pub use tape::Tape;
/// Re-exports various types related to machine definition and execution from the types module.
pub use types::{
    state_letter, Direction, Halt, MachineError, RunReport, State, Status, Step, Symbol,
    Transition,
};

/// Re-exports the big integer types used for machine numbers.
pub use num_bigint::{BigInt, BigUint};
