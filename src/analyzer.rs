//! This module provides functions for analyzing transition tables before they are encoded or
//! executed. This includes checks for undefined slots, next states past the halting state,
//! unreachable states, and tables that can never halt.

use crate::table::TransitionTable;
use crate::types::{state_letter, MachineError, Symbol};
use std::collections::HashSet;
use std::fmt;

/// Represents the problems that can be found in a transition table.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// Slots that were never set, named like `B1` (state B reading 1).
    UndefinedTransitions(Vec<String>),
    /// Slots whose next state lies past the halting state.
    InvalidNextStates(Vec<String>),
    /// States that cannot be reached from state A.
    UnreachableStates(Vec<char>),
    /// No slot moves to the halting state, so the machine can never halt normally.
    NoHaltTransition,
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::UndefinedTransitions(slots) => {
                write!(f, "Undefined transitions: {}", slots.join(", "))
            }
            AnalysisError::InvalidNextStates(slots) => {
                write!(f, "Next state past halt in: {}", slots.join(", "))
            }
            AnalysisError::UnreachableStates(states) => {
                let names = states.iter().map(char::to_string).collect::<Vec<_>>();
                write!(f, "Unreachable states detected: {}", names.join(", "))
            }
            AnalysisError::NoHaltTransition => write!(f, "No transition enters the halting state"),
        }
    }
}

impl From<AnalysisError> for MachineError {
    /// Converts an `AnalysisError` into a `MachineError::ValidationError`.
    fn from(error: AnalysisError) -> Self {
        MachineError::ValidationError(error.to_string())
    }
}

/// Analyzes a table and returns the first problem found.
///
/// # Returns
///
/// * `Ok(())` if no errors are found.
/// * `Err(MachineError::ValidationError)` describing the first failed check.
pub fn analyze(table: &TransitionTable) -> Result<(), MachineError> {
    match report(table).into_iter().next() {
        Some(error) => Err(error.into()),
        None => Ok(()),
    }
}

/// Runs every check and collects all problems, in check order.
pub fn report(table: &TransitionTable) -> Vec<AnalysisError> {
    [
        check_defined,
        check_next_states,
        check_unreachable_states,
        check_halt_reachable,
    ]
    .iter()
    .filter_map(|f| f(table).err())
    .collect()
}

/// Checks that a table can be turned into a machine number: every slot defined
/// and every next state within `0..=n`.
pub fn check_encodable(table: &TransitionTable) -> Result<(), MachineError> {
    check_defined(table)?;
    check_next_states(table)?;
    Ok(())
}

/// Checks that every slot holds a transition.
fn check_defined(table: &TransitionTable) -> Result<(), AnalysisError> {
    let undefined: Vec<String> = table
        .iter()
        .filter(|(_, _, slot)| slot.is_none())
        .map(|(state, symbol, _)| slot_name(state, symbol))
        .collect();

    if !undefined.is_empty() {
        return Err(AnalysisError::UndefinedTransitions(undefined));
    }

    Ok(())
}

/// Checks that no defined slot targets a state past the halting state.
fn check_next_states(table: &TransitionTable) -> Result<(), AnalysisError> {
    let invalid: Vec<String> = table
        .iter()
        .filter_map(|(state, symbol, slot)| {
            slot.filter(|t| t.next_state > table.halt_state())
                .map(|_| slot_name(state, symbol))
        })
        .collect();

    if !invalid.is_empty() {
        return Err(AnalysisError::InvalidNextStates(invalid));
    }

    Ok(())
}

/// Checks for states that cannot be reached from state A by following defined slots.
fn check_unreachable_states(table: &TransitionTable) -> Result<(), AnalysisError> {
    let mut visited = HashSet::new();
    let mut queue = vec![0];

    while let Some(state) = queue.pop() {
        if state >= table.states() || !visited.insert(state) {
            continue;
        }

        for symbol in Symbol::ALL {
            if let Some(transition) = table.get(state, symbol) {
                if !visited.contains(&transition.next_state) {
                    queue.push(transition.next_state);
                }
            }
        }
    }

    let unreachable: Vec<char> = (0..table.states())
        .filter(|state| !visited.contains(state))
        .map(state_letter)
        .collect();

    if !unreachable.is_empty() {
        return Err(AnalysisError::UnreachableStates(unreachable));
    }

    Ok(())
}

/// Checks that at least one slot moves to the halting state.
fn check_halt_reachable(table: &TransitionTable) -> Result<(), AnalysisError> {
    let halts = table
        .iter()
        .any(|(_, _, slot)| slot.is_some_and(|t| t.next_state == table.halt_state()));

    if !halts {
        return Err(AnalysisError::NoHaltTransition);
    }

    Ok(())
}

fn slot_name(state: usize, symbol: Symbol) -> String {
    format!("{}{}", state_letter(state), symbol)
}
