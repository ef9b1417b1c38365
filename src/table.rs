//! This module defines the `TransitionTable`, the fixed-shape mapping from
//! `(state, symbol)` to an optional `Transition`.

use crate::parser::parse;
use crate::types::{state_letter, Direction, MachineError, State, Symbol, Transition};
use std::fmt;
use std::str::FromStr;

/// A transition table for a machine with `n` non-halting states and two symbols.
///
/// The table always holds exactly `n * 2` slots. A slot that was never set is `None`,
/// which the engine treats as an undefined transition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransitionTable {
    states: usize,
    slots: Vec<Option<Transition>>,
}

impl TransitionTable {
    /// Creates a table for `states` non-halting states with every slot undefined.
    ///
    /// # Returns
    ///
    /// * `Err(MachineError::InvalidArgument)` if `states` is zero.
    pub fn new(states: usize) -> Result<Self, MachineError> {
        if states == 0 {
            return Err(MachineError::InvalidArgument(
                "State count must be positive".to_string(),
            ));
        }

        Ok(Self {
            states,
            slots: vec![None; states * 2],
        })
    }

    /// Overwrites the slot for `(state, symbol)`.
    ///
    /// `next_state` is stored as given; range discipline belongs to the codec and the engine.
    /// The shape itself is fixed, so a `state` outside `0..n` is rejected.
    pub fn set(
        &mut self,
        state: State,
        symbol: Symbol,
        next_state: State,
        write: Symbol,
        direction: Direction,
    ) -> Result<(), MachineError> {
        let index = self.slot_index(state, symbol).ok_or_else(|| {
            MachineError::InvalidArgument(format!(
                "State {} is outside a table of {} states",
                state, self.states
            ))
        })?;

        self.slots[index] = Some(Transition::new(next_state, write, direction));
        Ok(())
    }

    /// Clears the slot for `(state, symbol)` back to undefined.
    pub fn unset(&mut self, state: State, symbol: Symbol) {
        if let Some(index) = self.slot_index(state, symbol) {
            self.slots[index] = None;
        }
    }

    /// Returns the transition for `(state, symbol)`, or `None` when the slot is
    /// undefined or `state` is not a row of this table.
    pub fn get(&self, state: State, symbol: Symbol) -> Option<Transition> {
        self.slot_index(state, symbol)
            .and_then(|index| self.slots[index])
    }

    /// Number of non-halting states.
    pub fn states(&self) -> usize {
        self.states
    }

    /// The halting state, equal to the number of non-halting states.
    pub fn halt_state(&self) -> State {
        self.states
    }

    /// Returns `true` when every slot holds a transition.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Iterates over all slots in state-major, symbol-minor order.
    pub fn iter(&self) -> impl Iterator<Item = (State, Symbol, Option<Transition>)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| (i / 2, Symbol::ALL[i % 2], *slot))
    }

    /// Renders the table as a grid with one row per read symbol and one column per state.
    ///
    /// ```text
    /// -----------------
    /// |   |  A  |  B  |
    /// -----------------
    /// | 0 | 1RB | 1LA |
    /// | 1 | 1LB | 1RC |
    /// -----------------
    /// ```
    pub fn grid(&self) -> String {
        let rule = format!("-----{}\n", "------".repeat(self.states));
        let mut out = rule.clone();

        out.push_str("|   |");
        for state in 0..self.states {
            out.push_str(&format!("  {}  |", state_letter(state)));
        }
        out.push('\n');
        out.push_str(&rule);

        for symbol in Symbol::ALL {
            out.push_str(&format!("| {} |", symbol));
            for state in 0..self.states {
                out.push_str(&format!(" {} |", format_slot(self.get(state, symbol))));
            }
            out.push('\n');
        }

        out.push_str(&rule);
        out
    }

    fn slot_index(&self, state: State, symbol: Symbol) -> Option<usize> {
        (state < self.states).then(|| state * 2 + symbol.index())
    }
}

/// Formats one slot as its three-character standard-format group.
fn format_slot(slot: Option<Transition>) -> String {
    match slot {
        Some(t) => format!(
            "{}{}{}",
            t.write,
            t.direction.letter(),
            state_letter(t.next_state)
        ),
        None => "---".to_string(),
    }
}

/// Formats the table in standard format, e.g. `1RB1LB_1LA1RC`.
impl fmt::Display for TransitionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for state in 0..self.states {
            if state > 0 {
                f.write_str("_")?;
            }
            for symbol in Symbol::ALL {
                f.write_str(&format_slot(self.get(state, symbol)))?;
            }
        }
        Ok(())
    }
}

impl FromStr for TransitionTable {
    type Err = MachineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
