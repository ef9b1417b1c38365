//! This module provides the parser for the standard text format of transition tables,
//! utilizing the `pest` crate. A table such as `1RB1LB_1LA1RC` lists one row per state,
//! each row holding a `<write><shift><next>` group for read symbol 0 and read symbol 1.

use crate::table::TransitionTable;
use crate::types::{state_letter, Direction, MachineError, Symbol};
use pest::{
    error::{Error, ErrorVariant},
    iterators::Pair,
    Parser as PestParser, Span,
};
use pest_derive::Parser as PestParser;

/// Derives a `PestParser` for the standard-format grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct StandardFormatParser;

/// Parses a standard-format string into a `TransitionTable`.
///
/// The number of rows determines the state count. The letter right after the last real
/// state denotes halt, and `---` leaves a slot undefined.
///
/// # Returns
///
/// * `Ok(TransitionTable)` if the input is well formed.
/// * `Err(MachineError::ParseError)` on syntax errors or next-state letters beyond halt.
pub fn parse(input: &str) -> Result<TransitionTable, MachineError> {
    let root = StandardFormatParser::parse(Rule::table, input.trim())
        .map_err(|e| MachineError::ParseError(e.into()))?
        .next()
        .ok_or_else(|| MachineError::ValidationError("Empty table".to_string()))?;

    let rows: Vec<Pair<Rule>> = root
        .into_inner()
        .filter(|p| p.as_rule() == Rule::row)
        .collect();

    let mut table = TransitionTable::new(rows.len())?;

    for (state, row) in rows.into_iter().enumerate() {
        for (slot, symbol) in row.into_inner().zip(Symbol::ALL) {
            if slot.as_rule() == Rule::transition {
                parse_transition(&mut table, state, symbol, slot)?;
            }
        }
    }

    Ok(table)
}

/// Parses a standard-format string and checks that it has exactly `states` rows.
pub fn parse_with_states(input: &str, states: usize) -> Result<TransitionTable, MachineError> {
    let table = parse(input)?;

    if table.states() != states {
        return Err(MachineError::ValidationError(format!(
            "Expected {} states but the table has {}",
            states,
            table.states()
        )));
    }

    Ok(table)
}

/// Parses a single `<write><shift><next>` group into the slot for `(state, symbol)`.
fn parse_transition(
    table: &mut TransitionTable,
    state: usize,
    symbol: Symbol,
    pair: Pair<Rule>,
) -> Result<(), MachineError> {
    let mut write = Symbol::Zero;
    let mut direction = Direction::Left;
    let mut next_state = 0;

    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::write => write = parse_symbol(part.as_str()),
            Rule::shift => direction = parse_direction(part.as_str()),
            Rule::next => next_state = parse_next_state(&part, table.halt_state())?,
            _ => {}
        }
    }

    table.set(state, symbol, next_state, write, direction)
}

fn parse_symbol(input: &str) -> Symbol {
    match input {
        "1" => Symbol::One,
        _ => Symbol::Zero,
    }
}

fn parse_direction(input: &str) -> Direction {
    match input {
        "R" => Direction::Right,
        _ => Direction::Left,
    }
}

/// Maps a state letter to its index, rejecting letters past the halting state.
fn parse_next_state(pair: &Pair<Rule>, halt: usize) -> Result<usize, MachineError> {
    let letter = pair.as_str().bytes().next().unwrap_or(b'A');
    let state = usize::from(letter - b'A');

    if state > halt {
        return Err(parse_error(
            &format!(
                "State {} is beyond the halting state {}",
                pair.as_str(),
                state_letter(halt)
            ),
            pair.as_span(),
        ));
    }

    Ok(state)
}

/// Creates a `MachineError::ParseError` from a message and a `Span`.
fn parse_error(msg: &str, span: Span) -> MachineError {
    MachineError::ParseError(Box::new(Error::new_from_span(
        ErrorVariant::CustomError {
            message: msg.to_string(),
        },
        span,
    )))
}
