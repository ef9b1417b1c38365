//! This module converts between transition tables and machine numbers.
//!
//! Every slot of an `n`-state table is three mixed-radix digits: the next state (base `n + 1`,
//! where `n` means halt), the shift direction (base 2, `Right` is 1) and the written symbol
//! (base 2, `One` is 1). The slot for state `n - 1` reading `1` holds the least significant
//! digits, and the slot for state `0` reading `0` the most significant ones. Within a slot the
//! next-state digit is the lowest.
//!
//! The total space holds `(4(n + 1))^(2n)` tables. `encode` and `decode` walk the same
//! [`digit_layout`] so the two directions cannot drift apart.

use crate::analyzer::check_encodable;
use crate::table::TransitionTable;
use crate::types::{Direction, MachineError, State, Symbol};
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};

/// The part of a transition a digit encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    NextState,
    Direction,
    Write,
}

/// One digit position of a machine number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Digit {
    pub state: State,
    pub symbol: Symbol,
    pub field: Field,
    pub base: u32,
}

/// Returns the `6n` digit positions of an `n`-state machine number, least significant first.
pub fn digit_layout(states: usize) -> Vec<Digit> {
    let state_base = u32::try_from(states + 1).unwrap_or(u32::MAX);
    let mut layout = Vec::with_capacity(states * 6);

    for state in (0..states).rev() {
        for symbol in [Symbol::One, Symbol::Zero] {
            for (field, base) in [
                (Field::NextState, state_base),
                (Field::Direction, 2),
                (Field::Write, 2),
            ] {
                layout.push(Digit {
                    state,
                    symbol,
                    field,
                    base,
                });
            }
        }
    }

    layout
}

/// Returns the number of distinct `states`-state tables, `(4(states + 1))^(2 states)`.
pub fn space_size(states: usize) -> BigUint {
    digit_layout(states)
        .iter()
        .fold(BigUint::from(1u32), |size, digit| size * digit.base)
}

/// Encodes a fully defined transition table into its machine number.
///
/// # Returns
///
/// * `Ok(BigUint)` - The machine number, below `space_size(table.states())`.
/// * `Err(MachineError::ValidationError)` if a slot is undefined or targets a state past halt.
pub fn encode(table: &TransitionTable) -> Result<BigUint, MachineError> {
    check_encodable(table)?;

    let mut result = BigUint::zero();
    let mut weight = BigUint::from(1u32);

    for digit in digit_layout(table.states()) {
        let value = table
            .get(digit.state, digit.symbol)
            .map(|t| match digit.field {
                Field::NextState => t.next_state,
                Field::Direction => usize::from(t.direction == Direction::Right),
                Field::Write => t.write.index(),
            })
            .unwrap_or_default();

        result += &weight * value;
        weight *= digit.base;
    }

    Ok(result)
}

/// Decodes a machine number into an `states`-state transition table.
///
/// Numbers at or above `space_size(states)` are accepted; the part beyond the last digit
/// is discarded.
///
/// # Returns
///
/// * `Err(MachineError::InvalidArgument)` if `number` is negative or `states` is zero.
pub fn decode(number: &BigInt, states: usize) -> Result<TransitionTable, MachineError> {
    let mut remaining = match number.to_biguint() {
        Some(value) => value,
        None => {
            return Err(MachineError::InvalidArgument(format!(
                "Machine number must not be negative: {}",
                number
            )))
        }
    };

    let mut table = TransitionTable::new(states)?;
    let mut slot = [0u32; 3];

    for digit in digit_layout(states) {
        let (quotient, value) = remaining.div_rem(&BigUint::from(digit.base));
        remaining = quotient;

        let value = value.to_u32().unwrap_or_default();
        match digit.field {
            Field::NextState => slot[0] = value,
            Field::Direction => slot[1] = value,
            Field::Write => {
                slot[2] = value;
                let direction = if slot[1] == 0 {
                    Direction::Left
                } else {
                    Direction::Right
                };
                table.set(
                    digit.state,
                    digit.symbol,
                    slot[0] as State,
                    Symbol::from_digit(slot[2]),
                    direction,
                )?;
            }
        }
    }

    Ok(table)
}

/// Decodes an unsigned machine number.
pub fn decode_unsigned(number: &BigUint, states: usize) -> Result<TransitionTable, MachineError> {
    decode(&BigInt::from(number.clone()), states)
}

/// Parses machine-number text: a base-10 integer literal, optionally surrounded by whitespace.
///
/// A leading `-` is accepted here so that `decode` can report the negative value.
pub fn parse_number(input: &str) -> Result<BigInt, MachineError> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MachineError::InvalidArgument(format!(
            "Not a machine number: {:?}",
            input
        )));
    }

    trimmed
        .parse::<BigInt>()
        .map_err(|e| MachineError::InvalidArgument(format!("Not a machine number: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Transition;

    fn number(text: &str) -> BigInt {
        parse_number(text).unwrap()
    }

    #[test]
    fn test_layout_order() {
        let layout = digit_layout(2);

        assert_eq!(layout.len(), 12);
        assert_eq!(
            layout[0],
            Digit {
                state: 1,
                symbol: Symbol::One,
                field: Field::NextState,
                base: 3,
            }
        );
        assert_eq!(layout[1].field, Field::Direction);
        assert_eq!(layout[2].field, Field::Write);
        assert_eq!((layout[3].state, layout[3].symbol), (1, Symbol::Zero));
        assert_eq!((layout[11].state, layout[11].symbol), (0, Symbol::Zero));
        assert_eq!(layout[11].field, Field::Write);
    }

    #[test]
    fn test_space_size() {
        assert_eq!(space_size(1), BigUint::from(64u32));
        assert_eq!(space_size(2), BigUint::from(20736u32));
        assert_eq!(space_size(4), BigUint::from(25_600_000_000u64));
        assert_eq!(
            space_size(8).to_string(),
            "7958661109946400884391936"
        );
    }

    #[test]
    fn test_decode_two_state_champion() {
        let table = decode(&number("18371"), 2).unwrap();

        assert_eq!(table.to_string(), "1RB1LB_1LA1RC");
        assert_eq!(
            table.get(1, Symbol::One),
            Some(Transition::new(2, Symbol::One, Direction::Right))
        );
    }

    #[test]
    fn test_encode_decode_champions() {
        let champions = [
            (1, "56", "1RB0LA"),
            (2, "18371", "1RB1LB_1LA1RC"),
            (3, "14642600", "1RB1RD_0RC1RB_1LC1LA"),
            (4, "21216477565", "1RB1LB_1LA0LC_1RE1LD_1RD0RA"),
            (5, "51830926765032", "1RB1LC_1RC1RB_1RD0LE_1LA1LD_1RF0LA"),
            (
                6,
                "183593859414557127",
                "1RB0LD_1RC0RF_1LC1LA_0LE1RG_1LF0RB_0RC0RE",
            ),
        ];

        for (states, text, standard) in champions {
            let decoded = decode(&number(text), states).unwrap();
            assert_eq!(decoded.to_string(), standard, "decoding {}", text);

            let parsed: TransitionTable = standard.parse().unwrap();
            assert_eq!(encode(&parsed).unwrap().to_string(), text);
        }
    }

    #[test]
    fn test_exhaustive_round_trip_one_state() {
        for value in 0u32..64 {
            let table = decode(&BigInt::from(value), 1).unwrap();
            assert_eq!(encode(&table).unwrap(), BigUint::from(value));
        }
    }

    #[test]
    fn test_zero_is_all_left_zero_a() {
        let table = decode(&BigInt::zero(), 2).unwrap();
        assert_eq!(table.to_string(), "0LA0LA_0LA0LA");
    }

    #[test]
    fn test_highest_number_is_all_one_right_halt() {
        let last = space_size(2) - 1u32;
        let table = decode_unsigned(&last, 2).unwrap();

        assert_eq!(table.to_string(), "1RC1RC_1RC1RC");
        assert_eq!(encode(&table).unwrap(), last);
    }

    #[test]
    fn test_decode_beyond_space_wraps() {
        let size = space_size(2);
        let beyond = &size + 18371u32;
        let table = decode_unsigned(&beyond, 2).unwrap();

        assert_eq!(table.to_string(), "1RB1LB_1LA1RC");
        assert_eq!(encode(&table).unwrap(), BigUint::from(18371u32));
    }

    #[test]
    fn test_decode_negative_rejected() {
        let result = decode(&number("-1"), 2);
        assert!(matches!(result, Err(MachineError::InvalidArgument(_))));
    }

    #[test]
    fn test_decode_zero_states_rejected() {
        let result = decode(&number("5"), 0);
        assert!(matches!(result, Err(MachineError::InvalidArgument(_))));
    }

    #[test]
    fn test_encode_incomplete_table_rejected() {
        let table: TransitionTable = "1RB---_1LA1RC".parse().unwrap();
        let result = encode(&table);

        assert!(matches!(result, Err(MachineError::ValidationError(_))));
    }

    #[test]
    fn test_encode_next_state_past_halt_rejected() {
        let mut table = TransitionTable::new(1).unwrap();
        table
            .set(0, Symbol::Zero, 2, Symbol::One, Direction::Right)
            .unwrap();
        table
            .set(0, Symbol::One, 0, Symbol::One, Direction::Right)
            .unwrap();

        assert!(matches!(
            encode(&table),
            Err(MachineError::ValidationError(_))
        ));
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(number(" 18371\n"), BigInt::from(18371));
        assert_eq!(number("-3"), BigInt::from(-3));
        assert_eq!(
            number("739696442014594807059393047166976").to_string(),
            "739696442014594807059393047166976"
        );

        for input in ["", "-", "+5", "1_000", "12a", "0x10", "1 2"] {
            assert!(
                matches!(parse_number(input), Err(MachineError::InvalidArgument(_))),
                "expected {:?} to be rejected",
                input
            );
        }
    }
}
