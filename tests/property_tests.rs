//! Property-based tests for the machine-number codec, the tape, and the engine.

use proptest::prelude::*;
use tmbb::{
    decode_unsigned, encode, run_with_limit, space_size, BigUint, Direction, Outcome, Symbol,
    Tape, TransitionTable, TuringMachine,
};

// ============================================================================
// Strategies
// ============================================================================

/// A complete table of `states` states with every next state in `0..=states`.
fn table_strategy(states: usize) -> impl Strategy<Value = TransitionTable> {
    prop::collection::vec((0..=states, any::<bool>(), any::<bool>()), states * 2).prop_map(
        move |slots| {
            let mut table = TransitionTable::new(states).unwrap();
            for (i, (next, write, right)) in slots.into_iter().enumerate() {
                let symbol = Symbol::ALL[i % 2];
                let write = if write { Symbol::One } else { Symbol::Zero };
                let direction = if right {
                    Direction::Right
                } else {
                    Direction::Left
                };
                table.set(i / 2, symbol, next, write, direction).unwrap();
            }
            table
        },
    )
}

fn sized_table() -> impl Strategy<Value = TransitionTable> {
    (1usize..=6).prop_flat_map(table_strategy)
}

/// A machine number below the space size of `states`, built from random bytes.
fn number_below(states: usize) -> impl Strategy<Value = BigUint> {
    prop::collection::vec(any::<u8>(), 1..24)
        .prop_map(move |bytes| BigUint::from_bytes_le(&bytes) % space_size(states))
}

// ============================================================================
// Codec
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_table_round_trip(table in sized_table()) {
        let number = encode(&table).unwrap();
        let decoded = decode_unsigned(&number, table.states()).unwrap();
        prop_assert_eq!(decoded, table);
    }

    #[test]
    fn prop_encoded_number_within_space(table in sized_table()) {
        let number = encode(&table).unwrap();
        prop_assert!(number < space_size(table.states()));
    }

    #[test]
    fn prop_number_round_trip(
        (states, number) in (1usize..=8).prop_flat_map(|s| (Just(s), number_below(s)))
    ) {
        let table = decode_unsigned(&number, states).unwrap();
        prop_assert_eq!(encode(&table).unwrap(), number);
    }

    #[test]
    fn prop_decode_reduces_modulo_space(
        states in 1usize..=4,
        bytes in prop::collection::vec(any::<u8>(), 1..32)
    ) {
        let number = BigUint::from_bytes_le(&bytes);
        let table = decode_unsigned(&number, states).unwrap();
        prop_assert_eq!(encode(&table).unwrap(), number % space_size(states));
    }

    #[test]
    fn prop_standard_format_round_trip(table in sized_table()) {
        let parsed: TransitionTable = table.to_string().parse().unwrap();
        prop_assert_eq!(parsed, table);
    }
}

// ============================================================================
// Tape and engine
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_tape_neighbors_symmetric(moves in prop::collection::vec(any::<bool>(), 0..200)) {
        let mut tape = Tape::new();
        for right in moves {
            if right {
                tape.move_right();
            } else {
                tape.move_left();
            }
        }

        prop_assert!(tape.is_materialized(tape.position()));
        for (position, _) in tape.cells() {
            if let Some(right) = tape.right_of(position) {
                prop_assert_eq!(tape.left_of(right), Some(position));
            }
            if let Some(left) = tape.left_of(position) {
                prop_assert_eq!(tape.right_of(left), Some(position));
            }
        }
        prop_assert_eq!(tape.cells().count(), tape.len());
    }

    #[test]
    fn prop_ones_counter_matches_tape(table in sized_table()) {
        let mut machine = TuringMachine::new(table);

        for _ in 0..300 {
            let outcome = run_with_limit(&mut machine, 1);
            prop_assert_eq!(machine.ones(), machine.tape().count_ones() as i64);
            if outcome != Outcome::LimitReached {
                break;
            }
        }
    }

    #[test]
    fn prop_counters_freeze_after_halt(table in sized_table()) {
        let mut machine = TuringMachine::new(table);

        if run_with_limit(&mut machine, 500) == Outcome::Halted {
            let (ones, transitions) = (machine.ones(), machine.transitions());
            machine.step();
            prop_assert_eq!(machine.ones(), ones);
            prop_assert_eq!(machine.transitions(), transitions);
            prop_assert_eq!(machine.state(), machine.halt_state());
        }
    }
}
