//! Built-in catalog of busy beaver champions, one per state count, with their machine
//! numbers, standard-format tables, and known scores.

use crate::encoder::{decode, parse_number};
use crate::table::TransitionTable;
use crate::types::MachineError;
use num_bigint::BigInt;

/// A known champion machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Champion {
    pub states: usize,
    /// Machine number in base 10.
    pub number: &'static str,
    /// Standard-format table.
    pub standard: &'static str,
    /// Σ, the ones left on the tape at halt, when known.
    pub ones: Option<u64>,
    /// S, the transitions executed until halt, when known.
    pub steps: Option<u64>,
}

impl Champion {
    /// Parses the machine number.
    pub fn machine_number(&self) -> Result<BigInt, MachineError> {
        parse_number(self.number)
    }

    /// Decodes the machine number into its transition table.
    pub fn table(&self) -> Result<TransitionTable, MachineError> {
        decode(&self.machine_number()?, self.states)
    }
}

lazy_static::lazy_static! {
    pub static ref CHAMPIONS: Vec<Champion> = vec![
        Champion {
            states: 1,
            number: "56",
            standard: "1RB0LA",
            ones: Some(1),
            steps: Some(1),
        },
        Champion {
            states: 2,
            number: "18371",
            standard: "1RB1LB_1LA1RC",
            ones: Some(4),
            steps: Some(6),
        },
        Champion {
            states: 3,
            number: "14642600",
            standard: "1RB1RD_0RC1RB_1LC1LA",
            ones: Some(6),
            steps: Some(14),
        },
        Champion {
            states: 4,
            number: "21216477565",
            standard: "1RB1LB_1LA0LC_1RE1LD_1RD0RA",
            ones: Some(13),
            steps: Some(107),
        },
        Champion {
            states: 5,
            number: "51830926765032",
            standard: "1RB1LC_1RC1RB_1RD0LE_1LA1LD_1RF0LA",
            ones: Some(4098),
            steps: Some(47_176_870),
        },
        Champion {
            states: 6,
            number: "183593859414557127",
            standard: "1RB0LD_1RC0RF_1LC1LA_0LE1RG_1LF0RB_0RC0RE",
            ones: None,
            steps: None,
        },
    ];
}

pub struct ProgramManager;

impl ProgramManager {
    /// All champions, ordered by state count.
    pub fn list() -> &'static [Champion] {
        CHAMPIONS.as_slice()
    }

    /// The champion for `states` states.
    pub fn by_states(states: usize) -> Result<&'static Champion, MachineError> {
        CHAMPIONS
            .iter()
            .find(|champion| champion.states == states)
            .ok_or_else(|| {
                MachineError::ValidationError(format!("No champion known for {} states", states))
            })
    }

    /// Finds the champion whose standard-format table equals `table`.
    pub fn find(table: &TransitionTable) -> Option<&'static Champion> {
        let standard = table.to_string();
        CHAMPIONS
            .iter()
            .find(|champion| champion.standard == standard)
    }
}
