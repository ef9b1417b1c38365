//! Step-budgeted execution on top of [`TuringMachine::step`], and a sequential scan over a
//! range of machine numbers.
//!
//! `TuringMachine::run` never gives up on a machine; hosts that try many machines use
//! `run_with_limit` instead and decide what to do with machines that exhaust their budget.

use crate::encoder::decode_unsigned;
use crate::machine::TuringMachine;
use crate::types::{Halt, MachineError, RunReport, Step};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How a budgeted run ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// Entered the halting state within the budget.
    Halted,
    /// Hit an undefined transition.
    Invalid,
    /// Still running after the budget was spent.
    LimitReached,
}

/// Steps `machine` until it halts or `limit` more transitions have been executed.
pub fn run_with_limit(machine: &mut TuringMachine, limit: u64) -> Outcome {
    let mut budget = limit;

    loop {
        if machine.is_halted() {
            return outcome_of(machine.step());
        }
        if budget == 0 {
            return Outcome::LimitReached;
        }

        budget -= 1;
        match machine.step() {
            Step::Continue => {}
            halt => return outcome_of(halt),
        }
    }
}

fn outcome_of(step: Step) -> Outcome {
    match step {
        Step::Halt(Halt::Ok) => Outcome::Halted,
        Step::Halt(Halt::Err(_)) => Outcome::Invalid,
        Step::Continue => Outcome::LimitReached,
    }
}

/// Iterator over consecutive machine numbers, running each one with a step budget.
///
/// Created by [`scan`].
pub struct Scan {
    states: usize,
    next: BigUint,
    remaining: u64,
    limit: u64,
}

/// Runs `count` machines of `states` states, starting at machine number `start`, each
/// for at most `limit` transitions.
pub fn scan(states: usize, start: BigUint, count: u64, limit: u64) -> Result<Scan, MachineError> {
    if states == 0 {
        return Err(MachineError::InvalidArgument(
            "State count must be positive".to_string(),
        ));
    }

    debug!(states, %start, count, limit, "starting scan");
    Ok(Scan {
        states,
        next: start,
        remaining: count,
        limit,
    })
}

impl Iterator for Scan {
    type Item = (RunReport, Outcome);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let table = decode_unsigned(&self.next, self.states).ok()?;
        let number = self.next.to_string();
        self.next += 1u32;

        let mut machine = TuringMachine::new(table);
        let outcome = run_with_limit(&mut machine, self.limit);

        let mut report = machine.report();
        report.number = Some(number);
        Some((report, outcome))
    }
}
