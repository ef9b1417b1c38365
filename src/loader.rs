//! This module provides the `ProgramLoader` struct, responsible for loading lists of machines
//! from files and strings. Each line holds either a machine number or a standard-format table.

use crate::encoder::{decode, parse_number};
use crate::parser::{parse, parse_with_states};
use crate::table::TransitionTable;
use crate::types::MachineError;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// One loaded line: its 1-based line number and the decoded table, or the error for that line.
pub type LoadedMachine = Result<(usize, TransitionTable), MachineError>;

/// `ProgramLoader` is a utility struct for loading machine lists.
///
/// Blank lines and lines starting with `#` are skipped. A line made only of digits is a
/// machine number and needs a state count; any other line is parsed as standard format and,
/// when a state count is given, must have that many rows.
pub struct ProgramLoader;

impl ProgramLoader {
    /// Loads every machine listed in the file at `path`.
    ///
    /// # Returns
    ///
    /// * `Err(MachineError::FileError)` if the file cannot be read.
    /// * `Ok(results)` with one entry per machine line otherwise; a bad line yields an `Err`
    ///   entry without affecting the others.
    pub fn load_machines(
        path: &Path,
        states: Option<usize>,
    ) -> Result<Vec<LoadedMachine>, MachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            MachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        debug!(path = %path.display(), "loading machine list");
        Ok(Self::load_from_string(&content, states))
    }

    /// Loads every machine listed in `content`.
    pub fn load_from_string(content: &str, states: Option<usize>) -> Vec<LoadedMachine> {
        content
            .lines()
            .enumerate()
            .filter_map(|(index, line)| {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    return None;
                }

                let line_number = index + 1;
                let result = Self::load_line(line, states).map(|table| (line_number, table));
                if let Err(e) = &result {
                    warn!(line = line_number, error = %e, "skipping machine");
                }

                Some(result)
            })
            .collect()
    }

    /// Loads a single machine from a machine number or a standard-format table.
    pub fn load_line(line: &str, states: Option<usize>) -> Result<TransitionTable, MachineError> {
        let line = line.trim();

        if line.bytes().all(|b| b.is_ascii_digit()) {
            let states = states.ok_or_else(|| {
                MachineError::ValidationError(format!(
                    "Machine number {} needs a state count",
                    line
                ))
            })?;
            return decode(&parse_number(line)?, states);
        }

        match states {
            Some(states) => parse_with_states(line, states),
            None => parse(line),
        }
    }
}
