//! This module provides the unbounded two-way binary tape.
//!
//! Cells are materialized lazily the first time the head visits them and are kept for the
//! rest of the run. Non-negative positions live in `right`, negative positions in `left`
//! (position `-1` at index 0), and the head is a plain signed offset.

use crate::types::Symbol;
use std::fmt;
use std::ops::RangeInclusive;

/// An unbounded tape of `Symbol`s with a single read/write head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    right: Vec<Symbol>,
    left: Vec<Symbol>,
    head: i64,
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

impl Tape {
    /// Creates a tape holding a single `Zero` cell under the head at position 0.
    pub fn new() -> Self {
        Self {
            right: vec![Symbol::Zero],
            left: Vec::new(),
            head: 0,
        }
    }

    /// Returns the symbol under the head.
    pub fn read(&self) -> Symbol {
        self.get(self.head).unwrap_or_default()
    }

    /// Writes `symbol` under the head.
    pub fn write(&mut self, symbol: Symbol) {
        if let Some(cell) = self.cell_mut(self.head) {
            *cell = symbol;
        }
    }

    /// Moves the head one cell to the left, materializing a `Zero` cell if needed.
    pub fn move_left(&mut self) -> &mut Self {
        self.head -= 1;
        if self.head < 0 && self.left.len() < self.head.unsigned_abs() as usize {
            self.left.push(Symbol::Zero);
        }
        self
    }

    /// Moves the head one cell to the right, materializing a `Zero` cell if needed.
    pub fn move_right(&mut self) -> &mut Self {
        self.head += 1;
        if self.head >= 0 && self.right.len() <= self.head as usize {
            self.right.push(Symbol::Zero);
        }
        self
    }

    /// Position of the head relative to the starting cell.
    pub fn position(&self) -> i64 {
        self.head
    }

    /// Number of materialized cells.
    pub fn len(&self) -> usize {
        self.left.len() + self.right.len()
    }

    /// A tape always holds at least the starting cell.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Leftmost and rightmost materialized positions.
    pub fn bounds(&self) -> RangeInclusive<i64> {
        let low = -(self.left.len() as i64);
        let high = self.right.len() as i64 - 1;
        low..=high
    }

    /// Returns `true` if the cell at `position` has been visited.
    pub fn is_materialized(&self, position: i64) -> bool {
        self.bounds().contains(&position)
    }

    /// Symbol at `position`, or `None` if that cell was never visited.
    pub fn get(&self, position: i64) -> Option<Symbol> {
        if position >= 0 {
            self.right.get(position as usize).copied()
        } else {
            self.left.get((-position - 1) as usize).copied()
        }
    }

    /// The materialized left neighbor of the cell at `position`.
    pub fn left_of(&self, position: i64) -> Option<i64> {
        (self.is_materialized(position) && self.is_materialized(position - 1))
            .then_some(position - 1)
    }

    /// The materialized right neighbor of the cell at `position`.
    pub fn right_of(&self, position: i64) -> Option<i64> {
        (self.is_materialized(position) && self.is_materialized(position + 1))
            .then_some(position + 1)
    }

    /// Iterates over materialized cells from left to right.
    pub fn cells(&self) -> impl Iterator<Item = (i64, Symbol)> + '_ {
        self.bounds().filter_map(|p| self.get(p).map(|s| (p, s)))
    }

    /// Counts the cells currently holding `One`.
    pub fn count_ones(&self) -> usize {
        self.left
            .iter()
            .chain(self.right.iter())
            .filter(|&&s| s == Symbol::One)
            .count()
    }

    fn cell_mut(&mut self, position: i64) -> Option<&mut Symbol> {
        if position >= 0 {
            self.right.get_mut(position as usize)
        } else {
            self.left.get_mut((-position - 1) as usize)
        }
    }
}

/// Renders the materialized cells with the head cell in brackets, e.g. `1 1 [1] 1`.
impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells = self
            .cells()
            .map(|(p, s)| {
                if p == self.head {
                    format!("[{s}]")
                } else {
                    s.to_string()
                }
            })
            .collect::<Vec<_>>();

        f.write_str(&cells.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_links_consistent(tape: &Tape) {
        for (position, _) in tape.cells() {
            if let Some(right) = tape.right_of(position) {
                assert_eq!(tape.left_of(right), Some(position));
            }
            if let Some(left) = tape.left_of(position) {
                assert_eq!(tape.right_of(left), Some(position));
            }
        }
    }

    #[test]
    fn test_new_tape() {
        let tape = Tape::new();

        assert_eq!(tape.read(), Symbol::Zero);
        assert_eq!(tape.position(), 0);
        assert_eq!(tape.len(), 1);
        assert_eq!(tape.bounds(), 0..=0);
        assert_eq!(tape.left_of(0), None);
        assert_eq!(tape.right_of(0), None);
    }

    #[test]
    fn test_write_and_read() {
        let mut tape = Tape::new();
        tape.write(Symbol::One);

        assert_eq!(tape.read(), Symbol::One);
        assert_eq!(tape.count_ones(), 1);
    }

    #[test]
    fn test_moves_materialize_zero_cells() {
        let mut tape = Tape::new();
        tape.write(Symbol::One);

        tape.move_left();
        assert_eq!(tape.position(), -1);
        assert_eq!(tape.read(), Symbol::Zero);
        assert_eq!(tape.len(), 2);

        tape.move_right().move_right();
        assert_eq!(tape.position(), 1);
        assert_eq!(tape.read(), Symbol::Zero);
        assert_eq!(tape.len(), 3);
        assert_eq!(tape.get(0), Some(Symbol::One));
    }

    #[test]
    fn test_revisiting_does_not_grow() {
        let mut tape = Tape::new();
        for _ in 0..5 {
            tape.move_right();
        }
        for _ in 0..5 {
            tape.move_left();
        }

        assert_eq!(tape.position(), 0);
        assert_eq!(tape.len(), 6);
    }

    #[test]
    fn test_chained_writes() {
        let mut tape = Tape::new();
        tape.move_left().write(Symbol::One);
        tape.move_left().move_left().write(Symbol::One);

        assert_eq!(tape.to_string(), "[1] 0 1 0");
        assert_eq!(tape.bounds(), -3..=0);
        assert_eq!(tape.count_ones(), 2);
    }

    #[test]
    fn test_cells_left_to_right() {
        let mut tape = Tape::new();
        tape.write(Symbol::One);
        tape.move_right().write(Symbol::One);
        tape.move_left().move_left();

        let cells: Vec<_> = tape.cells().collect();
        assert_eq!(
            cells,
            vec![(-1, Symbol::Zero), (0, Symbol::One), (1, Symbol::One)]
        );
        assert!(!tape.is_materialized(2));
        assert_eq!(tape.get(-2), None);
    }

    #[test]
    fn test_neighbor_symmetry() {
        let mut tape = Tape::new();
        let moves = [true, true, false, false, false, false, true, false, false];
        for right in moves {
            if right {
                tape.move_right();
            } else {
                tape.move_left();
            }
            assert_links_consistent(&tape);
        }

        assert_eq!(tape.position(), -3);
        assert_eq!(tape.bounds(), -3..=2);
        assert_eq!(tape.left_of(-3), None);
        assert_eq!(tape.right_of(2), None);
    }
}
