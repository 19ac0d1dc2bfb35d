use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::cell::Cell;

/// Rules of Conway's Game of Life.
pub const B3S23: RuleSet = RuleSet::new(0b1000, 0b1100);

/// Largest neighbor count in a Moore neighborhood.
const MAX_NEIGHBORS: u8 = 8;

/// Birth and survival conditions of a Life-like automaton.
///
/// # Representation
/// Rules are packed into a single word
/// ```notrust
/// |------birth------|
/// 0000_0000_0000_0000_0000_0000_0000_0000
///                     |----survival-----|
/// ```
/// where bit `n` of either half is set when `n` live neighbors cause a birth or let
/// a live cell survive.
///
/// # Examples
/// ```notrust
/// b3s23:                0000_0000_0000_1000_0000_0000_0000_1100
///
/// b0s0:                 0000_0000_0000_0000_0000_0000_0000_0000
/// b012345678s012345678: 0000_0001_1111_1111_0000_0001_1111_1111
/// ```
///
/// See: https://conwaylife.com/wiki/Rulestring
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    rule: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleSetError {
    #[error("Empty rulestring")]
    Empty,

    #[error("Neighbor counts must be between 0 and 8, found '{got}'")]
    InvalidCount { got: char },

    #[error("Unexpected '{got}' in rulestring")]
    UnexpectedChar { got: char },
}

impl Default for RuleSet {
    fn default() -> Self {
        B3S23
    }
}

impl RuleSet {
    /// Create a new `RuleSet` for the given births and survivals. For both `b` and
    /// `s`, bit `i` on means a count of `i` neighbors is in the set. Any bit past the
    /// 8th is ignored.
    pub const fn new(b: u16, s: u16) -> Self {
        let b = b & 0x1FF;
        let s = s & 0x1FF;

        Self {
            rule: (b as u32) << 16 | s as u32,
        }
    }

    pub fn births(&self) -> u16 {
        ((self.rule & 0x1FF0000) >> 0x10) as u16
    }

    pub fn survivals(&self) -> u16 {
        (self.rule & 0x1FF) as u16
    }

    /// Next state of `cell` when it has `neighbors` live neighbors.
    pub fn next(&self, cell: Cell, neighbors: u8) -> Cell {
        debug_assert!(neighbors <= MAX_NEIGHBORS, "a cell has at most 8 neighbors");

        let set = if cell.is_alive() {
            self.survivals()
        } else {
            self.births()
        };

        Cell::from_bit(set & (1 << neighbors) != 0)
    }
}

/// Parses rulestrings like `B3/S23`, `b3s23` or `B36/S23`. Letters are case
/// insensitive and the `/` separator is optional.
impl FromStr for RuleSet {
    type Err = RuleSetError;

    fn from_str(rulestring: &str) -> Result<Self, Self::Err> {
        #[derive(Clone, Copy)]
        enum State {
            Start,
            Birth,
            Survival,
        }

        let rulestring = rulestring.trim();
        if rulestring.is_empty() {
            return Err(RuleSetError::Empty);
        }

        let mut state = State::Start;
        let (mut b, mut s) = (0u16, 0u16);

        for c in rulestring.chars() {
            match (c, state) {
                ('b' | 'B', State::Start) => state = State::Birth,
                ('/', State::Birth) => {}
                ('s' | 'S', State::Birth) => state = State::Survival,
                (n, State::Birth | State::Survival) if n.is_ascii_digit() => {
                    let Some(n) = n.to_digit(10).filter(|&n| n <= MAX_NEIGHBORS as u32) else {
                        return Err(RuleSetError::InvalidCount { got: n });
                    };

                    match state {
                        State::Birth => b |= 1 << n,
                        _ => s |= 1 << n,
                    }
                }
                (got, _) => return Err(RuleSetError::UnexpectedChar { got }),
            }
        }

        Ok(RuleSet::new(b, s))
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = |set: u16| -> String {
            (0..=MAX_NEIGHBORS)
                .filter(|&n| set & (1 << n) != 0)
                .map(|n| char::from(b'0' + n))
                .collect()
        };

        write!(f, "B{}/S{}", digits(self.births()), digits(self.survivals()))
    }
}
