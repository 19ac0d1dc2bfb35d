use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::cell::Cell;

/// Number of distinct 3-cell neighborhoods, and so the length of a [`RuleTable`].
pub const NEIGHBORHOODS: usize = 8;

/// An elementary automaton rule number.
///
/// Every `u8` is a valid rule, so range checking happens once, when text or a wider
/// integer is turned into a `Rule`.
///
/// See: https://mathworld.wolfram.com/ElementaryCellularAutomaton.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rule(u8);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("Rule {got} is out of range, expected a number between 0 and 255")]
    OutOfRange { got: i64 },

    #[error("Expected a rule number, found \"{input}\"")]
    NotANumber { input: String },
}

impl Rule {
    pub const fn new(number: u8) -> Self {
        Self(number)
    }

    pub const fn number(self) -> u8 {
        self.0
    }

    /// Decode this rule into its transition table
    pub fn table(self) -> RuleTable {
        decode(self.0)
    }
}

impl From<u8> for Rule {
    fn from(number: u8) -> Self {
        Self(number)
    }
}

impl TryFrom<i64> for Rule {
    type Error = RuleError;

    fn try_from(n: i64) -> Result<Self, Self::Error> {
        u8::try_from(n)
            .map(Rule)
            .map_err(|_| RuleError::OutOfRange { got: n })
    }
}

impl FromStr for Rule {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        let Ok(n) = s.parse::<i64>() else {
            return Err(RuleError::NotANumber {
                input: s.to_string(),
            });
        };

        Rule::try_from(n)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Transition table of an elementary rule.
///
/// Entries are stored most significant bit first, so entry `0` is the next state for
/// the pattern `111` and entry `7` the next state for `000`. Looking up the pattern
/// with value `v` therefore reads entry `7 - v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleTable([Cell; NEIGHBORHOODS]);

/// Expand `rule` into its 8 transition bits, most significant bit first.
pub fn decode(rule: u8) -> RuleTable {
    let mut entries = [Cell::Dead; NEIGHBORHOODS];

    for (i, entry) in entries.iter_mut().enumerate() {
        let shift = NEIGHBORHOODS - 1 - i;
        *entry = Cell::from_bit((rule >> shift) & 1 == 1);
    }

    RuleTable(entries)
}

impl RuleTable {
    pub fn entries(&self) -> &[Cell; NEIGHBORHOODS] {
        &self.0
    }

    /// Next state of a cell given its left neighbor, itself and its right neighbor.
    pub fn next(&self, left: Cell, center: Cell, right: Cell) -> Cell {
        let v = (left.bit() << 2) | (center.bit() << 1) | right.bit();

        self.0[NEIGHBORHOODS - 1 - v as usize]
    }

    /// Reassemble the table into its rule number, reading entries as big endian bits.
    pub fn number(&self) -> u8 {
        self.0.iter().fold(0, |n, cell| (n << 1) | cell.bit())
    }
}
