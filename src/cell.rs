/// State of a single automaton cell.
///
/// Cells are always exactly dead (`0`) or alive (`1`); the numeric value is what the
/// rule lookups and neighbor sums operate on.
#[repr(u8)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl Cell {
    /// The cell as a `0` or `1` bit
    pub const fn bit(self) -> u8 {
        self as u8
    }

    pub const fn is_alive(self) -> bool {
        matches!(self, Cell::Alive)
    }

    pub const fn from_bit(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        Cell::from_bit(alive)
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> Self {
        cell.bit()
    }
}
