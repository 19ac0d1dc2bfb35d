use std::fmt;
use std::str::FromStr;

use rand::Rng;
use thiserror::Error;

use crate::cell::Cell;
use crate::rule_set::B3S23;
use crate::rule_set::RuleSet;

/// Chance that a cell of a random grid starts out alive
pub const ALIVE_PROBABILITY: f64 = 0.5;

/// A fixed size, row major grid of Life cells.
///
/// Edges do not wrap: cells along the border simply have fewer neighbors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("Pattern has no cells")]
    Empty,

    #[error("Unrecognized cell '{got}' on line {line}")]
    UnknownCell { line: usize, got: char },

    #[error("A {rows}x{cols} pattern at ({top}, {left}) does not fit in a {grid_rows}x{grid_cols} grid")]
    OutOfBounds {
        rows: usize,
        cols: usize,
        top: usize,
        left: usize,
        grid_rows: usize,
        grid_cols: usize,
    },
}

impl Grid {
    /// Create an all dead grid
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Dead; rows * cols],
        }
    }

    /// Create a grid where every cell is independently alive with [`ALIVE_PROBABILITY`]
    pub fn random<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Self {
        let cells = (0..rows * cols)
            .map(|_| Cell::from(rng.gen_bool(ALIVE_PROBABILITY)))
            .collect();

        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn row(&self, r: usize) -> &[Cell] {
        &self.cells[r * self.cols..(r + 1) * self.cols]
    }

    pub fn get(&self, r: usize, c: usize) -> Cell {
        assert!(r < self.rows && c < self.cols, "({r}, {c}) is out of bounds");

        self.cells[self.at(r, c)]
    }

    pub fn set(&mut self, r: usize, c: usize, cell: Cell) {
        assert!(r < self.rows && c < self.cols, "({r}, {c}) is out of bounds");

        let i = self.at(r, c);
        self.cells[i] = cell;
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Copy every cell of `pattern` into this grid with its top left corner at
    /// `(top, left)`.
    pub fn place(&mut self, pattern: &Grid, top: usize, left: usize) -> Result<(), GridError> {
        if top + pattern.rows > self.rows || left + pattern.cols > self.cols {
            return Err(GridError::OutOfBounds {
                rows: pattern.rows,
                cols: pattern.cols,
                top,
                left,
                grid_rows: self.rows,
                grid_cols: self.cols,
            });
        }

        for r in 0..pattern.rows {
            let start = self.at(top + r, left);
            self.cells[start..start + pattern.cols].copy_from_slice(pattern.row(r));
        }

        Ok(())
    }

    /// Count the live cells in the Moore neighborhood of `(r, c)`, clipped to the grid.
    pub fn neighbors(&self, r: usize, c: usize) -> u8 {
        let rs = r.saturating_sub(1)..=(r + 1).min(self.rows - 1);
        let cs = c.saturating_sub(1)..=(c + 1).min(self.cols - 1);

        let mut n = 0;
        for y in rs {
            for x in cs.clone() {
                n += self.cells[self.at(y, x)].bit();
            }
        }

        n - self.cells[self.at(r, c)].bit()
    }

    /// Advance one generation under Conway's rules
    pub fn step(&self) -> Grid {
        self.step_with(&B3S23)
    }

    /// Advance one generation under `rules`.
    ///
    /// The result is a new grid; every cell is computed from this one, so no cell ever
    /// sees a neighbor that has already been updated.
    pub fn step_with(&self, rules: &RuleSet) -> Grid {
        let cells = (0..self.rows)
            .flat_map(|r| (0..self.cols).map(move |c| (r, c)))
            .map(|(r, c)| rules.next(self.get(r, c), self.neighbors(r, c)))
            .collect();

        Grid {
            rows: self.rows,
            cols: self.cols,
            cells,
        }
    }

    fn at(&self, r: usize, c: usize) -> usize {
        r * self.cols + c
    }
}

/// Parses plaintext patterns: one line per row, `.` for dead cells and any of `O`, `o`,
/// `#` or `*` for live ones. Lines starting with `!` are comments. Rows may leave out
/// trailing dead cells; every row is padded to the widest one.
///
/// See: https://conwaylife.com/wiki/Plaintext
impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines: Vec<Vec<Cell>> = Vec::new();

        for (i, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('!') {
                continue;
            }

            let row: Vec<Cell> = line
                .chars()
                .map(|c| match c {
                    '.' => Ok(Cell::Dead),
                    'O' | 'o' | '#' | '*' => Ok(Cell::Alive),
                    got => Err(GridError::UnknownCell { line: i + 1, got }),
                })
                .collect::<Result<_, _>>()?;

            lines.push(row);
        }

        let Some(cols) = lines.iter().map(Vec::len).max() else {
            return Err(GridError::Empty);
        };

        let rows = lines.len();
        let mut cells = Vec::with_capacity(rows * cols);
        for mut row in lines {
            row.resize(cols, Cell::Dead);
            cells.append(&mut row);
        }

        Ok(Self { rows, cols, cells })
    }
}

/// One line per row, `#` for live cells and `.` for dead ones.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            for cell in self.row(r) {
                let c = if cell.is_alive() { '#' } else { '.' };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn pattern(s: &str) -> Grid {
        s.parse().unwrap()
    }

    #[test]
    fn parse_and_print() {
        let glider = pattern(
            "!Name: Glider
             .O.
             ..O
             OOO",
        );

        assert_eq!((glider.rows(), glider.cols()), (3, 3));
        assert_eq!(glider.population(), 5);
        insta::assert_snapshot!(glider.to_string(), @r"
        .#.
        ..#
        ###
        ");
    }

    #[test]
    fn reject_bad_patterns() {
        assert_eq!("".parse::<Grid>(), Err(GridError::Empty));
        assert_eq!("! only a comment".parse::<Grid>(), Err(GridError::Empty));
        assert_eq!(
            "..\n.x".parse::<Grid>(),
            Err(GridError::UnknownCell { line: 2, got: 'x' })
        );
    }

    #[test]
    fn short_rows_are_padded() {
        let grid = pattern(".O\nO.O\n\n! trailing comment\nO");

        assert_eq!((grid.rows(), grid.cols()), (3, 3));
        insta::assert_snapshot!(grid.to_string(), @r"
        .#.
        #.#
        #..
        ");
    }

    #[test]
    fn neighbors_are_clipped_at_edges() {
        let full = pattern("OOO\nOOO\nOOO");

        assert_eq!(full.neighbors(1, 1), 8);
        assert_eq!(full.neighbors(0, 0), 3);
        assert_eq!(full.neighbors(0, 1), 5);
        assert_eq!(full.neighbors(2, 2), 3);
    }

    #[test]
    fn neighbors_exclude_self() {
        let lone = pattern("...\n.O.\n...");

        assert_eq!(lone.neighbors(1, 1), 0);
        assert_eq!(lone.neighbors(0, 0), 1);
    }

    #[test]
    fn single_row_and_column_grids() {
        let row = pattern("OOO");
        assert_eq!(row.neighbors(0, 1), 2);
        assert_eq!(row.step().to_string(), ".#.\n");

        let col = pattern("O\nO\nO");
        assert_eq!(col.step().to_string(), ".\n#\n.\n");
    }

    #[test]
    fn crowded_block_keeps_only_corners() {
        // Corners have 3 neighbors, edges 5 and the center 8
        let next = pattern("OOO\nOOO\nOOO").step();

        insta::assert_snapshot!(next.to_string(), @r"
        #.#
        ...
        #.#
        ");
    }

    #[test]
    fn update_is_synchronous() {
        // Updating in place would let the birth at (0, 1) change the count at (1, 0)
        let next = pattern("...\nOOO\n...").step();

        assert_eq!(next, pattern(".O.\n.O.\n.O."));
    }

    #[test]
    fn place_pattern() {
        let mut grid = Grid::new(4, 5);
        grid.place(&pattern("OO\nO."), 1, 2).unwrap();

        insta::assert_snapshot!(grid.to_string(), @r"
        .....
        ..##.
        ..#..
        .....
        ");

        assert_eq!(
            grid.place(&pattern("OO"), 3, 4),
            Err(GridError::OutOfBounds {
                rows: 1,
                cols: 2,
                top: 3,
                left: 4,
                grid_rows: 4,
                grid_cols: 5,
            })
        );
    }

    #[test]
    fn random_grid_is_reproducible() {
        let a = Grid::random(16, 16, &mut StdRng::seed_from_u64(7));
        let b = Grid::random(16, 16, &mut StdRng::seed_from_u64(7));

        assert_eq!(a, b);
        assert_eq!(a.cells().len(), 256);

        // 256 fair coin flips landing outside this range is vanishingly unlikely
        assert!((64..=192).contains(&a.population()));
    }

    #[test]
    fn custom_rules() {
        // B1/S: every dead cell touching a live one is born, every live cell dies
        let rules: RuleSet = "B1/S".parse().unwrap();
        let next = pattern("...\n.O.\n...").step_with(&rules);

        assert_eq!(next, pattern("OOO\nO.O\nOOO"));
    }
}
