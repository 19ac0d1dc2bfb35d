use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::cell::Cell;
use crate::rule::Rule;
use crate::rule::RuleTable;

/// Number of cells in a generation unless told otherwise
pub const DEFAULT_SIZE: usize = 100;

/// Number of generations in a history unless told otherwise
pub const DEFAULT_GENERATIONS: usize = 50;

/// One row of an elementary automaton.
pub type Generation = Vec<Cell>;

/// Compute the generation following `current`.
///
/// Every interior cell looks up its `(left, self, right)` neighborhood in `table`. The
/// first and last cells have no complete neighborhood and are never written, so they
/// are always dead in the result. Generations shorter than 3 cells come back all dead.
pub fn step(current: &[Cell], table: &RuleTable) -> Generation {
    let mut next = vec![Cell::Dead; current.len()];

    for (i, nbhd) in current.windows(3).enumerate() {
        next[i + 1] = table.next(nbhd[0], nbhd[1], nbhd[2]);
    }

    next
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistoryError {
    #[error("A history needs at least one cell per generation")]
    ZeroSize,

    #[error("A history needs at least one generation")]
    ZeroGenerations,
}

/// Every generation of an elementary automaton grown from a single live cell.
///
/// Row `0` is the seed, dead everywhere except at `size / 2`. Row `g` is [`step`]
/// applied to row `g - 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    rule: Rule,
    size: usize,
    rows: Vec<Generation>,
}

impl History {
    pub fn build(rule: Rule, size: usize, generations: usize) -> Result<Self, HistoryError> {
        if size == 0 {
            return Err(HistoryError::ZeroSize);
        }

        if generations == 0 {
            return Err(HistoryError::ZeroGenerations);
        }

        Ok(Self::grow(rule, size, generations))
    }

    /// Build a history of [`DEFAULT_GENERATIONS`] rows of [`DEFAULT_SIZE`] cells
    pub fn with_defaults(rule: Rule) -> Self {
        Self::grow(rule, DEFAULT_SIZE, DEFAULT_GENERATIONS)
    }

    // Both dimensions are non-zero here
    fn grow(rule: Rule, size: usize, generations: usize) -> Self {
        let table = rule.table();

        let mut seed = vec![Cell::Dead; size];
        seed[size / 2] = Cell::Alive;

        let mut rows = Vec::with_capacity(generations);
        rows.push(seed);

        for g in 1..generations {
            let next = step(&rows[g - 1], &table);
            rows.push(next);
        }

        debug!(rule = rule.number(), size, generations, "built elementary history");

        Self { rule, size, rows }
    }

    pub fn rule(&self) -> Rule {
        self.rule
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn generations(&self) -> usize {
        self.rows.len()
    }

    /// `(generations, size)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.size)
    }

    pub fn rows(&self) -> &[Generation] {
        &self.rows
    }

    pub fn row(&self, generation: usize) -> Option<&[Cell]> {
        self.rows.get(generation).map(Vec::as_slice)
    }

    /// State of cell `i` in generation `g`. Out of range positions read as dead.
    pub fn get(&self, g: usize, i: usize) -> Cell {
        self.rows
            .get(g)
            .and_then(|row| row.get(i))
            .copied()
            .unwrap_or_default()
    }
}

/// One line per generation, `#` for live cells and `.` for dead ones.
impl fmt::Display for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for cell in row {
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
    use proptest::prelude::*;

    use super::*;
    use crate::cell::Cell::Alive as A;
    use crate::cell::Cell::Dead as D;
    use crate::rule::decode;

    fn cells(bits: &[u8]) -> Generation {
        bits.iter().map(|&b| Cell::from(b == 1)).collect()
    }

    #[test]
    fn rule_4_keeps_lone_cell() {
        let next = step(&[D, A, D], &decode(4));
        assert_eq!(next, vec![D, A, D]);
    }

    #[test]
    fn short_generations_are_dead() {
        let table = decode(255);

        assert_eq!(step(&[], &table), Vec::<Cell>::new());
        assert_eq!(step(&[A], &table), vec![D]);
        assert_eq!(step(&[A, A], &table), vec![D, D]);
    }

    #[test]
    fn boundary_stays_dead_even_for_rule_255() {
        let next = step(&[A, A, A, A, A], &decode(255));
        assert_eq!(next, vec![D, A, A, A, D]);
    }

    #[test]
    fn rule_30_from_single_cell() {
        let table = decode(30);
        let g0 = cells(&[0, 0, 0, 1, 0, 0, 0]);
        let g1 = step(&g0, &table);
        let g2 = step(&g1, &table);

        assert_eq!(g1, cells(&[0, 0, 1, 1, 1, 0, 0]));
        assert_eq!(g2, cells(&[0, 1, 1, 0, 0, 1, 0]));
    }

    #[test]
    fn seed_sits_right_of_center_for_even_sizes() {
        let history = History::build(Rule::new(0), 4, 1).unwrap();
        assert_eq!(history.row(0), Some(&[D, D, A, D][..]));
    }

    #[test]
    fn single_cell_history() {
        let history = History::build(Rule::new(255), 1, 3).unwrap();
        assert_eq!(history.rows(), &[vec![A], vec![D], vec![D]]);
    }

    #[test]
    fn reject_empty_dimensions() {
        assert_eq!(
            History::build(Rule::new(30), 0, 10),
            Err(HistoryError::ZeroSize)
        );
        assert_eq!(
            History::build(Rule::new(30), 10, 0),
            Err(HistoryError::ZeroGenerations)
        );
    }

    #[test]
    fn defaults() {
        let history = History::with_defaults(Rule::new(110));
        assert_eq!(history.shape(), (DEFAULT_GENERATIONS, DEFAULT_SIZE));
        assert_eq!(history.get(0, DEFAULT_SIZE / 2), A);
        assert_eq!(history.get(DEFAULT_GENERATIONS, 0), D);
    }

    #[test]
    fn rule_90_text() {
        let history = History::build(Rule::new(90), 9, 5).unwrap();

        insta::assert_snapshot!(history.to_string(), @r"
        ....#....
        ...#.#...
        ..#...#..
        .#.#.#.#.
        .........
        ");
    }

    fn generation() -> impl Strategy<Value = Generation> {
        prop::collection::vec(any::<bool>().prop_map(Cell::from_bit), 0..64)
    }

    proptest! {
        #[test]
        fn rule_0_kills_everything(current in generation()) {
            let next = step(&current, &decode(0));
            prop_assert!(next.iter().all(|c| !c.is_alive()));
        }

        #[test]
        fn boundaries_are_always_dead(current in generation(), rule in any::<u8>()) {
            let next = step(&current, &decode(rule));

            prop_assert_eq!(next.len(), current.len());
            if let (Some(first), Some(last)) = (next.first(), next.last()) {
                prop_assert_eq!(*first, D);
                prop_assert_eq!(*last, D);
            }
        }

        #[test]
        fn history_shape_and_seed(rule in any::<u8>(), size in 1usize..128, generations in 1usize..32) {
            let history = History::build(Rule::new(rule), size, generations).unwrap();
            prop_assert_eq!(history.shape(), (generations, size));

            let seed = history.row(0).unwrap();
            let live: Vec<usize> = (0..size).filter(|&i| seed[i].is_alive()).collect();
            prop_assert_eq!(live, vec![size / 2]);
        }
    }
}
