use std::thread;
use std::time::Duration;

use automata::Grid;
use automata::RuleSet;
use automata::Simulation;

const GLIDER: &str = "\
.O.
..O
OOO";

fn main() -> anyhow::Result<()> {
    let mut grid = Grid::new(12, 12);
    grid.place(&GLIDER.parse()?, 0, 0)?;

    let simulation = Simulation::from_grid(grid, RuleSet::default(), 36);

    for (tick, grid) in simulation.enumerate() {
        println!("tick {}", tick + 1);
        println!("{grid}");
        thread::sleep(Duration::from_millis(100));
    }

    Ok(())
}
