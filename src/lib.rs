pub mod cell;
pub mod elementary;
pub mod life;
pub mod prompt;
pub mod render;
pub mod rule;
pub mod rule_set;
pub mod simulation;
pub mod terminal;

pub use cell::Cell;
pub use elementary::History;
pub use life::Grid;
pub use rule::Rule;
pub use rule_set::RuleSet;
pub use simulation::Simulation;
pub use simulation::SimulationConfig;
