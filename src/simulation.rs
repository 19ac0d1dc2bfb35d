use std::thread;
use std::time::Duration;
use std::time::Instant;

use anyhow::Context;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;
use tracing::info;

use crate::life::Grid;
use crate::rule_set::RuleSet;

/// Cells along each side of the grid
pub const DEFAULT_GRID_SIZE: usize = 50;

/// Side length of a drawn cell, in pixels
pub const DEFAULT_CELL_SIZE: u16 = 10;

/// Number of ticks in a run
pub const DEFAULT_GENERATIONS: usize = 100;

/// Target simulation rate
pub const TICKS_PER_SECOND: u32 = 5;

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub grid_size: usize,

    /// Only used by renderers
    pub cell_size: u16,

    pub generations: usize,

    /// Rate the loop is paced at. `0` runs as fast as possible.
    pub ticks_per_second: u32,

    pub rules: RuleSet,

    /// Seed for the initial grid. Without one, the grid is seeded from entropy.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            cell_size: DEFAULT_CELL_SIZE,
            generations: DEFAULT_GENERATIONS,
            ticks_per_second: TICKS_PER_SECOND,
            rules: RuleSet::default(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Minimum time between the start of two ticks
    pub fn frame_time(&self) -> Duration {
        if self.ticks_per_second == 0 {
            return Duration::ZERO;
        }

        Duration::from_secs(1) / self.ticks_per_second
    }
}

/// What a [`Renderer`] wants the loop to do after drawing a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Consumer of the grids a [`Simulation`] produces.
pub trait Renderer {
    /// Draw the grid produced by tick `tick` (counting from 1).
    fn draw(&mut self, tick: usize, grid: &Grid) -> anyhow::Result<Flow>;
}

impl<F> Renderer for F
where
    F: FnMut(usize, &Grid) -> anyhow::Result<Flow>,
{
    fn draw(&mut self, tick: usize, grid: &Grid) -> anyhow::Result<Flow> {
        self(tick, grid)
    }
}

/// A Life run of a fixed number of ticks.
///
/// Iterating a `Simulation` yields the grid after each tick, and nothing once
/// `generations` ticks have been taken. Only the latest grid is kept.
#[derive(Debug, Clone)]
pub struct Simulation {
    grid: Grid,
    rules: RuleSet,
    tick: usize,
    generations: usize,
}

impl Simulation {
    /// Start a run from a random square grid
    pub fn new(config: &SimulationConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let grid = Grid::random(config.grid_size, config.grid_size, &mut rng);
        debug!(
            size = config.grid_size,
            seed = ?config.seed,
            population = grid.population(),
            "seeded initial grid"
        );

        Self::from_grid(grid, config.rules, config.generations)
    }

    /// Start a run from a given grid
    pub fn from_grid(grid: Grid, rules: RuleSet, generations: usize) -> Self {
        Self {
            grid,
            rules,
            tick: 0,
            generations,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Number of ticks taken so far
    pub fn tick(&self) -> usize {
        self.tick
    }

    pub fn generations(&self) -> usize {
        self.generations
    }

    /// Drive the run to completion, handing every tick to `renderer` and waiting so
    /// that ticks start no closer than `frame_time` apart. Tick `n` is drawn before
    /// tick `n + 1` is computed.
    ///
    /// Returns the number of ticks taken, which is short of `generations` only when
    /// the renderer asked to exit.
    pub fn run<R>(mut self, renderer: &mut R, frame_time: Duration) -> anyhow::Result<usize>
    where
        R: Renderer + ?Sized,
    {
        info!(
            generations = self.generations,
            rules = %self.rules,
            "starting simulation"
        );

        loop {
            let started = Instant::now();

            let Some(grid) = self.next() else { break };

            let flow = renderer
                .draw(self.tick, &grid)
                .with_context(|| format!("Failed to draw tick {}", self.tick))?;

            if flow == Flow::Exit {
                info!(tick = self.tick, "renderer requested exit");
                break;
            }

            let time_left = frame_time.saturating_sub(started.elapsed());
            if !time_left.is_zero() {
                thread::sleep(time_left);
            }
        }

        info!(ticks = self.tick, "simulation finished");

        Ok(self.tick)
    }
}

impl Iterator for Simulation {
    type Item = Grid;

    fn next(&mut self) -> Option<Grid> {
        if self.tick >= self.generations {
            return None;
        }

        self.grid = self.grid.step_with(&self.rules);
        self.tick += 1;

        Some(self.grid.clone())
    }
}
