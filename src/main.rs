use std::io;

use anyhow::Context;
use anyhow::bail;
use tracing::info;
use tracing_subscriber::EnvFilter;

use automata::History;
use automata::Simulation;
use automata::SimulationConfig;
use automata::prompt::Prompt;
use automata::prompt::RuleSource;
use automata::terminal;
use automata::terminal::TerminalView;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match std::env::args().nth(1).as_deref() {
        None | Some("elementary") => run_elementary(),
        Some("life") => run_life(),
        Some(other) => bail!("Unknown mode \"{other}\", expected \"elementary\" or \"life\""),
    }
}

fn run_elementary() -> anyhow::Result<()> {
    let mut prompt = Prompt::new(io::stdin().lock(), io::stdout());
    let rule = prompt.rule().context("Failed to get a rule")?;

    let history = History::with_defaults(rule);
    info!(rule = rule.number(), "showing elementary automaton");

    terminal::show_history(&history)
}

fn run_life() -> anyhow::Result<()> {
    let config = SimulationConfig::default();

    let mut view = TerminalView::new(&config)?;
    let simulation = Simulation::new(&config);
    let ticks = simulation.run(&mut view, config.frame_time());

    // Restore the terminal before anything else is printed
    drop(view);

    let ticks = ticks?;
    info!(ticks, "life finished");

    Ok(())
}
