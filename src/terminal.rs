use std::io;
use std::io::Write;
use std::time::Duration;

use anyhow::Context;
use crossterm::cursor;
use crossterm::event;
use crossterm::event::Event as CtEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;
use tracing::debug;
use tracing::warn;

use crate::elementary::History;
use crate::life::Grid;
use crate::render;
use crate::render::Canvas;
use crate::rule::Rule;
use crate::simulation::Flow;
use crate::simulation::Renderer;
use crate::simulation::SimulationConfig;

/// How many pixels of a cell's configured size one braille dot stands for
pub const PIXELS_PER_DOT: u16 = 5;

/// Title shown above an elementary history
pub fn title(rule: Rule) -> String {
    format!("1D Cellular Automaton - Rule {}", rule.number())
}

/// Side length, in dots, of a cell drawn `cell_size` pixels wide
pub fn dots_per_cell(cell_size: u16) -> usize {
    cell_size.div_ceil(PIXELS_PER_DOT).max(1) as usize
}

/// Terminal size, as `(columns, rows)`, needed to show a whole grid of `config` plus
/// the status line below it
pub fn required_size(config: &SimulationConfig) -> (usize, usize) {
    let side = config.grid_size * dots_per_cell(config.cell_size);
    (side.div_ceil(2), side.div_ceil(4) + 1)
}

/// Print `history` under its title to `out`
pub fn write_history<W: Write>(out: &mut W, history: &History) -> io::Result<()> {
    let mut canvas = render::history_canvas(history);

    writeln!(out, "{}", title(history.rule()))?;
    write!(out, "{}", canvas.render())?;
    out.flush()
}

/// Print `history` to stdout
pub fn show_history(history: &History) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    write_history(&mut stdout, history).context("Failed to print history")
}

/// Map a terminal event to what the simulation should do next
pub fn convert_event(event: CtEvent) -> Option<Flow> {
    match event {
        CtEvent::Key(KeyEvent {
            kind: KeyEventKind::Release,
            ..
        }) => None,
        CtEvent::Key(
            KeyEvent {
                code: KeyCode::Char('q') | KeyCode::Esc,
                ..
            }
            | KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            },
        ) => Some(Flow::Exit),
        CtEvent::Resize(cols, rows) => {
            debug!(cols, rows, "terminal resized");
            None
        }
        _ => None,
    }
}

/// Live Life view in the terminal's alternate screen.
///
/// The terminal is restored when the view is dropped.
pub struct TerminalView {
    stdout: io::Stdout,
    canvas: Canvas,
    dots: usize,
}

impl TerminalView {
    pub fn new(config: &SimulationConfig) -> anyhow::Result<Self> {
        let dots = dots_per_cell(config.cell_size);
        let side = config.grid_size * dots;

        let (cols, rows) = terminal::size().context("Failed to read the terminal size")?;
        let (need_cols, need_rows) = required_size(config);
        if usize::from(cols) < need_cols || usize::from(rows) < need_rows {
            warn!(cols, rows, need_cols, need_rows, "terminal too small, the grid will be clipped");
        }

        terminal::enable_raw_mode().context("Failed to enable raw mode")?;

        // From here on dropping the view puts the terminal back
        let mut view = Self {
            stdout: io::stdout(),
            canvas: Canvas::new(side, side),
            dots,
        };

        execute!(view.stdout, terminal::EnterAlternateScreen, cursor::Hide)
            .context("Failed to enter the alternate screen")?;

        Ok(view)
    }

    /// Drain pending input without blocking
    fn poll_input(&mut self) -> io::Result<Flow> {
        while event::poll(Duration::ZERO)? {
            if let Some(Flow::Exit) = convert_event(event::read()?) {
                return Ok(Flow::Exit);
            }
        }

        Ok(Flow::Continue)
    }
}

impl Renderer for TerminalView {
    fn draw(&mut self, tick: usize, grid: &Grid) -> anyhow::Result<Flow> {
        if self.poll_input()? == Flow::Exit {
            return Ok(Flow::Exit);
        }

        self.canvas.reset();
        render::draw_grid(&mut self.canvas, grid, self.dots);
        let frame = self.canvas.render();

        queue!(
            self.stdout,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0),
        )?;

        // Raw mode does not return the carriage on '\n'
        for line in frame.lines() {
            queue!(self.stdout, style::Print(line), cursor::MoveToNextLine(1))?;
        }

        queue!(
            self.stdout,
            style::Print(format!(
                "generation {tick}  population {}  (q to quit)",
                grid.population()
            )),
        )?;

        self.stdout.flush()?;

        Ok(Flow::Continue)
    }
}

impl Drop for TerminalView {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
