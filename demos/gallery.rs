use std::io;
use std::io::Write;

use automata::History;
use automata::Rule;
use automata::terminal;

const RULES: [u8; 5] = [30, 90, 110, 184, 250];

fn main() -> io::Result<()> {
    let mut stdout = io::stdout().lock();

    for rule in RULES {
        let history = History::with_defaults(Rule::new(rule));
        terminal::write_history(&mut stdout, &history)?;
        writeln!(stdout)?;
    }

    Ok(())
}
