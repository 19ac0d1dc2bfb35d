use std::io;
use std::io::BufRead;
use std::io::Write;

use thiserror::Error;
use tracing::warn;

use crate::rule::Rule;

const PROMPT: &str = "Enter rule (0-255): ";
const INVALID: &str = "Invalid rule! Enter a number between 0 and 255.";

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Failed to read rule: {0}")]
    Io(#[from] io::Error),

    #[error("Input ended before a valid rule was entered")]
    Eof,
}

/// Anything that can hand out a validated elementary rule
pub trait RuleSource {
    fn rule(&mut self) -> Result<Rule, PromptError>;
}

/// A rule that is already known
impl RuleSource for Rule {
    fn rule(&mut self) -> Result<Rule, PromptError> {
        Ok(*self)
    }
}

/// Asks for a rule on `output` and reads answers from `input` until one is valid.
///
/// Out of range numbers and text that is not a number are both answered with a
/// message and a new prompt.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> RuleSource for Prompt<R, W> {
    fn rule(&mut self) -> Result<Rule, PromptError> {
        let mut line = String::new();

        loop {
            write!(self.output, "{PROMPT}")?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Err(PromptError::Eof);
            }

            match line.parse() {
                Ok(rule) => return Ok(rule),
                Err(e) => {
                    warn!(error = %e, "rejected rule input");
                    writeln!(self.output, "{INVALID}")?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ask(input: &str) -> (Result<Rule, PromptError>, String) {
        let mut output = Vec::new();
        let res = Prompt::new(input.as_bytes(), &mut output).rule();

        (res, String::from_utf8(output).unwrap())
    }

    #[test]
    fn first_answer_accepted() {
        let (rule, output) = ask("30\n");

        assert_eq!(rule.unwrap(), Rule::new(30));
        assert_eq!(output, PROMPT);
    }

    #[test]
    fn out_of_range_is_asked_again() {
        let (rule, output) = ask("256\n-3\n90\n");

        assert_eq!(rule.unwrap(), Rule::new(90));
        assert_eq!(output, format!("{PROMPT}{INVALID}\n").repeat(2) + PROMPT);
    }

    #[test]
    fn text_is_asked_again() {
        let (rule, _) = ask("ninety\n\n 110 \n");
        assert_eq!(rule.unwrap(), Rule::new(110));
    }

    #[test]
    fn last_line_without_newline() {
        let (rule, _) = ask("0");
        assert_eq!(rule.unwrap(), Rule::new(0));
    }

    #[test]
    fn eof_is_an_error() {
        let (rule, output) = ask("300\n");

        assert!(matches!(rule, Err(PromptError::Eof)));
        assert_eq!(output, format!("{PROMPT}{INVALID}\n{PROMPT}"));
    }

    #[test]
    fn fixed_rule() {
        assert_eq!(Rule::new(184).rule().unwrap(), Rule::new(184));
    }
}
