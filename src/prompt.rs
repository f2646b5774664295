//! Line-based terminal prompt for fix-loop decisions.

use crate::fix_loop::{Decision, DecisionRequest, DecisionSource, FixError};
use colored::*;
use std::io::{BufRead, Write};

/// Asks on `output` and reads answers from `input` until one is valid.
///
/// There is no default answer. End of input counts as quit, since no further
/// answer can ever arrive.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl TerminalPrompt<std::io::StdinLock<'static>, std::io::Stderr> {
    /// Prompt on stderr, answers from stdin.
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stderr())
    }
}

impl<R: BufRead, W: Write> DecisionSource for TerminalPrompt<R, W> {
    fn decide(&mut self, request: &DecisionRequest) -> Result<Decision, FixError> {
        let location = match &request.path {
            Some(path) => format!("{}:{}", path.display(), request.line),
            None => format!("line {}", request.line),
        };
        writeln!(
            self.output,
            "{}: {} block still fails: {}",
            location.bold(),
            request.language,
            request.diagnostic.red()
        )?;

        loop {
            write!(self.output, "Edit again? [y]es / [s]kip / [i]gnore / [q]uit: ")?;
            self.output.flush()?;

            let mut answer = String::new();
            if self.input.read_line(&mut answer)? == 0 {
                writeln!(self.output)?;
                log::warn!("No more input; quitting fix run");
                return Ok(Decision::Quit);
            }
            match Decision::from_input(&answer) {
                Some(decision) => return Ok(decision),
                None => writeln!(self.output, "{} '{}'", "Invalid choice".yellow(), answer.trim())?,
            }
        }
    }
}
