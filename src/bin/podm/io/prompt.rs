use std::io::{self, BufRead, Stderr, StdinLock, Write};

use anyhow::{Result, anyhow, bail};

use pod_modes::{Channel, PodError};

const CHANNEL_QUESTION: &str =
    "Enter the velocity component to analyze (0 for u, 1 for v, 2 for w): ";
const MODE_COUNT_QUESTION: &str = "Enter the number of modes to save: ";

/// Line-oriented questions for values missing from the command line.
///
/// Questions are shown only when `show_questions` is set, so answers can also
/// be piped in. An invalid answer is asked again when questions are shown and
/// is an error otherwise.
pub struct Prompter<R, W> {
    input: R,
    output: W,
    show_questions: bool,
}

impl Prompter<StdinLock<'static>, Stderr> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock(), io::stderr(), super::stdin_is_tty())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W, show_questions: bool) -> Self {
        Self {
            input,
            output,
            show_questions,
        }
    }

    pub fn channel(&mut self) -> Result<Channel> {
        self.ask(CHANNEL_QUESTION, "--component", |answer| {
            answer.parse::<Channel>().map_err(anyhow::Error::from)
        })
    }

    /// Asks for a mode count in `1..=available`.
    pub fn mode_count(&mut self, available: usize) -> Result<usize> {
        self.ask(MODE_COUNT_QUESTION, "--modes", |answer| {
            let requested: usize = answer
                .parse()
                .map_err(|_| anyhow!("'{answer}' is not a positive integer"))?;
            if requested == 0 || requested > available {
                return Err(PodError::InvalidModeCount {
                    requested,
                    available,
                }
                .into());
            }
            Ok(requested)
        })
    }

    fn ask<T>(
        &mut self,
        question: &str,
        flag: &str,
        parse: impl Fn(&str) -> Result<T>,
    ) -> Result<T> {
        loop {
            if self.show_questions {
                write!(self.output, "{question}")?;
                self.output.flush()?;
            }

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                bail!("No answer available on stdin. Pass {flag} to run non-interactively.");
            }

            match parse(line.trim()) {
                Ok(value) => return Ok(value),
                Err(e) if self.show_questions => writeln!(self.output, "  {e}")?,
                Err(e) => return Err(e),
            }
        }
    }
}
