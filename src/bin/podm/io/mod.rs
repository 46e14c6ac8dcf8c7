mod discover;
mod prompt;

pub use discover::{discover_time_series, read_manifest};
pub use prompt::Prompter;

use std::io::{self, IsTerminal};

/// Returns `true` if stderr is a terminal (interactive).
pub fn stderr_is_tty() -> bool {
    io::stderr().is_terminal()
}

/// Returns `true` if stdin is a terminal (interactive).
pub fn stdin_is_tty() -> bool {
    io::stdin().is_terminal()
}
