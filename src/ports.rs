//! Capabilities the core needs from whatever hosts it.

use std::io::{self, BufRead, Write};

pub use crate::listview::export::{DirSink, FileSink};

/// Synchronous yes/no gate in front of destructive actions.
pub trait Confirm: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

/// Answers every prompt the same way (`--yes` on the CLI, and tests).
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&self, _message: &str) -> bool {
        self.0
    }
}

/// Asks on stderr and reads the answer from stdin. Anything but y/yes declines.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, message: &str) -> bool {
        let mut stderr = io::stderr();
        if write!(stderr, "{} [y/N] ", message).and_then(|_| stderr.flush()).is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}
