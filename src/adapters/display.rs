//! Console display adapter.
//!
//! Stands in for the character LCD on a host: each status change is
//! written to stdout as one block.  Unchanged text is not repeated, so a
//! 5 Hz loop cruising in a steady state stays quiet.

use std::io::Write;

use crate::app::ports::DisplayPort;
use crate::error::{Error, Result};

pub struct ConsoleDisplay<W: Write = std::io::Stdout> {
    out: W,
    last: String,
}

impl ConsoleDisplay {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleDisplay<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last: String::new(),
        }
    }

    /// Text currently shown.
    pub fn current(&self) -> &str {
        &self.last
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplayPort for ConsoleDisplay<W> {
    fn show(&mut self, text: &str) -> Result<()> {
        if text == self.last {
            return Ok(());
        }
        writeln!(self.out, "{text}").map_err(|_| Error::Display("console write failed"))?;
        self.out
            .flush()
            .map_err(|_| Error::Display("console flush failed"))?;
        self.last.clear();
        self.last.push_str(text);
        Ok(())
    }
}
