//! Line-oriented prompts with input validation.
//!
//! Invalid answers never escape these helpers: they print a hint and ask
//! again. The only error a prompt produces besides I/O failure is
//! [`TodoError::InputClosed`] once the input stream is exhausted.

use crate::error::{Result, TodoError};
use std::fmt::Display;
use std::io::{BufRead, Write};

const INVALID_INTEGER: &str = "Please enter a valid integer";
const INVALID_CONFIRMATION: &str = "Please enter 'yes' or 'no', or abbreviate it as 'y' or 'n'";

/// Reads answers from `input` and writes prompts and messages to `output`
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print a line
    pub fn say(&mut self, message: impl Display) -> Result<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    /// Show `prompt` and read one line without its terminator.
    ///
    /// Bytes that are not valid UTF-8 come back as U+FFFD, which neither
    /// [`parse_int`] nor [`parse_confirmation`] accepts.
    pub fn read_line(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Err(TodoError::InputClosed);
        }
        let mut line = String::from_utf8_lossy(&raw).into_owned();
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    /// Ask until the answer is a non-negative integer
    pub fn read_int(&mut self, prompt: &str) -> Result<i64> {
        loop {
            let answer = self.read_line(prompt)?;
            match parse_int(&answer) {
                Some(value) => return Ok(value),
                None => self.say(INVALID_INTEGER)?,
            }
        }
    }

    /// Ask a yes/no question until it gets a recognizable answer
    pub fn confirm(&mut self, prompt: &str) -> Result<bool> {
        loop {
            let answer = self.read_line(prompt)?;
            match parse_confirmation(&answer) {
                Some(value) => return Ok(value),
                None => self.say(INVALID_CONFIRMATION)?,
            }
        }
    }
}

/// Accepts only plain digit strings that fit in an `i64`
pub fn parse_int(s: &str) -> Option<i64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

pub fn parse_confirmation(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}
