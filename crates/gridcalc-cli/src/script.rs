//! Script parsing and execution
//!
//! A script holds one command per line. Blank lines and lines starting with
//! `#` are skipped.
//!
//! ```text
//! set A1 =B1+1
//! set B1 5
//! value A1
//! values
//! ```

use anyhow::{bail, Context, Result};
use gridcalc::prelude::*;
use std::io::Write;

/// A single script command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `set <ADDR> <text>`; the text is the rest of the line
    Set(Position, String),
    /// `clear <ADDR>`
    Clear(Position),
    /// `value <ADDR>`
    Value(Position),
    /// `text <ADDR>`
    Text(Position),
    /// `size`
    Size,
    /// `values`
    Values,
    /// `texts`
    Texts,
}

impl Command {
    /// Parse one script line; `None` for blank lines and comments
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim_start();
        if line.trim_end().is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (name, rest) = split_word(line);
        let command = match name {
            "set" => {
                let (addr, text) = split_word(rest.trim_start());
                Command::Set(address(addr)?, text.trim_end_matches('\r').to_string())
            }
            "clear" => Command::Clear(single_address(rest)?),
            "value" => Command::Value(single_address(rest)?),
            "text" => Command::Text(single_address(rest)?),
            "size" => no_arguments(Command::Size, rest)?,
            "values" => no_arguments(Command::Values, rest)?,
            "texts" => no_arguments(Command::Texts, rest)?,
            other => bail!("Unknown command '{}'", other),
        };
        Ok(Some(command))
    }
}

fn split_word(s: &str) -> (&str, &str) {
    s.split_once(char::is_whitespace).unwrap_or((s, ""))
}

fn address(addr: &str) -> Result<Position> {
    if addr.is_empty() {
        bail!("Missing cell address");
    }
    addr.parse()
        .with_context(|| format!("Bad cell address '{}'", addr))
}

fn single_address(rest: &str) -> Result<Position> {
    let rest = rest.trim();
    let (addr, extra) = split_word(rest);
    if !extra.trim().is_empty() {
        bail!("Unexpected argument '{}'", extra.trim());
    }
    address(addr)
}

fn no_arguments(command: Command, rest: &str) -> Result<Command> {
    if !rest.trim().is_empty() {
        bail!("Unexpected argument '{}'", rest.trim());
    }
    Ok(command)
}

/// Executes commands against one sheet, writing command output to `out`
pub struct Runner<W> {
    sheet: Sheet,
    out: W,
}

impl<W: Write> Runner<W> {
    pub fn new(out: W) -> Self {
        Self {
            sheet: Sheet::new(),
            out,
        }
    }

    #[cfg(test)]
    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    pub fn execute(&mut self, command: &Command) -> Result<()> {
        match command {
            Command::Set(pos, text) => self.sheet.set_cell(*pos, text)?,
            Command::Clear(pos) => self.sheet.clear_cell(*pos)?,
            Command::Value(pos) => {
                let value = self.sheet.value_at(*pos)?;
                writeln!(self.out, "{}", value.unwrap_or_default())?;
            }
            Command::Text(pos) => {
                let text = self.sheet.text_at(*pos)?;
                writeln!(self.out, "{}", text.unwrap_or_default())?;
            }
            Command::Size => {
                let size = self.sheet.printable_size();
                writeln!(self.out, "{} {}", size.rows, size.cols)?;
            }
            Command::Values => self.sheet.print_values(&mut self.out)?,
            Command::Texts => self.sheet.print_texts(&mut self.out)?,
        }
        Ok(())
    }

    /// Run a whole script; returns the number of failed lines
    ///
    /// Failures are reported on stderr and the run continues, unless
    /// `fail_fast` is set, in which case the first failure is returned.
    pub fn run(&mut self, source: &str, fail_fast: bool) -> Result<usize> {
        let mut failures = 0;
        for (index, line) in source.lines().enumerate() {
            let result = Command::parse(line).and_then(|command| match command {
                Some(command) => self.execute(&command),
                None => Ok(()),
            });

            if let Err(e) = result {
                let e = e.context(format!("line {}", index + 1));
                if fail_fast {
                    return Err(e);
                }
                eprintln!("Error: {:#}", e);
                failures += 1;
            }
        }
        Ok(failures)
    }
}
