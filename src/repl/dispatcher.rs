//! Dispatcher
//!
//! Reads lines, runs them against a table and writes responses.

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::error::Result;
use crate::table::Table;

use super::{Command, MetaCommand, Response, Statement};

/// Written before every read
pub const PROMPT: &str = "(sqlite)> ";

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// `.exit` was entered
    Requested,

    /// The input stream ended
    EndOfInput,
}

/// What a single line asks the loop to do next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Respond(Response),
    Silent,
    Exit,
}

/// Command loop over any line source and sink
pub struct Dispatcher<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Dispatcher<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Run until `.exit`, end of input, or a fatal error
    ///
    /// Recoverable errors are written to the output and the loop continues.
    /// The caller owns shutdown: close the table after this returns.
    pub fn run(&mut self, table: &mut Table) -> Result<Exit> {
        let mut line = String::new();

        loop {
            self.output.write_all(PROMPT.as_bytes())?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                debug!("end of input");
                return Ok(Exit::EndOfInput);
            }

            match execute(table, &line) {
                Ok(Step::Exit) => return Ok(Exit::Requested),
                Ok(Step::Respond(response)) => response.write_to(&mut self.output)?,
                Ok(Step::Silent) => {}
                Err(e) if e.is_fatal() => {
                    warn!(error = %e, "fatal error, stopping command loop");
                    self.output.flush()?;
                    return Err(e);
                }
                Err(e) => {
                    debug!(error = %e, "command failed");
                    Response::error(&e).write_to(&mut self.output)?;
                }
            }
            self.output.flush()?;
        }
    }

    /// Give back the output sink
    pub fn into_output(self) -> W {
        self.output
    }
}

/// Parse and run one line against the table
pub fn execute(table: &mut Table, line: &str) -> Result<Step> {
    let command = match Command::parse(line)? {
        Some(command) => command,
        None => return Ok(Step::Silent),
    };

    match command {
        Command::Meta(MetaCommand::Exit) => Ok(Step::Exit),
        Command::Meta(MetaCommand::Btree) => Ok(Step::Respond(Response::Lines(table.describe()?))),
        Command::Statement(Statement::Insert(row)) => {
            table.insert(&row)?;
            Ok(Step::Respond(Response::Inserted))
        }
        Command::Statement(Statement::Select) => {
            let rows = table.select_all()?.collect::<Result<Vec<_>>>()?;
            Ok(Step::Respond(Response::Rows(rows)))
        }
    }
}
