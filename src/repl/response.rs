//! Response definitions
//!
//! Text written back after each command.

use std::io::{self, Write};

use crate::error::LeafError;
use crate::row::Row;

/// Output of one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// A row was stored
    Inserted,

    /// Rows from a select, in key order
    Rows(Vec<Row>),

    /// Free-form lines (node dump)
    Lines(Vec<String>),

    /// A recoverable failure
    Error(String),
}

impl Response {
    /// Create an ERROR response
    pub fn error(err: &LeafError) -> Self {
        Response::Error(err.to_string())
    }

    /// Write the response, one line per item
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self {
            Response::Inserted => writeln!(out, "Inserted."),
            Response::Rows(rows) => rows.iter().try_for_each(|row| writeln!(out, "{}", row)),
            Response::Lines(lines) => lines.iter().try_for_each(|line| writeln!(out, "{}", line)),
            Response::Error(message) => writeln!(out, "Error: {}.", message),
        }
    }
}
