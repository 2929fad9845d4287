//! Command definitions
//!
//! Parsing of input lines into commands.

use crate::error::{LeafError, Result};
use crate::row::Row;

/// Commands starting with `.`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaCommand {
    /// Stop the loop
    Exit,

    /// Print the root node layout
    Btree,
}

/// Statements against the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// Insert one row
    Insert(Row),

    /// Print every row in key order
    Select,
}

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Meta(MetaCommand),
    Statement(Statement),
}

impl Command {
    /// Parse one input line
    ///
    /// Returns `Ok(None)` for a blank line. Field bounds are not checked
    /// here; the table validates rows on insert.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let command = if line.starts_with('.') {
            Command::Meta(parse_meta(line)?)
        } else {
            Command::Statement(parse_statement(line)?)
        };
        Ok(Some(command))
    }
}

fn parse_meta(line: &str) -> Result<MetaCommand> {
    match line {
        ".exit" => Ok(MetaCommand::Exit),
        ".btree" => Ok(MetaCommand::Btree),
        other => Err(LeafError::UnrecognizedCommand(other.to_string())),
    }
}

fn parse_statement(line: &str) -> Result<Statement> {
    let mut words = line.split_whitespace();

    match words.next() {
        Some("insert") => parse_insert(words.collect()),
        Some("select") | Some("print") => {
            if words.next().is_some() {
                return Err(LeafError::SyntaxError);
            }
            Ok(Statement::Select)
        }
        _ => Err(LeafError::UnrecognizedStatement(line.to_string())),
    }
}

/// `insert <id> <username> <email>`
fn parse_insert(args: Vec<&str>) -> Result<Statement> {
    let [id, username, email] = args[..] else {
        return Err(LeafError::SyntaxError);
    };

    let id: i64 = id.parse().map_err(|_| LeafError::SyntaxError)?;
    Ok(Statement::Insert(Row::new(id, username, email)))
}
