//! REPL Module
//!
//! Line-oriented command interface over a [`Table`](crate::table::Table).
//!
//! ## Protocol
//!
//! Before every read the prompt `(sqlite)> ` is written with no newline.
//!
//! ### Meta Commands (leading `.`)
//! - `.exit`  - stop the loop; the caller flushes and exits
//! - `.btree` - dump the root node
//!
//! ### Statements
//! - `insert <id> <username> <email>` → `Inserted.`
//! - `select` / `print` → one `(id, username, email)` line per row
//!
//! ### Errors
//! Recoverable failures print `Error: <message>.` and the loop goes on.
//! Storage failures end the loop with an error.

mod command;
mod dispatcher;
mod response;

pub use command::{Command, MetaCommand, Statement};
pub use dispatcher::{execute, Dispatcher, Exit, Step, PROMPT};
pub use response::Response;
