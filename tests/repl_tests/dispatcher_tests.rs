//! Tests for the command dispatcher
//!
//! These tests verify:
//! - Prompt and response text for each command
//! - Error lines for recoverable failures
//! - Loop termination on `.exit` and end of input
//! - Fatal errors stop the loop

use std::io::Cursor;
use std::path::{Path, PathBuf};

use leafdb::btree::OverflowPolicy;
use leafdb::pager::Pager;
use leafdb::repl::{execute, Dispatcher, Exit, Response, Step, PROMPT};
use leafdb::{Config, LeafError, Row, Table};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_db() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("repl.db");
    (temp_dir, path)
}

/// Feed `commands` through a dispatcher, close the table, and return the
/// output split into lines the way a terminal would show them
fn run_script(path: &Path, commands: &[&str]) -> (Exit, Vec<String>) {
    let mut table = Table::open_path(path).unwrap();
    let input = commands.iter().map(|c| format!("{}\n", c)).collect::<String>();

    let mut dispatcher = Dispatcher::new(Cursor::new(input.into_bytes()), Vec::new());
    let exit = dispatcher.run(&mut table).unwrap();
    table.close().unwrap();

    let output = String::from_utf8(dispatcher.into_output()).unwrap();
    (exit, output.split('\n').map(str::to_string).collect())
}

fn prompt(rest: &str) -> String {
    format!("{}{}", PROMPT, rest)
}

// =============================================================================
// Scenario Tests
// =============================================================================

#[test]
fn test_inserts_and_retrieves_a_row() {
    let (_temp, path) = setup_temp_db();

    let (exit, lines) = run_script(
        &path,
        &["insert 1 user1 person1@example.com", "print", ".exit"],
    );

    assert_eq!(exit, Exit::Requested);
    assert_eq!(
        lines,
        vec![
            prompt("Inserted."),
            prompt("(1, user1, person1@example.com)"),
            prompt(""),
        ]
    );
}

#[test]
fn test_prints_error_when_table_is_full() {
    let (_temp, path) = setup_temp_db();
    let mut script: Vec<String> = (1..=14)
        .map(|i| format!("insert {} user{} person{}@example.com", i, i, i))
        .collect();
    script.push(".exit".to_string());
    let script: Vec<&str> = script.iter().map(String::as_str).collect();

    let (_, lines) = run_script(&path, &script);

    assert_eq!(lines[12], prompt("Inserted."));
    assert_eq!(lines[lines.len() - 2], prompt("Error: Table full."));
}

#[test]
fn test_allows_maximum_length_strings() {
    let (_temp, path) = setup_temp_db();
    let username = "a".repeat(32);
    let email = "a".repeat(255);
    let insert = format!("insert 1 {} {}", username, email);

    let (_, lines) = run_script(&path, &[&insert, "select", ".exit"]);

    assert_eq!(
        lines,
        vec![
            prompt("Inserted."),
            prompt(&format!("(1, {}, {})", username, email)),
            prompt(""),
        ]
    );
}

#[test]
fn test_prints_error_when_email_too_long() {
    let (_temp, path) = setup_temp_db();
    let insert = format!("insert 1 {} {}", "a".repeat(32), "a".repeat(256));

    let (_, lines) = run_script(&path, &[&insert, ".exit"]);

    assert_eq!(lines, vec![prompt("Error: email too long."), prompt("")]);
}

#[test]
fn test_prints_error_when_username_too_long() {
    let (_temp, path) = setup_temp_db();
    let insert = format!("insert 1 {} a@b.c", "a".repeat(33));

    let (_, lines) = run_script(&path, &[&insert, ".exit"]);

    assert_eq!(lines, vec![prompt("Error: username too long."), prompt("")]);
}

#[test]
fn test_prints_error_when_id_negative() {
    let (_temp, path) = setup_temp_db();

    let (_, lines) = run_script(&path, &["insert -1 cstack foo@bar.com", "select", ".exit"]);

    assert_eq!(
        lines,
        vec![
            prompt("Error: ID can't be negative or zero."),
            // select printed no rows, so the next prompt shares its line
            prompt(&prompt("")),
        ]
    );
}

#[test]
fn test_btree_shows_insertion_order_sorted() {
    let (_temp, path) = setup_temp_db();

    let (_, lines) = run_script(
        &path,
        &["insert 2 a a", "insert 1 b b", "insert 3 c c", ".btree", ".exit"],
    );

    assert_eq!(
        lines,
        vec![
            prompt("Inserted."),
            prompt("Inserted."),
            prompt("Inserted."),
            prompt("leaf (size 3)."),
            "\t0 : 1".to_string(),
            "\t1 : 2".to_string(),
            "\t2 : 3".to_string(),
            prompt(""),
        ]
    );
}

#[test]
fn test_persistence_across_sessions() {
    let (_temp, path) = setup_temp_db();
    let script: Vec<String> = (1..=13)
        .map(|i| format!("insert {} user{} user{}@example.com", i, i, i))
        .chain(std::iter::once(".exit".to_string()))
        .collect();
    let script: Vec<&str> = script.iter().map(String::as_str).collect();

    let (_, first) = run_script(&path, &script);
    assert_eq!(first.len(), 14);
    assert!(first[..13].iter().all(|l| *l == prompt("Inserted.")));

    let (_, second) = run_script(&path, &["select", ".exit"]);

    let mut expected = vec![prompt("(1, user1, user1@example.com)")];
    expected.extend((2..=13).map(|i| format!("({}, user{}, user{}@example.com)", i, i, i)));
    expected.push(prompt(""));
    assert_eq!(second, expected);
}

// =============================================================================
// Loop Behaviour Tests
// =============================================================================

#[test]
fn test_unrecognized_inputs_keep_loop_running() {
    let (_temp, path) = setup_temp_db();

    let (_, lines) = run_script(
        &path,
        &[".tables", "update 1 a b", "insert 1 a", "insert 1 a b", ".exit"],
    );

    assert_eq!(
        lines,
        vec![
            prompt("Error: Unrecognized command '.tables'."),
            prompt("Error: Unrecognized keyword at start of 'update 1 a b'."),
            prompt("Error: Syntax error. Could not parse statement."),
            prompt("Inserted."),
            prompt(""),
        ]
    );
}

#[test]
fn test_duplicate_key_reported() {
    let (_temp, path) = setup_temp_db();

    let (_, lines) = run_script(&path, &["insert 1 a b", "insert 1 c d", "select", ".exit"]);

    assert_eq!(
        lines,
        vec![
            prompt("Inserted."),
            prompt("Error: Duplicate key."),
            prompt("(1, a, b)"),
            prompt(""),
        ]
    );
}

#[test]
fn test_nul_in_field_reported() {
    let (_temp, path) = setup_temp_db();

    let (_, lines) = run_script(&path, &["insert 1 a\0b e", "insert 1 ab e", "select", ".exit"]);

    assert_eq!(
        lines,
        vec![
            prompt("Error: username can't contain NUL bytes."),
            prompt("Inserted."),
            prompt("(1, ab, e)"),
            prompt(""),
        ]
    );
}

#[test]
fn test_blank_line_only_reprompts() {
    let (_temp, path) = setup_temp_db();

    let (_, lines) = run_script(&path, &["", ".exit"]);

    assert_eq!(lines, vec![prompt(&prompt(""))]);
}

#[test]
fn test_end_of_input_stops_loop() {
    let (_temp, path) = setup_temp_db();

    let (exit, lines) = run_script(&path, &["insert 1 a b"]);

    assert_eq!(exit, Exit::EndOfInput);
    assert_eq!(lines, vec![prompt("Inserted."), prompt("")]);

    // rows still persisted by the caller's close
    let (_, lines) = run_script(&path, &["select"]);
    assert_eq!(lines, vec![prompt("(1, a, b)"), prompt("")]);
}

struct RefuseWithOutOfBounds;

impl OverflowPolicy for RefuseWithOutOfBounds {
    fn on_full(&self, pager: &mut Pager, _page_num: u32) -> leafdb::Result<u32> {
        Err(LeafError::PagerOutOfBounds {
            page_num: pager.max_pages(),
            max_pages: pager.max_pages(),
        })
    }
}

#[test]
fn test_fatal_error_stops_loop() {
    let (_temp, path) = setup_temp_db();
    let config = Config::builder().db_path(&path).build();
    let mut table = Table::open_with_policy(config, Box::new(RefuseWithOutOfBounds)).unwrap();
    let input: String = (1..=15)
        .map(|i| format!("insert {} u e\n", i))
        .collect();

    let mut dispatcher = Dispatcher::new(Cursor::new(input.into_bytes()), Vec::new());
    let err = dispatcher.run(&mut table).unwrap_err();

    assert!(matches!(err, LeafError::PagerOutOfBounds { .. }));
    let output = String::from_utf8(dispatcher.into_output()).unwrap();
    // 13 inserts succeed, the 14th aborts without an error line, the 15th is never read
    assert_eq!(output.matches("Inserted.").count(), 13);
    assert!(!output.contains("Error:"));
    assert!(output.ends_with(PROMPT));
}

#[test]
fn test_zero_page_budget_fails_open() {
    let (_temp, path) = setup_temp_db();
    let config = Config::builder().db_path(&path).max_pages(0).build();

    let err = Table::open(config).err().unwrap();

    assert!(matches!(err, LeafError::PagerOutOfBounds { page_num: 0, max_pages: 0 }));
    assert!(err.is_fatal());
}

// =============================================================================
// execute() Tests
// =============================================================================

#[test]
fn test_execute_steps() {
    let (_temp, path) = setup_temp_db();
    let mut table = Table::open_path(&path).unwrap();

    assert_eq!(execute(&mut table, "insert 3 x y\n").unwrap(), Step::Respond(Response::Inserted));
    assert_eq!(
        execute(&mut table, "select").unwrap(),
        Step::Respond(Response::Rows(vec![Row::new(3, "x", "y")]))
    );
    assert_eq!(execute(&mut table, "  ").unwrap(), Step::Silent);
    assert_eq!(execute(&mut table, ".exit").unwrap(), Step::Exit);
    assert!(matches!(execute(&mut table, "insert 0 x y"), Err(LeafError::NonPositiveId)));
}

#[test]
fn test_error_response_format() {
    let mut out = Vec::new();
    Response::error(&LeafError::TableFull).write_to(&mut out).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "Error: Table full.\n");
}
