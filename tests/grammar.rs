//! End-to-end grammar behavior through the public entry points

mod common;

use common::assertions::*;
use ddlex::ast::*;
use ddlex::parser::{CancelToken, ParseErrorKind, ParseOptions};

#[test]
fn test_create_database_yields_nothing() {
    assert!(assert_parses("CREATE DATABASE name;").is_empty());
    assert!(assert_parses("CREATE DATABASE IF NOT EXISTS name;").is_empty());
}

#[test]
fn test_minimal_primary_key_table() {
    let stmts = assert_parses("CREATE TABLE t (id INT NOT NULL AUTO_INCREMENT, PRIMARY KEY (id));");
    assert_eq!(stmts.len(), 1);
    let t = assert_has_table(&stmts, "t");
    let id = assert_has_column(t, "id", ColumnType::Int);
    assert_eq!(id.null_state, NullState::NotNull);
    assert!(id.auto_increment);
    assert_eq!(t.indexes.len(), 1);
    assert_eq!(t.indexes[0].kind, IndexKind::PrimaryKey);
    assert_eq!(t.indexes[0].columns, vec!["id"]);
}

#[test]
fn test_unsupported_clauses() {
    assert_unsupported("CREATE TABLE t (a INT, CHECK (a > 0));", "CHECK");
    assert_unsupported("CREATE TABLE t (a INT) TABLESPACE ts;", "TABLESPACE");
    assert_unsupported("CREATE TABLE t (a INT) UNION = (a, b);", "UNION");
}

#[test]
fn test_attribute_order_violation() {
    let err = assert_parse_fails("CREATE TABLE t (a INT DEFAULT 1 NOT NULL);");
    assert_eq!(err.kind, ParseErrorKind::CannotApply("NOT NULL"));
}

#[test]
fn test_truncated_input() {
    for source in [
        "CREATE TABLE t (a INT",
        "CREATE TABLE t (a INT,",
        "CREATE TABLE t (a VARCHAR(",
        "CREATE TABLE t (a INT, FOREIGN KEY (a) REFERENCES",
        "CREATE DATABASE",
    ] {
        assert_parse_fails(source);
    }
}

#[test]
fn test_error_position_and_context() {
    let source = "CREATE TABLE t (\n  a INT,\n  b WHATEVER\n);";
    let err = assert_parse_fails(source);
    assert_eq!((err.line, err.column), (3, 5));
    assert_eq!(err.near, "b WHATEVER");
    assert_eq!(&source[err.span.start..err.span.end], "WHATEVER");
    assert!(err.to_string().contains("expected column type, found identifier \"WHATEVER\""));
}

#[test]
fn test_source_name_in_error() {
    let err = ddlex::parse_named("db/schema.sql", "CREATE VIEW v;").unwrap_err();
    assert!(err.to_string().starts_with("db/schema.sql: line 1, column 8:"), "{}", err);
}

#[test]
fn test_first_error_wins() {
    let err = assert_parse_fails("CREATE TABLE a (x INT DEFAULT 1 NULL); CREATE TABLE b (y JSON);");
    assert_eq!(err.kind, ParseErrorKind::CannotApply("NULL"));
}

#[test]
fn test_lexer_error_is_positioned() {
    let err = assert_parse_fails("CREATE TABLE t (a INT) ENGINE=InnoDB @;");
    assert_eq!(err.column, 38);
}

#[test]
fn test_cancelled_parse_is_an_error() {
    let cancel = CancelToken::new();
    let options = ParseOptions::new().source_name("cancelled.sql").cancel(cancel.clone());
    cancel.cancel();
    let err = ddlex::parse_with("CREATE TABLE a (x INT); CREATE TABLE b (y INT);", &options).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::Cancelled);
    assert!(err.to_string().starts_with("cancelled.sql: line 1, column 1: parse cancelled"), "{}", err);
}

#[test]
fn test_uncancelled_token_does_not_interfere() {
    let options = ParseOptions::new().cancel(CancelToken::new());
    let stmts = ddlex::parse_with("CREATE TABLE a (x INT); CREATE TABLE b (y INT);", &options).unwrap();
    assert_eq!(stmts.len(), 2);
}

#[test]
fn test_parallel_parses_are_independent() {
    let sources: Vec<String> = (0..8)
        .map(|i| format!("CREATE TABLE t{i} (c{i} INT, KEY (c{i}));"))
        .collect();

    let results: Vec<Statements> = std::thread::scope(|scope| {
        let handles: Vec<_> = sources
            .iter()
            .map(|source| scope.spawn(move || ddlex::parse(source).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (i, stmts) in results.iter().enumerate() {
        let table = assert_has_table(stmts, &format!("t{i}"));
        assert_eq!(table.columns[0].name, format!("c{i}"));
    }
}
