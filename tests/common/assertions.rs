use ddlex::ast::*;
use ddlex::parser::{ParseError, ParseErrorKind};

/// Assert that parsing succeeds
pub fn assert_parses(source: &str) -> Statements {
    ddlex::parse(source).unwrap_or_else(|e| panic!("Expected source to parse successfully:\n{}", e))
}

/// Assert that parsing fails
pub fn assert_parse_fails(source: &str) -> ParseError {
    match ddlex::parse(source) {
        Ok(stmts) => panic!("Expected source to fail parsing, got {:?}", stmts),
        Err(e) => e,
    }
}

/// Assert that parsing fails because a clause is not supported
pub fn assert_unsupported(source: &str, clause: &'static str) {
    let err = assert_parse_fails(source);
    assert_eq!(err.kind, ParseErrorKind::Unsupported(clause), "{}", err);
}

/// Assert the statements contain a table with the given name
pub fn assert_has_table<'a>(stmts: &'a Statements, name: &str) -> &'a Table {
    stmts
        .table(name)
        .unwrap_or_else(|| panic!("Expected table named: {}", name))
}

/// Assert the table has a column with the given name and type
pub fn assert_has_column<'a>(table: &'a Table, name: &str, ty: ColumnType) -> &'a Column {
    let column = table
        .column(name)
        .unwrap_or_else(|| panic!("Expected column {} in table {}", name, table.name));
    assert_eq!(column.ty, ty, "type of column {}", name);
    column
}
