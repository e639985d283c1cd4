//! Printing parsed schemas back to DDL and serializing them to JSON

mod common;

use common::assertions::*;
use common::fixtures::*;
use ddlex::ast::*;

/// Parse, print, re-parse and print again; both prints must agree.
fn assert_stable(source: &str) -> String {
    let first = assert_parses(source).to_string();
    let second = assert_parses(&first).to_string();
    assert_eq!(first, second, "canonical form is not stable for:\n{}", source);
    first
}

#[test]
fn test_fixtures_print_stably() {
    for path in discover_fixtures() {
        let source = std::fs::read_to_string(&path).expect("fixture is readable");
        assert_stable(&source);
    }
}

#[test]
fn test_reprinted_ast_matches_ignoring_spans() {
    let source = load_fixture("inventory.sql");
    let original = assert_parses(&source);
    let reparsed = assert_parses(&original.to_string());

    let strip = |stmts: &Statements| -> Vec<Table> {
        stmts
            .tables()
            .cloned()
            .map(|mut t| {
                t.span = Span::dummy();
                t.columns.iter_mut().for_each(|c| c.span = Span::dummy());
                t.indexes.iter_mut().for_each(|i| i.span = Span::dummy());
                t
            })
            .collect()
    };
    assert_eq!(strip(&original), strip(&reparsed));
}

#[test]
fn test_canonical_form() {
    let printed = assert_stable(
        "create temporary table t (a int(11) unsigned not null default '5', key k (a)) engine=InnoDB comment 'x';",
    );
    assert_eq!(
        printed,
        "CREATE TEMPORARY TABLE `t` (\n  `a` INT(11) UNSIGNED NOT NULL DEFAULT 5,\n  KEY `k` (`a`)\n) ENGINE = InnoDB COMMENT = 'x';"
    );

    let printed = assert_stable("CREATE TABLE t (a INT) DEFAULT CHARSET utf8 COLLATE utf8_bin");
    assert!(printed.ends_with(") DEFAULT CHARACTER SET = utf8 DEFAULT COLLATE = utf8_bin;"));
}

#[test]
fn test_keyword_and_numeric_option_values_stay_quoted() {
    let printed = assert_stable(
        "CREATE TABLE t (a INT) ENGINE=`1engine` DEFAULT CHARACTER SET `binary` COLLATE `binary`;",
    );
    assert!(printed.ends_with(
        ") ENGINE = `1engine` DEFAULT CHARACTER SET = `binary` DEFAULT COLLATE = `binary`;"
    ));
    let table = assert_parses(&printed);
    let table = assert_has_table(&table, "t");
    assert_eq!(table.option("DEFAULT CHARACTER SET"), Some("binary"));
    assert_eq!(table.option("ENGINE"), Some("1engine"));
}

#[test]
fn test_whitespace_and_comments_do_not_matter() {
    let compact = assert_parses("CREATE TABLE t(a INT,b INT,PRIMARY KEY(a))ENGINE=InnoDB;").to_string();
    let spread = assert_parses(
        "CREATE   TABLE t ( -- columns\n  a INT , /* second */ b INT ,\n  PRIMARY KEY ( a )\n)\nENGINE = InnoDB ;",
    )
    .to_string();
    assert_eq!(compact, spread);
}

#[test]
fn test_json_round_trip() {
    let stmts = assert_parses(&load_fixture("blog.sql"));
    let json = serde_json::to_string(&stmts).unwrap();
    let back: Statements = serde_json::from_str(&json).unwrap();
    assert_eq!(stmts, back);

    let value: serde_json::Value = serde_json::to_value(&stmts).unwrap();
    assert!(value.is_array());
    assert_eq!(value[0]["Table"]["name"], "users");
}
