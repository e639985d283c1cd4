//! Canonical DDL printer
//!
//! Serializes the AST back to MySQL DDL text. Identifiers are back-quoted,
//! keywords upper-cased, and column attributes emitted in the order the
//! parser requires, so printed output always parses back to the same tree.

use std::fmt;

use crate::{
    Column, Database, Index, IndexKind, IndexType, Length, NullState, Reference,
    ReferenceMatch, Statement, Statements, Table, TableOption,
};

/// Trait for converting AST nodes to canonical DDL text.
pub trait ToSql {
    /// Convert to DDL with the given indentation level.
    fn to_sql(&self, indent: usize) -> String;
}

/// Helper to generate indentation string (two spaces per level).
fn indent_str(level: usize) -> String {
    "  ".repeat(level)
}

/// Back-quote an identifier, doubling embedded backticks.
pub fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Single-quote a string literal.
pub fn quote_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    result.push('\'');
    for c in s.chars() {
        match c {
            '\'' => result.push_str("''"),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            _ => result.push(c),
        }
    }
    result.push('\'');
    result
}

fn quote_list(names: &[String]) -> String {
    names
        .iter()
        .map(|n| quote_ident(n))
        .collect::<Vec<_>>()
        .join(", ")
}

fn is_number(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let mut parts = digits.splitn(2, '.');
    let int = parts.next().unwrap_or("");
    let frac_ok = match parts.next() {
        Some(frac) => !frac.is_empty() && frac.bytes().all(|b| b.is_ascii_digit()),
        None => true,
    };
    !int.is_empty() && int.bytes().all(|b| b.is_ascii_digit()) && frac_ok
}

fn is_word(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Words the lexer reads as keywords rather than identifiers, sorted
pub const KEYWORDS: &[&str] = &[
    "ACTION", "AUTO_INCREMENT", "AVG_ROW_LENGTH", "BIGINT", "BINARY", "BIT", "BLOB",
    "BTREE", "CASCADE", "CHAR", "CHARACTER", "CHARSET", "CHECK", "CHECKSUM", "COLLATE",
    "COMMENT", "COMPACT", "COMPRESSED", "CONNECTION", "CONSTRAINT", "CREATE",
    "CURRENT_TIMESTAMP", "DATA", "DATABASE", "DATE", "DATETIME", "DECIMAL", "DEFAULT",
    "DELAY_KEY_WRITE", "DELETE", "DIRECTORY", "DOUBLE", "DROP", "DYNAMIC", "ENGINE",
    "EXISTS", "FIXED", "FLOAT", "FOREIGN", "FULL", "FULLTEXT", "HASH", "IF", "INDEX",
    "INSERT_METHOD", "INT", "INTEGER", "KEY", "KEY_BLOCK_SIZE", "LONGBLOB", "LONGTEXT",
    "MATCH", "MAX_ROWS", "MEDIUMBLOB", "MEDIUMINT", "MEDIUMTEXT", "MIN_ROWS", "NO",
    "NOT", "NULL", "NUMERIC", "ON", "PACK_KEYS", "PARTIAL", "PASSWORD", "PRIMARY",
    "REAL", "REDUNDANT", "REFERENCES", "RESTRICT", "ROW_FORMAT", "SET", "SIMPLE",
    "SMALLINT", "SPATIAL", "STATS_AUTO_RECALC", "STATS_PERSISTENT",
    "STATS_SAMPLE_PAGES", "TABLE", "TABLESPACE", "TEMPORARY", "TEXT", "TIME",
    "TIMESTAMP", "TINYBLOB", "TINYINT", "TINYTEXT", "UNION", "UNIQUE", "UNSIGNED",
    "UPDATE", "USE", "USING", "VARBINARY", "VARCHAR", "YEAR", "ZEROFILL",
];

/// Whether `word` lexes as a keyword, ignoring case
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS
        .binary_search(&word.to_ascii_uppercase().as_str())
        .is_ok()
}

/// A word that lexes back as a bare identifier
fn is_bare_ident(s: &str) -> bool {
    is_word(s) && !s.starts_with(|c: char| c.is_ascii_digit()) && !is_keyword(s)
}

fn default_literal(value: &str) -> String {
    if is_number(value)
        || value.eq_ignore_ascii_case("NULL")
        || value.eq_ignore_ascii_case("CURRENT_TIMESTAMP")
    {
        value.to_string()
    } else {
        quote_string(value)
    }
}

/// Option keys whose values are string literals.
const QUOTED_OPTIONS: &[&str] = &[
    "COMMENT",
    "CONNECTION",
    "DATA DIRECTORY",
    "INDEX DIRECTORY",
    "PASSWORD",
];

/// Option keys whose values may be bare keywords, e.g. `ROW_FORMAT = DYNAMIC`
const KEYWORD_OPTIONS: &[&str] = &[
    "INSERT_METHOD",
    "PACK_KEYS",
    "ROW_FORMAT",
    "STATS_AUTO_RECALC",
    "STATS_PERSISTENT",
];

// ===== Statements =====

impl ToSql for Statements {
    fn to_sql(&self, indent: usize) -> String {
        self.statements
            .iter()
            .map(|s| s.to_sql(indent))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl ToSql for Statement {
    fn to_sql(&self, indent: usize) -> String {
        match self {
            Statement::Database(db) => db.to_sql(indent),
            Statement::Table(table) => table.to_sql(indent),
        }
    }
}

impl ToSql for Database {
    fn to_sql(&self, indent: usize) -> String {
        let mut out = format!("{}CREATE DATABASE ", indent_str(indent));
        if self.if_not_exists {
            out.push_str("IF NOT EXISTS ");
        }
        out.push_str(&quote_ident(&self.name));
        out.push(';');
        out
    }
}

// ===== Table =====

impl ToSql for Table {
    fn to_sql(&self, indent: usize) -> String {
        let ind = indent_str(indent);
        let mut out = format!("{}CREATE ", ind);
        if self.temporary {
            out.push_str("TEMPORARY ");
        }
        out.push_str("TABLE ");
        if self.if_not_exists {
            out.push_str("IF NOT EXISTS ");
        }
        out.push_str(&quote_ident(&self.name));
        out.push_str(" (\n");

        let defs: Vec<String> = self
            .columns
            .iter()
            .map(|c| c.to_sql(indent + 1))
            .chain(self.indexes.iter().map(|i| i.to_sql(indent + 1)))
            .collect();
        out.push_str(&defs.join(",\n"));
        out.push('\n');
        out.push_str(&ind);
        out.push(')');

        for option in &self.options {
            out.push(' ');
            out.push_str(&option.to_sql(0));
        }
        out.push(';');
        out
    }
}

impl ToSql for TableOption {
    fn to_sql(&self, indent: usize) -> String {
        let value = if QUOTED_OPTIONS.contains(&self.key.as_str()) {
            quote_string(&self.value)
        } else if is_number(&self.value)
            || is_bare_ident(&self.value)
            || (KEYWORD_OPTIONS.contains(&self.key.as_str()) && is_keyword(&self.value))
        {
            self.value.clone()
        } else {
            quote_ident(&self.value)
        };
        format!("{}{} = {}", indent_str(indent), self.key, value)
    }
}

// ===== Column =====

impl ToSql for Length {
    fn to_sql(&self, _indent: usize) -> String {
        match &self.decimal {
            Some(decimal) => format!("({},{})", self.value, decimal),
            None => format!("({})", self.value),
        }
    }
}

impl ToSql for Column {
    fn to_sql(&self, indent: usize) -> String {
        let mut parts = vec![
            format!("{}{}", indent_str(indent), quote_ident(&self.name)),
        ];

        let mut ty = self.ty.sql_name().to_string();
        if let Some(length) = &self.length {
            ty.push_str(&length.to_sql(0));
        }
        parts.push(ty);

        if self.unsigned {
            parts.push("UNSIGNED".into());
        }
        if self.zero_fill {
            parts.push("ZEROFILL".into());
        }
        if self.binary {
            parts.push("BINARY".into());
        }
        match self.null_state {
            NullState::Unknown => {}
            NullState::Null => parts.push("NULL".into()),
            NullState::NotNull => parts.push("NOT NULL".into()),
        }
        if let Some(default) = &self.default {
            parts.push(format!("DEFAULT {}", default_literal(default)));
        }
        if self.auto_increment {
            parts.push("AUTO_INCREMENT".into());
        }
        if self.is_unique {
            parts.push("UNIQUE KEY".into());
        }
        if self.is_primary {
            parts.push("PRIMARY KEY".into());
        }
        if self.is_key {
            parts.push("KEY".into());
        }
        if let Some(comment) = &self.comment {
            parts.push(format!("COMMENT {}", quote_string(comment)));
        }

        parts.join(" ")
    }
}

// ===== Index =====

impl ToSql for Index {
    fn to_sql(&self, indent: usize) -> String {
        let mut parts = vec![indent_str(indent)];

        if let Some(symbol) = &self.symbol {
            parts.push(format!("CONSTRAINT {} ", quote_ident(symbol)));
        }

        parts.push(
            match self.kind {
                IndexKind::PrimaryKey => "PRIMARY KEY",
                IndexKind::Unique => "UNIQUE KEY",
                IndexKind::Normal => "KEY",
                IndexKind::FullText => "FULLTEXT KEY",
                IndexKind::Spatial => "SPATIAL KEY",
                IndexKind::ForeignKey => "FOREIGN KEY",
            }
            .to_string(),
        );

        if let Some(name) = &self.name {
            parts.push(format!(" {}", quote_ident(name)));
        }
        match self.index_type {
            IndexType::None => {}
            IndexType::BTree => parts.push(" USING BTREE".into()),
            IndexType::Hash => parts.push(" USING HASH".into()),
        }
        parts.push(format!(" ({})", quote_list(&self.columns)));

        if let Some(reference) = &self.reference {
            parts.push(" ".into());
            parts.push(reference.to_sql(0));
        }

        parts.concat()
    }
}

impl ToSql for Reference {
    fn to_sql(&self, indent: usize) -> String {
        let mut out = format!(
            "{}REFERENCES {} ({})",
            indent_str(indent),
            quote_ident(&self.table_name),
            quote_list(&self.columns)
        );
        if let Some(m) = self.match_kind {
            out.push_str(match m {
                ReferenceMatch::Full => " MATCH FULL",
                ReferenceMatch::Partial => " MATCH PARTIAL",
                ReferenceMatch::Simple => " MATCH SIMPLE",
            });
        }
        if let Some(action) = self.on_delete {
            out.push_str(" ON DELETE ");
            out.push_str(action.sql());
        }
        if let Some(action) = self.on_update {
            out.push_str(" ON UPDATE ");
            out.push_str(action.sql());
        }
        out
    }
}

macro_rules! display_via_sql {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.to_sql(0))
                }
            }
        )*
    };
}

display_via_sql!(Statements, Statement, Database, Table, TableOption, Column, Index, Reference, Length);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColumnType, ReferenceOption, Span};

    #[test]
    fn test_quote_ident_doubles_backticks() {
        assert_eq!(quote_ident("a`b"), "`a``b`");
    }

    #[test]
    fn test_quote_string_escapes() {
        assert_eq!(quote_string("it's"), "'it''s'");
        assert_eq!(quote_string("a\\b"), "'a\\\\b'");
    }

    #[test]
    fn test_column_attribute_order() {
        let mut col = Column::new("id", ColumnType::Int, Span::dummy());
        col.length = Some(Length::new("10"));
        col.unsigned = true;
        col.null_state = NullState::NotNull;
        col.auto_increment = true;
        col.comment = Some("row id".into());
        assert_eq!(
            col.to_string(),
            "`id` INT(10) UNSIGNED NOT NULL AUTO_INCREMENT COMMENT 'row id'"
        );
    }

    #[test]
    fn test_default_literals() {
        let mut col = Column::new("c", ColumnType::VarChar, Span::dummy());
        col.default = Some("abc".into());
        assert!(col.to_string().ends_with("DEFAULT 'abc'"));
        col.default = Some("-1.5".into());
        assert!(col.to_string().ends_with("DEFAULT -1.5"));
        col.default = Some("current_timestamp".into());
        assert!(col.to_string().ends_with("DEFAULT current_timestamp"));
        col.default = Some("1.".into());
        assert!(col.to_string().ends_with("DEFAULT '1.'"));
    }

    #[test]
    fn test_decimal_length() {
        assert_eq!(Length::with_decimal("10", "2").to_string(), "(10,2)");
        assert_eq!(Length::new("8").to_string(), "(8)");
    }

    #[test]
    fn test_foreign_key_with_reference() {
        let mut index = Index::new(IndexKind::ForeignKey, Span::dummy());
        index.symbol = Some("fk_user".into());
        index.columns = vec!["user_id".into()];
        let mut reference = Reference::new("users");
        reference.columns = vec!["id".into()];
        reference.on_delete = Some(ReferenceOption::SetNull);
        reference.on_update = Some(ReferenceOption::NoAction);
        index.reference = Some(reference);
        assert_eq!(
            index.to_string(),
            "CONSTRAINT `fk_user` FOREIGN KEY (`user_id`) REFERENCES `users` (`id`) \
             ON DELETE SET NULL ON UPDATE NO ACTION"
        );
    }

    #[test]
    fn test_table_layout() {
        let mut table = Table::new("t", Span::dummy());
        table.temporary = true;
        table.if_not_exists = true;
        table.columns.push(Column::new("a", ColumnType::Int, Span::dummy()));
        let mut pk = Index::new(IndexKind::PrimaryKey, Span::dummy());
        pk.columns = vec!["a".into()];
        table.indexes.push(pk);
        table.options.push(TableOption::new("ENGINE", "InnoDB"));
        table.options.push(TableOption::new("COMMENT", "x"));
        assert_eq!(
            table.to_string(),
            "CREATE TEMPORARY TABLE IF NOT EXISTS `t` (\n  `a` INT,\n  PRIMARY KEY (`a`)\n) \
             ENGINE = InnoDB COMMENT = 'x';"
        );
    }

    #[test]
    fn test_option_values_quoted_unless_bare_identifier() {
        let sql = |key: &str, value: &str| TableOption::new(key, value).to_string();
        assert_eq!(sql("ENGINE", "InnoDB"), "ENGINE = InnoDB");
        assert_eq!(sql("DEFAULT CHARACTER SET", "binary"), "DEFAULT CHARACTER SET = `binary`");
        assert_eq!(sql("ENGINE", "1engine"), "ENGINE = `1engine`");
        assert_eq!(sql("ENGINE", "my-engine"), "ENGINE = `my-engine`");
        assert_eq!(sql("AUTO_INCREMENT", "100"), "AUTO_INCREMENT = 100");
        assert_eq!(sql("ROW_FORMAT", "dynamic"), "ROW_FORMAT = dynamic");
        assert_eq!(sql("STATS_PERSISTENT", "DEFAULT"), "STATS_PERSISTENT = DEFAULT");
        assert_eq!(sql("INSERT_METHOD", "NO"), "INSERT_METHOD = NO");
    }

    #[test]
    fn test_is_keyword() {
        assert!(KEYWORDS.windows(2).all(|w| w[0] < w[1]));
        assert!(is_keyword("binary"));
        assert!(is_keyword("Row_Format"));
        assert!(!is_keyword("utf8mb4"));
        assert!(!is_keyword("InnoDB"));
    }

    #[test]
    fn test_database() {
        let mut db = Database::new("app", Span::dummy());
        db.if_not_exists = true;
        assert_eq!(db.to_string(), "CREATE DATABASE IF NOT EXISTS `app`;");
    }

    #[test]
    fn test_statements_serialize_as_list() {
        let mut stmts = Statements::new();
        stmts.push(Statement::Table(Table::new("t", Span::dummy())));
        let json = serde_json::to_value(&stmts).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["Table"]["name"], "t");
    }
}
