//! Token definitions for MySQL DDL

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // === Statements ===
    #[token("create", ignore(ascii_case))]
    Create,
    #[token("database", ignore(ascii_case))]
    Database,
    #[token("table", ignore(ascii_case))]
    Table,
    #[token("temporary", ignore(ascii_case))]
    Temporary,
    #[token("if", ignore(ascii_case))]
    If,
    #[token("not", ignore(ascii_case))]
    Not,
    #[token("exists", ignore(ascii_case))]
    Exists,
    #[token("drop", ignore(ascii_case))]
    Drop,
    #[token("set", ignore(ascii_case))]
    Set,
    #[token("use", ignore(ascii_case))]
    Use,

    // === Indexes and constraints ===
    #[token("constraint", ignore(ascii_case))]
    Constraint,
    #[token("primary", ignore(ascii_case))]
    Primary,
    #[token("unique", ignore(ascii_case))]
    Unique,
    #[token("key", ignore(ascii_case))]
    Key,
    #[token("index", ignore(ascii_case))]
    Index,
    #[token("fulltext", ignore(ascii_case))]
    FullText,
    #[token("spatial", ignore(ascii_case))]
    Spatial,
    #[token("foreign", ignore(ascii_case))]
    Foreign,
    #[token("references", ignore(ascii_case))]
    References,
    #[token("check", ignore(ascii_case))]
    Check,
    #[token("using", ignore(ascii_case))]
    Using,
    #[token("btree", ignore(ascii_case))]
    BTree,
    #[token("hash", ignore(ascii_case))]
    Hash,
    #[token("match", ignore(ascii_case))]
    Match,
    #[token("full", ignore(ascii_case))]
    Full,
    #[token("partial", ignore(ascii_case))]
    Partial,
    #[token("simple", ignore(ascii_case))]
    Simple,
    #[token("on", ignore(ascii_case))]
    On,
    #[token("delete", ignore(ascii_case))]
    Delete,
    #[token("update", ignore(ascii_case))]
    Update,
    #[token("restrict", ignore(ascii_case))]
    Restrict,
    #[token("cascade", ignore(ascii_case))]
    Cascade,
    #[token("no", ignore(ascii_case))]
    No,
    #[token("action", ignore(ascii_case))]
    Action,

    // === Column attributes ===
    #[token("null", ignore(ascii_case))]
    Null,
    #[token("default", ignore(ascii_case))]
    Default,
    #[token("auto_increment", ignore(ascii_case))]
    AutoIncrement,
    #[token("comment", ignore(ascii_case))]
    Comment,
    #[token("current_timestamp", ignore(ascii_case))]
    CurrentTimestamp,
    #[token("unsigned", ignore(ascii_case))]
    Unsigned,
    #[token("zerofill", ignore(ascii_case))]
    ZeroFill,

    // === Column types ===
    #[token("bit", ignore(ascii_case))]
    Bit,
    #[token("tinyint", ignore(ascii_case))]
    TinyInt,
    #[token("smallint", ignore(ascii_case))]
    SmallInt,
    #[token("mediumint", ignore(ascii_case))]
    MediumInt,
    #[token("int", ignore(ascii_case))]
    Int,
    #[token("integer", ignore(ascii_case))]
    Integer,
    #[token("bigint", ignore(ascii_case))]
    BigInt,
    #[token("real", ignore(ascii_case))]
    Real,
    #[token("double", ignore(ascii_case))]
    Double,
    #[token("float", ignore(ascii_case))]
    Float,
    #[token("decimal", ignore(ascii_case))]
    Decimal,
    #[token("numeric", ignore(ascii_case))]
    Numeric,
    #[token("date", ignore(ascii_case))]
    Date,
    #[token("time", ignore(ascii_case))]
    Time,
    #[token("timestamp", ignore(ascii_case))]
    Timestamp,
    #[token("datetime", ignore(ascii_case))]
    DateTime,
    #[token("year", ignore(ascii_case))]
    Year,
    #[token("char", ignore(ascii_case))]
    Char,
    #[token("varchar", ignore(ascii_case))]
    VarChar,
    #[token("binary", ignore(ascii_case))]
    Binary,
    #[token("varbinary", ignore(ascii_case))]
    VarBinary,
    #[token("tinyblob", ignore(ascii_case))]
    TinyBlob,
    #[token("blob", ignore(ascii_case))]
    Blob,
    #[token("mediumblob", ignore(ascii_case))]
    MediumBlob,
    #[token("longblob", ignore(ascii_case))]
    LongBlob,
    #[token("tinytext", ignore(ascii_case))]
    TinyText,
    #[token("text", ignore(ascii_case))]
    Text,
    #[token("mediumtext", ignore(ascii_case))]
    MediumText,
    #[token("longtext", ignore(ascii_case))]
    LongText,

    // === Table options ===
    #[token("engine", ignore(ascii_case))]
    Engine,
    #[token("avg_row_length", ignore(ascii_case))]
    AvgRowLength,
    #[token("character", ignore(ascii_case))]
    Character,
    #[token("charset", ignore(ascii_case))]
    Charset,
    #[token("collate", ignore(ascii_case))]
    Collate,
    #[token("checksum", ignore(ascii_case))]
    Checksum,
    #[token("connection", ignore(ascii_case))]
    Connection,
    #[token("data", ignore(ascii_case))]
    Data,
    #[token("directory", ignore(ascii_case))]
    Directory,
    #[token("delay_key_write", ignore(ascii_case))]
    DelayKeyWrite,
    #[token("insert_method", ignore(ascii_case))]
    InsertMethod,
    #[token("key_block_size", ignore(ascii_case))]
    KeyBlockSize,
    #[token("max_rows", ignore(ascii_case))]
    MaxRows,
    #[token("min_rows", ignore(ascii_case))]
    MinRows,
    #[token("pack_keys", ignore(ascii_case))]
    PackKeys,
    #[token("password", ignore(ascii_case))]
    Password,
    #[token("row_format", ignore(ascii_case))]
    RowFormat,
    #[token("dynamic", ignore(ascii_case))]
    Dynamic,
    #[token("fixed", ignore(ascii_case))]
    Fixed,
    #[token("compressed", ignore(ascii_case))]
    Compressed,
    #[token("redundant", ignore(ascii_case))]
    Redundant,
    #[token("compact", ignore(ascii_case))]
    Compact,
    #[token("stats_auto_recalc", ignore(ascii_case))]
    StatsAutoRecalc,
    #[token("stats_persistent", ignore(ascii_case))]
    StatsPersistent,
    #[token("stats_sample_pages", ignore(ascii_case))]
    StatsSamplePages,
    #[token("tablespace", ignore(ascii_case))]
    Tablespace,
    #[token("union", ignore(ascii_case))]
    Union,

    // === Punctuation ===
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("=")]
    Equal,

    // === Literals and identifiers ===
    #[regex(r"-?[0-9]+(\.[0-9]+)?")]
    Number,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_$]*")]
    Ident,

    #[regex(r"`([^`]|``)*`")]
    BacktickIdent,

    #[regex(r"'([^'\\]|\\(.|\n)|'')*'")]
    SingleQuoteIdent,

    #[regex(r#""([^"\\]|\\(.|\n)|"")*""#)]
    DoubleQuoteIdent,

    // === Trivia ===
    #[regex(r"[ \t\r\n\f]+")]
    Space,

    #[regex(r"#[^\n]*")]
    #[regex(r"--[^\n]*")]
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    CommentIdent,

    // === Special ===
    Error,
    Eof,
}

impl TokenKind {
    pub fn is_keyword(&self) -> bool {
        self.keyword().is_some()
    }

    /// Whitespace and comments
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Space | TokenKind::CommentIdent)
    }

    /// Bare or back-quoted identifier
    pub fn is_ident(&self) -> bool {
        matches!(self, TokenKind::Ident | TokenKind::BacktickIdent)
    }

    /// Upper-case spelling of a keyword kind
    pub fn keyword(&self) -> Option<&'static str> {
        let kw = match self {
            TokenKind::Create => "CREATE",
            TokenKind::Database => "DATABASE",
            TokenKind::Table => "TABLE",
            TokenKind::Temporary => "TEMPORARY",
            TokenKind::If => "IF",
            TokenKind::Not => "NOT",
            TokenKind::Exists => "EXISTS",
            TokenKind::Drop => "DROP",
            TokenKind::Set => "SET",
            TokenKind::Use => "USE",
            TokenKind::Constraint => "CONSTRAINT",
            TokenKind::Primary => "PRIMARY",
            TokenKind::Unique => "UNIQUE",
            TokenKind::Key => "KEY",
            TokenKind::Index => "INDEX",
            TokenKind::FullText => "FULLTEXT",
            TokenKind::Spatial => "SPATIAL",
            TokenKind::Foreign => "FOREIGN",
            TokenKind::References => "REFERENCES",
            TokenKind::Check => "CHECK",
            TokenKind::Using => "USING",
            TokenKind::BTree => "BTREE",
            TokenKind::Hash => "HASH",
            TokenKind::Match => "MATCH",
            TokenKind::Full => "FULL",
            TokenKind::Partial => "PARTIAL",
            TokenKind::Simple => "SIMPLE",
            TokenKind::On => "ON",
            TokenKind::Delete => "DELETE",
            TokenKind::Update => "UPDATE",
            TokenKind::Restrict => "RESTRICT",
            TokenKind::Cascade => "CASCADE",
            TokenKind::No => "NO",
            TokenKind::Action => "ACTION",
            TokenKind::Null => "NULL",
            TokenKind::Default => "DEFAULT",
            TokenKind::AutoIncrement => "AUTO_INCREMENT",
            TokenKind::Comment => "COMMENT",
            TokenKind::CurrentTimestamp => "CURRENT_TIMESTAMP",
            TokenKind::Unsigned => "UNSIGNED",
            TokenKind::ZeroFill => "ZEROFILL",
            TokenKind::Bit => "BIT",
            TokenKind::TinyInt => "TINYINT",
            TokenKind::SmallInt => "SMALLINT",
            TokenKind::MediumInt => "MEDIUMINT",
            TokenKind::Int => "INT",
            TokenKind::Integer => "INTEGER",
            TokenKind::BigInt => "BIGINT",
            TokenKind::Real => "REAL",
            TokenKind::Double => "DOUBLE",
            TokenKind::Float => "FLOAT",
            TokenKind::Decimal => "DECIMAL",
            TokenKind::Numeric => "NUMERIC",
            TokenKind::Date => "DATE",
            TokenKind::Time => "TIME",
            TokenKind::Timestamp => "TIMESTAMP",
            TokenKind::DateTime => "DATETIME",
            TokenKind::Year => "YEAR",
            TokenKind::Char => "CHAR",
            TokenKind::VarChar => "VARCHAR",
            TokenKind::Binary => "BINARY",
            TokenKind::VarBinary => "VARBINARY",
            TokenKind::TinyBlob => "TINYBLOB",
            TokenKind::Blob => "BLOB",
            TokenKind::MediumBlob => "MEDIUMBLOB",
            TokenKind::LongBlob => "LONGBLOB",
            TokenKind::TinyText => "TINYTEXT",
            TokenKind::Text => "TEXT",
            TokenKind::MediumText => "MEDIUMTEXT",
            TokenKind::LongText => "LONGTEXT",
            TokenKind::Engine => "ENGINE",
            TokenKind::AvgRowLength => "AVG_ROW_LENGTH",
            TokenKind::Character => "CHARACTER",
            TokenKind::Charset => "CHARSET",
            TokenKind::Collate => "COLLATE",
            TokenKind::Checksum => "CHECKSUM",
            TokenKind::Connection => "CONNECTION",
            TokenKind::Data => "DATA",
            TokenKind::Directory => "DIRECTORY",
            TokenKind::DelayKeyWrite => "DELAY_KEY_WRITE",
            TokenKind::InsertMethod => "INSERT_METHOD",
            TokenKind::KeyBlockSize => "KEY_BLOCK_SIZE",
            TokenKind::MaxRows => "MAX_ROWS",
            TokenKind::MinRows => "MIN_ROWS",
            TokenKind::PackKeys => "PACK_KEYS",
            TokenKind::Password => "PASSWORD",
            TokenKind::RowFormat => "ROW_FORMAT",
            TokenKind::Dynamic => "DYNAMIC",
            TokenKind::Fixed => "FIXED",
            TokenKind::Compressed => "COMPRESSED",
            TokenKind::Redundant => "REDUNDANT",
            TokenKind::Compact => "COMPACT",
            TokenKind::StatsAutoRecalc => "STATS_AUTO_RECALC",
            TokenKind::StatsPersistent => "STATS_PERSISTENT",
            TokenKind::StatsSamplePages => "STATS_SAMPLE_PAGES",
            TokenKind::Tablespace => "TABLESPACE",
            TokenKind::Union => "UNION",
            TokenKind::LParen
            | TokenKind::RParen
            | TokenKind::Comma
            | TokenKind::Semicolon
            | TokenKind::Equal
            | TokenKind::Number
            | TokenKind::Ident
            | TokenKind::BacktickIdent
            | TokenKind::SingleQuoteIdent
            | TokenKind::DoubleQuoteIdent
            | TokenKind::Space
            | TokenKind::CommentIdent
            | TokenKind::Error
            | TokenKind::Eof => return None,
        };
        Some(kw)
    }

    pub fn describe(&self) -> &'static str {
        if let Some(kw) = self.keyword() {
            return kw;
        }
        match self {
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Comma => "','",
            TokenKind::Semicolon => "';'",
            TokenKind::Equal => "'='",
            TokenKind::Number => "number",
            TokenKind::Ident => "identifier",
            TokenKind::BacktickIdent => "quoted identifier",
            TokenKind::SingleQuoteIdent => "single-quoted string",
            TokenKind::DoubleQuoteIdent => "double-quoted string",
            TokenKind::Space => "whitespace",
            TokenKind::CommentIdent => "comment",
            TokenKind::Error => "invalid input",
            TokenKind::Eof => "end of input",
            _ => "keyword",
        }
    }
}
