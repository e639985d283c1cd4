//! Column definitions

use serde::{Deserialize, Serialize};
use crate::Span;

/// A column inside `CREATE TABLE ( ... )`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub ty: ColumnType,
    pub length: Option<Length>,
    pub unsigned: bool,
    pub zero_fill: bool,
    pub binary: bool,
    pub null_state: NullState,
    /// Default value with quotes removed, so `DEFAULT 'NULL'` and
    /// `DEFAULT NULL` are stored alike
    pub default: Option<String>,
    pub auto_increment: bool,
    pub is_key: bool,
    pub is_unique: bool,
    pub is_primary: bool,
    pub comment: Option<String>,
    pub span: Span,
}

impl Column {
    pub fn new(name: impl Into<String>, ty: ColumnType, span: Span) -> Self {
        Self {
            name: name.into(),
            ty,
            length: None,
            unsigned: false,
            zero_fill: false,
            binary: false,
            null_state: NullState::Unknown,
            default: None,
            auto_increment: false,
            is_key: false,
            is_unique: false,
            is_primary: false,
            comment: None,
            span,
        }
    }
}

/// Nullability as written in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NullState {
    /// Neither `NULL` nor `NOT NULL` was given
    #[default]
    Unknown,
    Null,
    NotNull,
}

/// Display width / precision of a column type, kept as source text.
///
/// `DECIMAL(10,2)` is `{ value: "10", decimal: Some("2") }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Length {
    pub value: String,
    pub decimal: Option<String>,
}

impl Length {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            decimal: None,
        }
    }

    pub fn with_decimal(value: impl Into<String>, decimal: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            decimal: Some(decimal.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Bit,
    TinyInt,
    SmallInt,
    MediumInt,
    Int,
    Integer,
    BigInt,
    Real,
    Double,
    Float,
    Decimal,
    Numeric,
    Date,
    Time,
    Timestamp,
    DateTime,
    Year,
    Char,
    VarChar,
    Binary,
    VarBinary,
    TinyBlob,
    Blob,
    MediumBlob,
    LongBlob,
    TinyText,
    Text,
    MediumText,
    LongText,
}

/// Broad grouping of column types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeFamily {
    Integer,
    Decimal,
    Temporal,
    Character,
    Binary,
}

impl ColumnType {
    /// Upper-case MySQL spelling
    pub fn sql_name(&self) -> &'static str {
        match self {
            ColumnType::Bit => "BIT",
            ColumnType::TinyInt => "TINYINT",
            ColumnType::SmallInt => "SMALLINT",
            ColumnType::MediumInt => "MEDIUMINT",
            ColumnType::Int => "INT",
            ColumnType::Integer => "INTEGER",
            ColumnType::BigInt => "BIGINT",
            ColumnType::Real => "REAL",
            ColumnType::Double => "DOUBLE",
            ColumnType::Float => "FLOAT",
            ColumnType::Decimal => "DECIMAL",
            ColumnType::Numeric => "NUMERIC",
            ColumnType::Date => "DATE",
            ColumnType::Time => "TIME",
            ColumnType::Timestamp => "TIMESTAMP",
            ColumnType::DateTime => "DATETIME",
            ColumnType::Year => "YEAR",
            ColumnType::Char => "CHAR",
            ColumnType::VarChar => "VARCHAR",
            ColumnType::Binary => "BINARY",
            ColumnType::VarBinary => "VARBINARY",
            ColumnType::TinyBlob => "TINYBLOB",
            ColumnType::Blob => "BLOB",
            ColumnType::MediumBlob => "MEDIUMBLOB",
            ColumnType::LongBlob => "LONGBLOB",
            ColumnType::TinyText => "TINYTEXT",
            ColumnType::Text => "TEXT",
            ColumnType::MediumText => "MEDIUMTEXT",
            ColumnType::LongText => "LONGTEXT",
        }
    }

    pub fn family(&self) -> TypeFamily {
        match self {
            ColumnType::Bit
            | ColumnType::TinyInt
            | ColumnType::SmallInt
            | ColumnType::MediumInt
            | ColumnType::Int
            | ColumnType::Integer
            | ColumnType::BigInt => TypeFamily::Integer,
            ColumnType::Real
            | ColumnType::Double
            | ColumnType::Float
            | ColumnType::Decimal
            | ColumnType::Numeric => TypeFamily::Decimal,
            ColumnType::Date
            | ColumnType::Time
            | ColumnType::Timestamp
            | ColumnType::DateTime
            | ColumnType::Year => TypeFamily::Temporal,
            ColumnType::Char
            | ColumnType::VarChar
            | ColumnType::TinyText
            | ColumnType::Text
            | ColumnType::MediumText
            | ColumnType::LongText => TypeFamily::Character,
            ColumnType::Binary
            | ColumnType::VarBinary
            | ColumnType::TinyBlob
            | ColumnType::Blob
            | ColumnType::MediumBlob
            | ColumnType::LongBlob => TypeFamily::Binary,
        }
    }
}
