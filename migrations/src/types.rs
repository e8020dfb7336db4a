//! Logical type mapping
//!
//! The command line accepts a small vocabulary of logical type names
//! (`string`, `int`, `integer`, `smallint`, `datetime`). [`ColumnType`]
//! resolves them to PostgreSQL column types. The lookup is case-insensitive
//! and total: anything unrecognized falls back to [`ColumnType::Text`].

use std::fmt;

/// PostgreSQL column type produced by the mapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColumnType {
    #[default]
    Text,
    Integer,
    SmallInt,
    Timestamp,
}

impl ColumnType {
    /// Logical type names with a dedicated mapping
    pub const KNOWN: &'static [&'static str] = &["string", "int", "integer", "smallint", "datetime"];

    /// Map a logical type name, falling back to `TEXT` for unknown names.
    pub fn from_logical(name: &str) -> Self {
        Self::lookup(name).unwrap_or_default()
    }

    /// Map a logical type name, returning `None` for unknown names.
    pub fn lookup(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "string" => Some(Self::Text),
            "int" | "integer" => Some(Self::Integer),
            "smallint" => Some(Self::SmallInt),
            "datetime" => Some(Self::Timestamp),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Integer => "INTEGER",
            Self::SmallInt => "SMALLINT",
            Self::Timestamp => "TIMESTAMP",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}
