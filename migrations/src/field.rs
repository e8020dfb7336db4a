//! Field list parsing
//!
//! Fields arrive as one comma-separated string of `name:type` pairs, for
//! example `name:string,age:int`. Parsing is lenient by default: a segment
//! with fewer than two colon-separated tokens is dropped without error, and
//! unknown logical types resolve to `TEXT`. [`ParseMode::Strict`] turns both
//! of those into errors.

use crate::types::ColumnType;

/// Name of the surrogate primary key column appended to every table
pub const PRIMARY_KEY_COLUMN: &str = "id";

/// A parsed column definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Column name, passed through unescaped
    pub name: String,
    /// Logical type as written on the command line
    pub logical_type: String,
    /// Resolved column type
    pub column_type: ColumnType,
}

impl Field {
    pub fn new(name: impl Into<String>, logical_type: impl Into<String>) -> Self {
        let logical_type = logical_type.into();
        let column_type = ColumnType::from_logical(&logical_type);
        Self {
            name: name.into(),
            logical_type,
            column_type,
        }
    }

    /// Whether this field collides with the appended primary key column
    pub fn is_primary_key_name(&self) -> bool {
        self.name.eq_ignore_ascii_case(PRIMARY_KEY_COLUMN)
    }
}

/// How strictly the field list is validated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Skip malformed segments and map unknown types to `TEXT`
    #[default]
    Lenient,
    /// Reject malformed segments, unknown types and a caller-supplied `id`
    Strict,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("malformed field '{segment}': expected name:type")]
    Malformed { segment: String },

    #[error("unknown type '{logical_type}' for field '{name}' (known: {known})", known = ColumnType::KNOWN.join(", "))]
    UnknownType { name: String, logical_type: String },

    #[error("field '{0}' conflicts with the generated primary key column")]
    ReservedId(String),
}

/// Parse a raw field list with lenient rules.
///
/// Only the first two tokens of each segment are used, so `a:int:x` is
/// the field `a` of type `int`.
pub fn parse_fields(raw: &str) -> Vec<Field> {
    raw.split(',')
        .filter_map(|segment| {
            let mut parts = segment.split(':');
            match (parts.next(), parts.next()) {
                (Some(name), Some(ty)) => Some(Field::new(name, ty)),
                _ => {
                    tracing::debug!(segment, "skipping malformed field segment");
                    None
                }
            }
        })
        .collect()
}

/// Parse a raw field list according to `mode`.
pub fn parse_fields_with(raw: &str, mode: ParseMode) -> Result<Vec<Field>, FieldError> {
    match mode {
        ParseMode::Lenient => Ok(parse_fields(raw)),
        ParseMode::Strict => raw.split(',').map(parse_strict_segment).collect(),
    }
}

fn parse_strict_segment(segment: &str) -> Result<Field, FieldError> {
    let malformed = || FieldError::Malformed {
        segment: segment.to_string(),
    };

    let (name, ty) = segment.split_once(':').ok_or_else(malformed)?;
    if name.is_empty() || ty.is_empty() || ty.contains(':') {
        return Err(malformed());
    }

    if ColumnType::lookup(ty).is_none() {
        return Err(FieldError::UnknownType {
            name: name.to_string(),
            logical_type: ty.to_string(),
        });
    }

    let field = Field::new(name, ty);
    if field.is_primary_key_name() {
        return Err(FieldError::ReservedId(field.name));
    }
    Ok(field)
}
