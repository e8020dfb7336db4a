//! PostgreSQL SQL generation for `CREATE TABLE` migrations

use crate::field::{Field, PRIMARY_KEY_COLUMN};

/// Column definition appended after all caller-supplied fields
pub const PRIMARY_KEY_DEFINITION: &str = "id SERIAL PRIMARY KEY";

/// A single-table migration: the table name and its ordered fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTable {
    pub table: String,
    pub fields: Vec<Field>,
}

impl CreateTable {
    pub fn new(table: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            table: table.into(),
            fields,
        }
    }

    /// The first caller-supplied field named like the generated primary key.
    ///
    /// Such a field still renders as-is; the database reports the duplicate
    /// column when the statement is applied.
    pub fn conflicting_id(&self) -> Option<&Field> {
        self.fields.iter().find(|f| f.is_primary_key_name())
    }

    /// Render with the default generator
    pub fn to_sql(&self) -> String {
        PostgresGenerator::new().generate_create_table(self)
    }
}

/// PostgreSQL SQL generator
#[derive(Debug, Clone)]
pub struct PostgresGenerator {
    indent: &'static str,
}

impl Default for PostgresGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PostgresGenerator {
    pub fn new() -> Self {
        Self { indent: "  " }
    }

    /// Generate CREATE TABLE
    ///
    /// Identifiers are emitted verbatim. The `id` column is always last.
    pub fn generate_create_table(&self, create: &CreateTable) -> String {
        let mut sql = format!("CREATE TABLE {} (\n", create.table);

        for field in &create.fields {
            sql.push_str(&format!(
                "{}{} {},\n",
                self.indent, field.name, field.column_type
            ));
        }

        sql.push_str(&format!("{}{}\n);\n", self.indent, PRIMARY_KEY_DEFINITION));

        tracing::debug!(
            table = %create.table,
            columns = create.fields.len() + 1,
            primary_key = PRIMARY_KEY_COLUMN,
            "generated CREATE TABLE"
        );

        sql
    }
}
