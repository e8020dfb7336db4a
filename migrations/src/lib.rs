//! Migrator Migrations - building blocks for single-table migrations
//!
//! This crate turns a table name and a `name:type` field list into a
//! PostgreSQL `CREATE TABLE` statement and writes it to a timestamped file:
//!
//! ```
//! use migrator_migrations::{CreateTable, parse_fields};
//!
//! let create = CreateTable::new("users", parse_fields("name:string,age:int"));
//! assert_eq!(
//!     create.to_sql(),
//!     "CREATE TABLE users (\n  name TEXT,\n  age INTEGER,\n  id SERIAL PRIMARY KEY\n);\n"
//! );
//! ```
//!
//! Applying the statement is left to an [`Execute`] implementation; the
//! `migrator` binary provides one backed by the `postgres` crate.

pub mod field;
pub mod sqlgen;
pub mod traits;
pub mod types;
pub mod writer;

pub use field::{Field, FieldError, ParseMode, parse_fields, parse_fields_with};
pub use sqlgen::{CreateTable, PostgresGenerator};
pub use traits::{Execute, Recorder};
pub use types::ColumnType;
pub use writer::{MigrationWriter, WriteError, WrittenMigration, migration_filename};
