//! # migrator
//!
//! Generate single-table PostgreSQL migrations from a `name:type` field list.
//!
//! ## Quick Start
//!
//! ```rust
//! use migrator::{CreateTable, parse_fields};
//!
//! let create = CreateTable::new("users", parse_fields("name:string,age:int"));
//! let sql = create.to_sql();
//!
//! assert!(sql.starts_with("CREATE TABLE users ("));
//! assert!(sql.ends_with("  id SERIAL PRIMARY KEY\n);\n"));
//! ```
//!
//! ## Logical types
//!
//! | Input                | Column type |
//! |----------------------|-------------|
//! | `string`             | `TEXT`      |
//! | `int`, `integer`     | `INTEGER`   |
//! | `smallint`           | `SMALLINT`  |
//! | `datetime`           | `TIMESTAMP` |
//! | anything else        | `TEXT`      |
//!
//! The command-line tool lives in the `migrator-cli` crate (binary
//! `migrator`).

pub use migrator_migrations::*;
