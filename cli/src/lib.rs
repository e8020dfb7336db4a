//! Migrator CLI - create-table migrations from the command line
//!
//! ```bash
//! migrator users --fields="name:string,age:int"
//! ```
//!
//! writes `migrations/<YYYYMMDDHHMMSS>_create_users.sql`:
//!
//! ```sql
//! CREATE TABLE users (
//!   name TEXT,
//!   age INTEGER,
//!   id SERIAL PRIMARY KEY
//! );
//! ```
//!
//! and then applies it to the PostgreSQL database described by `.env`:
//!
//! ```text
//! DB_HOST=localhost
//! DB_PORT=5432
//! DB_USER=postgres
//! DB_PASSWORD=postgres
//! DB_NAME=app
//! DB_SSLMODE=disable
//! ```
//!
//! `DB_SSLMODE` takes the libpq names: `disable` is plaintext, `allow`,
//! `prefer` and `require` encrypt without checking the certificate,
//! `verify-ca` checks the chain and `verify-full` also checks the hostname.
//!
//! Pass `--no-apply` to only write the file, `--strict` to reject malformed
//! fields and unknown types instead of skipping or defaulting them.

pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod output;

pub use config::{ConfigError, DbConfig};
pub use error::CliError;
