//! Execution seam between generated migrations and a database driver
//!
//! Drivers live in the CLI crate; this crate only needs something that can
//! run one SQL statement. Keeping it a trait lets the apply step be exercised
//! without a live database.

use std::fmt;

/// Something that can execute a single DDL statement.
pub trait Execute {
    /// Driver-specific error type
    type Error: fmt::Display;

    /// Execute `sql` as one statement.
    fn execute(&mut self, sql: &str) -> Result<(), Self::Error>;
}

impl<E: Execute + ?Sized> Execute for &mut E {
    type Error = E::Error;

    fn execute(&mut self, sql: &str) -> Result<(), Self::Error> {
        (**self).execute(sql)
    }
}

/// In-memory [`Execute`] that records statements instead of running them.
///
/// Public on purpose: it is the test double for code that takes an
/// `Execute`, in this workspace and downstream. It never fails, so it only
/// covers the success path; write a small failing executor for the rest.
///
/// ```
/// use migrator_migrations::{CreateTable, Execute, Field, PostgresGenerator, Recorder};
///
/// let sql = PostgresGenerator::new()
///     .generate_create_table(&CreateTable::new("users", vec![Field::new("name", "string")]));
///
/// let mut recorder = Recorder::default();
/// recorder.execute(&sql).unwrap();
/// assert_eq!(recorder.statements, [sql]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    pub statements: Vec<String>,
}

impl Execute for Recorder {
    type Error = std::convert::Infallible;

    fn execute(&mut self, sql: &str) -> Result<(), Self::Error> {
        self.statements.push(sql.to_string());
        Ok(())
    }
}
