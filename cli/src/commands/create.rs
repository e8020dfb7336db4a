//! Create-table migration command
//!
//! This command:
//! 1. Parses the field list into typed columns
//! 2. Renders a `CREATE TABLE` statement
//! 3. Writes it to `<out>/<YYYYMMDDHHMMSS>_create_<table>.sql`
//! 4. Loads connection settings, connects and applies the statement
//!
//! Steps after the write never remove the file: it records the intended
//! migration whether or not the database accepted it.

use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use colored::Colorize;
use migrator_migrations::{
    CreateTable, Execute, MigrationWriter, ParseMode, WrittenMigration, parse_fields_with,
};

use crate::config::DbConfig;
use crate::db::Database;
use crate::error::CliError;
use crate::output;

pub struct CreateOptions {
    pub table: String,
    pub fields: String,
    pub out: PathBuf,
    pub env_file: PathBuf,
    pub mode: ParseMode,
    pub apply: bool,
}

/// Run the full pipeline against the local clock and the configured database.
pub fn run(opts: &CreateOptions) -> Result<(), CliError> {
    let written = generate(opts, Local::now().naive_local())?;

    println!(
        "{} {}",
        output::success("SQL file generated:"),
        written.filename.cyan()
    );

    if !opts.apply {
        println!("{}", output::muted("Skipping database apply (--no-apply)"));
        return Ok(());
    }

    let config = DbConfig::load(&opts.env_file)?;
    let mut db = Database::connect(&config)?;
    println!("{}", output::label("Connected to PostgreSQL"));

    apply(&mut db, &written)?;
    println!("{}", output::success("Migration applied to database"));

    Ok(())
}

/// Parse, render and write the migration file stamped with `at`.
pub fn generate(opts: &CreateOptions, at: NaiveDateTime) -> Result<WrittenMigration, CliError> {
    let fields = parse_fields_with(&opts.fields, opts.mode)?;
    let create = CreateTable::new(opts.table.as_str(), fields);

    if let Some(field) = create.conflicting_id() {
        eprintln!(
            "{}",
            output::warn_line(&format!(
                "field '{}' duplicates the generated 'id SERIAL PRIMARY KEY' column; \
                 the database will reject the statement",
                field.name
            ))
        );
    }

    tracing::debug!(table = %create.table, fields = create.fields.len(), "planned migration");

    let writer = MigrationWriter::new(&opts.out);
    let written = writer.write_create_table(&create, at)?;

    tracing::debug!(sql = %written.sql, "migration contents");
    Ok(written)
}

/// Execute a written migration. On failure the file stays where it is.
pub fn apply<E: Execute>(exec: &mut E, written: &WrittenMigration) -> Result<(), CliError> {
    exec.execute(&written.sql)
        .map_err(|e| CliError::MigrationError {
            path: written.path.clone(),
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use migrator_migrations::Recorder;
    use tempfile::TempDir;

    struct Rejecting;

    impl Execute for Rejecting {
        type Error = String;

        fn execute(&mut self, _sql: &str) -> Result<(), Self::Error> {
            Err("relation \"users\" already exists".into())
        }
    }

    fn opts(out: PathBuf, fields: &str) -> CreateOptions {
        CreateOptions {
            table: "users".into(),
            fields: fields.into(),
            out,
            env_file: PathBuf::from(".env"),
            mode: ParseMode::Lenient,
            apply: true,
        }
    }

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 3)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn generate_writes_expected_file() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("migrations");

        let written = generate(&opts(out.clone(), "name:string,age:int"), noon()).unwrap();

        assert_eq!(written.path, out.join("20240203120000_create_users.sql"));
        assert_eq!(
            std::fs::read_to_string(&written.path).unwrap(),
            "CREATE TABLE users (\n  name TEXT,\n  age INTEGER,\n  id SERIAL PRIMARY KEY\n);\n"
        );
    }

    #[test]
    fn apply_runs_generated_sql_once() {
        let temp = TempDir::new().unwrap();
        let written = generate(&opts(temp.path().into(), "name:string"), noon()).unwrap();

        let mut recorder = Recorder::default();
        apply(&mut recorder, &written).unwrap();

        assert_eq!(recorder.statements, vec![written.sql.clone()]);
    }

    #[test]
    fn failed_apply_keeps_file() {
        let temp = TempDir::new().unwrap();
        let written = generate(&opts(temp.path().into(), "name:string,age:int"), noon()).unwrap();

        let err = apply(&mut Rejecting, &written).unwrap_err();

        assert!(matches!(err, CliError::MigrationError { .. }));
        assert!(err.to_string().contains("already exists"));
        assert_eq!(std::fs::read_to_string(&written.path).unwrap(), written.sql);
    }

    #[test]
    fn strict_mode_rejects_before_writing() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("migrations");
        let mut strict = opts(out.clone(), "a:string,bad");
        strict.mode = ParseMode::Strict;

        let err = generate(&strict, noon()).unwrap_err();

        assert!(matches!(err, CliError::Fields(_)));
        assert!(!out.exists());
    }
}
