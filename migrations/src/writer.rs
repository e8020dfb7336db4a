//! Migration file writer

use crate::sqlgen::CreateTable;
use chrono::NaiveDateTime;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default output directory, relative to the working directory
pub const DEFAULT_MIGRATIONS_DIR: &str = "migrations";

/// Timestamp prefix format (`YYYYMMDDHHMMSS`)
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Build the file name for a `CREATE TABLE` migration taken at `at`.
pub fn migration_filename(table: &str, at: NaiveDateTime) -> String {
    format!("{}_create_{}.sql", at.format(TIMESTAMP_FORMAT), table)
}

/// A migration file that has been written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenMigration {
    pub filename: String,
    pub path: PathBuf,
    pub sql: String,
}

/// Migration writer for creating migration files
#[derive(Debug, Clone)]
pub struct MigrationWriter {
    /// Output directory for migrations
    out: PathBuf,
}

impl Default for MigrationWriter {
    fn default() -> Self {
        Self::new(DEFAULT_MIGRATIONS_DIR)
    }
}

impl MigrationWriter {
    pub fn new(out: impl Into<PathBuf>) -> Self {
        Self { out: out.into() }
    }

    /// Get the migrations directory path
    pub fn migrations_dir(&self) -> &Path {
        &self.out
    }

    /// Get the path to a migration SQL file
    pub fn migration_path(&self, filename: &str) -> PathBuf {
        self.out.join(filename)
    }

    /// Ensure the migrations directory exists
    pub fn ensure_dir(&self) -> io::Result<()> {
        fs::create_dir_all(self.migrations_dir())
    }

    /// Write `content` to `<out>/<filename>`, replacing any existing file.
    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, WriteError> {
        self.ensure_dir().map_err(|e| WriteError::CreateDir {
            path: self.out.clone(),
            source: e,
        })?;

        let path = self.migration_path(filename);
        fs::write(&path, content).map_err(|e| WriteError::Write {
            path: path.clone(),
            source: e,
        })?;

        tracing::info!(path = %path.display(), bytes = content.len(), "wrote migration file");
        Ok(path)
    }

    /// Render and write a `CREATE TABLE` migration stamped with `at`.
    pub fn write_create_table(
        &self,
        create: &CreateTable,
        at: NaiveDateTime,
    ) -> Result<WrittenMigration, WriteError> {
        let filename = migration_filename(&create.table, at);
        let sql = create.to_sql();
        let path = self.write(&filename, &sql)?;

        Ok(WrittenMigration {
            filename,
            path,
            sql,
        })
    }
}

/// Errors raised while persisting a migration file
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("failed to create {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::parse_fields;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn filename_format() {
        assert_eq!(
            migration_filename("users", at(2024, 11, 23, 14, 5, 9)),
            "20241123140509_create_users.sql"
        );
    }

    #[test]
    fn filename_pads_midnight_and_single_digits() {
        assert_eq!(
            migration_filename("logs", at(2025, 1, 2, 0, 0, 0)),
            "20250102000000_create_logs.sql"
        );
        assert_eq!(
            migration_filename("logs", at(2025, 12, 31, 23, 59, 59)),
            "20251231235959_create_logs.sql"
        );
    }

    #[test]
    fn creates_missing_directory() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("nested").join("migrations");
        let writer = MigrationWriter::new(&out);

        let path = writer.write("x.sql", "SELECT 1;").unwrap();

        assert_eq!(path, out.join("x.sql"));
        assert_eq!(fs::read_to_string(path).unwrap(), "SELECT 1;");
    }

    #[test]
    fn overwrites_existing_file() {
        let temp = TempDir::new().unwrap();
        let writer = MigrationWriter::new(temp.path());

        writer.write("x.sql", "old").unwrap();
        let path = writer.write("x.sql", "new").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "new");
    }

    #[test]
    fn write_create_table_persists_sql() {
        let temp = TempDir::new().unwrap();
        let writer = MigrationWriter::new(temp.path().join("migrations"));
        let create = CreateTable::new("users", parse_fields("name:string,age:int"));

        let written = writer
            .write_create_table(&create, at(2024, 3, 4, 5, 6, 7))
            .unwrap();

        assert_eq!(written.filename, "20240304050607_create_users.sql");
        assert_eq!(fs::read_to_string(&written.path).unwrap(), written.sql);
        assert_eq!(written.sql, create.to_sql());
    }

    #[test]
    fn fails_when_directory_is_a_file() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("migrations");
        fs::write(&blocker, "not a directory").unwrap();

        let err = MigrationWriter::new(&blocker)
            .write("x.sql", "SELECT 1;")
            .unwrap_err();

        assert!(matches!(err, WriteError::CreateDir { .. }));
        assert!(err.to_string().contains("migrations"));
    }
}
