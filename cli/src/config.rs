//! Database configuration for the migrator CLI
//!
//! Connection settings come from six environment variables. They are read
//! after loading an env file (`.env` by default) into the process
//! environment; variables that are already set take precedence over the
//! file.

use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_ENV_FILE: &str = ".env";

pub const DB_HOST: &str = "DB_HOST";
pub const DB_PORT: &str = "DB_PORT";
pub const DB_USER: &str = "DB_USER";
pub const DB_PASSWORD: &str = "DB_PASSWORD";
pub const DB_NAME: &str = "DB_NAME";
pub const DB_SSLMODE: &str = "DB_SSLMODE";

/// Every variable required to build a connection string
pub const ENV_VARS: &[&str] = &[DB_HOST, DB_PORT, DB_USER, DB_PASSWORD, DB_NAME, DB_SSLMODE];

// ============================================================================
// SslMode
// ============================================================================

/// `DB_SSLMODE` values, named as libpq names them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SslMode {
    Disable,
    Allow,
    Prefer,
    Require,
    VerifyCa,
    VerifyFull,
}

/// How much of the server certificate is checked once TLS is up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertVerification {
    /// Encrypt only
    None,
    /// Chain must verify; hostname is not checked
    Ca,
    /// Chain and hostname must verify
    Full,
}

impl SslMode {
    pub const ALL: &'static [&'static str] =
        &["disable", "allow", "prefer", "require", "verify-ca", "verify-full"];

    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disable => "disable",
            Self::Allow => "allow",
            Self::Prefer => "prefer",
            Self::Require => "require",
            Self::VerifyCa => "verify-ca",
            Self::VerifyFull => "verify-full",
        }
    }

    /// `sslmode` keyword the driver's connection-string parser accepts.
    ///
    /// The driver only knows `disable`, `prefer` and `require`; the
    /// verification level travels with the TLS connector instead.
    #[inline]
    pub const fn connection_keyword(self) -> &'static str {
        match self {
            Self::Disable => "disable",
            Self::Allow | Self::Prefer => "prefer",
            Self::Require | Self::VerifyCa | Self::VerifyFull => "require",
        }
    }

    /// Certificate checks for the TLS connector, `None` when TLS is off
    #[inline]
    pub const fn verification(self) -> Option<CertVerification> {
        match self {
            Self::Disable => None,
            Self::Allow | Self::Prefer | Self::Require => Some(CertVerification::None),
            Self::VerifyCa => Some(CertVerification::Ca),
            Self::VerifyFull => Some(CertVerification::Full),
        }
    }
}

impl std::str::FromStr for SslMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disable" => Ok(Self::Disable),
            "allow" => Ok(Self::Allow),
            "prefer" => Ok(Self::Prefer),
            "require" => Ok(Self::Require),
            "verify-ca" => Ok(Self::VerifyCa),
            "verify-full" => Ok(Self::VerifyFull),
            other => Err(Error::UnsupportedSslMode(other.to_string())),
        }
    }
}

impl fmt::Display for SslMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// DbConfig
// ============================================================================

/// PostgreSQL connection settings
#[derive(Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub host: String,
    pub port: String,
    pub user: String,
    pub password: String,
    pub dbname: String,
    pub sslmode: SslMode,
}

impl DbConfig {
    /// Load `env_file` into the environment, then read the settings.
    ///
    /// The file must exist and parse.
    pub fn load(env_file: &Path) -> Result<Self, Error> {
        dotenvy::from_path(env_file).map_err(|e| match e {
            dotenvy::Error::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
                Error::EnvFileNotFound(env_file.into())
            }
            other => Error::EnvFile(env_file.into(), other),
        })?;

        tracing::debug!(path = %env_file.display(), "loaded env file");
        Self::from_env()
    }

    /// Read the settings from the current process environment.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the settings through `lookup`. Any missing variable or an
    /// unknown `DB_SSLMODE` is an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &'static str| lookup(key).ok_or(Error::MissingVar(key));

        Ok(Self {
            host: get(DB_HOST)?,
            port: get(DB_PORT)?,
            user: get(DB_USER)?,
            password: get(DB_PASSWORD)?,
            dbname: get(DB_NAME)?,
            sslmode: get(DB_SSLMODE)?.parse()?,
        })
    }

    /// Key/value connection string. Values are interpolated verbatim except
    /// `sslmode`, which is written as the driver keyword.
    pub fn connection_string(&self) -> String {
        let Self {
            host,
            port,
            user,
            password,
            dbname,
            sslmode,
        } = self;
        format!(
            "host={host} port={port} user={user} password={password} dbname={dbname} sslmode={}",
            sslmode.connection_keyword()
        )
    }

    /// `user@host:port/dbname`, for log lines
    pub fn target(&self) -> String {
        format!("{}@{}:{}/{}", self.user, self.host, self.port, self.dbname)
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("dbname", &self.dbname)
            .field("sslmode", &self.sslmode)
            .finish()
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("env file not found: {}", .0.display())]
    EnvFileNotFound(PathBuf),

    #[error("failed to load {}: {}", .0.display(), .1)]
    EnvFile(PathBuf, #[source] dotenvy::Error),

    #[error("missing environment variable {0}")]
    MissingVar(&'static str),

    #[error("unsupported DB_SSLMODE '{0}' (expected one of: {expected})", expected = SslMode::ALL.join(", "))]
    UnsupportedSslMode(String),
}

pub type ConfigError = Error;

// ============================================================================
// Tests
// ============================================================================
