//! Database connection and statement execution for the CLI
//!
//! A [`Database`] is opened explicitly from a [`DbConfig`], verified with a
//! ping, and handed to the apply step as an [`Execute`] implementation.

use migrator_migrations::Execute;

use crate::config::DbConfig;
use crate::error::CliError;

// ============================================================================
// PostgreSQL (postgres - sync)
// ============================================================================

/// An open, verified PostgreSQL connection
#[cfg(feature = "postgres-sync")]
pub struct Database {
    client: postgres::Client,
}

#[cfg(feature = "postgres-sync")]
impl Database {
    /// Connect with the key/value connection string built from `config`,
    /// then ping the server.
    ///
    /// `DB_SSLMODE=disable` connects in plaintext; every other mode goes
    /// through a native-tls connector set up by [`tls_connector`].
    pub fn connect(config: &DbConfig) -> Result<Self, CliError> {
        let pg_config: postgres::Config = config.connection_string().parse().map_err(|e| {
            CliError::ConnectionError(format!("Invalid PostgreSQL connection settings: {}", e))
        })?;

        tracing::debug!(target_db = %config.target(), sslmode = %config.sslmode, "connecting");

        let connected = match config.sslmode.verification() {
            None => pg_config.connect(postgres::NoTls),
            Some(verification) => {
                let connector = tls_connector(verification)?;
                pg_config.connect(postgres_native_tls::MakeTlsConnector::new(connector))
            }
        };

        let client = connected.map_err(|e| {
            CliError::ConnectionError(format!("Failed to connect to PostgreSQL: {}", e))
        })?;

        let mut db = Self { client };
        db.ping()?;

        tracing::info!(target_db = %config.target(), "connected to PostgreSQL");
        Ok(db)
    }

    /// Round-trip a trivial query
    pub fn ping(&mut self) -> Result<(), CliError> {
        self.client
            .simple_query("SELECT 1")
            .map(|_| ())
            .map_err(|e| CliError::ConnectionError(format!("PostgreSQL ping failed: {}", e)))
    }
}

/// Build a TLS connector that checks as much of the server certificate as
/// the sslmode asks for (libpq semantics: `require` encrypts only).
#[cfg(feature = "postgres-sync")]
pub fn tls_connector(
    verification: crate::config::CertVerification,
) -> Result<native_tls::TlsConnector, CliError> {
    use crate::config::CertVerification;

    let (accept_invalid_certs, accept_invalid_hostnames) = match verification {
        CertVerification::None => (true, true),
        CertVerification::Ca => (false, true),
        CertVerification::Full => (false, false),
    };

    native_tls::TlsConnector::builder()
        .danger_accept_invalid_certs(accept_invalid_certs)
        .danger_accept_invalid_hostnames(accept_invalid_hostnames)
        .build()
        .map_err(|e| CliError::ConnectionError(format!("Failed to set up TLS: {}", e)))
}

#[cfg(feature = "postgres-sync")]
impl Execute for Database {
    type Error = postgres::Error;

    fn execute(&mut self, sql: &str) -> Result<(), Self::Error> {
        tracing::debug!(sql, "executing statement");
        self.client.batch_execute(sql)
    }
}

// ============================================================================
// No driver
// ============================================================================

/// Uninhabited without a driver: [`Database::connect`] always fails
#[cfg(not(feature = "postgres-sync"))]
pub struct Database {
    never: std::convert::Infallible,
}

#[cfg(not(feature = "postgres-sync"))]
impl Database {
    pub fn connect(_config: &DbConfig) -> Result<Self, CliError> {
        Err(CliError::DriverNotEnabled {
            feature: "postgres-sync",
        })
    }
}

#[cfg(not(feature = "postgres-sync"))]
impl Execute for Database {
    type Error = std::convert::Infallible;

    fn execute(&mut self, _sql: &str) -> Result<(), Self::Error> {
        match self.never {}
    }
}
