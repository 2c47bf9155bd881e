//! Connection descriptor and per-operation connection handling
//!
//! The scaffold never pools connections: every repository operation opens
//! a connection from the descriptor and releases it before returning. Pooling,
//! when wanted, belongs to the driver or to infrastructure in front of the
//! database.

use std::fmt;
use std::sync::Arc;

use sqlx::{Connection, PgConnection};

use crate::repository::{RepositoryError, RepositoryOperation};

/// Opaque connection string shared read-only by every operation
///
/// `Debug` and `Display` never print the password.
///
/// # Example
///
/// ```rust
/// use crud_scaffold::database::ConnectionDescriptor;
///
/// let descriptor = ConnectionDescriptor::new("postgres://app:secret@db:5432/tourney");
/// assert_eq!(descriptor.to_string(), "postgres://app:***@db:5432/tourney");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor(Arc<str>);

impl ConnectionDescriptor {
    /// Wrap a connection string
    pub fn new(url: impl Into<String>) -> Self {
        Self(Arc::from(url.into()))
    }

    /// The raw connection string, password included
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Open one connection for a single operation
    ///
    /// The returned connection is closed by [`release`] on the success path
    /// and by `Drop` on every other path, including cancellation.
    pub(crate) async fn open(
        &self,
        operation: RepositoryOperation,
    ) -> Result<PgConnection, RepositoryError> {
        tracing::trace!(connection = %self, %operation, "Opening connection");

        PgConnection::connect(self.expose()).await.map_err(|err| {
            let category = categorize_db_error(&err);
            tracing::debug!(
                connection = %self,
                %operation,
                category,
                "Failed to open connection: {}",
                err
            );
            RepositoryError::from_sqlx(operation, err)
        })
    }
}

impl fmt::Display for ConnectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&sanitize_connection_url(self.expose()))
    }
}

impl fmt::Debug for ConnectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConnectionDescriptor")
            .field(&sanitize_connection_url(self.expose()))
            .finish()
    }
}

/// Close a connection after its operation completed
///
/// A failed close is logged and otherwise ignored; the socket is gone either way.
pub(crate) async fn release(connection: PgConnection) {
    if let Err(err) = connection.close().await {
        tracing::warn!("Failed to close connection cleanly: {}", err);
    }
}

/// Sanitize connection URL for safe logging (remove password)
pub(crate) fn sanitize_connection_url(url: &str) -> String {
    if let Some(at_pos) = url.rfind('@') {
        if let Some(scheme_end) = url.find("://") {
            let credentials_start = scheme_end + 3;
            if credentials_start < at_pos {
                let scheme = &url[..credentials_start];
                let after_at = &url[at_pos..];
                if let Some(colon_pos) = url[credentials_start..at_pos].find(':') {
                    let username = &url[credentials_start..credentials_start + colon_pos];
                    return format!("{}{}:***{}", scheme, username, after_at);
                }
            }
        }
    }
    url.to_string()
}

/// Categorize database error for better operator guidance
fn categorize_db_error(err: &sqlx::Error) -> &'static str {
    use sqlx::Error;
    match err {
        Error::Configuration(_) => "Configuration error - check the connection string",
        Error::Database(_) => "Database rejected the connection",
        Error::Io(_) => "Network I/O error - check connectivity",
        Error::Tls(_) => "TLS/SSL error - check certificate configuration",
        Error::WorkerCrashed => "Database worker crashed",
        _ => "Connection error",
    }
}
