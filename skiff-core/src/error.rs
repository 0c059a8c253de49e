use crate::truncate_long;
use thiserror::Error;

/// Failure kinds a caller may need to tell apart.
///
/// Always carried inside an [`anyhow::Error`]; recover the kind with
/// `err.downcast_ref::<DriverError>()`.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("connection is not open")]
    ConnectionClosed,

    #[error("{0} is not an allowed isolation level")]
    InvalidIsolationLevel(String),

    #[error("no transaction has been open")]
    NoActiveTransaction,

    #[error("open fail: {cause}")]
    OpenFailure { cause: anyhow::Error },

    #[error("schema fail: {cause}")]
    SchemaSwitchFailure { cause: anyhow::Error },

    /// Engine failure annotated with the SQL that triggered it.
    #[error("{cause} running {sql}")]
    Execution { sql: String, cause: anyhow::Error },

    #[error("table named {table} does not exist in {database}")]
    TableNotFound { table: String, database: String },

    /// Refusal to synthesize an unconditional DELETE.
    #[error("refusing to delete from {table} without a filter")]
    MissingFilter { table: String },
}

impl DriverError {
    pub fn open_failure(cause: anyhow::Error) -> Self {
        Self::OpenFailure { cause }
    }

    pub fn schema_switch_failure(cause: anyhow::Error) -> Self {
        Self::SchemaSwitchFailure { cause }
    }

    pub fn execution(sql: &str, cause: anyhow::Error) -> Self {
        Self::Execution {
            sql: format!("{}", truncate_long!(sql)),
            cause,
        }
    }

    pub fn table_not_found(table: impl Into<String>, database: impl Into<String>) -> Self {
        Self::TableNotFound {
            table: table.into(),
            database: database.into(),
        }
    }

    pub fn missing_filter(table: impl Into<String>) -> Self {
        Self::MissingFilter {
            table: table.into(),
        }
    }
}
