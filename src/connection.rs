use crate::TransactionState;
use log::{debug, warn};
use skiff_core::{DriverError, Engine, MySqlWriter, Result};
use std::fmt::Write;

/// Configuration a connection is created from.
#[derive(Debug, Clone)]
pub struct ConnectionOptions {
    pub server: String,
    pub user: String,
    pub pwd: String,
    pub database: String,
    /// Authenticate through the hosting environment instead of uid/pwd.
    pub trusted_connection: bool,
    /// Engine-level timeout baked into the connection string; this layer
    /// enforces no timeout of its own.
    pub timeout_secs: u32,
    pub default_schema: Option<String>,
}

impl ConnectionOptions {
    pub fn new(server: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            user: String::new(),
            pwd: String::new(),
            database: database.into(),
            trusted_connection: false,
            timeout_secs: 600,
            default_schema: None,
        }
    }

    pub fn credentials(mut self, user: impl Into<String>, pwd: impl Into<String>) -> Self {
        self.user = user.into();
        self.pwd = pwd.into();
        self
    }

    pub fn trusted(mut self) -> Self {
        self.trusted_connection = true;
        self
    }

    pub fn default_schema(mut self, schema: impl Into<String>) -> Self {
        self.default_schema = Some(schema.into());
        self
    }

    /// Schema selected when none is configured: the user name, or DBO for
    /// trusted connections.
    pub fn initial_schema(&self) -> &str {
        match &self.default_schema {
            Some(schema) => schema,
            None if !self.user.is_empty() => &self.user,
            None => "DBO",
        }
    }

    /// The engine-facing connection string.
    pub fn connection_string(&self) -> String {
        let mut out = String::new();
        let _ = write!(out, "Server={};database={};", self.server, self.database);
        if self.trusted_connection {
            out.push_str("IntegratedSecurity=yes;uid=auth_windows;");
        } else {
            let _ = write!(out, "uid={};pwd={};", self.user, self.pwd);
        }
        let _ = write!(
            out,
            "Pooling=False;Connection Timeout={};Allow User Variables=True;",
            self.timeout_secs
        );
        out
    }
}

/// A database connection facade over an execution engine.
///
/// The connection owns its engine handle exclusively; callers serialize
/// operations on it (the transaction counter and isolation cache are
/// unsynchronized by design).
pub struct Connection<E: Engine> {
    options: ConnectionOptions,
    engine: Option<E>,
    schema: String,
    default_schema: String,
    pub(crate) transaction: TransactionState,
}

impl<E: Engine> Connection<E> {
    pub fn new(options: ConnectionOptions) -> Self {
        let default_schema = options.initial_schema().to_owned();
        Self {
            options,
            engine: None,
            schema: default_schema.clone(),
            default_schema,
            transaction: TransactionState::default(),
        }
    }

    /// Adopt an engine handle that is already open.
    pub fn from_engine(options: ConnectionOptions, engine: E) -> Self {
        let mut connection = Self::new(options);
        connection.engine = Some(engine);
        connection
    }

    pub fn is_open(&self) -> bool {
        self.engine.is_some()
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn options(&self) -> &ConnectionOptions {
        &self.options
    }

    /// The dialect writer used for statement synthesis.
    pub fn sql_writer(&self) -> MySqlWriter {
        MySqlWriter::new()
    }

    pub(crate) fn engine_mut(&mut self) -> Result<&mut E> {
        self.engine
            .as_mut()
            .ok_or_else(|| DriverError::ConnectionClosed.into())
    }

    /// Opens the underlying connection and switches to the selected schema.
    ///
    /// Opening an already open connection resolves immediately. A failure to
    /// switch schema closes the connection again and surfaces as
    /// [`DriverError::SchemaSwitchFailure`], distinct from
    /// [`DriverError::OpenFailure`].
    pub async fn open(&mut self) -> Result<()> {
        if self.is_open() {
            return Ok(());
        }
        let engine = E::connect(&self.options.connection_string())
            .await
            .map_err(|e| DriverError::open_failure(e))?;
        self.engine = Some(engine);
        debug!("connection to {} opened", self.options.server);
        if self.schema != self.default_schema {
            let schema = self.schema.clone();
            if let Err(e) = self.use_schema(&schema).await {
                self.close().await;
                return Err(DriverError::schema_switch_failure(e).into());
            }
        }
        Ok(())
    }

    /// Closes the underlying connection, releasing the engine handle exactly
    /// once. Never fails; closing a closed connection does nothing.
    pub async fn close(&mut self) {
        if let Some(engine) = self.engine.take() {
            if let Err(e) = engine.close().await {
                warn!(
                    "error closing the connection to {}: {:#}",
                    self.options.server, e
                );
            }
        }
    }

    /// A new, unopened connection built from the same configuration.
    pub fn clone_connection(&self) -> Self {
        Self::new(self.options.clone())
    }

    /// Probes the given credentials with a throwaway connection; any failure
    /// collapses to `false`.
    pub async fn check_login(&self, login: &str, password: &str) -> bool {
        let mut options = self.options.clone();
        options.user = login.to_owned();
        options.pwd = password.to_owned();
        let mut probe = Connection::<E>::new(options);
        match probe.open().await {
            Ok(()) => {
                probe.close().await;
                true
            }
            Err(e) => {
                debug!("login check failed: {:#}", e);
                false
            }
        }
    }

    /// The engine has no schema support: recording the requested name always
    /// succeeds.
    pub async fn use_schema(&mut self, schema: &str) -> Result<()> {
        self.schema = schema.to_owned();
        Ok(())
    }
}
