use crate::Connection;
use log::debug;
use skiff_core::{DriverError, Engine, IsolationLevel, Result, SqlWriter};

/// Bookkeeping for the simulated transaction nesting of a connection.
///
/// The engine cannot nest transactions, so nesting is counted: only the
/// outermost begin and the closing commit/rollback reach the engine, and an
/// inner rollback dooms the outer transaction.
#[derive(Debug, Default, Clone)]
pub struct TransactionState {
    pub(crate) depth: u32,
    pub(crate) isolation: Option<IsolationLevel>,
    pub(crate) pending_rollback: bool,
}

impl TransactionState {
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn isolation(&self) -> Option<IsolationLevel> {
        self.isolation
    }

    /// True once an inner rollback has marked the transaction as doomed.
    pub fn pending_rollback(&self) -> bool {
        self.pending_rollback
    }

    pub fn in_transaction(&self) -> bool {
        self.depth > 0
    }
}

impl<E: Engine> Connection<E> {
    pub fn transaction_state(&self) -> &TransactionState {
        &self.transaction
    }

    /// Sets the transaction isolation level.
    ///
    /// The level is cached: repeated calls with the active level never reach
    /// the engine.
    pub async fn set_isolation_level(&mut self, level: IsolationLevel) -> Result<()> {
        if self.transaction.isolation == Some(level) {
            return Ok(());
        }
        let mut sql = String::new();
        self.sql_writer().write_set_isolation_level(&mut sql, level);
        self.query_single(&sql).await?;
        self.transaction.isolation = Some(level);
        Ok(())
    }

    /// Begins a transaction, or only deepens the nesting when one is already
    /// active.
    pub async fn begin_transaction(&mut self, level: IsolationLevel) -> Result<()> {
        if !self.is_open() {
            return Err(DriverError::ConnectionClosed.into());
        }
        if self.transaction.depth > 0 {
            self.transaction.depth += 1;
            return Ok(());
        }
        self.set_isolation_level(level).await?;
        let mut sql = String::new();
        self.sql_writer().write_transaction_begin(&mut sql);
        self.query_single(&sql).await?;
        self.transaction.depth = 1;
        self.transaction.pending_rollback = false;
        debug!("transaction started");
        Ok(())
    }

    /// Commits the transaction.
    ///
    /// An inner commit only decrements the nesting. A commit over a doomed
    /// transaction performs the rollback instead; that redirect is the
    /// designed recovery path, not an error.
    pub async fn commit(&mut self) -> Result<()> {
        if !self.is_open() {
            return Err(DriverError::ConnectionClosed.into());
        }
        if self.transaction.depth > 1 {
            self.transaction.depth -= 1;
            return Ok(());
        }
        if self.transaction.depth == 0 {
            return Err(DriverError::NoActiveTransaction.into());
        }
        if self.transaction.pending_rollback {
            return self.roll_back().await;
        }
        let mut sql = String::new();
        self.sql_writer().write_transaction_commit(&mut sql);
        self.query_single(&sql).await?;
        self.transaction.depth = 0;
        debug!("transaction committed");
        Ok(())
    }

    /// Rolls the transaction back.
    ///
    /// An inner rollback decrements the nesting and dooms the outer
    /// transaction, so the closing commit rolls back as well.
    pub async fn roll_back(&mut self) -> Result<()> {
        if !self.is_open() {
            return Err(DriverError::ConnectionClosed.into());
        }
        if self.transaction.depth > 1 {
            self.transaction.depth -= 1;
            self.transaction.pending_rollback = true;
            return Ok(());
        }
        if self.transaction.depth == 0 {
            return Err(DriverError::NoActiveTransaction.into());
        }
        let mut sql = String::new();
        self.sql_writer().write_transaction_rollback(&mut sql);
        self.query_single(&sql).await?;
        self.transaction.depth = 0;
        self.transaction.pending_rollback = false;
        debug!("transaction rolled back");
        Ok(())
    }
}
