use crate::Connection;
use async_stream::try_stream;
use skiff_core::{
    DriverError, Engine, Error, Packet, Result, ResultSet, Row, RowLabeled, RowNames, RowsAffected,
    stream::{Stream, StreamExt},
};
use std::pin::pin;

/// One item of the row-at-a-time delivery mode.
#[derive(Debug, Clone)]
pub enum Line {
    /// Column metadata for the statement whose rows follow.
    Meta(RowNames),
    /// A single row, labeled with the most recent metadata.
    Row(RowLabeled),
}

/// A batch of rows tagged with the zero-based index of its result set.
///
/// The index advances exactly when the engine announces the metadata of the
/// next statement.
#[derive(Debug, Clone)]
pub struct RowsPacket {
    pub set: usize,
    pub columns: RowNames,
    pub rows: Vec<Row>,
}

fn execution_error(sql: &str, cause: Error) -> Error {
    DriverError::execution(sql, cause).into()
}

impl<E: Engine> Connection<E> {
    /// Executes `sql` and yields one result set per statement, in statement
    /// order. Every set but the last is a progress notification; the last
    /// one is the resolution value.
    pub fn query_batch(&mut self, sql: &str) -> impl Stream<Item = Result<ResultSet>> + Send {
        try_stream! {
            let engine = self.engine_mut()?;
            let sets = engine
                .query(sql)
                .await
                .map_err(|e| execution_error(sql, e))?;
            for set in sets {
                yield set;
            }
        }
    }

    /// Executes `sql` and resolves with its last result set.
    pub async fn query_single(&mut self, sql: &str) -> Result<ResultSet> {
        let engine = self.engine_mut()?;
        let mut sets = engine
            .query(sql)
            .await
            .map_err(|e| execution_error(sql, e))?;
        sets.pop()
            .ok_or_else(|| execution_error(sql, Error::msg("engine returned no result sets")))
    }

    /// Streams the results one row at a time. Metadata packets are cached
    /// and re-emitted as [`Line::Meta`]; every row is labeled against the
    /// most recent metadata.
    pub fn query_lines(&mut self, sql: &str) -> impl Stream<Item = Result<Line>> + Send {
        try_stream! {
            let engine = self.engine_mut()?;
            let mut last_meta: Option<RowNames> = None;
            let mut packets = pin!(engine.stream(sql, 1));
            while let Some(packet) = packets.next().await {
                match packet.map_err(|e| execution_error(sql, e))? {
                    Packet::Meta(meta) => {
                        last_meta = Some(meta.clone());
                        yield Line::Meta(meta);
                    }
                    Packet::Rows(rows) => {
                        let meta = last_meta.clone().ok_or_else(|| {
                            execution_error(sql, Error::msg("row packet before any metadata"))
                        })?;
                        for row in rows {
                            yield Line::Row(RowLabeled::new(meta.clone(), row));
                        }
                    }
                }
            }
        }
    }

    /// Streams row batches of up to `packet_size` rows (0 leaves the batch
    /// size to the engine). Metadata packets are absorbed and advance the
    /// `set` index; row packets come out tagged with it.
    pub fn query_packets(
        &mut self,
        sql: &str,
        packet_size: usize,
    ) -> impl Stream<Item = Result<RowsPacket>> + Send {
        try_stream! {
            let engine = self.engine_mut()?;
            let mut current: Option<(usize, RowNames)> = None;
            let mut packets = pin!(engine.stream(sql, packet_size));
            while let Some(packet) = packets.next().await {
                match packet.map_err(|e| execution_error(sql, e))? {
                    Packet::Meta(meta) => {
                        current = Some(match current.take() {
                            Some((set, _)) => (set + 1, meta),
                            None => (0, meta),
                        });
                    }
                    Packet::Rows(rows) => {
                        let (set, columns) = current.clone().ok_or_else(|| {
                            execution_error(sql, Error::msg("row packet before any metadata"))
                        })?;
                        yield RowsPacket { set, columns, rows };
                    }
                }
            }
        }
    }

    /// Runs `sql` as a non-query command.
    pub async fn execute(&mut self, sql: &str) -> Result<RowsAffected> {
        let engine = self.engine_mut()?;
        engine
            .execute(sql)
            .await
            .map_err(|e| execution_error(sql, e))
    }
}
