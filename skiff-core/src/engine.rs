use crate::{Result, ResultSet, Row, RowNames, RowsAffected};
use futures::Stream;
use std::future::Future;

/// One unit of the engine's streamed output.
#[derive(Debug, Clone)]
pub enum Packet {
    /// Column names for the statement whose rows follow.
    Meta(RowNames),
    /// A batch of rows belonging to the most recent `Meta`.
    Rows(Vec<Row>),
}

/// The execution engine behind a connection.
///
/// The engine is a black box that accepts SQL text and produces results; the
/// facade never looks inside it. Implementations guarantee the packet
/// ordering of [`Engine::stream`]: per statement always metadata first, then
/// rows; across statements of a batch, metadata packets arrive in statement
/// order; the terminal outcome fires exactly once, after every packet.
pub trait Engine: Send {
    /// Open a physical connection described by a connection string.
    fn connect(target: &str) -> impl Future<Output = Result<Self>> + Send
    where
        Self: Sized;

    /// Release the physical handle. Called at most once per connection.
    fn close(self) -> impl Future<Output = Result<()>> + Send;

    /// Run `sql` and collect one [`ResultSet`] per statement.
    fn query(&mut self, sql: &str) -> impl Future<Output = Result<Vec<ResultSet>>> + Send;

    /// Run `sql` streaming [`Packet`]s, rows batched up to `packet_size` per
    /// packet (0 leaves the batch size to the engine). The end of the stream
    /// is the terminal resolution; an `Err` item is the terminal rejection.
    fn stream(
        &mut self,
        sql: &str,
        packet_size: usize,
    ) -> impl Stream<Item = Result<Packet>> + Send;

    /// Run `sql` as a non-query command.
    fn execute(&mut self, sql: &str) -> impl Future<Output = Result<RowsAffected>> + Send;
}
