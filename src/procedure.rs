use crate::Connection;
use async_stream::try_stream;
use skiff_core::{
    Engine, Error, Result, ResultSet, SqlParameter, SqlWriter,
    stream::{Stream, StreamExt},
};
use std::pin::pin;

/// Event of a stored procedure invocation.
#[derive(Debug)]
pub enum SpEvent {
    /// An intermediate result set produced by the procedure, forwarded
    /// untouched.
    ResultSet(ResultSet),
    /// Terminal event when output parameters exist: the full parameter list
    /// with every output entry's `out_value` read from the trailing output
    /// select.
    Parameters(Vec<SqlParameter>),
}

impl<E: Engine> Connection<E> {
    /// Calls a stored procedure.
    ///
    /// Intermediate result sets stream out as [`SpEvent::ResultSet`]. When
    /// any parameter is an output parameter the final result set is read as
    /// a single row keyed by output-parameter names and the filled parameter
    /// list terminates the stream; otherwise every result set is forwarded
    /// and the stream simply completes. Engine failures surface unchanged.
    pub fn call_procedure(
        &mut self,
        name: &str,
        params: Vec<SqlParameter>,
        skip_select: bool,
    ) -> impl Stream<Item = Result<SpEvent>> + Send {
        try_stream! {
            let mut sql = String::new();
            self.sql_writer()
                .write_call_procedure(&mut sql, name, &params, skip_select);
            let has_output = params.iter().any(|p| p.output);
            if has_output {
                let mut last: Option<ResultSet> = None;
                {
                    let mut sets = pin!(self.query_batch(&sql));
                    while let Some(set) = sets.next().await {
                        let set = set?;
                        if let Some(previous) = last.replace(set) {
                            yield SpEvent::ResultSet(previous);
                        }
                    }
                }
                let last = last
                    .ok_or_else(|| Error::msg(format!("procedure {name} produced no result sets")))?;
                let mut params = params;
                if let Some(record) = last.first_record() {
                    for (label, value) in record.labels.iter().zip(record.values.iter()) {
                        if let Some(param) = params.iter_mut().find(|p| p.name == *label) {
                            param.out_value = Some(value.clone());
                        }
                    }
                }
                yield SpEvent::Parameters(params);
            } else {
                let mut sets = pin!(self.query_batch(&sql));
                while let Some(set) = sets.next().await {
                    yield SpEvent::ResultSet(set?);
                }
            }
        }
    }
}
