mod engine;
mod error;
mod expression;
mod isolation;
mod parameter;
mod row;
mod sql_writer;
mod util;
mod value;

pub use ::anyhow::Context;
pub use engine::*;
pub use error::*;
pub use expression::*;
pub use isolation::*;
pub use parameter::*;
pub use row::*;
pub use sql_writer::*;
pub use util::*;
pub use value::*;
pub mod stream {
    pub use ::futures::stream::*;
}
pub use ::futures::future;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
