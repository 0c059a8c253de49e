mod connection;
mod procedure;
mod schema;
mod script;
mod streamer;
mod transaction;

pub use connection::*;
pub use procedure::*;
pub use schema::*;
pub use skiff_core::*;
pub use streamer::*;
pub use transaction::*;
