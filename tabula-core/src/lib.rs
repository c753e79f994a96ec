mod as_value;
mod catalog;
mod connection;
mod convert;
mod error;
mod executor;
mod field;
mod mapper;
mod options;
mod query;
mod query_builder;
mod sql_writer;
mod table;
mod type_code;
mod util;
mod value;

pub use ::anyhow::Context;
pub use as_value::*;
pub use catalog::*;
pub use connection::*;
pub use convert::*;
pub use error::*;
pub use executor::*;
pub use field::*;
pub use mapper::*;
pub use options::*;
pub use query::*;
pub use query_builder::*;
pub use sql_writer::*;
pub use table::*;
pub use type_code::*;
pub use util::*;
pub use value::*;
pub mod stream {
    pub use ::futures::stream::*;
}
pub use ::futures::future;
