mod as_value;
mod binder;
mod config;
mod connection;
mod cursor;
mod driver;
mod fluent;
mod offsets;
mod record;
mod row;
mod scalar;
mod sql_type;
mod statement;
pub mod temporal;
mod util;
mod value;

pub use ::anyhow::Context;
pub use as_value::*;
pub use binder::*;
pub use config::*;
pub use connection::*;
pub use cursor::*;
pub use driver::*;
pub use fluent::*;
pub use offsets::*;
pub use record::*;
pub use row::*;
pub use scalar::Scalar;
pub use sql_type::*;
pub use statement::*;
pub use util::*;
pub use value::*;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
