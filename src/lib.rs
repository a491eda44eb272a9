//! Typed rows and positional parameters for SQL statements.
//!
//! ```rust,ignore
//! use rowbind::{Binder, FluentStatement, Record};
//!
//! #[derive(Record)]
//! struct Customer {
//!     id: i64,
//!     name: String,
//!     email: Option<String>,
//! }
//!
//! let binder = Binder::<Customer>::new();
//! let mut insert = FluentStatement::new(connection.prepare("INSERT INTO customer (name, email) VALUES (?, ?)")?);
//! insert.bind_offsets(&binder, &customer, &binder.skip_offsets(&[0]))?;
//! let id: Option<i64> = insert.insert_returning_key()?;
//! ```

pub use rowbind_core::*;
pub use rowbind_macros::*;
