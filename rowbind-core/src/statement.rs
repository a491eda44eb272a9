use crate::{Cursor, MemoryRow, Result, SqlType, Value};

/// A prepared statement with 1-based positional parameters.
pub trait Statement {
    type Cursor: Cursor;

    fn parameter_count(&self) -> usize;

    fn bind_value(&mut self, index: usize, value: Value) -> Result<()>;

    /// Bind a NULL typed as `sql_type`.
    fn bind_null(&mut self, index: usize, sql_type: SqlType) -> Result<()> {
        self.bind_value(index, sql_type.empty_value())
    }

    fn clear_bindings(&mut self) -> Result<()>;

    /// Execute the statement and return a forward only cursor over its rows.
    fn query(&mut self) -> Result<Self::Cursor>;

    /// Execute the statement and return the number of rows affected.
    fn execute(&mut self) -> Result<u64>;

    /// Keys generated by the last `execute`, `None` when it did not generate any.
    fn generated_keys(&mut self) -> Result<Option<MemoryRow>>;

    /// Whether the driver stores dates and date-times natively. When `false`
    /// they are written and read as instants, see [`crate::BindConfig`].
    fn native_temporal(&self) -> bool;

    /// Release the statement. Calling it more than once has no effect.
    fn close(&mut self) -> Result<()>;
}

impl<S: Statement + ?Sized> Statement for &mut S {
    type Cursor = S::Cursor;

    fn parameter_count(&self) -> usize {
        (**self).parameter_count()
    }
    fn bind_value(&mut self, index: usize, value: Value) -> Result<()> {
        (**self).bind_value(index, value)
    }
    fn bind_null(&mut self, index: usize, sql_type: SqlType) -> Result<()> {
        (**self).bind_null(index, sql_type)
    }
    fn clear_bindings(&mut self) -> Result<()> {
        (**self).clear_bindings()
    }
    fn query(&mut self) -> Result<Self::Cursor> {
        (**self).query()
    }
    fn execute(&mut self) -> Result<u64> {
        (**self).execute()
    }
    fn generated_keys(&mut self) -> Result<Option<MemoryRow>> {
        (**self).generated_keys()
    }
    fn native_temporal(&self) -> bool {
        (**self).native_temporal()
    }
    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}
