use crate::{Result, Statement};

/// Open session with a database.
///
/// Statements are owned values: they stay usable for as long as they are
/// alive, even if the connection value that prepared them is dropped.
pub trait Connection {
    type Statement: Statement;

    /// Prepare a single parameterized SQL statement.
    fn prepare(&mut self, sql: &str) -> Result<Self::Statement>;

    /// Run one or more unparameterized statements, discarding any row.
    fn execute_batch(&mut self, sql: &str) -> Result<()>;

    /// Release the connection. Calling it more than once has no effect.
    fn close(&mut self) -> Result<()>;

    fn is_closed(&self) -> bool;
}
