use crate::{
    SqliteConnection, TemporalMode,
    extract::{extract_name, extract_value},
    statement::{StatementHandle, statement_error, statement_ptr},
};
use libsqlite3_sys::{
    SQLITE_DONE, SQLITE_ROW, sqlite3_column_count, sqlite3_reset, sqlite3_step,
};
use rowbind_core::{Connection, Cursor, Error, Result, Row, Value, check_index};
use std::{
    ffi::c_int,
    fmt::{self, Debug},
};

/// Rows of a running statement.
///
/// Shares the statement with the [`crate::SqliteStatement`] that produced it,
/// closing the cursor resets the statement so that it can run again.
pub struct SqliteCursor {
    statement: StatementHandle,
    connection: SqliteConnection,
    labels: Vec<String>,
    on_row: bool,
    finished: bool,
    closed: bool,
}

impl SqliteCursor {
    pub(crate) fn new(statement: StatementHandle, connection: SqliteConnection) -> Result<Self> {
        let raw = statement_ptr(&statement, &connection)?;
        let labels = unsafe {
            let count = sqlite3_column_count(raw);
            (0..count)
                .map(|i| extract_name(raw, i))
                .collect::<Result<Vec<_>>>()?
        };
        Ok(Self {
            statement,
            connection,
            labels,
            on_row: false,
            finished: false,
            closed: false,
        })
    }
}

impl Row for SqliteCursor {
    fn column_count(&self) -> usize {
        self.labels.len()
    }

    fn column_name(&self, index: usize) -> Result<String> {
        Ok(self.labels[check_index(index, self.labels.len())?].clone())
    }

    fn get_value(&self, index: usize) -> Result<Value> {
        let column = check_index(index, self.labels.len())?;
        if !self.on_row {
            return Err(Error::msg("The cursor is not positioned on a row"));
        }
        let statement = statement_ptr(&self.statement, &self.connection)?;
        extract_value(statement, column as c_int)
    }

    fn native_temporal(&self) -> bool {
        self.connection.temporal == TemporalMode::Native
    }
}

impl Cursor for SqliteCursor {
    fn advance(&mut self) -> Result<bool> {
        if self.finished {
            return Ok(false);
        }
        let statement = statement_ptr(&self.statement, &self.connection)?;
        match unsafe { sqlite3_step(statement) } {
            SQLITE_ROW => {
                self.on_row = true;
                Ok(true)
            }
            SQLITE_DONE => {
                self.on_row = false;
                self.finished = true;
                Ok(false)
            }
            _ => {
                self.on_row = false;
                self.finished = true;
                let error = unsafe { statement_error(statement) };
                log::error!("{:#}", error);
                Err(error)
            }
        }
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.on_row = false;
        self.finished = true;
        // The statement or the connection may already be closed.
        let statement = self.statement.borrow().ptr;
        if !statement.is_null() && !self.connection.is_closed() {
            unsafe {
                sqlite3_reset(statement);
            }
        }
        Ok(())
    }
}

impl Debug for SqliteCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteCursor")
            .field("labels", &self.labels)
            .field("on_row", &self.on_row)
            .field("finished", &self.finished)
            .field("closed", &self.closed)
            .finish()
    }
}
