use crate::{CBox, SqliteConnection, SqliteCursor, TemporalMode, error_message_from_ptr};
use libsqlite3_sys::*;
use rowbind_core::{
    Error, MemoryRow, Result, Statement, Value, temporal::epoch_millis, truncate_long,
};
use std::{
    cell::RefCell,
    ffi::{CStr, c_int},
    fmt::{self, Debug, Display},
    mem,
    os::raw::{c_char, c_void},
    ptr,
    rc::Rc,
};
use time::{format_description::BorrowedFormatItem, macros::format_description};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second].[subsecond]");
const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]");

pub(crate) type StatementHandle = Rc<RefCell<CBox<*mut sqlite3_stmt>>>;

/// Raw statement, failing if it or its connection was closed.
pub(crate) fn statement_ptr(
    statement: &StatementHandle,
    connection: &SqliteConnection,
) -> Result<*mut sqlite3_stmt> {
    connection.handle()?;
    let statement = statement.borrow().ptr;
    if statement.is_null() {
        let error = Error::msg("The sqlite statement is closed");
        log::error!("{:#}", error);
        return Err(error);
    }
    Ok(statement)
}

/// Error reported by the connection that owns `statement`.
pub(crate) unsafe fn statement_error(statement: *mut sqlite3_stmt) -> Error {
    unsafe {
        let db = sqlite3_db_handle(statement);
        let query = sqlite3_sql(statement);
        Error::msg(error_message_from_ptr(&sqlite3_errmsg(db)).to_string()).context(format!(
            "While running the query:\n{}",
            truncate_long!(CStr::from_ptr(query).to_string_lossy())
        ))
    }
}

pub struct SqliteStatement {
    pub(crate) statement: StatementHandle,
    pub(crate) connection: SqliteConnection,
    sql: String,
    generated_key: Option<i64>,
}

impl SqliteStatement {
    pub(crate) fn new(
        statement: CBox<*mut sqlite3_stmt>,
        connection: SqliteConnection,
        sql: &str,
    ) -> Self {
        Self {
            statement: Rc::new(RefCell::new(statement)),
            connection,
            sql: sql.into(),
            generated_key: None,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    fn bind_text(statement: *mut sqlite3_stmt, index: c_int, v: &str) -> c_int {
        unsafe {
            sqlite3_bind_text(
                statement,
                index,
                v.as_ptr() as *const c_char,
                v.len() as c_int,
                SQLITE_TRANSIENT(),
            )
        }
    }
}

impl Statement for SqliteStatement {
    type Cursor = SqliteCursor;

    fn parameter_count(&self) -> usize {
        match statement_ptr(&self.statement, &self.connection) {
            Ok(statement) => unsafe { sqlite3_bind_parameter_count(statement) as usize },
            Err(..) => 0,
        }
    }

    fn bind_value(&mut self, index: usize, value: Value) -> Result<()> {
        let statement = statement_ptr(&self.statement, &self.connection)?;
        let Ok(index) = c_int::try_from(index) else {
            let error = Error::msg(format!("Parameter index {} is out of range", index));
            log::error!("{:#}", error);
            return Err(error);
        };
        unsafe {
            let rc = match value {
                Value::Null
                | Value::Boolean(None)
                | Value::Int8(None)
                | Value::Int16(None)
                | Value::Int32(None)
                | Value::Int64(None)
                | Value::Float32(None)
                | Value::Float64(None)
                | Value::Decimal(None)
                | Value::Char(None)
                | Value::Varchar(None)
                | Value::Blob(None)
                | Value::Date(None)
                | Value::Time(None)
                | Value::Timestamp(None)
                | Value::TimestampWithTimezone(None)
                | Value::Uuid(None) => sqlite3_bind_null(statement, index),
                Value::Boolean(Some(v)) => sqlite3_bind_int(statement, index, v as c_int),
                Value::Int8(Some(v)) => sqlite3_bind_int(statement, index, v as c_int),
                Value::Int16(Some(v)) => sqlite3_bind_int(statement, index, v as c_int),
                Value::Int32(Some(v)) => sqlite3_bind_int(statement, index, v as c_int),
                Value::Int64(Some(v)) => sqlite3_bind_int64(statement, index, v),
                Value::Float32(Some(v)) => sqlite3_bind_double(statement, index, v as f64),
                Value::Float64(Some(v)) => sqlite3_bind_double(statement, index, v),
                Value::Decimal(Some(v)) => Self::bind_text(statement, index, &v.to_string()),
                Value::Char(Some(v)) => Self::bind_text(statement, index, &v.to_string()),
                Value::Varchar(Some(ref v)) => Self::bind_text(statement, index, v),
                Value::Blob(Some(ref v)) => sqlite3_bind_blob(
                    statement,
                    index,
                    v.as_ptr() as *const c_void,
                    v.len() as c_int,
                    SQLITE_TRANSIENT(),
                ),
                Value::Date(Some(v)) => Self::bind_text(statement, index, &v.format(DATE_FORMAT)?),
                Value::Time(Some(v)) => Self::bind_text(statement, index, &v.format(TIME_FORMAT)?),
                Value::Timestamp(Some(v)) => {
                    Self::bind_text(statement, index, &v.format(TIMESTAMP_FORMAT)?)
                }
                Value::TimestampWithTimezone(Some(v)) => {
                    sqlite3_bind_int64(statement, index, epoch_millis(v))
                }
                Value::Uuid(Some(v)) => Self::bind_text(statement, index, &v.to_string()),
            };
            if rc != SQLITE_OK {
                let error = statement_error(statement)
                    .context(format!("Cannot bind parameter {} ({})", index, value));
                log::error!("{:#}", error);
                return Err(error);
            }
        }
        Ok(())
    }

    fn clear_bindings(&mut self) -> Result<()> {
        let statement = statement_ptr(&self.statement, &self.connection)?;
        unsafe {
            sqlite3_clear_bindings(statement);
        }
        Ok(())
    }

    fn query(&mut self) -> Result<SqliteCursor> {
        let statement = statement_ptr(&self.statement, &self.connection)?;
        unsafe {
            sqlite3_reset(statement);
        }
        SqliteCursor::new(self.statement.clone(), self.connection.clone())
    }

    fn execute(&mut self) -> Result<u64> {
        let statement = statement_ptr(&self.statement, &self.connection)?;
        self.generated_key = None;
        unsafe {
            let db = sqlite3_db_handle(statement);
            sqlite3_reset(statement);
            let before = sqlite3_total_changes64(db);
            let last_rowid = sqlite3_last_insert_rowid(db);
            loop {
                match sqlite3_step(statement) {
                    SQLITE_ROW => {
                        continue;
                    }
                    SQLITE_DONE => {
                        break;
                    }
                    _ => {
                        let error = statement_error(statement);
                        sqlite3_reset(statement);
                        log::error!("{:#}", error);
                        return Err(error);
                    }
                }
            }
            let changes = if sqlite3_total_changes64(db) == before {
                0
            } else {
                sqlite3_changes64(db) as u64
            };
            let rowid = sqlite3_last_insert_rowid(db);
            if changes > 0 && rowid != last_rowid {
                self.generated_key = Some(rowid);
            }
            sqlite3_reset(statement);
            Ok(changes)
        }
    }

    fn generated_keys(&mut self) -> Result<Option<MemoryRow>> {
        Ok(self.generated_key.map(|key| {
            MemoryRow::new(vec!["last_insert_rowid".into()], vec![Value::Int64(Some(key))])
        }))
    }

    fn native_temporal(&self) -> bool {
        self.connection.temporal == TemporalMode::Native
    }

    fn close(&mut self) -> Result<()> {
        let statement = mem::replace(&mut self.statement.borrow_mut().ptr, ptr::null_mut());
        if !statement.is_null() {
            unsafe {
                sqlite3_finalize(statement);
            }
        }
        Ok(())
    }
}

impl Display for SqliteStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:p}", self.statement.borrow().ptr)
    }
}

impl Debug for SqliteStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteStatement")
            .field("statement", &self.statement.borrow().ptr)
            .field("sql", &self.sql)
            .field("generated_key", &self.generated_key)
            .finish()
    }
}
