use crate::{CBox, SqliteDriver, SqliteStatement, error_message_from_ptr, sqlite3_close_v2};
use libsqlite3_sys::{
    SQLITE_OK, SQLITE_OPEN_CREATE, SQLITE_OPEN_READWRITE, SQLITE_OPEN_URI, sqlite3,
    sqlite3_busy_timeout, sqlite3_errmsg, sqlite3_exec, sqlite3_finalize, sqlite3_free,
    sqlite3_open_v2, sqlite3_prepare_v2,
};
use rowbind_core::{Connection, Context, Driver, Error, Result, truncate_long};
use std::{
    cell::RefCell,
    ffi::{CStr, CString, c_char, c_int},
    fmt::{self, Debug},
    mem, ptr,
    rc::Rc,
};
use url::form_urlencoded;

/// Milliseconds a statement waits on a locked database before failing with
/// `SQLITE_BUSY`.
const DEFAULT_BUSY_TIMEOUT: c_int = 5000;

/// How dates and date-times are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemporalMode {
    /// ISO 8601 text.
    #[default]
    Native,
    /// Instants as milliseconds since the Unix epoch, converted through the
    /// binder time zone.
    Legacy,
}

/// Connection to a SQLite database.
///
/// Clones share the same underlying connection: closing any of them closes
/// it for all. Not thread safe.
#[derive(Clone)]
pub struct SqliteConnection {
    pub(crate) connection: Rc<RefCell<CBox<*mut sqlite3>>>,
    pub(crate) temporal: TemporalMode,
}

impl SqliteConnection {
    /// Open `sqlite://<path>?<parameters>`.
    ///
    /// The parameters are passed to SQLite as a URI filename (for example
    /// `mode=ro` or `cache=shared`), except `temporal=native|legacy` that
    /// selects the [`TemporalMode`] and `busy_timeout=<milliseconds>` that
    /// bounds the wait on a locked database. The path `:memory:` opens an in-memory
    /// database.
    pub fn connect(url: &str) -> Result<SqliteConnection> {
        let prefix = format!("{}://", SqliteDriver::NAME);
        if !url.starts_with(&prefix) {
            let error = Error::msg(format!(
                "Expected sqlite connection url to start with `{}`",
                &prefix
            ));
            log::error!("{:#}", error);
            return Err(error);
        }
        let context = || format!("Error while decoding connection URL: `{}`", url);
        let (path, query) = url[prefix.len()..]
            .split_once('?')
            .unwrap_or((&url[prefix.len()..], ""));
        let mut temporal = TemporalMode::default();
        let mut busy_timeout = DEFAULT_BUSY_TIMEOUT;
        let mut parameters = form_urlencoded::Serializer::new(String::new());
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if key == "temporal" {
                temporal = match &*value {
                    "native" => TemporalMode::Native,
                    "legacy" => TemporalMode::Legacy,
                    _ => {
                        let error = Error::msg(format!(
                            "Unknown temporal mode `{}`, expected `native` or `legacy`",
                            value
                        ))
                        .context(context());
                        log::error!("{:#}", error);
                        return Err(error);
                    }
                };
            } else if key == "busy_timeout" {
                busy_timeout = match value.parse::<c_int>() {
                    Ok(v) if v >= 0 => v,
                    _ => {
                        let error = Error::msg(format!(
                            "Invalid busy timeout `{}`, expected a number of milliseconds",
                            value
                        ))
                        .context(context());
                        log::error!("{:#}", error);
                        return Err(error);
                    }
                };
            } else {
                parameters.append_pair(&key, &value);
            }
        }
        let parameters = parameters.finish();
        let path = path
            .replace('%', "%25")
            .replace('?', "%3f")
            .replace('#', "%23");
        let uri = if parameters.is_empty() {
            format!("file:{}", path)
        } else {
            format!("file:{}?{}", path, parameters)
        };
        let uri = CString::new(uri).with_context(context)?;
        let mut connection = CBox::new(ptr::null_mut(), |p| unsafe {
            sqlite3_close_v2(p);
        });
        unsafe {
            let rc = sqlite3_open_v2(
                uri.as_ptr(),
                &mut *connection,
                SQLITE_OPEN_READWRITE | SQLITE_OPEN_CREATE | SQLITE_OPEN_URI,
                ptr::null(),
            );
            if rc != SQLITE_OK {
                let error = if connection.is_null() {
                    Error::msg("Could not allocate the sqlite connection")
                } else {
                    Error::msg(error_message_from_ptr(&sqlite3_errmsg(*connection)).to_string())
                }
                .context(context());
                log::error!("{:#}", error);
                return Err(error);
            }
            sqlite3_busy_timeout(*connection, busy_timeout);
        }
        log::debug!("Opened sqlite database `{}`", path);
        Ok(Self {
            connection: Rc::new(RefCell::new(connection)),
            temporal,
        })
    }

    pub fn temporal_mode(&self) -> TemporalMode {
        self.temporal
    }

    /// The raw connection, failing if it was closed.
    pub(crate) fn handle(&self) -> Result<*mut sqlite3> {
        let connection = self.connection.borrow().ptr;
        if connection.is_null() {
            let error = Error::msg("The sqlite connection is closed");
            log::error!("{:#}", error);
            return Err(error);
        }
        Ok(connection)
    }
}

impl Connection for SqliteConnection {
    type Statement = SqliteStatement;

    fn prepare(&mut self, sql: &str) -> Result<SqliteStatement> {
        let connection = self.handle()?;
        let context = || format!("While preparing the query:\n{}", truncate_long!(sql));
        let query = match CString::new(sql) {
            Ok(query) => query,
            Err(e) => {
                let error = Error::new(e)
                    .context("Could not create a CString from the query String")
                    .context(context());
                log::error!("{:#}", error);
                return Err(error);
            }
        };
        let mut statement = CBox::new(ptr::null_mut(), |p| unsafe {
            sqlite3_finalize(p);
        });
        unsafe {
            let mut tail: *const c_char = ptr::null();
            let rc = sqlite3_prepare_v2(
                connection,
                query.as_ptr(),
                query.as_bytes().len() as c_int,
                &mut *statement,
                &mut tail,
            );
            if rc != SQLITE_OK {
                let error =
                    Error::msg(error_message_from_ptr(&sqlite3_errmsg(connection)).to_string())
                        .context(context());
                log::error!("{:#}", error);
                return Err(error);
            }
            if statement.is_null() {
                let error = Error::msg("The query does not contain any statement").context(context());
                log::error!("{:#}", error);
                return Err(error);
            }
            if !tail.is_null()
                && !CStr::from_ptr(tail)
                    .to_bytes()
                    .iter()
                    .all(|c| c.is_ascii_whitespace() || *c == b';')
            {
                let error =
                    Error::msg("Cannot prepare more than one statement at a time").context(context());
                log::error!("{:#}", error);
                return Err(error);
            }
        }
        Ok(SqliteStatement::new(statement, self.clone(), sql))
    }

    fn execute_batch(&mut self, sql: &str) -> Result<()> {
        let connection = self.handle()?;
        let context = || format!("While executing the query:\n{}", truncate_long!(sql));
        let query = CString::new(sql).with_context(context)?;
        unsafe {
            let mut message: *mut c_char = ptr::null_mut();
            let rc = sqlite3_exec(connection, query.as_ptr(), None, ptr::null_mut(), &mut message);
            if rc != SQLITE_OK {
                let error = if message.is_null() {
                    Error::msg(error_message_from_ptr(&sqlite3_errmsg(connection)).to_string())
                } else {
                    let text = error_message_from_ptr(&(message as *const c_char)).to_string();
                    sqlite3_free(message.cast());
                    Error::msg(text)
                }
                .context(context());
                log::error!("{:#}", error);
                return Err(error);
            }
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        let connection = mem::replace(&mut self.connection.borrow_mut().ptr, ptr::null_mut());
        if connection.is_null() {
            return Ok(());
        }
        // Statements still alive keep the database open until they are finalized.
        let rc = unsafe { sqlite3_close_v2(connection) };
        if rc != SQLITE_OK {
            let error = Error::msg(format!("Could not close the sqlite connection (code {})", rc));
            log::error!("{:#}", error);
            return Err(error);
        }
        log::debug!("Closed sqlite connection");
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.connection.borrow().ptr.is_null()
    }
}

impl Debug for SqliteConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteConnection")
            .field("connection", &self.connection.borrow().ptr)
            .field("temporal", &self.temporal)
            .finish()
    }
}
