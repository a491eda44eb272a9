use crate::SqliteConnection;
use rowbind_core::{Driver, Result};

#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteDriver {}

impl SqliteDriver {
    pub const fn new() -> Self {
        Self {}
    }
}

impl Driver for SqliteDriver {
    type Connection = SqliteConnection;

    const NAME: &'static str = "sqlite";

    fn connect(&self, url: &str) -> Result<SqliteConnection> {
        SqliteConnection::connect(url)
    }
}
