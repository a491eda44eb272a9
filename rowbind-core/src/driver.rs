use crate::{Connection, Result};

/// A database backend able to open connections from a URL.
pub trait Driver {
    type Connection: Connection;

    const NAME: &'static str;

    fn connect(&self, url: &str) -> Result<Self::Connection>;
}
