mod autoclose;
mod cursor;
mod keys;
mod simple;
mod temporal;
mod types;

use autoclose::autoclose;
use cursor::cursor;
#[cfg(not(feature = "disable-generated-keys"))]
use keys::keys;
use log::LevelFilter;
use rowbind::{Connection, Driver};
use simple::simple;
use std::env;
#[cfg(not(feature = "disable-temporal"))]
use temporal::temporal;
use types::types;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

/// Run the whole suite against the database at `url`.
///
/// Some tests close their connection, so each of them opens its own.
pub fn execute_tests<D: Driver>(driver: &D, url: &str)
where
    D::Connection: Clone,
{
    let mut connection = driver
        .connect(url)
        .expect("Could not open the database");
    simple(&mut connection);
    types(&mut connection);
    cursor(&mut connection);
    #[cfg(not(feature = "disable-generated-keys"))]
    keys(&mut connection);
    #[cfg(not(feature = "disable-temporal"))]
    temporal(&mut connection);
    connection.close().expect("Could not close the connection");
    assert!(connection.is_closed());
    autoclose(driver, url);
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        $($code)+
        log::set_max_level(level);
    }};
}
