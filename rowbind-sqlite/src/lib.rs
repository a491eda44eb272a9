mod cbox;
mod connection;
mod cursor;
mod driver;
mod extract;
mod statement;

use libsqlite3_sys::sqlite3;
use std::{
    ffi::{CStr, c_char, c_int},
    ptr,
};

pub(crate) use cbox::*;
pub use connection::*;
pub use cursor::*;
pub use driver::*;
pub use statement::*;

// Left out of the libsqlite3-sys bindings, the bundled library exports it.
unsafe extern "C" {
    pub(crate) fn sqlite3_close_v2(db: *mut sqlite3) -> c_int;
}

pub(crate) fn error_message_from_ptr(ptr: &'_ *const c_char) -> &'_ str {
    unsafe {
        if *ptr != ptr::null() {
            CStr::from_ptr(*ptr)
                .to_str()
                .unwrap_or("Unknown error (the error message was not a valid C string)")
        } else {
            "Unknown error (could not extract the error message)"
        }
    }
}
