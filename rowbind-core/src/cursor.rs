use crate::{Binder, Cursor, Error, Record, Result};
use std::fmt::{self, Debug};

type OnClose<'a> = Box<dyn FnOnce() -> Result<()> + 'a>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// No advance since creation or since the last row was taken.
    Unread,
    /// The cursor advanced and its row was not taken yet.
    Pending,
    /// The last row was taken.
    Consumed,
    Closed,
}

/// Pull iterator over a [`Cursor`].
///
/// `has_next` and `take_next` can be mixed freely: repeated `has_next` calls
/// advance the cursor at most once, and `take_next` alone advances exactly
/// once per call. When the rows are exhausted, or on `close`, the cursor is
/// closed and then the owned close callback runs, exactly once.
///
/// Not meant to be shared: it is a single consumer, forward only stream.
pub struct RowCursor<'a, C: Cursor> {
    cursor: C,
    on_close: Option<OnClose<'a>>,
    state: State,
}

impl<'a, C: Cursor> RowCursor<'a, C> {
    pub fn new(cursor: C) -> Self {
        Self {
            cursor,
            on_close: None,
            state: State::Unread,
        }
    }

    /// The callback runs after the cursor is closed, usually to release the
    /// statement and connection that produced it.
    pub fn with_close(cursor: C, on_close: impl FnOnce() -> Result<()> + 'a) -> Self {
        Self {
            cursor,
            on_close: Some(Box::new(on_close)),
            state: State::Unread,
        }
    }

    pub fn has_next(&mut self) -> Result<bool> {
        match self.state {
            State::Pending => Ok(true),
            State::Closed => Ok(false),
            State::Unread | State::Consumed => {
                if self.cursor.advance()? {
                    self.state = State::Pending;
                    Ok(true)
                } else {
                    self.close()?;
                    Ok(false)
                }
            }
        }
    }

    /// The next row, advancing the cursor unless `has_next` already did.
    pub fn take_next(&mut self) -> Result<&C> {
        if !self.has_next()? {
            return Err(Error::msg("There are no more rows to read from the cursor"));
        }
        self.state = State::Consumed;
        Ok(&self.cursor)
    }

    /// Close the cursor and run the close callback. Both are attempted even
    /// if the first fails, the first failure is returned.
    pub fn close(&mut self) -> Result<()> {
        if self.state == State::Closed {
            return Ok(());
        }
        self.state = State::Closed;
        log::debug!("Closing the cursor");
        let closed = self.cursor.close();
        let released = match self.on_close.take() {
            Some(on_close) => on_close(),
            None => Ok(()),
        };
        if let Err(ref e) = released {
            log::error!("{:#}", e);
        }
        closed.and(released)
    }

    pub fn is_closed(&self) -> bool {
        self.state == State::Closed
    }

    /// Typed iterator reading every remaining row with `binder`.
    pub fn records<T: Record>(self, binder: Binder<T>) -> Records<'a, C, T> {
        Records { rows: self, binder }
    }
}

impl<'a, C: Cursor> Drop for RowCursor<'a, C> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            log::error!("Error while closing a cursor that was dropped: {:#}", e);
        }
    }
}

impl<'a, C: Cursor> Debug for RowCursor<'a, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowCursor")
            .field("state", &self.state)
            .field("on_close", &self.on_close.is_some())
            .finish()
    }
}

/// Iterator of records decoded from a [`RowCursor`].
pub struct Records<'a, C: Cursor, T: Record> {
    rows: RowCursor<'a, C>,
    binder: Binder<T>,
}

impl<'a, C: Cursor, T: Record> Records<'a, C, T> {
    pub fn has_next(&mut self) -> Result<bool> {
        self.rows.has_next()
    }

    pub fn close(&mut self) -> Result<()> {
        self.rows.close()
    }

    pub fn is_closed(&self) -> bool {
        self.rows.is_closed()
    }

    pub fn binder(&self) -> &Binder<T> {
        &self.binder
    }
}

impl<'a, C: Cursor, T: Record> Debug for Records<'a, C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Records")
            .field("rows", &self.rows)
            .field("binder", &self.binder)
            .finish()
    }
}

impl<'a, C: Cursor, T: Record> Iterator for Records<'a, C, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.rows.has_next() {
            Ok(false) => None,
            Ok(true) => Some(
                self.rows
                    .take_next()
                    .and_then(|row| self.binder.read(row)),
            ),
            Err(e) => Some(Err(e)),
        }
    }
}
