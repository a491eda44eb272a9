//! Date and date-time support for drivers without native temporal types.
//!
//! When a row or statement reports [`Row::native_temporal`] the values are
//! read and bound directly. Otherwise they travel as instants
//! ([`OffsetDateTime`]) interpreted in [`BindConfig::zone`]: a date becomes the
//! start of that day in the zone, a date-time is assumed to be local to it.
//! Writing and reading back through the same zone yields the same instant.

use crate::{BindConfig, Result, Row, Scalar, SqlType, Statement};
use crate::scalar::{read_value, write_value};
use time::{Date, OffsetDateTime, PrimitiveDateTime};

/// The instant a date-time denotes in `config.zone`.
pub fn to_instant(value: PrimitiveDateTime, config: &BindConfig) -> OffsetDateTime {
    value.assume_offset(config.zone)
}

/// The date-time an instant shows in `config.zone`.
pub fn from_instant(value: OffsetDateTime, config: &BindConfig) -> PrimitiveDateTime {
    let local = value.to_offset(config.zone);
    PrimitiveDateTime::new(local.date(), local.time())
}

/// Milliseconds since the Unix epoch.
pub fn epoch_millis(value: OffsetDateTime) -> i64 {
    (value.unix_timestamp_nanos() / 1_000_000) as i64
}

impl Scalar for Date {
    const SQL_TYPE: SqlType = SqlType::Date;

    fn read_nullable<R: Row + ?Sized>(
        row: &R,
        index: usize,
        config: &BindConfig,
    ) -> Result<Option<Self>> {
        if row.native_temporal() {
            return read_value(row, index);
        }
        Ok(read_value::<OffsetDateTime, _>(row, index)?
            .map(|v| from_instant(v, config).date()))
    }

    fn write<S: Statement + ?Sized>(
        &self,
        statement: &mut S,
        index: usize,
        config: &BindConfig,
    ) -> Result<()> {
        if statement.native_temporal() {
            return write_value(*self, statement, index);
        }
        write_value(to_instant(self.midnight(), config), statement, index)
    }
}

impl Scalar for PrimitiveDateTime {
    const SQL_TYPE: SqlType = SqlType::Timestamp;

    fn read_nullable<R: Row + ?Sized>(
        row: &R,
        index: usize,
        config: &BindConfig,
    ) -> Result<Option<Self>> {
        if row.native_temporal() {
            return read_value(row, index);
        }
        Ok(read_value::<OffsetDateTime, _>(row, index)?.map(|v| from_instant(v, config)))
    }

    fn write<S: Statement + ?Sized>(
        &self,
        statement: &mut S,
        index: usize,
        config: &BindConfig,
    ) -> Result<()> {
        if statement.native_temporal() {
            return write_value(*self, statement, index);
        }
        write_value(to_instant(*self, config), statement, index)
    }
}
