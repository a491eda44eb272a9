use crate::{Scalar, Value};
use std::fmt::{self, Display};

/// Generic SQL type tag of a supported scalar.
///
/// Drivers only need it to bind a NULL carrying the right type, see
/// [`crate::Statement::bind_null`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlType {
    Boolean,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    Real,
    Double,
    Decimal,
    Char,
    Varchar,
    Binary,
    Date,
    Time,
    Timestamp,
    TimestampWithTimezone,
    Uuid,
}

impl SqlType {
    /// The SQL type a scalar binds as.
    pub const fn of<T: Scalar>() -> SqlType {
        T::SQL_TYPE
    }

    /// NULL value typed as `self`.
    pub fn empty_value(&self) -> Value {
        match self {
            SqlType::Boolean => Value::Boolean(None),
            SqlType::TinyInt => Value::Int8(None),
            SqlType::SmallInt => Value::Int16(None),
            SqlType::Integer => Value::Int32(None),
            SqlType::BigInt => Value::Int64(None),
            SqlType::Real => Value::Float32(None),
            SqlType::Double => Value::Float64(None),
            SqlType::Decimal => Value::Decimal(None),
            SqlType::Char => Value::Char(None),
            SqlType::Varchar => Value::Varchar(None),
            SqlType::Binary => Value::Blob(None),
            SqlType::Date => Value::Date(None),
            SqlType::Time => Value::Time(None),
            SqlType::Timestamp => Value::Timestamp(None),
            SqlType::TimestampWithTimezone => Value::TimestampWithTimezone(None),
            SqlType::Uuid => Value::Uuid(None),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SqlType::Boolean => "BOOLEAN",
            SqlType::TinyInt => "TINYINT",
            SqlType::SmallInt => "SMALLINT",
            SqlType::Integer => "INTEGER",
            SqlType::BigInt => "BIGINT",
            SqlType::Real => "REAL",
            SqlType::Double => "DOUBLE",
            SqlType::Decimal => "DECIMAL",
            SqlType::Char => "CHAR",
            SqlType::Varchar => "VARCHAR",
            SqlType::Binary => "BINARY",
            SqlType::Date => "DATE",
            SqlType::Time => "TIME",
            SqlType::Timestamp => "TIMESTAMP",
            SqlType::TimestampWithTimezone => "TIMESTAMP WITH TIME ZONE",
            SqlType::Uuid => "UUID",
        }
    }
}

impl Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
