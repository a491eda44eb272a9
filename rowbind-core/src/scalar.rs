use crate::{AsValue, BindConfig, Error, Result, Row, SqlType, Statement};
use anyhow::Context;
use rust_decimal::Decimal;
use std::any;
use time::{OffsetDateTime, Time};
use uuid::Uuid;

/// A type that can be read from a single column and bound to a single
/// parameter.
///
/// The implementations form a closed table: a record field whose type does
/// not implement `Scalar` is rejected at compile time. Single-field wrappers
/// can join the table with `#[derive(Scalar)]`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a supported column type",
    label = "cannot be read from a column or bound to a parameter",
    note = "wrap it in a single-field struct deriving `Scalar` or use one of the supported types"
)]
pub trait Scalar: Sized {
    /// Generic SQL type used when binding a NULL.
    const SQL_TYPE: SqlType;
    const NULLABLE: bool = false;

    /// Read the column at `index`, `None` when it is NULL.
    fn read_nullable<R: Row + ?Sized>(
        row: &R,
        index: usize,
        config: &BindConfig,
    ) -> Result<Option<Self>>;

    fn read<R: Row + ?Sized>(row: &R, index: usize, config: &BindConfig) -> Result<Self> {
        Self::read_nullable(row, index, config)?.ok_or_else(|| {
            Error::msg(format!(
                "Column {} is NULL and cannot be read as {}",
                index,
                any::type_name::<Self>()
            ))
        })
    }

    fn write<S: Statement + ?Sized>(
        &self,
        statement: &mut S,
        index: usize,
        config: &BindConfig,
    ) -> Result<()>;
}

pub(crate) fn read_value<T: AsValue, R: Row + ?Sized>(row: &R, index: usize) -> Result<Option<T>> {
    let value = row.get_value(index)?;
    <Option<T> as AsValue>::try_from_value(value)
        .with_context(|| format!("While reading column {} as {}", index, any::type_name::<T>()))
}

pub(crate) fn write_value<T: AsValue, S: Statement + ?Sized>(
    value: T,
    statement: &mut S,
    index: usize,
) -> Result<()> {
    statement
        .bind_value(index, value.as_value())
        .with_context(|| format!("While binding parameter {} as {}", index, any::type_name::<T>()))
}

macro_rules! impl_scalar {
    ($source:ty, $sql_type:expr) => {
        impl Scalar for $source {
            const SQL_TYPE: SqlType = $sql_type;

            fn read_nullable<R: Row + ?Sized>(
                row: &R,
                index: usize,
                _config: &BindConfig,
            ) -> Result<Option<Self>> {
                read_value(row, index)
            }

            fn write<S: Statement + ?Sized>(
                &self,
                statement: &mut S,
                index: usize,
                _config: &BindConfig,
            ) -> Result<()> {
                write_value(self.clone(), statement, index)
            }
        }
    };
}
impl_scalar!(bool, SqlType::Boolean);
impl_scalar!(i8, SqlType::TinyInt);
impl_scalar!(i16, SqlType::SmallInt);
impl_scalar!(i32, SqlType::Integer);
impl_scalar!(i64, SqlType::BigInt);
impl_scalar!(f32, SqlType::Real);
impl_scalar!(f64, SqlType::Double);
impl_scalar!(Decimal, SqlType::Decimal);
impl_scalar!(char, SqlType::Char);
impl_scalar!(String, SqlType::Varchar);
impl_scalar!(Vec<u8>, SqlType::Binary);
impl_scalar!(Box<[u8]>, SqlType::Binary);
impl_scalar!(Uuid, SqlType::Uuid);
impl_scalar!(Time, SqlType::Time);
impl_scalar!(OffsetDateTime, SqlType::TimestampWithTimezone);

impl<T: Scalar> Scalar for Option<T> {
    const SQL_TYPE: SqlType = T::SQL_TYPE;
    const NULLABLE: bool = true;

    fn read_nullable<R: Row + ?Sized>(
        row: &R,
        index: usize,
        config: &BindConfig,
    ) -> Result<Option<Self>> {
        Ok(Some(T::read_nullable(row, index, config)?))
    }

    fn write<S: Statement + ?Sized>(
        &self,
        statement: &mut S,
        index: usize,
        config: &BindConfig,
    ) -> Result<()> {
        match self {
            Some(v) => v.write(statement, index, config),
            None => statement.bind_null(index, T::SQL_TYPE),
        }
    }
}
