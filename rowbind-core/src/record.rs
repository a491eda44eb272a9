use crate::{BindConfig, Error, Result, Row, Scalar, SqlType, Statement, direct_offsets};
use std::any;

/// Name and type of one field of a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub sql_type: SqlType,
    pub nullable: bool,
}

impl FieldDef {
    pub const fn new(name: &'static str, sql_type: SqlType, nullable: bool) -> Self {
        Self {
            name,
            sql_type,
            nullable,
        }
    }

    pub const fn of<T: Scalar>(name: &'static str) -> Self {
        Self::new(name, T::SQL_TYPE, T::NULLABLE)
    }
}

/// A tuple or plain struct whose fields are all [`Scalar`].
///
/// Offset mappings hold one 1-based column or parameter position per field.
/// When writing, a position of `0` leaves the field unbound.
///
/// Implemented by `#[derive(Record)]` and for tuples up to 16 elements.
pub trait Record: Sized {
    const ARITY: usize;

    fn fields() -> Box<[FieldDef]>;

    fn read_offsets<R: Row + ?Sized>(
        row: &R,
        offsets: &[usize],
        config: &BindConfig,
    ) -> Result<Self>;

    fn write_offsets<S: Statement + ?Sized>(
        &self,
        statement: &mut S,
        offsets: &[usize],
        config: &BindConfig,
    ) -> Result<()>;

    /// Read field `i` from column `i + 1`.
    fn read_direct<R: Row + ?Sized>(row: &R, config: &BindConfig) -> Result<Self> {
        Self::read_offsets(row, &direct_offsets(Self::ARITY), config)
    }

    /// Bind field `i` to parameter `i + 1`.
    fn write_direct<S: Statement + ?Sized>(
        &self,
        statement: &mut S,
        config: &BindConfig,
    ) -> Result<()> {
        self.write_offsets(statement, &direct_offsets(Self::ARITY), config)
    }
}

/// Fails when `offsets` does not hold exactly one position per field of `T`.
pub fn check_offsets<T: Record>(offsets: &[usize]) -> Result<()> {
    if offsets.len() != T::ARITY {
        let error = Error::msg(format!(
            "Expected {} offsets for {} but {} were provided",
            T::ARITY,
            any::type_name::<T>(),
            offsets.len()
        ));
        log::error!("{:#}", error);
        return Err(error);
    }
    Ok(())
}

impl Record for () {
    const ARITY: usize = 0;

    fn fields() -> Box<[FieldDef]> {
        Box::default()
    }

    fn read_offsets<R: Row + ?Sized>(
        _row: &R,
        offsets: &[usize],
        _config: &BindConfig,
    ) -> Result<Self> {
        check_offsets::<Self>(offsets)
    }

    fn write_offsets<S: Statement + ?Sized>(
        &self,
        _statement: &mut S,
        offsets: &[usize],
        _config: &BindConfig,
    ) -> Result<()> {
        check_offsets::<Self>(offsets)
    }
}

macro_rules! impl_record_tuple {
    ($arity:literal; $($ty:ident: $i:tt),+) => {
        impl<$($ty: Scalar),+> Record for ($($ty,)+) {
            const ARITY: usize = $arity;

            fn fields() -> Box<[FieldDef]> {
                Box::new([$(FieldDef::of::<$ty>(stringify!($i))),+])
            }

            fn read_offsets<R: Row + ?Sized>(
                row: &R,
                offsets: &[usize],
                config: &BindConfig,
            ) -> Result<Self> {
                check_offsets::<Self>(offsets)?;
                Ok(($(<$ty as Scalar>::read(row, offsets[$i], config)?,)+))
            }

            fn write_offsets<S: Statement + ?Sized>(
                &self,
                statement: &mut S,
                offsets: &[usize],
                config: &BindConfig,
            ) -> Result<()> {
                check_offsets::<Self>(offsets)?;
                $(
                    if offsets[$i] != 0 {
                        Scalar::write(&self.$i, statement, offsets[$i], config)?;
                    }
                )+
                Ok(())
            }
        }
    };
}
impl_record_tuple!(1; A: 0);
impl_record_tuple!(2; A: 0, B: 1);
impl_record_tuple!(3; A: 0, B: 1, C: 2);
impl_record_tuple!(4; A: 0, B: 1, C: 2, D: 3);
impl_record_tuple!(5; A: 0, B: 1, C: 2, D: 3, E: 4);
impl_record_tuple!(6; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);
impl_record_tuple!(7; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6);
impl_record_tuple!(8; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7);
impl_record_tuple!(9; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8);
impl_record_tuple!(10; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9);
impl_record_tuple!(11; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9, K: 10);
impl_record_tuple!(12; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9, K: 10, L: 11);
impl_record_tuple!(13; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9, K: 10, L: 11, M: 12);
impl_record_tuple!(14; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9, K: 10, L: 11, M: 12, N: 13);
impl_record_tuple!(15; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9, K: 10, L: 11, M: 12, N: 13, O: 14);
impl_record_tuple!(16; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9, K: 10, L: 11, M: 12, N: 13, O: 14, P: 15);
