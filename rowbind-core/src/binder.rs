use crate::{
    BindConfig, Error, FieldDef, Record, Result, Row, Statement, direct_offsets, skip_offsets,
    trailing_key_offsets,
};
use std::{
    any,
    fmt::{self, Debug},
    marker::PhantomData,
    sync::Arc,
};
use time::UtcOffset;

/// Reusable read and write operations for one [`Record`] type.
///
/// A binder holds no per call state and can be shared between threads, each
/// one supplying its own rows and statements. The only setting, the
/// [`BindConfig`], is changed by producing a new binder.
pub struct Binder<T: Record> {
    fields: Arc<[FieldDef]>,
    config: BindConfig,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> Binder<T> {
    pub fn new() -> Self {
        Self::with_config(BindConfig::default())
    }

    pub fn with_config(config: BindConfig) -> Self {
        let fields: Arc<[FieldDef]> = T::fields().into();
        log::debug!(
            "Binder for {} with {} fields: {}",
            any::type_name::<T>(),
            fields.len(),
            fields.iter().map(|f| f.name).collect::<Vec<_>>().join(", ")
        );
        Self {
            fields,
            config,
            _record: PhantomData,
        }
    }

    /// Same binder converting temporal values through `zone`.
    pub fn with_zone(&self, zone: UtcOffset) -> Self {
        self.reconfigured(self.config.with_zone(zone))
    }

    /// Same binder using `config`.
    pub fn reconfigured(&self, config: BindConfig) -> Self {
        Self {
            fields: self.fields.clone(),
            config,
            _record: PhantomData,
        }
    }

    pub fn config(&self) -> &BindConfig {
        &self.config
    }

    pub fn arity(&self) -> usize {
        T::ARITY
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn field_names(&self) -> impl ExactSizeIterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    /// Construct a record reading field `i` from column `i + 1`.
    pub fn read<R: Row + ?Sized>(&self, row: &R) -> Result<T> {
        T::read_direct(row, &self.config)
    }

    /// Construct a record reading field `i` from column `offsets[i]`.
    pub fn read_offsets<R: Row + ?Sized>(&self, row: &R, offsets: &[usize]) -> Result<T> {
        T::read_offsets(row, offsets, &self.config)
    }

    /// Bind field `i` to parameter `i + 1`.
    pub fn write<S: Statement + ?Sized>(&self, statement: &mut S, value: &T) -> Result<()> {
        value.write_direct(statement, &self.config)
    }

    /// Bind field `i` to parameter `offsets[i]`, skipping fields mapped to `0`.
    pub fn write_offsets<S: Statement + ?Sized>(
        &self,
        statement: &mut S,
        value: &T,
        offsets: &[usize],
    ) -> Result<()> {
        value.write_offsets(statement, offsets, &self.config)
    }

    pub fn direct_offsets(&self) -> Vec<usize> {
        direct_offsets(T::ARITY)
    }

    /// See [`crate::skip_offsets`].
    pub fn skip_offsets(&self, to_skip: &[usize]) -> Vec<usize> {
        skip_offsets(T::ARITY, to_skip)
    }

    /// See [`crate::trailing_key_offsets`].
    pub fn trailing_key_offsets(&self, keys: &[usize]) -> Vec<usize> {
        trailing_key_offsets(T::ARITY, keys)
    }

    /// Offsets locating every field among the columns of `row` by name,
    /// ignoring ASCII case.
    pub fn offsets_by_name<R: Row + ?Sized>(&self, row: &R) -> Result<Vec<usize>> {
        let labels = (1..=row.column_count())
            .map(|i| row.column_name(i))
            .collect::<Result<Vec<_>>>()?;
        self.fields
            .iter()
            .map(|field| {
                labels
                    .iter()
                    .position(|label| label.eq_ignore_ascii_case(field.name))
                    .map(|i| i + 1)
                    .ok_or_else(|| {
                        let error = Error::msg(format!(
                            "Column `{}` of {} does not exist in the row provided",
                            field.name,
                            any::type_name::<T>()
                        ));
                        log::error!("{:#}", error);
                        error
                    })
            })
            .collect()
    }
}

impl<T: Record> Default for Binder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> Clone for Binder<T> {
    fn clone(&self) -> Self {
        self.reconfigured(self.config)
    }
}

impl<T: Record> Debug for Binder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binder")
            .field("record", &any::type_name::<T>())
            .field("fields", &self.fields)
            .field("config", &self.config)
            .finish()
    }
}
