use crate::{
    BindConfig, Binder, Connection, Record, Records, Result, RowCursor, Scalar, Statement,
    truncate_long,
};
use anyhow::Context;

/// Sequential parameter setter and execution helpers around a [`Statement`].
///
/// Scalar `set` calls bind positions 1, 2, 3, ... in call order, `reset`
/// starts over from 1. Record binds always start from position 1 and are not
/// combined with the sequential position.
///
/// ```rust,ignore
/// let key: Option<i64> = FluentStatement::new(connection.prepare("INSERT INTO t (a, b) VALUES (?, ?)")?)
///     .set(10)?
///     .set(String::from("ten"))?
///     .insert_returning_key()?;
/// ```
#[derive(Debug)]
pub struct FluentStatement<S: Statement> {
    statement: S,
    position: usize,
    config: BindConfig,
}

impl<S: Statement> FluentStatement<S> {
    pub fn new(statement: S) -> Self {
        Self::with_config(statement, BindConfig::default())
    }

    pub fn with_config(statement: S, config: BindConfig) -> Self {
        Self {
            statement,
            position: 1,
            config,
        }
    }

    /// Position the next `set` binds to.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn reset(&mut self) -> &mut Self {
        self.position = 1;
        self
    }

    pub fn set<T: Scalar>(&mut self, value: T) -> Result<&mut Self> {
        value.write(&mut self.statement, self.position, &self.config)?;
        self.position += 1;
        Ok(self)
    }

    pub fn set_null<T: Scalar>(&mut self) -> Result<&mut Self> {
        self.statement.bind_null(self.position, T::SQL_TYPE)?;
        self.position += 1;
        Ok(self)
    }

    /// Bind every field of `value` from position 1.
    pub fn bind<T: Record>(&mut self, binder: &Binder<T>, value: &T) -> Result<&mut Self> {
        binder.write(&mut self.statement, value)?;
        Ok(self)
    }

    pub fn bind_offsets<T: Record>(
        &mut self,
        binder: &Binder<T>,
        value: &T,
        offsets: &[usize],
    ) -> Result<&mut Self> {
        binder.write_offsets(&mut self.statement, value, offsets)?;
        Ok(self)
    }

    /// Run the query and collect every row.
    pub fn query<T: Record>(&mut self, binder: &Binder<T>) -> Result<Vec<T>> {
        self.records(binder)?.collect()
    }

    /// Run the query and read the first row, if any.
    pub fn query_one<T: Record>(&mut self, binder: &Binder<T>) -> Result<Option<T>> {
        let mut records = self.records(binder)?;
        let result = records.next().transpose()?;
        records.close()?;
        Ok(result)
    }

    /// Run the query and read the first column of every row.
    pub fn query_scalar<T: Scalar>(&mut self) -> Result<Vec<T>> {
        let mut rows = self.cursor()?;
        let mut result = Vec::new();
        while rows.has_next()? {
            result.push(T::read(rows.take_next()?, 1, &self.config)?);
        }
        Ok(result)
    }

    /// Run the query returning the rows lazily.
    pub fn cursor(&mut self) -> Result<RowCursor<'static, S::Cursor>> {
        Ok(RowCursor::new(self.statement.query()?))
    }

    pub fn records<T: Record>(
        &mut self,
        binder: &Binder<T>,
    ) -> Result<Records<'static, S::Cursor, T>> {
        Ok(self.cursor()?.records(binder.clone()))
    }

    /// Like `records` but the statement is closed once the rows are
    /// exhausted or the iterator is closed.
    pub fn into_records<'a, T: Record>(mut self, binder: &Binder<T>) -> Result<Records<'a, S::Cursor, T>>
    where
        S: 'a,
    {
        let cursor = self.statement.query()?;
        let mut statement = self.statement;
        Ok(RowCursor::with_close(cursor, move || statement.close()).records(binder.clone()))
    }

    /// Execute the statement and return the number of affected rows.
    pub fn update(&mut self) -> Result<u64> {
        self.statement.execute()
    }

    /// Execute the statement and read the first generated key, `None` when
    /// no key was generated.
    pub fn insert_returning_key<K: Scalar>(&mut self) -> Result<Option<K>> {
        self.statement.execute()?;
        let Some(keys) = self.statement.generated_keys()? else {
            return Ok(None);
        };
        K::read_nullable(&keys, 1, &self.config).context("While reading the generated key")
    }

    pub fn statement(&mut self) -> &mut S {
        &mut self.statement
    }

    pub fn into_inner(self) -> S {
        self.statement
    }
}

/// Prepare `sql`, bind `params` from position 1 and return the resulting
/// records. The statement and the connection are both closed when the rows
/// are exhausted or the iterator is closed or dropped, so the connection must
/// not be used afterwards.
pub fn query_autoclose<'a, C, P, T>(
    mut connection: C,
    sql: &str,
    params: &P,
    binder: &Binder<T>,
) -> Result<Records<'a, <C::Statement as Statement>::Cursor, T>>
where
    C: Connection + 'a,
    C::Statement: 'a,
    P: Record,
    T: Record,
{
    let context = || format!("While running the query:\n{}", truncate_long!(sql));
    let prepared = connection.prepare(sql).with_context(context);
    let mut statement = match prepared {
        Ok(v) => v,
        Err(e) => {
            if let Err(close_error) = connection.close() {
                log::error!("{:#}", close_error);
            }
            return Err(e);
        }
    };
    let cursor = params
        .write_direct(&mut statement, binder.config())
        .and_then(|_| statement.query())
        .with_context(context);
    let cursor = match cursor {
        Ok(v) => v,
        Err(e) => {
            for result in [statement.close(), connection.close()] {
                if let Err(close_error) = result {
                    log::error!("{:#}", close_error);
                }
            }
            return Err(e);
        }
    };
    let on_close = move || {
        let statement_closed = statement.close();
        let connection_closed = connection.close();
        match (statement_closed, connection_closed) {
            (Err(e), Err(other)) => {
                log::error!("{:#}", other);
                Err(e)
            }
            (Err(e), _) | (_, Err(e)) => Err(e),
            _ => Ok(()),
        }
    };
    Ok(RowCursor::with_close(cursor, on_close).records(binder.clone()))
}
