#![allow(dead_code)]

use rowbind_core::{
    Connection, Cursor, Error, MemoryRow, Result, Row, Statement, Value, check_index,
};
use std::{cell::Cell, collections::BTreeMap, rc::Rc};

/// Shared counter observable after the owner was moved away.
#[derive(Debug, Clone, Default)]
pub struct Counter(Rc<Cell<usize>>);

impl Counter {
    pub fn increment(&self) {
        self.0.set(self.0.get() + 1);
    }
    pub fn get(&self) -> usize {
        self.0.get()
    }
}

#[derive(Debug, Default)]
pub struct MemoryCursor {
    pub rows: Vec<Vec<Value>>,
    pub current: usize,
    pub advances: Counter,
    pub closes: Counter,
    pub closed: bool,
    pub native_temporal: bool,
}

impl MemoryCursor {
    pub fn new(rows: Vec<Vec<Value>>) -> Self {
        Self {
            rows,
            native_temporal: true,
            ..Default::default()
        }
    }

    fn current_row(&self) -> Result<&Vec<Value>> {
        if self.current == 0 || self.current > self.rows.len() {
            return Err(Error::msg("The cursor is not positioned on a row"));
        }
        Ok(&self.rows[self.current - 1])
    }
}

impl Row for MemoryCursor {
    fn column_count(&self) -> usize {
        self.current_row().map(|v| v.len()).unwrap_or_default()
    }
    fn column_name(&self, index: usize) -> Result<String> {
        check_index(index, self.column_count())?;
        Ok(format!("c{}", index))
    }
    fn get_value(&self, index: usize) -> Result<Value> {
        let row = self.current_row()?;
        Ok(row[check_index(index, row.len())?].clone())
    }
    fn native_temporal(&self) -> bool {
        self.native_temporal
    }
}

impl Cursor for MemoryCursor {
    fn advance(&mut self) -> Result<bool> {
        if self.closed {
            return Err(Error::msg("The cursor is closed"));
        }
        self.advances.increment();
        if self.current < self.rows.len() {
            self.current += 1;
            Ok(true)
        } else {
            self.current = self.rows.len() + 1;
            Ok(false)
        }
    }
    fn close(&mut self) -> Result<()> {
        self.closed = true;
        self.closes.increment();
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStatement {
    pub params: BTreeMap<usize, Value>,
    pub rows: Vec<Vec<Value>>,
    pub key: Option<i64>,
    pub native_temporal: bool,
    pub executions: Counter,
    pub closes: Counter,
    pub cursor_closes: Counter,
}

impl MemoryStatement {
    pub fn new(rows: Vec<Vec<Value>>) -> Self {
        Self {
            rows,
            native_temporal: true,
            ..Default::default()
        }
    }

    /// The bound parameters as a row, in position order.
    pub fn params_row(&self) -> MemoryRow {
        MemoryRow::from_values(self.params.values().cloned().collect())
            .with_native_temporal(self.native_temporal)
    }
}

impl Statement for MemoryStatement {
    type Cursor = MemoryCursor;

    fn parameter_count(&self) -> usize {
        self.params.len()
    }
    fn bind_value(&mut self, index: usize, value: Value) -> Result<()> {
        if index == 0 {
            return Err(Error::msg("Parameter indexes start from 1"));
        }
        self.params.insert(index, value);
        Ok(())
    }
    fn clear_bindings(&mut self) -> Result<()> {
        self.params.clear();
        Ok(())
    }
    fn query(&mut self) -> Result<MemoryCursor> {
        self.executions.increment();
        Ok(MemoryCursor {
            rows: self.rows.clone(),
            closes: self.cursor_closes.clone(),
            native_temporal: self.native_temporal,
            ..Default::default()
        })
    }
    fn execute(&mut self) -> Result<u64> {
        self.executions.increment();
        Ok(1)
    }
    fn generated_keys(&mut self) -> Result<Option<MemoryRow>> {
        Ok(self
            .key
            .map(|v| MemoryRow::from_values(vec![Value::Int64(Some(v))])))
    }
    fn native_temporal(&self) -> bool {
        self.native_temporal
    }
    fn close(&mut self) -> Result<()> {
        self.closes.increment();
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryConnection {
    pub rows: Vec<Vec<Value>>,
    pub closes: Counter,
    pub statement_closes: Counter,
    pub cursor_closes: Counter,
    pub fail_prepare: bool,
}

impl Connection for MemoryConnection {
    type Statement = MemoryStatement;

    fn prepare(&mut self, _sql: &str) -> Result<MemoryStatement> {
        if self.fail_prepare {
            return Err(Error::msg("syntax error"));
        }
        Ok(MemoryStatement {
            rows: self.rows.clone(),
            native_temporal: true,
            closes: self.statement_closes.clone(),
            cursor_closes: self.cursor_closes.clone(),
            ..Default::default()
        })
    }
    fn execute_batch(&mut self, _sql: &str) -> Result<()> {
        Ok(())
    }
    fn close(&mut self) -> Result<()> {
        self.closes.increment();
        Ok(())
    }
    fn is_closed(&self) -> bool {
        self.closes.get() > 0
    }
}

pub fn int_rows(values: impl IntoIterator<Item = i32>) -> Vec<Vec<Value>> {
    values
        .into_iter()
        .map(|v| vec![Value::Int32(Some(v)), Value::Varchar(Some(format!("row {v}")))])
        .collect()
}
