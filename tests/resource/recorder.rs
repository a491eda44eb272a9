#![allow(dead_code)]

use rowbind::{Cursor, Error, MemoryRow, Result, Row, Statement, Value};
use std::collections::BTreeMap;

/// Statement that only records its bindings.
#[derive(Debug)]
pub struct Recorder {
    pub params: BTreeMap<usize, Value>,
    pub native_temporal: bool,
}

impl Default for Recorder {
    fn default() -> Self {
        Self {
            params: Default::default(),
            native_temporal: true,
        }
    }
}

impl Recorder {
    pub fn row(&self) -> MemoryRow {
        MemoryRow::from_values(self.params.values().cloned().collect())
            .with_native_temporal(self.native_temporal)
    }
}

impl Statement for Recorder {
    type Cursor = MemoryRows;

    fn parameter_count(&self) -> usize {
        self.params.len()
    }
    fn bind_value(&mut self, index: usize, value: Value) -> Result<()> {
        self.params.insert(index, value);
        Ok(())
    }
    fn clear_bindings(&mut self) -> Result<()> {
        self.params.clear();
        Ok(())
    }
    fn query(&mut self) -> Result<MemoryRows> {
        Ok(MemoryRows {
            rows: vec![self.row()],
            current: None,
        })
    }
    fn execute(&mut self) -> Result<u64> {
        Ok(0)
    }
    fn generated_keys(&mut self) -> Result<Option<MemoryRow>> {
        Ok(None)
    }
    fn native_temporal(&self) -> bool {
        self.native_temporal
    }
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Cursor over owned rows.
#[derive(Debug, Default)]
pub struct MemoryRows {
    pub rows: Vec<MemoryRow>,
    pub current: Option<usize>,
}

impl MemoryRows {
    fn row(&self) -> Result<&MemoryRow> {
        self.current
            .and_then(|i| self.rows.get(i))
            .ok_or_else(|| Error::msg("The cursor is not positioned on a row"))
    }
}

impl Row for MemoryRows {
    fn column_count(&self) -> usize {
        self.row().map(|r| r.column_count()).unwrap_or_default()
    }
    fn column_name(&self, index: usize) -> Result<String> {
        self.row()?.column_name(index)
    }
    fn get_value(&self, index: usize) -> Result<Value> {
        self.row()?.get_value(index)
    }
    fn native_temporal(&self) -> bool {
        self.row().map(|r| r.native_temporal).unwrap_or(true)
    }
}

impl Cursor for MemoryRows {
    fn advance(&mut self) -> Result<bool> {
        let next = self.current.map_or(0, |i| i + 1);
        self.current = Some(next.min(self.rows.len()));
        Ok(next < self.rows.len())
    }
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
