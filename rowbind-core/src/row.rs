use crate::{Error, Result, Value};

/// Current row of a result, columns are 1-based.
pub trait Row {
    fn column_count(&self) -> usize;

    fn column_name(&self, index: usize) -> Result<String>;

    fn get_value(&self, index: usize) -> Result<Value>;

    /// See [`Statement::native_temporal`].
    fn native_temporal(&self) -> bool;
}

/// Forward only result whose single `advance` both moves to the next row
/// and tells whether there was one.
pub trait Cursor: Row {
    fn advance(&mut self) -> Result<bool>;

    /// Calling it more than once has no effect.
    fn close(&mut self) -> Result<()>;
}

/// Owned row kept in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryRow {
    pub labels: Vec<String>,
    pub values: Vec<Value>,
    pub native_temporal: bool,
}

impl MemoryRow {
    pub fn new(labels: Vec<String>, values: Vec<Value>) -> Self {
        Self {
            labels,
            values,
            native_temporal: true,
        }
    }

    /// Row with columns named after their position.
    pub fn from_values(values: Vec<Value>) -> Self {
        let labels = (1..=values.len()).map(|i| i.to_string()).collect();
        Self::new(labels, values)
    }

    pub fn with_native_temporal(mut self, native_temporal: bool) -> Self {
        self.native_temporal = native_temporal;
        self
    }
}

pub fn check_index(index: usize, count: usize) -> Result<usize> {
    if index == 0 || index > count {
        return Err(Error::msg(format!(
            "Column index {} is out of range, the row has {} columns (indexes start from 1)",
            index, count
        )));
    }
    Ok(index - 1)
}

impl Row for MemoryRow {
    fn column_count(&self) -> usize {
        self.values.len()
    }

    fn column_name(&self, index: usize) -> Result<String> {
        let i = check_index(index, self.labels.len())?;
        Ok(self.labels[i].clone())
    }

    fn get_value(&self, index: usize) -> Result<Value> {
        let i = check_index(index, self.values.len())?;
        Ok(self.values[i].clone())
    }

    fn native_temporal(&self) -> bool {
        self.native_temporal
    }
}
