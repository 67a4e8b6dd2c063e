use super::Value;
use crate::{Error, Result};

use std::sync::Arc;

/// One result row: values in column order, plus the column names shared by
/// every row of the same result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Row {
    /// # Panics
    ///
    /// If `values` and `columns` differ in length.
    pub fn new(columns: Arc<[String]>, values: Vec<Value>) -> Self {
        assert_eq!(
            columns.len(),
            values.len(),
            "row width does not match its columns"
        );
        Self { columns, values }
    }

    /// Builds a standalone row from `(column, value)` pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let (columns, values): (Vec<String>, Vec<Value>) = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .unzip();

        Self {
            columns: columns.into(),
            values,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Position of the first column named `column`.
    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn get(&self, column: &str) -> Result<&Value> {
        self.index_of(column)
            .map(|i| &self.values[i])
            .ok_or_else(|| Error::column_not_found(column))
    }

    /// Moves the value of `column` out of the row, leaving `Null` behind.
    pub fn take(&mut self, column: &str) -> Result<Value> {
        let i = self
            .index_of(column)
            .ok_or_else(|| Error::column_not_found(column))?;
        Ok(std::mem::take(&mut self.values[i]))
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// The first column's value; `Null` for a row without columns.
    pub fn into_first(self) -> Value {
        self.values.into_iter().next().unwrap_or_default()
    }
}
