use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::types::RowValue;

/// A single output row: column names shared across the result set, plus one
/// value per column.
///
/// Serializes as a JSON object mapping column name to value, in SELECT-list
/// order.
#[derive(Debug, Clone)]
pub struct Record {
    column_names: Arc<Vec<String>>,
    values: Vec<RowValue>,
}

impl Record {
    #[must_use]
    pub fn new(column_names: Arc<Vec<String>>, values: Vec<RowValue>) -> Self {
        Self {
            column_names,
            values,
        }
    }

    /// Get a value by column name, or `None` if the column is not present.
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&RowValue> {
        self.column_names
            .iter()
            .position(|col| col == column_name)
            .and_then(|idx| self.values.get(idx))
    }

    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    #[must_use]
    pub fn values(&self) -> &[RowValue] {
        &self.values
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.column_names.iter().zip(&self.values) {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
