use std::sync::Arc;

use serde::ser::{Serialize, Serializer};

use super::row::Record;
use crate::types::RowValue;

/// The ordered, paginated sequence of records returned by one query
/// execution.
///
/// Column names are stored once and shared by every record. Serializes as a
/// JSON array of records.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    records: Vec<Record>,
    column_names: Option<Arc<Vec<String>>>,
}

impl ResultSet {
    /// Create a new result set with a known capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> ResultSet {
        ResultSet {
            records: Vec::with_capacity(capacity),
            column_names: None,
        }
    }

    /// Set the column names shared by all records.
    pub fn set_column_names(&mut self, column_names: Arc<Vec<String>>) {
        self.column_names = Some(column_names);
    }

    /// Append a row of values; a no-op if column names were never set.
    pub fn add_row_values(&mut self, values: Vec<RowValue>) {
        if let Some(column_names) = &self.column_names {
            self.records.push(Record::new(column_names.clone(), values));
        }
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Serialize for ResultSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.records.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_dropped_until_column_names_are_set() {
        let mut set = ResultSet::with_capacity(2);
        set.add_row_values(vec![RowValue::Int(1)]);
        assert!(set.is_empty());

        set.set_column_names(Arc::new(vec!["id".to_string()]));
        set.add_row_values(vec![RowValue::Int(1)]);
        set.add_row_values(vec![RowValue::Int(2)]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn serializes_as_json_array_in_insertion_order() {
        let mut set = ResultSet::with_capacity(2);
        set.set_column_names(Arc::new(vec!["id".to_string()]));
        set.add_row_values(vec![RowValue::Int(1)]);
        set.add_row_values(vec![RowValue::Int(2)]);

        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json, serde_json::json!([{ "id": 1 }, { "id": 2 }]));
    }
}
