//! Row extraction and result-set building for tokio-postgres.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::DbError;
use crate::results::ResultSet;
use crate::types::RowValue;

/// Extracts a [`RowValue`] from a `tokio_postgres` row at the given index.
///
/// Matches on the column's type name; SQL NULL maps to [`RowValue::Null`].
/// Types outside the report's value model are read back as text.
///
/// # Errors
///
/// Returns the driver error if the column cannot be retrieved as the
/// expected Rust type.
pub fn extract_value(row: &tokio_postgres::Row, idx: usize) -> Result<RowValue, DbError> {
    let type_info = row.columns()[idx].type_();

    match type_info.name() {
        "int2" => {
            let val: Option<i16> = row.try_get(idx)?;
            Ok(val.map_or(RowValue::Null, |v| RowValue::Int(i64::from(v))))
        }
        "int4" => {
            let val: Option<i32> = row.try_get(idx)?;
            Ok(val.map_or(RowValue::Null, |v| RowValue::Int(i64::from(v))))
        }
        "int8" => {
            let val: Option<i64> = row.try_get(idx)?;
            Ok(val.map_or(RowValue::Null, RowValue::Int))
        }
        "float4" | "float8" => {
            let val: Option<f64> = row.try_get(idx)?;
            Ok(val.map_or(RowValue::Null, RowValue::Float))
        }
        "bool" => {
            let val: Option<bool> = row.try_get(idx)?;
            Ok(val.map_or(RowValue::Null, RowValue::Bool))
        }
        "timestamp" => {
            let val: Option<NaiveDateTime> = row.try_get(idx)?;
            Ok(val.map_or(RowValue::Null, RowValue::Timestamp))
        }
        "timestamptz" => {
            let val: Option<DateTime<Utc>> = row.try_get(idx)?;
            Ok(val.map_or(RowValue::Null, |v| RowValue::Timestamp(v.naive_utc())))
        }
        _ => {
            let val: Option<String> = row.try_get(idx)?;
            Ok(val.map_or(RowValue::Null, RowValue::Text))
        }
    }
}

/// Build a result set from raw Postgres rows.
///
/// Column names come from the first row's metadata; an empty slice yields an
/// empty result set.
///
/// # Errors
///
/// Returns errors from row value extraction.
pub fn build_result_set(rows: &[tokio_postgres::Row]) -> Result<ResultSet, DbError> {
    let mut result_set = ResultSet::with_capacity(rows.len());
    if let Some(row) = rows.first() {
        let cols: Vec<String> = row.columns().iter().map(|c| c.name().to_string()).collect();
        result_set.set_column_names(std::sync::Arc::new(cols));
    }

    for row in rows {
        let col_count = row.columns().len();
        let mut values = Vec::with_capacity(col_count);
        for idx in 0..col_count {
            values.push(extract_value(row, idx)?);
        }
        result_set.add_row_values(values);
    }

    Ok(result_set)
}
