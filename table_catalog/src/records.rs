use serde_json::{Map, Value as Json};
use tablesort::{Cell, Row, Value};

use crate::layout::{ColumnLayout, TableLayout};
use crate::CatalogError;

/// Converts an exported API payload into rows laid out by `layout`.
/// Accepts either a bare array of records or `{ "success": .., "data": [..] }`.
pub fn rows_from_json(json: &str, layout: &TableLayout) -> Result<Vec<Row>, CatalogError> {
    let value = serde_json::from_str(json)?;
    rows_from_value(value, layout)
}

pub fn rows_from_value(value: Json, layout: &TableLayout) -> Result<Vec<Row>, CatalogError> {
    records(value)?
        .iter()
        .enumerate()
        .map(|(index, record)| match record {
            Json::Object(record) => Ok(row_from_record(record, layout)),
            _ => Err(CatalogError::Record { index })
        })
        .collect()
}

fn records(value: Json) -> Result<Vec<Json>, CatalogError> {
    match value {
        Json::Array(records) => Ok(records),
        Json::Object(mut payload) => {
            if payload.get("success").and_then(Json::as_bool) == Some(false) {
                let error = payload.get("error")
                    .and_then(Json::as_str)
                    .unwrap_or("request failed");
                return Err(CatalogError::Payload(error.to_owned()));
            }
            match payload.remove("data") {
                Some(Json::Array(records)) => Ok(records),
                Some(Json::Null) => Ok(vec![]),
                _ => Err(CatalogError::Payload("payload has no `data` array".to_owned()))
            }
        }
        _ => Err(CatalogError::Payload("expected an array of records".to_owned()))
    }
}

pub fn row_from_record(record: &Map<String, Json>, layout: &TableLayout) -> Row {
    layout.columns.values()
        .map(|column| cell(record, column))
        .collect()
}

fn cell(record: &Map<String, Json>, column: &ColumnLayout) -> Cell {
    let value = record.get(&column.field).filter(|value| !value.is_null());
    let mut text = match value {
        Some(Json::String(s)) if s.is_empty() => column.fallback.clone().unwrap_or_default(),
        Some(Json::String(s)) => s.clone(),
        Some(Json::Bool(b)) => column.bool_label(*b).to_owned(),
        Some(other) => other.to_string(),
        None => column.fallback.clone().unwrap_or_default()
    };
    if let (Some(suffix), Some(_)) = (&column.suffix, value) {
        text.push_str(suffix);
    }

    let sort_value = match &column.sort_field {
        Some(field) => Some(record.get(field).map_or(Value::Null, sort_value)),
        None => value.filter(|value| value.is_number() || value.is_boolean()).map(sort_value)
    };
    match sort_value {
        Some(sort_value) => Cell::new(text).with_sort_value(sort_value),
        None => Cell::new(text)
    }
}

fn sort_value(json: &Json) -> Value {
    match json {
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(num) => num.as_i64()
            .map(Value::Integer)
            .or_else(|| num.as_f64().map(Value::Float))
            .unwrap_or(Value::Null),
        Json::String(s) => Value::Str(s.clone()),
        Json::Null | Json::Array(_) | Json::Object(_) => Value::Null
    }
}
