use std::borrow::Cow;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// A raw cell value as handed to the coercion functions.
#[derive(Copy, Clone, Default, Debug, PartialEq)]
pub enum Data<'a> {
    Integer(i64),
    Float(f64),
    Bool(bool),
    Str(&'a str),
    Timestamp(DateTime<Utc>),
    #[default]
    Null
}

impl<'a> Data<'a> {
    pub fn as_text(&self) -> Cow<'a, str> {
        match *self {
            Data::Integer(num) => num.to_string().into(),
            Data::Float(num) => num.to_string().into(),
            Data::Bool(b) => b.to_string().into(),
            Data::Str(s) => s.into(),
            Data::Timestamp(ts) => ts.to_rfc3339().into(),
            Data::Null => "".into()
        }
    }
}

impl Display for Data<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_text())
    }
}

/// Owned counterpart of [`Data`], stored on cells as an explicit sort value.
#[derive(Clone, Default, Debug, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Timestamp(DateTime<Utc>),
    #[default]
    Null
}

impl Value {
    pub fn as_data(&self) -> Data<'_> {
        match self {
            Value::Integer(num) => Data::Integer(*num),
            Value::Float(num) => Data::Float(*num),
            Value::Bool(b) => Data::Bool(*b),
            Value::Str(s) => Data::Str(s),
            Value::Timestamp(ts) => Data::Timestamp(*ts),
            Value::Null => Data::Null
        }
    }
}

impl From<Data<'_>> for Value {
    fn from(data: Data<'_>) -> Self {
        match data {
            Data::Integer(num) => Value::Integer(num),
            Data::Float(num) => Value::Float(num),
            Data::Bool(b) => Value::Bool(b),
            Data::Str(s) => Value::Str(s.to_owned()),
            Data::Timestamp(ts) => Value::Timestamp(ts),
            Data::Null => Value::Null
        }
    }
}

/// Comparison strategy declared for a column.
#[derive(Copy, Clone, Default, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum ColumnType {
    Number,
    Boolean,
    Date,
    #[default]
    Text
}

impl ColumnType {
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Number => "number",
            ColumnType::Boolean => "boolean",
            ColumnType::Date => "date",
            ColumnType::Text => "string"
        }
    }
}

impl Display for ColumnType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown column type `{0}`, expected one of number, boolean, date, string")]
pub struct ParseColumnTypeError(pub String);

impl FromStr for ColumnType {
    type Err = ParseColumnTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "number" => Ok(ColumnType::Number),
            "boolean" => Ok(ColumnType::Boolean),
            "date" => Ok(ColumnType::Date),
            "string" | "" => Ok(ColumnType::Text),
            _ => Err(ParseColumnTypeError(s.to_owned()))
        }
    }
}
