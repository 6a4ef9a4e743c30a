//! TOML codec.
//!
//! Datetimes have no counterpart in the tree and are kept as their RFC 3339
//! text. Non-finite floats do not fit a JSON number either and become
//! strings such as `NaN` or `inf`.

use camino::Utf8Path;
use serde_json::Number;
use toml::{Table, Value};

use crate::{ConfigTree, Scalar, StrataError, StrataResult};

pub(super) fn parse(path: &Utf8Path, data: &str) -> StrataResult<ConfigTree> {
    let table: Table = toml::from_str(data).map_err(|err| StrataError::parse(path, err))?;
    Ok(from_table(table))
}

fn from_table(table: Table) -> ConfigTree {
    ConfigTree::Mapping(
        table
            .into_iter()
            .map(|(key, value)| (key, from_value(value)))
            .collect(),
    )
}

fn from_value(value: Value) -> ConfigTree {
    match value {
        Value::String(text) => ConfigTree::string(text),
        Value::Integer(int) => ConfigTree::Scalar(Scalar::Number(Number::from(int))),
        Value::Float(float) => Number::from_f64(float).map_or_else(
            || ConfigTree::string(float.to_string()),
            |number| ConfigTree::Scalar(Scalar::Number(number)),
        ),
        Value::Boolean(flag) => ConfigTree::Scalar(Scalar::Bool(flag)),
        Value::Datetime(datetime) => ConfigTree::string(datetime.to_string()),
        Value::Array(items) => ConfigTree::Sequence(items.into_iter().map(from_value).collect()),
        Value::Table(table) => from_table(table),
    }
}
