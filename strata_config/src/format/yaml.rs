//! YAML codec backed by `serde-saphyr`.
//!
//! Booleans follow YAML 1.2, so `yes`, `no`, `on` and `off` stay strings.
//! Plain `null` (any case), `~` and empty values decode as nulls; quoted
//! spellings stay strings. A document with no content (only comments, `---`
//! or `...`) is an empty mapping.

use std::fmt;

use camino::Utf8Path;
use serde::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::{Map, Number, Value};
use serde_saphyr::Options;

use crate::{ConfigTree, StrataError, StrataResult};

pub(super) fn parse(path: &Utf8Path, data: &str) -> StrataResult<ConfigTree> {
    let options = Options {
        strict_booleans: true,
        ..Options::default()
    };
    let Node(document) = serde_saphyr::from_str_with_options(data, options)
        .map_err(|err| StrataError::parse(path, err))?;
    Ok(match document {
        Value::Null => ConfigTree::empty(),
        value => ConfigTree::from(value),
    })
}

/// One decoded YAML node.
///
/// Every node is requested as an option first: the untyped entry point of
/// the deserializer reports plain nulls as strings, while the option entry
/// point recognises them.
struct Node(Value);

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_option(NodeVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a YAML node")
    }

    fn visit_none<E: serde::de::Error>(self) -> Result<Node, E> {
        Ok(Node(Value::Null))
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Node, E> {
        Ok(Node(Value::Null))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Node, D::Error> {
        deserializer.deserialize_any(Self)
    }

    fn visit_bool<E: serde::de::Error>(self, value: bool) -> Result<Node, E> {
        Ok(Node(Value::Bool(value)))
    }

    fn visit_i64<E: serde::de::Error>(self, value: i64) -> Result<Node, E> {
        Ok(Node(Value::Number(value.into())))
    }

    fn visit_u64<E: serde::de::Error>(self, value: u64) -> Result<Node, E> {
        Ok(Node(Value::Number(value.into())))
    }

    fn visit_f64<E: serde::de::Error>(self, value: f64) -> Result<Node, E> {
        Ok(Node(Number::from_f64(value).map_or_else(
            || Value::String(value.to_string()),
            Value::Number,
        )))
    }

    fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<Node, E> {
        Ok(Node(Value::String(value.to_owned())))
    }

    fn visit_string<E: serde::de::Error>(self, value: String) -> Result<Node, E> {
        Ok(Node(Value::String(value)))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Node, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or_default());
        while let Some(Node(item)) = seq.next_element()? {
            items.push(item);
        }
        Ok(Node(Value::Array(items)))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Node, A::Error> {
        let mut entries = Map::new();
        while let Some((key, Node(value))) = map.next_entry::<String, Node>()? {
            entries.insert(key, value);
        }
        Ok(Node(Value::Object(entries)))
    }
}
