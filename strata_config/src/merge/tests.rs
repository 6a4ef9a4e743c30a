//! Unit tests for the recursive merge and the layer stack.

use rstest::rstest;
use serde_json::{Value, json};

use super::{LayerStack, SourceLayer, merge_layers, merge_value};
use crate::ConfigTree;

fn tree(value: Value) -> ConfigTree {
    ConfigTree::from(value)
}

#[rstest]
fn nested_mappings_merge_key_by_key() {
    let merged = merge_layers([
        SourceLayer::new("low", tree(json!({"a": {"x": 1, "y": 2}}))),
        SourceLayer::new("high", tree(json!({"a": {"y": 3}}))),
    ]);
    assert_eq!(merged, tree(json!({"a": {"x": 1, "y": 3}})));
}

#[rstest]
fn deep_siblings_survive_overrides() {
    let merged = merge_layers([
        SourceLayer::new("low", tree(json!({"a": {"b": {"c": 1, "d": 2}, "e": 3}}))),
        SourceLayer::new("high", tree(json!({"a": {"b": {"d": 20}}}))),
    ]);
    assert_eq!(merged, tree(json!({"a": {"b": {"c": 1, "d": 20}, "e": 3}})));
}

#[rstest]
#[case(json!({"a": {"x": 1}}), json!({"a": "flat"}), json!({"a": "flat"}))]
#[case(json!({"a": "flat"}), json!({"a": {"x": 1}}), json!({"a": {"x": 1}}))]
#[case(json!({"a": [1, 2, 3]}), json!({"a": [4]}), json!({"a": [4]}))]
#[case(json!({"a": 1}), json!({"a": null}), json!({"a": null}))]
fn incoming_non_mappings_replace_outright(
    #[case] low: Value,
    #[case] high: Value,
    #[case] expected: Value,
) {
    let mut acc = tree(low);
    merge_value(&mut acc, tree(high));
    assert_eq!(acc, tree(expected));
}

#[rstest]
fn later_layers_win_regardless_of_names() {
    let merged = merge_layers([
        SourceLayer::new("z-last-alphabetically.yml", tree(json!({"user": "a"}))),
        SourceLayer::new("a-first-alphabetically.yml", tree(json!({"user": "b"}))),
    ]);
    assert_eq!(merged.get("user").and_then(ConfigTree::as_str), Some("b"));
}

#[rstest]
fn empty_input_yields_empty_mapping() {
    assert_eq!(merge_layers(Vec::new()), ConfigTree::empty());
    assert_eq!(LayerStack::new().merge(), ConfigTree::empty());
}

#[rstest]
fn stack_preserves_push_order() {
    let mut stack = LayerStack::new();
    stack.push("config.yml", tree(json!({"db": {"user": "a", "pass": "x"}})));
    stack.push("config.dev.yml", tree(json!({"db": {"user": "b"}})));
    assert_eq!(stack.len(), 2);
    let names: Vec<&str> = stack.layers().iter().map(|l| l.name().as_str()).collect();
    assert_eq!(names, ["config.yml", "config.dev.yml"]);
    assert_eq!(stack.merge(), tree(json!({"db": {"user": "b", "pass": "x"}})));
}

#[rstest]
fn stack_collects_from_iterators() {
    let stack: LayerStack = [
        SourceLayer::new("one", tree(json!({"a": 1}))),
        SourceLayer::new("two", tree(json!({"b": 2}))),
    ]
    .into_iter()
    .collect();
    assert!(!stack.is_empty());
    assert_eq!(stack.merge(), tree(json!({"a": 1, "b": 2})));
}
