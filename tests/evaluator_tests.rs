// tests/evaluator_tests.rs

use jmesq::{Evaluator, Expr, Value, compile, convert::from_json, search};
use serde_json::json;

fn eval(query: &str, doc: serde_json::Value) -> Value {
    search(&from_json(doc), query).unwrap()
}

fn v(json: serde_json::Value) -> Value {
    from_json(json)
}

// ============================================================================
// References and Literals
// ============================================================================

#[test]
fn test_current_returns_document() {
    let doc = json!({"a": [1, {"b": null}], "c": "x"});
    assert_eq!(eval("@", doc.clone()), v(doc));
}

#[test]
fn test_literal_ignores_context() {
    assert_eq!(eval("`{\"k\": 1}`", json!(null)), v(json!({"k": 1})));
    assert_eq!(eval("'text'", json!({"text": 1})), v(json!("text")));
}

#[test]
fn test_field_access() {
    let doc = json!({"a": {"b": 1}});
    assert_eq!(eval("a.b", doc.clone()), v(json!(1)));
    assert_eq!(eval("a.c", doc.clone()), Value::Null);
    assert_eq!(eval("a.b.c", doc), Value::Null);
}

#[test]
fn test_field_of_non_object_is_null() {
    assert_eq!(eval("a", json!([1, 2])), Value::Null);
    assert_eq!(eval("a", json!("a")), Value::Null);
}

#[test]
fn test_quoted_field() {
    assert_eq!(eval("\"first name\"", json!({"first name": "Ada"})), v(json!("Ada")));
}

// ============================================================================
// Indexing
// ============================================================================

#[test]
fn test_index() {
    let doc = json!([1, 2, 3]);
    assert_eq!(eval("[1]", doc.clone()), v(json!(2)));
    assert_eq!(eval("[-1]", doc.clone()), v(json!(3)));
    assert_eq!(eval("[-3]", doc.clone()), v(json!(1)));
}

#[test]
fn test_index_out_of_range() {
    let doc = json!([1, 2, 3]);
    assert_eq!(eval("[3]", doc.clone()), Value::Null);
    assert_eq!(eval("[-4]", doc), Value::Null);
}

#[test]
fn test_index_of_non_array() {
    assert_eq!(eval("a[0]", json!({"a": {"0": 1}})), Value::Null);
}

// ============================================================================
// Projections
// ============================================================================

#[test]
fn test_wildcard_on_array_is_identity() {
    assert_eq!(eval("a[*]", json!({"a": [1, 2]})), v(json!([1, 2])));
}

#[test]
fn test_wildcard_on_object_yields_values() {
    assert_eq!(eval("[*]", json!({"x": 1, "y": 2})), v(json!([1, 2])));
    assert_eq!(eval("a[*]", json!({"a": 5})), Value::Null);
}

#[test]
fn test_value_projection() {
    assert_eq!(eval("a.*", json!({"a": {"z": 1, "y": [2]}})), v(json!([1, [2]])));
    assert_eq!(eval("a.*", json!({"a": [1, 2]})), Value::Null);
}

#[test]
fn test_flatten_one_level() {
    assert_eq!(
        eval("[]", json!([1, [2, [3, [4]]], [], 5])),
        v(json!([1, 2, [3, [4]], 5]))
    );
    assert_eq!(eval("a[]", json!({"a": "s"})), Value::Null);
}

#[test]
fn test_projection_is_not_mapped() {
    // The expression after a projection sees the whole array.
    let doc = json!({"people": [{"name": "a"}, {"name": "b"}]});
    assert_eq!(eval("people[*].name", doc.clone()), Value::Null);
    assert_eq!(eval("people[*] | name", doc), Value::Null);
}

#[test]
fn test_pipe_and_dot_agree() {
    let doc = json!({"a": {"b": [10, 20]}});
    assert_eq!(eval("a.b[1]", doc.clone()), eval("a | b | [1]", doc));
}

// ============================================================================
// Filters
// ============================================================================

#[test]
fn test_filter_keeps_truthy_in_order() {
    let doc = json!([
        {"active": true, "id": 1},
        {"active": false, "id": 2},
        {"active": true, "id": 3}
    ]);
    assert_eq!(
        eval("[?active]", doc),
        v(json!([{"active": true, "id": 1}, {"active": true, "id": 3}]))
    );
}

#[test]
fn test_filter_with_comparison() {
    let doc = json!({"items": [{"p": 5}, {"p": 15}, {"p": 25}]});
    assert_eq!(eval("items[?p > `10`]", doc), v(json!([{"p": 15}, {"p": 25}])));
}

#[test]
fn test_filter_zero_is_truthy() {
    assert_eq!(eval("[?@]", json!([0, null, "", [], {}, false, "x"])), v(json!([0, "x"])));
}

#[test]
fn test_filter_wraps_scalar_and_object() {
    assert_eq!(eval("a[?@ == `3`]", json!({"a": 3})), v(json!([3])));
    assert_eq!(eval("a[?k]", json!({"a": {"k": 1}})), v(json!([{"k": 1}])));
}

#[test]
fn test_filter_on_null_is_empty() {
    assert_eq!(eval("missing[?x]", json!({})), v(json!([])));
}

// ============================================================================
// Multi-select
// ============================================================================

#[test]
fn test_multi_select_list() {
    assert_eq!(eval("[a, b, c]", json!({"a": 1, "b": "x"})), v(json!([1, "x", null])));
}

#[test]
fn test_multi_select_hash_order() {
    let result = eval("{z: a, b: b}", json!({"a": 1, "b": 2}));
    let Value::Object(map) = result else { panic!("expected object") };
    let keys: Vec<&str> = map.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["z", "b"]);
    assert_eq!(map["z"], Value::Integer(1));
}

// ============================================================================
// Comparison
// ============================================================================

#[test]
fn test_deep_equality() {
    let doc = json!({"a": {"x": [1, {"y": 2}]}, "b": {"x": [1, {"y": 2}]}, "c": {"x": [1]}});
    assert_eq!(eval("a == b", doc.clone()), Value::Boolean(true));
    assert_eq!(eval("a != c", doc), Value::Boolean(true));
}

#[test]
fn test_numbers_compare_across_representations() {
    assert_eq!(eval("a == `1`", json!({"a": 1.0})), Value::Boolean(true));
    assert_eq!(eval("a < `1.5`", json!({"a": 1})), Value::Boolean(true));
}

#[test]
fn test_string_ordering() {
    assert_eq!(eval("'apple' < 'banana'", json!(null)), Value::Boolean(true));
    assert_eq!(eval("'b' >= 'b'", json!(null)), Value::Boolean(true));
}

#[test]
fn test_mixed_ordering_is_false() {
    assert_eq!(eval("`1` < 'a'", json!(null)), Value::Boolean(false));
    assert_eq!(eval("`1` >= 'a'", json!(null)), Value::Boolean(false));
    assert_eq!(eval("missing < `1`", json!({})), Value::Boolean(false));
}

// ============================================================================
// Logical Operators
// ============================================================================

#[test]
fn test_or_returns_operand() {
    assert_eq!(eval("a || b", json!({"a": "", "b": "fallback"})), v(json!("fallback")));
    assert_eq!(eval("a || b", json!({"a": [1], "b": 2})), v(json!([1])));
}

#[test]
fn test_and_returns_operand() {
    assert_eq!(eval("a && b", json!({"a": {}, "b": 2})), v(json!({})));
    assert_eq!(eval("a && b", json!({"a": 0, "b": 2})), v(json!(2)));
}

#[test]
fn test_not() {
    assert_eq!(eval("!a", json!({"a": []})), Value::Boolean(true));
    assert_eq!(eval("!a", json!({"a": 0})), Value::Boolean(false));
}

// ============================================================================
// Functions and Errors
// ============================================================================

#[test]
fn test_unknown_function() {
    let err = search(&Value::Null, "nope(@)").unwrap_err();
    assert_eq!(err.to_string(), "Runtime error: Unknown function: nope()");
}

#[test]
fn test_unknown_function_inside_filter_raises() {
    let doc = v(json!([1, 2]));
    assert!(search(&doc, "[?bogus(@)]").is_err());
}

#[test]
fn test_expression_ref_outside_function_is_null() {
    assert_eq!(eval("&a", json!({"a": 1})), Value::Null);
}

#[test]
fn test_input_is_not_mutated() {
    let doc = v(json!({"a": [3, 1, 2]}));
    let before = doc.clone();
    search(&doc, "sort(a)").unwrap();
    search(&doc, "reverse(a)").unwrap();
    assert_eq!(doc, before);
}

#[test]
fn test_evaluator_reuses_compiled_expression() {
    let expr: Expr = compile("length(@)").unwrap();
    let evaluator = Evaluator::new();
    assert_eq!(evaluator.eval_expression(&expr, &v(json!([1, 2]))).unwrap(), Value::Integer(2));
    assert_eq!(evaluator.eval_expression(&expr, &v(json!("abc")))
        .unwrap(), Value::Integer(3));
}
