// tests/function_tests.rs

use jmesq::{Builtin, Value, convert::from_json, search};
use serde_json::json;

fn eval(query: &str, doc: serde_json::Value) -> Value {
    search(&from_json(doc), query).unwrap()
}

fn v(json: serde_json::Value) -> Value {
    from_json(json)
}

// ============================================================================
// Objects
// ============================================================================

#[test]
fn test_keys_and_values_in_insertion_order() {
    let doc = json!({"b": 1, "a": 2});
    assert_eq!(eval("keys(@)", doc.clone()), v(json!(["b", "a"])));
    assert_eq!(eval("values(@)", doc), v(json!([1, 2])));
}

#[test]
fn test_keys_of_non_object() {
    assert_eq!(eval("keys(@)", json!([1, 2])), Value::Null);
    assert_eq!(eval("values(@)", json!("s")), Value::Null);
}

#[test]
fn test_merge_is_right_biased() {
    assert_eq!(
        eval("merge(a, b, `5`)", json!({"a": {"x": 1, "y": 1}, "b": {"y": 2, "z": 3}})),
        v(json!({"x": 1, "y": 2, "z": 3}))
    );
    assert_eq!(eval("merge()", json!(null)), v(json!({})));
}

// ============================================================================
// Inspection
// ============================================================================

#[test]
fn test_length() {
    assert_eq!(eval("length(@)", json!([1, 2, 3])), v(json!(3)));
    assert_eq!(eval("length(@)", json!("héllo")), v(json!(5)));
    assert_eq!(eval("length(@)", json!({"a": 1})), v(json!(1)));
    assert_eq!(eval("length(@)", json!(12)), Value::Null);
}

#[test]
fn test_type() {
    let cases = [
        (json!(null), "null"),
        (json!(true), "boolean"),
        (json!(1), "number"),
        (json!(1.5), "number"),
        (json!("s"), "string"),
        (json!([]), "array"),
        (json!({}), "object"),
    ];
    for (doc, expected) in cases {
        assert_eq!(eval("type(@)", doc), v(json!(expected)));
    }
}

#[test]
fn test_not_null() {
    assert_eq!(eval("not_null(a, b, c)", json!({"b": 0, "c": 1})), v(json!(0)));
    assert_eq!(eval("not_null(a, b)", json!({})), Value::Null);
}

// ============================================================================
// Conversion
// ============================================================================

#[test]
fn test_to_string_serializes() {
    assert_eq!(eval("to_string(@)", json!({"a": [1, true]})), v(json!("{\"a\":[1,true]}")));
    assert_eq!(eval("to_string(@)", json!("x")), v(json!("\"x\"")));
    assert_eq!(eval("to_string(@)", json!(2.5)), v(json!("2.5")));
}

#[test]
fn test_to_number() {
    assert_eq!(eval("to_number(@)", json!("42")), v(json!(42)));
    assert_eq!(eval("to_number(@)", json!(" 2.5 ")), v(json!(2.5)));
    assert_eq!(eval("to_number(@)", json!("")), v(json!(0)));
    assert_eq!(eval("to_number(@)", json!(true)), v(json!(1)));
    assert_eq!(eval("to_number(@)", json!(null)), v(json!(0)));
    assert_eq!(eval("to_number(@)", json!("abc")), Value::Null);
    assert_eq!(eval("to_number(@)", json!([1])), Value::Null);
}

#[test]
fn test_number_string_round_trip() {
    for n in [json!(0), json!(17), json!(-3), json!(2.5), json!(-0.125), json!(1e3)] {
        assert_eq!(eval("to_number(to_string(@))", n.clone()), v(n));
    }
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn test_contains() {
    assert_eq!(eval("contains(@, `{\"a\": 1}`)", json!([1, {"a": 1}])), Value::Boolean(true));
    assert_eq!(eval("contains(@, `2`)", json!([1, 3])), Value::Boolean(false));
    assert_eq!(eval("contains(@, 'ell')", json!("hello")), Value::Boolean(true));
    assert_eq!(eval("contains(@, `1`)", json!("a1b")), Value::Boolean(true));
    assert_eq!(eval("contains(@, 'x')", json!(5)), Value::Boolean(false));
}

#[test]
fn test_starts_and_ends_with() {
    assert_eq!(eval("starts_with(@, 'he')", json!("hello")), Value::Boolean(true));
    assert_eq!(eval("ends_with(@, 'lo')", json!("hello")), Value::Boolean(true));
    assert_eq!(eval("starts_with(@, `1`)", json!("1x")), Value::Boolean(false));
}

#[test]
fn test_string_transforms() {
    assert_eq!(eval("trim(@)", json!("  hi \n")), v(json!("hi")));
    assert_eq!(eval("upper(@)", json!("Mixed")), v(json!("MIXED")));
    assert_eq!(eval("lower(@)", json!("Mixed")), v(json!("mixed")));
    assert_eq!(eval("upper(@)", json!(1)), Value::Null);
}

#[test]
fn test_join() {
    assert_eq!(eval("join(', ', @)", json!(["a", "b", "c"])), v(json!("a, b, c")));
    assert_eq!(eval("join('-', @)", json!([1, null, true])), v(json!("1--true")));
    assert_eq!(eval("join('-', @)", json!("abc")), Value::Null);
}

#[test]
fn test_split() {
    assert_eq!(eval("split(',', @)", json!("a,b,,c")), v(json!(["a", "b", "", "c"])));
    assert_eq!(eval("split('', @)", json!("ab")), v(json!(["a", "b"])));
    assert_eq!(eval("split(',', @)", json!(1)), Value::Null);
}

// ============================================================================
// Arrays
// ============================================================================

#[test]
fn test_reverse() {
    assert_eq!(eval("reverse(@)", json!([1, 2, 3])), v(json!([3, 2, 1])));
    assert_eq!(eval("reverse(@)", json!("abc")), v(json!("cba")));
    assert_eq!(eval("reverse(@)", json!(1)), Value::Null);
}

#[test]
fn test_sort() {
    assert_eq!(eval("sort(@)", json!([3, 1.5, 2])), v(json!([1.5, 2, 3])));
    assert_eq!(eval("sort(@)", json!(["b", "c", "a"])), v(json!(["a", "b", "c"])));
    assert_eq!(eval("sort(@)", json!({})), Value::Null);
}

#[test]
fn test_sort_by_is_stable() {
    let doc = json!([
        {"k": 2, "n": "a"},
        {"k": 1, "n": "b"},
        {"k": 2, "n": "c"},
        {"k": 1, "n": "d"}
    ]);
    assert_eq!(eval("sort_by(@, &k)[*]", doc.clone()), v(json!([
        {"k": 1, "n": "b"},
        {"k": 1, "n": "d"},
        {"k": 2, "n": "a"},
        {"k": 2, "n": "c"}
    ])));
}

#[test]
fn test_sort_by_accepts_bare_key_expression() {
    let doc = json!([{"id": 2}, {"id": 1}]);
    assert_eq!(eval("sort_by(@, id)", doc), v(json!([{"id": 1}, {"id": 2}])));
}

#[test]
fn test_sort_by_without_key() {
    assert_eq!(eval("sort_by(@)", json!([2, 1])), Value::Null);
}

#[test]
fn test_min_and_max() {
    assert_eq!(eval("min(@)", json!([3, -1, 2])), v(json!(-1)));
    assert_eq!(eval("max(@)", json!([3, 7.5, 2])), v(json!(7.5)));
    assert_eq!(eval("max(@)", json!(["a", "c", "b"])), v(json!("c")));
    assert_eq!(eval("min(@)", json!([])), Value::Null);
    assert_eq!(eval("min(@)", json!([1, "a"])), Value::Null);
}

#[test]
fn test_min_by_and_max_by() {
    let doc = json!([{"a": 3, "id": 1}, {"a": 1, "id": 2}, {"a": 3, "id": 3}, {"a": 1, "id": 4}]);
    assert_eq!(eval("min_by(@, &a).id", doc.clone()), v(json!(2)));
    assert_eq!(eval("max_by(@, &a).id", doc), v(json!(1)));
    assert_eq!(eval("max_by(@, &a)", json!([])), Value::Null);
}

#[test]
fn test_sum_and_avg() {
    assert_eq!(eval("sum(@)", json!([1, 2, 3])), v(json!(6)));
    assert_eq!(eval("sum(@)", json!([0.1, 0.2])), v(json!(0.3)));
    assert_eq!(eval("sum(@)", json!([])), v(json!(0)));
    assert_eq!(eval("avg(@)", json!([1, 2])), v(json!(1.5)));
    assert_eq!(eval("avg(@)", json!([])), Value::Null);
    assert_eq!(eval("sum(@)", json!([1, "x"])), Value::Null);
    assert_eq!(eval("sum(@)", json!([1, "2"])), v(json!(3)));
}

#[test]
fn test_rounding_and_abs() {
    assert_eq!(eval("floor(@)", json!(2.7)), v(json!(2)));
    assert_eq!(eval("ceil(@)", json!(2.1)), v(json!(3)));
    assert_eq!(eval("floor(@)", json!(-2.5)), v(json!(-3)));
    assert_eq!(eval("abs(@)", json!(-4)), v(json!(4)));
    assert_eq!(eval("abs(@)", json!(-0.5)), v(json!(0.5)));
    assert_eq!(eval("ceil(@)", json!("1")), Value::Null);
}

#[test]
fn test_flatten_is_deep() {
    assert_eq!(eval("flatten(@)", json!([1, [2, [3, [4]]]])), v(json!([1, 2, 3, 4])));
    assert_eq!(eval("flatten(@)", json!({})), Value::Null);
}

// ============================================================================
// Library
// ============================================================================

#[test]
fn test_every_builtin_resolves_by_name() {
    for builtin in Builtin::ALL {
        assert_eq!(Builtin::from_name(builtin.name()), Some(builtin));
    }
    assert_eq!(Builtin::from_name("sortby"), None);
}

#[test]
fn test_only_key_positions_are_deferred() {
    assert!(Builtin::SortBy.defers_argument(1));
    assert!(!Builtin::SortBy.defers_argument(0));
    assert!(!Builtin::Sort.defers_argument(1));
}
