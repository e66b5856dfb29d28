//! Evaluator tests: lookup, selectors, calls and the boolean chain.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::{parse, ParseCache};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use strux_value::{CallError, CallResult, Mapping, Object};

#[derive(Debug)]
struct Greeter {
    name: String,
}

impl Object for Greeter {
    fn type_name(&self) -> &str {
        "Greeter"
    }

    fn call(&self, name: &str, args: &[Value]) -> CallResult {
        match name {
            "name" => Ok(Value::string(self.name.clone())),
            "greet" => {
                CallError::check_arity(args, 1)?;
                Ok(Value::string(format!("{}, {}", args[0].to_text(), self.name)))
            }
            _ => Err(CallError::NoSuchMethod {
                method: name.to_string(),
                type_name: self.type_name().to_string(),
            }),
        }
    }
}

fn data() -> Mapping {
    let upper = Value::callable("upper", |args| {
        CallError::check_arity(args, 1)?;
        Ok(Value::string(args[0].to_text().to_uppercase()))
    });
    let join = Value::callable("join", |args| {
        let parts: Vec<String> = args.iter().map(Value::to_text).collect();
        Ok(Value::string(parts.join("-")))
    });
    [
        ("title", Value::string("hello")),
        ("empty", Value::string("")),
        ("zero", Value::int(0)),
        ("one", Value::int(1)),
        ("which", Value::string("title")),
        ("col", Value::string("b")),
        (
            "nums",
            Value::list(vec![Value::int(10), Value::int(20), Value::int(30)]),
        ),
        (
            "row",
            Value::from_pairs([("a", Value::int(1)), ("b", Value::int(2))]),
        ),
        ("nested", Value::list(vec![Value::list(vec![Value::int(1), Value::int(2)])])),
        ("upper", upper),
        ("join", join),
        ("bob", Value::object(Greeter { name: "Bob".into() })),
        ("nothing", Value::Null),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

fn eval(source: &str) -> Value {
    let env = Environment::root(data());
    evaluate(source, &env).unwrap_or_else(|e| panic!("`{source}` failed: {e}"))
}

fn eval_err(source: &str) -> EvalError {
    let env = Environment::root(data());
    evaluate(source, &env).unwrap_err()
}

#[test]
fn test_literals() {
    assert_eq!(eval("'x'"), Value::string("x"));
    assert_eq!(eval("7"), Value::int(7));
    assert_eq!(eval("2.5"), Value::float(2.5));
}

#[test]
fn test_lookup_and_indirection() {
    assert_eq!(eval("title"), Value::string("hello"));
    assert_eq!(eval("missing"), Value::Null);
    // `$which` looks up `which`, then looks up its value
    assert_eq!(eval("$which"), Value::string("hello"));
    assert_eq!(eval("('lit')"), Value::string("lit"));
}

#[test]
fn test_negative_index_counts_from_end() {
    assert_eq!(eval("nums.-1"), Value::int(30));
    assert_eq!(eval("nums.0"), Value::int(10));
    assert_eq!(eval("nums.3"), Value::Null);
    assert_eq!(eval("nums.-4"), Value::Null);
    assert_eq!(eval("nested.0.1"), Value::int(2));
}

#[test]
fn test_mapping_selectors() {
    assert_eq!(eval("row.a"), Value::int(1));
    assert_eq!(eval("row.missing"), Value::Null);
    assert_eq!(eval("row.$col"), Value::int(2));
    assert_eq!(eval("row.('a')"), Value::int(1));
}

#[test]
fn test_selector_on_scalar_is_error() {
    assert!(matches!(
        eval_err("title.length"),
        EvalError::SubselectOnScalar { type_name: "str", .. }
    ));
    assert!(matches!(
        eval_err("nothing.x"),
        EvalError::SubselectOnScalar { type_name: "null", .. }
    ));
    assert!(matches!(
        eval_err("row.a.b"),
        EvalError::SubselectOnScalar { type_name: "int", .. }
    ));
}

#[test]
fn test_function_calls() {
    assert_eq!(eval("upper(title)"), Value::string("HELLO"));
    assert_eq!(eval("join(1, 'b', row.b)"), Value::string("1-b-2"));
    assert!(matches!(
        eval_err("title(1)"),
        EvalError::NotCallable { type_name: "str" }
    ));
    assert!(matches!(eval_err("upper()"), EvalError::Call { .. }));
}

#[test]
fn test_object_dispatch() {
    assert_eq!(eval("bob.name"), Value::string("Bob"));
    assert_eq!(eval("bob.greet('Hi')"), Value::string("Hi, Bob"));
    assert_eq!(eval("bob.('name')"), Value::string("Bob"));
    match eval_err("bob.fly") {
        EvalError::Call { name, source } => {
            assert_eq!(name, "fly");
            assert!(matches!(source, CallError::NoSuchMethod { .. }));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_not() {
    assert_eq!(eval("!empty"), Value::bool(true));
    assert_eq!(eval("!title"), Value::bool(false));
    assert_eq!(eval("!!nums"), Value::bool(true));
}

#[test]
fn test_ternary() {
    assert_eq!(eval("'' ? 'yes' : 'no'"), Value::string("no"));
    assert_eq!(eval("1 ? 'yes' : 'no'"), Value::string("yes"));
    assert_eq!(eval("zero : 'fallback'"), Value::string("fallback"));
    assert_eq!(eval("title : 'fallback'"), Value::string("hello"));
}

#[test]
fn test_chain_left_associative() {
    assert_eq!(eval("one ? title ? 'c'"), Value::string("c"));
    assert_eq!(eval("one ? empty ? 'c'"), Value::string(""));
    assert_eq!(eval("zero ? title ? 'c'"), Value::int(0));
}

#[test]
fn test_short_circuit_skips_calls() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let mut frame = data();
    frame.insert(
        "tick".into(),
        Value::callable("tick", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Value::int(1))
        }),
    );
    let env = Environment::root(frame);
    evaluate("zero ? tick() : 'no'", &env).unwrap();
    evaluate("one : tick()", &env).unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    evaluate("one ? tick()", &env).unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn test_method_call_outside_chain() {
    let tree = Expr::MethCall {
        name: "m".into(),
        args: vec![],
    };
    let env = Environment::root(Mapping::new());
    assert_eq!(
        reduce(&tree, &env).unwrap_err(),
        EvalError::MethodWithoutReceiver { name: "m".into() }
    );
}

#[test]
fn test_grammar_error_surfaces() {
    assert!(matches!(eval_err("a +"), EvalError::Grammar(_)));
}

#[test]
fn test_cache_reuses_trees() {
    let cache = ParseCache::new();
    let env = Environment::root(data());
    assert_eq!(cache.evaluate("row.b", &env).unwrap(), Value::int(2));
    assert_eq!(cache.evaluate("row.b", &env).unwrap(), Value::int(2));
    assert_eq!(cache.len(), 1);
    assert!(cache.evaluate("(", &env).is_err());
    assert_eq!(cache.len(), 1);
    let first = cache.get_or_parse("title").unwrap();
    let second = cache.get_or_parse("title").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_list_get() {
    let items = [Value::int(1), Value::int(2)];
    assert_eq!(list_get(&items, -2), Some(&Value::int(1)));
    assert_eq!(list_get(&items, i64::MIN), None);
    assert_eq!(list_get(&[], 0), None);
}

const SAMPLES: &[&str] = &[
    "title",
    "$which",
    "nums.-1",
    "row.$col",
    "upper(title)",
    "one ? title : 'no'",
    "!empty : zero",
    "bob.greet(row.a)",
    "nested.0.(one ? 1 : 0)",
];

proptest! {
    #[test]
    fn prop_reduce_of_parse_matches_evaluate(index in 0..SAMPLES.len()) {
        let source = SAMPLES[index];
        let env = Environment::root(data());
        let tree = parse(source).unwrap();
        prop_assert_eq!(reduce(&tree, &env).unwrap(), evaluate(source, &env).unwrap());
    }

    #[test]
    fn prop_negative_index_mirrors_positive(len in 1usize..10, back in 1usize..10) {
        prop_assume!(back <= len);
        let items: Vec<Value> = (0..len).map(|i| Value::int(i64::try_from(i).unwrap())).collect();
        let neg = -i64::try_from(back).unwrap();
        prop_assert_eq!(list_get(&items, neg), items.get(len - back));
    }
}
