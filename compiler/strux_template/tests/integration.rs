//! Integration Tests for the Strux template engine
//!
//! Templates and data are written as JSON, processed through the public API,
//! and compared as JSON.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;

use serde_json::{json, Value as Json};
use strux_template::{from_json, to_json, MemoryLoader, Template, TemplateError, Value};

/// Process a JSON template against JSON data.
fn render(template: &Json, data: &Json) -> Result<Json, TemplateError> {
    render_with(&Template::new(), template, data)
}

fn render_with(engine: &Template, template: &Json, data: &Json) -> Result<Json, TemplateError> {
    let out = engine.process(&from_json(template.clone()), &from_json(data.clone()))?;
    Ok(to_json(&out))
}

fn render_ok(template: &Json, data: &Json) -> Json {
    render(template, data).unwrap_or_else(|e| panic!("render failed: {e}"))
}

// =============================================================================
// End-to-end scenarios
// =============================================================================

mod scenarios {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_loop() {
        let data = json!({"list": [{"title": "a"}, {"title": "b"}]});
        assert_eq!(render_ok(&json!(["@list", "$title"]), &data), json!(["a", "b"]));
    }

    #[test]
    fn test_conditional() {
        assert_eq!(
            render_ok(&json!({"checked": ["?active", "yes", "no"]}), &json!({"active": 1})),
            json!({"checked": "yes"})
        );
        assert_eq!(
            render_ok(&json!({"checked": ["?active", "yes", "no"]}), &json!({"active": 0})),
            json!({"checked": "no"})
        );
    }

    #[test]
    fn test_forced_interpolation() {
        assert_eq!(
            render_ok(&json!([1, "&-list", 4]), &json!({"list": [2, 3]})),
            json!([1, 2, 3, 4])
        );
        assert_eq!(
            render_ok(&json!([1, "&list", 4]), &json!({"list": [2, 3]})),
            json!([1, [2, 3], 4])
        );
    }

    #[test]
    fn test_leading_forced_marker_splices_list() {
        assert_eq!(
            render_ok(&json!([1, ["/-", "x", 2, 3], 4]), &json!({})),
            json!([1, 2, 3, 4])
        );
        assert_eq!(render_ok(&json!([1, ["//-"], 4]), &json!({})), json!([1, 4]));
        assert_eq!(
            render_ok(&json!([1, [2, 3, "//-"], 4]), &json!({})),
            json!([1, [2, 3], 4])
        );
    }

    #[test]
    fn test_comment_key_blanked() {
        assert_eq!(
            render_ok(&json!({"#3": 4, "1": 2}), &json!({})),
            json!({"": 4, "1": 2})
        );
    }

    #[test]
    fn test_inline_comment() {
        assert_eq!(
            render_ok(&json!("It is {#hidden} visible"), &json!({})),
            json!("It is visible")
        );
    }

    #[test]
    fn test_missing_include() {
        let engine = Template::builder().include_path("/nowhere/a").include_path("/nowhere/b").build();
        match render_with(&engine, &json!(".'missing.json'"), &json!({})).unwrap_err() {
            TemplateError::IncludeNotFound { file, searched } => {
                assert_eq!(file, "missing.json");
                assert_eq!(searched.len(), 2);
                assert!(searched[0].ends_with("a/missing.json"));
                assert!(searched[1].ends_with("b/missing.json"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}

// =============================================================================
// Top level
// =============================================================================

mod top_level {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_null_template() {
        assert_eq!(render_ok(&Json::Null, &json!({"x": 1})), Json::Null);
    }

    #[test]
    fn test_non_mapping_data_gives_empty_scope() {
        assert_eq!(render_ok(&json!("[{$x}]"), &json!([1, 2])), json!("[]"));
    }

    #[test]
    fn test_nothing_at_top_level_is_null() {
        assert_eq!(render_ok(&json!(["?x", "then"]), &json!({})), Json::Null);
    }

    #[test]
    fn test_plain_data_passes_through() {
        let template = json!({"a": [1, 2.5, true, null], "b": {"c": "text"}});
        assert_eq!(render_ok(&template, &json!({})), template);
    }
}

// =============================================================================
// Nesting
// =============================================================================

mod nesting {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_nested_loops_see_outer_scope() {
        let data = json!({
            "groups": [
                {"name": "g1", "items": [{"v": 1}, {"v": 2}]},
                {"name": "g2", "items": [{"v": 3}]}
            ]
        });
        let template = json!(["@groups", ["@items", "{$name}:{$v}"]]);
        assert_eq!(
            render_ok(&template, &data),
            json!([["g1:1", "g1:2"], ["g2:3"]])
        );
    }

    #[test]
    fn test_flattened_nested_loops() {
        let data = json!({"groups": [{"items": [1, 2]}, {"items": [3]}]});
        let template = json!(["@groups", ["@-items", "&value"]]);
        // Elements that are not mappings give empty scopes
        assert_eq!(render_ok(&template, &data), json!([null, null, null]));
    }

    #[test]
    fn test_loop_inside_mapping() {
        let data = json!({"users": [{"id": 1, "name": "ann"}, {"id": 2, "name": "bo"}]});
        let template = json!({
            "count": "&users.-1.id",
            "names": ["@users", "$name"],
            "byId": {"%first": {"$key": "&value"}}
        });
        assert_eq!(
            render_ok(&template, &data),
            json!({"count": 2, "names": ["ann", "bo"], "byId": {}})
        );
    }

    #[test]
    fn test_hash_construct_over_data() {
        let data = json!({"env": {"HOME": "/root", "SHELL": "sh"}});
        let template = json!({"%env": {"var_{$key}": "{$value}!"}});
        assert_eq!(
            render_ok(&template, &data),
            json!({"var_HOME": "/root!", "var_SHELL": "sh!"})
        );
    }

    #[test]
    fn test_switch_inside_loop() {
        let data = json!({"shapes": [{"kind": "sq"}, {"kind": "tri"}, {"kind": "hex"}]});
        let template = json!(["@shapes", {"?kind": {"sq": 4, "tri": 3, "?": "many"}}]);
        assert_eq!(render_ok(&template, &data), json!([4, 3, "many"]));
    }

    #[test]
    fn test_merge_key_with_conditional() {
        let template = json!({"<": ["?admin", {"role": "admin"}, {"role": "user"}], "role": "&override"});
        assert_eq!(
            render_ok(&template, &json!({"admin": true})),
            json!({"role": null})
        );
        let template = json!({"<": ["?admin", {"role": "admin"}, {"role": "user"}]});
        assert_eq!(render_ok(&template, &json!({"admin": false})), json!({"role": "user"}));
    }
}

// =============================================================================
// Host values
// =============================================================================

mod host {
    use super::*;
    use pretty_assertions::assert_eq;
    use strux_template::Mapping;

    fn data() -> Value {
        let mut data = Mapping::new();
        data.insert(
            "upper".into(),
            Value::callable("upper", |args| {
                Ok(Value::string(
                    args.first().map(Value::to_text).unwrap_or_default().to_uppercase(),
                ))
            }),
        );
        data.insert(
            "defaults".into(),
            Value::callable("defaults", |_| {
                Ok(Value::from_pairs([("color", Value::string("red"))]))
            }),
        );
        data.insert("name".into(), Value::string("ada"));
        Value::mapping(data)
    }

    #[test]
    fn test_capture_in_list() {
        let template = from_json(json!(["^upper", "hello {$name}", "tail"]));
        let out = Template::new().process(&template, &data()).unwrap();
        assert_eq!(to_json(&out), json!(["HELLO ADA", "tail"]));
    }

    #[test]
    fn test_call_key_merge() {
        let template = from_json(json!({"^defaults": null, "size": 2}));
        let out = Template::new().process(&template, &data()).unwrap();
        assert_eq!(to_json(&out), json!({"color": "red", "size": 2}));
    }

    #[test]
    fn test_call_leaf() {
        let template = from_json(json!({"d": "^defaults"}));
        let out = Template::new().process(&template, &data()).unwrap();
        assert_eq!(to_json(&out), json!({"d": {"color": "red"}}));
    }

    #[test]
    fn test_template_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Template>();
    }
}

// =============================================================================
// Includes
// =============================================================================

mod includes {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_include_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("row.json"), r#"{"title": "$title", "n": "&n"}"#).unwrap();

        let engine = Template::builder().include_path(dir.path()).build();
        let data = json!({"rows": [{"title": "a", "n": 1}, {"title": "b", "n": 2}]});
        assert_eq!(
            render_with(&engine, &json!(["@rows", ".'row.json'"]), &data).unwrap(),
            json!([{"title": "a", "n": 1}, {"title": "b", "n": 2}])
        );
    }

    #[test]
    fn test_first_include_path_wins() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        fs::write(second.path().join("x.json"), r#""second""#).unwrap();
        fs::write(first.path().join("x.json"), r#""first""#).unwrap();

        let mut engine = Template::builder().include_path(first.path()).build();
        engine.add_include_paths([second.path()]);
        assert_eq!(engine.include_paths().len(), 2);
        assert_eq!(
            render_with(&engine, &json!(".'x.json'"), &json!({})).unwrap(),
            json!("first")
        );
    }

    #[test]
    fn test_included_name_from_data() {
        let loader = MemoryLoader::new()
            .with_file("tpl/a.json", r#"["&-items"]"#)
            .with_file("tpl/b.json", r#""b""#);
        let engine = Template::builder().include_path("tpl").loader(loader).build();
        let data = json!({"which": "a.json", "items": [1, 2]});
        assert_eq!(
            render_with(&engine, &json!([0, ".-which", 3]), &data).unwrap(),
            json!([0, 1, 2, 3])
        );
    }

    #[test]
    fn test_include_decode_error() {
        let loader = MemoryLoader::new().with_file("tpl/bad.json", "{oops");
        let engine = Template::builder().include_path("tpl").loader(loader).build();
        assert!(matches!(
            render_with(&engine, &json!(".'bad.json'"), &json!({})).unwrap_err(),
            TemplateError::IncludeDecode { .. }
        ));
    }
}

// =============================================================================
// Errors
// =============================================================================

mod errors {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_grammar_error_names_clause() {
        let err = render(&json!({"a": "&x +"}), &json!({})).unwrap_err();
        assert!(err.to_string().contains("`x +`"), "{err}");
    }

    #[test]
    fn test_subselect_on_scalar() {
        let err = render(&json!("&name.first"), &json!({"name": "ada"})).unwrap_err();
        assert!(matches!(
            err,
            TemplateError::Eval {
                source: strux_template::EvalError::SubselectOnScalar { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_huge_integer_literal_is_float() {
        assert_eq!(render_ok(&json!("&99999999999999999999"), &json!({})), json!(1e20));
    }

    #[test]
    fn test_loop_over_mapping_fails() {
        assert!(matches!(
            render(&json!(["@m", "x"]), &json!({"m": {"a": 1}})).unwrap_err(),
            TemplateError::LoopType { found: "mapping", .. }
        ));
    }

    #[test]
    fn test_error_aborts_whole_process() {
        let template = json!({"fine": "&ok", "broken": ["@ok", "x"]});
        assert!(render(&template, &json!({"ok": 1})).is_err());
    }
}
