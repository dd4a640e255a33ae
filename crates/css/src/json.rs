//! JSON declarations
//!
//! Loads declaration trees from JSON, using a JSON value as the input
//! record. Each value is classified by shape:
//!
//! - string: literal property
//! - object with `"$from"`: dynamic property read from the record
//! - any other object: nested selector block
//! - anything else: rejected with the key path
//!
//! Object key order is kept, so properties and nested blocks are emitted in
//! the order they are written.
//!
//! A dynamic descriptor names a dotted field path in the record and may map
//! it through `"cases"` (with an optional `"default"`) or a `"format"`
//! template where `{}` is replaced by the field value:
//!
//! ```json
//! { "color": { "$from": "mode", "cases": { "light": "white" }, "default": "black" },
//!   "width": { "$from": "size.w", "format": "{}px" } }
//! ```

use serde_json::{Map, Value as Json};

use crate::declaration::{DynamicValue, Node, StyleDeclaration, Value};
use crate::error::{CssError, CssResult, KeyPath};

/// A declaration whose dynamic values read from a JSON record
pub type JsonDeclaration = StyleDeclaration<Json>;

const FROM: &str = "$from";

/// Describe a JSON value for error messages
fn kind(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}

/// Parse a declaration from JSON text
pub fn parse_declaration(input: &str) -> CssResult<JsonDeclaration> {
    let value: Json = serde_json::from_str(input)?;
    load_declaration(&value)
}

/// Load a declaration from a JSON object
pub fn load_declaration(value: &Json) -> CssResult<JsonDeclaration> {
    match value {
        Json::Object(map) => load_level(map),
        other => Err(CssError::NotADeclaration { found: kind(other) }),
    }
}

/// Load either one declaration object or an array of them
pub fn load_declarations(value: &Json) -> CssResult<Vec<JsonDeclaration>> {
    match value {
        Json::Array(items) => items.iter().map(load_declaration).collect(),
        other => Ok(vec![load_declaration(other)?]),
    }
}

/// One nested object awaiting conversion
struct Level<'a> {
    map: &'a Map<String, Json>,
    parent: Option<usize>,
    key: &'a str,
}

/// Key path of a level, rebuilt from parent links
fn level_path(levels: &[Level<'_>], index: usize) -> KeyPath {
    let mut keys = Vec::new();
    let mut current = Some(index);
    while let Some(i) = current {
        if levels[i].parent.is_some() {
            keys.push(levels[i].key);
        }
        current = levels[i].parent;
    }
    keys.iter().rev().fold(KeyPath::new(), |path, key| path.child(key))
}

fn is_nested(value: &Json) -> bool {
    matches!(value, Json::Object(inner) if !inner.contains_key(FROM))
}

fn load_level(root: &Map<String, Json>) -> CssResult<JsonDeclaration> {
    // Breadth-first list of nested objects; a level's children are
    // contiguous and always come after it.
    let mut levels = vec![Level { map: root, parent: None, key: "" }];
    let mut first_child = Vec::new();
    let mut index = 0;
    while index < levels.len() {
        first_child.push(levels.len());
        let map = levels[index].map;
        for (key, value) in map {
            if let Json::Object(inner) = value {
                if !inner.contains_key(FROM) {
                    levels.push(Level { map: inner, parent: Some(index), key });
                }
            }
        }
        index += 1;
    }

    // Convert from the deepest levels up
    let mut built: Vec<Option<JsonDeclaration>> = levels.iter().map(|_| None).collect();
    for index in (0..levels.len()).rev() {
        let mut next_child = first_child[index];
        let mut declaration = StyleDeclaration::new();

        let map = levels[index].map;
        for (key, value) in map {
            let node = match value {
                Json::String(literal) => Node::Leaf(Value::Literal(literal.clone())),
                nested if is_nested(nested) => {
                    let child = built[next_child].take().unwrap_or_default();
                    next_child += 1;
                    Node::Nested(child)
                }
                Json::Object(inner) => {
                    let path = level_path(&levels, index).child(key);
                    let lookup = Lookup::parse(inner, &path)?;
                    Node::Leaf(Value::Dynamic(lookup.into_dynamic(value)))
                }
                other => {
                    let path = level_path(&levels, index).child(key);
                    return Err(CssError::unexpected_value(kind(other), path));
                }
            };
            declaration.insert(key.clone(), node);
        }

        built[index] = Some(declaration);
    }

    Ok(built[0].take().unwrap_or_default())
}

/// A dynamic value backed by a field of the input record
#[derive(Debug, Clone)]
struct Lookup {
    field: String,
    cases: Option<Vec<(String, String)>>,
    default: Option<String>,
    format: Option<String>,
}

impl Lookup {
    fn parse(descriptor: &Map<String, Json>, path: &KeyPath) -> CssResult<Self> {
        let mut lookup = Lookup {
            field: String::new(),
            cases: None,
            default: None,
            format: None,
        };

        for (name, value) in descriptor {
            match (name.as_str(), value) {
                (FROM, Json::String(field)) if !field.is_empty() => lookup.field = field.clone(),
                (FROM, _) => {
                    return Err(CssError::invalid_dynamic(
                        "\"$from\" must be a non-empty string",
                        path.clone(),
                    ));
                }
                ("cases", Json::Object(cases)) => {
                    let mut table = Vec::with_capacity(cases.len());
                    for (case, output) in cases {
                        match output {
                            Json::String(s) => table.push((case.clone(), s.clone())),
                            other => {
                                let message = format!(
                                    "case '{}' maps to {}, expected a string",
                                    case,
                                    kind(other)
                                );
                                return Err(CssError::invalid_dynamic(message, path.clone()));
                            }
                        }
                    }
                    lookup.cases = Some(table);
                }
                ("default", Json::String(s)) => lookup.default = Some(s.clone()),
                ("format", Json::String(s)) if s.contains("{}") => lookup.format = Some(s.clone()),
                ("format", Json::String(_)) => {
                    return Err(CssError::invalid_dynamic(
                        "\"format\" must contain {}",
                        path.clone(),
                    ));
                }
                ("cases" | "default" | "format", other) => {
                    return Err(CssError::invalid_dynamic(
                        format!("\"{}\" has the wrong type ({})", name, kind(other)),
                        path.clone(),
                    ));
                }
                (unknown, _) => {
                    return Err(CssError::invalid_dynamic(
                        format!("unknown option \"{}\"", unknown),
                        path.clone(),
                    ));
                }
            }
        }

        if lookup.cases.is_some() && lookup.format.is_some() {
            return Err(CssError::invalid_dynamic(
                "\"cases\" and \"format\" cannot be combined",
                path.clone(),
            ));
        }
        if lookup.default.is_some() && lookup.cases.is_none() {
            return Err(CssError::invalid_dynamic(
                "\"default\" requires \"cases\"",
                path.clone(),
            ));
        }

        Ok(lookup)
    }

    /// Wrap as a dynamic value keyed by its descriptor text
    fn into_dynamic(self, descriptor: &Json) -> DynamicValue<Json> {
        // Descriptors written with a different key order get different keys
        let key = format!("json:{}", descriptor);
        DynamicValue::fallible(move |record: &Json| self.resolve(record)).keyed(key)
    }

    fn resolve(&self, record: &Json) -> CssResult<String> {
        let raw = self
            .field
            .split('.')
            .try_fold(record, |value, segment| value.get(segment))
            .ok_or_else(|| CssError::MissingField { field: self.field.clone() })?;

        let text = match raw {
            Json::String(s) => s.clone(),
            Json::Number(n) => n.to_string(),
            Json::Bool(b) => b.to_string(),
            other => {
                return Err(CssError::UnusableField {
                    field: self.field.clone(),
                    found: kind(other),
                });
            }
        };

        if let Some(cases) = &self.cases {
            return match cases.iter().find(|(case, _)| *case == text) {
                Some((_, output)) => Ok(output.clone()),
                None => self.default.clone().ok_or(CssError::NoMatchingCase {
                    field: self.field.clone(),
                    value: text,
                }),
            };
        }

        match &self.format {
            Some(format) => Ok(format.replace("{}", &text)),
            None => Ok(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::compile;
    use crate::fingerprint::fingerprint;
    use serde_json::json;

    #[test]
    fn test_load_literals_and_nesting() {
        let decl = load_declaration(&json!({
            "color": "blue",
            ":hover": { "color": "green" }
        }))
        .unwrap();

        assert_eq!(decl.len(), 2);
        assert!(matches!(
            decl.get("color"),
            Some(Node::Leaf(Value::Literal(s))) if s == "blue"
        ));
        assert!(matches!(decl.get(":hover"), Some(Node::Nested(_))));
    }

    #[test]
    fn test_dynamic_cases() {
        let decl = load_declaration(&json!({
            "color": { "$from": "mode", "cases": { "light": "white" }, "default": "black" }
        }))
        .unwrap();

        let set = compile(&decl, "c2");
        assert_eq!(set.rule_strings(), vec![".c2 { color:var(--c2-0); }"]);

        let light = set.materialize(&json!({ "mode": "light" })).unwrap();
        assert_eq!(light.get("--c2-0"), Some("white"));
        let dark = set.materialize(&json!({ "mode": "dark" })).unwrap();
        assert_eq!(dark.get("--c2-0"), Some("black"));
    }

    #[test]
    fn test_dynamic_format_and_path() {
        let decl = load_declaration(&json!({
            "width": { "$from": "size.w", "format": "{}px" },
            "opacity": { "$from": "visible" }
        }))
        .unwrap();

        let set = compile(&decl, "f");
        let values = set
            .materialize(&json!({ "size": { "w": 12 }, "visible": true }))
            .unwrap();
        assert_eq!(values.get("--f-0"), Some("12px"));
        assert_eq!(values.get("--f-1"), Some("true"));
    }

    #[test]
    fn test_missing_field_propagates() {
        let decl = load_declaration(&json!({ "color": { "$from": "theme.fg" } })).unwrap();
        let set = compile(&decl, "m");

        let err = set.materialize(&json!({ "theme": {} })).unwrap_err();
        assert!(matches!(
            err,
            CssError::MissingField { ref field } if field == "theme.fg"
        ));

        let err = set.materialize(&json!({ "theme": { "fg": null } })).unwrap_err();
        assert!(matches!(err, CssError::UnusableField { found: "null", .. }));
    }

    #[test]
    fn test_no_matching_case() {
        let decl = load_declaration(&json!({
            "color": { "$from": "mode", "cases": { "light": "white" } }
        }))
        .unwrap();
        let set = compile(&decl, "n");
        let err = set.materialize(&json!({ "mode": "sepia" })).unwrap_err();
        assert!(matches!(
            err,
            CssError::NoMatchingCase { ref value, .. } if value == "sepia"
        ));
    }

    #[test]
    fn test_rejects_wrong_shapes() {
        let err = load_declaration(&json!({ ":hover": { "margin": 0 } })).unwrap_err();
        assert!(err.to_string().ends_with("but found a number at :hover > margin"));
        assert_eq!(err.path().unwrap().keys(), [":hover", "margin"]);

        let err = load_declaration(&json!({ "a": [1] })).unwrap_err();
        assert!(matches!(err, CssError::UnexpectedValue { found: "an array", .. }));

        let err = load_declaration(&json!("color: red")).unwrap_err();
        assert!(matches!(err, CssError::NotADeclaration { found: "a string" }));
    }

    #[test]
    fn test_rejects_bad_descriptors() {
        let bad = [
            json!({ "c": { "$from": "" } }),
            json!({ "c": { "$from": 3 } }),
            json!({ "c": { "$from": "x", "format": "px" } }),
            json!({ "c": { "$from": "x", "format": "{}px", "cases": {} } }),
            json!({ "c": { "$from": "x", "default": "y" } }),
            json!({ "c": { "$from": "x", "cases": { "a": 1 } } }),
            json!({ "c": { "$from": "x", "fallback": "y" } }),
        ];
        for value in &bad {
            let err = load_declaration(value).unwrap_err();
            assert!(matches!(err, CssError::InvalidDynamic { .. }), "{}", value);
            assert_eq!(err.path().unwrap().keys(), ["c".to_string()]);
        }
    }

    #[test]
    fn test_same_json_same_fingerprint() {
        let source = json!({
            "color": { "$from": "mode", "cases": { "light": "white" }, "default": "black" },
            ":hover": { "color": "red" }
        });
        let a = load_declaration(&source).unwrap();
        let b = load_declaration(&source).unwrap();
        assert_eq!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn test_load_deep_nesting() {
        let mut value = json!({ "color": { "$from": "fg" } });
        for _ in 0..100_000 {
            let mut level = Map::new();
            level.insert("margin".to_string(), Json::String("0".to_string()));
            level.insert(".a".to_string(), value);
            value = Json::Object(level);
        }

        let decl = load_declaration(&value).unwrap();
        assert_eq!(decl.dynamic_count(), 1);
        assert_eq!(decl.len(), 2);
        drop(decl);

        // serde_json values drop recursively, so keep this one alive
        std::mem::forget(value);
    }

    #[test]
    fn test_error_path_in_nested_level() {
        let err = load_declaration(&json!({
            "color": "red",
            ".a": { ".b": { "margin": "0" }, ":hover": { "width": false } }
        }))
        .unwrap_err();
        assert_eq!(err.path().unwrap().to_string(), ".a > :hover > width");
    }

    #[test]
    fn test_load_declarations_array() {
        let all = load_declarations(&json!([{ "a": "1" }, { "b": "2" }])).unwrap();
        assert_eq!(all.len(), 2);

        let one = load_declarations(&json!({ "a": "1" })).unwrap();
        assert_eq!(one.len(), 1);
    }

    #[test]
    fn test_parse_declaration_reports_json_errors() {
        assert!(matches!(parse_declaration("{ nope"), Err(CssError::Json(_))));
        assert!(parse_declaration(r#"{ "color": "red" }"#).is_ok());
    }
}
