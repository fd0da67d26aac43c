//! Structured data (JSON-LD) extraction and checklist validation.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::dom;
use crate::page::Page;
use crate::Options;

/// Required and recommended properties for one schema type.
struct TypeRules {
    types: &'static [&'static str],
    required: &'static [&'static str],
    recommended: &'static [&'static str],
}

const RULES: &[TypeRules] = &[
    TypeRules {
        types: &["Organization"],
        required: &["name"],
        recommended: &["url"],
    },
    TypeRules {
        types: &["Person"],
        required: &["name"],
        recommended: &[],
    },
    TypeRules {
        types: &["Product"],
        required: &["name"],
        recommended: &["offers"],
    },
    TypeRules {
        types: &["Article", "BlogPosting"],
        required: &["headline"],
        recommended: &["author", "datePublished"],
    },
];

/// Structured data section of the report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaReport {
    /// Entity types in encounter order, repeats included.
    pub present_schemas: Vec<String>,
    /// Raw entity per type; a later entity of the same type replaces an
    /// earlier one but keeps its position.
    pub schema_details: IndexMap<String, Value>,
    /// Number of JSON-LD blocks, parseable or not.
    pub count: usize,
    /// At least one JSON-LD block exists.
    pub has_schema: bool,
    /// Parse and validation errors in encounter order.
    pub errors: Vec<String>,
    /// At least one error was found.
    pub has_errors: bool,
}

/// Extract and validate every JSON-LD block on the page.
///
/// A block that fails to parse is reported and skipped; the other blocks
/// are unaffected.
#[must_use]
pub fn analyze(page: &Page, _options: &Options) -> SchemaReport {
    let mut report = SchemaReport::default();

    let blocks = page.document().select(r#"script[type="application/ld+json"]"#);
    for (i, script) in blocks.iter().enumerate() {
        let index = i + 1;
        let raw = dom::text_content(&script);

        let parsed: Value = match serde_json::from_str(raw.trim()) {
            Ok(value) => value,
            Err(e) => {
                report
                    .errors
                    .push(format!("Failed to parse structured data block #{index}: {e}"));
                continue;
            }
        };

        for entity in entities(parsed) {
            record_entity(&mut report, entity, index);
        }
    }

    report.count = blocks.length();
    report.has_schema = report.count > 0;
    report.has_errors = !report.errors.is_empty();

    log::debug!(
        "schema: {} blocks, {} entities, {} errors",
        report.count,
        report.present_schemas.len(),
        report.errors.len()
    );

    report
}

/// Expand a parsed block into its entities.
///
/// A top-level array contributes its items, an object with an `@graph`
/// array contributes the graph items, anything else is a single entity.
fn entities(block: Value) -> Vec<Value> {
    match block {
        Value::Array(items) => items,
        Value::Object(mut object) => match object.remove("@graph") {
            Some(Value::Array(graph)) => graph,
            Some(other) => {
                object.insert("@graph".to_string(), other);
                vec![Value::Object(object)]
            }
            None => vec![Value::Object(object)],
        },
        other => vec![other],
    }
}

fn record_entity(report: &mut SchemaReport, entity: Value, index: usize) {
    let Some(schema_type) = entity_type(&entity) else {
        report
            .errors
            .push(format!("Structured data block #{index}: missing '@type' property"));
        return;
    };

    if let (Some(rules), Some(object)) = (rules_for(&schema_type), entity.as_object()) {
        report.errors.extend(validate(object, &schema_type, index, rules));
    }

    report.present_schemas.push(schema_type.clone());
    report.schema_details.insert(schema_type, entity);
}

/// The entity's `@type`: a string, or the first string of an array.
fn entity_type(entity: &Value) -> Option<String> {
    match entity.get("@type")? {
        Value::String(t) if !t.is_empty() => Some(t.clone()),
        Value::Array(types) => types
            .iter()
            .find_map(Value::as_str)
            .filter(|t| !t.is_empty())
            .map(str::to_string),
        _ => None,
    }
}

fn rules_for(schema_type: &str) -> Option<&'static TypeRules> {
    RULES.iter().find(|rules| rules.types.contains(&schema_type))
}

fn validate(object: &Map<String, Value>, schema_type: &str, index: usize, rules: &TypeRules) -> Vec<String> {
    let missing = |props: &'static [&'static str]| {
        props
            .iter()
            .filter(|prop| !object.get(**prop).is_some_and(is_truthy))
            .copied()
            .collect::<Vec<_>>()
    };

    let required = missing(rules.required)
        .into_iter()
        .map(|prop| format!("Schema {schema_type} #{index}: missing required property '{prop}'"));
    let recommended = missing(rules.recommended)
        .into_iter()
        .map(|prop| format!("Schema {schema_type} #{index}: missing recommended property '{prop}'"));

    required.chain(recommended).collect()
}

/// JSON truthiness: everything except `null`, `false`, `0`, `NaN` and `""`.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report(scripts: &[&str]) -> SchemaReport {
        let body: String = scripts
            .iter()
            .map(|s| format!(r#"<script type="application/ld+json">{s}</script>"#))
            .collect();
        let page = Page::parse(&format!("<html><head>{body}</head><body></body></html>"), "https://example.com/")
            .unwrap_or_else(|e| panic!("{e}"));
        analyze(&page, &Options::default())
    }

    #[test]
    fn test_malformed_block_is_isolated() {
        let r = report(&[
            r#"{"@type": "Person", "name": "Ada"}"#,
            r#"{"@type": "Organization", "name": "#,
            r#"{"@type": "WebSite", "url": "https://example.com"}"#,
        ]);

        assert_eq!(r.present_schemas, vec!["Person", "WebSite"]);
        assert_eq!(r.count, 3);
        assert_eq!(r.errors.len(), 1);
        assert!(r.errors[0].starts_with("Failed to parse structured data block #2: "));
        assert!(r.has_errors);
    }

    #[test]
    fn test_missing_type() {
        let r = report(&[r#"{"name": "untyped"}"#]);
        assert!(r.has_schema);
        assert!(r.present_schemas.is_empty());
        assert_eq!(r.errors, vec!["Structured data block #1: missing '@type' property"]);
    }

    #[test]
    fn test_checklist_messages() {
        let r = report(&[
            r#"{"@type": "Organization", "name": "", "url": "https://example.com"}"#,
            r#"{"@type": "BlogPosting", "headline": "Hello"}"#,
        ]);
        assert_eq!(
            r.errors,
            vec![
                "Schema Organization #1: missing required property 'name'",
                "Schema BlogPosting #2: missing recommended property 'author'",
                "Schema BlogPosting #2: missing recommended property 'datePublished'",
            ]
        );
    }

    #[test]
    fn test_no_blocks() {
        let r = report(&[]);
        assert_eq!(r, SchemaReport::default());
    }

    #[test]
    fn test_unknown_types_recorded_without_validation() {
        let r = report(&[r#"{"@type": "Recipe"}"#]);
        assert_eq!(r.present_schemas, vec!["Recipe"]);
        assert!(r.errors.is_empty());
    }

    #[test]
    fn test_graph_and_array_expansion() {
        let r = report(&[
            r#"{"@context": "https://schema.org", "@graph": [{"@type": "WebPage"}, {"@type": ["Person", "Thing"], "name": "Ada"}]}"#,
            r#"[{"@type": "Product", "name": "Lamp", "offers": {"price": 10}}]"#,
        ]);
        assert_eq!(r.present_schemas, vec!["WebPage", "Person", "Product"]);
        assert!(r.errors.is_empty());
    }

    #[test]
    fn test_details_last_write_wins() {
        let r = report(&[
            r#"{"@type": "Person", "name": "First"}"#,
            r#"{"@type": "Organization", "name": "Org", "url": "https://o.example"}"#,
            r#"{"@type": "Person", "name": "Second"}"#,
        ]);

        assert_eq!(r.present_schemas, vec!["Person", "Organization", "Person"]);
        assert_eq!(r.count, 3);
        let keys: Vec<_> = r.schema_details.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Person", "Organization"]);
        assert_eq!(r.schema_details["Person"], json!({"@type": "Person", "name": "Second"}));
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(false)));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!("x")));
    }
}
