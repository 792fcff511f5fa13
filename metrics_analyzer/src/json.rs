use metrics_analyzer_parser::extractor::{extract_batch, BatchExtraction};
use serde_json::Value;
use tracing::debug;

/// Field holding expressions in Prometheus rule groups.
pub const RULE_EXPRESSION_FIELD: &str = "query";
/// Field holding expressions in Grafana dashboard panels and targets.
pub const DASHBOARD_EXPRESSION_FIELD: &str = "expr";

/// Searches `value` depth-first for object keys equal to `field`, returning the values stored
/// under them in encounter order. Objects and arrays are searched at any depth; a matched
/// value is not searched further.
pub fn find_field_values<'v>(value: &'v Value, field: &str) -> Vec<&'v Value> {
    let mut found = Vec::new();
    walk(value, field, &mut found);
    found
}

fn walk<'v>(value: &'v Value, field: &str, found: &mut Vec<&'v Value>) {
    match value {
        Value::Object(map) => {
            for (key, value) in map {
                if key == field {
                    found.push(value);
                } else {
                    walk(value, field, found);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                walk(item, field, found);
            }
        }
        _ => {}
    }
}

/// Collects every string stored under `field` in `documents`. Matches holding anything other
/// than a string are ignored.
pub fn collect_expressions<'v>(documents: &'v [Value], field: &str) -> Vec<&'v str> {
    documents
        .iter()
        .flat_map(|doc| find_field_values(doc, field))
        .filter_map(|value| match value {
            Value::String(expr) => Some(expr.as_str()),
            other => {
                debug!(field, value = %other, "ignoring non-string expression field");
                None
            }
        })
        .collect()
}

/// Extracts the metric names referenced by all expressions stored under `field`.
pub fn extract_from_documents(documents: &[Value], field: &str) -> BatchExtraction {
    let expressions = collect_expressions(documents, field);
    debug!(field, expressions = expressions.len(), "collected expressions");
    extract_batch(&expressions)
}
