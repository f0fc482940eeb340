use crate::core::document::GameDocument;
use schemars::schema_for;
use serde_json::{Map, Value, json};

const MAX_DEPTH: usize = 20;

/// JSON Schema of [`GameDocument`] with every `$ref` inlined, so consumers
/// don't have to resolve definitions themselves.
pub fn document_schema() -> serde_json::Result<Value> {
    let mut root = serde_json::to_value(schema_for!(GameDocument))?;

    let definitions = root
        .get("definitions")
        .or_else(|| root.get("$defs"))
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    inline_refs(&mut root, &definitions, 0);

    if let Value::Object(map) = &mut root {
        for key in ["$schema", "definitions", "$defs", "$id"] {
            map.remove(key);
        }
    }
    Ok(root)
}

fn inline_refs(node: &mut Value, definitions: &Map<String, Value>, depth: usize) {
    if depth > MAX_DEPTH {
        *node = json!({ "type": "object" });
        return;
    }

    let target = node
        .get("$ref")
        .and_then(Value::as_str)
        .and_then(|r| r.rsplit('/').next())
        .map(str::to_string);
    if let Some(name) = target {
        *node = definitions
            .get(&name)
            .cloned()
            .unwrap_or_else(|| json!({ "type": "object", "description": "Unresolvable reference" }));
        return inline_refs(node, definitions, depth + 1);
    }

    match node {
        Value::Object(map) => {
            for child in map.values_mut() {
                inline_refs(child, definitions, depth + 1);
            }
        }
        Value::Array(items) => {
            for child in items {
                inline_refs(child, definitions, depth + 1);
            }
        }
        _ => {}
    }
}
