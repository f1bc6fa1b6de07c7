//! Response normalization — repairs the model's raw text into the canonical
//! `ResumeAnalysis` shape.
//!
//! `normalize` is total. Every known failure shape of the model (markdown
//! fences, nested grouping, missing fields, list fields returned as strings)
//! is repaired; anything unrepairable falls back to the canonical default
//! with the sentinel. There is no partial-success state.

use serde_json::{Map, Value};
use tracing::warn;

use crate::models::resume::ResumeAnalysis;

/// Alternate top-level grouping the model sometimes produces instead of the
/// flat structure the prompt demands. Merged in this order.
const GROUP_KEYS: [&str; 3] = ["PERSONAL INFORMATION", "SKILLS & EXPERIENCE", "AI ANALYSIS"];

const WORK_EXPERIENCE_KEYS: [&str; 4] = ["company", "position", "duration", "description"];

const EDUCATION_KEYS: [&str; 4] = ["degree", "institution", "year", "gpa"];

const PROJECT_STRING_KEYS: [&str; 2] = ["name", "description"];

/// Fields whose canonical value is a sequence of objects rather than strings.
const OBJECT_LIST_FIELDS: [&str; 3] = ["education", "work_experience", "projects"];

/// Repairs, flattens, and defaults the raw model response. Never fails: any
/// unrepairable input yields `ResumeAnalysis::unavailable()`.
pub fn normalize(raw: &str) -> ResumeAnalysis {
    let raw = raw.trim();
    if raw.is_empty() {
        return ResumeAnalysis::unavailable();
    }

    let text = strip_json_fences(raw);

    let parsed: Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(e) => {
            warn!("Model response is not valid JSON: {e}");
            return ResumeAnalysis::unavailable();
        }
    };

    let Value::Object(mut fields) = parsed else {
        warn!("Model response is JSON but not an object");
        return ResumeAnalysis::unavailable();
    };

    flatten_grouped(&mut fields);
    rebuild_structured_entries(&mut fields);
    coerce_and_fill_defaults(&mut fields);

    match serde_json::from_value(Value::Object(fields)) {
        Ok(analysis) => analysis,
        Err(e) => {
            warn!("Repaired model response still failed to deserialize: {e}");
            ResumeAnalysis::unavailable()
        }
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output. The
/// leading and trailing fences are stripped independently, so a response
/// with only one of them still parses.
fn strip_json_fences(text: &str) -> &str {
    let mut text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        text = stripped.trim_start();
    } else if let Some(stripped) = text.strip_prefix("```") {
        text = stripped.trim_start();
    }
    if let Some(stripped) = text.strip_suffix("```") {
        text = stripped.trim_end();
    }
    text
}

/// Detects the nested grouped layout and rebuilds a flat map from the group
/// contents. The "AI ANALYSIS" group alone does not trigger flattening, but
/// once triggered its contents are merged too. Top-level keys outside the
/// known groups are discarded, matching the flat rebuild.
fn flatten_grouped(fields: &mut Map<String, Value>) {
    if !fields.contains_key("PERSONAL INFORMATION") && !fields.contains_key("SKILLS & EXPERIENCE") {
        return;
    }

    warn!("Model returned nested grouped structure, flattening");
    let mut flat = Map::new();
    for key in GROUP_KEYS {
        if let Some(Value::Object(group)) = fields.remove(key) {
            flat.extend(group);
        }
    }
    *fields = flat;
}

/// Rebuilds the structured-history fields into canonical shape: a non-array
/// becomes an empty list; array entries that are not objects are dropped;
/// surviving entries keep exactly the canonical keys. Scalar values are
/// stringified (the model likes numeric `year`/`gpa`/`duration` values), so
/// one numeric member never costs the rest of the analysis at the final
/// deserialization step. Absent fields are left for the default fill step.
fn rebuild_structured_entries(fields: &mut Map<String, Value>) {
    rebuild_entries(fields, "work_experience", &WORK_EXPERIENCE_KEYS, &[]);
    rebuild_entries(fields, "education", &EDUCATION_KEYS, &[]);
    rebuild_entries(
        fields,
        "projects",
        &PROJECT_STRING_KEYS,
        &["technologies_used"],
    );
}

fn rebuild_entries(
    fields: &mut Map<String, Value>,
    field: &str,
    string_keys: &[&str],
    string_list_keys: &[&str],
) {
    let rebuilt = match fields.get(field) {
        None => return,
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|entry| entry.as_object())
            .map(|entry| {
                let mut canonical = Map::new();
                for &key in string_keys {
                    canonical.insert(key.to_string(), canonical_string(entry.get(key)));
                }
                for &key in string_list_keys {
                    canonical.insert(key.to_string(), canonical_string_list(entry.get(key)));
                }
                Value::Object(canonical)
            })
            .collect(),
        Some(_) => Vec::new(),
    };
    fields.insert(field.to_string(), Value::Array(rebuilt));
}

/// Coerces one entry member to a string: strings pass through, numbers and
/// bools are stringified, anything else (missing, null, nested containers)
/// becomes the empty string.
fn canonical_string(value: Option<&Value>) -> Value {
    let s = match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    };
    Value::String(s)
}

/// Coerces one entry member to a list of strings, stringifying numeric
/// elements and dropping the rest.
fn canonical_string_list(value: Option<&Value>) -> Value {
    let items = match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(Value::String(s.clone())),
                Value::Number(n) => Some(Value::String(n.to_string())),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    Value::Array(items)
}

/// Guarantees total schema coverage: every canonical field is present with a
/// value of the right container kind. Absent fields get the canonical
/// default; present fields of the wrong kind are replaced by it; list fields
/// drop elements of the wrong kind.
fn coerce_and_fill_defaults(fields: &mut Map<String, Value>) {
    let Ok(Value::Object(defaults)) = serde_json::to_value(ResumeAnalysis::default()) else {
        // serde_json::to_value of a plain struct cannot fail
        return;
    };

    for (key, default_value) in defaults {
        match (fields.get_mut(&key), &default_value) {
            (Some(Value::String(_)), Value::String(_)) => {}
            (Some(Value::Array(items)), Value::Array(_)) => {
                if OBJECT_LIST_FIELDS.contains(&key.as_str()) {
                    items.retain(|item| item.is_object());
                } else {
                    items.retain(|item| item.is_string());
                }
            }
            (Some(wrong_kind), _) => {
                warn!("Field {key} has wrong kind, replacing with default");
                *wrong_kind = default_value;
            }
            (None, _) => {
                fields.insert(key, default_value);
            }
        }
    }
}
