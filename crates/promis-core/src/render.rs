//! Human-readable text renderers for API responses.
//!
//! The Assessment Center returns loosely-typed JSON; these renderers
//! walk the raw `serde_json::Value` and build the `--format text`
//! output. Missing or empty fields fall back to placeholder labels
//! rather than erroring.

use serde_json::Value;

use crate::score::AssessmentMetrics;

/// Render the `Forms/.json` response as a numbered list.
pub fn render_form_list(data: &Value) -> String {
    let forms = match data.get("Form").and_then(Value::as_array) {
        Some(forms) if !forms.is_empty() => forms,
        _ => return "No forms returned.\n".to_string(),
    };

    let mut out = String::new();
    for (idx, form) in forms.iter().enumerate() {
        let name = string_field(form, "Name")
            .or_else(|| string_field(form, "Title"))
            .unwrap_or("Untitled Form");
        let oid = string_field(form, "OID").unwrap_or("N/A");
        let population = string_field(form, "Population").unwrap_or("Unknown population");
        out.push_str(&format!(
            "{}. {name} (OID: {oid}, Population: {population})\n",
            idx + 1
        ));
        if let Some(description) = string_field(form, "Description") {
            out.push_str(&format!("   Description: {description}\n"));
        }
        if let Some(keywords) = keywords_field(form) {
            out.push_str(&format!("   Keywords: {keywords}\n"));
        }
    }
    out
}

/// Render the `Forms/{OID}.json` response: header, then every item
/// with its prompts and response options.
pub fn render_form_details(data: &Value) -> String {
    let title = string_field(data, "Name")
        .or_else(|| string_field(data, "Title"))
        .unwrap_or("Untitled Form");
    let oid = string_field(data, "OID").unwrap_or("Unknown OID");

    let mut out = String::new();
    out.push_str(&format!("Form: {title}\n"));
    out.push_str(&format!("OID: {oid}\n"));
    if let Some(population) = string_field(data, "Population") {
        out.push_str(&format!("Population: {population}\n"));
    }
    if let Some(description) = string_field(data, "Description") {
        out.push_str(&format!("Description: {description}\n"));
    }

    let items = items_array(data);
    out.push_str(&format!("\nItems ({} total):\n", items.len()));
    for (idx, item) in items.iter().enumerate() {
        let item_id = string_field(item, "ID").unwrap_or("Unknown ID");
        out.push_str(&format!("\n{}. Item ID: {item_id}\n", idx + 1));
        for element in elements_array(item) {
            if let Some(description) = string_field(element, "Description") {
                out.push_str(&format!("   Prompt: {description}\n"));
            }
            push_options(&mut out, element);
        }
    }
    out
}

/// Render the stateless endpoint response: the current scoring
/// metrics (if any) followed by the next items to administer.
pub fn render_stateless(data: &Value) -> String {
    let mut out = String::new();

    let metrics = AssessmentMetrics::from_response(data);
    if metrics.is_available() {
        out.push_str("Assessment metrics:\n");
        if let Some(theta) = metrics.theta {
            out.push_str(&format!("  Theta: {theta}\n"));
        }
        if let Some(std_error) = metrics.std_error {
            out.push_str(&format!("  Standard Error: {std_error}\n"));
        }
        if let Some(t_score) = metrics.t_score {
            out.push_str(&format!("  T Score: {t_score:.1}\n"));
        }
    } else {
        out.push_str("Assessment metrics not yet available (assessment still running).\n");
    }

    let items = items_array(data);
    if items.is_empty() {
        out.push_str("\nNo items returned. Assessment may be complete.\n");
        return out;
    }

    out.push_str(&format!("\nReturned Items ({}):\n", items.len()));
    for (idx, item) in items.iter().enumerate() {
        let item_id = string_field(item, "ID").unwrap_or("Unknown ID");
        let prompt = elements_array(item)
            .iter()
            .find_map(|element| string_field(element, "Description"))
            .unwrap_or(item_id);
        out.push_str(&format!("{}. {prompt} (Item ID: {item_id})\n", idx + 1));
        for element in elements_array(item) {
            push_options(&mut out, element);
        }
    }
    out
}

/// Non-empty string field lookup; empty strings count as absent.
fn string_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Keywords may be a JSON array or a scalar string.
fn keywords_field(form: &Value) -> Option<String> {
    match form.get("Keywords")? {
        Value::Array(items) => {
            let joined = items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            (!joined.is_empty()).then_some(joined)
        }
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn items_array(data: &Value) -> &[Value] {
    data.get("Items")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn elements_array(item: &Value) -> &[Value] {
    item.get("Elements")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Append an element's `Map` entries as `- (Value) Description` lines.
fn push_options(out: &mut String, element: &Value) {
    let Some(maps) = element.get("Map").and_then(Value::as_array) else {
        return;
    };
    if maps.is_empty() {
        return;
    }
    out.push_str("   Options:\n");
    for option in maps {
        let value = option
            .get("Value")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let label = option
            .get("Description")
            .and_then(Value::as_str)
            .unwrap_or_default();
        out.push_str(&format!("     - ({value}) {label}\n"));
    }
}
