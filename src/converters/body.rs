//! Request body text for samplers

use crate::models::SampleValue;

/// Render a sample value as indented JSON, keeping mapping key order.
///
/// The text is not escaped for markup here; the XML renderer escapes every
/// attribute and text value it writes.
pub fn serialize(value: &SampleValue) -> String {
    render(value, 0)
}

fn render(value: &SampleValue, indent: usize) -> String {
    let indent_str = "  ".repeat(indent);
    let inner_indent = "  ".repeat(indent + 1);

    match value {
        SampleValue::Null => "null".to_string(),
        SampleValue::Bool(b) => b.to_string(),
        SampleValue::Number(n) => n.to_string(),
        SampleValue::String(s) => quote(s),
        SampleValue::Sequence(items) => {
            if items.is_empty() {
                "[]".to_string()
            } else {
                let items: Vec<String> = items
                    .iter()
                    .map(|v| format!("{}{}", inner_indent, render(v, indent + 1)))
                    .collect();
                format!("[\n{}\n{}]", items.join(",\n"), indent_str)
            }
        }
        SampleValue::Mapping(fields) => {
            if fields.is_empty() {
                "{}".to_string()
            } else {
                let items: Vec<String> = fields
                    .iter()
                    .map(|(k, v)| format!("{}{}: {}", inner_indent, quote(k), render(v, indent + 1)))
                    .collect();
                format!("{{\n{}\n{}}}", items.join(",\n"), indent_str)
            }
        }
    }
}

fn quote(s: &str) -> String {
    // serializing a str to JSON cannot fail
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s))
}
