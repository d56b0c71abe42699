use serde::Serialize;
use serde_json::Value;

/// Error returned when rendering fails.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    /// The value could not be converted to JSON.
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Renders any serializable value as stable, compact JSON.
///
/// Object keys are sorted at every depth and whitespace is removed, so equal
/// documents always render to identical text. Numbers keep their shortest
/// round-trip form (`1.5`, `1e-7`), the same text [`crate::display_string`]
/// shows for them.
pub fn render_canonical<T: Serialize + ?Sized>(value: &T) -> Result<String, RenderError> {
    let value = sort_keys(serde_json::to_value(value)?);
    Ok(serde_json::to_string(&value)?)
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, sort_keys(value)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
