use crate::coercion::{display_string, validity_label};
use crate::document::{CanonicalDocument, RawDocument};
use crate::fields::{FieldDefinition, FieldType, ResolvedField};

/// Ordered lookup keys for a field: explicit key first, then the label.
///
/// The label is trimmed and stripped of trailing colons (`"Issued To:"`
/// becomes `"Issued To"`). Empty candidates are skipped.
pub fn candidate_keys(definition: &FieldDefinition) -> Vec<&str> {
    let mut candidates = Vec::with_capacity(2);
    if let Some(key) = definition.key.as_deref().filter(|key| !key.is_empty()) {
        candidates.push(key);
    }
    let label = definition
        .label
        .trim_end_matches(|c: char| c == ':' || c.is_whitespace())
        .trim_start();
    if !label.is_empty() {
        candidates.push(label);
    }
    candidates
}

/// Resolves one field against the raw and canonical documents.
///
/// A resolver on the definition short-circuits lookup. Otherwise each
/// candidate key is tried against the canonical document and then the raw
/// record; the first key present wins, even when its value is `null`.
///
/// Status fields with an empty value fall back to `Valid`/`Invalid` when the
/// canonical validity is known, and carry `is_valid` whenever it is.
pub fn resolve_field(
    definition: &FieldDefinition,
    raw: &RawDocument,
    canonical: &CanonicalDocument,
) -> ResolvedField {
    let field_type = definition.resolved_type();

    let mut value = match &definition.resolver {
        Some(resolver) => display_string(&resolver(raw, canonical)),
        None => candidate_keys(definition)
            .into_iter()
            .find_map(|candidate| canonical.get(candidate).or_else(|| raw.get(candidate)))
            .map(display_string)
            .unwrap_or_default(),
    };

    let mut is_valid = None;
    if field_type == FieldType::Status {
        if let Some(validity) = canonical.is_valid() {
            if value.is_empty() {
                value = validity_label(validity).to_string();
            }
            is_valid = Some(validity);
        }
    }

    ResolvedField {
        label: definition.label.clone(),
        key: definition.key.clone(),
        field_type,
        value,
        is_valid,
    }
}

/// Resolves every field in schema order.
pub fn resolve_fields(
    definitions: &[FieldDefinition],
    raw: &RawDocument,
    canonical: &CanonicalDocument,
) -> Vec<ResolvedField> {
    definitions
        .iter()
        .map(|definition| resolve_field(definition, raw, canonical))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::{normalize, NormalizerOptions};
    use serde_json::{json, Value};

    fn record(value: Value) -> RawDocument {
        value.as_object().cloned().unwrap()
    }

    fn canonical_for(raw: &RawDocument) -> CanonicalDocument {
        normalize(raw, &NormalizerOptions::default())
    }

    #[test]
    fn candidates_are_key_then_stripped_label() {
        let def = FieldDefinition::new("  Issued By: ").with_key("issuer");
        assert_eq!(candidate_keys(&def), vec!["issuer", "Issued By"]);

        let def = FieldDefinition::new("Course");
        assert_eq!(candidate_keys(&def), vec!["Course"]);

        let def = FieldDefinition::new(" : ").with_key("");
        assert!(candidate_keys(&def).is_empty());
    }

    #[test]
    fn key_wins_over_label() {
        let raw = record(json!({"id": "D", "course": "Rust", "Course": "ignored"}));
        let def = FieldDefinition::new("Course:").with_key("course");
        let field = resolve_field(&def, &raw, &canonical_for(&raw));
        assert_eq!(field.value, "Rust");
    }

    #[test]
    fn label_used_when_key_missing_from_both_documents() {
        let raw = record(json!({"id": "D", "Course": "Rust"}));
        let def = FieldDefinition::new("Course:").with_key("course");
        let field = resolve_field(&def, &raw, &canonical_for(&raw));
        assert_eq!(field.value, "Rust");
    }

    #[test]
    fn canonical_wins_over_raw() {
        // Raw `isValid` is the string "0"; canonical has the coerced boolean.
        let raw = record(json!({"id": "D", "isValid": "0"}));
        let def = FieldDefinition::new("Valid?").with_key("isValid");
        let field = resolve_field(&def, &raw, &canonical_for(&raw));
        assert_eq!(field.value, "false");
    }

    #[test]
    fn present_null_stops_the_search() {
        let raw = record(json!({"id": "D", "issuedTo": "", "Issued To": "Fallback"}));
        let def = FieldDefinition::new("Issued To:").with_key("issuedTo");
        let field = resolve_field(&def, &raw, &canonical_for(&raw));
        assert_eq!(field.value, "");
    }

    #[test]
    fn resolver_short_circuits_lookup() {
        let raw = record(json!({"id": "D", "score": 91}));
        let def = FieldDefinition::new("Grade")
            .with_key("score")
            .with_resolver(|raw, canonical| {
                let score = raw.get("score").and_then(Value::as_i64).unwrap_or(0);
                json!(format!("{} ({})", if score >= 90 { "A" } else { "B" }, canonical.id()))
            });
        let field = resolve_field(&def, &raw, &canonical_for(&raw));
        assert_eq!(field.value, "A (D)");
    }

    #[test]
    fn status_field_synthesizes_from_validity() {
        let raw = record(json!({"id": "D", "isValid": true}));
        let canonical = canonical_for(&raw);
        let def = FieldDefinition::new("Status:")
            .with_key("custom")
            .with_type(FieldType::Status);

        let field = resolve_field(&def, &raw, &canonical);

        assert_eq!(field.value, "Valid");
        assert_eq!(field.is_valid, Some(true));
    }

    #[test]
    fn status_field_keeps_found_value_but_attaches_validity() {
        let raw = record(json!({"id": "D", "isValid": false, "state": "Expired"}));
        let def = FieldDefinition::new("State")
            .with_key("state")
            .with_type(FieldType::Status);

        let field = resolve_field(&def, &raw, &canonical_for(&raw));

        assert_eq!(field.value, "Expired");
        assert_eq!(field.is_valid, Some(false));
    }

    #[test]
    fn non_status_fields_never_carry_validity() {
        let raw = record(json!({"id": "D", "isValid": true}));
        let def = FieldDefinition::new("Document ID:")
            .with_key("id")
            .with_type(FieldType::Id);

        let field = resolve_field(&def, &raw, &canonical_for(&raw));

        assert_eq!(field.value, "D");
        assert_eq!(field.is_valid, None);
    }

    #[test]
    fn missing_values_render_empty() {
        let raw = record(json!({"id": "D"}));
        let def = FieldDefinition::new("Nothing here").with_key("nope");
        let field = resolve_field(&def, &raw, &canonical_for(&raw));
        assert_eq!(field.value, "");
        assert_eq!(field.field_type, FieldType::Text);
    }
}
