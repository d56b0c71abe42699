use std::borrow::Cow;
use std::collections::HashMap;

use crate::fields::FieldDefinition;

/// Merges caller overrides onto a base schema.
///
/// Overrides replace the base entry with the same identity in place, so the
/// base order survives. Overrides that match no base entry are appended in
/// their original relative order. When two overrides share an identity the
/// later one wins but keeps the earlier one's position.
///
/// An empty override list returns the base schema borrowed and untouched.
pub fn merge_fields<'a>(
    base: &'a [FieldDefinition],
    overrides: &[FieldDefinition],
) -> Cow<'a, [FieldDefinition]> {
    if overrides.is_empty() {
        return Cow::Borrowed(base);
    }

    let mut pending: Vec<Option<FieldDefinition>> = Vec::with_capacity(overrides.len());
    let mut positions: HashMap<&str, usize> = HashMap::with_capacity(overrides.len());
    for field in overrides {
        match positions.get(field.identity()) {
            Some(&index) => pending[index] = Some(field.clone()),
            None => {
                positions.insert(field.identity(), pending.len());
                pending.push(Some(field.clone()));
            }
        }
    }

    let mut merged = Vec::with_capacity(base.len() + pending.len());
    for base_field in base {
        // Each override is consumed by the first base entry it matches.
        let replacement = positions
            .get(base_field.identity())
            .and_then(|&index| pending[index].take());
        merged.push(replacement.unwrap_or_else(|| base_field.clone()));
    }
    merged.extend(pending.into_iter().flatten());

    Cow::Owned(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{base_field_definitions, FieldType};

    fn field(label: &str, key: Option<&str>) -> FieldDefinition {
        let def = FieldDefinition::new(label);
        match key {
            Some(key) => def.with_key(key),
            None => def,
        }
    }

    fn identities(fields: &[FieldDefinition]) -> Vec<&str> {
        fields.iter().map(FieldDefinition::identity).collect()
    }

    #[test]
    fn empty_overrides_borrow_base() {
        let base = base_field_definitions();
        let merged = merge_fields(&base, &[]);
        assert!(matches!(merged, Cow::Borrowed(_)));
        assert_eq!(merged.as_ref(), base.as_slice());
    }

    #[test]
    fn override_keeps_base_position_and_extensions_append() {
        let base = vec![field("A", Some("a")), field("B", Some("b")), field("C", Some("c"))];
        let overrides = vec![
            field("B prime", Some("b")).with_type(FieldType::Status),
            field("D", Some("d")),
        ];

        let merged = merge_fields(&base, &overrides);

        assert_eq!(identities(&merged), vec!["a", "b", "c", "d"]);
        assert_eq!(merged[1].label, "B prime");
        assert_eq!(merged[1].resolved_type(), FieldType::Status);
    }

    #[test]
    fn label_is_identity_when_key_missing() {
        let base = vec![field("Issuer", None), field("Course", Some("course"))];
        let overrides = vec![field("Issuer", None).with_type(FieldType::Date)];

        let merged = merge_fields(&base, &overrides);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].resolved_type(), FieldType::Date);
    }

    #[test]
    fn duplicate_override_identity_last_wins_first_position() {
        let base = vec![field("A", Some("a"))];
        let overrides = vec![
            field("X1", Some("x")),
            field("Y", Some("y")),
            field("X2", Some("x")),
        ];

        let merged = merge_fields(&base, &overrides);

        assert_eq!(identities(&merged), vec!["a", "x", "y"]);
        assert_eq!(merged[1].label, "X2");
    }

    #[test]
    fn merge_is_idempotent() {
        let base = base_field_definitions();
        let overrides = vec![
            field("Programme:", Some("title")),
            field("Issued By:", Some("issuer")),
        ];

        let first = merge_fields(&base, &overrides).into_owned();
        let second = merge_fields(&base, &overrides).into_owned();

        assert_eq!(first, second);
        assert_eq!(
            identities(&first),
            vec!["id", "issuedTo", "title", "issueDate", "status", "issuer"]
        );
    }
}
