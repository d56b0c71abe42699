use docverify_canonical::{
    base_field_definitions, merge_fields, normalize, render_canonical, resolve_fields,
    FieldDefinition, FieldType, NormalizerOptions, RawDocument, ResolvedField,
};
use serde_json::{json, Value};

fn record(value: Value) -> RawDocument {
    value.as_object().cloned().unwrap()
}

#[test]
fn resolved_field_serializes_to_golden_json() {
    let field = ResolvedField {
        label: "Status:".into(),
        key: Some("status".into()),
        field_type: FieldType::Status,
        value: "Valid".into(),
        is_valid: Some(true),
    };

    assert_eq!(
        serde_json::to_string(&field).unwrap(),
        r#"{"label":"Status:","key":"status","type":"status","value":"Valid","isValid":true}"#
    );
}

#[test]
fn resolved_field_omits_absent_optionals() {
    let field = ResolvedField {
        label: "Course".into(),
        key: None,
        field_type: FieldType::Text,
        value: String::new(),
        is_valid: None,
    };

    assert_eq!(
        serde_json::to_value(&field).unwrap(),
        json!({"label": "Course", "type": "text", "value": ""})
    );
}

#[test]
fn field_definition_deserializes_from_config_shape() {
    let defs: Vec<FieldDefinition> = serde_json::from_value(json!([
        { "label": "Supporting File:", "key": "supportingFile", "type": "pdf" },
        { "label": "Issued By:", "key": "issuer" },
        { "label": "Course" }
    ]))
    .unwrap();

    assert_eq!(defs[0].resolved_type(), FieldType::Pdf);
    assert_eq!(defs[1].resolved_type(), FieldType::Text);
    assert_eq!(defs[1].identity(), "issuer");
    assert_eq!(defs[2].identity(), "Course");
    assert!(defs.iter().all(|def| def.resolver.is_none()));
}

#[test]
fn invalid_document_scenario_end_to_end() {
    let raw = record(json!({"id": "DOC-1", "isValid": false}));
    let canonical = normalize(&raw, &NormalizerOptions::default());
    let base = base_field_definitions();
    let fields = resolve_fields(&merge_fields(&base, &[]), &raw, &canonical);

    assert_eq!(
        render_canonical(&canonical).unwrap(),
        r#"{"id":"DOC-1","isValid":false,"issuedTo":null,"status":"Invalid"}"#
    );

    let values: Vec<(&str, &str)> = fields
        .iter()
        .map(|field| (field.label.as_str(), field.value.as_str()))
        .collect();
    assert_eq!(
        values,
        vec![
            ("Document ID:", "DOC-1"),
            ("Issued To:", ""),
            ("Title:", ""),
            ("Issue Date:", ""),
            ("Status:", "Invalid"),
        ]
    );
    assert_eq!(fields[4].is_valid, Some(false));
}

#[test]
fn sample_certificate_with_extended_schema() {
    let raw = record(json!({
        "id": "DOC-123456",
        "recipient": "John Doe",
        "course": "Web Development Fundamentals",
        "issueDate": "2023-01-15",
        "isValid": true,
        "displayUrl": "https://placehold.co/600x400/png?text=Document+CERT-123456",
        "displayType": "image",
        "issuer": "Document Verification Board"
    }));
    let options = NormalizerOptions {
        issued_to_field: "recipient".into(),
        ..NormalizerOptions::default()
    };
    let overrides = vec![
        FieldDefinition::new("Programme:").with_key("course"),
        FieldDefinition::new("Verification Status:")
            .with_key("status")
            .with_type(FieldType::Status),
        FieldDefinition::new("Issued By:").with_key("issuer"),
    ];

    let canonical = normalize(&raw, &options);
    let base = base_field_definitions();
    let schema = merge_fields(&base, &overrides);
    let fields = resolve_fields(&schema, &raw, &canonical);

    let labels: Vec<&str> = fields.iter().map(|f| f.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "Document ID:",
            "Issued To:",
            "Title:",
            "Issue Date:",
            "Verification Status:",
            "Programme:",
            "Issued By:",
        ]
    );
    assert_eq!(fields[1].value, "John Doe");
    assert_eq!(fields[4].value, "Valid");
    assert_eq!(fields[4].is_valid, Some(true));
    assert_eq!(fields[5].value, "Web Development Fundamentals");
    assert_eq!(fields[6].value, "Document Verification Board");
}
