//! Normalize command implementation.

use docverify_canonical::{base_field_definitions, merge_fields, normalize, resolve_fields};
use serde_json::{json, Value};
use std::io::{self, Read};

use super::CliError;
use crate::output;

pub fn run(input: Option<String>, config: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config.as_deref(), None, None, false)?;

    // Read JSON from file or stdin
    let json_str = if let Some(path) = input {
        std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read file {}: {}", path, e))?
    } else {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    };

    let value: Value =
        serde_json::from_str(&json_str).map_err(|e| format!("Invalid JSON: {}", e))?;
    let Value::Object(raw) = value else {
        return Err(CliError::NotAnObject.into());
    };

    let document = normalize(&raw, &config.normalizer_options());
    let base = base_field_definitions();
    let definitions = merge_fields(&base, &config.fields);
    let fields = resolve_fields(&definitions, &raw, &document);

    let report = json!({
        "document": document,
        "fields": fields,
    });
    println!("{}", output::format_json(&report)?);
    Ok(())
}
