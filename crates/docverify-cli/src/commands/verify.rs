//! Verify command implementation.

use chrono::{SecondsFormat, Utc};
use docverify_core::{HttpTransport, Verifier};
use serde_json::json;

use crate::output;

pub fn run(
    id: String,
    config: Option<String>,
    endpoint: Option<String>,
    id_param: Option<String>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config.as_deref(), endpoint, id_param, true)?;
    let transport = HttpTransport::new(config.timeout())
        .map_err(|e| format!("Failed to create transport: {}", e))?;
    let mut verifier = Verifier::new(Some(config), transport)?;

    verifier.set_document_id(id);
    let state = verifier.verify();

    if let Some(message) = &state.error {
        eprintln!("{}", message);
        std::process::exit(1);
    }

    let document = state
        .document
        .as_ref()
        .ok_or("verification finished without a document")?;

    if json_output {
        let report = json!({
            "documentId": state.document_id,
            "checkedAt": Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            "document": document,
            "fields": state.fields,
        });
        println!("{}", output::format_json(&report)?);
    } else {
        output::print_table_header();
        for field in &state.fields {
            println!("{}", output::format_field_row(field));
        }
        println!();
        println!("{}", output::format_validity(document.is_valid()));
    }

    Ok(())
}
