//! Schema command implementation.

use docverify_canonical::{base_field_definitions, merge_fields};

pub fn run(config: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config.as_deref(), None, None, false)?;

    let base = base_field_definitions();
    let merged = merge_fields(&base, &config.fields);

    println!("{:<28} {:<20} {}", "LABEL", "KEY", "TYPE");
    println!("{}", "-".repeat(60));
    for field in merged.iter() {
        println!(
            "{:<28} {:<20} {}",
            field.label,
            field.key.as_deref().unwrap_or("-"),
            field.resolved_type().as_str()
        );
    }
    Ok(())
}
