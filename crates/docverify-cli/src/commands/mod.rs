pub mod normalize;
pub mod schema;
pub mod verify;

use docverify_core::VerificationConfig;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("either --config or --endpoint is required")]
    NoEndpoint,
    #[error("input must be a JSON object")]
    NotAnObject,
}

/// Loads the config file if given, then applies command-line overrides.
///
/// Commands that never contact the endpoint pass `require_endpoint = false`
/// and get a default configuration when no file is given.
pub fn load_config(
    path: Option<&str>,
    endpoint: Option<String>,
    id_param: Option<String>,
    require_endpoint: bool,
) -> Result<VerificationConfig, Box<dyn std::error::Error>> {
    let mut config = match (path, endpoint.as_deref()) {
        (Some(path), _) => VerificationConfig::from_file(path)?,
        (None, Some(endpoint)) => VerificationConfig::new(endpoint),
        (None, None) if require_endpoint => return Err(CliError::NoEndpoint.into()),
        (None, None) => VerificationConfig::new(""),
    };

    if let Some(endpoint) = endpoint {
        config.verification_endpoint = endpoint;
    }
    if let Some(id_param) = id_param {
        config.document_id_param = id_param;
    }
    tracing::debug!(
        endpoint = %config.verification_endpoint,
        id_param = config.document_id_param(),
        extra_fields = config.fields.len(),
        "configuration loaded"
    );
    Ok(config)
}
