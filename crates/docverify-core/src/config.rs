use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use docverify_canonical::{
    keys, DisplayType, FieldDefinition, NormalizerOptions, RawDocument, StatusResolver,
    ValidityResolver,
};
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::messages::VerificationMessages;

/// Query parameter carrying the identifier when none is configured.
pub const DEFAULT_DOCUMENT_ID_PARAM: &str = "document_id";

const DEFAULT_TIMEOUT_MS: u64 = 10_000;

fn default_document_id_param() -> String {
    DEFAULT_DOCUMENT_ID_PARAM.to_string()
}
fn default_id_field() -> String {
    keys::ID.to_string()
}
fn default_issued_to_field() -> String {
    keys::ISSUED_TO.to_string()
}
fn default_title_field() -> String {
    keys::TITLE.to_string()
}
fn default_issue_date_field() -> String {
    keys::ISSUE_DATE.to_string()
}
fn default_validity_field() -> String {
    keys::IS_VALID.to_string()
}
fn default_display_field() -> String {
    keys::DISPLAY_URL.to_string()
}
fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Configuration for a [`Verifier`](crate::Verifier).
///
/// Loadable from a camelCase JSON file; status/validity resolvers can only
/// be attached in code.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationConfig {
    /// Endpoint the identifier is appended to.
    pub verification_endpoint: String,
    /// Query parameter name for the identifier.
    #[serde(default = "default_document_id_param")]
    pub document_id_param: String,
    /// Raw key holding the identifier.
    #[serde(default = "default_id_field")]
    pub id_field: String,
    /// Raw key holding the document holder.
    #[serde(default = "default_issued_to_field")]
    pub issued_to_field: String,
    /// Raw key holding the title.
    #[serde(default = "default_title_field")]
    pub title_field: String,
    /// Raw key holding the issue date.
    #[serde(default = "default_issue_date_field")]
    pub issue_date_field: String,
    /// Raw key holding a status string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_field: Option<String>,
    /// Raw key holding the validity flag.
    #[serde(default = "default_validity_field")]
    pub validity_field: String,
    /// Raw key holding the display rendition URL.
    #[serde(default = "default_display_field")]
    pub display_field: String,
    /// Forces the canonical `displayType`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_type: Option<DisplayType>,
    /// Field overrides merged onto the base schema.
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    /// User-facing messages.
    #[serde(default)]
    pub messages: VerificationMessages,
    /// Transport timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Status override.
    #[serde(skip)]
    pub status_resolver: Option<StatusResolver>,
    /// Validity override.
    #[serde(skip)]
    pub validity_resolver: Option<ValidityResolver>,
}

impl VerificationConfig {
    /// Creates a configuration with defaults for everything but the endpoint.
    pub fn new(verification_endpoint: impl Into<String>) -> Self {
        Self {
            verification_endpoint: verification_endpoint.into(),
            document_id_param: default_document_id_param(),
            id_field: default_id_field(),
            issued_to_field: default_issued_to_field(),
            title_field: default_title_field(),
            issue_date_field: default_issue_date_field(),
            status_field: None,
            validity_field: default_validity_field(),
            display_field: default_display_field(),
            display_type: None,
            fields: Vec::new(),
            messages: VerificationMessages::default(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            status_resolver: None,
            validity_resolver: None,
        }
    }

    /// Parses a configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Loads a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it does not match the schema.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Checks the configuration is usable for verification.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.verification_endpoint.trim().is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }
        Ok(())
    }

    /// Effective query parameter name; blank falls back to the default.
    pub fn document_id_param(&self) -> &str {
        if self.document_id_param.is_empty() {
            DEFAULT_DOCUMENT_ID_PARAM
        } else {
            &self.document_id_param
        }
    }

    /// Transport timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Replaces the field overrides.
    pub fn with_fields(mut self, fields: Vec<FieldDefinition>) -> Self {
        self.fields = fields;
        self
    }

    /// Replaces the messages.
    pub fn with_messages(mut self, messages: VerificationMessages) -> Self {
        self.messages = messages;
        self
    }

    /// Attaches a status resolver.
    pub fn with_status_resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&RawDocument) -> Option<String> + Send + Sync + 'static,
    {
        self.status_resolver = Some(Arc::new(resolver));
        self
    }

    /// Attaches a validity resolver.
    pub fn with_validity_resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&RawDocument) -> Option<bool> + Send + Sync + 'static,
    {
        self.validity_resolver = Some(Arc::new(resolver));
        self
    }

    /// Normalizer options derived from this configuration.
    pub fn normalizer_options(&self) -> NormalizerOptions {
        NormalizerOptions {
            id_field: self.id_field.clone(),
            issued_to_field: self.issued_to_field.clone(),
            title_field: self.title_field.clone(),
            issue_date_field: self.issue_date_field.clone(),
            status_field: self.status_field.clone(),
            validity_field: self.validity_field.clone(),
            display_field: self.display_field.clone(),
            display_type: self.display_type,
            status_resolver: self.status_resolver.clone(),
            validity_resolver: self.validity_resolver.clone(),
        }
    }
}

impl fmt::Debug for VerificationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationConfig")
            .field("verification_endpoint", &self.verification_endpoint)
            .field("document_id_param", &self.document_id_param)
            .field("id_field", &self.id_field)
            .field("status_field", &self.status_field)
            .field("validity_field", &self.validity_field)
            .field("display_field", &self.display_field)
            .field("display_type", &self.display_type)
            .field("fields", &self.fields)
            .field("messages", &self.messages)
            .field("timeout_ms", &self.timeout_ms)
            .field("status_resolver", &self.status_resolver.is_some())
            .field("validity_resolver", &self.validity_resolver.is_some())
            .finish_non_exhaustive()
    }
}
