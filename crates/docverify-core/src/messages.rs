use serde::{Deserialize, Serialize};

use crate::errors::VerificationErrorKind;

/// Default prompt shown above the identifier input.
pub const DEFAULT_DESCRIPTION: &str = "Enter the document ID to verify its authenticity.";
/// Default message when no identifier was supplied.
pub const DEFAULT_REQUIRED_ID_ERROR: &str = "Document ID is required";
/// Default message when the endpoint rejects the document.
pub const DEFAULT_VERIFICATION_FAILED_ERROR: &str = "Failed to verify document";
/// Default message for transport or unexpected failures.
pub const DEFAULT_GENERAL_ERROR: &str = "An error occurred while verifying the document";
/// Message for a verifier created without configuration.
pub const DEFAULT_MISSING_CONFIG_ERROR: &str = "Document verification is not configured";

/// User-facing messages. Unset entries fall back to the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMessages {
    /// Prompt shown above the identifier input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Shown when no identifier was supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_id_error: Option<String>,
    /// Shown when the endpoint rejects the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_failed_error: Option<String>,
    /// Shown on 404; falls back to `verification_failed_error`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_found_error: Option<String>,
    /// Shown on transport or unexpected failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general_error: Option<String>,
}

impl VerificationMessages {
    /// Prompt text.
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or(DEFAULT_DESCRIPTION)
    }

    /// Missing-identifier text.
    pub fn required_id_error(&self) -> &str {
        self.required_id_error
            .as_deref()
            .unwrap_or(DEFAULT_REQUIRED_ID_ERROR)
    }

    /// Rejected-document text.
    pub fn verification_failed_error(&self) -> &str {
        self.verification_failed_error
            .as_deref()
            .unwrap_or(DEFAULT_VERIFICATION_FAILED_ERROR)
    }

    /// Not-found text.
    pub fn not_found_error(&self) -> &str {
        self.not_found_error
            .as_deref()
            .unwrap_or_else(|| self.verification_failed_error())
    }

    /// Transport/unexpected failure text.
    pub fn general_error(&self) -> &str {
        self.general_error.as_deref().unwrap_or(DEFAULT_GENERAL_ERROR)
    }

    /// Message published for a failure classification.
    pub fn for_kind(&self, kind: VerificationErrorKind) -> &str {
        match kind {
            VerificationErrorKind::MissingIdentifier => self.required_id_error(),
            VerificationErrorKind::NotFound => self.not_found_error(),
            VerificationErrorKind::VerificationFailed => self.verification_failed_error(),
            VerificationErrorKind::Network | VerificationErrorKind::Unknown => {
                self.general_error()
            }
        }
    }
}
