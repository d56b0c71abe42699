use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::{keys, CanonicalDocument, RawDocument};

/// How a field is meant to be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Document identifier.
    Id,
    /// Plain text (the default).
    #[default]
    Text,
    /// Validity status; gets `Valid`/`Invalid` synthesis.
    Status,
    /// Date text.
    Date,
    /// Image reference.
    Image,
    /// PDF reference.
    Pdf,
}

impl FieldType {
    /// Wire name of the field type, as written in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Id => "id",
            FieldType::Text => "text",
            FieldType::Status => "status",
            FieldType::Date => "date",
            FieldType::Image => "image",
            FieldType::Pdf => "pdf",
        }
    }
}

/// Custom value lookup for a field: `(raw, canonical) -> value`.
pub type FieldResolver = Arc<dyn Fn(&RawDocument, &CanonicalDocument) -> Value + Send + Sync>;

/// One entry of a field schema.
///
/// The merge identity is `key` when set, otherwise `label`. A `resolver`
/// always short-circuits the key/label lookup; resolvers cannot be expressed
/// in configuration files and are attached with [`FieldDefinition::with_resolver`].
#[derive(Clone, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Display label; also a fallback lookup key once trailing colons are stripped.
    pub label: String,
    /// Explicit lookup key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Display type; [`FieldType::Text`] when unset.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,
    /// Custom value lookup.
    #[serde(skip)]
    pub resolver: Option<FieldResolver>,
}

impl FieldDefinition {
    /// Creates a text field looked up by its label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            key: None,
            field_type: None,
            resolver: None,
        }
    }

    /// Sets the explicit lookup key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the display type.
    pub fn with_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    /// Attaches a custom value lookup.
    pub fn with_resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&RawDocument, &CanonicalDocument) -> Value + Send + Sync + 'static,
    {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    /// Merge identity: `key` if present, else `label`.
    pub fn identity(&self) -> &str {
        self.key.as_deref().unwrap_or(&self.label)
    }

    /// Effective display type.
    pub fn resolved_type(&self) -> FieldType {
        self.field_type.unwrap_or_default()
    }
}

impl fmt::Debug for FieldDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDefinition")
            .field("label", &self.label)
            .field("key", &self.key)
            .field("field_type", &self.field_type)
            .field("resolver", &self.resolver.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl PartialEq for FieldDefinition {
    fn eq(&self, other: &Self) -> bool {
        let same_resolver = match (&self.resolver, &other.resolver) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };
        self.label == other.label
            && self.key == other.key
            && self.field_type == other.field_type
            && same_resolver
    }
}

/// The built-in schema every override list is merged onto.
pub fn base_field_definitions() -> Vec<FieldDefinition> {
    vec![
        FieldDefinition::new("Document ID:")
            .with_key(keys::ID)
            .with_type(FieldType::Id),
        FieldDefinition::new("Issued To:")
            .with_key(keys::ISSUED_TO)
            .with_type(FieldType::Text),
        FieldDefinition::new("Title:")
            .with_key(keys::TITLE)
            .with_type(FieldType::Text),
        FieldDefinition::new("Issue Date:")
            .with_key(keys::ISSUE_DATE)
            .with_type(FieldType::Date),
        FieldDefinition::new("Status:")
            .with_key(keys::STATUS)
            .with_type(FieldType::Status),
    ]
}

/// A schema entry after value lookup, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedField {
    /// Display label, verbatim from the definition.
    pub label: String,
    /// Explicit lookup key, if the definition had one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Effective display type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Display value; empty when nothing was found.
    pub value: String,
    /// Validity, only on status fields whose document validity is known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_valid: Option<bool>,
}
