use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::coercion::{read_boolean_flag, read_string, validity_label, FlagResolverFn};
use crate::document::{keys, CanonicalDocument, DisplayType, RawDocument};

/// Derives a status string from the raw record.
pub type StatusResolver = Arc<dyn Fn(&RawDocument) -> Option<String> + Send + Sync>;

/// Derives validity from the raw record; `None` defers to the validity key.
pub type ValidityResolver = Arc<FlagResolverFn>;

/// Which raw keys feed the well-known canonical keys.
#[derive(Clone)]
pub struct NormalizerOptions {
    /// Raw key holding the identifier.
    pub id_field: String,
    /// Raw key holding the document holder.
    pub issued_to_field: String,
    /// Raw key holding the title.
    pub title_field: String,
    /// Raw key holding the issue date.
    pub issue_date_field: String,
    /// Raw key holding a status string; no default.
    pub status_field: Option<String>,
    /// Raw key holding the validity flag.
    pub validity_field: String,
    /// Raw key holding the display rendition URL.
    pub display_field: String,
    /// Forces `displayType` regardless of the record.
    pub display_type: Option<DisplayType>,
    /// Status override; a non-empty result wins over `status_field`.
    pub status_resolver: Option<StatusResolver>,
    /// Validity override; a `Some` result wins over `validity_field`.
    pub validity_resolver: Option<ValidityResolver>,
}

impl Default for NormalizerOptions {
    fn default() -> Self {
        Self {
            id_field: keys::ID.to_string(),
            issued_to_field: keys::ISSUED_TO.to_string(),
            title_field: keys::TITLE.to_string(),
            issue_date_field: keys::ISSUE_DATE.to_string(),
            status_field: None,
            validity_field: keys::IS_VALID.to_string(),
            display_field: keys::DISPLAY_URL.to_string(),
            display_type: None,
            status_resolver: None,
            validity_resolver: None,
        }
    }
}

impl fmt::Debug for NormalizerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NormalizerOptions")
            .field("id_field", &self.id_field)
            .field("issued_to_field", &self.issued_to_field)
            .field("title_field", &self.title_field)
            .field("issue_date_field", &self.issue_date_field)
            .field("status_field", &self.status_field)
            .field("validity_field", &self.validity_field)
            .field("display_field", &self.display_field)
            .field("display_type", &self.display_type)
            .field("status_resolver", &self.status_resolver.is_some())
            .field("validity_resolver", &self.validity_resolver.is_some())
            .finish()
    }
}

/// Normalizes a raw record into a canonical document.
///
/// The canonical document starts as a shallow copy of `raw`; the well-known
/// keys are then rewritten:
///
/// - `id` is always set (empty string when missing)
/// - `issuedTo` is always set, `null` when blank
/// - `title` and `issueDate` are set when the key is present, else removed
/// - `status` comes from the resolver, then `status_field`, then is derived
///   from validity as `Valid`/`Invalid`; removed when still empty
/// - `isValid` is set only when a boolean was determined
/// - `displayUrl` is set only when non-empty
/// - `displayType` is the forced type, else the record's own value when it is
///   exactly `image` or `pdf`, else removed
pub fn normalize(raw: &RawDocument, options: &NormalizerOptions) -> CanonicalDocument {
    let id = read_string(raw, Some(&options.id_field), Some("")).unwrap_or_default();
    let issued_to = read_string(raw, Some(&options.issued_to_field), Some("")).unwrap_or_default();
    let title = read_string(raw, Some(&options.title_field), None);
    let issue_date = read_string(raw, Some(&options.issue_date_field), None);
    let display_url =
        read_string(raw, Some(&options.display_field), Some("")).unwrap_or_default();

    let mut status = options
        .status_resolver
        .as_ref()
        .and_then(|resolve| resolve(raw))
        .filter(|s| !s.is_empty());
    if status.is_none() {
        status = read_string(raw, options.status_field.as_deref(), None).filter(|s| !s.is_empty());
    }

    let is_valid = read_boolean_flag(
        raw,
        Some(&options.validity_field),
        options.validity_resolver.as_deref(),
    );

    if status.is_none() {
        status = is_valid.map(|valid| validity_label(valid).to_string());
    }

    let mut canonical = raw.clone();
    canonical.insert(keys::ID.to_string(), Value::String(id));
    canonical.insert(
        keys::ISSUED_TO.to_string(),
        if issued_to.is_empty() {
            Value::Null
        } else {
            Value::String(issued_to)
        },
    );

    let assignments = [
        (keys::TITLE, title.map(Value::String)),
        (keys::ISSUE_DATE, issue_date.map(Value::String)),
        (keys::STATUS, status.map(Value::String)),
        (keys::IS_VALID, is_valid.map(Value::Bool)),
        (
            keys::DISPLAY_URL,
            Some(display_url)
                .filter(|url| !url.is_empty())
                .map(Value::String),
        ),
    ];
    for (key, value) in assignments {
        match value {
            Some(value) => {
                canonical.insert(key.to_string(), value);
            }
            None => {
                canonical.remove(key);
            }
        }
    }

    match options.display_type {
        Some(forced) => {
            canonical.insert(
                keys::DISPLAY_TYPE.to_string(),
                Value::String(forced.as_str().to_string()),
            );
        }
        None => {
            let recognised = canonical
                .get(keys::DISPLAY_TYPE)
                .and_then(Value::as_str)
                .and_then(DisplayType::parse)
                .is_some();
            if !recognised {
                canonical.remove(keys::DISPLAY_TYPE);
            }
        }
    }

    let document = CanonicalDocument::from_map(canonical);
    tracing::debug!(
        document_id = %document.id(),
        is_valid = ?document.is_valid(),
        passthrough = document
            .as_map()
            .keys()
            .filter(|key| !keys::ALL.contains(&key.as_str()))
            .count(),
        "normalized document"
    );
    document
}
