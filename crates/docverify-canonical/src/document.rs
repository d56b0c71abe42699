use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Record returned by a verification endpoint.
///
/// This is an untyped JSON object. It is only ever read; the normalizer
/// derives a [`CanonicalDocument`] from a copy of it.
pub type RawDocument = Map<String, Value>;

/// Well-known keys of a canonical document.
pub mod keys {
    /// Document identifier (always present).
    pub const ID: &str = "id";
    /// Holder of the document (always present, `null` when blank).
    pub const ISSUED_TO: &str = "issuedTo";
    /// Document title.
    pub const TITLE: &str = "title";
    /// Issue date, passed through as text.
    pub const ISSUE_DATE: &str = "issueDate";
    /// Human-readable status.
    pub const STATUS: &str = "status";
    /// Boolean validity.
    pub const IS_VALID: &str = "isValid";
    /// Location of a displayable rendition.
    pub const DISPLAY_URL: &str = "displayUrl";
    /// Kind of displayable rendition (`image` or `pdf`).
    pub const DISPLAY_TYPE: &str = "displayType";

    /// All well-known keys, in canonical order.
    pub const ALL: [&str; 8] = [
        ID,
        ISSUED_TO,
        TITLE,
        ISSUE_DATE,
        STATUS,
        IS_VALID,
        DISPLAY_URL,
        DISPLAY_TYPE,
    ];
}

/// Kind of displayable rendition attached to a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayType {
    /// Raster or vector image.
    Image,
    /// PDF document.
    Pdf,
}

impl DisplayType {
    /// Wire name of the display type.
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayType::Image => "image",
            DisplayType::Pdf => "pdf",
        }
    }

    /// Parses an exact wire name; anything else is rejected.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "image" => Some(DisplayType::Image),
            "pdf" => Some(DisplayType::Pdf),
            _ => None,
        }
    }
}

/// Normalized document: fixed well-known keys plus raw passthrough.
///
/// Only [`normalize`](crate::normalize) builds these, so the key invariants
/// hold for every instance: `id` is always a string, `issuedTo` is always
/// present (string or `null`), and the remaining well-known keys are either
/// set to a determined value or absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CanonicalDocument(Map<String, Value>);

impl CanonicalDocument {
    pub(crate) fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Document identifier; empty when the source had none.
    pub fn id(&self) -> &str {
        self.str_value(keys::ID).unwrap_or("")
    }

    /// Holder of the document, `None` when blank.
    pub fn issued_to(&self) -> Option<&str> {
        self.str_value(keys::ISSUED_TO)
    }

    /// Document title, if determined.
    pub fn title(&self) -> Option<&str> {
        self.str_value(keys::TITLE)
    }

    /// Issue date, if determined.
    pub fn issue_date(&self) -> Option<&str> {
        self.str_value(keys::ISSUE_DATE)
    }

    /// Status text, if determined.
    pub fn status(&self) -> Option<&str> {
        self.str_value(keys::STATUS)
    }

    /// Validity flag, if determined.
    pub fn is_valid(&self) -> Option<bool> {
        self.0.get(keys::IS_VALID).and_then(Value::as_bool)
    }

    /// Display rendition URL, if present.
    pub fn display_url(&self) -> Option<&str> {
        self.str_value(keys::DISPLAY_URL)
    }

    /// Display rendition kind, if present.
    pub fn display_type(&self) -> Option<DisplayType> {
        self.str_value(keys::DISPLAY_TYPE).and_then(DisplayType::parse)
    }

    /// Returns any key, well-known or passthrough.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns true if the key is present (even when `null`).
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Borrows the underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Converts into a JSON value.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    fn str_value(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}
