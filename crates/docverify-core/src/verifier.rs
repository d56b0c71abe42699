use std::borrow::Cow;

use docverify_canonical::{
    base_field_definitions, merge_fields, normalize, resolve_fields, CanonicalDocument,
    FieldDefinition, RawDocument, ResolvedField,
};
use serde::Serialize;
use serde_json::Value;

use crate::config::VerificationConfig;
use crate::errors::{ConfigError, VerificationError, VerificationErrorKind};
use crate::request::build_verification_url;
use crate::transport::{Transport, STATUS_NOT_FOUND};

/// Where the current attempt stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// No attempt has run yet.
    #[default]
    Idle,
    /// The endpoint is being queried.
    Loading,
    /// The last attempt produced a document.
    Success,
    /// The last attempt produced an error message.
    Failed,
}

/// Observable state of a [`Verifier`].
///
/// `document` and `fields` are only ever set together, by a successful
/// attempt, and cleared together at the start of every attempt.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationState {
    /// Identifier the next attempt will verify.
    pub document_id: String,
    /// Current phase.
    pub phase: Phase,
    /// True while the endpoint is being queried.
    pub is_loading: bool,
    /// User-facing message of the last failed attempt.
    pub error: Option<String>,
    /// Canonical document of the last successful attempt.
    pub document: Option<CanonicalDocument>,
    /// Resolved fields of the last successful attempt, in schema order.
    pub fields: Vec<ResolvedField>,
    /// Number of attempts started; identifies the attempt a snapshot belongs to.
    pub attempt: u64,
}

/// Receives a snapshot every time the state changes.
pub trait StateObserver {
    /// Called after each state change.
    fn on_change(&self, state: &VerificationState);
}

impl<F: Fn(&VerificationState)> StateObserver for F {
    fn on_change(&self, state: &VerificationState) {
        self(state)
    }
}

/// Drives verification attempts: fetch, normalize, resolve, publish.
///
/// # Example
///
/// ```rust,no_run
/// use docverify_core::{HttpTransport, VerificationConfig, Verifier};
///
/// let config = VerificationConfig::new("https://verify.example.test/api/documents");
/// let transport = HttpTransport::new(config.timeout())?;
/// let mut verifier = Verifier::new(Some(config), transport)?;
/// verifier.subscribe(|state: &docverify_core::VerificationState| {
///     println!("loading={} error={:?}", state.is_loading, state.error);
/// });
/// verifier.set_document_id("DOC-123456");
/// verifier.verify();
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Verifier<T: Transport> {
    config: VerificationConfig,
    transport: T,
    base_fields: Vec<FieldDefinition>,
    state: VerificationState,
    observers: Vec<Box<dyn StateObserver>>,
}

impl<T: Transport> Verifier<T> {
    /// Creates a verifier.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when no configuration is supplied and
    /// [`ConfigError::EmptyEndpoint`] when the endpoint is blank.
    pub fn new(config: Option<VerificationConfig>, transport: T) -> Result<Self, ConfigError> {
        let config = config.ok_or(ConfigError::Missing)?;
        config.validate()?;

        Ok(Self {
            config,
            transport,
            base_fields: base_field_definitions(),
            state: VerificationState::default(),
            observers: Vec::new(),
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &VerificationConfig {
        &self.config
    }

    /// Underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Current state.
    pub fn state(&self) -> &VerificationState {
        &self.state
    }

    /// Identifier the next attempt will verify.
    pub fn document_id(&self) -> &str {
        &self.state.document_id
    }

    /// Sets the identifier for the next attempt.
    pub fn set_document_id(&mut self, value: impl Into<String>) {
        self.state.document_id = value.into();
        self.publish();
    }

    /// Clears the published error message.
    pub fn clear_error(&mut self) {
        if self.state.error.take().is_some() {
            self.publish();
        }
    }

    /// Registers an observer for state changes.
    pub fn subscribe(&mut self, observer: impl StateObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Base schema with the configured overrides merged on.
    ///
    /// Recomputed on every call so configuration changes take effect.
    pub fn field_definitions(&self) -> Cow<'_, [FieldDefinition]> {
        merge_fields(&self.base_fields, &self.config.fields)
    }

    /// Runs one verification attempt and returns the published state.
    ///
    /// Failures never escape: they are classified, turned into the configured
    /// message and published in [`VerificationState::error`].
    pub fn verify(&mut self) -> &VerificationState {
        self.state.attempt += 1;
        self.state.phase = Phase::Loading;
        self.state.is_loading = true;
        self.state.error = None;
        self.state.document = None;
        self.state.fields = Vec::new();
        self.publish();

        let outcome = self
            .fetch_document()
            .map(|raw| self.build_result(&raw));

        match outcome {
            Ok((document, fields)) => {
                tracing::info!(
                    attempt = self.state.attempt,
                    document_id = %document.id(),
                    is_valid = ?document.is_valid(),
                    fields = fields.len(),
                    "document verified"
                );
                self.state.document = Some(document);
                self.state.fields = fields;
                self.state.phase = Phase::Success;
            }
            Err(err) => {
                let attempt = self.state.attempt;
                let cause = std::error::Error::source(&err).map(ToString::to_string);
                match err.kind() {
                    VerificationErrorKind::Network | VerificationErrorKind::Unknown => {
                        tracing::warn!(attempt, kind = ?err.kind(), cause = ?cause, "verification failed");
                    }
                    _ => {
                        tracing::info!(attempt, kind = ?err.kind(), "verification rejected");
                    }
                }
                self.state.error = Some(err.into_message());
                self.state.phase = Phase::Failed;
            }
        }

        self.state.is_loading = false;
        self.publish();
        &self.state
    }

    fn fetch_document(&self) -> Result<RawDocument, VerificationError> {
        let messages = &self.config.messages;
        let fail = |kind: VerificationErrorKind| VerificationError::new(kind, messages.for_kind(kind));

        let document_id = &self.state.document_id;
        if document_id.is_empty() {
            return Err(fail(VerificationErrorKind::MissingIdentifier));
        }

        let url = build_verification_url(
            &self.config.verification_endpoint,
            self.config.document_id_param(),
            document_id,
        );
        tracing::debug!(attempt = self.state.attempt, url = %url, "requesting verification");

        let response = self
            .transport
            .get(&url)
            .map_err(|e| fail(VerificationErrorKind::Network).with_source(e))?;

        if !response.is_success() {
            tracing::debug!(status = response.status, "endpoint rejected document");
            if response.status == STATUS_NOT_FOUND {
                return Err(fail(VerificationErrorKind::NotFound));
            }
            return Err(fail(VerificationErrorKind::VerificationFailed));
        }

        match response.json() {
            Ok(Value::Object(raw)) => Ok(raw),
            Ok(_) => Err(fail(VerificationErrorKind::Unknown)),
            Err(e) => Err(fail(VerificationErrorKind::Unknown).with_source(e)),
        }
    }

    fn build_result(&self, raw: &RawDocument) -> (CanonicalDocument, Vec<ResolvedField>) {
        let document = normalize(raw, &self.config.normalizer_options());
        let definitions = self.field_definitions();
        let fields = resolve_fields(&definitions, raw, &document);
        (document, fields)
    }

    fn publish(&self) {
        for observer in &self.observers {
            observer.on_change(&self.state);
        }
    }
}
