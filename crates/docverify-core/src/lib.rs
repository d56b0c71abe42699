//! Verification orchestration for docverify.
//!
//! This crate provides:
//! - `VerificationConfig`, loaded from JSON or built in code
//! - Caller-configurable user-facing messages with built-in fallbacks
//! - The `Transport` seam and a blocking HTTP implementation
//! - `Verifier`, the state machine that fetches, normalizes and publishes
//!
//! Core invariants:
//! - An empty identifier never reaches the transport
//! - Document and fields are published together or not at all
//! - Verification failures become a message in the published state; only
//!   configuration errors are returned to the caller
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docverify_core::{HttpTransport, VerificationConfig, Verifier};
//!
//! let config = VerificationConfig::new("https://verify.example.test/api/documents");
//! let transport = HttpTransport::new(config.timeout())?;
//! let mut verifier = Verifier::new(Some(config), transport)?;
//!
//! verifier.set_document_id("DOC-123456");
//! let state = verifier.verify();
//! match &state.error {
//!     Some(message) => eprintln!("{}", message),
//!     None => {
//!         for field in &state.fields {
//!             println!("{} {}", field.label, field.value);
//!         }
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![deny(missing_docs)]

/// Verification configuration.
pub mod config;
/// Error types for configuration and verification.
pub mod errors;
/// User-facing messages and their defaults.
pub mod messages;
/// Verification request URL construction.
pub mod request;
/// HTTP transport seam.
pub mod transport;
/// Verification state machine.
pub mod verifier;

pub use config::{VerificationConfig, DEFAULT_DOCUMENT_ID_PARAM};
pub use errors::{ConfigError, VerificationError, VerificationErrorKind};
pub use messages::VerificationMessages;
pub use request::{build_verification_url, encode_uri_component};
pub use transport::{HttpResponse, HttpTransport, Transport, TransportError};
pub use verifier::{Phase, StateObserver, VerificationState, Verifier};
