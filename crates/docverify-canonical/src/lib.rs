//! Normalization and field-resolution primitives for verified documents.
//!
//! This crate provides:
//! - Coercion of loosely-typed JSON values into display strings and flags
//! - The canonical document model with its fixed well-known keys
//! - Field schema types and the base/override schema merge
//! - The document normalizer and the per-field value resolver
//! - Stable, key-sorted JSON rendering of canonical output
//!
//! Core invariants:
//! - Raw documents are never mutated; canonical documents are derived copies
//! - `CanonicalDocument::id` is always a string, possibly empty
//! - Key lookup precedence is explicit: field key before label, canonical before raw
//! - Everything here is pure and deterministic; no I/O happens in this crate
//!
#![deny(missing_docs)]

/// Value coercion helpers (strings, flags, lookups).
pub mod coercion;
/// Raw and canonical document types.
pub mod document;
/// Field definitions, field types, and resolved fields.
pub mod fields;
/// Raw document to canonical document normalization.
pub mod normalizer;
/// Stable JSON rendering of canonical output.
pub mod render;
/// Per-field value resolution.
pub mod resolver;
/// Base/override field schema merge.
pub mod schema;

pub use coercion::{
    display_string, lookup, read_boolean_flag, read_string, validity_label,
    FlagResolverFn,
};
pub use document::{keys, CanonicalDocument, DisplayType, RawDocument};
pub use fields::{base_field_definitions, FieldDefinition, FieldResolver, FieldType, ResolvedField};
pub use normalizer::{normalize, NormalizerOptions, StatusResolver, ValidityResolver};
pub use render::{render_canonical, RenderError};
pub use resolver::{candidate_keys, resolve_field, resolve_fields};
pub use schema::merge_fields;
