//! Validation records derived from an OpenAPI document.
//!
//! Layout:
//! - `rules.rs`: primitive type name -> `FieldKind` table and per-field rules
//! - `model.rs`: `RecordModel`, one per schema component
//! - `document.rs`: fetching the document and resolving endpoint bodies

pub mod document;
pub mod model;
pub mod rules;

pub use document::SchemaDocument;
pub use model::RecordModel;
pub use rules::{FieldKind, FieldRule, PRIMITIVE_KINDS};
