//! # trial-schema
//!
//! JSON Schema definitions and validation for clinical trial documents.
//!
//! This crate provides:
//! - `SchemaKind`: the rulesets a document can be checked against
//! - `SchemaValidator`: lazily compiles and caches each kind, and reports
//!   violations as `<RuleTag>: #/<field>` messages
//! - Schema export for external tooling (`trials schema`)
//!
//! ## Architecture
//!
//! The upload schema is an embedded JSON file; record and event schemas are
//! generated from `trial-core` types with `#[derive(JsonSchema)]`.

pub mod error;
pub mod kind;
mod messages;
pub mod validator;

pub use error::SchemaError;
pub use kind::SchemaKind;
pub use messages::TRIAL_DATE_FORMAT;
pub use validator::{SchemaValidator, ValidationReport};
