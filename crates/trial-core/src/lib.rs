//! # trial-core
//!
//! Core types, ID prefixes, and error types for clinical trial ingestion.
//!
//! This crate provides the foundational types shared across all trial crates:
//! - The `TrialRecord` entity and its `TrialStatus` enum
//! - The `TrialCreated` notification published after a successful commit
//! - Date parsing for the accepted submission date forms
//! - Record ID generation (`trl-` plus random hex)
//! - Cross-cutting error types

pub mod dates;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod events;
pub mod ids;
