//! Passly Core - Domain library for the loyalty pass builder.
//!
//! This crate provides the types shared by every Passly component:
//! - `builder` - Builder state store, storage backends and saved-pass list
//! - `studio` - JSON API serving the pass wizard
//! - `cli` - Command-line tools for inspecting and editing a workspace
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no storage
//! access, no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Validated newtypes for colors, emails, phones, URLs, amounts and statuses
//! - [`draft`] - The `PassDraft` record with one validated setter per field
//! - [`steps`] - The seven-step wizard sequencer

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod draft;
pub mod steps;
pub mod types;

pub use draft::{
    DraftField, HydrateReport, PassDraft, PassFields, PayloadError, STAMPS_RANGE, ValidationError,
    ValidationErrorBody, ValidationErrorKind,
};
pub use steps::{StepNavigation, WizardStep};
pub use types::*;
