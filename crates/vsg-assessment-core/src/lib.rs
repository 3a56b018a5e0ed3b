//! # VSG Assessment Core Library
//!
//! This library provides the logic behind the VSG Week 1 Assessment: a
//! linear multi-step form whose answers are rendered as a plain-text digest
//! or exported as a paginated PDF. The CLI binary is a thin terminal layer
//! over the same library.
//!
//! ## Architecture
//!
//! - **Catalog**: the fixed, ordered question sections
//! - **Wizard**: a synchronous state machine over section index and the
//!   submitted flag, plus the export busy flag
//! - **Digest**: pure text rendering of a submission
//! - **Document**: layout with pagination, and a PDF writer
//! - **Export**: async job that renders and writes the PDF
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`WizardController`]: Navigation and submission rules
//! - [`AnswerMap`]: Answers keyed by question id
//! - [`render_digest`]: Plain-text digest
//! - [`DocumentRenderer`]: Paginated document layout and PDF bytes
//! - [`Config`]: Application configuration management

pub mod answers;
pub mod catalog;
pub mod digest;
pub mod document;
pub mod error;
pub mod events;
pub mod export;
pub mod storage;
pub mod style;
pub mod wizard;

pub use answers::{AnswerMap, NOT_ANSWERED};
pub use catalog::{Catalog, Question, QuestionKind, Section};
pub use digest::{format_submitted, render_digest};
pub use document::{export_filename, DocumentLayout, DocumentOptions, DocumentRenderer, Paper};
pub use error::{ConfigError, CoreError, ExportError, WizardError};
pub use events::WizardEvent;
pub use export::{export_document, ExportRequest};
pub use storage::Config;
pub use style::{style, FontWeight, Rgb, RoleStyle, StyleRole};
pub use wizard::{SectionStatus, WizardController, WizardState};
