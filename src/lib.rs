//! structveil: a source-to-source struct obfuscator.
//!
//! Parses Rust source with `syn`, discovers every named-field struct
//! declaration, assigns the type and each of its fields a fresh opaque
//! identifier, and rewrites every syntactic occurrence of those names so the
//! program stays structurally valid. Printing is delegated to `prettyplease`.
//!
//! The pipeline has three passes:
//! - **catalog**: one read-only walk collecting a [`RecordDescriptor`] per
//!   struct declaration, in declaration order
//! - **namegen**: a run-scoped generator of fixed-length opaque identifiers
//! - **propagate**: one full rewrite walk per record, in discovery order
//!
//! [`api::obfuscate_source`] packages the whole pipeline for callers that
//! just want text in, text out.

pub mod api;
pub mod catalog;
pub mod namegen;
pub mod propagate;
pub mod report;

pub use api::{obfuscate_file, obfuscate_path, obfuscate_source, ObfuscateError, ObfuscateOptions};
pub use catalog::{discover_records, FieldDescriptor, RecordDescriptor};
pub use namegen::NameGenerator;
pub use propagate::Propagator;
pub use report::RenameReport;
