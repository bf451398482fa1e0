//! High-level driver surface for whole-file obfuscation.
//!
//! Callers hand in source text or an already-parsed `syn::File`; the driver
//! runs discovery, then one propagation pass per discovered record in
//! discovery order, and returns the rename report alongside the rewritten
//! tree or text.

use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::catalog::discover_records;
use crate::namegen::NameGenerator;
use crate::propagate::Propagator;
use crate::report::RenameReport;

/// Errors surfaced by the obfuscation driver.
#[derive(Debug, Error)]
pub enum ObfuscateError {
    /// Source text failed to parse; nothing can run without a tree.
    #[error("failed to parse source: {0}")]
    Parse(#[from] syn::Error),
    /// Source file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Options for one obfuscation run.
#[derive(Debug, Clone)]
pub struct ObfuscateOptions {
    /// Generated identifier length.
    pub name_length: usize,
    /// Seed for reproducible runs; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for ObfuscateOptions {
    fn default() -> Self {
        Self {
            name_length: NameGenerator::DEFAULT_LENGTH,
            seed: None,
        }
    }
}

impl ObfuscateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the generated identifier length.
    pub fn name_length(mut self, length: usize) -> Self {
        self.name_length = length;
        self
    }

    /// Seed the name generator for reproducible output.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn generator(&self) -> NameGenerator {
        match self.seed {
            Some(seed) => NameGenerator::with_seed(seed, self.name_length),
            None => NameGenerator::new(self.name_length),
        }
    }
}

/// Obfuscate a parsed file in place and return the rename report.
///
/// Discovery completes before any propagation begins; propagation passes run
/// strictly sequentially in discovery order, each mutating the shared tree.
pub fn obfuscate_file(file: &mut syn::File, options: &ObfuscateOptions) -> RenameReport {
    let mut names = options.generator();
    let mut records = discover_records(file);
    debug!(count = records.len(), "discovered record declarations");
    for record in &mut records {
        Propagator::new(record, &mut names).run(file);
    }
    RenameReport::new(records)
}

/// Parse, obfuscate, and reprint source text.
pub fn obfuscate_source(
    source: &str,
    options: &ObfuscateOptions,
) -> Result<(String, RenameReport), ObfuscateError> {
    let mut file = syn::parse_file(source)?;
    let report = obfuscate_file(&mut file, options);
    Ok((prettyplease::unparse(&file), report))
}

/// Read, obfuscate, and reprint a source file without writing it back.
pub fn obfuscate_path(
    path: &Path,
    options: &ObfuscateOptions,
) -> Result<(String, RenameReport), ObfuscateError> {
    let source = std::fs::read_to_string(path)?;
    obfuscate_source(&source, options)
}
