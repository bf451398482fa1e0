//! Serializable rename report emitted after a run.

use serde::Serialize;

use crate::catalog::RecordDescriptor;

pub const REPORT_VERSION: i64 = 1;

/// Every original → opaque assignment made during one obfuscation run, in
/// discovery order. Callers persist this to be able to map obfuscated
/// identifiers back.
#[derive(Serialize)]
pub struct RenameReport {
    pub version: i64,
    pub records: Vec<RecordDescriptor>,
}

impl RenameReport {
    pub fn new(records: Vec<RecordDescriptor>) -> Self {
        Self {
            version: REPORT_VERSION,
            records,
        }
    }
}
