//! Record discovery: one read-only pass over a parsed file collecting every
//! named-field struct declaration into rename descriptors.

use serde::Serialize;
use tracing::trace;

/// One field of a discovered record.
#[derive(Debug, Clone, Serialize)]
pub struct FieldDescriptor {
    /// Field name as written in the declaration.
    pub original_name: String,
    /// Literal type token for simple named types; empty when the field's
    /// type is structured (references, arrays, generics) and no single token
    /// names it.
    pub declared_type: String,
    /// Opaque replacement, assigned once per run by the propagation pass.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opaque_name: Option<String>,
}

/// A discovered struct declaration and its rename table.
///
/// `fields` keeps declaration order. Descriptors are mutated in place as
/// opaque names are assigned; no two descriptors share a field.
#[derive(Debug, Clone, Serialize)]
pub struct RecordDescriptor {
    pub original_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opaque_name: Option<String>,
    pub fields: Vec<FieldDescriptor>,
}

impl RecordDescriptor {
    /// Look up a field by its original declared name, scoped to this record
    /// only. Field names are not unique across records.
    pub fn field(&self, original: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.original_name == original)
    }
}

/// Walk the top-level items of `file` and build one descriptor per
/// named-field struct declaration, in declaration order.
///
/// Non-struct type declarations and tuple/unit structs are skipped without
/// error. A name declared twice yields two independent descriptors; the tree
/// is never mutated here.
pub fn discover_records(file: &syn::File) -> Vec<RecordDescriptor> {
    let mut records = Vec::new();
    for item in &file.items {
        let syn::Item::Struct(item_struct) = item else {
            continue;
        };
        let syn::Fields::Named(named) = &item_struct.fields else {
            trace!(name = %item_struct.ident, "struct without named fields skipped");
            continue;
        };
        let fields = named
            .named
            .iter()
            .filter_map(|field| {
                let ident = field.ident.as_ref()?;
                Some(FieldDescriptor {
                    original_name: ident.to_string(),
                    declared_type: simple_type_name(&field.ty).unwrap_or_default(),
                    opaque_name: None,
                })
            })
            .collect();
        records.push(RecordDescriptor {
            original_name: item_struct.ident.to_string(),
            opaque_name: None,
            fields,
        });
    }
    records
}

/// Best-effort resolution of a field's declared type: a bare single-segment
/// path yields its ident, anything structured yields `None`.
pub(crate) fn simple_type_name(ty: &syn::Type) -> Option<String> {
    let syn::Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.qself.is_some() || type_path.path.segments.len() != 1 {
        return None;
    }
    let segment = type_path.path.segments.first()?;
    if !segment.arguments.is_none() {
        return None;
    }
    Some(segment.ident.to_string())
}
