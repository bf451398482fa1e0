//! Occurrence propagation: one full walk of the tree per record, rewriting
//! every syntactic occurrence of the record's type and field names in place.

use quote::ToTokens;
use tracing::{debug, trace};

use crate::catalog::RecordDescriptor;
use crate::namegen::NameGenerator;

/// Rewrites every occurrence of one record throughout a parsed file.
///
/// Construction assigns the record's opaque type name and every field's
/// opaque name up front, so an occurrence that precedes the declaration in
/// item order is still rewritten consistently. The walk is fail-soft: a
/// shape the engine does not recognize is logged and skipped, and a local
/// mismatch never aborts the rest of the pass.
pub struct Propagator<'a> {
    record: &'a mut RecordDescriptor,
}

impl<'a> Propagator<'a> {
    /// Prepare a propagation pass for `record`, drawing any missing opaque
    /// names from `names`. Names already assigned by an earlier pass over
    /// the same record are kept, so repeated passes are no-ops.
    pub fn new(record: &'a mut RecordDescriptor, names: &mut NameGenerator) -> Self {
        if record.opaque_name.is_none() {
            record.opaque_name = Some(names.fresh());
        }
        for field in &mut record.fields {
            if field.opaque_name.is_none() {
                field.opaque_name = Some(names.fresh());
            }
        }
        Self { record }
    }

    /// One depth-first pass over `file`, rewriting every occurrence of the
    /// record under rename.
    pub fn run(&mut self, file: &mut syn::File) {
        debug!(record = %self.record.original_name, "propagating rename");
        for item in &mut file.items {
            self.rewrite_item(item);
        }
    }

    /// Item dispatch, shared between top-level items and declarations nested
    /// inside function bodies.
    fn rewrite_item(&mut self, item: &mut syn::Item) {
        match item {
            syn::Item::Struct(item_struct) => self.rewrite_struct_decl(item_struct),
            syn::Item::Static(item_static) => {
                self.rewrite_type(&mut item_static.ty);
                self.rewrite_init_expr(&mut item_static.expr);
            }
            syn::Item::Const(item_const) => {
                self.rewrite_type(&mut item_const.ty);
                self.rewrite_init_expr(&mut item_const.expr);
            }
            syn::Item::Fn(item_fn) => self.rewrite_block(&mut item_fn.block),
            // Non-record type declarations stay as written.
            syn::Item::Enum(_) | syn::Item::Type(_) | syn::Item::Union(_) => {}
            other => trace!(shape = item_kind(other), "unhandled item shape"),
        }
    }

    /// The record's own declaration: rename the type and every field to the
    /// opaque names assigned at construction.
    fn rewrite_struct_decl(&mut self, item: &mut syn::ItemStruct) {
        if item.ident != self.record.original_name {
            return;
        }
        let Some(opaque) = self.record.opaque_name.clone() else {
            return;
        };
        item.ident = syn::Ident::new(&opaque, item.ident.span());

        let syn::Fields::Named(named) = &mut item.fields else {
            debug!(record = %self.record.original_name, "declaration no longer has named fields");
            return;
        };
        for field in &mut named.named {
            let (original, span) = match &field.ident {
                Some(ident) => (ident.to_string(), ident.span()),
                None => continue,
            };
            let Some(descriptor) = self.record.field(&original) else {
                trace!(field = %original, "field missing from catalog entry");
                continue;
            };
            let Some(opaque) = descriptor.opaque_name.clone() else {
                continue;
            };
            field.ident = Some(syn::Ident::new(&opaque, span));
        }
    }

    fn rewrite_block(&mut self, block: &mut syn::Block) {
        for stmt in &mut block.stmts {
            self.rewrite_stmt(stmt);
        }
    }

    fn rewrite_stmt(&mut self, stmt: &mut syn::Stmt) {
        match stmt {
            // Nested declarations share the top-level item path.
            syn::Stmt::Item(item) => self.rewrite_item(item),
            syn::Stmt::Local(local) => self.rewrite_local(local),
            syn::Stmt::Expr(expr, _) => self.rewrite_stmt_expr(expr),
            syn::Stmt::Macro(_) => trace!("macro statement skipped"),
        }
    }

    /// A `let` binding: rename the type annotation when present, then route
    /// the initializer through the literal rules.
    fn rewrite_local(&mut self, local: &mut syn::Local) {
        if let syn::Pat::Type(pat_type) = &mut local.pat {
            self.rewrite_type(&mut pat_type.ty);
        }
        if let Some(init) = &mut local.init {
            self.rewrite_init_expr(&mut init.expr);
        }
    }

    fn rewrite_stmt_expr(&mut self, expr: &mut syn::Expr) {
        match expr {
            syn::Expr::Assign(assign) => self.rewrite_init_expr(&mut assign.right),
            other => trace!(shape = expr_kind(other), "unhandled statement expression"),
        }
    }

    /// Initializer / assignment right-hand side dispatch: bare composite
    /// literal, address-of over a literal, or a call expression.
    fn rewrite_init_expr(&mut self, expr: &mut syn::Expr) {
        match expr {
            syn::Expr::Struct(literal) => self.rewrite_struct_literal(literal),
            syn::Expr::Reference(reference) => match reference.expr.as_mut() {
                syn::Expr::Struct(literal) => self.rewrite_struct_literal(literal),
                inner => trace!(shape = expr_kind(inner), "address-of over non-literal skipped"),
            },
            syn::Expr::Call(call) => {
                // Constructor-style initializers are not rewritten:
                // attributing a call's arguments to a record needs type
                // inference this pass does not do.
                debug!(
                    callee = %call.func.to_token_stream(),
                    "call initializer inspected, not rewritten"
                );
            }
            other => trace!(shape = expr_kind(other), "unhandled initializer shape"),
        }
    }

    /// A composite literal: rename the type reference when it resolves to
    /// the record under rename, then every key, scoped to this record's
    /// field table only. Keys are rewritten independently, so one
    /// unresolvable key does not block the others.
    fn rewrite_struct_literal(&mut self, literal: &mut syn::ExprStruct) {
        if literal.qself.is_some() {
            trace!("qualified-self literal skipped");
            return;
        }
        if !self.rewrite_path(&mut literal.path) {
            // Not this record; its keys must not be touched.
            return;
        }
        for field_value in &mut literal.fields {
            let (original, span) = match &field_value.member {
                syn::Member::Named(ident) => (ident.to_string(), ident.span()),
                syn::Member::Unnamed(_) => {
                    trace!("non-identifier literal key skipped");
                    continue;
                }
            };
            let Some(descriptor) = self.record.field(&original) else {
                continue;
            };
            let Some(opaque) = descriptor.opaque_name.clone() else {
                continue;
            };
            // Shorthand `Point { x }` still binds the local `x`, so the
            // value must be spelled out before the key changes.
            if field_value.colon_token.is_none() {
                field_value.colon_token = Some(Default::default());
            }
            field_value.member = syn::Member::Named(syn::Ident::new(&opaque, span));
        }
    }

    /// Renames a bare type reference when it denotes the record under
    /// rename.
    fn rewrite_type(&mut self, ty: &mut syn::Type) {
        let syn::Type::Path(type_path) = ty else {
            return;
        };
        if type_path.qself.is_some() {
            return;
        }
        self.rewrite_path(&mut type_path.path);
    }

    /// Renames the final segment of a type path when it matches the record:
    /// a single-segment path must equal the original name outright, a
    /// qualified path is matched on its final segment with the qualifier
    /// left untouched. Returns whether a rename happened.
    fn rewrite_path(&mut self, path: &mut syn::Path) -> bool {
        let Some(last) = path.segments.last() else {
            return false;
        };
        if !last.arguments.is_none() || last.ident != self.record.original_name {
            return false;
        }
        let Some(opaque) = self.record.opaque_name.clone() else {
            return false;
        };
        if path.segments.len() > 1 {
            debug!(path = %path.to_token_stream(), "renaming qualified type reference");
        }
        let Some(last) = path.segments.last_mut() else {
            return false;
        };
        last.ident = syn::Ident::new(&opaque, last.ident.span());
        true
    }
}

fn item_kind(item: &syn::Item) -> &'static str {
    match item {
        syn::Item::Impl(_) => "impl",
        syn::Item::Mod(_) => "mod",
        syn::Item::Trait(_) => "trait",
        syn::Item::Use(_) => "use",
        syn::Item::Macro(_) => "macro",
        syn::Item::ExternCrate(_) => "extern crate",
        syn::Item::ForeignMod(_) => "foreign mod",
        syn::Item::TraitAlias(_) => "trait alias",
        _ => "item",
    }
}

fn expr_kind(expr: &syn::Expr) -> &'static str {
    match expr {
        syn::Expr::Path(_) => "path",
        syn::Expr::Lit(_) => "literal",
        syn::Expr::MethodCall(_) => "method call",
        syn::Expr::Field(_) => "field access",
        syn::Expr::Macro(_) => "macro",
        syn::Expr::Block(_) => "block",
        syn::Expr::If(_) => "if",
        syn::Expr::Match(_) => "match",
        syn::Expr::Tuple(_) => "tuple",
        syn::Expr::Array(_) => "array",
        _ => "expr",
    }
}
