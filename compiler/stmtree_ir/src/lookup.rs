//! Seams to the expression and declaration subsystems.
//!
//! Statements hold `ExprId`/`DeclId` handles only. Whenever a location,
//! type or name behind one of those handles is needed, the caller passes
//! an implementation of these traits.

use crate::{DeclId, ExprId, LabelId, Name, SourceRange, TypeId};

/// Queries the statement core makes against expressions.
pub trait ExprLookup {
    /// Full source range of an expression.
    fn expr_range(&self, expr: ExprId) -> SourceRange;

    /// The expression with parentheses and implicit casts peeled off.
    fn ignore_paren_implicit_casts(&self, expr: ExprId) -> ExprId;

    /// The label of an address-of-label expression (`&&label`), if `expr` is one.
    fn address_of_label(&self, expr: ExprId) -> Option<LabelId>;
}

/// Queries the statement core makes against declarations.
pub trait DeclLookup {
    /// Full source range of a declaration.
    fn decl_range(&self, decl: DeclId) -> SourceRange;

    /// Declared type of a variable.
    fn decl_type(&self, decl: DeclId) -> TypeId;

    /// Initializer of a variable, if it has one.
    fn var_init(&self, decl: DeclId) -> Option<ExprId>;

    /// Name of a label declaration.
    fn label_name(&self, label: LabelId) -> Name;
}
