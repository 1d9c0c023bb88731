//! Node ids for the flat statement tree.
//!
//! Statements and clauses are owned by `StmtArena` and addressed by index.
//! Expressions, declarations, labels, types, attributes and asm tokens belong
//! to other subsystems; their ids are opaque here and only resolved through
//! the lookup traits.

use std::fmt;

/// Define a 32-bit index type with an `INVALID` sentinel.
///
/// `INVALID` is the default so that created-empty nodes can be filled in
/// later by a deserializer.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Invalid id (sentinel value).
            pub const INVALID: $name = $name(u32::MAX);

            #[inline]
            pub const fn new(index: u32) -> Self {
                $name(index)
            }

            /// Get the index into the owning store.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            #[inline]
            pub const fn is_valid(self) -> bool {
                self.0 != u32::MAX
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, concat!(stringify!($name), "({})"), self.0)
                } else {
                    write!(f, concat!(stringify!($name), "::INVALID"))
                }
            }
        }
    };
}

define_id!(
    /// Index of a statement in `StmtArena`.
    StmtId
);
define_id!(
    /// Index of a parallel-region clause in `StmtArena`.
    ClauseId
);
define_id!(
    /// Handle to a node of the expression subsystem.
    ExprId
);
define_id!(
    /// Handle to a declaration (variables, exception variables, records).
    DeclId
);
define_id!(
    /// Handle to a label declaration.
    LabelId
);
define_id!(
    /// Handle to a type of the type system.
    TypeId
);
define_id!(
    /// Handle to a statement attribute.
    AttrId
);
define_id!(
    /// Handle to a pre-lexed inline assembly token.
    TokenId
);

/// A child slot of a statement: either a statement or an expression.
///
/// Expressions are statements in the tree's uniform child model, so child
/// lists mix both.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ChildId {
    Stmt(StmtId),
    Expr(ExprId),
}

impl ChildId {
    #[inline]
    pub const fn as_stmt(self) -> Option<StmtId> {
        match self {
            ChildId::Stmt(id) => Some(id),
            ChildId::Expr(_) => None,
        }
    }

    #[inline]
    pub const fn as_expr(self) -> Option<ExprId> {
        match self {
            ChildId::Expr(id) => Some(id),
            ChildId::Stmt(_) => None,
        }
    }

    /// Whether the underlying id is not a sentinel.
    #[inline]
    pub const fn is_valid(self) -> bool {
        match self {
            ChildId::Stmt(id) => id.is_valid(),
            ChildId::Expr(id) => id.is_valid(),
        }
    }
}

impl From<StmtId> for ChildId {
    fn from(id: StmtId) -> Self {
        ChildId::Stmt(id)
    }
}

impl From<ExprId> for ChildId {
    fn from(id: ExprId) -> Self {
        ChildId::Expr(id)
    }
}

mod size_asserts {
    use super::{ChildId, StmtId};
    crate::static_assert_size!(StmtId, 4);
    crate::static_assert_size!(ChildId, 8);
}
