//! Stmtree IR - Statement Nodes
//!
//! This crate contains the statement half of the stmtree syntax tree:
//! - Source locations and ranges
//! - Interned names and the opaque ids of neighbouring subsystems
//!   (expressions, declarations, types, attributes)
//! - The closed statement kind registry with per-kind name and size
//! - `StmtArena`, the owner of every statement and clause of a unit
//! - Kind-dispatched `children`, `loc_start`, `loc_end` and `source_range`
//! - Inline assembly template analysis
//! - Parallel-region directives and their clauses
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: children are `StmtId`/`ExprId` indices, never boxes
//! - **Closed Kinds**: one `Stmt` variant per statement kind, matched exhaustively
//! - **Fixed Arity**: trailing arrays are sized once, at construction
//!
//! Expressions and declarations live elsewhere. This crate reaches them only
//! through the `ExprLookup` and `DeclLookup` traits.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod kinds;

mod arena;
pub mod asm;
mod ids;
mod interner;
mod lookup;
mod name;
pub mod omp;
mod source;
pub mod stmt;
mod trailing;

#[cfg(test)]
mod testing;

pub use arena::{Locator, StmtArena};
pub use ids::{AttrId, ChildId, ClauseId, DeclId, ExprId, LabelId, StmtId, TokenId, TypeId};
pub use interner::{StringInterner, StringLookup};
pub use kinds::{KindInfo, KindRegistry, StatsEntry, StatsReport, STATS_ENV_VAR};
pub use lookup::{DeclLookup, ExprLookup};
pub use name::Name;
pub use source::{LocationError, SourceLocation, SourceRange};
pub use stmt::{Children, Stmt, StmtClass, StmtNode, StmtVariant};
pub use trailing::{align_to, allocation_size, ArrayLayout, Trailing, TrailingArrays};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber driven by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set, so embedding tools keep full
/// control over their own subscriber. Safe to call more than once.
///
/// ```text
/// RUST_LOG=stmtree_ir=trace    # every node allocation
/// RUST_LOG=stmtree_ir=debug    # asm analysis and clause construction
/// ```
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        if std::env::var("RUST_LOG").is_err() {
            return;
        }

        use tracing_subscriber::prelude::*;
        use tracing_subscriber::{fmt, EnvFilter};

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .with(EnvFilter::from_default_env())
            .try_init()
            .ok();
    });
}
