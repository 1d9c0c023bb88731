//! Executable directives.
//!
//! Every directive owns a clause list and a small fixed set of slots for
//! its associated statement and compiler-generated helper expressions.
//! Loop directives add one counter slot per collapsed loop level. Both
//! arrays are sized once when the directive is created.

use std::fmt;

use crate::stmt::{Children, StmtNode};
use crate::{
    ArrayLayout, ChildId, ClauseId, ExprId, Locator, Name, SourceLocation, StmtArena, StmtId, Trailing,
    TrailingArrays,
};

use super::kinds::{ClauseKind, DirectiveKind};

const FIXED: usize = 0;
const COUNTERS: usize = 1;

/// Slot of the associated statement, when the directive has one.
const ASSOCIATED_STMT: usize = 0;

/// State shared by every directive.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ExecutableDirective {
    kind: DirectiveKind,
    start_loc: SourceLocation,
    end_loc: SourceLocation,
    clauses: Trailing<ClauseId>,
    slots: Trailing<Option<ChildId>>,
}

impl ExecutableDirective {
    fn new(kind: DirectiveKind, num_clauses: usize, num_fixed: usize, num_counters: usize) -> Self {
        ExecutableDirective {
            kind,
            start_loc: SourceLocation::INVALID,
            end_loc: SourceLocation::INVALID,
            clauses: Trailing::with_sections(&[num_clauses]),
            slots: Trailing::with_sections(&[num_fixed, num_counters]),
        }
    }

    pub fn kind(&self) -> DirectiveKind {
        self.kind
    }

    pub fn start_loc(&self) -> SourceLocation {
        self.start_loc
    }

    pub fn end_loc(&self) -> SourceLocation {
        self.end_loc
    }

    pub fn set_locs(&mut self, start_loc: SourceLocation, end_loc: SourceLocation) {
        self.start_loc = start_loc;
        self.end_loc = end_loc;
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.total_len()
    }

    pub fn clauses(&self) -> &[ClauseId] {
        self.clauses.as_slice()
    }

    /// # Panics
    /// Panics unless `clauses` has exactly as many entries as the directive
    /// was created with.
    #[track_caller]
    pub fn set_clauses(&mut self, clauses: &[ClauseId]) {
        self.clauses.set_section(0, clauses);
    }

    /// Clauses of one kind, in source order.
    pub fn clauses_of_kind<'a>(
        &'a self,
        arena: &'a StmtArena<'_>,
        kind: ClauseKind,
    ) -> impl Iterator<Item = ClauseId> + 'a {
        self.clauses()
            .iter()
            .copied()
            .filter(move |&id| arena.clause(id).kind() == kind)
    }

    pub fn has_associated_stmt(&self) -> bool {
        self.associated_stmt().is_some()
    }

    pub fn associated_stmt(&self) -> Option<StmtId> {
        self.slots
            .section(FIXED)
            .get(ASSOCIATED_STMT)
            .copied()
            .flatten()
            .and_then(ChildId::as_stmt)
    }

    /// # Panics
    /// Panics if this directive kind has no associated statement.
    #[track_caller]
    pub fn set_associated_stmt(&mut self, stmt: StmtId) {
        let fixed = self.slots.section_mut(FIXED);
        assert!(
            !fixed.is_empty(),
            "'{}' directive has no associated statement",
            self.kind
        );
        fixed[ASSOCIATED_STMT] = Some(stmt.into());
    }

    fn helper(&self, index: usize) -> Option<ExprId> {
        self.slots.section(FIXED)[index].and_then(ChildId::as_expr)
    }

    fn set_helper(&mut self, index: usize, expr: Option<ExprId>) {
        self.slots.section_mut(FIXED)[index] = expr.map(Into::into);
    }

    /// The associated statement followed by every helper slot; empty when
    /// no statement is attached.
    pub fn children(&self) -> Children {
        if self.has_associated_stmt() {
            self.slots.as_slice().iter().copied().collect()
        } else {
            Children::new()
        }
    }

    pub fn trailing_arrays(&self) -> TrailingArrays {
        let mut arrays = self.clauses.array_layouts();
        arrays.push(ArrayLayout::of::<Option<ChildId>>(self.slots.total_len()));
        arrays
    }
}

/// Implements `StmtNode` and the shared accessors for directive wrappers.
macro_rules! directive_node {
    ($($ty:ident,)*) => {
        $(
            impl $ty {
                pub fn directive(&self) -> &ExecutableDirective {
                    &self.base
                }

                pub fn directive_mut(&mut self) -> &mut ExecutableDirective {
                    &mut self.base
                }

                pub fn clauses(&self) -> &[ClauseId] {
                    self.base.clauses()
                }

                pub fn associated_stmt(&self) -> Option<StmtId> {
                    self.base.associated_stmt()
                }
            }

            impl StmtNode for $ty {
                fn children(&self) -> Children {
                    self.base.children()
                }

                fn loc_start(&self, _cx: &Locator<'_>) -> SourceLocation {
                    self.base.start_loc
                }

                fn loc_end(&self, _cx: &Locator<'_>) -> SourceLocation {
                    self.base.end_loc
                }

                fn trailing_arrays(&self) -> TrailingArrays {
                    self.base.trailing_arrays()
                }
            }
        )*
    };
}

/// Directive with clauses and an associated statement.
macro_rules! region_directive {
    ($($(#[$doc:meta])* $ty:ident => $kind:ident,)*) => {
        $(
            $(#[$doc])*
            #[derive(Clone, Eq, PartialEq, Debug)]
            pub struct $ty {
                base: ExecutableDirective,
            }

            impl $ty {
                pub fn create(
                    start_loc: SourceLocation,
                    end_loc: SourceLocation,
                    clauses: &[ClauseId],
                    associated_stmt: StmtId,
                ) -> Self {
                    let mut node = Self::create_empty(clauses.len());
                    node.base.set_locs(start_loc, end_loc);
                    node.base.set_clauses(clauses);
                    node.base.set_associated_stmt(associated_stmt);
                    node
                }

                pub fn create_empty(num_clauses: usize) -> Self {
                    $ty {
                        base: ExecutableDirective::new(DirectiveKind::$kind, num_clauses, 1, 0),
                    }
                }
            }
        )*
    };
}

region_directive! {
    /// `#pragma omp parallel`
    OmpParallelDirective => Parallel,
    /// `#pragma omp sections`
    OmpSectionsDirective => Sections,
    /// `#pragma omp single`
    OmpSingleDirective => Single,
    /// `#pragma omp task`
    OmpTaskDirective => Task,
}

/// Directive with an associated statement and no clauses.
macro_rules! block_directive {
    ($($(#[$doc:meta])* $ty:ident => $kind:ident,)*) => {
        $(
            $(#[$doc])*
            #[derive(Clone, Eq, PartialEq, Debug)]
            pub struct $ty {
                base: ExecutableDirective,
            }

            impl $ty {
                pub fn create(
                    start_loc: SourceLocation,
                    end_loc: SourceLocation,
                    associated_stmt: StmtId,
                ) -> Self {
                    let mut node = Self::create_empty();
                    node.base.set_locs(start_loc, end_loc);
                    node.base.set_associated_stmt(associated_stmt);
                    node
                }

                pub fn create_empty() -> Self {
                    $ty {
                        base: ExecutableDirective::new(DirectiveKind::$kind, 0, 1, 0),
                    }
                }
            }
        )*
    };
}

block_directive! {
    /// `#pragma omp section`
    OmpSectionDirective => Section,
    /// `#pragma omp master`
    OmpMasterDirective => Master,
    /// `#pragma omp taskgroup`
    OmpTaskgroupDirective => Taskgroup,
    /// `#pragma omp ordered`
    OmpOrderedDirective => Ordered,
}

/// Stand-alone directive: no clauses, no statement.
macro_rules! standalone_directive {
    ($($(#[$doc:meta])* $ty:ident => $kind:ident,)*) => {
        $(
            $(#[$doc])*
            #[derive(Clone, Eq, PartialEq, Debug)]
            pub struct $ty {
                base: ExecutableDirective,
            }

            impl $ty {
                pub fn create(start_loc: SourceLocation, end_loc: SourceLocation) -> Self {
                    let mut node = Self::create_empty();
                    node.base.set_locs(start_loc, end_loc);
                    node
                }

                pub fn create_empty() -> Self {
                    $ty {
                        base: ExecutableDirective::new(DirectiveKind::$kind, 0, 0, 0),
                    }
                }
            }
        )*
    };
}

standalone_directive! {
    /// `#pragma omp taskyield`
    OmpTaskyieldDirective => Taskyield,
    /// `#pragma omp barrier`
    OmpBarrierDirective => Barrier,
    /// `#pragma omp taskwait`
    OmpTaskwaitDirective => Taskwait,
}

const ITERATION_VARIABLE: usize = 1;
const LAST_ITERATION: usize = 2;
const INIT: usize = 3;
const FINAL: usize = 4;
const LOOP_SLOTS: usize = 5;

/// Helper expressions computed for a loop directive.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct LoopHelperExprs {
    /// The normalized iteration variable.
    pub iteration_variable: Option<ExprId>,
    /// Number of the last iteration.
    pub last_iteration: Option<ExprId>,
    /// Initialization of the iteration variable.
    pub init: Option<ExprId>,
    /// Update of the original loop counters after the last iteration.
    pub final_expr: Option<ExprId>,
}

/// Loop directive over `collapsed_num` nested loops.
macro_rules! loop_directive {
    ($($(#[$doc:meta])* $ty:ident => $kind:ident,)*) => {
        $(
            $(#[$doc])*
            #[derive(Clone, Eq, PartialEq, Debug)]
            pub struct $ty {
                base: ExecutableDirective,
                collapsed_num: u32,
            }

            impl $ty {
                /// # Panics
                /// Panics unless there is one counter per collapsed loop.
                #[track_caller]
                pub fn create(
                    start_loc: SourceLocation,
                    end_loc: SourceLocation,
                    clauses: &[ClauseId],
                    associated_stmt: StmtId,
                    helpers: LoopHelperExprs,
                    counters: &[ExprId],
                ) -> Self {
                    let mut node = Self::create_empty(counters.len(), clauses.len());
                    node.base.set_locs(start_loc, end_loc);
                    node.base.set_clauses(clauses);
                    node.base.set_associated_stmt(associated_stmt);
                    node.set_helpers(helpers);
                    node.set_counters(counters);
                    node
                }

                pub fn create_empty(collapsed_num: usize, num_clauses: usize) -> Self {
                    $ty {
                        base: ExecutableDirective::new(
                            DirectiveKind::$kind,
                            num_clauses,
                            LOOP_SLOTS,
                            collapsed_num,
                        ),
                        collapsed_num: crate::arena::to_u32(collapsed_num, "collapsed loops"),
                    }
                }

                pub fn collapsed_num(&self) -> usize {
                    self.collapsed_num as usize
                }

                pub fn helpers(&self) -> LoopHelperExprs {
                    LoopHelperExprs {
                        iteration_variable: self.base.helper(ITERATION_VARIABLE),
                        last_iteration: self.base.helper(LAST_ITERATION),
                        init: self.base.helper(INIT),
                        final_expr: self.base.helper(FINAL),
                    }
                }

                pub fn set_helpers(&mut self, helpers: LoopHelperExprs) {
                    self.base.set_helper(ITERATION_VARIABLE, helpers.iteration_variable);
                    self.base.set_helper(LAST_ITERATION, helpers.last_iteration);
                    self.base.set_helper(INIT, helpers.init);
                    self.base.set_helper(FINAL, helpers.final_expr);
                }

                /// Counters of the collapsed loops; `None` until filled.
                pub fn counters(&self) -> impl Iterator<Item = Option<ExprId>> + '_ {
                    self.base
                        .slots
                        .section(COUNTERS)
                        .iter()
                        .map(|slot| slot.and_then(ChildId::as_expr))
                }

                /// # Panics
                /// Panics unless there is one counter per collapsed loop.
                #[track_caller]
                pub fn set_counters(&mut self, counters: &[ExprId]) {
                    let slots: Vec<Option<ChildId>> =
                        counters.iter().map(|&c| Some(c.into())).collect();
                    self.base.slots.set_section(COUNTERS, &slots);
                }
            }
        )*
    };
}

loop_directive! {
    /// `#pragma omp simd`
    OmpSimdDirective => Simd,
    /// `#pragma omp for`
    OmpForDirective => For,
    /// `#pragma omp for simd`
    OmpForSimdDirective => ForSimd,
}

/// `#pragma omp critical [(name)]`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct OmpCriticalDirective {
    base: ExecutableDirective,
    /// `Name::EMPTY` for an unnamed critical section.
    name: Name,
}

impl OmpCriticalDirective {
    pub fn create(
        name: Name,
        start_loc: SourceLocation,
        end_loc: SourceLocation,
        associated_stmt: StmtId,
    ) -> Self {
        let mut node = Self::create_empty();
        node.name = name;
        node.base.set_locs(start_loc, end_loc);
        node.base.set_associated_stmt(associated_stmt);
        node
    }

    pub fn create_empty() -> Self {
        OmpCriticalDirective {
            base: ExecutableDirective::new(DirectiveKind::Critical, 0, 1, 0),
            name: Name::EMPTY,
        }
    }

    pub fn name(&self) -> Name {
        self.name
    }

    pub fn set_name(&mut self, name: Name) {
        self.name = name;
    }
}

/// `#pragma omp flush [(list)]`
///
/// The flushed variables travel in an implicit `flush` clause.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct OmpFlushDirective {
    base: ExecutableDirective,
}

impl OmpFlushDirective {
    pub fn create(start_loc: SourceLocation, end_loc: SourceLocation, clauses: &[ClauseId]) -> Self {
        let mut node = Self::create_empty(clauses.len());
        node.base.set_locs(start_loc, end_loc);
        node.base.set_clauses(clauses);
        node
    }

    pub fn create_empty(num_clauses: usize) -> Self {
        OmpFlushDirective {
            base: ExecutableDirective::new(DirectiveKind::Flush, num_clauses, 0, 0),
        }
    }
}

/// Operator of an atomic update, `x = x op expr`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum AtomicBinaryOp {
    /// Plain assignment, as in `read`/`write` forms.
    #[default]
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
    Xor,
    Shl,
    Shr,
}

impl AtomicBinaryOp {
    pub const fn symbol(self) -> &'static str {
        match self {
            AtomicBinaryOp::Assign => "=",
            AtomicBinaryOp::Add => "+",
            AtomicBinaryOp::Sub => "-",
            AtomicBinaryOp::Mul => "*",
            AtomicBinaryOp::Div => "/",
            AtomicBinaryOp::And => "&",
            AtomicBinaryOp::Or => "|",
            AtomicBinaryOp::Xor => "^",
            AtomicBinaryOp::Shl => "<<",
            AtomicBinaryOp::Shr => ">>",
        }
    }
}

impl fmt::Display for AtomicBinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

const ATOMIC_V: usize = 1;
const ATOMIC_X: usize = 2;
const ATOMIC_EXPR: usize = 3;
const ATOMIC_SLOTS: usize = 4;

/// `#pragma omp atomic [read|write|update|capture]`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct OmpAtomicDirective {
    base: ExecutableDirective,
    op: AtomicBinaryOp,
    /// `v = x` happens after the update (`{x op= e; v = x;}`).
    capture_after: bool,
    /// The update is written `x = expr op x`.
    reversed: bool,
}

impl OmpAtomicDirective {
    #[track_caller]
    pub fn create(
        start_loc: SourceLocation,
        end_loc: SourceLocation,
        clauses: &[ClauseId],
        associated_stmt: StmtId,
        v: Option<ExprId>,
        x: Option<ExprId>,
        expr: Option<ExprId>,
        op: AtomicBinaryOp,
        capture_after: bool,
        reversed: bool,
    ) -> Self {
        let mut node = Self::create_empty(clauses.len());
        node.base.set_locs(start_loc, end_loc);
        node.base.set_clauses(clauses);
        node.base.set_associated_stmt(associated_stmt);
        node.set_v(v);
        node.set_x(x);
        node.set_expr(expr);
        node.op = op;
        node.capture_after = capture_after;
        node.reversed = reversed;
        node
    }

    pub fn create_empty(num_clauses: usize) -> Self {
        OmpAtomicDirective {
            base: ExecutableDirective::new(DirectiveKind::Atomic, num_clauses, ATOMIC_SLOTS, 0),
            op: AtomicBinaryOp::Assign,
            capture_after: false,
            reversed: false,
        }
    }

    /// The captured value, for `capture` forms.
    pub fn v(&self) -> Option<ExprId> {
        self.base.helper(ATOMIC_V)
    }

    pub fn set_v(&mut self, v: Option<ExprId>) {
        self.base.set_helper(ATOMIC_V, v);
    }

    /// The atomically accessed location.
    pub fn x(&self) -> Option<ExprId> {
        self.base.helper(ATOMIC_X)
    }

    pub fn set_x(&mut self, x: Option<ExprId>) {
        self.base.set_helper(ATOMIC_X, x);
    }

    pub fn expr(&self) -> Option<ExprId> {
        self.base.helper(ATOMIC_EXPR)
    }

    pub fn set_expr(&mut self, expr: Option<ExprId>) {
        self.base.set_helper(ATOMIC_EXPR, expr);
    }

    pub fn op(&self) -> AtomicBinaryOp {
        self.op
    }

    pub fn is_capture_after(&self) -> bool {
        self.capture_after
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }
}

directive_node! {
    OmpParallelDirective,
    OmpSectionsDirective,
    OmpSingleDirective,
    OmpTaskDirective,
    OmpSectionDirective,
    OmpMasterDirective,
    OmpTaskgroupDirective,
    OmpOrderedDirective,
    OmpTaskyieldDirective,
    OmpBarrierDirective,
    OmpTaskwaitDirective,
    OmpSimdDirective,
    OmpForDirective,
    OmpForSimdDirective,
    OmpCriticalDirective,
    OmpFlushDirective,
    OmpAtomicDirective,
}
