//! Statement nodes.
//!
//! Every statement kind is a plain struct implementing `StmtNode`. The
//! closed list of kinds below generates `StmtClass`, the `Stmt` sum type
//! and the kind-dispatched traversal entry points.
//!
//! # Child Model
//!
//! `children()` yields each direct sub-node in source order. Optional
//! children that are absent still occupy their slot as `None`, so callers
//! can rely on fixed positions (an `if` always reports four slots).

mod asm;
mod captured;
mod control;
mod exceptions;
mod objc;

pub use asm::{AsmCommon, AsmOperand, AsmStmt, GccAsmStmt, MsAsmStmt};
pub use captured::{CaptureKind, CapturedRegionKind, CapturedStmt, VariableCapture};
pub use control::{
    AttributedStmt, BreakStmt, CaseStmt, CompoundStmt, ContinueStmt, DeclStmt, DefaultStmt,
    DoStmt, ForStmt, GotoStmt, IfStmt, IndirectGotoStmt, LabelStmt, NullStmt, ReturnStmt,
    SwitchStmt, WhileStmt,
};
pub use exceptions::{
    CxxCatchStmt, CxxForRangeStmt, CxxTryStmt, SehExceptStmt, SehFinallyStmt, SehTryStmt,
};
pub use objc::{ObjcAtCatchStmt, ObjcAtFinallyStmt, ObjcAtTryStmt, ObjcForCollectionStmt};

use crate::kinds::define_stmt_kinds;
use crate::omp::{
    OmpAtomicDirective, OmpBarrierDirective, OmpCriticalDirective, OmpFlushDirective,
    OmpForDirective, OmpForSimdDirective, OmpMasterDirective, OmpOrderedDirective,
    OmpParallelDirective, OmpSectionDirective, OmpSectionsDirective, OmpSimdDirective,
    OmpSingleDirective, OmpTaskDirective, OmpTaskgroupDirective, OmpTaskwaitDirective,
    OmpTaskyieldDirective,
};
use crate::{ChildId, Locator, SourceLocation, SourceRange, TrailingArrays};
use smallvec::SmallVec;

/// Direct sub-nodes of a statement. Most kinds have four or fewer.
pub type Children = SmallVec<[Option<ChildId>; 4]>;

/// Capability set every statement kind provides.
pub trait StmtNode {
    /// Set when the kind computes `source_range` itself. `loc_start` and
    /// `loc_end` must then agree with the computed range.
    const CUSTOM_SOURCE_RANGE: bool = false;

    fn children(&self) -> Children;

    fn loc_start(&self, cx: &Locator<'_>) -> SourceLocation;

    fn loc_end(&self, cx: &Locator<'_>) -> SourceLocation;

    fn source_range(&self, cx: &Locator<'_>) -> SourceRange {
        SourceRange::new(self.loc_start(cx), self.loc_end(cx))
    }

    /// Trailing arrays owned by the node, for allocation accounting.
    fn trailing_arrays(&self) -> TrailingArrays {
        TrailingArrays::new()
    }
}

/// Checked projection from `Stmt` to one concrete kind.
pub trait StmtVariant: StmtNode + Sized {
    const CLASS: StmtClass;

    fn cast(stmt: &Stmt) -> Option<&Self>;

    fn cast_mut(stmt: &mut Stmt) -> Option<&mut Self>;
}

define_stmt_kinds! {
    Null(NullStmt),
    Compound(CompoundStmt),
    Label(LabelStmt),
    Attributed(AttributedStmt),
    If(IfStmt),
    Switch(SwitchStmt),
    While(WhileStmt),
    Do(DoStmt),
    For(ForStmt),
    Goto(GotoStmt),
    IndirectGoto(IndirectGotoStmt),
    Continue(ContinueStmt),
    Break(BreakStmt),
    Return(ReturnStmt),
    Decl(DeclStmt),
    Case(CaseStmt),
    Default(DefaultStmt),
    GccAsm(GccAsmStmt),
    MsAsm(MsAsmStmt),
    CxxCatch(CxxCatchStmt),
    CxxTry(CxxTryStmt),
    CxxForRange(CxxForRangeStmt),
    SehExcept(SehExceptStmt),
    SehFinally(SehFinallyStmt),
    SehTry(SehTryStmt),
    Captured(CapturedStmt),
    ObjcAtCatch(ObjcAtCatchStmt),
    ObjcAtFinally(ObjcAtFinallyStmt),
    ObjcAtTry(ObjcAtTryStmt),
    ObjcForCollection(ObjcForCollectionStmt),
    OmpParallel(OmpParallelDirective),
    OmpSimd(OmpSimdDirective),
    OmpFor(OmpForDirective),
    OmpForSimd(OmpForSimdDirective),
    OmpSections(OmpSectionsDirective),
    OmpSection(OmpSectionDirective),
    OmpSingle(OmpSingleDirective),
    OmpMaster(OmpMasterDirective),
    OmpCritical(OmpCriticalDirective),
    OmpTask(OmpTaskDirective),
    OmpTaskyield(OmpTaskyieldDirective),
    OmpBarrier(OmpBarrierDirective),
    OmpTaskwait(OmpTaskwaitDirective),
    OmpTaskgroup(OmpTaskgroupDirective),
    OmpFlush(OmpFlushDirective),
    OmpOrdered(OmpOrderedDirective),
    OmpAtomic(OmpAtomicDirective),
}

impl StmtClass {
    /// Whether the kind is a parallel-region directive.
    pub const fn is_omp_directive(self) -> bool {
        matches!(
            self,
            StmtClass::OmpParallel
                | StmtClass::OmpSimd
                | StmtClass::OmpFor
                | StmtClass::OmpForSimd
                | StmtClass::OmpSections
                | StmtClass::OmpSection
                | StmtClass::OmpSingle
                | StmtClass::OmpMaster
                | StmtClass::OmpCritical
                | StmtClass::OmpTask
                | StmtClass::OmpTaskyield
                | StmtClass::OmpBarrier
                | StmtClass::OmpTaskwait
                | StmtClass::OmpTaskgroup
                | StmtClass::OmpFlush
                | StmtClass::OmpOrdered
                | StmtClass::OmpAtomic
        )
    }
}

impl Stmt {
    /// Whether this node is one of the two inline assembly dialects.
    pub fn is_asm(&self) -> bool {
        matches!(self, Stmt::GccAsm(_) | Stmt::MsAsm(_))
    }

    /// Whether this node is a parallel-region directive.
    pub fn is_omp_directive(&self) -> bool {
        self.class().is_omp_directive()
    }

    /// View of an inline assembly node across both dialects.
    pub fn as_asm(&self) -> Option<AsmStmt<'_>> {
        match self {
            Stmt::GccAsm(node) => Some(AsmStmt::Gcc(node)),
            Stmt::MsAsm(node) => Some(AsmStmt::Ms(node)),
            _ => None,
        }
    }
}

/// Build a child slot from an optional statement or expression.
#[inline]
pub(crate) fn slot<T: Into<ChildId>>(child: Option<T>) -> Option<ChildId> {
    child.map(Into::into)
}

/// Build a child slot from an id that is always present.
#[inline]
pub(crate) fn some<T: Into<ChildId>>(child: T) -> Option<ChildId> {
    Some(child.into())
}
