//! Parallel-region directives and their clauses.
//!
//! Directives are statements (`Stmt::OmpParallel`, ...) and live in the
//! statement arena. Clauses are stored next to them, in the arena's clause
//! table, and referenced by `ClauseId`.

mod clause;
mod directive;
mod kinds;

pub use clause::{
    AlignedClause, CaptureClause, ClauseLocs, ClauseNode, ClauseVariant, CollapseClause,
    CopyPrivateClause, CopyinClause, DefaultClause, FinalClause, FirstPrivateClause,
    FlushClause, IfClause, LastPrivateClause, LinearClause, MergeableClause, NowaitClause,
    NumThreadsClause, OmpClause, OrderedClause, PrivateClause, ProcBindClause, ReadClause,
    ReductionClause, SafelenClause, ScheduleClause, SeqCstClause, SharedClause, UniformClause,
    UntiedClause, UpdateClause, VarList, WriteClause,
};
pub use directive::{
    AtomicBinaryOp, ExecutableDirective, LoopHelperExprs, OmpAtomicDirective, OmpBarrierDirective,
    OmpCriticalDirective, OmpFlushDirective, OmpForDirective, OmpForSimdDirective,
    OmpMasterDirective, OmpOrderedDirective, OmpParallelDirective, OmpSectionDirective,
    OmpSectionsDirective, OmpSimdDirective, OmpSingleDirective, OmpTaskDirective,
    OmpTaskgroupDirective, OmpTaskwaitDirective, OmpTaskyieldDirective,
};
pub use kinds::{
    is_allowed_clause, ClauseKind, DefaultKind, DirectiveKind, ProcBindKind, ReductionOperator,
    ScheduleKind,
};
