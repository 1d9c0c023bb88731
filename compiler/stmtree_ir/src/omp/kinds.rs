//! Directive and clause vocabulary.

use std::fmt;

/// Define a keyword enum with its source spelling.
macro_rules! keyword_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal,)* }) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
        pub enum $name {
            $($variant,)*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)*];

            /// Source spelling.
            pub const fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)*
                }
            }

            /// Parse a source spelling.
            pub fn from_name(text: &str) -> Option<Self> {
                match text {
                    $($text => Some($name::$variant),)*
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

keyword_enum! {
    /// `#pragma omp <directive>`
    DirectiveKind {
        Threadprivate => "threadprivate",
        Parallel => "parallel",
        Task => "task",
        Simd => "simd",
        For => "for",
        Sections => "sections",
        Section => "section",
        Single => "single",
        Master => "master",
        Critical => "critical",
        Taskyield => "taskyield",
        Barrier => "barrier",
        Taskwait => "taskwait",
        Taskgroup => "taskgroup",
        Flush => "flush",
        Ordered => "ordered",
        Atomic => "atomic",
        ForSimd => "for simd",
        ParallelFor => "parallel for",
        ParallelSections => "parallel sections",
    }
}

keyword_enum! {
    /// Clause keywords.
    ClauseKind {
        If => "if",
        Final => "final",
        NumThreads => "num_threads",
        Safelen => "safelen",
        Collapse => "collapse",
        Default => "default",
        Private => "private",
        FirstPrivate => "firstprivate",
        LastPrivate => "lastprivate",
        Shared => "shared",
        Reduction => "reduction",
        Linear => "linear",
        Aligned => "aligned",
        Copyin => "copyin",
        CopyPrivate => "copyprivate",
        ProcBind => "proc_bind",
        Schedule => "schedule",
        Ordered => "ordered",
        Nowait => "nowait",
        Untied => "untied",
        Mergeable => "mergeable",
        Flush => "flush",
        Read => "read",
        Write => "write",
        Update => "update",
        Capture => "capture",
        SeqCst => "seq_cst",
        Uniform => "uniform",
    }
}

keyword_enum! {
    /// Argument of `default(...)`.
    DefaultKind {
        None => "none",
        Shared => "shared",
    }
}

keyword_enum! {
    /// Argument of `proc_bind(...)`.
    ProcBindKind {
        Master => "master",
        Close => "close",
        Spread => "spread",
    }
}

keyword_enum! {
    /// First argument of `schedule(...)`.
    ScheduleKind {
        Static => "static",
        Dynamic => "dynamic",
        Guided => "guided",
        Auto => "auto",
        Runtime => "runtime",
    }
}

keyword_enum! {
    /// Built-in operator of a `reduction(op: list)` clause.
    ReductionOperator {
        Add => "+",
        Mult => "*",
        Sub => "-",
        BitAnd => "&",
        BitOr => "|",
        BitXor => "^",
        And => "&&",
        Or => "||",
        Min => "min",
        Max => "max",
    }
}

/// Whether `clause` may appear on `directive`.
pub fn is_allowed_clause(directive: DirectiveKind, clause: ClauseKind) -> bool {
    use ClauseKind as C;
    use DirectiveKind as D;

    match directive {
        D::Parallel => matches!(
            clause,
            C::If
                | C::NumThreads
                | C::Default
                | C::ProcBind
                | C::Private
                | C::FirstPrivate
                | C::Shared
                | C::Reduction
                | C::Copyin
        ),
        D::Simd => matches!(
            clause,
            C::Private | C::LastPrivate | C::Linear | C::Aligned | C::Safelen | C::Collapse | C::Reduction
        ),
        D::For => matches!(
            clause,
            C::Private
                | C::LastPrivate
                | C::FirstPrivate
                | C::Reduction
                | C::Collapse
                | C::Schedule
                | C::Ordered
                | C::Nowait
        ),
        D::ForSimd => matches!(
            clause,
            C::Private
                | C::FirstPrivate
                | C::LastPrivate
                | C::Reduction
                | C::Schedule
                | C::Collapse
                | C::Nowait
                | C::Safelen
                | C::Linear
                | C::Aligned
        ),
        D::Sections => matches!(
            clause,
            C::Private | C::LastPrivate | C::FirstPrivate | C::Reduction | C::Nowait
        ),
        D::Single => matches!(
            clause,
            C::Private | C::FirstPrivate | C::CopyPrivate | C::Nowait
        ),
        D::Task => matches!(
            clause,
            C::If
                | C::Final
                | C::Default
                | C::Private
                | C::FirstPrivate
                | C::Shared
                | C::Untied
                | C::Mergeable
        ),
        D::Atomic => matches!(
            clause,
            C::Read | C::Write | C::Update | C::Capture | C::SeqCst
        ),
        D::Flush => clause == C::Flush,
        D::ParallelFor => matches!(
            clause,
            C::If
                | C::NumThreads
                | C::Default
                | C::ProcBind
                | C::Private
                | C::FirstPrivate
                | C::Shared
                | C::Reduction
                | C::Copyin
                | C::LastPrivate
                | C::Collapse
                | C::Schedule
                | C::Ordered
        ),
        D::ParallelSections => matches!(
            clause,
            C::If
                | C::NumThreads
                | C::Default
                | C::ProcBind
                | C::Private
                | C::FirstPrivate
                | C::Shared
                | C::Reduction
                | C::Copyin
                | C::LastPrivate
        ),
        D::Threadprivate
        | D::Section
        | D::Master
        | D::Critical
        | D::Taskyield
        | D::Barrier
        | D::Taskwait
        | D::Taskgroup
        | D::Ordered => false,
    }
}
