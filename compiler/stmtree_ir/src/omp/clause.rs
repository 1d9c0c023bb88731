//! Directive clauses.
//!
//! Variable-list clauses keep their variables and every helper array in one
//! `Trailing` buffer, in a fixed order: the variables first, then each
//! helper array in turn. Every helper array has exactly one entry per
//! variable. Helper slots created empty hold `ExprId::INVALID` until filled.

use crate::stmt::{some, Children};
use crate::{ArrayLayout, ExprId, Name, SourceLocation, Trailing, TrailingArrays};

use super::kinds::{ClauseKind, DefaultKind, ProcBindKind, ReductionOperator, ScheduleKind};

/// Start and end of a clause. Both are invalid for implicit clauses.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ClauseLocs {
    pub start: SourceLocation,
    pub end: SourceLocation,
}

impl ClauseLocs {
    pub const fn new(start: SourceLocation, end: SourceLocation) -> Self {
        ClauseLocs { start, end }
    }

    /// Clause synthesized by the compiler rather than written.
    pub fn is_implicit(self) -> bool {
        !self.start.is_valid()
    }
}

/// Operations shared by every clause kind.
pub trait ClauseNode {
    const KIND: ClauseKind;

    fn locs(&self) -> ClauseLocs;

    /// Expressions written in the clause, in source order.
    fn children(&self) -> Children;

    fn trailing_arrays(&self) -> TrailingArrays {
        TrailingArrays::new()
    }
}

/// Checked projection from `OmpClause` to one concrete clause.
pub trait ClauseVariant: ClauseNode + Sized {
    fn cast(clause: &OmpClause) -> Option<&Self>;

    fn cast_mut(clause: &mut OmpClause) -> Option<&mut Self>;
}

/// Variables of a clause plus its parallel helper arrays.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct VarList {
    lparen_loc: SourceLocation,
    slots: Trailing<ExprId>,
}

const VARS: usize = 0;

impl VarList {
    /// `arrays` sections of `num_vars` slots each (variables included).
    fn new(num_vars: usize, arrays: usize) -> Self {
        VarList {
            lparen_loc: SourceLocation::INVALID,
            slots: Trailing::uniform(arrays, num_vars),
        }
    }

    /// Variables followed by one extra single-slot section.
    fn with_trailing_expr(num_vars: usize) -> Self {
        VarList {
            lparen_loc: SourceLocation::INVALID,
            slots: Trailing::with_sections(&[num_vars, 1]),
        }
    }

    pub fn lparen_loc(&self) -> SourceLocation {
        self.lparen_loc
    }

    pub fn len(&self) -> usize {
        self.slots.section_len(VARS)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn vars(&self) -> &[ExprId] {
        self.slots.section(VARS)
    }

    fn section(&self, section: usize) -> &[ExprId] {
        self.slots.section(section)
    }

    #[track_caller]
    fn set_section(&mut self, section: usize, values: &[ExprId]) {
        self.slots.set_section(section, values);
    }

    fn var_children(&self) -> Children {
        self.vars().iter().map(|&var| some(var)).collect()
    }
}

/// Common accessors of variable-list clauses; `$section => $get / $set`
/// names each helper array in storage order.
macro_rules! var_list_accessors {
    ($name:ident { $($section:literal => $get:ident / $set:ident,)* }) => {
        impl $name {
            pub fn var_list(&self) -> &VarList {
                &self.list
            }

            pub fn vars(&self) -> &[ExprId] {
                self.list.vars()
            }

            #[track_caller]
            pub fn set_vars(&mut self, vars: &[ExprId]) {
                self.list.set_section(VARS, vars);
            }

            pub fn set_locs(
                &mut self,
                start: SourceLocation,
                lparen_loc: SourceLocation,
                end: SourceLocation,
            ) {
                self.locs = ClauseLocs::new(start, end);
                self.list.lparen_loc = lparen_loc;
            }

            $(
                pub fn $get(&self) -> &[ExprId] {
                    self.list.section($section)
                }

                #[track_caller]
                pub fn $set(&mut self, values: &[ExprId]) {
                    self.list.set_section($section, values);
                }
            )*
        }
    };
}

/// `private(list)`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct PrivateClause {
    locs: ClauseLocs,
    list: VarList,
}

var_list_accessors!(PrivateClause {
    1 => default_inits / set_default_inits,
});

impl PrivateClause {
    pub fn create(
        start: SourceLocation,
        lparen_loc: SourceLocation,
        end: SourceLocation,
        vars: &[ExprId],
        default_inits: &[ExprId],
    ) -> Self {
        let mut clause = Self::create_empty(vars.len());
        clause.set_locs(start, lparen_loc, end);
        clause.set_vars(vars);
        clause.set_default_inits(default_inits);
        clause
    }

    pub fn create_empty(num_vars: usize) -> Self {
        PrivateClause {
            locs: ClauseLocs::default(),
            list: VarList::new(num_vars, 2),
        }
    }
}

/// `firstprivate(list)`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct FirstPrivateClause {
    locs: ClauseLocs,
    list: VarList,
}

var_list_accessors!(FirstPrivateClause {
    1 => pseudo_vars / set_pseudo_vars,
    2 => inits / set_inits,
});

impl FirstPrivateClause {
    pub fn create(
        start: SourceLocation,
        lparen_loc: SourceLocation,
        end: SourceLocation,
        vars: &[ExprId],
        pseudo_vars: &[ExprId],
        inits: &[ExprId],
    ) -> Self {
        let mut clause = Self::create_empty(vars.len());
        clause.set_locs(start, lparen_loc, end);
        clause.set_vars(vars);
        clause.set_pseudo_vars(pseudo_vars);
        clause.set_inits(inits);
        clause
    }

    pub fn create_empty(num_vars: usize) -> Self {
        FirstPrivateClause {
            locs: ClauseLocs::default(),
            list: VarList::new(num_vars, 3),
        }
    }
}

/// `lastprivate(list)`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct LastPrivateClause {
    locs: ClauseLocs,
    list: VarList,
}

var_list_accessors!(LastPrivateClause {
    1 => pseudo_vars1 / set_pseudo_vars1,
    2 => pseudo_vars2 / set_pseudo_vars2,
    3 => default_inits / set_default_inits,
    4 => assignments / set_assignments,
});

impl LastPrivateClause {
    /// Default initializers start out as invalid placeholders; they are
    /// attached later with `set_default_inits`.
    pub fn create(
        start: SourceLocation,
        lparen_loc: SourceLocation,
        end: SourceLocation,
        vars: &[ExprId],
        pseudo_vars1: &[ExprId],
        pseudo_vars2: &[ExprId],
        assignments: &[ExprId],
    ) -> Self {
        let mut clause = Self::create_empty(vars.len());
        clause.set_locs(start, lparen_loc, end);
        clause.set_vars(vars);
        clause.set_pseudo_vars1(pseudo_vars1);
        clause.set_pseudo_vars2(pseudo_vars2);
        clause.set_assignments(assignments);
        clause
    }

    pub fn create_empty(num_vars: usize) -> Self {
        LastPrivateClause {
            locs: ClauseLocs::default(),
            list: VarList::new(num_vars, 5),
        }
    }
}

/// `shared(list)`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct SharedClause {
    locs: ClauseLocs,
    list: VarList,
}

var_list_accessors!(SharedClause {});

impl SharedClause {
    pub fn create(
        start: SourceLocation,
        lparen_loc: SourceLocation,
        end: SourceLocation,
        vars: &[ExprId],
    ) -> Self {
        let mut clause = Self::create_empty(vars.len());
        clause.set_locs(start, lparen_loc, end);
        clause.set_vars(vars);
        clause
    }

    pub fn create_empty(num_vars: usize) -> Self {
        SharedClause {
            locs: ClauseLocs::default(),
            list: VarList::new(num_vars, 1),
        }
    }
}

/// `copyin(list)`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct CopyinClause {
    locs: ClauseLocs,
    list: VarList,
}

var_list_accessors!(CopyinClause {
    1 => pseudo_vars1 / set_pseudo_vars1,
    2 => pseudo_vars2 / set_pseudo_vars2,
    3 => assignments / set_assignments,
});

impl CopyinClause {
    pub fn create(
        start: SourceLocation,
        lparen_loc: SourceLocation,
        end: SourceLocation,
        vars: &[ExprId],
        pseudo_vars1: &[ExprId],
        pseudo_vars2: &[ExprId],
        assignments: &[ExprId],
    ) -> Self {
        let mut clause = Self::create_empty(vars.len());
        clause.set_locs(start, lparen_loc, end);
        clause.set_vars(vars);
        clause.set_pseudo_vars1(pseudo_vars1);
        clause.set_pseudo_vars2(pseudo_vars2);
        clause.set_assignments(assignments);
        clause
    }

    pub fn create_empty(num_vars: usize) -> Self {
        CopyinClause {
            locs: ClauseLocs::default(),
            list: VarList::new(num_vars, 4),
        }
    }
}

/// `copyprivate(list)`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct CopyPrivateClause {
    locs: ClauseLocs,
    list: VarList,
}

var_list_accessors!(CopyPrivateClause {
    1 => pseudo_vars1 / set_pseudo_vars1,
    2 => pseudo_vars2 / set_pseudo_vars2,
    3 => assignments / set_assignments,
});

impl CopyPrivateClause {
    pub fn create(
        start: SourceLocation,
        lparen_loc: SourceLocation,
        end: SourceLocation,
        vars: &[ExprId],
        pseudo_vars1: &[ExprId],
        pseudo_vars2: &[ExprId],
        assignments: &[ExprId],
    ) -> Self {
        let mut clause = Self::create_empty(vars.len());
        clause.set_locs(start, lparen_loc, end);
        clause.set_vars(vars);
        clause.set_pseudo_vars1(pseudo_vars1);
        clause.set_pseudo_vars2(pseudo_vars2);
        clause.set_assignments(assignments);
        clause
    }

    pub fn create_empty(num_vars: usize) -> Self {
        CopyPrivateClause {
            locs: ClauseLocs::default(),
            list: VarList::new(num_vars, 4),
        }
    }
}

/// `reduction([scope::]op: list)`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ReductionClause {
    locs: ClauseLocs,
    list: VarList,
    colon_loc: SourceLocation,
    /// `None` for a user-defined reduction, which is identified by name.
    operator: Option<ReductionOperator>,
    /// Scope qualifying a user-defined operator name.
    qualifier: Option<Name>,
    op_name: Name,
}

var_list_accessors!(ReductionClause {
    1 => op_exprs / set_op_exprs,
    2 => helper_params1 / set_helper_params1,
    3 => helper_params2 / set_helper_params2,
    4 => default_inits / set_default_inits,
});

impl ReductionClause {
    /// # Panics
    /// Panics unless every helper array has one entry per variable.
    #[track_caller]
    pub fn create(
        start: SourceLocation,
        lparen_loc: SourceLocation,
        colon_loc: SourceLocation,
        end: SourceLocation,
        vars: &[ExprId],
        op_exprs: &[ExprId],
        helper_params1: &[ExprId],
        helper_params2: &[ExprId],
        default_inits: &[ExprId],
        operator: Option<ReductionOperator>,
        qualifier: Option<Name>,
        op_name: Name,
    ) -> Self {
        assert_eq!(
            vars.len(),
            op_exprs.len(),
            "number of expressions is not the same as number of variables"
        );
        let mut clause = Self::create_empty(vars.len());
        clause.set_locs(start, lparen_loc, end);
        clause.colon_loc = colon_loc;
        clause.operator = operator;
        clause.qualifier = qualifier;
        clause.op_name = op_name;
        clause.set_vars(vars);
        clause.set_op_exprs(op_exprs);
        clause.set_helper_params1(helper_params1);
        clause.set_helper_params2(helper_params2);
        clause.set_default_inits(default_inits);
        clause
    }

    pub fn create_empty(num_vars: usize) -> Self {
        ReductionClause {
            locs: ClauseLocs::default(),
            list: VarList::new(num_vars, 5),
            colon_loc: SourceLocation::INVALID,
            operator: None,
            qualifier: None,
            op_name: Name::EMPTY,
        }
    }

    pub fn colon_loc(&self) -> SourceLocation {
        self.colon_loc
    }

    pub fn operator(&self) -> Option<ReductionOperator> {
        self.operator
    }

    pub fn qualifier(&self) -> Option<Name> {
        self.qualifier
    }

    pub fn op_name(&self) -> Name {
        self.op_name
    }

    pub fn set_operator(
        &mut self,
        operator: Option<ReductionOperator>,
        qualifier: Option<Name>,
        op_name: Name,
    ) {
        self.operator = operator;
        self.qualifier = qualifier;
        self.op_name = op_name;
    }
}

/// `flush(list)`, the implicit clause of a `flush` directive.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct FlushClause {
    locs: ClauseLocs,
    list: VarList,
}

var_list_accessors!(FlushClause {});

impl FlushClause {
    pub fn create(
        start: SourceLocation,
        lparen_loc: SourceLocation,
        end: SourceLocation,
        vars: &[ExprId],
    ) -> Self {
        let mut clause = Self::create_empty(vars.len());
        clause.set_locs(start, lparen_loc, end);
        clause.set_vars(vars);
        clause
    }

    pub fn create_empty(num_vars: usize) -> Self {
        FlushClause {
            locs: ClauseLocs::default(),
            list: VarList::new(num_vars, 1),
        }
    }
}

/// `uniform(list)`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct UniformClause {
    locs: ClauseLocs,
    list: VarList,
}

var_list_accessors!(UniformClause {});

impl UniformClause {
    pub fn create(
        start: SourceLocation,
        lparen_loc: SourceLocation,
        end: SourceLocation,
        vars: &[ExprId],
    ) -> Self {
        let mut clause = Self::create_empty(vars.len());
        clause.set_locs(start, lparen_loc, end);
        clause.set_vars(vars);
        clause
    }

    pub fn create_empty(num_vars: usize) -> Self {
        UniformClause {
            locs: ClauseLocs::default(),
            list: VarList::new(num_vars, 1),
        }
    }
}

/// `linear(list[: step])`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct LinearClause {
    locs: ClauseLocs,
    list: VarList,
    colon_loc: SourceLocation,
}

var_list_accessors!(LinearClause {});

impl LinearClause {
    pub fn create(
        start: SourceLocation,
        lparen_loc: SourceLocation,
        colon_loc: SourceLocation,
        end: SourceLocation,
        vars: &[ExprId],
        step: Option<ExprId>,
    ) -> Self {
        let mut clause = Self::create_empty(vars.len());
        clause.set_locs(start, lparen_loc, end);
        clause.colon_loc = colon_loc;
        clause.set_vars(vars);
        clause.set_step(step);
        clause
    }

    pub fn create_empty(num_vars: usize) -> Self {
        LinearClause {
            locs: ClauseLocs::default(),
            list: VarList::with_trailing_expr(num_vars),
            colon_loc: SourceLocation::INVALID,
        }
    }

    pub fn step(&self) -> Option<ExprId> {
        let step = self.list.section(1)[0];
        step.is_valid().then_some(step)
    }

    pub fn set_step(&mut self, step: Option<ExprId>) {
        self.list.set_section(1, &[step.unwrap_or(ExprId::INVALID)]);
    }

    pub fn colon_loc(&self) -> SourceLocation {
        self.colon_loc
    }
}

/// `aligned(list[: alignment])`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct AlignedClause {
    locs: ClauseLocs,
    list: VarList,
    colon_loc: SourceLocation,
}

var_list_accessors!(AlignedClause {});

impl AlignedClause {
    pub fn create(
        start: SourceLocation,
        lparen_loc: SourceLocation,
        colon_loc: SourceLocation,
        end: SourceLocation,
        vars: &[ExprId],
        alignment: Option<ExprId>,
    ) -> Self {
        let mut clause = Self::create_empty(vars.len());
        clause.set_locs(start, lparen_loc, end);
        clause.colon_loc = colon_loc;
        clause.set_vars(vars);
        clause.set_alignment(alignment);
        clause
    }

    pub fn create_empty(num_vars: usize) -> Self {
        AlignedClause {
            locs: ClauseLocs::default(),
            list: VarList::with_trailing_expr(num_vars),
            colon_loc: SourceLocation::INVALID,
        }
    }

    pub fn alignment(&self) -> Option<ExprId> {
        let alignment = self.list.section(1)[0];
        alignment.is_valid().then_some(alignment)
    }

    pub fn set_alignment(&mut self, alignment: Option<ExprId>) {
        self.list
            .set_section(1, &[alignment.unwrap_or(ExprId::INVALID)]);
    }

    pub fn colon_loc(&self) -> SourceLocation {
        self.colon_loc
    }
}

/// Clause with a single parenthesized expression.
macro_rules! expr_clause {
    ($(#[$doc:meta])* $name:ident, $get:ident) => {
        $(#[$doc])*
        #[derive(Clone, Eq, PartialEq, Debug)]
        pub struct $name {
            locs: ClauseLocs,
            lparen_loc: SourceLocation,
            expr: ExprId,
        }

        impl $name {
            pub fn new(
                $get: ExprId,
                start: SourceLocation,
                lparen_loc: SourceLocation,
                end: SourceLocation,
            ) -> Self {
                $name {
                    locs: ClauseLocs::new(start, end),
                    lparen_loc,
                    expr: $get,
                }
            }

            pub fn $get(&self) -> ExprId {
                self.expr
            }

            pub fn lparen_loc(&self) -> SourceLocation {
                self.lparen_loc
            }
        }
    };
}

expr_clause!(
    /// `if(condition)`
    IfClause,
    condition
);
expr_clause!(
    /// `final(condition)`
    FinalClause,
    condition
);
expr_clause!(
    /// `num_threads(count)`
    NumThreadsClause,
    num_threads
);
expr_clause!(
    /// `safelen(length)`
    SafelenClause,
    safelen
);
expr_clause!(
    /// `collapse(n)`
    CollapseClause,
    num_for_loops
);

/// Clause that is only a keyword.
macro_rules! flag_clause {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Eq, PartialEq, Debug)]
        pub struct $name {
            locs: ClauseLocs,
        }

        impl $name {
            pub fn new(start: SourceLocation, end: SourceLocation) -> Self {
                $name {
                    locs: ClauseLocs::new(start, end),
                }
            }
        }
    };
}

flag_clause!(
    /// `ordered`
    OrderedClause
);
flag_clause!(
    /// `nowait`
    NowaitClause
);
flag_clause!(
    /// `untied`
    UntiedClause
);
flag_clause!(
    /// `mergeable`
    MergeableClause
);
flag_clause!(
    /// `read`
    ReadClause
);
flag_clause!(
    /// `write`
    WriteClause
);
flag_clause!(
    /// `update`
    UpdateClause
);
flag_clause!(
    /// `capture`
    CaptureClause
);
flag_clause!(
    /// `seq_cst`
    SeqCstClause
);

/// `default(none|shared)`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct DefaultClause {
    locs: ClauseLocs,
    lparen_loc: SourceLocation,
    kind: DefaultKind,
    kind_loc: SourceLocation,
}

impl DefaultClause {
    pub fn new(
        kind: DefaultKind,
        kind_loc: SourceLocation,
        start: SourceLocation,
        lparen_loc: SourceLocation,
        end: SourceLocation,
    ) -> Self {
        DefaultClause {
            locs: ClauseLocs::new(start, end),
            lparen_loc,
            kind,
            kind_loc,
        }
    }

    pub fn default_kind(&self) -> DefaultKind {
        self.kind
    }

    pub fn default_kind_loc(&self) -> SourceLocation {
        self.kind_loc
    }
}

/// `proc_bind(master|close|spread)`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ProcBindClause {
    locs: ClauseLocs,
    lparen_loc: SourceLocation,
    kind: ProcBindKind,
    kind_loc: SourceLocation,
}

impl ProcBindClause {
    pub fn new(
        kind: ProcBindKind,
        kind_loc: SourceLocation,
        start: SourceLocation,
        lparen_loc: SourceLocation,
        end: SourceLocation,
    ) -> Self {
        ProcBindClause {
            locs: ClauseLocs::new(start, end),
            lparen_loc,
            kind,
            kind_loc,
        }
    }

    pub fn proc_bind_kind(&self) -> ProcBindKind {
        self.kind
    }

    pub fn proc_bind_kind_loc(&self) -> SourceLocation {
        self.kind_loc
    }
}

/// `schedule(kind[, chunk])`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ScheduleClause {
    locs: ClauseLocs,
    lparen_loc: SourceLocation,
    kind: ScheduleKind,
    kind_loc: SourceLocation,
    comma_loc: SourceLocation,
    chunk_size: Option<ExprId>,
}

impl ScheduleClause {
    pub fn new(
        kind: ScheduleKind,
        kind_loc: SourceLocation,
        comma_loc: SourceLocation,
        chunk_size: Option<ExprId>,
        start: SourceLocation,
        lparen_loc: SourceLocation,
        end: SourceLocation,
    ) -> Self {
        ScheduleClause {
            locs: ClauseLocs::new(start, end),
            lparen_loc,
            kind,
            kind_loc,
            comma_loc,
            chunk_size,
        }
    }

    pub fn schedule_kind(&self) -> ScheduleKind {
        self.kind
    }

    pub fn schedule_kind_loc(&self) -> SourceLocation {
        self.kind_loc
    }

    pub fn comma_loc(&self) -> SourceLocation {
        self.comma_loc
    }

    pub fn chunk_size(&self) -> Option<ExprId> {
        self.chunk_size
    }
}

/// Generate `OmpClause` and the per-kind trait impls from one list.
macro_rules! define_clauses {
    (
        var_list { $($vl_variant:ident($vl_ty:ident),)* }
        with_trailing_expr { $($te_variant:ident($te_ty:ident, $te_get:ident),)* }
        expr { $($ex_variant:ident($ex_ty:ident),)* }
        other { $($ot_variant:ident($ot_ty:ident),)* }
    ) => {
        /// A clause of any kind.
        #[derive(Clone, Eq, PartialEq, Debug)]
        pub enum OmpClause {
            $($vl_variant($vl_ty),)*
            $($te_variant($te_ty),)*
            $($ex_variant($ex_ty),)*
            $($ot_variant($ot_ty),)*
        }

        impl OmpClause {
            pub fn kind(&self) -> ClauseKind {
                match self {
                    $(OmpClause::$vl_variant(_) => ClauseKind::$vl_variant,)*
                    $(OmpClause::$te_variant(_) => ClauseKind::$te_variant,)*
                    $(OmpClause::$ex_variant(_) => ClauseKind::$ex_variant,)*
                    $(OmpClause::$ot_variant(_) => ClauseKind::$ot_variant,)*
                }
            }

            fn dispatch_locs(&self) -> ClauseLocs {
                match self {
                    $(OmpClause::$vl_variant(c) => c.locs(),)*
                    $(OmpClause::$te_variant(c) => c.locs(),)*
                    $(OmpClause::$ex_variant(c) => c.locs(),)*
                    $(OmpClause::$ot_variant(c) => c.locs(),)*
                }
            }

            /// Expressions written in the clause, in source order.
            pub fn children(&self) -> Children {
                match self {
                    $(OmpClause::$vl_variant(c) => c.children(),)*
                    $(OmpClause::$te_variant(c) => c.children(),)*
                    $(OmpClause::$ex_variant(c) => c.children(),)*
                    $(OmpClause::$ot_variant(c) => c.children(),)*
                }
            }

            pub fn trailing_arrays(&self) -> TrailingArrays {
                match self {
                    $(OmpClause::$vl_variant(c) => c.trailing_arrays(),)*
                    $(OmpClause::$te_variant(c) => c.trailing_arrays(),)*
                    $(OmpClause::$ex_variant(c) => c.trailing_arrays(),)*
                    $(OmpClause::$ot_variant(c) => c.trailing_arrays(),)*
                }
            }
        }

        $(
            impl ClauseNode for $vl_ty {
                const KIND: ClauseKind = ClauseKind::$vl_variant;

                fn locs(&self) -> ClauseLocs {
                    self.locs
                }

                fn children(&self) -> Children {
                    self.list.var_children()
                }

                fn trailing_arrays(&self) -> TrailingArrays {
                    self.list.slots.array_layouts()
                }
            }
        )*

        $(
            impl ClauseNode for $te_ty {
                const KIND: ClauseKind = ClauseKind::$te_variant;

                fn locs(&self) -> ClauseLocs {
                    self.locs
                }

                /// The variables, then the trailing expression slot.
                fn children(&self) -> Children {
                    let mut children = self.list.var_children();
                    children.push(self.$te_get().map(Into::into));
                    children
                }

                fn trailing_arrays(&self) -> TrailingArrays {
                    smallvec::smallvec![ArrayLayout::of::<ExprId>(self.list.slots.total_len())]
                }
            }
        )*

        $(
            impl ClauseNode for $ex_ty {
                const KIND: ClauseKind = ClauseKind::$ex_variant;

                fn locs(&self) -> ClauseLocs {
                    self.locs
                }

                fn children(&self) -> Children {
                    smallvec::smallvec![some(self.expr)]
                }
            }
        )*

        $(
            impl From<$vl_ty> for OmpClause {
                fn from(clause: $vl_ty) -> Self {
                    OmpClause::$vl_variant(clause)
                }
            }
        )*
        $(
            impl From<$te_ty> for OmpClause {
                fn from(clause: $te_ty) -> Self {
                    OmpClause::$te_variant(clause)
                }
            }
        )*
        $(
            impl From<$ex_ty> for OmpClause {
                fn from(clause: $ex_ty) -> Self {
                    OmpClause::$ex_variant(clause)
                }
            }
        )*
        $(
            impl From<$ot_ty> for OmpClause {
                fn from(clause: $ot_ty) -> Self {
                    OmpClause::$ot_variant(clause)
                }
            }
        )*

        define_clauses!(@cast $($vl_variant($vl_ty),)* $($te_variant($te_ty),)* $($ex_variant($ex_ty),)* $($ot_variant($ot_ty),)*);
    };

    (@cast $($variant:ident($ty:ident),)*) => {
        $(
            impl ClauseVariant for $ty {
                fn cast(clause: &OmpClause) -> Option<&Self> {
                    match clause {
                        OmpClause::$variant(c) => Some(c),
                        _ => None,
                    }
                }

                fn cast_mut(clause: &mut OmpClause) -> Option<&mut Self> {
                    match clause {
                        OmpClause::$variant(c) => Some(c),
                        _ => None,
                    }
                }
            }
        )*
    };
}

define_clauses! {
    var_list {
        Private(PrivateClause),
        FirstPrivate(FirstPrivateClause),
        LastPrivate(LastPrivateClause),
        Shared(SharedClause),
        Reduction(ReductionClause),
        Copyin(CopyinClause),
        CopyPrivate(CopyPrivateClause),
        Flush(FlushClause),
        Uniform(UniformClause),
    }
    with_trailing_expr {
        Linear(LinearClause, step),
        Aligned(AlignedClause, alignment),
    }
    expr {
        If(IfClause),
        Final(FinalClause),
        NumThreads(NumThreadsClause),
        Safelen(SafelenClause),
        Collapse(CollapseClause),
    }
    other {
        Default(DefaultClause),
        ProcBind(ProcBindClause),
        Schedule(ScheduleClause),
        Ordered(OrderedClause),
        Nowait(NowaitClause),
        Untied(UntiedClause),
        Mergeable(MergeableClause),
        Read(ReadClause),
        Write(WriteClause),
        Update(UpdateClause),
        Capture(CaptureClause),
        SeqCst(SeqCstClause),
    }
}

/// Impl `ClauseNode` for keyword-only clauses.
macro_rules! flag_clause_node {
    ($($variant:ident($ty:ident),)*) => {
        $(
            impl ClauseNode for $ty {
                const KIND: ClauseKind = ClauseKind::$variant;

                fn locs(&self) -> ClauseLocs {
                    self.locs
                }

                fn children(&self) -> Children {
                    Children::new()
                }
            }
        )*
    };
}

flag_clause_node! {
    Ordered(OrderedClause),
    Nowait(NowaitClause),
    Untied(UntiedClause),
    Mergeable(MergeableClause),
    Read(ReadClause),
    Write(WriteClause),
    Update(UpdateClause),
    Capture(CaptureClause),
    SeqCst(SeqCstClause),
}

impl ClauseNode for DefaultClause {
    const KIND: ClauseKind = ClauseKind::Default;

    fn locs(&self) -> ClauseLocs {
        self.locs
    }

    fn children(&self) -> Children {
        Children::new()
    }
}

impl ClauseNode for ProcBindClause {
    const KIND: ClauseKind = ClauseKind::ProcBind;

    fn locs(&self) -> ClauseLocs {
        self.locs
    }

    fn children(&self) -> Children {
        Children::new()
    }
}

impl ClauseNode for ScheduleClause {
    const KIND: ClauseKind = ClauseKind::Schedule;

    fn locs(&self) -> ClauseLocs {
        self.locs
    }

    fn children(&self) -> Children {
        smallvec::smallvec![self.chunk_size.map(Into::into)]
    }
}

impl OmpClause {
    pub fn start_loc(&self) -> SourceLocation {
        self.dispatch_locs().start
    }

    pub fn end_loc(&self) -> SourceLocation {
        self.dispatch_locs().end
    }

    pub fn is_implicit(&self) -> bool {
        self.dispatch_locs().is_implicit()
    }

    /// The variable list, for variable-list clauses.
    pub fn var_list(&self) -> Option<&VarList> {
        match self {
            OmpClause::Private(c) => Some(c.var_list()),
            OmpClause::FirstPrivate(c) => Some(c.var_list()),
            OmpClause::LastPrivate(c) => Some(c.var_list()),
            OmpClause::Shared(c) => Some(c.var_list()),
            OmpClause::Reduction(c) => Some(c.var_list()),
            OmpClause::Copyin(c) => Some(c.var_list()),
            OmpClause::CopyPrivate(c) => Some(c.var_list()),
            OmpClause::Flush(c) => Some(c.var_list()),
            OmpClause::Uniform(c) => Some(c.var_list()),
            OmpClause::Linear(c) => Some(c.var_list()),
            OmpClause::Aligned(c) => Some(c.var_list()),
            _ => None,
        }
    }

    pub fn downcast<T: ClauseVariant>(&self) -> Option<&T> {
        T::cast(self)
    }

    pub fn downcast_mut<T: ClauseVariant>(&mut self) -> Option<&mut T> {
        T::cast_mut(self)
    }
}

#[cfg(test)]
mod tests;
