//! In-memory stand-ins for the expression and declaration subsystems.

use rustc_hash::FxHashMap;

use crate::omp::{
    AtomicBinaryOp, LoopHelperExprs, OmpAtomicDirective, OmpBarrierDirective,
    OmpCriticalDirective, OmpFlushDirective, OmpForDirective, OmpForSimdDirective,
    OmpMasterDirective, OmpOrderedDirective, OmpParallelDirective, OmpSectionDirective,
    OmpSectionsDirective, OmpSimdDirective, OmpSingleDirective, OmpTaskDirective,
    OmpTaskgroupDirective, OmpTaskwaitDirective, OmpTaskyieldDirective,
};
use crate::stmt::{
    AsmCommon, AttributedStmt, BreakStmt, CapturedRegionKind, CapturedStmt, CaseStmt,
    CompoundStmt, ContinueStmt, CxxCatchStmt, CxxForRangeStmt, CxxTryStmt, DeclStmt, DefaultStmt,
    DoStmt, ForStmt, GccAsmStmt, GotoStmt, IfStmt, IndirectGotoStmt, LabelStmt, MsAsmStmt,
    NullStmt, ObjcAtCatchStmt, ObjcAtFinallyStmt, ObjcAtTryStmt, ObjcForCollectionStmt,
    ReturnStmt, SehExceptStmt, SehFinallyStmt, SehTryStmt, StmtClass, SwitchStmt, WhileStmt,
};
use crate::{
    AttrId, DeclId, DeclLookup, ExprId, ExprLookup, LabelId, Name, SourceLocation, SourceRange,
    StmtArena, StmtId, TokenId, TypeId,
};

pub(crate) fn loc(offset: u32) -> SourceLocation {
    SourceLocation::new(offset)
}

pub(crate) fn range(begin: u32, end: u32) -> SourceRange {
    SourceRange::new(loc(begin), loc(end))
}

/// Expressions known only by their range.
#[derive(Default)]
pub(crate) struct FakeExprs {
    ranges: FxHashMap<ExprId, SourceRange>,
    /// Expression to the expression it wraps in parens or an implicit cast.
    wrapped: FxHashMap<ExprId, ExprId>,
    label_addresses: FxHashMap<ExprId, LabelId>,
    next: u32,
}

impl FakeExprs {
    pub(crate) fn add(&mut self, begin: u32, end: u32) -> ExprId {
        let id = ExprId::new(self.next);
        self.next += 1;
        self.ranges.insert(id, range(begin, end));
        id
    }

    /// `&&label`
    pub(crate) fn add_label_address(&mut self, begin: u32, end: u32, label: LabelId) -> ExprId {
        let id = self.add(begin, end);
        self.label_addresses.insert(id, label);
        id
    }

    /// `(inner)` or an implicit conversion of `inner`.
    pub(crate) fn add_wrapper(&mut self, begin: u32, end: u32, inner: ExprId) -> ExprId {
        let id = self.add(begin, end);
        self.wrapped.insert(id, inner);
        id
    }
}

impl ExprLookup for FakeExprs {
    fn expr_range(&self, expr: ExprId) -> SourceRange {
        self.ranges.get(&expr).copied().unwrap_or(SourceRange::INVALID)
    }

    fn ignore_paren_implicit_casts(&self, expr: ExprId) -> ExprId {
        let mut current = expr;
        while let Some(&inner) = self.wrapped.get(&current) {
            current = inner;
        }
        current
    }

    fn address_of_label(&self, expr: ExprId) -> Option<LabelId> {
        self.label_addresses.get(&expr).copied()
    }
}

#[derive(Clone, Copy)]
struct FakeDecl {
    range: SourceRange,
    ty: TypeId,
    init: Option<ExprId>,
}

#[derive(Default)]
pub(crate) struct FakeDecls {
    decls: Vec<FakeDecl>,
    labels: FxHashMap<LabelId, Name>,
}

impl FakeDecls {
    pub(crate) fn add_var(
        &mut self,
        begin: u32,
        end: u32,
        ty: TypeId,
        init: Option<ExprId>,
    ) -> DeclId {
        let id = DeclId::new(u32::try_from(self.decls.len()).unwrap_or(u32::MAX));
        self.decls.push(FakeDecl {
            range: range(begin, end),
            ty,
            init,
        });
        id
    }

    pub(crate) fn add_label(&mut self, label: LabelId, name: Name) {
        self.labels.insert(label, name);
    }
}

impl DeclLookup for FakeDecls {
    fn decl_range(&self, decl: DeclId) -> SourceRange {
        self.decls[decl.index()].range
    }

    fn decl_type(&self, decl: DeclId) -> TypeId {
        self.decls[decl.index()].ty
    }

    fn var_init(&self, decl: DeclId) -> Option<ExprId> {
        self.decls[decl.index()].init
    }

    fn label_name(&self, label: LabelId) -> Name {
        self.labels.get(&label).copied().unwrap_or(Name::EMPTY)
    }
}

/// One node of every statement kind, plus whatever sub-nodes it needs.
///
/// Sample `i` lives in `[100 * i, 100 * i + 99]`. Its sub-statements end at
/// fixed offsets inside that window: the first block at `+60`, a second
/// block at `+80` and a third at `+95`.
pub(crate) struct KindSamples {
    pub(crate) arena: StmtArena<'static>,
    pub(crate) exprs: FakeExprs,
    pub(crate) decls: FakeDecls,
    pub(crate) samples: Vec<(StmtClass, StmtId)>,
}

impl KindSamples {
    pub(crate) fn build() -> Self {
        let mut kinds = KindSamples {
            arena: StmtArena::new(),
            exprs: FakeExprs::default(),
            decls: FakeDecls::default(),
            samples: Vec::with_capacity(StmtClass::COUNT),
        };
        for (index, &class) in StmtClass::ALL.iter().enumerate() {
            let base = u32::try_from(index * 100).unwrap_or(u32::MAX);
            let id = kinds.sample(class, base);
            kinds.samples.push((class, id));
        }
        kinds
    }

    /// Id of the sample of `class`.
    pub(crate) fn of(&self, class: StmtClass) -> StmtId {
        self.samples[class.index()].1
    }

    fn block(&mut self, begin: u32, end: u32) -> StmtId {
        self.arena.alloc(CompoundStmt::empty(loc(begin), loc(end)))
    }

    fn sample(&mut self, class: StmtClass, b: u32) -> StmtId {
        let expr = self.exprs.add(b + 10, b + 20);
        let body = self.block(b + 50, b + 60);
        let none = SourceLocation::INVALID;
        let no_helpers = LoopHelperExprs::default();
        match class {
            StmtClass::Null => self.arena.alloc(NullStmt::new(loc(b))),
            StmtClass::Compound => {
                self.arena.alloc(CompoundStmt::new(&[body], loc(b), loc(b + 95)))
            }
            StmtClass::Label => self.arena.alloc(LabelStmt::new(loc(b), LabelId::new(0), body)),
            StmtClass::Attributed => {
                self.arena.alloc(AttributedStmt::create(loc(b), &[AttrId::new(0)], body))
            }
            StmtClass::If => self.arena.alloc(IfStmt::new(loc(b), expr, body, none, None)),
            StmtClass::Switch => {
                let mut node = SwitchStmt::new(loc(b), expr);
                node.set_body(body, loc(b));
                self.arena.alloc(node)
            }
            StmtClass::While => self.arena.alloc(WhileStmt::new(loc(b), expr, body)),
            StmtClass::Do => {
                self.arena.alloc(DoStmt::new(body, expr, loc(b), loc(b + 62), loc(b + 70)))
            }
            StmtClass::For => self.arena.alloc(ForStmt::new(
                loc(b),
                None,
                None,
                None,
                body,
                loc(b + 4),
                loc(b + 30),
            )),
            StmtClass::Goto => self.arena.alloc(GotoStmt::new(LabelId::new(0), loc(b), loc(b + 5))),
            StmtClass::IndirectGoto => {
                self.arena.alloc(IndirectGotoStmt::new(loc(b), loc(b + 5), expr))
            }
            StmtClass::Continue => self.arena.alloc(ContinueStmt::new(loc(b))),
            StmtClass::Break => self.arena.alloc(BreakStmt::new(loc(b))),
            StmtClass::Return => self.arena.alloc(ReturnStmt::new(loc(b), Some(expr))),
            StmtClass::Decl => {
                let var = self.decls.add_var(b, b + 20, TypeId::new(0), Some(expr));
                self.arena
                    .alloc(DeclStmt::single(var, &self.decls, loc(b), loc(b + 21)))
            }
            StmtClass::Case => {
                let mut node = CaseStmt::new(expr, None, loc(b), none, loc(b + 21));
                node.set_sub_stmt(body);
                self.arena.alloc(node)
            }
            StmtClass::Default => self.arena.alloc(DefaultStmt::new(loc(b), loc(b + 8), body)),
            StmtClass::GccAsm => self.arena.alloc(GccAsmStmt::new(
                AsmCommon::new(loc(b), true, false),
                "nop",
                &[],
                &[],
                &[],
                loc(b + 12),
            )),
            StmtClass::MsAsm => self.arena.alloc(MsAsmStmt::new(
                AsmCommon::new(loc(b), true, false),
                loc(b + 6),
                &[TokenId::new(0)],
                0,
                0,
                &[],
                &[],
                "nop",
                &[],
                loc(b + 12),
            )),
            StmtClass::CxxCatch => self.arena.alloc(CxxCatchStmt::new(loc(b), None, body)),
            StmtClass::CxxTry => {
                let handler_block = self.block(b + 70, b + 80);
                let handler =
                    self.arena.alloc(CxxCatchStmt::new(loc(b + 65), None, handler_block));
                self.arena.alloc(CxxTryStmt::create(loc(b), body, &[handler]))
            }
            StmtClass::CxxForRange => {
                let range_var = self.decls.add_var(b + 10, b + 20, TypeId::new(0), Some(expr));
                let loop_var = self.decls.add_var(b + 5, b + 8, TypeId::new(0), None);
                let range_stmt = self.arena.alloc(DeclStmt::single(
                    range_var,
                    &self.decls,
                    loc(b + 10),
                    loc(b + 20),
                ));
                let loop_var_stmt = self.arena.alloc(DeclStmt::single(
                    loop_var,
                    &self.decls,
                    loc(b + 5),
                    loc(b + 8),
                ));
                self.arena.alloc(CxxForRangeStmt::new(
                    range_stmt,
                    None,
                    None,
                    None,
                    loop_var_stmt,
                    body,
                    loc(b),
                    loc(b + 9),
                    loc(b + 21),
                ))
            }
            StmtClass::SehExcept => self.arena.alloc(SehExceptStmt::create(loc(b), expr, body)),
            StmtClass::SehFinally => self.arena.alloc(SehFinallyStmt::create(loc(b), body)),
            StmtClass::SehTry => {
                let handler_block = self.block(b + 70, b + 80);
                let handler = self
                    .arena
                    .alloc(SehFinallyStmt::create(loc(b + 62), handler_block));
                self.arena
                    .alloc(SehTryStmt::create(false, loc(b), body, handler))
            }
            StmtClass::Captured => self.arena.alloc(CapturedStmt::create(
                body,
                CapturedRegionKind::Default,
                &[],
                &[],
                DeclId::INVALID,
                DeclId::INVALID,
            )),
            StmtClass::ObjcAtCatch => {
                self.arena.alloc(ObjcAtCatchStmt::new(loc(b), loc(b + 30), None, body))
            }
            StmtClass::ObjcAtFinally => self.arena.alloc(ObjcAtFinallyStmt::new(loc(b), body)),
            StmtClass::ObjcAtTry => {
                let catch_block = self.block(b + 70, b + 80);
                let catch = self.arena.alloc(ObjcAtCatchStmt::new(
                    loc(b + 62),
                    loc(b + 68),
                    None,
                    catch_block,
                ));
                let finally_block = self.block(b + 90, b + 95);
                let finally = self
                    .arena
                    .alloc(ObjcAtFinallyStmt::new(loc(b + 82), finally_block));
                self.arena
                    .alloc(ObjcAtTryStmt::create(loc(b), body, &[catch], Some(finally)))
            }
            StmtClass::ObjcForCollection => {
                let element = self.exprs.add(b + 5, b + 6);
                self.arena.alloc(ObjcForCollectionStmt::new(
                    element,
                    expr,
                    body,
                    loc(b),
                    loc(b + 21),
                ))
            }
            StmtClass::OmpParallel => {
                self.arena.alloc(OmpParallelDirective::create(loc(b), loc(b + 5), &[], body))
            }
            StmtClass::OmpSimd => self.arena.alloc(OmpSimdDirective::create(
                loc(b),
                loc(b + 5),
                &[],
                body,
                no_helpers,
                &[expr],
            )),
            StmtClass::OmpFor => self.arena.alloc(OmpForDirective::create(
                loc(b),
                loc(b + 5),
                &[],
                body,
                no_helpers,
                &[expr],
            )),
            StmtClass::OmpForSimd => self.arena.alloc(OmpForSimdDirective::create(
                loc(b),
                loc(b + 5),
                &[],
                body,
                no_helpers,
                &[expr],
            )),
            StmtClass::OmpSections => {
                self.arena.alloc(OmpSectionsDirective::create(loc(b), loc(b + 5), &[], body))
            }
            StmtClass::OmpSection => {
                self.arena.alloc(OmpSectionDirective::create(loc(b), loc(b + 5), body))
            }
            StmtClass::OmpSingle => {
                self.arena.alloc(OmpSingleDirective::create(loc(b), loc(b + 5), &[], body))
            }
            StmtClass::OmpMaster => {
                self.arena.alloc(OmpMasterDirective::create(loc(b), loc(b + 5), body))
            }
            StmtClass::OmpCritical => self.arena.alloc(OmpCriticalDirective::create(
                Name::EMPTY,
                loc(b),
                loc(b + 5),
                body,
            )),
            StmtClass::OmpTask => {
                self.arena.alloc(OmpTaskDirective::create(loc(b), loc(b + 5), &[], body))
            }
            StmtClass::OmpTaskyield => {
                self.arena.alloc(OmpTaskyieldDirective::create(loc(b), loc(b + 5)))
            }
            StmtClass::OmpBarrier => {
                self.arena.alloc(OmpBarrierDirective::create(loc(b), loc(b + 5)))
            }
            StmtClass::OmpTaskwait => {
                self.arena.alloc(OmpTaskwaitDirective::create(loc(b), loc(b + 5)))
            }
            StmtClass::OmpTaskgroup => {
                self.arena.alloc(OmpTaskgroupDirective::create(loc(b), loc(b + 5), body))
            }
            StmtClass::OmpFlush => {
                self.arena.alloc(OmpFlushDirective::create(loc(b), loc(b + 5), &[]))
            }
            StmtClass::OmpOrdered => {
                self.arena.alloc(OmpOrderedDirective::create(loc(b), loc(b + 5), body))
            }
            StmtClass::OmpAtomic => self.arena.alloc(OmpAtomicDirective::create(
                loc(b),
                loc(b + 5),
                &[],
                body,
                None,
                None,
                None,
                AtomicBinaryOp::Assign,
                false,
                false,
            )),
        }
    }
}
