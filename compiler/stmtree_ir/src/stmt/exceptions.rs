//! Exception handling: C++ `try`/`catch`, structured exception handling
//! (`__try`/`__except`/`__finally`), and the range-based `for` that shares
//! the C++ front end's conventions.

use super::{slot, some, Children, StmtNode};
use crate::{
    DeclId, DeclLookup, ExprId, Locator, SourceLocation, SourceRange, StmtArena, StmtId,
    Trailing, TrailingArrays, TypeId,
};

/// `catch (decl) { ... }`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct CxxCatchStmt {
    catch_loc: SourceLocation,
    /// `None` for `catch (...)`.
    exception_decl: Option<DeclId>,
    handler_block: StmtId,
}

impl CxxCatchStmt {
    pub fn new(
        catch_loc: SourceLocation,
        exception_decl: Option<DeclId>,
        handler_block: StmtId,
    ) -> Self {
        CxxCatchStmt {
            catch_loc,
            exception_decl,
            handler_block,
        }
    }

    pub fn exception_decl(&self) -> Option<DeclId> {
        self.exception_decl
    }

    /// Type caught by this handler; `None` when it catches everything.
    pub fn caught_type(&self, decls: &dyn DeclLookup) -> Option<TypeId> {
        self.exception_decl.map(|decl| decls.decl_type(decl))
    }

    pub fn handler_block(&self) -> StmtId {
        self.handler_block
    }

    pub fn catch_loc(&self) -> SourceLocation {
        self.catch_loc
    }
}

impl StmtNode for CxxCatchStmt {
    fn children(&self) -> Children {
        smallvec::smallvec![some(self.handler_block)]
    }

    fn loc_start(&self, _cx: &Locator<'_>) -> SourceLocation {
        self.catch_loc
    }

    fn loc_end(&self, cx: &Locator<'_>) -> SourceLocation {
        cx.stmt_end(self.handler_block)
    }
}

const TRY_BLOCK: usize = 0;
const HANDLERS: usize = 1;

/// `try { ... } catch ... catch ...`
///
/// The try block and the handlers share one trailing array: slot 0 is the
/// block, the rest are the handlers in source order.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct CxxTryStmt {
    try_loc: SourceLocation,
    stmts: Trailing<StmtId>,
}

impl CxxTryStmt {
    pub fn create(try_loc: SourceLocation, try_block: StmtId, handlers: &[StmtId]) -> Self {
        let mut node = Self::create_empty(handlers.len());
        node.try_loc = try_loc;
        node.set_try_block(try_block);
        node.set_handlers(handlers);
        node
    }

    /// Shell with room for `num_handlers` handlers, filled later.
    pub fn create_empty(num_handlers: usize) -> Self {
        CxxTryStmt {
            try_loc: SourceLocation::INVALID,
            stmts: Trailing::with_sections(&[1, num_handlers]),
        }
    }

    pub fn try_block(&self) -> StmtId {
        self.stmts.section(TRY_BLOCK)[0]
    }

    pub fn set_try_block(&mut self, try_block: StmtId) {
        self.stmts.section_mut(TRY_BLOCK)[0] = try_block;
    }

    pub fn handlers(&self) -> &[StmtId] {
        self.stmts.section(HANDLERS)
    }

    #[track_caller]
    pub fn set_handlers(&mut self, handlers: &[StmtId]) {
        self.stmts.set_section(HANDLERS, handlers);
    }

    pub fn num_handlers(&self) -> usize {
        self.stmts.section_len(HANDLERS)
    }

    #[track_caller]
    pub fn handler(&self, index: usize) -> StmtId {
        self.handlers()[index]
    }

    pub fn set_try_loc(&mut self, try_loc: SourceLocation) {
        self.try_loc = try_loc;
    }

    pub fn try_loc(&self) -> SourceLocation {
        self.try_loc
    }

    /// Last statement of the construct: the final handler, or the block
    /// when there are none.
    fn last_stmt(&self) -> StmtId {
        self.stmts
            .as_slice()
            .last()
            .copied()
            .unwrap_or(StmtId::INVALID)
    }
}

impl StmtNode for CxxTryStmt {
    const CUSTOM_SOURCE_RANGE: bool = true;

    fn children(&self) -> Children {
        self.stmts.as_slice().iter().map(|&id| some(id)).collect()
    }

    fn loc_start(&self, _cx: &Locator<'_>) -> SourceLocation {
        self.try_loc
    }

    fn loc_end(&self, cx: &Locator<'_>) -> SourceLocation {
        self.source_range(cx).end
    }

    fn source_range(&self, cx: &Locator<'_>) -> SourceRange {
        SourceRange::new(self.try_loc, cx.stmt_end(self.last_stmt()))
    }

    fn trailing_arrays(&self) -> TrailingArrays {
        // Block and handlers are one contiguous array.
        smallvec::smallvec![crate::ArrayLayout::of::<StmtId>(self.stmts.total_len())]
    }
}

/// `for (decl : range) body`, kept together with its desugaring.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct CxxForRangeStmt {
    for_loc: SourceLocation,
    colon_loc: SourceLocation,
    rparen_loc: SourceLocation,
    /// `auto &&__range = range-init;`
    range_stmt: StmtId,
    /// `auto __begin = ..., __end = ...;`
    begin_end_stmt: Option<StmtId>,
    cond: Option<ExprId>,
    inc: Option<ExprId>,
    /// `decl = *__begin;`
    loop_var_stmt: StmtId,
    body: StmtId,
}

impl CxxForRangeStmt {
    pub fn new(
        range_stmt: StmtId,
        begin_end_stmt: Option<StmtId>,
        cond: Option<ExprId>,
        inc: Option<ExprId>,
        loop_var_stmt: StmtId,
        body: StmtId,
        for_loc: SourceLocation,
        colon_loc: SourceLocation,
        rparen_loc: SourceLocation,
    ) -> Self {
        CxxForRangeStmt {
            for_loc,
            colon_loc,
            rparen_loc,
            range_stmt,
            begin_end_stmt,
            cond,
            inc,
            loop_var_stmt,
            body,
        }
    }

    pub fn range_stmt(&self) -> StmtId {
        self.range_stmt
    }

    pub fn begin_end_stmt(&self) -> Option<StmtId> {
        self.begin_end_stmt
    }

    pub fn cond(&self) -> Option<ExprId> {
        self.cond
    }

    pub fn inc(&self) -> Option<ExprId> {
        self.inc
    }

    pub fn loop_var_stmt(&self) -> StmtId {
        self.loop_var_stmt
    }

    pub fn body(&self) -> StmtId {
        self.body
    }

    pub fn set_body(&mut self, body: StmtId) {
        self.body = body;
    }

    pub fn colon_loc(&self) -> SourceLocation {
        self.colon_loc
    }

    pub fn rparen_loc(&self) -> SourceLocation {
        self.rparen_loc
    }

    /// The user's loop variable.
    pub fn loop_variable(&self, arena: &StmtArena<'_>) -> Option<DeclId> {
        arena
            .get_as::<super::DeclStmt>(self.loop_var_stmt)
            .single_decl()
    }

    /// The range expression, as the initializer of the `__range` variable.
    pub fn range_init(&self, arena: &StmtArena<'_>, decls: &dyn DeclLookup) -> Option<ExprId> {
        let range_var = arena
            .get_as::<super::DeclStmt>(self.range_stmt)
            .single_decl()?;
        decls.var_init(range_var)
    }
}

impl StmtNode for CxxForRangeStmt {
    fn children(&self) -> Children {
        smallvec::smallvec![
            some(self.range_stmt),
            slot(self.begin_end_stmt),
            slot(self.cond),
            slot(self.inc),
            some(self.loop_var_stmt),
            some(self.body),
        ]
    }

    fn loc_start(&self, _cx: &Locator<'_>) -> SourceLocation {
        self.for_loc
    }

    fn loc_end(&self, cx: &Locator<'_>) -> SourceLocation {
        cx.stmt_end(self.body)
    }
}

/// `__except (filter) { ... }`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct SehExceptStmt {
    loc: SourceLocation,
    filter_expr: ExprId,
    block: StmtId,
}

impl SehExceptStmt {
    pub fn create(except_loc: SourceLocation, filter_expr: ExprId, block: StmtId) -> Self {
        SehExceptStmt {
            loc: except_loc,
            filter_expr,
            block,
        }
    }

    pub fn filter_expr(&self) -> ExprId {
        self.filter_expr
    }

    pub fn block(&self) -> StmtId {
        self.block
    }

    pub fn except_loc(&self) -> SourceLocation {
        self.loc
    }
}

impl StmtNode for SehExceptStmt {
    fn children(&self) -> Children {
        smallvec::smallvec![some(self.filter_expr), some(self.block)]
    }

    fn loc_start(&self, _cx: &Locator<'_>) -> SourceLocation {
        self.loc
    }

    fn loc_end(&self, cx: &Locator<'_>) -> SourceLocation {
        cx.stmt_end(self.block)
    }
}

/// `__finally { ... }`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct SehFinallyStmt {
    loc: SourceLocation,
    block: StmtId,
}

impl SehFinallyStmt {
    pub fn create(finally_loc: SourceLocation, block: StmtId) -> Self {
        SehFinallyStmt {
            loc: finally_loc,
            block,
        }
    }

    pub fn block(&self) -> StmtId {
        self.block
    }

    pub fn finally_loc(&self) -> SourceLocation {
        self.loc
    }
}

impl StmtNode for SehFinallyStmt {
    fn children(&self) -> Children {
        smallvec::smallvec![some(self.block)]
    }

    fn loc_start(&self, _cx: &Locator<'_>) -> SourceLocation {
        self.loc
    }

    fn loc_end(&self, cx: &Locator<'_>) -> SourceLocation {
        cx.stmt_end(self.block)
    }
}

/// `__try { ... }` followed by one `__except` or `__finally` handler.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct SehTryStmt {
    /// Spelled `try` in C++ mode rather than `__try`.
    is_cxx_try: bool,
    try_loc: SourceLocation,
    try_block: StmtId,
    handler: StmtId,
}

impl SehTryStmt {
    pub fn create(
        is_cxx_try: bool,
        try_loc: SourceLocation,
        try_block: StmtId,
        handler: StmtId,
    ) -> Self {
        SehTryStmt {
            is_cxx_try,
            try_loc,
            try_block,
            handler,
        }
    }

    pub fn is_cxx_try(&self) -> bool {
        self.is_cxx_try
    }

    pub fn try_block(&self) -> StmtId {
        self.try_block
    }

    pub fn handler(&self) -> StmtId {
        self.handler
    }

    pub fn try_loc(&self) -> SourceLocation {
        self.try_loc
    }

    /// The handler, if it is a filter (`__except`).
    pub fn except_handler<'a>(&self, arena: &'a StmtArena<'_>) -> Option<&'a SehExceptStmt> {
        arena.dyn_cast::<SehExceptStmt>(self.handler)
    }

    /// The handler, if it is a cleanup (`__finally`).
    pub fn finally_handler<'a>(&self, arena: &'a StmtArena<'_>) -> Option<&'a SehFinallyStmt> {
        arena.dyn_cast::<SehFinallyStmt>(self.handler)
    }
}

impl StmtNode for SehTryStmt {
    const CUSTOM_SOURCE_RANGE: bool = true;

    fn children(&self) -> Children {
        smallvec::smallvec![some(self.try_block), some(self.handler)]
    }

    fn loc_start(&self, _cx: &Locator<'_>) -> SourceLocation {
        self.try_loc
    }

    fn loc_end(&self, cx: &Locator<'_>) -> SourceLocation {
        self.source_range(cx).end
    }

    fn source_range(&self, cx: &Locator<'_>) -> SourceRange {
        SourceRange::new(self.try_loc, cx.stmt_end(self.handler))
    }
}
