//! Objective-C `@try`/`@catch`/`@finally` and fast enumeration.

use super::{some, Children, StmtNode};
use crate::{
    ArrayLayout, ChildId, DeclId, ExprId, Locator, SourceLocation, SourceRange, StmtId, Trailing,
    TrailingArrays,
};

/// `@catch (param) { ... }`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ObjcAtCatchStmt {
    at_catch_loc: SourceLocation,
    rparen_loc: SourceLocation,
    /// `None` for `@catch (...)`.
    catch_param: Option<DeclId>,
    body: StmtId,
}

impl ObjcAtCatchStmt {
    pub fn new(
        at_catch_loc: SourceLocation,
        rparen_loc: SourceLocation,
        catch_param: Option<DeclId>,
        body: StmtId,
    ) -> Self {
        ObjcAtCatchStmt {
            at_catch_loc,
            rparen_loc,
            catch_param,
            body,
        }
    }

    pub fn catch_param(&self) -> Option<DeclId> {
        self.catch_param
    }

    pub fn has_ellipsis(&self) -> bool {
        self.catch_param.is_none()
    }

    pub fn body(&self) -> StmtId {
        self.body
    }

    pub fn at_catch_loc(&self) -> SourceLocation {
        self.at_catch_loc
    }

    pub fn rparen_loc(&self) -> SourceLocation {
        self.rparen_loc
    }
}

impl StmtNode for ObjcAtCatchStmt {
    fn children(&self) -> Children {
        smallvec::smallvec![some(self.body)]
    }

    fn loc_start(&self, _cx: &Locator<'_>) -> SourceLocation {
        self.at_catch_loc
    }

    fn loc_end(&self, cx: &Locator<'_>) -> SourceLocation {
        cx.stmt_end(self.body)
    }
}

/// `@finally { ... }`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ObjcAtFinallyStmt {
    at_finally_loc: SourceLocation,
    body: StmtId,
}

impl ObjcAtFinallyStmt {
    pub fn new(at_finally_loc: SourceLocation, body: StmtId) -> Self {
        ObjcAtFinallyStmt {
            at_finally_loc,
            body,
        }
    }

    pub fn body(&self) -> StmtId {
        self.body
    }

    pub fn at_finally_loc(&self) -> SourceLocation {
        self.at_finally_loc
    }
}

impl StmtNode for ObjcAtFinallyStmt {
    fn children(&self) -> Children {
        smallvec::smallvec![some(self.body)]
    }

    fn loc_start(&self, _cx: &Locator<'_>) -> SourceLocation {
        self.at_finally_loc
    }

    fn loc_end(&self, cx: &Locator<'_>) -> SourceLocation {
        cx.stmt_end(self.body)
    }
}

const TRY_BODY: usize = 0;
const CATCHES: usize = 1;
const FINALLY: usize = 2;

/// `@try { ... } @catch ... @finally { ... }`
///
/// One trailing array holds the try body, the `@catch` statements and, when
/// present, the `@finally` statement. The finally section has one slot or
/// none.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ObjcAtTryStmt {
    at_try_loc: SourceLocation,
    stmts: Trailing<StmtId>,
}

impl ObjcAtTryStmt {
    pub fn create(
        at_try_loc: SourceLocation,
        try_body: StmtId,
        catch_stmts: &[StmtId],
        finally_stmt: Option<StmtId>,
    ) -> Self {
        let mut node = Self::create_empty(catch_stmts.len(), finally_stmt.is_some());
        node.at_try_loc = at_try_loc;
        node.set_try_body(try_body);
        node.set_catch_stmts(catch_stmts);
        if let Some(finally_stmt) = finally_stmt {
            node.set_finally_stmt(finally_stmt);
        }
        node
    }

    /// Shell with room for `num_catch_stmts` catches and an optional
    /// finally, filled later.
    pub fn create_empty(num_catch_stmts: usize, has_finally: bool) -> Self {
        ObjcAtTryStmt {
            at_try_loc: SourceLocation::INVALID,
            stmts: Trailing::with_sections(&[1, num_catch_stmts, usize::from(has_finally)]),
        }
    }

    pub fn at_try_loc(&self) -> SourceLocation {
        self.at_try_loc
    }

    pub fn set_at_try_loc(&mut self, loc: SourceLocation) {
        self.at_try_loc = loc;
    }

    pub fn try_body(&self) -> StmtId {
        self.stmts.section(TRY_BODY)[0]
    }

    pub fn set_try_body(&mut self, body: StmtId) {
        self.stmts.section_mut(TRY_BODY)[0] = body;
    }

    pub fn num_catch_stmts(&self) -> usize {
        self.stmts.section_len(CATCHES)
    }

    pub fn catch_stmts(&self) -> &[StmtId] {
        self.stmts.section(CATCHES)
    }

    #[track_caller]
    pub fn catch_stmt(&self, index: usize) -> StmtId {
        self.catch_stmts()[index]
    }

    #[track_caller]
    pub fn set_catch_stmt(&mut self, index: usize, stmt: StmtId) {
        self.stmts.section_mut(CATCHES)[index] = stmt;
    }

    #[track_caller]
    pub fn set_catch_stmts(&mut self, stmts: &[StmtId]) {
        self.stmts.set_section(CATCHES, stmts);
    }

    pub fn has_finally(&self) -> bool {
        self.stmts.section_len(FINALLY) == 1
    }

    pub fn finally_stmt(&self) -> Option<StmtId> {
        self.stmts.section(FINALLY).first().copied()
    }

    /// # Panics
    /// Panics if the node was created without a finally slot.
    #[track_caller]
    pub fn set_finally_stmt(&mut self, stmt: StmtId) {
        assert!(self.has_finally(), "@try does not have a @finally slot");
        self.stmts.section_mut(FINALLY)[0] = stmt;
    }

    /// Statement the construct ends with: the finally block, else the last
    /// catch, else the try body.
    fn last_stmt(&self) -> StmtId {
        self.finally_stmt()
            .or_else(|| self.catch_stmts().last().copied())
            .unwrap_or_else(|| self.try_body())
    }
}

impl StmtNode for ObjcAtTryStmt {
    const CUSTOM_SOURCE_RANGE: bool = true;

    fn children(&self) -> Children {
        self.stmts.as_slice().iter().map(|&id| some(id)).collect()
    }

    fn loc_start(&self, _cx: &Locator<'_>) -> SourceLocation {
        self.at_try_loc
    }

    fn loc_end(&self, cx: &Locator<'_>) -> SourceLocation {
        self.source_range(cx).end
    }

    fn source_range(&self, cx: &Locator<'_>) -> SourceRange {
        SourceRange::new(self.at_try_loc, cx.stmt_end(self.last_stmt()))
    }

    fn trailing_arrays(&self) -> TrailingArrays {
        smallvec::smallvec![ArrayLayout::of::<StmtId>(self.stmts.total_len())]
    }
}

/// `for (element in collection) body`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ObjcForCollectionStmt {
    for_loc: SourceLocation,
    rparen_loc: SourceLocation,
    /// A declaration statement or an lvalue expression.
    element: ChildId,
    collection: ExprId,
    body: StmtId,
}

impl ObjcForCollectionStmt {
    pub fn new(
        element: impl Into<ChildId>,
        collection: ExprId,
        body: StmtId,
        for_loc: SourceLocation,
        rparen_loc: SourceLocation,
    ) -> Self {
        ObjcForCollectionStmt {
            for_loc,
            rparen_loc,
            element: element.into(),
            collection,
            body,
        }
    }

    pub fn element(&self) -> ChildId {
        self.element
    }

    pub fn collection(&self) -> ExprId {
        self.collection
    }

    pub fn body(&self) -> StmtId {
        self.body
    }

    pub fn set_body(&mut self, body: StmtId) {
        self.body = body;
    }

    pub fn for_loc(&self) -> SourceLocation {
        self.for_loc
    }

    pub fn rparen_loc(&self) -> SourceLocation {
        self.rparen_loc
    }
}

impl StmtNode for ObjcForCollectionStmt {
    fn children(&self) -> Children {
        smallvec::smallvec![Some(self.element), some(self.collection), some(self.body)]
    }

    fn loc_start(&self, _cx: &Locator<'_>) -> SourceLocation {
        self.for_loc
    }

    fn loc_end(&self, cx: &Locator<'_>) -> SourceLocation {
        cx.stmt_end(self.body)
    }
}
