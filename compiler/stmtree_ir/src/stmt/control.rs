//! Blocks, labels and control flow.

use super::{slot, some, Children, StmtNode};
use crate::{
    AttrId, DeclId, DeclLookup, ExprId, ExprLookup, LabelId, Locator, Name, SourceLocation,
    StmtId, Trailing, TrailingArrays,
};

/// `;`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct NullStmt {
    semi_loc: SourceLocation,
    /// The `;` follows a macro expansion that produced no tokens.
    has_leading_empty_macro: bool,
}

impl NullStmt {
    pub fn new(semi_loc: SourceLocation) -> Self {
        NullStmt {
            semi_loc,
            has_leading_empty_macro: false,
        }
    }

    #[must_use]
    pub fn with_leading_empty_macro(mut self) -> Self {
        self.has_leading_empty_macro = true;
        self
    }

    pub fn semi_loc(&self) -> SourceLocation {
        self.semi_loc
    }

    pub fn has_leading_empty_macro(&self) -> bool {
        self.has_leading_empty_macro
    }
}

impl StmtNode for NullStmt {
    fn children(&self) -> Children {
        Children::new()
    }

    fn loc_start(&self, _cx: &Locator<'_>) -> SourceLocation {
        self.semi_loc
    }

    fn loc_end(&self, _cx: &Locator<'_>) -> SourceLocation {
        self.semi_loc
    }
}

/// `{ stmt* }`
///
/// An empty block stores no array at all.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct CompoundStmt {
    body: Option<Trailing<StmtId>>,
    lbrace_loc: SourceLocation,
    rbrace_loc: SourceLocation,
}

impl CompoundStmt {
    pub fn new(stmts: &[StmtId], lbrace_loc: SourceLocation, rbrace_loc: SourceLocation) -> Self {
        CompoundStmt {
            body: Self::copy_body(stmts),
            lbrace_loc,
            rbrace_loc,
        }
    }

    /// An empty block, as produced for `{}`.
    pub fn empty(lbrace_loc: SourceLocation, rbrace_loc: SourceLocation) -> Self {
        Self::new(&[], lbrace_loc, rbrace_loc)
    }

    fn copy_body(stmts: &[StmtId]) -> Option<Trailing<StmtId>> {
        (!stmts.is_empty()).then(|| Trailing::from_slice(stmts))
    }

    /// Replace the body. The previous array is released.
    pub fn set_stmts(&mut self, stmts: &[StmtId]) {
        self.body = Self::copy_body(stmts);
    }

    pub fn body(&self) -> &[StmtId] {
        self.body.as_ref().map_or(&[], Trailing::as_slice)
    }

    /// The stored array, `None` for an empty block.
    pub fn body_storage(&self) -> Option<&[StmtId]> {
        self.body.as_ref().map(Trailing::as_slice)
    }

    pub fn size(&self) -> usize {
        self.body().len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_none()
    }

    pub fn body_front(&self) -> Option<StmtId> {
        self.body().first().copied()
    }

    pub fn body_back(&self) -> Option<StmtId> {
        self.body().last().copied()
    }

    pub fn lbrace_loc(&self) -> SourceLocation {
        self.lbrace_loc
    }

    pub fn rbrace_loc(&self) -> SourceLocation {
        self.rbrace_loc
    }
}

impl StmtNode for CompoundStmt {
    fn children(&self) -> Children {
        self.body().iter().map(|&id| some(id)).collect()
    }

    fn loc_start(&self, _cx: &Locator<'_>) -> SourceLocation {
        self.lbrace_loc
    }

    fn loc_end(&self, _cx: &Locator<'_>) -> SourceLocation {
        self.rbrace_loc
    }

    fn trailing_arrays(&self) -> TrailingArrays {
        self.body
            .as_ref()
            .map(Trailing::array_layouts)
            .unwrap_or_default()
    }
}

/// `ident: stmt`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct LabelStmt {
    ident_loc: SourceLocation,
    label: LabelId,
    sub_stmt: StmtId,
}

impl LabelStmt {
    pub fn new(ident_loc: SourceLocation, label: LabelId, sub_stmt: StmtId) -> Self {
        LabelStmt {
            ident_loc,
            label,
            sub_stmt,
        }
    }

    pub fn label(&self) -> LabelId {
        self.label
    }

    pub fn name(&self, decls: &dyn DeclLookup) -> Name {
        decls.label_name(self.label)
    }

    pub fn sub_stmt(&self) -> StmtId {
        self.sub_stmt
    }

    pub fn set_sub_stmt(&mut self, sub_stmt: StmtId) {
        self.sub_stmt = sub_stmt;
    }

    pub fn ident_loc(&self) -> SourceLocation {
        self.ident_loc
    }
}

impl StmtNode for LabelStmt {
    fn children(&self) -> Children {
        smallvec::smallvec![some(self.sub_stmt)]
    }

    fn loc_start(&self, _cx: &Locator<'_>) -> SourceLocation {
        self.ident_loc
    }

    fn loc_end(&self, cx: &Locator<'_>) -> SourceLocation {
        cx.stmt_end(self.sub_stmt)
    }
}

/// `[[attr, ...]] stmt`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct AttributedStmt {
    attr_loc: SourceLocation,
    attrs: Trailing<AttrId>,
    sub_stmt: StmtId,
}

impl AttributedStmt {
    /// # Panics
    /// Panics if `attrs` is empty.
    #[track_caller]
    pub fn create(attr_loc: SourceLocation, attrs: &[AttrId], sub_stmt: StmtId) -> Self {
        assert!(!attrs.is_empty(), "there must be at least one attribute");
        AttributedStmt {
            attr_loc,
            attrs: Trailing::from_slice(attrs),
            sub_stmt,
        }
    }

    /// Shell with `num_attrs` unset attributes, to be filled by a deserializer.
    ///
    /// # Panics
    /// Panics if `num_attrs` is zero.
    #[track_caller]
    pub fn create_empty(num_attrs: usize) -> Self {
        assert!(num_attrs > 0, "NumAttrs should be greater than zero");
        AttributedStmt {
            attr_loc: SourceLocation::INVALID,
            attrs: Trailing::with_sections(&[num_attrs]),
            sub_stmt: StmtId::INVALID,
        }
    }

    pub fn attrs(&self) -> &[AttrId] {
        self.attrs.section(0)
    }

    #[track_caller]
    pub fn set_attrs(&mut self, attrs: &[AttrId]) {
        self.attrs.set_section(0, attrs);
    }

    pub fn sub_stmt(&self) -> StmtId {
        self.sub_stmt
    }

    pub fn set_sub_stmt(&mut self, sub_stmt: StmtId) {
        self.sub_stmt = sub_stmt;
    }

    pub fn set_attr_loc(&mut self, attr_loc: SourceLocation) {
        self.attr_loc = attr_loc;
    }

    pub fn attr_loc(&self) -> SourceLocation {
        self.attr_loc
    }
}

impl StmtNode for AttributedStmt {
    fn children(&self) -> Children {
        smallvec::smallvec![some(self.sub_stmt)]
    }

    fn loc_start(&self, _cx: &Locator<'_>) -> SourceLocation {
        self.attr_loc
    }

    fn loc_end(&self, cx: &Locator<'_>) -> SourceLocation {
        cx.stmt_end(self.sub_stmt)
    }

    fn trailing_arrays(&self) -> TrailingArrays {
        self.attrs.array_layouts()
    }
}

/// `if (var-or-cond) then else else_`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct IfStmt {
    if_loc: SourceLocation,
    else_loc: SourceLocation,
    cond_var: Option<StmtId>,
    cond: ExprId,
    then: StmtId,
    else_: Option<StmtId>,
}

impl IfStmt {
    pub fn new(
        if_loc: SourceLocation,
        cond: ExprId,
        then: StmtId,
        else_loc: SourceLocation,
        else_: Option<StmtId>,
    ) -> Self {
        IfStmt {
            if_loc,
            else_loc,
            cond_var: None,
            cond,
            then,
            else_,
        }
    }

    pub fn cond(&self) -> ExprId {
        self.cond
    }

    pub fn then(&self) -> StmtId {
        self.then
    }

    pub fn else_(&self) -> Option<StmtId> {
        self.else_
    }

    pub fn set_else(&mut self, else_loc: SourceLocation, else_: Option<StmtId>) {
        self.else_loc = else_loc;
        self.else_ = else_;
    }

    pub fn if_loc(&self) -> SourceLocation {
        self.if_loc
    }

    pub fn else_loc(&self) -> SourceLocation {
        self.else_loc
    }

    /// The declaration statement wrapping the condition variable.
    pub fn condition_variable_stmt(&self) -> Option<StmtId> {
        self.cond_var
    }

    pub(crate) fn set_condition_variable_stmt(&mut self, wrapper: Option<StmtId>) {
        self.cond_var = wrapper;
    }
}

impl StmtNode for IfStmt {
    fn children(&self) -> Children {
        smallvec::smallvec![
            slot(self.cond_var),
            some(self.cond),
            some(self.then),
            slot(self.else_),
        ]
    }

    fn loc_start(&self, _cx: &Locator<'_>) -> SourceLocation {
        self.if_loc
    }

    fn loc_end(&self, cx: &Locator<'_>) -> SourceLocation {
        cx.stmt_end(self.else_.unwrap_or(self.then))
    }
}

/// `switch (var-or-cond) body`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct SwitchStmt {
    switch_loc: SourceLocation,
    cond_var: Option<StmtId>,
    cond: ExprId,
    body: Option<StmtId>,
    first_case: Option<StmtId>,
    /// Every enumerator of the condition's enum type has a case label.
    all_enum_cases_covered: bool,
}

impl SwitchStmt {
    /// A switch whose body is attached later with `set_body`.
    pub fn new(switch_loc: SourceLocation, cond: ExprId) -> Self {
        SwitchStmt {
            switch_loc,
            cond_var: None,
            cond,
            body: None,
            first_case: None,
            all_enum_cases_covered: false,
        }
    }

    pub fn cond(&self) -> ExprId {
        self.cond
    }

    pub fn body(&self) -> Option<StmtId> {
        self.body
    }

    pub fn set_body(&mut self, body: StmtId, switch_loc: SourceLocation) {
        self.body = Some(body);
        self.switch_loc = switch_loc;
    }

    pub fn switch_loc(&self) -> SourceLocation {
        self.switch_loc
    }

    /// Head of the case list. Walk it with `StmtArena::switch_cases`.
    pub fn first_switch_case(&self) -> Option<StmtId> {
        self.first_case
    }

    pub(crate) fn set_first_switch_case(&mut self, case: Option<StmtId>) {
        self.first_case = case;
    }

    pub fn set_all_enum_cases_covered(&mut self) {
        self.all_enum_cases_covered = true;
    }

    pub fn is_all_enum_cases_covered(&self) -> bool {
        self.all_enum_cases_covered
    }

    pub fn condition_variable_stmt(&self) -> Option<StmtId> {
        self.cond_var
    }

    pub(crate) fn set_condition_variable_stmt(&mut self, wrapper: Option<StmtId>) {
        self.cond_var = wrapper;
    }
}

impl StmtNode for SwitchStmt {
    fn children(&self) -> Children {
        smallvec::smallvec![slot(self.cond_var), some(self.cond), slot(self.body)]
    }

    fn loc_start(&self, _cx: &Locator<'_>) -> SourceLocation {
        self.switch_loc
    }

    fn loc_end(&self, cx: &Locator<'_>) -> SourceLocation {
        match self.body {
            Some(body) => cx.stmt_end(body),
            None => cx.expr_end(self.cond),
        }
    }
}

/// `while (var-or-cond) body`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct WhileStmt {
    while_loc: SourceLocation,
    cond_var: Option<StmtId>,
    cond: ExprId,
    body: StmtId,
}

impl WhileStmt {
    pub fn new(while_loc: SourceLocation, cond: ExprId, body: StmtId) -> Self {
        WhileStmt {
            while_loc,
            cond_var: None,
            cond,
            body,
        }
    }

    pub fn cond(&self) -> ExprId {
        self.cond
    }

    pub fn body(&self) -> StmtId {
        self.body
    }

    pub fn while_loc(&self) -> SourceLocation {
        self.while_loc
    }

    pub fn condition_variable_stmt(&self) -> Option<StmtId> {
        self.cond_var
    }

    pub(crate) fn set_condition_variable_stmt(&mut self, wrapper: Option<StmtId>) {
        self.cond_var = wrapper;
    }
}

impl StmtNode for WhileStmt {
    fn children(&self) -> Children {
        smallvec::smallvec![slot(self.cond_var), some(self.cond), some(self.body)]
    }

    fn loc_start(&self, _cx: &Locator<'_>) -> SourceLocation {
        self.while_loc
    }

    fn loc_end(&self, cx: &Locator<'_>) -> SourceLocation {
        cx.stmt_end(self.body)
    }
}

/// `do body while (cond);`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct DoStmt {
    do_loc: SourceLocation,
    while_loc: SourceLocation,
    rparen_loc: SourceLocation,
    body: StmtId,
    cond: ExprId,
}

impl DoStmt {
    pub fn new(
        body: StmtId,
        cond: ExprId,
        do_loc: SourceLocation,
        while_loc: SourceLocation,
        rparen_loc: SourceLocation,
    ) -> Self {
        DoStmt {
            do_loc,
            while_loc,
            rparen_loc,
            body,
            cond,
        }
    }

    pub fn body(&self) -> StmtId {
        self.body
    }

    pub fn cond(&self) -> ExprId {
        self.cond
    }

    pub fn while_loc(&self) -> SourceLocation {
        self.while_loc
    }
}

impl StmtNode for DoStmt {
    fn children(&self) -> Children {
        smallvec::smallvec![some(self.body), some(self.cond)]
    }

    fn loc_start(&self, _cx: &Locator<'_>) -> SourceLocation {
        self.do_loc
    }

    fn loc_end(&self, _cx: &Locator<'_>) -> SourceLocation {
        self.rparen_loc
    }
}

/// `for (init; var-or-cond; inc) body`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ForStmt {
    for_loc: SourceLocation,
    lparen_loc: SourceLocation,
    rparen_loc: SourceLocation,
    init: Option<StmtId>,
    cond_var: Option<StmtId>,
    cond: Option<ExprId>,
    inc: Option<ExprId>,
    body: StmtId,
}

impl ForStmt {
    pub fn new(
        for_loc: SourceLocation,
        init: Option<StmtId>,
        cond: Option<ExprId>,
        inc: Option<ExprId>,
        body: StmtId,
        lparen_loc: SourceLocation,
        rparen_loc: SourceLocation,
    ) -> Self {
        ForStmt {
            for_loc,
            lparen_loc,
            rparen_loc,
            init,
            cond_var: None,
            cond,
            inc,
            body,
        }
    }

    pub fn init(&self) -> Option<StmtId> {
        self.init
    }

    pub fn cond(&self) -> Option<ExprId> {
        self.cond
    }

    pub fn inc(&self) -> Option<ExprId> {
        self.inc
    }

    pub fn body(&self) -> StmtId {
        self.body
    }

    pub fn lparen_loc(&self) -> SourceLocation {
        self.lparen_loc
    }

    pub fn rparen_loc(&self) -> SourceLocation {
        self.rparen_loc
    }

    pub fn condition_variable_stmt(&self) -> Option<StmtId> {
        self.cond_var
    }

    pub(crate) fn set_condition_variable_stmt(&mut self, wrapper: Option<StmtId>) {
        self.cond_var = wrapper;
    }
}

impl StmtNode for ForStmt {
    fn children(&self) -> Children {
        smallvec::smallvec![
            slot(self.init),
            slot(self.cond_var),
            slot(self.cond),
            slot(self.inc),
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

/// `goto label;`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct GotoStmt {
    label: LabelId,
    goto_loc: SourceLocation,
    label_loc: SourceLocation,
}

impl GotoStmt {
    pub fn new(label: LabelId, goto_loc: SourceLocation, label_loc: SourceLocation) -> Self {
        GotoStmt {
            label,
            goto_loc,
            label_loc,
        }
    }

    pub fn label(&self) -> LabelId {
        self.label
    }
}

impl StmtNode for GotoStmt {
    fn children(&self) -> Children {
        Children::new()
    }

    fn loc_start(&self, _cx: &Locator<'_>) -> SourceLocation {
        self.goto_loc
    }

    fn loc_end(&self, _cx: &Locator<'_>) -> SourceLocation {
        self.label_loc
    }
}

/// `goto *target;`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct IndirectGotoStmt {
    goto_loc: SourceLocation,
    star_loc: SourceLocation,
    target: ExprId,
}

impl IndirectGotoStmt {
    pub fn new(goto_loc: SourceLocation, star_loc: SourceLocation, target: ExprId) -> Self {
        IndirectGotoStmt {
            goto_loc,
            star_loc,
            target,
        }
    }

    pub fn target(&self) -> ExprId {
        self.target
    }

    pub fn star_loc(&self) -> SourceLocation {
        self.star_loc
    }

    /// The label when the target is a constant `&&label`, looking through
    /// parentheses and implicit casts.
    pub fn constant_target(&self, exprs: &dyn ExprLookup) -> Option<LabelId> {
        exprs.address_of_label(exprs.ignore_paren_implicit_casts(self.target))
    }
}

impl StmtNode for IndirectGotoStmt {
    fn children(&self) -> Children {
        smallvec::smallvec![some(self.target)]
    }

    fn loc_start(&self, _cx: &Locator<'_>) -> SourceLocation {
        self.goto_loc
    }

    fn loc_end(&self, cx: &Locator<'_>) -> SourceLocation {
        cx.expr_end(self.target)
    }
}

/// `continue;`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ContinueStmt {
    continue_loc: SourceLocation,
}

impl ContinueStmt {
    pub fn new(continue_loc: SourceLocation) -> Self {
        ContinueStmt { continue_loc }
    }
}

impl StmtNode for ContinueStmt {
    fn children(&self) -> Children {
        Children::new()
    }

    fn loc_start(&self, _cx: &Locator<'_>) -> SourceLocation {
        self.continue_loc
    }

    fn loc_end(&self, _cx: &Locator<'_>) -> SourceLocation {
        self.continue_loc
    }
}

/// `break;`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct BreakStmt {
    break_loc: SourceLocation,
}

impl BreakStmt {
    pub fn new(break_loc: SourceLocation) -> Self {
        BreakStmt { break_loc }
    }
}

impl StmtNode for BreakStmt {
    fn children(&self) -> Children {
        Children::new()
    }

    fn loc_start(&self, _cx: &Locator<'_>) -> SourceLocation {
        self.break_loc
    }

    fn loc_end(&self, _cx: &Locator<'_>) -> SourceLocation {
        self.break_loc
    }
}

/// `return value;`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ReturnStmt {
    ret_loc: SourceLocation,
    value: Option<ExprId>,
    /// Local variable eligible for the named return value optimization.
    nrvo_candidate: Option<DeclId>,
}

impl ReturnStmt {
    pub fn new(ret_loc: SourceLocation, value: Option<ExprId>) -> Self {
        ReturnStmt {
            ret_loc,
            value,
            nrvo_candidate: None,
        }
    }

    pub fn value(&self) -> Option<ExprId> {
        self.value
    }

    pub fn nrvo_candidate(&self) -> Option<DeclId> {
        self.nrvo_candidate
    }

    pub fn set_nrvo_candidate(&mut self, var: Option<DeclId>) {
        self.nrvo_candidate = var;
    }
}

impl StmtNode for ReturnStmt {
    fn children(&self) -> Children {
        // A bare `return;` has no child slot at all.
        self.value.map(some).into_iter().collect()
    }

    fn loc_start(&self, _cx: &Locator<'_>) -> SourceLocation {
        self.ret_loc
    }

    fn loc_end(&self, cx: &Locator<'_>) -> SourceLocation {
        self.value.map_or(self.ret_loc, |value| cx.expr_end(value))
    }
}

/// A declaration in statement position, one or more declarators.
///
/// The initializers of the declared variables are the children. They are
/// read through the declaration lookup once, when the statement is built.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct DeclStmt {
    decls: Trailing<DeclId>,
    inits: Trailing<ExprId>,
    start_loc: SourceLocation,
    end_loc: SourceLocation,
}

impl DeclStmt {
    pub fn new(
        decls: &[DeclId],
        lookup: &dyn DeclLookup,
        start_loc: SourceLocation,
        end_loc: SourceLocation,
    ) -> Self {
        let inits: Vec<ExprId> = decls
            .iter()
            .filter_map(|&decl| lookup.var_init(decl))
            .collect();
        DeclStmt {
            decls: Trailing::from_slice(decls),
            inits: Trailing::from_slice(&inits),
            start_loc,
            end_loc,
        }
    }

    pub fn single(
        decl: DeclId,
        lookup: &dyn DeclLookup,
        start_loc: SourceLocation,
        end_loc: SourceLocation,
    ) -> Self {
        Self::new(&[decl], lookup, start_loc, end_loc)
    }

    pub fn decls(&self) -> &[DeclId] {
        self.decls.section(0)
    }

    /// Initializers in declarator order; declarators without one are skipped.
    pub fn inits(&self) -> &[ExprId] {
        self.inits.section(0)
    }

    pub fn is_single_decl(&self) -> bool {
        self.decls().len() == 1
    }

    pub fn single_decl(&self) -> Option<DeclId> {
        match self.decls() {
            [decl] => Some(*decl),
            _ => None,
        }
    }
}

impl StmtNode for DeclStmt {
    fn children(&self) -> Children {
        self.inits().iter().map(|&init| some(init)).collect()
    }

    fn loc_start(&self, _cx: &Locator<'_>) -> SourceLocation {
        self.start_loc
    }

    fn loc_end(&self, _cx: &Locator<'_>) -> SourceLocation {
        self.end_loc
    }

    fn trailing_arrays(&self) -> TrailingArrays {
        let mut arrays = self.decls.array_layouts();
        arrays.extend(self.inits.array_layouts());
        arrays
    }
}

/// `case lhs: sub` or the range form `case lhs ... rhs: sub`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct CaseStmt {
    case_loc: SourceLocation,
    ellipsis_loc: SourceLocation,
    colon_loc: SourceLocation,
    lhs: ExprId,
    rhs: Option<ExprId>,
    sub_stmt: Option<StmtId>,
    next_switch_case: Option<StmtId>,
}

impl CaseStmt {
    pub fn new(
        lhs: ExprId,
        rhs: Option<ExprId>,
        case_loc: SourceLocation,
        ellipsis_loc: SourceLocation,
        colon_loc: SourceLocation,
    ) -> Self {
        CaseStmt {
            case_loc,
            ellipsis_loc,
            colon_loc,
            lhs,
            rhs,
            sub_stmt: None,
            next_switch_case: None,
        }
    }

    pub fn lhs(&self) -> ExprId {
        self.lhs
    }

    pub fn rhs(&self) -> Option<ExprId> {
        self.rhs
    }

    pub fn sub_stmt(&self) -> Option<StmtId> {
        self.sub_stmt
    }

    pub fn set_sub_stmt(&mut self, sub_stmt: StmtId) {
        self.sub_stmt = Some(sub_stmt);
    }

    pub fn ellipsis_loc(&self) -> SourceLocation {
        self.ellipsis_loc
    }

    pub fn colon_loc(&self) -> SourceLocation {
        self.colon_loc
    }

    pub fn next_switch_case(&self) -> Option<StmtId> {
        self.next_switch_case
    }

    pub(crate) fn set_next_switch_case(&mut self, next: Option<StmtId>) {
        self.next_switch_case = next;
    }
}

impl StmtNode for CaseStmt {
    fn children(&self) -> Children {
        smallvec::smallvec![some(self.lhs), slot(self.rhs), slot(self.sub_stmt)]
    }

    fn loc_start(&self, _cx: &Locator<'_>) -> SourceLocation {
        self.case_loc
    }

    fn loc_end(&self, cx: &Locator<'_>) -> SourceLocation {
        // `case 1: case 2: stmt` nests; the chain ends at the last statement.
        let innermost = cx.innermost_case(self);
        innermost
            .sub_stmt
            .map_or(innermost.colon_loc, |sub| cx.stmt_end(sub))
    }
}

/// `default: sub`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct DefaultStmt {
    default_loc: SourceLocation,
    colon_loc: SourceLocation,
    sub_stmt: StmtId,
    next_switch_case: Option<StmtId>,
}

impl DefaultStmt {
    pub fn new(default_loc: SourceLocation, colon_loc: SourceLocation, sub_stmt: StmtId) -> Self {
        DefaultStmt {
            default_loc,
            colon_loc,
            sub_stmt,
            next_switch_case: None,
        }
    }

    pub fn sub_stmt(&self) -> StmtId {
        self.sub_stmt
    }

    pub fn colon_loc(&self) -> SourceLocation {
        self.colon_loc
    }

    pub fn next_switch_case(&self) -> Option<StmtId> {
        self.next_switch_case
    }

    pub(crate) fn set_next_switch_case(&mut self, next: Option<StmtId>) {
        self.next_switch_case = next;
    }
}

impl StmtNode for DefaultStmt {
    fn children(&self) -> Children {
        smallvec::smallvec![some(self.sub_stmt)]
    }

    fn loc_start(&self, _cx: &Locator<'_>) -> SourceLocation {
        self.default_loc
    }

    fn loc_end(&self, cx: &Locator<'_>) -> SourceLocation {
        cx.stmt_end(self.sub_stmt)
    }
}
