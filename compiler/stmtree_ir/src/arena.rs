//! Statement arena.
//!
//! `StmtArena` owns every statement and clause built for one compilation
//! unit. Nodes are never freed individually; ids stay valid for the
//! lifetime of the arena and the whole tree is released at once.

use std::fmt;

use crate::omp::OmpClause;
use crate::stmt::{CaseStmt, DeclStmt, Stmt, StmtClass, StmtVariant, SwitchStmt};
use crate::{
    allocation_size, Children, ClauseId, DeclId, DeclLookup, ExprLookup, KindRegistry,
    SourceLocation, SourceRange, StmtId,
};

/// Owner of the statements and clauses of one compilation unit.
///
/// When built with a `KindRegistry`, every allocation is reported to it so
/// construction statistics stay accurate.
pub struct StmtArena<'r> {
    stmts: Vec<Stmt>,
    clauses: Vec<OmpClause>,
    registry: Option<&'r KindRegistry>,
}

impl<'r> StmtArena<'r> {
    /// Create an empty arena without statistics.
    pub fn new() -> Self {
        StmtArena {
            stmts: Vec::new(),
            clauses: Vec::new(),
            registry: None,
        }
    }

    /// Create an arena that reports allocations to `registry`.
    pub fn with_registry(registry: &'r KindRegistry) -> Self {
        StmtArena {
            stmts: Vec::new(),
            clauses: Vec::new(),
            registry: Some(registry),
        }
    }

    /// Create an arena pre-allocated based on source length.
    ///
    /// Heuristic: about one statement per 40 bytes of source.
    pub fn with_capacity(source_len: usize) -> Self {
        StmtArena {
            stmts: Vec::with_capacity(source_len / 40),
            clauses: Vec::new(),
            registry: None,
        }
    }

    pub fn registry(&self) -> Option<&'r KindRegistry> {
        self.registry
    }

    /// Allocate a statement, returning its id.
    pub fn alloc(&mut self, stmt: impl Into<Stmt>) -> StmtId {
        let stmt = stmt.into();
        let class = stmt.class();
        if let Some(registry) = self.registry {
            registry.record_construction(class);
        }
        let id = StmtId::new(to_u32(self.stmts.len(), "statements"));
        tracing::trace!(?id, kind = class.name(), "allocated statement");
        self.stmts.push(stmt);
        id
    }

    /// Allocate a clause, returning its id.
    pub fn alloc_clause(&mut self, clause: impl Into<OmpClause>) -> ClauseId {
        let clause = clause.into();
        let id = ClauseId::new(to_u32(self.clauses.len(), "clauses"));
        tracing::trace!(?id, kind = clause.kind().name(), "allocated clause");
        self.clauses.push(clause);
        id
    }

    /// # Panics
    /// Panics if `id` was not allocated by this arena.
    #[track_caller]
    #[inline]
    pub fn get(&self, id: StmtId) -> &Stmt {
        match self.stmts.get(id.index()) {
            Some(stmt) => stmt,
            None => panic!("{id:?} is out of range for an arena of {} statements", self.stmts.len()),
        }
    }

    #[track_caller]
    #[inline]
    pub fn get_mut(&mut self, id: StmtId) -> &mut Stmt {
        let len = self.stmts.len();
        match self.stmts.get_mut(id.index()) {
            Some(stmt) => stmt,
            None => panic!("{id:?} is out of range for an arena of {len} statements"),
        }
    }

    #[inline]
    pub fn class(&self, id: StmtId) -> StmtClass {
        self.get(id).class()
    }

    /// The node as kind `T`, or `None` when it is another kind.
    #[inline]
    pub fn dyn_cast<T: StmtVariant>(&self, id: StmtId) -> Option<&T> {
        T::cast(self.get(id))
    }

    /// The node as kind `T`.
    ///
    /// # Panics
    /// Panics when the node is another kind.
    #[track_caller]
    pub fn get_as<T: StmtVariant>(&self, id: StmtId) -> &T {
        let stmt = self.get(id);
        match T::cast(stmt) {
            Some(node) => node,
            None => panic!(
                "{id:?} is a {}, not a {}",
                stmt.class().name(),
                T::CLASS.name()
            ),
        }
    }

    #[track_caller]
    pub fn get_as_mut<T: StmtVariant>(&mut self, id: StmtId) -> &mut T {
        let stmt = self.get_mut(id);
        let class = stmt.class();
        match T::cast_mut(stmt) {
            Some(node) => node,
            None => panic!("{id:?} is a {}, not a {}", class.name(), T::CLASS.name()),
        }
    }

    #[track_caller]
    #[inline]
    pub fn clause(&self, id: ClauseId) -> &OmpClause {
        match self.clauses.get(id.index()) {
            Some(clause) => clause,
            None => panic!("{id:?} is out of range for an arena of {} clauses", self.clauses.len()),
        }
    }

    #[track_caller]
    #[inline]
    pub fn clause_mut(&mut self, id: ClauseId) -> &mut OmpClause {
        let len = self.clauses.len();
        match self.clauses.get_mut(id.index()) {
            Some(clause) => clause,
            None => panic!("{id:?} is out of range for an arena of {len} clauses"),
        }
    }

    /// Number of allocated statements.
    pub fn len(&self) -> usize {
        self.stmts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// All statements with their ids, in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (StmtId, &Stmt)> + '_ {
        self.stmts
            .iter()
            .enumerate()
            .map(|(i, stmt)| (StmtId::new(to_u32(i, "statements")), stmt))
    }

    /// Direct sub-nodes of a statement.
    pub fn children(&self, id: StmtId) -> Children {
        self.get(id).children()
    }

    pub fn loc_start(&self, id: StmtId, exprs: &dyn ExprLookup) -> SourceLocation {
        let cx = Locator::new(self, exprs);
        cx.stmt_start(id)
    }

    pub fn loc_end(&self, id: StmtId, exprs: &dyn ExprLookup) -> SourceLocation {
        let cx = Locator::new(self, exprs);
        cx.stmt_end(id)
    }

    pub fn source_range(&self, id: StmtId, exprs: &dyn ExprLookup) -> SourceRange {
        let cx = Locator::new(self, exprs);
        cx.stmt_range(id)
    }

    /// Bytes a single-block layout of the node would take: the kind's
    /// header size plus its trailing arrays, realigned as needed.
    pub fn allocation_size(&self, id: StmtId) -> usize {
        let stmt = self.get(id);
        allocation_size(stmt.class().size(), &stmt.trailing_arrays())
    }

    /// Wrap a condition variable in a declaration statement spanning the
    /// variable's own source range.
    pub fn create_condition_variable(&mut self, var: DeclId, decls: &dyn DeclLookup) -> StmtId {
        let range = decls.decl_range(var);
        self.alloc(DeclStmt::single(var, decls, range.begin, range.end))
    }

    /// Install (or clear) the condition variable of an `if`, `switch`,
    /// `while` or `for` statement.
    ///
    /// A fresh wrapping declaration statement is built on every call; the
    /// previous wrapper, if any, is simply no longer referenced.
    ///
    /// # Panics
    /// Panics if `id` is not one of the four kinds with a condition variable.
    #[track_caller]
    pub fn set_condition_variable(
        &mut self,
        id: StmtId,
        var: Option<DeclId>,
        decls: &dyn DeclLookup,
    ) {
        let class = self.class(id);
        assert!(
            matches!(
                class,
                StmtClass::If | StmtClass::Switch | StmtClass::While | StmtClass::For
            ),
            "{} has no condition variable",
            class.name()
        );
        let wrapper = var.map(|var| self.create_condition_variable(var, decls));
        match self.get_mut(id) {
            Stmt::If(node) => node.set_condition_variable_stmt(wrapper),
            Stmt::Switch(node) => node.set_condition_variable_stmt(wrapper),
            Stmt::While(node) => node.set_condition_variable_stmt(wrapper),
            Stmt::For(node) => node.set_condition_variable_stmt(wrapper),
            _ => {}
        }
    }

    /// The condition variable of an `if`, `switch`, `while` or `for`.
    pub fn condition_variable(&self, id: StmtId) -> Option<DeclId> {
        let wrapper = match self.get(id) {
            Stmt::If(node) => node.condition_variable_stmt(),
            Stmt::Switch(node) => node.condition_variable_stmt(),
            Stmt::While(node) => node.condition_variable_stmt(),
            Stmt::For(node) => node.condition_variable_stmt(),
            _ => None,
        }?;
        self.get_as::<DeclStmt>(wrapper).single_decl()
    }

    /// Push a case or default label onto the front of a switch's case list.
    ///
    /// # Panics
    /// Panics if `switch` is not a switch or `case` is not a case/default.
    #[track_caller]
    pub fn add_switch_case(&mut self, switch: StmtId, case: StmtId) {
        let previous = self.get_as::<SwitchStmt>(switch).first_switch_case();
        match self.get_mut(case) {
            Stmt::Case(node) => node.set_next_switch_case(previous),
            Stmt::Default(node) => node.set_next_switch_case(previous),
            other => panic!("{} cannot be a switch case", other.class().name()),
        }
        self.get_as_mut::<SwitchStmt>(switch)
            .set_first_switch_case(Some(case));
    }

    /// Cases of a switch, most recently added first.
    pub fn switch_cases(&self, switch: StmtId) -> SwitchCases<'_, 'r> {
        SwitchCases {
            arena: self,
            next: self.get_as::<SwitchStmt>(switch).first_switch_case(),
        }
    }

    /// Strip label, case, default and attributed wrappers, returning the
    /// innermost wrapped statement.
    pub fn strip_label_like_statements(&self, id: StmtId) -> StmtId {
        let mut current = id;
        loop {
            let next = match self.get(current) {
                Stmt::Label(node) => node.sub_stmt(),
                Stmt::Attributed(node) => node.sub_stmt(),
                Stmt::Case(node) => match node.sub_stmt() {
                    Some(sub) => sub,
                    None => return current,
                },
                Stmt::Default(node) => node.sub_stmt(),
                _ => return current,
            };
            current = next;
        }
    }
}

impl Default for StmtArena<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StmtArena<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StmtArena")
            .field("stmts", &self.stmts.len())
            .field("clauses", &self.clauses.len())
            .field("statistics", &self.registry.is_some())
            .finish()
    }
}

/// Iterator over the case list of a switch.
pub struct SwitchCases<'a, 'r> {
    arena: &'a StmtArena<'r>,
    next: Option<StmtId>,
}

impl Iterator for SwitchCases<'_, '_> {
    type Item = StmtId;

    fn next(&mut self) -> Option<StmtId> {
        let current = self.next?;
        self.next = match self.arena.get(current) {
            Stmt::Case(node) => node.next_switch_case(),
            Stmt::Default(node) => node.next_switch_case(),
            _ => None,
        };
        Some(current)
    }
}

/// Context for source-location queries.
///
/// Location computation walks into child statements (through the arena)
/// and child expressions (through the expression subsystem).
#[derive(Copy, Clone)]
pub struct Locator<'a> {
    arena: &'a StmtArena<'a>,
    exprs: &'a dyn ExprLookup,
}

impl<'a> Locator<'a> {
    pub fn new(arena: &'a StmtArena<'a>, exprs: &'a dyn ExprLookup) -> Self {
        Locator { arena, exprs }
    }

    #[inline]
    pub fn arena(&self) -> &'a StmtArena<'a> {
        self.arena
    }

    #[inline]
    pub fn exprs(&self) -> &'a dyn ExprLookup {
        self.exprs
    }

    pub fn stmt_start(&self, id: StmtId) -> SourceLocation {
        self.arena.get(id).loc_start(self)
    }

    pub fn stmt_end(&self, id: StmtId) -> SourceLocation {
        self.arena.get(id).loc_end(self)
    }

    pub fn stmt_range(&self, id: StmtId) -> SourceRange {
        self.arena.get(id).source_range(self)
    }

    pub fn expr_start(&self, id: crate::ExprId) -> SourceLocation {
        self.exprs.expr_range(id).begin
    }

    pub fn expr_end(&self, id: crate::ExprId) -> SourceLocation {
        self.exprs.expr_range(id).end
    }

    /// The case/default found by walking nested `case` statements, used by
    /// `case 1: case 2: ...` chains to find their end.
    pub(crate) fn innermost_case<'s>(&self, case: &'s CaseStmt) -> &'s CaseStmt
    where
        'a: 's,
    {
        let mut current = case;
        while let Some(inner) = current
            .sub_stmt()
            .and_then(|sub| self.arena.dyn_cast::<CaseStmt>(sub))
        {
            current = inner;
        }
        current
    }
}

/// Convert an arena length to a 32-bit index.
#[track_caller]
pub(crate) fn to_u32(len: usize, what: &str) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("too many {what}: {len} exceeds u32::MAX"))
}

#[cfg(test)]
mod tests;
