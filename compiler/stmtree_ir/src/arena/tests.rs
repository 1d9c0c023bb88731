use super::*;
use crate::omp::{ClauseKind, SharedClause};
use crate::stmt::{
    AttributedStmt, BreakStmt, CompoundStmt, CxxTryStmt, DefaultStmt, IfStmt, LabelStmt, NullStmt,
    WhileStmt,
};
use crate::testing::{loc, range, FakeDecls, FakeExprs};
use crate::{align_to, AttrId, ChildId, ExprId, LabelId, TypeId};
use pretty_assertions::assert_eq;

#[test]
fn test_alloc_assigns_sequential_ids() {
    let mut arena = StmtArena::new();
    assert!(arena.is_empty());
    let a = arena.alloc(NullStmt::new(loc(0)));
    let b = arena.alloc(BreakStmt::new(loc(2)));
    assert_eq!(a, StmtId::new(0));
    assert_eq!(b, StmtId::new(1));
    assert_eq!(arena.len(), 2);
    assert_eq!(arena.class(b), StmtClass::Break);

    let ids: Vec<StmtId> = arena.iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec![a, b]);
}

#[test]
fn test_with_capacity_starts_empty() {
    let arena = StmtArena::with_capacity(4000);
    assert!(arena.is_empty());
    assert_eq!(arena.num_clauses(), 0);
    assert!(arena.registry().is_none());
}

#[test]
fn test_dyn_cast_checks_kind() {
    let mut arena = StmtArena::new();
    let id = arena.alloc(NullStmt::new(loc(0)));
    assert!(arena.dyn_cast::<NullStmt>(id).is_some());
    assert!(arena.dyn_cast::<BreakStmt>(id).is_none());
}

#[test]
#[should_panic(expected = "is a NullStmt, not a BreakStmt")]
fn test_get_as_wrong_kind_panics() {
    let mut arena = StmtArena::new();
    let id = arena.alloc(NullStmt::new(loc(0)));
    let _ = arena.get_as::<BreakStmt>(id);
}

#[test]
#[should_panic(expected = "is out of range for an arena of 0 statements")]
fn test_get_out_of_range_panics() {
    let arena = StmtArena::new();
    let _ = arena.get(StmtId::new(3));
}

#[test]
fn test_clauses_live_beside_statements() {
    let mut arena = StmtArena::new();
    let id = arena.alloc_clause(SharedClause::create(
        loc(0),
        loc(6),
        loc(9),
        &[ExprId::new(1)],
    ));
    assert_eq!(arena.num_clauses(), 1);
    assert_eq!(arena.clause(id).kind(), ClauseKind::Shared);

    let Some(shared) = arena.clause_mut(id).downcast_mut::<SharedClause>() else {
        panic!("clause kind changed");
    };
    shared.set_vars(&[ExprId::new(2)]);
    assert_eq!(
        arena.clause(id).var_list().map(|list| list.vars().to_vec()),
        Some(vec![ExprId::new(2)])
    );
}

#[test]
fn test_condition_variable_replaced_in_place() {
    let mut exprs = FakeExprs::default();
    let cond = exprs.add(8, 9);
    let mut decls = FakeDecls::default();
    let first = decls.add_var(4, 9, TypeId::new(0), Some(cond));
    let second = decls.add_var(4, 11, TypeId::new(0), None);

    let mut arena = StmtArena::new();
    let then = arena.alloc(NullStmt::new(loc(12)));
    let if_id = arena.alloc(IfStmt::new(loc(0), cond, then, SourceLocation::INVALID, None));
    assert_eq!(arena.condition_variable(if_id), None);

    arena.set_condition_variable(if_id, Some(first), &decls);
    assert_eq!(arena.condition_variable(if_id), Some(first));
    let Some(wrapper) = arena.get_as::<IfStmt>(if_id).condition_variable_stmt() else {
        panic!("condition variable wrapper missing");
    };
    assert_eq!(arena.source_range(wrapper, &exprs), range(4, 9));
    assert_eq!(arena.children(wrapper).as_slice(), &[Some(ChildId::Expr(cond))]);
    assert_eq!(arena.children(if_id)[0], Some(ChildId::Stmt(wrapper)));

    let before = arena.len();
    arena.set_condition_variable(if_id, Some(second), &decls);
    assert_eq!(arena.len(), before + 1);
    assert_eq!(arena.condition_variable(if_id), Some(second));

    arena.set_condition_variable(if_id, None, &decls);
    assert_eq!(arena.condition_variable(if_id), None);
    assert_eq!(arena.children(if_id)[0], None);
}

#[test]
fn test_while_condition_variable() {
    let mut exprs = FakeExprs::default();
    let cond = exprs.add(7, 8);
    let mut decls = FakeDecls::default();
    let var = decls.add_var(7, 12, TypeId::new(0), None);
    let mut arena = StmtArena::new();
    let body = arena.alloc(NullStmt::new(loc(14)));
    let id = arena.alloc(WhileStmt::new(loc(0), cond, body));

    arena.set_condition_variable(id, Some(var), &decls);
    assert_eq!(arena.condition_variable(id), Some(var));
}

#[test]
#[should_panic(expected = "NullStmt has no condition variable")]
fn test_condition_variable_on_wrong_kind_panics() {
    let mut decls = FakeDecls::default();
    let var = decls.add_var(0, 1, TypeId::new(0), None);
    let mut arena = StmtArena::new();
    let id = arena.alloc(NullStmt::new(loc(0)));
    arena.set_condition_variable(id, Some(var), &decls);
}

#[test]
fn test_switch_case_list_is_most_recent_first() {
    let mut exprs = FakeExprs::default();
    let cond = exprs.add(8, 9);
    let one = exprs.add(18, 19);
    let mut arena = StmtArena::new();
    let switch = arena.alloc(crate::stmt::SwitchStmt::new(loc(0), cond));
    let body = arena.alloc(BreakStmt::new(loc(21)));
    let case = arena.alloc(crate::stmt::CaseStmt::new(
        one,
        None,
        loc(13),
        SourceLocation::INVALID,
        loc(19),
    ));
    let default = arena.alloc(DefaultStmt::new(loc(28), loc(35), body));

    arena.add_switch_case(switch, case);
    arena.add_switch_case(switch, default);

    let cases: Vec<StmtId> = arena.switch_cases(switch).collect();
    assert_eq!(cases, vec![default, case]);
}

#[test]
fn test_strip_label_like_statements() {
    let mut arena = StmtArena::new();
    let inner = arena.alloc(NullStmt::new(loc(30)));
    let attributed = arena.alloc(AttributedStmt::create(loc(20), &[AttrId::new(0)], inner));
    let default = arena.alloc(DefaultStmt::new(loc(10), loc(17), attributed));
    let label = arena.alloc(LabelStmt::new(loc(0), LabelId::new(0), default));

    assert_eq!(arena.strip_label_like_statements(label), inner);
    assert_eq!(arena.strip_label_like_statements(inner), inner);
}

#[test]
fn test_allocation_size_accounts_for_trailing_arrays() {
    let mut arena = StmtArena::new();
    let a = arena.alloc(NullStmt::new(loc(0)));
    let b = arena.alloc(NullStmt::new(loc(2)));
    let empty = arena.alloc(CompoundStmt::empty(loc(4), loc(5)));
    let block = arena.alloc(CompoundStmt::new(&[a, b], loc(6), loc(10)));
    let try_id = arena.alloc(CxxTryStmt::create(loc(12), block, &[a]));

    let header = StmtClass::Compound.size();
    assert_eq!(arena.allocation_size(empty), header);
    assert_eq!(
        arena.allocation_size(block),
        align_to(header, std::mem::align_of::<StmtId>()) + 2 * std::mem::size_of::<StmtId>()
    );
    assert_eq!(
        arena.allocation_size(try_id),
        align_to(StmtClass::CxxTry.size(), 4) + 2 * 4
    );
}

#[test]
fn test_registry_counts_allocations() {
    let registry = KindRegistry::with_statistics(true);
    let mut arena = StmtArena::with_registry(&registry);
    arena.alloc(NullStmt::new(loc(0)));
    arena.alloc(NullStmt::new(loc(1)));
    arena.alloc(BreakStmt::new(loc(2)));

    assert_eq!(registry.count_constructed(StmtClass::Null), 2);
    assert_eq!(registry.count_constructed(StmtClass::Break), 1);
    assert_eq!(registry.count_constructed(StmtClass::If), 0);
}

#[test]
fn test_registry_silent_when_statistics_disabled() {
    let registry = KindRegistry::new();
    let mut arena = StmtArena::with_registry(&registry);
    arena.alloc(NullStmt::new(loc(0)));
    assert_eq!(registry.count_constructed(StmtClass::Null), 0);
}

#[test]
fn test_locator_reaches_expressions() {
    let mut exprs = FakeExprs::default();
    let target = exprs.add(5, 9);
    let arena = StmtArena::new();
    let cx = Locator::new(&arena, &exprs);
    assert_eq!(cx.expr_start(target), loc(5));
    assert_eq!(cx.expr_end(target), loc(9));
    assert!(cx.arena().is_empty());
}
