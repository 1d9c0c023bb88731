use super::*;
use crate::ChildId;
use pretty_assertions::assert_eq;

fn loc(offset: u32) -> SourceLocation {
    SourceLocation::new(offset)
}

fn exprs(ids: &[u32]) -> Vec<ExprId> {
    ids.iter().map(|&i| ExprId::new(i)).collect()
}

#[test]
fn test_private_clause_layout() {
    let vars = exprs(&[1, 2, 3]);
    let inits = exprs(&[11, 12, 13]);
    let clause = PrivateClause::create(loc(0), loc(7), loc(20), &vars, &inits);

    assert_eq!(clause.vars(), vars.as_slice());
    assert_eq!(clause.default_inits(), inits.as_slice());
    assert_eq!(clause.var_list().len(), 3);
    assert_eq!(clause.var_list().lparen_loc(), loc(7));
    assert_eq!(clause.locs(), ClauseLocs::new(loc(0), loc(20)));
}

#[test]
fn test_var_list_children_are_the_variables_only() {
    let vars = exprs(&[1, 2]);
    let clause = FirstPrivateClause::create(
        loc(0),
        loc(12),
        loc(20),
        &vars,
        &exprs(&[5, 6]),
        &exprs(&[7, 8]),
    );
    let children = OmpClause::from(clause).children();
    assert_eq!(
        children.as_slice(),
        &[
            Some(ChildId::Expr(ExprId::new(1))),
            Some(ChildId::Expr(ExprId::new(2)))
        ]
    );
}

#[test]
#[should_panic(expected = "number of elements is not the same as the preallocated buffer")]
fn test_helper_array_shorter_than_var_list_panics() {
    let mut clause = CopyinClause::create_empty(3);
    clause.set_vars(&exprs(&[1, 2, 3]));
    clause.set_pseudo_vars1(&exprs(&[4, 5]));
}

#[test]
#[should_panic(expected = "number of elements is not the same as the preallocated buffer")]
fn test_var_list_longer_than_created_panics() {
    let mut clause = SharedClause::create_empty(2);
    clause.set_vars(&exprs(&[1, 2, 3]));
}

#[test]
fn test_lastprivate_default_inits_start_invalid() {
    let vars = exprs(&[1, 2]);
    let mut clause = LastPrivateClause::create(
        loc(0),
        loc(12),
        loc(30),
        &vars,
        &exprs(&[3, 4]),
        &exprs(&[5, 6]),
        &exprs(&[7, 8]),
    );
    assert!(clause.default_inits().iter().all(|id| !id.is_valid()));
    assert_eq!(clause.assignments(), exprs(&[7, 8]).as_slice());

    clause.set_default_inits(&exprs(&[9, 10]));
    assert_eq!(clause.default_inits(), exprs(&[9, 10]).as_slice());
    assert_eq!(clause.pseudo_vars2(), exprs(&[5, 6]).as_slice());
}

#[test]
fn test_reduction_clause_operator() {
    let vars = exprs(&[1]);
    let clause = ReductionClause::create(
        loc(0),
        loc(9),
        loc(11),
        loc(15),
        &vars,
        &exprs(&[2]),
        &exprs(&[3]),
        &exprs(&[4]),
        &exprs(&[5]),
        Some(ReductionOperator::Add),
        None,
        Name::EMPTY,
    );
    assert_eq!(clause.operator(), Some(ReductionOperator::Add));
    assert_eq!(clause.colon_loc(), loc(11));
    assert_eq!(clause.op_exprs(), exprs(&[2]).as_slice());
    assert_eq!(clause.default_inits(), exprs(&[5]).as_slice());
    assert_eq!(clause.trailing_arrays().len(), 5);
}

#[test]
#[should_panic(expected = "number of expressions is not the same as number of variables")]
fn test_reduction_operator_exprs_mismatch_panics() {
    ReductionClause::create(
        loc(0),
        loc(9),
        loc(11),
        loc(15),
        &exprs(&[1, 2, 3]),
        &exprs(&[4, 5]),
        &exprs(&[]),
        &exprs(&[]),
        &exprs(&[]),
        Some(ReductionOperator::Max),
        None,
        Name::EMPTY,
    );
}

#[test]
fn test_linear_step_is_a_trailing_child() {
    let vars = exprs(&[1, 2]);
    let with_step = LinearClause::create(loc(0), loc(6), loc(10), loc(14), &vars, Some(ExprId::new(9)));
    assert_eq!(with_step.step(), Some(ExprId::new(9)));
    assert_eq!(
        with_step.children().last().copied().flatten(),
        Some(ChildId::Expr(ExprId::new(9)))
    );

    let without = LinearClause::create(loc(0), loc(6), SourceLocation::INVALID, loc(10), &vars, None);
    assert_eq!(without.step(), None);
    assert_eq!(without.children().len(), 3);
    assert_eq!(without.children()[2], None);
}

#[test]
fn test_aligned_alignment() {
    let mut clause = AlignedClause::create_empty(1);
    assert_eq!(clause.alignment(), None);
    clause.set_alignment(Some(ExprId::new(4)));
    assert_eq!(clause.alignment(), Some(ExprId::new(4)));
}

#[test]
fn test_simple_clauses() {
    let schedule = OmpClause::from(ScheduleClause::new(
        ScheduleKind::Dynamic,
        loc(9),
        loc(16),
        Some(ExprId::new(3)),
        loc(0),
        loc(8),
        loc(20),
    ));
    assert_eq!(schedule.kind(), ClauseKind::Schedule);
    assert_eq!(schedule.children().as_slice(), &[Some(ChildId::Expr(ExprId::new(3)))]);

    let if_clause = OmpClause::from(IfClause::new(ExprId::new(1), loc(0), loc(2), loc(6)));
    assert_eq!(if_clause.children().len(), 1);
    assert_eq!(if_clause.start_loc(), loc(0));
    assert_eq!(if_clause.end_loc(), loc(6));

    let default = OmpClause::from(DefaultClause::new(DefaultKind::None, loc(8), loc(0), loc(7), loc(12)));
    assert!(default.children().is_empty());
    assert_eq!(
        default.downcast::<DefaultClause>().map(DefaultClause::default_kind),
        Some(DefaultKind::None)
    );

    let nowait = OmpClause::from(NowaitClause::new(loc(0), loc(6)));
    assert!(nowait.children().is_empty());
    assert!(nowait.var_list().is_none());
    assert!(nowait.downcast::<OrderedClause>().is_none());
}

#[test]
fn test_implicit_clause() {
    let flush = OmpClause::from(FlushClause::create(
        SourceLocation::INVALID,
        SourceLocation::INVALID,
        SourceLocation::INVALID,
        &exprs(&[1]),
    ));
    assert!(flush.is_implicit());
    assert_eq!(flush.var_list().map(VarList::len), Some(1));
}

#[test]
fn test_clause_kind_matches_variant() {
    assert_eq!(<PrivateClause as ClauseNode>::KIND, ClauseKind::Private);
    assert_eq!(<SeqCstClause as ClauseNode>::KIND, ClauseKind::SeqCst);
    let clause = OmpClause::from(UniformClause::create_empty(0));
    assert_eq!(clause.kind(), ClauseKind::Uniform);
    assert!(clause.var_list().is_some_and(VarList::is_empty));
}
