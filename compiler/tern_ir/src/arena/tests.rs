use super::*;
use crate::{ExprKind, Name};
use pretty_assertions::assert_eq;

#[test]
fn test_alloc_and_get() {
    let mut arena = ExprArena::new();
    let a = arena.alloc_expr(Expr::new(ExprKind::Int(1), Span::new(0, 1)));
    let b = arena.alloc_expr(Expr::new(ExprKind::Ident(Name::BLANK), Span::new(2, 3)));

    assert_eq!(arena.expr_count(), 2);
    assert_eq!(arena.get_expr(a).kind, ExprKind::Int(1));
    assert_eq!(arena.span(b), Span::new(2, 3));
}

#[test]
fn test_expr_lists_are_independent() {
    let mut arena = ExprArena::new();
    let ids: Vec<ExprId> = (0..4)
        .map(|i| arena.alloc_expr(Expr::new(ExprKind::Int(i), Span::DUMMY)))
        .collect();

    let first = arena.alloc_expr_list([ids[0], ids[1]]);
    let empty = arena.alloc_expr_list([]);
    let second = arena.alloc_expr_list([ids[3], ids[2], ids[1]]);

    assert_eq!(arena.get_expr_list(first), &[ids[0], ids[1]]);
    assert!(empty.is_empty());
    assert!(arena.get_expr_list(empty).is_empty());
    assert_eq!(arena.get_expr_list(second), &[ids[3], ids[2], ids[1]]);
}
