use pretty_assertions::assert_eq;
use tern_diagnostic::ErrorCode;
use tern_types::{ConstValue, ExprClass};

use super::*;
use crate::test_helpers::{Fixture, Outcome};

/// What `unpack` made of an argument list: the operand count, the
/// comma-ok flag and every operand the getter yields.
type Expanded = Option<(usize, bool, Vec<Operand>)>;

fn expand(fx: &mut Fixture, args: &[ExprId], allow_comma_ok: bool) -> (Expanded, Outcome) {
    let range = fx.arena.alloc_expr_list(args.iter().copied());
    let mut expanded = None;
    let out = fx
        .run(|checker, _| {
            let arena = checker.context.arena;
            let exprs = arena.get_expr_list(range);
            if let Some(unpacked) = checker.unpack(Getter::Exprs(exprs), exprs.len(), allow_comma_ok)? {
                let mut operands = Vec::with_capacity(unpacked.count);
                for index in 0..unpacked.count {
                    let mut y = Operand::invalid();
                    checker.get_operand(&unpacked.getter, &mut y, index)?;
                    operands.push(y);
                }
                expanded = Some((unpacked.count, unpacked.comma_ok, operands));
            }
            Ok(ExprClass::Expression)
        })
        .unwrap_or_else(|e| panic!("internal error: {e}"));
    (expanded, out)
}

fn types(operands: &[Operand]) -> Vec<Idx> {
    operands.iter().map(|x| x.typ).collect()
}

#[test]
fn test_several_expressions_pass_through() {
    let mut fx = Fixture::new();
    let a = fx.int(1);
    let b = fx.string("s");
    let (expanded, out) = expand(&mut fx, &[a, b], false);
    out.assert_clean();

    let Some((count, comma_ok, operands)) = expanded else {
        panic!("expected operands");
    };
    assert_eq!(count, 2);
    assert!(!comma_ok);
    assert_eq!(types(&operands), vec![Idx::UNTYPED_INT, Idx::UNTYPED_STRING]);
    assert_eq!(operands[1].expr, Some(b));
}

#[test]
fn test_empty_list() {
    let mut fx = Fixture::new();
    let (expanded, out) = expand(&mut fx, &[], false);
    out.assert_clean();
    assert_eq!(expanded.map(|(count, _, _)| count), Some(0));
}

#[test]
fn test_tuple_result_expands() {
    let mut fx = Fixture::new();
    fx.func("g", &[], &[Idx::INT, Idx::STRING], false);
    let call = fx.call_named("g", &[]);
    let (expanded, out) = expand(&mut fx, &[call], false);
    out.assert_clean();

    let Some((count, comma_ok, operands)) = expanded else {
        panic!("expected operands");
    };
    assert_eq!(count, 2);
    assert!(!comma_ok);
    assert_eq!(types(&operands), vec![Idx::INT, Idx::STRING]);
    // Every element points at the call that produced it.
    assert!(operands.iter().all(|x| x.expr == Some(call)));
    assert!(operands.iter().all(|x| x.mode == Mode::Value));
}

#[test]
fn test_single_value_is_cached() {
    let mut fx = Fixture::new();
    fx.var("v", Idx::FLOAT64);
    let v = fx.ident("v");
    let (expanded, out) = expand(&mut fx, &[v], false);
    out.assert_clean();

    let Some((count, _, operands)) = expanded else {
        panic!("expected operands");
    };
    assert_eq!(count, 1);
    assert_eq!(operands, vec![Operand::new(Mode::Variable, v, Idx::FLOAT64)]);
}

#[test]
fn test_invalid_single_operand() {
    let mut fx = Fixture::new();
    let missing = fx.ident("missing");
    let (expanded, out) = expand(&mut fx, &[missing], false);
    assert!(expanded.is_none());
    out.single_error(ErrorCode::E2003, "undeclared name: missing");
}

#[test]
fn test_comma_ok_expands_when_allowed() {
    let mut fx = Fixture::new();
    let map = fx.pool.map(Idx::STRING, Idx::INT);
    fx.var("m", map);
    let m = fx.ident("m");
    let k = fx.string("k");
    let index = fx.index(m, k);
    let (expanded, out) = expand(&mut fx, &[index], true);
    out.assert_clean();

    let Some((count, comma_ok, operands)) = expanded else {
        panic!("expected operands");
    };
    assert_eq!(count, 2);
    assert!(comma_ok);
    assert_eq!(types(&operands), vec![Idx::INT, Idx::UNTYPED_BOOL]);
}

#[test]
fn test_comma_ok_demoted_otherwise() {
    let mut fx = Fixture::new();
    let chan = fx.pool.chan(Idx::STRING);
    fx.var("ch", chan);
    let ch = fx.ident("ch");
    let recv = fx.recv(ch);
    let (expanded, out) = expand(&mut fx, &[recv], false);
    out.assert_clean();

    let Some((count, comma_ok, operands)) = expanded else {
        panic!("expected operands");
    };
    assert_eq!(count, 1);
    assert!(!comma_ok);
    assert_eq!(operands[0].mode, Mode::Value);
    assert_eq!(operands[0].typ, Idx::STRING);
}

#[test]
fn test_out_of_range_positions() {
    let mut fx = Fixture::new();
    fx.func("g", &[], &[Idx::INT, Idx::INT], false);
    let call = fx.call_named("g", &[]);
    let one = fx.int(1);
    let range = fx.arena.alloc_expr_list([one]);

    let result = fx.run(|checker, x| {
        let cached = Getter::Cached(Operand::new(Mode::Value, one, Idx::INT));
        assert_eq!(
            checker.get_operand(&cached, x, 1),
            Err(InternalError::UnpackIndex { index: 1 })
        );

        let arena = checker.context.arena;
        let exprs = Getter::Exprs(arena.get_expr_list(range));
        assert_eq!(
            checker.get_operand(&exprs, x, 3),
            Err(InternalError::UnpackIndex { index: 3 })
        );

        let mut g = Operand::invalid();
        checker.raw_expr(&mut g, call)?;
        let results = Getter::Results {
            expr: g.expr,
            types: g.typ,
        };
        checker.get_operand(&results, x, 2)?;
        Ok(ExprClass::Expression)
    });
    assert_eq!(
        result.map(|out| out.class),
        Err(InternalError::UnpackIndex { index: 2 })
    );
}

#[test]
fn test_primed_prefix_before_rest() {
    let mut fx = Fixture::new();
    fx.var("s", Idx::STRING);
    let a = fx.ident("s");
    let b = fx.int(2);
    let range = fx.arena.alloc_expr_list([a, b]);

    let mut seen = Vec::new();
    let out = fx
        .run(|checker, x| {
            let arena = checker.context.arena;
            let primed = Getter::Primed {
                prefix: vec![Operand::new(Mode::Value, a, Idx::BOOL)],
                rest: Box::new(Getter::Exprs(arena.get_expr_list(range))),
            };
            for index in 0..2 {
                checker.get_operand(&primed, x, index)?;
                seen.push((x.mode.clone(), x.typ));
            }
            Ok(ExprClass::Expression)
        })
        .unwrap_or_else(|e| panic!("internal error: {e}"));
    out.assert_clean();
    assert_eq!(
        seen,
        vec![
            (Mode::Value, Idx::BOOL),
            (Mode::Constant(ConstValue::Int(2)), Idx::UNTYPED_INT),
        ]
    );
    // The primed position was not evaluated again.
    assert!(out.info.type_of(a).is_none());
}
