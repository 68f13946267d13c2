use pretty_assertions::assert_eq;

use super::*;
use crate::test_helpers::{Fixture, Outcome};

/// Evaluate with [`Checker::expr`]: exactly one value.
fn single(fx: &mut Fixture, expr: ExprId) -> Outcome {
    fx.run(|checker, x| {
        checker.expr(x, expr)?;
        Ok(ExprClass::Expression)
    })
    .unwrap_or_else(|e| panic!("internal error: {e}"))
}

fn value_or_type(fx: &mut Fixture, expr: ExprId) -> Outcome {
    fx.run(|checker, x| {
        checker.expr_or_type(x, expr)?;
        Ok(ExprClass::Expression)
    })
    .unwrap_or_else(|e| panic!("internal error: {e}"))
}

// === Names and literals ===

#[test]
fn test_literals() {
    let mut fx = Fixture::new();
    let i = fx.int(7);
    let out = fx.check(i);
    out.assert_clean();
    assert_eq!(out.mode(), &Mode::Constant(ConstValue::Int(7)));
    assert_eq!(out.operand.typ, Idx::UNTYPED_INT);

    let f = fx.float(0.25);
    let out = fx.check(f);
    assert_eq!(out.mode(), &Mode::Constant(ConstValue::Float(0.25)));
    assert_eq!(out.operand.typ, Idx::UNTYPED_FLOAT);

    let s = fx.string("hi");
    let out = fx.check(s);
    assert_eq!(out.mode(), &Mode::Constant(ConstValue::Str("hi".to_owned())));
    assert_eq!(out.info.type_of(s).map(|tv| tv.ty), Some(Idx::UNTYPED_STRING));
}

#[test]
fn test_predeclared_names() {
    let mut fx = Fixture::new();
    let t = fx.ident("true");
    let out = fx.check(t);
    assert_eq!(out.mode(), &Mode::Constant(ConstValue::Bool(true)));
    assert_eq!(out.operand.typ, Idx::UNTYPED_BOOL);

    let nil = fx.ident("nil");
    let out = fx.check(nil);
    assert_eq!(out.mode(), &Mode::Value);
    assert_eq!(out.operand.typ, Idx::UNTYPED_NIL);

    let byte = fx.ident("byte");
    let out = fx.check(byte);
    assert_eq!(out.mode(), &Mode::TypeExpr);
    assert_eq!(out.operand.typ, Idx::UINT8);
}

#[test]
fn test_undeclared_name() {
    let mut fx = Fixture::new();
    let e = fx.ident("nowhere");
    let out = fx.check(e);
    let diag = out.single_error(ErrorCode::E2003, "undeclared name: nowhere");
    assert_eq!(diag.primary_span(), Some(fx.span(e)));
    assert!(out.operand.is_invalid());
    assert!(out.info.type_of(e).is_none());
}

#[test]
fn test_blank_identifier() {
    let mut fx = Fixture::new();
    let e = fx.ident("_");
    let out = fx.check(e);
    out.single_error(ErrorCode::E2029, "cannot use _ as value");
}

#[test]
fn test_package_without_selector() {
    let mut fx = Fixture::new();
    let (_, pkg_name) = fx.import("fmt", false);
    let e = fx.ident("fmt");
    let out = fx.check(e);
    out.single_error(ErrorCode::E2029, "use of package fmt without selector");
    assert!(out.operand.is_invalid());
    assert_eq!(out.info.use_of(e), Some(pkg_name));
}

#[test]
fn test_inner_scope_shadows_package_scope() {
    let mut fx = Fixture::new();
    let outer = fx.named("T", Idx::INT);
    fx.var("T", Idx::STRING);
    let e = fx.ident("T");
    let out = fx.check(e);
    assert_eq!(out.mode(), &Mode::Variable);
    assert_ne!(out.operand.typ, outer);
}

// === Mode restrictions ===

#[test]
fn test_builtin_must_be_called() {
    let mut fx = Fixture::new();
    let e = fx.ident("len");
    let out = single(&mut fx, e);
    out.single_error(ErrorCode::E2029, "len (built-in) must be called");
    assert!(out.operand.is_invalid());
}

#[test]
fn test_type_is_not_an_expression() {
    let mut fx = Fixture::new();
    let e = fx.ident("int");
    let out = single(&mut fx, e);
    out.single_error(ErrorCode::E2029, "int (type) is not an expression");

    let e = fx.ident("int");
    value_or_type(&mut fx, e).assert_clean();
}

#[test]
fn test_no_value_call() {
    let mut fx = Fixture::new();
    fx.func("f", &[], &[], false);
    let call = fx.call_named("f", &[]);
    let out = single(&mut fx, call);
    out.single_error(ErrorCode::E2029, "f() (no value) used as value");

    let call = fx.call_named("f", &[]);
    let out = value_or_type(&mut fx, call);
    out.single_error(ErrorCode::E2029, "f() (no value) used as value or type");
}

#[test]
fn test_multi_valued_where_single_expected() {
    let mut fx = Fixture::new();
    fx.func("g", &[], &[Idx::INT, Idx::INT], false);
    let call = fx.call_named("g", &[]);
    let out = single(&mut fx, call);
    out.single_error(ErrorCode::E2029, "2-valued g() (value of type (int, int)) where single value is expected");
}

// === Operators ===

#[test]
fn test_parenthesized() {
    let mut fx = Fixture::new();
    fx.var("v", Idx::BOOL);
    let v = fx.ident("v");
    let e = fx.paren(v);
    let out = fx.check(e);
    out.assert_clean();
    assert_eq!(out.mode(), &Mode::Variable);
    assert_eq!(out.operand.expr, Some(e));
    assert!(out.info.type_of(e).is_some());
    assert!(out.info.type_of(v).is_some());
}

#[test]
fn test_address_of() {
    let mut fx = Fixture::new();
    fx.var("v", Idx::INT);
    let v = fx.ident("v");
    let e = fx.addr(v);
    let out = fx.check(e);
    out.assert_clean();
    assert_eq!(out.mode(), &Mode::Value);
    assert_eq!(fx.type_str(out.operand.typ), "*int");

    let one = fx.int(1);
    let e = fx.addr(one);
    let out = fx.check(e);
    out.single_error(ErrorCode::E2030, "cannot take address of 1 (untyped int constant)");
}

#[test]
fn test_receive() {
    let mut fx = Fixture::new();
    let chan = fx.pool.chan(Idx::FLOAT64);
    fx.var("ch", chan);
    let ch = fx.ident("ch");
    let e = fx.recv(ch);
    let out = fx.check(e);
    out.assert_clean();
    assert_eq!(out.mode(), &Mode::CommaOk);
    assert_eq!(out.operand.typ, Idx::FLOAT64);
    assert!(out.has_call_or_recv);

    fx.var("n", Idx::INT);
    let n = fx.ident("n");
    let e = fx.recv(n);
    let out = fx.check(e);
    out.single_error(ErrorCode::E2030, "cannot receive from non-channel n (variable of type int)");
    assert!(!out.has_call_or_recv);
}

#[test]
fn test_star() {
    let mut fx = Fixture::new();
    let ptr = fx.pool.pointer(Idx::STRING);
    fx.var("p", ptr);
    fx.var("n", Idx::INT);

    let p = fx.ident("p");
    let deref = fx.star(p);
    let out = fx.check(deref);
    out.assert_clean();
    assert_eq!(out.mode(), &Mode::Variable);
    assert_eq!(out.operand.typ, Idx::STRING);

    let int = fx.ident("int");
    let ptr_type = fx.star(int);
    let out = fx.check(ptr_type);
    assert_eq!(out.mode(), &Mode::TypeExpr);
    assert_eq!(fx.type_str(out.operand.typ), "*int");

    let n = fx.ident("n");
    let bad = fx.star(n);
    let out = fx.check(bad);
    out.single_error(ErrorCode::E2030, "invalid indirect of n (variable of type int)");
}

// === Indexing ===

#[test]
fn test_index_forms() {
    let mut fx = Fixture::new();
    let map = fx.pool.map(Idx::STRING, Idx::BOOL);
    let slice = fx.pool.slice(Idx::INT64);
    fx.var("m", map);
    fx.var("xs", slice);
    fx.var("s", Idx::STRING);

    let m = fx.ident("m");
    let k = fx.string("k");
    let e = fx.index(m, k);
    let out = fx.check(e);
    out.assert_clean();
    assert_eq!(out.mode(), &Mode::MapIndex);
    assert_eq!(out.operand.typ, Idx::BOOL);

    let xs = fx.ident("xs");
    let zero = fx.int(0);
    let e = fx.index(xs, zero);
    let out = fx.check(e);
    out.assert_clean();
    assert_eq!(out.mode(), &Mode::Variable);
    assert_eq!(out.operand.typ, Idx::INT64);

    let s = fx.ident("s");
    let zero = fx.int(0);
    let e = fx.index(s, zero);
    let out = fx.check(e);
    out.assert_clean();
    assert_eq!(out.mode(), &Mode::Value);
    assert_eq!(out.operand.typ, Idx::UINT8);
}

#[test]
fn test_bad_indices() {
    let mut fx = Fixture::new();
    let map = fx.pool.map(Idx::STRING, Idx::BOOL);
    let slice = fx.pool.slice(Idx::INT);
    fx.var("m", map);
    fx.var("xs", slice);

    let xs = fx.ident("xs");
    let neg = fx.int(-1);
    let e = fx.index(xs, neg);
    fx.check(e)
        .single_error(ErrorCode::E2030, "index -1 (untyped int constant) must not be negative");

    let xs = fx.ident("xs");
    let s = fx.string("a");
    let e = fx.index(xs, s);
    fx.check(e)
        .single_error(ErrorCode::E2001, "as int value in index");

    let m = fx.ident("m");
    let one = fx.int(1);
    let e = fx.index(m, one);
    fx.check(e).single_error(
        ErrorCode::E2001,
        "cannot use 1 (untyped int constant) as string value in map index",
    );

    let five = fx.int(5);
    let zero = fx.int(0);
    let e = fx.index(five, zero);
    fx.check(e)
        .single_error(ErrorCode::E2030, "cannot index 5 (untyped int constant)");
}

// === Type forms ===

#[test]
fn test_slice_type() {
    let mut fx = Fixture::new();
    let string = fx.ident("string");
    let slice = fx.slice_type(string);
    let outer = fx.slice_type(slice);
    let out = fx.check(outer);
    out.assert_clean();
    assert_eq!(out.mode(), &Mode::TypeExpr);
    assert_eq!(fx.type_str(out.operand.typ), "[][]string");

    let one = fx.int(1);
    let bad = fx.slice_type(one);
    let out = fx.check(bad);
    out.single_error(ErrorCode::E2029, "1 (untyped int constant) is not a type");
    assert!(out.operand.is_invalid());
}

#[test]
fn test_error_node_is_silent() {
    let mut fx = Fixture::new();
    let bad = fx.error_expr();
    let out = fx.check(bad);
    out.assert_clean();
    assert!(out.operand.is_invalid());

    fx.func("f", &[Idx::INT], &[], false);
    let bad = fx.error_expr();
    let call = fx.call_named("f", &[bad]);
    fx.check(call).assert_clean();
}

#[test]
fn test_deeply_nested_expression() {
    let mut fx = Fixture::new();
    fx.var("v", Idx::INT);
    let mut e = fx.ident("v");
    for _ in 0..20_000 {
        e = fx.paren(e);
    }
    let out = fx.check(e);
    out.assert_clean();
    assert_eq!(out.mode(), &Mode::Variable);
}
