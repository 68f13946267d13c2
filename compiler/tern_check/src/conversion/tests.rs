use pretty_assertions::assert_eq;
use tern_diagnostic::ErrorCode;
use tern_ir::ExprId;
use tern_types::ExprClass;

use super::*;
use crate::test_helpers::{Fixture, Outcome};

/// `T(arg)` with `T` named by `target`.
fn convert(fx: &mut Fixture, target: &str, arg: ExprId) -> Outcome {
    let call = fx.call_named(target, &[arg]);
    let out = fx.check(call);
    assert_eq!(out.class, ExprClass::Conversion);
    out
}

#[test]
fn test_integer_constant_to_string() {
    let mut fx = Fixture::new();
    let code = fx.int(65);
    let out = convert(&mut fx, "string", code);
    out.assert_clean();
    assert_eq!(out.mode(), &Mode::Constant(ConstValue::Str("A".to_owned())));
    assert_eq!(out.operand.typ, Idx::STRING);
    // The integer operand stays untyped.
    assert_eq!(out.info.type_of(code).map(|tv| tv.ty), Some(Idx::UNTYPED_INT));
}

#[test]
fn test_invalid_code_point_to_string() {
    let mut fx = Fixture::new();
    let code = fx.int(-1);
    let out = convert(&mut fx, "string", code);
    out.assert_clean();
    assert_eq!(
        out.mode(),
        &Mode::Constant(ConstValue::Str("\u{FFFD}".to_owned()))
    );
}

#[test]
fn test_constant_float_to_int() {
    let mut fx = Fixture::new();
    let whole = fx.float(2.0);
    let out = convert(&mut fx, "int", whole);
    out.assert_clean();
    assert_eq!(out.mode(), &Mode::Constant(ConstValue::Int(2)));

    let fraction = fx.float(1.5);
    let out = convert(&mut fx, "int", fraction);
    out.single_error(
        ErrorCode::E2021,
        "cannot convert 1.5 (untyped float constant) to int",
    );
    assert!(out.operand.is_invalid());
}

#[test]
fn test_constant_out_of_range() {
    let mut fx = Fixture::new();
    let big = fx.int(256);
    let out = convert(&mut fx, "uint8", big);
    out.single_error(
        ErrorCode::E2021,
        "cannot convert 256 (untyped int constant) to uint8",
    );
}

#[test]
fn test_numeric_value_conversion() {
    let mut fx = Fixture::new();
    fx.var("f", Idx::FLOAT64);
    let f = fx.ident("f");
    let out = convert(&mut fx, "int32", f);
    out.assert_clean();
    assert_eq!(out.mode(), &Mode::Value);
    assert_eq!(out.operand.typ, Idx::INT32);
}

#[test]
fn test_string_to_int_rejected() {
    let mut fx = Fixture::new();
    fx.var("s", Idx::STRING);
    let s = fx.ident("s");
    let out = convert(&mut fx, "int", s);
    out.single_error(
        ErrorCode::E2021,
        "cannot convert s (variable of type string) to int",
    );
}

#[test]
fn test_string_to_bytes() {
    let mut fx = Fixture::new();
    let byte = fx.ident("byte");
    let bytes = fx.slice_type(byte);
    let hi = fx.string("hi");
    let call = fx.call(bytes, &[hi]);
    let out = fx.check(call);
    out.assert_clean();
    assert_eq!(out.class, ExprClass::Conversion);
    assert_eq!(out.mode(), &Mode::Value);
    assert_eq!(fx.type_str(out.operand.typ), "[]uint8");
    // A constant feeding a non-constant conversion takes its default type.
    assert_eq!(out.info.type_of(hi).map(|tv| tv.ty), Some(Idx::STRING));
}

#[test]
fn test_runes_to_string() {
    let mut fx = Fixture::new();
    let runes = fx.pool.slice(Idx::INT32);
    fx.var("rs", runes);
    let rs = fx.ident("rs");
    let out = convert(&mut fx, "string", rs);
    out.assert_clean();
    assert_eq!(out.mode(), &Mode::Value);
    assert_eq!(out.operand.typ, Idx::STRING);
}

#[test]
fn test_named_type_conversions() {
    let mut fx = Fixture::new();
    let celsius = fx.named("Celsius", Idx::FLOAT64);
    fx.var("f", Idx::FLOAT64);

    let f = fx.ident("f");
    let out = convert(&mut fx, "Celsius", f);
    out.assert_clean();
    assert_eq!(out.operand.typ, celsius);

    let one = fx.int(1);
    let out = convert(&mut fx, "Celsius", one);
    out.assert_clean();
    assert_eq!(out.mode(), &Mode::Constant(ConstValue::Float(1.0)));
    assert_eq!(out.operand.typ, celsius);
    assert_eq!(out.info.type_of(one).map(|tv| tv.ty), Some(celsius));
}

#[test]
fn test_pointer_conversion_same_base() {
    let mut fx = Fixture::new();
    let celsius = fx.named("Celsius", Idx::FLOAT64);
    let ptr = fx.pool.pointer(celsius);
    fx.var("p", ptr);

    let float64 = fx.ident("float64");
    let star = fx.star(float64);
    let target = fx.paren(star);
    let p = fx.ident("p");
    let call = fx.call(target, &[p]);
    let out = fx.check(call);
    out.assert_clean();
    assert_eq!(fx.type_str(out.operand.typ), "*float64");
}

#[test]
fn test_conversion_to_interface() {
    let mut fx = Fixture::new();
    let any = fx.interface(&[]);
    let any_name = fx.named("Any", any);
    let one = fx.int(1);
    let out = convert(&mut fx, "Any", one);
    out.assert_clean();
    assert_eq!(out.mode(), &Mode::Value);
    assert_eq!(out.operand.typ, any_name);
    assert_eq!(out.info.type_of(one).map(|tv| tv.ty), Some(Idx::INT));
}

#[test]
fn test_convertible_to_is_structural() {
    let mut fx = Fixture::new();
    let point = fx.struct_type(&[("X", Idx::INT, false), ("Y", Idx::INT, false)]);
    let a = fx.named("A", point);
    let b = fx.named("B", point);
    fx.var("a", a);
    let expr = fx.ident("a");

    let out = convert(&mut fx, "B", expr);
    out.assert_clean();
    assert_eq!(out.operand.typ, b);
}
