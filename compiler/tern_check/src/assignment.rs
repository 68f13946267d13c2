//! Assignability of an operand to a target type.
//!
//! Untyped operands first take the target type (or their default type
//! when the target is an interface or absent). The typed operand is then
//! assignable when:
//!
//! - its type is identical to the target;
//! - the underlying types are identical and at least one side is unnamed;
//! - the target is an interface the operand's type implements;
//! - it is untyped `nil` and the target has `nil` as a value.

use tern_diagnostic::{Diagnostic, ErrorCode};
use tern_types::{BasicInfo, BasicKind, ConstValue, Idx, TypeData};

use crate::{CheckResult, Checker, Mode, Operand};

/// How an untyped operand meets its target.
enum TargetShape {
    Basic(BasicKind),
    Interface,
    /// Pointer, slice, map, channel or function: only `nil` converts.
    Nilable,
    Other,
}

impl Checker<'_> {
    /// Check that `x` may be used as a value of `target` in `context`
    /// (`"argument to f"`). Without a target an untyped `x` takes its
    /// default type.
    pub(crate) fn assignment(
        &mut self,
        x: &mut Operand,
        target: Option<Idx>,
        context: &str,
    ) -> CheckResult<()> {
        self.single_value(x);
        match x.mode {
            Mode::Invalid => return Ok(()),
            Mode::Constant(_) | Mode::Variable | Mode::MapIndex | Mode::Value | Mode::CommaOk => {}
            Mode::NoValue | Mode::Builtin(_) | Mode::TypeExpr => {
                let message = format!("{} used as value", self.describe(x));
                let span = self.operand_span(x, tern_ir::Span::DUMMY);
                self.error(ErrorCode::E2029, span, message, "not a value");
                x.set_invalid();
                return Ok(());
            }
        }

        if self.pool.is_untyped(x.typ) {
            let untyped_target = match target {
                Some(t) if !self.pool.is_interface(t) => t,
                _ => {
                    if target.is_none() && x.typ == Idx::UNTYPED_NIL {
                        let message = format!("use of untyped nil in {context}");
                        let span = self.operand_span(x, tern_ir::Span::DUMMY);
                        self.error(ErrorCode::E2001, span, message, "untyped nil");
                        x.set_invalid();
                        return Ok(());
                    }
                    self.pool.default_type(x.typ)
                }
            };
            self.convert_untyped(x, untyped_target, context);
            if x.is_invalid() {
                return Ok(());
            }
        }

        let Some(target) = target else {
            return Ok(());
        };
        if !self.assignable_to(x, target) {
            let message = format!(
                "cannot use {} as {} value in {context}",
                self.describe(x),
                self.type_string(target)
            );
            let span = self.operand_span(x, tern_ir::Span::DUMMY);
            let mut diag = Diagnostic::error(ErrorCode::E2001)
                .with_message(message)
                .with_label(span, "type mismatch");
            if self.pool.is_interface(target) {
                if let Some((method, wrong_type)) = self.pool.missing_method(x.typ, target) {
                    let method = self.name_str(self.pool.object(method).name);
                    diag = diag.with_note(if wrong_type {
                        format!("wrong type for method {method}")
                    } else {
                        format!("missing method {method}")
                    });
                }
            }
            self.report(diag);
            x.set_invalid();
        }
        Ok(())
    }

    fn target_shape(&self, target: Idx) -> TargetShape {
        match self.pool.under(target) {
            TypeData::Basic(kind) => TargetShape::Basic(*kind),
            TypeData::Interface(_) => TargetShape::Interface,
            TypeData::Pointer(_)
            | TypeData::Slice(_)
            | TypeData::Map { .. }
            | TypeData::Chan(_)
            | TypeData::Signature(_) => TargetShape::Nilable,
            _ => TargetShape::Other,
        }
    }

    /// Give an untyped operand the type `target`, or report why it cannot
    /// take it.
    pub(crate) fn convert_untyped(&mut self, x: &mut Operand, target: Idx, context: &str) {
        if !self.pool.is_untyped(x.typ) || target == Idx::INVALID {
            return;
        }

        if self.pool.is_untyped(target) {
            let (from, to) = (self.pool.basic_info(x.typ), self.pool.basic_info(target));
            if from.intersects(BasicInfo::NUMERIC) && to.intersects(BasicInfo::NUMERIC) {
                // untyped int < rune < float
                if target.raw() > x.typ.raw() {
                    x.typ = target;
                    self.update_expr_type(x.expr, target);
                }
            } else if x.typ != target {
                self.untyped_mismatch(x, target, context, None);
            }
            return;
        }

        match self.target_shape(target) {
            TargetShape::Basic(kind) => {
                if let Mode::Constant(value) = &x.mode {
                    match value.representable(kind) {
                        Some(converted) => x.mode = Mode::Constant(converted),
                        None => {
                            let reason = unrepresentable_reason(value, kind);
                            self.untyped_mismatch(x, target, context, reason);
                            return;
                        }
                    }
                } else {
                    // Untyped non-constants are comparison and comma-ok
                    // booleans, or nil.
                    let ok = x.typ == Idx::UNTYPED_BOOL
                        && kind.info().contains(BasicInfo::BOOLEAN);
                    if !ok {
                        self.untyped_mismatch(x, target, context, None);
                        return;
                    }
                }
            }
            TargetShape::Interface => {
                if x.typ != Idx::UNTYPED_NIL {
                    let default = self.pool.default_type(x.typ);
                    self.convert_untyped(x, default, context);
                }
                return;
            }
            TargetShape::Nilable => {
                if x.typ != Idx::UNTYPED_NIL {
                    self.untyped_mismatch(x, target, context, None);
                }
                // nil keeps its untyped type
                return;
            }
            TargetShape::Other => {
                self.untyped_mismatch(x, target, context, None);
                return;
            }
        }

        x.typ = target;
        self.update_expr_type(x.expr, target);
    }

    fn untyped_mismatch(
        &mut self,
        x: &mut Operand,
        target: Idx,
        context: &str,
        reason: Option<&str>,
    ) {
        let mut message = format!(
            "cannot use {} as {} value in {context}",
            self.describe(x),
            self.type_string(target)
        );
        if let Some(reason) = reason {
            message.push_str(" (");
            message.push_str(reason);
            message.push(')');
        }
        let span = self.operand_span(x, tern_ir::Span::DUMMY);
        self.error(ErrorCode::E2001, span, message, reason.unwrap_or("type mismatch"));
        x.set_invalid();
    }

    /// Whether `x`, with any untyped conversion already applied, may be
    /// assigned to `target`.
    pub(crate) fn assignable_to(&self, x: &Operand, target: Idx) -> bool {
        let v = x.typ;
        if v == Idx::INVALID || target == Idx::INVALID {
            // Reported already.
            return true;
        }

        if self.pool.is_untyped(v) {
            match self.target_shape(target) {
                TargetShape::Basic(kind) => {
                    if v == Idx::UNTYPED_NIL {
                        return false;
                    }
                    if let Some(value) = x.const_value() {
                        return value.representable(kind).is_some();
                    }
                    return v == Idx::UNTYPED_BOOL && kind.info().contains(BasicInfo::BOOLEAN);
                }
                TargetShape::Interface => {
                    return v == Idx::UNTYPED_NIL || self.pool.interface_methods(target).is_empty();
                }
                TargetShape::Nilable => return v == Idx::UNTYPED_NIL,
                TargetShape::Other => {}
            }
        }

        if self.pool.identical(v, target) {
            return true;
        }

        let (vu, tu) = (self.pool.underlying(v), self.pool.underlying(target));
        if self.pool.identical(vu, tu) && (!self.pool.is_named(v) || !self.pool.is_named(target)) {
            return true;
        }

        self.pool.is_interface(target) && self.pool.missing_method(v, target).is_none()
    }
}

/// Why a numeric constant does not fit a basic kind.
fn unrepresentable_reason(value: &ConstValue, kind: BasicKind) -> Option<&'static str> {
    if !kind.info().intersects(BasicInfo::NUMERIC) {
        return None;
    }
    match value {
        ConstValue::Float(_)
            if kind.info().contains(BasicInfo::INTEGER) && value.to_int().is_none() =>
        {
            Some("truncated")
        }
        ConstValue::Int(_) | ConstValue::Float(_) => Some("overflows"),
        _ => None,
    }
}
