//! Conversions `T(x)`.

use tern_diagnostic::ErrorCode;
use tern_types::{BasicInfo, ConstValue, Idx, TypeData};

use crate::{CheckResult, Checker, Mode, Operand};

impl Checker<'_> {
    /// Convert `x` to `target`, leaving the converted operand in `x`.
    ///
    /// A constant converted to a constant-capable basic type stays a
    /// constant; every other conversion yields a value.
    pub(crate) fn conversion(&mut self, x: &mut Operand, target: Idx) -> CheckResult<()> {
        let const_arg = matches!(x.mode, Mode::Constant(_));
        let target_info = self.pool.basic_info(target);
        let const_target = target_info.intersects(BasicInfo::CONST_TYPE);

        // Outer `Some` when this is a constant conversion.
        let constant = match (&x.mode, const_target) {
            (Mode::Constant(value), true) => Some(
                match self.pool.basic_kind(target).and_then(|k| value.representable(k)) {
                    Some(converted) => Some(converted),
                    None if self.is_integer(x.typ) && target_info.contains(BasicInfo::STRING) => {
                        Some(ConstValue::codepoint_string(value.to_int().unwrap_or(-1)))
                    }
                    None => None,
                },
            ),
            _ => None,
        };

        let ok = match constant {
            Some(Some(converted)) => {
                x.mode = Mode::Constant(converted);
                true
            }
            Some(None) => false,
            None if self.convertible_to(x, target) => {
                x.mode = Mode::Value;
                true
            }
            None => false,
        };

        if !ok {
            let message = format!(
                "cannot convert {} to {}",
                self.describe(x),
                self.type_string(target)
            );
            let span = self.operand_span(x, tern_ir::Span::DUMMY);
            self.error(ErrorCode::E2021, span, message, "invalid conversion");
            x.set_invalid();
            return Ok(());
        }

        // The argument's final type is the target, except where the
        // conversion does not carry the untyped value over directly.
        if self.pool.is_untyped(x.typ) {
            let final_ty = if self.pool.is_interface(target) || (const_arg && !const_target) {
                self.pool.default_type(x.typ)
            } else if self.is_integer(x.typ) && target_info.contains(BasicInfo::STRING) {
                x.typ
            } else {
                target
            };
            self.update_expr_type(x.expr, final_ty);
        }
        x.typ = target;
        Ok(())
    }

    pub(crate) fn is_integer(&self, ty: Idx) -> bool {
        self.pool.basic_info(ty).contains(BasicInfo::INTEGER)
    }

    /// `[]byte` or `[]rune` underneath.
    fn is_bytes_or_runes(&self, ty: Idx) -> bool {
        self.pool
            .slice_elem(ty)
            .is_some_and(|elem| matches!(self.pool.underlying(elem), Idx::UINT8 | Idx::INT32))
    }

    /// Non-constant convertibility of `x` to `target`.
    pub(crate) fn convertible_to(&self, x: &Operand, target: Idx) -> bool {
        if self.assignable_to(x, target) {
            return true;
        }

        let v = x.typ;
        let (vu, tu) = (self.pool.underlying(v), self.pool.underlying(target));
        if self.pool.identical(vu, tu) {
            return true;
        }

        if let (TypeData::Pointer(vb), TypeData::Pointer(tb)) = (self.pool.get(v), self.pool.get(target)) {
            if self.pool.identical(self.pool.underlying(*vb), self.pool.underlying(*tb)) {
                return true;
            }
        }

        let (vi, ti) = (self.pool.basic_info(v), self.pool.basic_info(target));
        if vi.intersects(BasicInfo::NUMERIC) && ti.intersects(BasicInfo::NUMERIC) {
            return true;
        }

        if ti.contains(BasicInfo::STRING)
            && (vi.contains(BasicInfo::INTEGER) || self.is_bytes_or_runes(v))
        {
            return true;
        }

        vi.contains(BasicInfo::STRING) && self.is_bytes_or_runes(target)
    }
}

#[cfg(test)]
mod tests;
