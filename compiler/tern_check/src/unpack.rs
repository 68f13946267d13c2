//! Lazy multi-value adapter.
//!
//! An argument list `f(a, b)` yields one operand per expression. A single
//! argument may itself stand for several operands: `f(g())` where `g`
//! returns a tuple, or `v, ok := m[k]` where a comma-ok expression yields
//! a value and a boolean. [`Checker::unpack`] evaluates such a single
//! argument once and hands back a getter over the operands it stands for.

use tern_ir::ExprId;
use tern_types::Idx;

use crate::{CheckResult, Checker, InternalError, Mode, Operand};

/// Produces the operand at a position of an argument list.
#[derive(Clone, Debug)]
pub(crate) enum Getter<'a> {
    /// Evaluate the expression at that position.
    Exprs(&'a [ExprId]),
    /// Elements of the tuple produced by `expr`.
    Results { expr: Option<ExprId>, types: Idx },
    /// The value and the `ok` boolean of a comma-ok expression.
    CommaOk { expr: Option<ExprId>, types: [Idx; 2] },
    /// The only operand, evaluated already.
    Cached(Operand),
    /// Leading operands evaluated already, the rest from `rest`.
    Primed {
        prefix: Vec<Operand>,
        rest: Box<Getter<'a>>,
    },
}

#[derive(Clone, Debug)]
pub(crate) struct Unpacked<'a> {
    pub getter: Getter<'a>,
    pub count: usize,
    /// A comma-ok expression was expanded into two operands.
    pub comma_ok: bool,
}

impl<'a> Checker<'a> {
    pub(crate) fn get_operand(
        &mut self,
        getter: &Getter<'a>,
        x: &mut Operand,
        index: usize,
    ) -> CheckResult<()> {
        match getter {
            Getter::Exprs(exprs) => {
                let &expr = exprs
                    .get(index)
                    .ok_or(InternalError::UnpackIndex { index })?;
                self.multi_expr(x, expr)
            }
            Getter::Results { expr, types } => {
                let var = self
                    .pool
                    .tuple_vars(*types)
                    .get(index)
                    .copied()
                    .ok_or(InternalError::UnpackIndex { index })?;
                x.mode = Mode::Value;
                x.expr = *expr;
                x.typ = var.ty;
                Ok(())
            }
            Getter::CommaOk { expr, types } => {
                let &ty = types
                    .get(index)
                    .ok_or(InternalError::UnpackIndex { index })?;
                x.mode = Mode::Value;
                x.expr = *expr;
                x.typ = ty;
                Ok(())
            }
            Getter::Cached(cached) => {
                if index != 0 {
                    return Err(InternalError::UnpackIndex { index });
                }
                x.clone_from(cached);
                Ok(())
            }
            Getter::Primed { prefix, rest } => match prefix.get(index) {
                Some(operand) => {
                    x.clone_from(operand);
                    Ok(())
                }
                None => self.get_operand(rest, x, index),
            },
        }
    }

    /// Look through a single operand that stands for several.
    ///
    /// Returns `None` when the only operand is invalid. For any count other
    /// than one the getter is returned untouched. A comma-ok operand expands
    /// to two operands only when `allow_comma_ok` is set; otherwise it is
    /// demoted to a plain value.
    #[tracing::instrument(level = "trace", skip(self, getter))]
    pub(crate) fn unpack(
        &mut self,
        getter: Getter<'a>,
        n: usize,
        allow_comma_ok: bool,
    ) -> CheckResult<Option<Unpacked<'a>>> {
        if n != 1 {
            return Ok(Some(Unpacked {
                getter,
                count: n,
                comma_ok: false,
            }));
        }

        let mut x = Operand::invalid();
        self.get_operand(&getter, &mut x, 0)?;
        if x.is_invalid() {
            return Ok(None);
        }

        if self.pool.is_tuple(x.typ) {
            let count = self.pool.tuple_len(x.typ);
            tracing::trace!(count, "multi-valued operand expanded");
            return Ok(Some(Unpacked {
                getter: Getter::Results {
                    expr: x.expr,
                    types: x.typ,
                },
                count,
                comma_ok: false,
            }));
        }

        if x.is_comma_ok() {
            if allow_comma_ok {
                return Ok(Some(Unpacked {
                    getter: Getter::CommaOk {
                        expr: x.expr,
                        types: [x.typ, Idx::UNTYPED_BOOL],
                    },
                    count: 2,
                    comma_ok: true,
                }));
            }
            tracing::debug!("comma-ok operand demoted to its value");
            x.mode = Mode::Value;
        }

        Ok(Some(Unpacked {
            getter: Getter::Cached(x),
            count: 1,
            comma_ok: false,
        }))
    }

    /// Evaluate expressions for their diagnostics and recordings only.
    pub(crate) fn use_exprs(&mut self, exprs: &[ExprId]) -> CheckResult<()> {
        let mut x = Operand::invalid();
        for &expr in exprs {
            self.raw_expr(&mut x, expr)?;
        }
        Ok(())
    }

    /// Like [`Checker::use_exprs`], through a getter so that an operand
    /// already evaluated by [`Checker::unpack`] is not evaluated again.
    pub(crate) fn use_getter(&mut self, getter: &Getter<'a>, n: usize) -> CheckResult<()> {
        let mut x = Operand::invalid();
        for index in 0..n {
            self.get_operand(getter, &mut x, index)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
