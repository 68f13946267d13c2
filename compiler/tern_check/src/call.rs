//! Call classification and argument matching.

use tern_diagnostic::ErrorCode;
use tern_ir::Span;
use tern_types::{ExprClass, Idx, Signature};

use crate::unpack::Getter;
use crate::{CallSyntax, CheckResult, Checker, InternalError, Mode, Operand};

impl<'a> Checker<'a> {
    /// Check a call or conversion and classify it.
    ///
    /// The callee is evaluated first. A type callee makes this a
    /// conversion, a builtin callee dispatches to the builtin's rule, and
    /// anything else must have a signature type. On return `x` describes
    /// the whole call expression.
    #[tracing::instrument(level = "trace", skip_all, fields(call = ?call.expr, args = call.args.len()))]
    pub fn call(&mut self, x: &mut Operand, call: &CallSyntax<'a>) -> CheckResult<ExprClass> {
        self.expr_or_type(x, call.func)?;

        match x.mode {
            Mode::Invalid => {
                self.use_exprs(call.args)?;
                x.set_invalid();
                x.expr = Some(call.expr);
                Ok(ExprClass::Statement)
            }

            Mode::TypeExpr => {
                let target = x.typ;
                x.set_invalid();
                match call.args {
                    [] => {
                        let message =
                            format!("missing argument in conversion to {}", self.type_string(target));
                        self.error(
                            ErrorCode::E2004,
                            call.rparen,
                            message,
                            "expected one argument",
                        );
                    }
                    [arg] => {
                        self.expr(x, *arg)?;
                        if !x.is_invalid() {
                            self.conversion(x, target)?;
                        }
                    }
                    [.., last] => {
                        let message =
                            format!("too many arguments in conversion to {}", self.type_string(target));
                        let span = self.span_of(*last);
                        self.error(ErrorCode::E2004, span, message, "unexpected argument");
                    }
                }
                x.expr = Some(call.expr);
                Ok(ExprClass::Conversion)
            }

            Mode::Builtin(id) => {
                if !self.builtin(x, call, id)? {
                    x.set_invalid();
                }
                x.expr = Some(call.expr);
                if !matches!(x.mode, Mode::Invalid | Mode::Constant(_)) {
                    self.has_call_or_recv = true;
                }
                Ok(id.info().class)
            }

            _ => {
                let Some(sig) = self.pool.signature_of(x.typ).cloned() else {
                    let message = format!("cannot call non-function {}", self.describe(x));
                    let span = self.operand_span(x, self.span_of(call.func));
                    self.error(ErrorCode::E2020, span, message, "not a function");
                    x.set_invalid();
                    x.expr = Some(call.expr);
                    return Ok(ExprClass::Statement);
                };

                match self.unpack(Getter::Exprs(call.args), call.args.len(), false)? {
                    Some(unpacked) => {
                        debug_assert!(!unpacked.comma_ok, "comma-ok expanded in argument list");
                        self.arguments(x, call, &sig, &unpacked.getter, unpacked.count)?;
                    }
                    None => x.set_invalid(),
                }

                let results = self.pool.tuple_vars(sig.results);
                match results {
                    [] => x.set_no_value(),
                    [single] => {
                        x.mode = Mode::Value;
                        x.typ = single.ty;
                    }
                    _ => {
                        x.mode = Mode::Value;
                        x.typ = sig.results;
                    }
                }
                x.expr = Some(call.expr);
                self.has_call_or_recv = true;
                Ok(ExprClass::Statement)
            }
        }
    }

    /// Match `n` operands from `getter` against the parameters of `sig`.
    ///
    /// Every argument is checked even after one fails, so that
    /// independent problems surface together.
    #[tracing::instrument(level = "trace", skip_all, fields(n = n, variadic = sig.variadic))]
    pub(crate) fn arguments(
        &mut self,
        x: &mut Operand,
        call: &CallSyntax<'a>,
        sig: &Signature,
        getter: &Getter<'a>,
        n: usize,
    ) -> CheckResult<()> {
        if let Some(spread) = call.spread {
            if !sig.variadic {
                tracing::debug!("spread rejected: callee is not variadic");
                let message = format!(
                    "cannot use spread in call to non-variadic {}",
                    self.expr_text(call.func)
                );
                self.error(ErrorCode::E2022, spread, message, "callee is not variadic");
                return self.use_getter(getter, n);
            }
            if call.args.len() == 1 && n > 1 {
                tracing::debug!(n, "spread rejected: argument is multi-valued");
                let message = format!(
                    "cannot use spread with {n}-valued expression {}",
                    self.expr_text(call.args[0])
                );
                self.error(ErrorCode::E2022, spread, message, "multi-valued argument");
                return self.use_getter(getter, n);
            }
        }

        for index in 0..n {
            self.get_operand(getter, x, index)?;
            if !x.is_invalid() {
                let spread = if index + 1 == n { call.spread } else { None };
                self.argument(x, call, sig, index, spread)?;
            }
        }

        let mut matched = n;
        if sig.variadic {
            // The variadic tail may be empty.
            matched += 1;
        }
        let required = self.pool.tuple_len(sig.params);
        if matched < required {
            let message = format!("too few arguments in call to {}", self.expr_text(call.func));
            self.error(
                ErrorCode::E2004,
                call.rparen,
                message,
                format!("expected {required} arguments, found {n}").as_str(),
            );
        }
        Ok(())
    }

    /// Bind the operand at `index` to its parameter.
    pub(crate) fn argument(
        &mut self,
        x: &mut Operand,
        call: &CallSyntax<'a>,
        sig: &Signature,
        index: usize,
        spread: Option<Span>,
    ) -> CheckResult<()> {
        if x.is_comma_ok() {
            x.mode = Mode::Value;
        }
        self.single_value(x);
        if x.is_invalid() {
            return Ok(());
        }

        let params = self.pool.tuple_vars(sig.params);
        let n = params.len();
        let param = match params.get(index) {
            Some(param) => Some(param.ty),
            None if sig.variadic => params.last().map(|last| last.ty),
            None => None,
        };
        let Some(mut target) = param else {
            let message = format!("too many arguments in call to {}", self.expr_text(call.func));
            let span = self.operand_span(x, call.rparen);
            self.error(ErrorCode::E2004, span, message, "unexpected argument");
            x.set_invalid();
            return Ok(());
        };

        if let Some(spread) = spread {
            if index + 1 != n {
                let message = "can only use spread with matching parameter";
                self.error(ErrorCode::E2022, spread, message, "not the variadic parameter");
                x.set_invalid();
                return Ok(());
            }
            if self.pool.slice_elem(x.typ).is_none() && x.typ != Idx::UNTYPED_NIL {
                let message = format!(
                    "cannot use {} as spread parameter of type {}",
                    self.describe(x),
                    self.type_string(target)
                );
                let span = self.operand_span(x, spread);
                self.error(ErrorCode::E2022, span, message, "not a slice");
                x.set_invalid();
                return Ok(());
            }
        } else if sig.variadic && index + 1 >= n {
            target = self
                .pool
                .slice_elem(target)
                .ok_or_else(|| InternalError::NonSliceVariadic {
                    ty: self.type_string(target),
                })?;
        }

        let context = format!("argument to {}", self.expr_text(call.func));
        self.assignment(x, Some(target), &context)
    }

    /// Reject a multi-valued operand where one value is expected.
    pub(crate) fn single_value(&mut self, x: &mut Operand) {
        if x.mode == Mode::Value && self.pool.is_tuple(x.typ) {
            let count = self.pool.tuple_len(x.typ);
            debug_assert_ne!(count, 1, "single-element tuples are never formed");
            let message = format!(
                "{count}-valued {} where single value is expected",
                self.describe(x)
            );
            let span = self.operand_span(x, Span::DUMMY);
            self.error(ErrorCode::E2029, span, message, "multiple values");
            x.set_invalid();
        }
    }
}
