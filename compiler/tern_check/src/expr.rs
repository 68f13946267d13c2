//! Expression evaluation.
//!
//! Drives the call and selector checks from the expression tree. Only the
//! forms that can appear around a call or selector are handled: names,
//! literals, parentheses, indexing, receive, address-of, dereference and
//! the pointer and slice type forms.
//!
//! Three entry points differ in what they accept:
//!
//! - [`Checker::expr`]: exactly one value
//! - [`Checker::multi_expr`]: one value, or a tuple from a multi-valued call
//! - [`Checker::expr_or_type`]: a value or a type

use tern_diagnostic::ErrorCode;
use tern_ir::{ExprId, ExprKind, Name, UnaryOp};
use tern_types::{BasicInfo, ConstValue, ExprClass, Idx, ObjKind, TypeData};

use crate::stack::ensure_sufficient_stack;
use crate::{CallSyntax, CheckResult, Checker, Mode, Operand, SelectorSyntax};

impl<'a> Checker<'a> {
    /// Evaluate `expr` into `x` with no restriction on the resulting mode,
    /// and record its mode and type.
    pub fn raw_expr(&mut self, x: &mut Operand, expr: ExprId) -> CheckResult<ExprClass> {
        let class = ensure_sufficient_stack(|| self.expr_kind(x, expr))?;
        if !x.is_invalid() {
            self.record_type(expr, x.mode.clone(), x.typ);
        }
        Ok(class)
    }

    /// Evaluate a single-valued expression.
    pub fn expr(&mut self, x: &mut Operand, expr: ExprId) -> CheckResult<()> {
        self.multi_expr(x, expr)?;
        self.single_value(x);
        Ok(())
    }

    /// Evaluate an expression that may be a multi-valued call.
    pub fn multi_expr(&mut self, x: &mut Operand, expr: ExprId) -> CheckResult<()> {
        self.raw_expr(x, expr)?;
        self.exclude(x, false);
        Ok(())
    }

    /// Evaluate an expression that may denote a type.
    pub fn expr_or_type(&mut self, x: &mut Operand, expr: ExprId) -> CheckResult<()> {
        self.raw_expr(x, expr)?;
        self.exclude(x, true);
        Ok(())
    }

    /// Reject operands that are not values here.
    fn exclude(&mut self, x: &mut Operand, allow_type: bool) {
        let problem = match x.mode {
            Mode::NoValue if allow_type => "used as value or type",
            Mode::NoValue => "used as value",
            Mode::Builtin(_) => "must be called",
            Mode::TypeExpr if !allow_type => "is not an expression",
            _ => return,
        };
        let message = format!("{} {problem}", self.describe(x));
        let span = self.operand_span(x, tern_ir::Span::DUMMY);
        self.error(ErrorCode::E2029, span, message, problem);
        x.set_invalid();
    }

    fn expr_kind(&mut self, x: &mut Operand, expr: ExprId) -> CheckResult<ExprClass> {
        let arena = self.context.arena;
        x.set_invalid();
        x.typ = Idx::INVALID;

        match arena.get_expr(expr).kind {
            ExprKind::Ident(name) => self.ident(x, expr, name)?,

            ExprKind::Int(value) => {
                x.mode = Mode::Constant(ConstValue::Int(i128::from(value)));
                x.typ = Idx::UNTYPED_INT;
            }
            ExprKind::Float(bits) => {
                x.mode = Mode::Constant(ConstValue::Float(f64::from_bits(bits)));
                x.typ = Idx::UNTYPED_FLOAT;
            }
            ExprKind::String(text) => {
                x.mode = Mode::Constant(ConstValue::Str(self.name_str(text).to_owned()));
                x.typ = Idx::UNTYPED_STRING;
            }

            ExprKind::Paren(inner) => {
                let class = self.raw_expr(x, inner)?;
                x.expr = Some(expr);
                return Ok(class);
            }

            ExprKind::Call {
                func,
                args,
                spread,
                rparen,
            } => {
                let call = CallSyntax {
                    expr,
                    func,
                    args: arena.get_expr_list(args),
                    spread,
                    rparen,
                };
                return self.call(x, &call);
            }

            ExprKind::Selector {
                base,
                sel,
                sel_span,
            } => {
                let sel = SelectorSyntax {
                    expr,
                    base,
                    sel,
                    sel_span,
                };
                self.selector(x, &sel)?;
            }

            ExprKind::Index { base, index } => self.index_expr(x, expr, base, index)?,

            ExprKind::Unary {
                op: UnaryOp::Addr,
                operand,
            } => {
                self.expr(x, operand)?;
                if !x.is_invalid() {
                    if x.mode == Mode::Variable {
                        x.mode = Mode::Value;
                        x.typ = self.pool.pointer(x.typ);
                    } else {
                        let message = format!("cannot take address of {}", self.describe(x));
                        self.error(ErrorCode::E2030, self.span_of(expr), message, "not addressable");
                        x.set_invalid();
                    }
                }
            }

            ExprKind::Unary {
                op: UnaryOp::Recv,
                operand,
            } => {
                self.expr(x, operand)?;
                if !x.is_invalid() {
                    if let TypeData::Chan(elem) = *self.pool.under(x.typ) {
                        x.mode = Mode::CommaOk;
                        x.typ = elem;
                        self.has_call_or_recv = true;
                    } else {
                        let message =
                            format!("cannot receive from non-channel {}", self.describe(x));
                        self.error(ErrorCode::E2030, self.span_of(expr), message, "not a channel");
                        x.set_invalid();
                    }
                }
            }

            ExprKind::Star(inner) => {
                self.expr_or_type(x, inner)?;
                match x.mode {
                    Mode::Invalid => {}
                    Mode::TypeExpr => x.typ = self.pool.pointer(x.typ),
                    _ => {
                        if let Some(base) = self.pool.pointer_base(x.typ) {
                            x.mode = Mode::Variable;
                            x.typ = base;
                        } else {
                            let message = format!("invalid indirect of {}", self.describe(x));
                            self.error(ErrorCode::E2030, self.span_of(expr), message, "not a pointer");
                            x.set_invalid();
                        }
                    }
                }
            }

            ExprKind::SliceType(elem) => {
                if let Some(elem) = self.type_operand(elem)? {
                    x.mode = Mode::TypeExpr;
                    x.typ = self.pool.slice(elem);
                }
            }

            // Reported by the parser.
            ExprKind::Error => x.set_invalid(),
        }

        x.expr = Some(expr);
        Ok(ExprClass::Expression)
    }

    fn ident(&mut self, x: &mut Operand, expr: ExprId, name: Name) -> CheckResult<()> {
        if name.is_blank() {
            self.error(
                ErrorCode::E2029,
                self.span_of(expr),
                "cannot use _ as value",
                "blank identifier",
            );
            return Ok(());
        }

        let scope = self.lookup_scope(name)?;
        let Some((_, obj)) = self.pool.lookup_parent(scope, name) else {
            let message = format!("undeclared name: {}", self.name_str(name));
            self.error(ErrorCode::E2003, self.span_of(expr), message, "not found in this scope");
            return Ok(());
        };
        self.record_use(expr, obj);

        let object = self.pool.object(obj);
        let (kind, ty) = (object.kind.clone(), object.ty);
        x.typ = ty;
        x.mode = match kind {
            ObjKind::PkgName { .. } => {
                let message = format!("use of package {} without selector", self.name_str(name));
                self.error(ErrorCode::E2029, self.span_of(expr), message, "package name");
                Mode::Invalid
            }
            ObjKind::Const(value) => Mode::Constant(value),
            ObjKind::TypeName => Mode::TypeExpr,
            ObjKind::Var { .. } => {
                self.mark_used(obj);
                Mode::Variable
            }
            ObjKind::Func => {
                self.add_decl_dep(obj);
                Mode::Value
            }
            ObjKind::Builtin(id) => {
                x.typ = Idx::INVALID;
                Mode::Builtin(id)
            }
            ObjKind::Nil => Mode::Value,
        };
        Ok(())
    }

    fn index_expr(
        &mut self,
        x: &mut Operand,
        expr: ExprId,
        base: ExprId,
        index: ExprId,
    ) -> CheckResult<()> {
        self.expr(x, base)?;
        if x.is_invalid() {
            return Ok(());
        }

        let is_string = self.pool.basic_info(x.typ).contains(BasicInfo::STRING);
        match *self.pool.under(x.typ) {
            TypeData::Map { key, value } => {
                let mut k = Operand::invalid();
                self.expr(&mut k, index)?;
                self.assignment(&mut k, Some(key), "map index")?;
                x.mode = Mode::MapIndex;
                x.typ = value;
            }
            TypeData::Slice(elem) => {
                self.index_operand(index, "index")?;
                x.mode = Mode::Variable;
                x.typ = elem;
            }
            TypeData::Basic(_) if is_string => {
                self.index_operand(index, "index")?;
                x.mode = Mode::Value;
                x.typ = Idx::UINT8;
            }
            _ => {
                let message = format!("cannot index {}", self.describe(x));
                self.error(ErrorCode::E2030, self.span_of(expr), message, "not indexable");
                x.set_invalid();
            }
        }
        Ok(())
    }

    /// Check an index or size argument: a non-negative integer. Returns
    /// whether it is valid.
    pub(crate) fn index_operand(&mut self, expr: ExprId, what: &str) -> CheckResult<bool> {
        let mut y = Operand::invalid();
        self.expr(&mut y, expr)?;
        if y.is_invalid() {
            return Ok(false);
        }
        self.convert_untyped(&mut y, Idx::INT, what);
        if y.is_invalid() {
            return Ok(false);
        }

        let problem = if !self.is_integer(y.typ) {
            Some("must be integer")
        } else if matches!(y.const_value(), Some(ConstValue::Int(v)) if *v < 0) {
            Some("must not be negative")
        } else {
            None
        };
        if let Some(problem) = problem {
            let message = format!("{what} {} {problem}", self.describe(&y));
            self.error(ErrorCode::E2030, self.span_of(expr), message, problem);
            return Ok(false);
        }
        Ok(true)
    }

    /// Evaluate `expr` as a type. Reports and returns `None` if it is not
    /// one.
    pub(crate) fn type_operand(&mut self, expr: ExprId) -> CheckResult<Option<Idx>> {
        let mut y = Operand::invalid();
        self.expr_or_type(&mut y, expr)?;
        match y.mode {
            Mode::Invalid => Ok(None),
            Mode::TypeExpr => Ok(Some(y.typ)),
            _ => {
                let message = format!("{} is not a type", self.describe(&y));
                self.error(ErrorCode::E2029, self.span_of(expr), message, "expected a type");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests;
