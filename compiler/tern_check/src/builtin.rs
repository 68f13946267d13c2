//! Calls of predeclared builtin functions.
//!
//! All builtins share one arity check against [`BuiltinId::info`]. `make`
//! and `new` take a type as their first argument and evaluate their
//! arguments themselves; every other builtin sees its arguments through
//! the multi-value adapter, so `append(f())` works like any call.

use tern_diagnostic::ErrorCode;
use tern_types::{BasicInfo, BuiltinId, ConstValue, Idx, Signature, TypeData};

use crate::unpack::Getter;
use crate::{CallSyntax, CheckResult, Checker, Mode, Operand};

impl<'a> Checker<'a> {
    /// Check a call of `id`. Returns `false` when the call is invalid and
    /// the problem has been reported.
    #[tracing::instrument(level = "trace", skip(self, x, call))]
    pub(crate) fn builtin(
        &mut self,
        x: &mut Operand,
        call: &CallSyntax<'a>,
        id: BuiltinId,
    ) -> CheckResult<bool> {
        let info = id.info();

        if let Some(spread) = call.spread {
            if id != BuiltinId::Append {
                let message = format!("invalid use of spread with built-in {}", info.name);
                self.error(ErrorCode::E2022, spread, message, "spread not allowed here");
                self.use_exprs(call.args)?;
                return Ok(false);
            }
        }

        let takes_type = matches!(id, BuiltinId::Make | BuiltinId::New);
        let (getter, nargs) = if takes_type {
            (Getter::Exprs(call.args), call.args.len())
        } else {
            let Some(unpacked) = self.unpack(Getter::Exprs(call.args), call.args.len(), false)?
            else {
                return Ok(false);
            };
            (unpacked.getter, unpacked.count)
        };
        if !takes_type && nargs > 0 {
            self.get_operand(&getter, x, 0)?;
            if x.is_invalid() {
                return Ok(false);
            }
        }

        let problem = if nargs < info.nargs {
            Some("not enough")
        } else if !info.variadic && nargs > info.nargs {
            Some("too many")
        } else {
            None
        };
        if let Some(problem) = problem {
            let message = format!(
                "{problem} arguments for {} (expected {}, found {nargs})",
                self.expr_text(call.expr),
                info.nargs
            );
            self.error(
                ErrorCode::E2004,
                call.rparen,
                message,
                "wrong number of arguments",
            );
            return Ok(false);
        }

        match id {
            BuiltinId::Append => return self.builtin_append(x, call, getter, nargs),

            BuiltinId::Cap | BuiltinId::Len => {
                let is_string = self.pool.basic_info(x.typ).contains(BasicInfo::STRING);
                let mode = match self.pool.under(x.typ) {
                    TypeData::Basic(_) if is_string && id == BuiltinId::Len => {
                        match x.const_value() {
                            Some(ConstValue::Str(s)) => Mode::Constant(ConstValue::Int(
                                i128::try_from(s.len()).unwrap_or(i128::MAX),
                            )),
                            _ => Mode::Value,
                        }
                    }
                    TypeData::Slice(_) | TypeData::Chan(_) => Mode::Value,
                    TypeData::Map { .. } if id == BuiltinId::Len => Mode::Value,
                    _ => Mode::Invalid,
                };
                if mode == Mode::Invalid {
                    let message = format!("invalid argument: {} for {}", self.describe(x), info.name);
                    self.invalid_arg(x, message);
                    return Ok(false);
                }
                x.mode = mode;
                x.typ = Idx::INT;
            }

            BuiltinId::Close => {
                if !matches!(self.pool.under(x.typ), TypeData::Chan(_)) {
                    let message = format!("invalid argument: {} is not a channel", self.describe(x));
                    self.invalid_arg(x, message);
                    return Ok(false);
                }
                x.set_no_value();
            }

            BuiltinId::Copy => {
                let mut y = Operand::invalid();
                self.get_operand(&getter, &mut y, 1)?;
                if y.is_invalid() {
                    return Ok(false);
                }
                let dst = self.pool.slice_elem(x.typ);
                let src = self.pool.slice_elem(y.typ).or_else(|| {
                    self.pool
                        .basic_info(y.typ)
                        .contains(BasicInfo::STRING)
                        .then_some(Idx::UINT8)
                });
                let message = match (dst, src) {
                    (Some(d), Some(s)) if self.pool.identical(d, s) => None,
                    (Some(_), Some(_)) => Some(format!(
                        "arguments to copy {} and {} have different element types",
                        self.describe(x),
                        self.describe(&y)
                    )),
                    _ => Some(format!(
                        "copy expects slice arguments; found {} and {}",
                        self.describe(x),
                        self.describe(&y)
                    )),
                };
                if let Some(message) = message {
                    self.invalid_arg(x, message);
                    return Ok(false);
                }
                x.mode = Mode::Value;
                x.typ = Idx::INT;
            }

            BuiltinId::Delete => {
                let key = match self.pool.under(x.typ) {
                    TypeData::Map { key, .. } => *key,
                    _ => {
                        let message = format!("invalid argument: {} is not a map", self.describe(x));
                        self.invalid_arg(x, message);
                        return Ok(false);
                    }
                };
                let mut y = Operand::invalid();
                self.get_operand(&getter, &mut y, 1)?;
                if y.is_invalid() {
                    return Ok(false);
                }
                self.assignment(&mut y, Some(key), "argument to delete")?;
                if y.is_invalid() {
                    return Ok(false);
                }
                x.set_no_value();
            }

            BuiltinId::Make => {
                let Some(&first) = call.args.first() else {
                    return Ok(false);
                };
                let Some(target) = self.type_operand(first)? else {
                    return Ok(false);
                };
                let min = match self.pool.under(target) {
                    TypeData::Slice(_) => 2,
                    TypeData::Map { .. } | TypeData::Chan(_) => 1,
                    _ => {
                        let message = format!(
                            "cannot make {}; type must be slice, map, or channel",
                            self.type_string(target)
                        );
                        let span = self.span_of(first);
                        self.error(ErrorCode::E2028, span, message, "not a slice, map, or channel");
                        return Ok(false);
                    }
                };
                if nargs < min || nargs > min + 1 {
                    let message = format!(
                        "{} expects {min} or {} arguments; found {nargs}",
                        self.expr_text(call.expr),
                        min + 1
                    );
                    self.error(ErrorCode::E2004, call.rparen, message, "wrong number of arguments");
                    return Ok(false);
                }
                for &size in &call.args[1..] {
                    self.index_operand(size, "size")?;
                }
                x.mode = Mode::Value;
                x.typ = target;
            }

            BuiltinId::New => {
                let Some(&first) = call.args.first() else {
                    return Ok(false);
                };
                let Some(target) = self.type_operand(first)? else {
                    return Ok(false);
                };
                x.mode = Mode::Value;
                x.typ = self.pool.pointer(target);
            }

            BuiltinId::Panic => {
                let any = self.pool.empty_interface();
                self.assignment(x, Some(any), "argument to panic")?;
                if x.is_invalid() {
                    return Ok(false);
                }
                x.set_no_value();
            }

            BuiltinId::Print | BuiltinId::Println => {
                let context = format!("argument to {}", info.name);
                for index in 0..nargs {
                    if index > 0 {
                        self.get_operand(&getter, x, index)?;
                    }
                    self.assignment(x, None, &context)?;
                    if x.is_invalid() {
                        return Ok(false);
                    }
                }
                x.set_no_value();
            }

            BuiltinId::Recover => {
                x.mode = Mode::Value;
                x.typ = self.pool.empty_interface();
            }
        }

        Ok(true)
    }

    /// `append(s S, xs ...T) S`, checked as a call of that signature.
    fn builtin_append(
        &mut self,
        x: &mut Operand,
        call: &CallSyntax<'a>,
        getter: Getter<'a>,
        nargs: usize,
    ) -> CheckResult<bool> {
        let slice = x.typ;
        let Some(elem) = self.pool.slice_elem(slice) else {
            let message = format!("invalid argument: {} is not a slice", self.describe(x));
            self.invalid_arg(x, message);
            return Ok(false);
        };

        let mut prefix = vec![x.clone()];

        // append([]byte, string...)
        if nargs == 2 && call.has_spread() && self.pool.underlying(elem) == Idx::UINT8 {
            let mut y = Operand::invalid();
            self.get_operand(&getter, &mut y, 1)?;
            if y.is_invalid() {
                return Ok(false);
            }
            if self.pool.basic_info(y.typ).contains(BasicInfo::STRING) {
                x.mode = Mode::Value;
                x.typ = slice;
                return Ok(true);
            }
            prefix.push(y);
        }

        let tail = self.pool.slice(elem);
        let params = self.pool.tuple_of(&[slice, tail]);
        let results = self.pool.tuple_of(&[slice]);
        let sig = Signature {
            recv: None,
            params,
            results,
            variadic: true,
        };
        let primed = Getter::Primed {
            prefix,
            rest: Box::new(getter),
        };
        self.arguments(x, call, &sig, &primed, nargs)?;

        x.mode = Mode::Value;
        x.typ = slice;
        Ok(true)
    }

    fn invalid_arg(&mut self, x: &mut Operand, message: String) {
        let span = self.operand_span(x, tern_ir::Span::DUMMY);
        self.error(ErrorCode::E2028, span, message, "invalid argument");
        x.set_invalid();
    }
}
