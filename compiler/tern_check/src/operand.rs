//! Operands: the checked result of one expression.

use tern_ir::ExprId;
use tern_types::{BuiltinId, ConstValue, Idx};

/// Category of an operand.
#[derive(Clone, Debug, PartialEq)]
pub enum Mode {
    /// Checking failed; already reported.
    Invalid,
    /// A call with no results.
    NoValue,
    /// A builtin function name, valid only as a callee.
    Builtin(BuiltinId),
    /// A type, valid as a conversion target or method expression base.
    TypeExpr,
    /// A compile-time constant.
    Constant(ConstValue),
    /// An addressable value.
    Variable,
    /// `m[k]`: the value, or `(value, ok)` where two results are accepted.
    MapIndex,
    Value,
    /// `<-ch`: the value, or `(value, ok)` where two results are accepted.
    CommaOk,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Invalid => "invalid operand",
            Mode::NoValue => "no value",
            Mode::Builtin(_) => "built-in",
            Mode::TypeExpr => "type",
            Mode::Constant(_) => "constant",
            Mode::Variable => "variable",
            Mode::MapIndex => "map index expression",
            Mode::Value => "value",
            Mode::CommaOk => "comma, ok expression",
        }
    }
}

/// The checked result of an expression.
#[derive(Clone, Debug, PartialEq)]
pub struct Operand {
    pub mode: Mode,
    /// Source expression, if any. Operands synthesized from a tuple result
    /// point at the call that produced them.
    pub expr: Option<ExprId>,
    pub typ: Idx,
}

impl Default for Operand {
    fn default() -> Self {
        Self::invalid()
    }
}

impl Operand {
    pub const fn invalid() -> Self {
        Operand {
            mode: Mode::Invalid,
            expr: None,
            typ: Idx::INVALID,
        }
    }

    pub fn new(mode: Mode, expr: ExprId, typ: Idx) -> Self {
        Operand {
            mode,
            expr: Some(expr),
            typ,
        }
    }

    #[inline]
    pub fn is_invalid(&self) -> bool {
        matches!(self.mode, Mode::Invalid)
    }

    #[inline]
    pub fn set_invalid(&mut self) {
        self.mode = Mode::Invalid;
    }

    /// Result of a call with no results.
    pub(crate) fn set_no_value(&mut self) {
        self.mode = Mode::NoValue;
        self.typ = Idx::EMPTY_TUPLE;
    }

    /// `m[k]` or `<-ch`, which may stand for a value and a boolean.
    #[inline]
    pub fn is_comma_ok(&self) -> bool {
        matches!(self.mode, Mode::MapIndex | Mode::CommaOk)
    }

    pub fn const_value(&self) -> Option<&ConstValue> {
        match &self.mode {
            Mode::Constant(value) => Some(value),
            _ => None,
        }
    }
}
