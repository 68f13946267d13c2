//! AST nodes for expressions.
//!
//! Only the expression forms the call and selector checker needs are
//! modelled: identifiers, literals, calls, selectors, indexing, receive,
//! address-of, dereference and the type forms that may appear as a
//! conversion target or method-expression base.

use crate::{ExprId, ExprRange, Name, Span};

/// An expression node with its source span.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

/// Expression variants.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExprKind {
    /// Identifier reference: `x`, `fmt`, `int`
    Ident(Name),

    /// Integer literal: `42`
    Int(i64),

    /// Floating-point literal, stored as bits: `1.5`
    Float(u64),

    /// String literal: `"hi"`
    String(Name),

    /// Parenthesized expression: `(x)`
    Paren(ExprId),

    /// Call or conversion: `f(a, b)`, `f(xs...)`, `T(x)`
    Call {
        func: ExprId,
        args: ExprRange,
        /// Position of the trailing `...`, if present.
        spread: Option<Span>,
        /// Position of the closing parenthesis.
        rparen: Span,
    },

    /// Selector: `x.f`, `pkg.Name`, `T.Method`
    Selector {
        base: ExprId,
        sel: Name,
        sel_span: Span,
    },

    /// Index: `m[k]`, `xs[i]`
    Index { base: ExprId, index: ExprId },

    /// Prefix operator: `&x`, `<-ch`
    Unary { op: UnaryOp, operand: ExprId },

    /// Dereference or pointer type: `*p`, `*T`
    Star(ExprId),

    /// Slice type: `[]T`
    SliceType(ExprId),

    /// Placeholder left by the parser for a malformed expression.
    Error,
}

/// Prefix operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `&x`
    Addr,
    /// `<-ch`
    Recv,
}

impl UnaryOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            UnaryOp::Addr => "&",
            UnaryOp::Recv => "<-",
        }
    }
}
