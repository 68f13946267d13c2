//! Borrowed views of call and selector nodes.

use tern_ir::{ExprId, Name, Span};

/// A call expression `func(args)` or `func(args...)`.
#[derive(Copy, Clone, Debug)]
pub struct CallSyntax<'a> {
    pub expr: ExprId,
    pub func: ExprId,
    pub args: &'a [ExprId],
    /// Position of the trailing `...`.
    pub spread: Option<Span>,
    pub rparen: Span,
}

impl<'a> CallSyntax<'a> {
    #[inline]
    pub fn has_spread(&self) -> bool {
        self.spread.is_some()
    }
}

/// A selector expression `base.sel`.
#[derive(Copy, Clone, Debug)]
pub struct SelectorSyntax {
    pub expr: ExprId,
    pub base: ExprId,
    pub sel: Name,
    pub sel_span: Span,
}
