//! Source-like rendering of expressions for diagnostics.
//!
//! Messages name the offending construct (`f`, `pkg.Name`, `g()`), so the
//! checker needs a compact textual form of any expression. Argument lists
//! longer than a handful of entries are elided.

use crate::{ExprArena, ExprId, ExprKind, StringInterner};

/// Renders expressions back to source-like text.
pub struct ExprPrinter<'a> {
    arena: &'a ExprArena,
    interner: &'a StringInterner,
}

impl<'a> ExprPrinter<'a> {
    pub fn new(arena: &'a ExprArena, interner: &'a StringInterner) -> Self {
        ExprPrinter { arena, interner }
    }

    /// Render an expression as a string.
    pub fn print(&self, id: ExprId) -> String {
        let mut buf = String::new();
        self.print_into(id, &mut buf);
        buf
    }

    fn print_into(&self, id: ExprId, buf: &mut String) {
        match &self.arena.get_expr(id).kind {
            ExprKind::Ident(name) => buf.push_str(self.interner.lookup(*name)),
            ExprKind::Int(v) => buf.push_str(&v.to_string()),
            ExprKind::Float(bits) => buf.push_str(&f64::from_bits(*bits).to_string()),
            ExprKind::String(name) => {
                buf.push('"');
                buf.push_str(self.interner.lookup(*name));
                buf.push('"');
            }
            ExprKind::Paren(inner) => {
                buf.push('(');
                self.print_into(*inner, buf);
                buf.push(')');
            }
            ExprKind::Call {
                func, args, spread, ..
            } => {
                self.print_into(*func, buf);
                buf.push('(');
                let args = self.arena.get_expr_list(*args);
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        buf.push_str(", ");
                    }
                    if i == 3 && args.len() > 4 {
                        buf.push_str("...");
                        break;
                    }
                    self.print_into(*arg, buf);
                }
                if spread.is_some() {
                    buf.push_str("...");
                }
                buf.push(')');
            }
            ExprKind::Selector { base, sel, .. } => {
                self.print_into(*base, buf);
                buf.push('.');
                buf.push_str(self.interner.lookup(*sel));
            }
            ExprKind::Index { base, index } => {
                self.print_into(*base, buf);
                buf.push('[');
                self.print_into(*index, buf);
                buf.push(']');
            }
            ExprKind::Unary { op, operand } => {
                buf.push_str(op.as_symbol());
                self.print_into(*operand, buf);
            }
            ExprKind::Star(inner) => {
                buf.push('*');
                self.print_into(*inner, buf);
            }
            ExprKind::SliceType(elem) => {
                buf.push_str("[]");
                self.print_into(*elem, buf);
            }
            ExprKind::Error => buf.push_str("<bad expr>"),
        }
    }
}
