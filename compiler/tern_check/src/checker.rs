//! The checker context.
//!
//! One `Checker` lives for one checking pass over a package. It borrows the
//! type pool mutably (new signature and pointer types are interned while
//! checking) and the expression arena immutably, and owns the diagnostic
//! queue and recording tables.

use tern_diagnostic::span_utils::LineOffsetTable;
use tern_diagnostic::{Diagnostic, DiagnosticQueue, ErrorCode};
use tern_ir::{ExprArena, ExprId, ExprPrinter, Name, SharedInterner, Span};
use tern_types::{BasicInfo, Idx, ObjId, PackageId, Pool, ScopeId, Selection};

use crate::{CheckResult, CheckerConfig, InternalError, Mode, Operand, TypeAndValue, TypeInfo};

/// Immutable inputs shared by every check.
pub(crate) struct CheckContext<'a> {
    pub arena: &'a ExprArena,
    pub interner: SharedInterner,
}

/// Queue plus the optional source used to place diagnostics.
pub(crate) struct DiagnosticState {
    pub queue: DiagnosticQueue,
    pub source: Option<(String, LineOffsetTable)>,
}

impl DiagnosticState {
    fn emit(&mut self, diag: Diagnostic) {
        let offset = diag.primary_span().map_or(0, |span| span.start);
        let (line, column) = match &self.source {
            Some((source, table)) => table.offset_to_line_col(source, offset),
            None => (1, offset.saturating_add(1)),
        };
        if !self.queue.emit(diag, line, column) {
            tracing::trace!(line, column, "diagnostic dropped by queue");
        }
    }
}

/// Everything a finished pass produced.
#[derive(Debug)]
pub struct CheckOutput {
    pub info: TypeInfo,
    /// Sorted by position.
    pub diagnostics: Vec<Diagnostic>,
}

pub struct Checker<'a> {
    pub(crate) context: CheckContext<'a>,
    pub(crate) pool: &'a mut Pool,
    /// Package being checked.
    pub(crate) pkg: PackageId,
    /// Scope identifiers resolve in. Must be set before checking.
    pub(crate) scope: Option<ScopeId>,
    /// Declaration whose body is being checked; dependencies accrue to it.
    pub(crate) decl: Option<ObjId>,
    pub(crate) config: CheckerConfig,
    pub(crate) diagnostics: DiagnosticState,
    pub(crate) info: TypeInfo,
    /// Set when the checked expression contains a call or receive.
    pub(crate) has_call_or_recv: bool,
}

impl<'a> Checker<'a> {
    pub fn new(
        pool: &'a mut Pool,
        arena: &'a ExprArena,
        pkg: PackageId,
        config: CheckerConfig,
    ) -> Self {
        let interner = pool.interner().clone();
        let queue = DiagnosticQueue::with_config(config.diagnostics.clone());
        Checker {
            context: CheckContext { arena, interner },
            pool,
            pkg,
            scope: None,
            decl: None,
            config,
            diagnostics: DiagnosticState {
                queue,
                source: None,
            },
            info: TypeInfo::default(),
            has_call_or_recv: false,
        }
    }

    /// Attach source text so diagnostics are ordered by line and column.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        let source = source.into();
        let table = LineOffsetTable::build(&source);
        self.diagnostics.source = Some((source, table));
        self
    }

    pub fn set_scope(&mut self, scope: ScopeId) {
        self.scope = Some(scope);
    }

    pub fn set_decl(&mut self, decl: Option<ObjId>) {
        self.decl = decl;
    }

    pub fn has_call_or_recv(&self) -> bool {
        self.has_call_or_recv
    }

    pub fn pool(&self) -> &Pool {
        &*self.pool
    }

    pub fn info(&self) -> &TypeInfo {
        &self.info
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.queue.error_count()
    }

    pub fn finish(mut self) -> CheckOutput {
        CheckOutput {
            diagnostics: self.diagnostics.queue.flush(),
            info: self.info,
        }
    }

    // === Diagnostics ===

    /// Report a user error with a primary label at `span`.
    pub(crate) fn error(
        &mut self,
        code: ErrorCode,
        span: Span,
        message: impl Into<String>,
        label: &str,
    ) {
        self.report(
            Diagnostic::error(code)
                .with_message(message)
                .with_label(span, label),
        );
    }

    /// Report a fully built diagnostic.
    pub(crate) fn report(&mut self, diag: Diagnostic) {
        tracing::debug!(code = %diag.code, span = ?diag.primary_span(), message = %diag.message, "type error");
        self.diagnostics.emit(diag);
    }

    pub(crate) fn lookup_scope(&self, name: Name) -> CheckResult<ScopeId> {
        self.scope.ok_or_else(|| InternalError::ScopeNotSet {
            name: self.name_str(name).to_owned(),
        })
    }

    // === Rendering ===

    pub(crate) fn name_str(&self, name: Name) -> &'static str {
        self.context.interner.lookup(name)
    }

    pub(crate) fn expr_text(&self, expr: ExprId) -> String {
        ExprPrinter::new(self.context.arena, &self.context.interner).print(expr)
    }

    /// Types of the package being checked print unqualified.
    pub(crate) fn type_string(&self, ty: Idx) -> String {
        self.pool.format_type_from(ty, Some(self.pkg))
    }

    pub(crate) fn span_of(&self, expr: ExprId) -> Span {
        self.context.arena.span(expr)
    }

    /// Where to report a problem with `x`.
    pub(crate) fn operand_span(&self, x: &Operand, fallback: Span) -> Span {
        x.expr.map_or(fallback, |e| self.span_of(e))
    }

    /// `f (variable of type func(int))`, `1 (untyped int constant)`,
    /// `int (type)`.
    pub(crate) fn describe(&self, x: &Operand) -> String {
        let mut buf = String::new();
        let text = x.expr.map(|e| self.expr_text(e));
        if let Some(text) = &text {
            buf.push_str(text);
            buf.push(' ');
        }
        buf.push('(');
        match &x.mode {
            Mode::Invalid | Mode::NoValue | Mode::Builtin(_) | Mode::TypeExpr => {
                buf.push_str(x.mode.name());
            }
            Mode::Constant(value) => {
                let shown = value.to_string();
                if self.pool.basic_info(x.typ).contains(BasicInfo::UNTYPED) {
                    buf.push_str(&self.type_string(x.typ));
                    buf.push_str(" constant");
                    if text.as_deref() != Some(shown.as_str()) {
                        buf.push(' ');
                        buf.push_str(&shown);
                    }
                } else {
                    buf.push_str("constant ");
                    buf.push_str(&shown);
                    buf.push_str(" of type ");
                    buf.push_str(&self.type_string(x.typ));
                }
            }
            Mode::Variable | Mode::MapIndex | Mode::Value | Mode::CommaOk => {
                buf.push_str(x.mode.name());
                buf.push_str(" of type ");
                buf.push_str(&self.type_string(x.typ));
            }
        }
        buf.push(')');
        buf
    }

    // === Recording ===

    pub(crate) fn record_type(&mut self, expr: ExprId, mode: Mode, ty: Idx) {
        self.info.types.insert(expr, TypeAndValue { mode, ty });
    }

    /// Replace the recorded type of an untyped operand once its final type
    /// is known.
    pub(crate) fn update_expr_type(&mut self, expr: Option<ExprId>, ty: Idx) {
        if let Some(entry) = expr.and_then(|e| self.info.types.get_mut(&e)) {
            entry.ty = ty;
        }
    }

    pub(crate) fn record_use(&mut self, expr: ExprId, obj: ObjId) {
        self.info.uses.insert(expr, obj);
    }

    pub(crate) fn record_selection(&mut self, expr: ExprId, selection: Selection) {
        tracing::trace!(?expr, kind = ?selection.kind, "selection");
        self.info.selections.insert(expr, selection);
    }

    /// Note that the current declaration refers to `obj`.
    pub(crate) fn add_decl_dep(&mut self, obj: ObjId) {
        let Some(decl) = self.decl else {
            return;
        };
        let deps = self.info.deps.entry(decl).or_default();
        if !deps.contains(&obj) {
            deps.push(obj);
        }
    }

    pub(crate) fn mark_used(&mut self, obj: ObjId) {
        self.info.used.insert(obj);
    }
}
