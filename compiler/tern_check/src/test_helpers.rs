//! Fixture for checker tests.
//!
//! Builds a pool with one package `main`, a function scope nested in the
//! package scope, and an arena that expressions are added to one node at a
//! time. Every node gets a distinct span so tests can assert where a
//! diagnostic points.

use tern_diagnostic::{Diagnostic, ErrorCode};
use tern_ir::{Expr, ExprArena, ExprId, ExprKind, Name, SharedInterner, Span, UnaryOp};
use tern_types::{ConstValue, ExprClass, Idx, ObjId, PackageId, Pool, ScopeId, Var};

use crate::{CheckResult, Checker, CheckerConfig, Mode, Operand, TypeInfo};

pub(crate) struct Fixture {
    pub pool: Pool,
    pub arena: ExprArena,
    pub pkg: PackageId,
    /// Function body scope; its parent is the package scope.
    pub scope: ScopeId,
    /// Declaration the checked expressions belong to.
    pub decl: ObjId,
    pub config: CheckerConfig,
    pos: u32,
}

/// Result of checking one expression.
pub(crate) struct Outcome {
    pub operand: Operand,
    pub class: ExprClass,
    pub diagnostics: Vec<Diagnostic>,
    pub info: TypeInfo,
    pub has_call_or_recv: bool,
}

impl Outcome {
    pub fn messages(&self) -> Vec<&str> {
        self.diagnostics.iter().map(|d| d.message.as_str()).collect()
    }

    pub fn mode(&self) -> &Mode {
        &self.operand.mode
    }

    #[track_caller]
    pub fn assert_clean(&self) {
        assert!(
            self.diagnostics.is_empty(),
            "unexpected diagnostics: {:#?}",
            self.messages()
        );
    }

    /// The only diagnostic, which must carry `code` and mention `fragment`.
    #[track_caller]
    pub fn single_error(&self, code: ErrorCode, fragment: &str) -> &Diagnostic {
        assert_eq!(
            self.diagnostics.len(),
            1,
            "expected one diagnostic, got {:#?}",
            self.messages()
        );
        self.error(code, fragment)
    }

    /// Some diagnostic with `code` mentioning `fragment`.
    #[track_caller]
    pub fn error(&self, code: ErrorCode, fragment: &str) -> &Diagnostic {
        match self
            .diagnostics
            .iter()
            .find(|d| d.code == code && d.message.contains(fragment))
        {
            Some(diag) => diag,
            None => panic!(
                "no {code} diagnostic containing {fragment:?} in {:#?}",
                self.messages()
            ),
        }
    }
}

impl Fixture {
    pub fn new() -> Self {
        let mut pool = Pool::new(SharedInterner::new());
        let main = pool.interner().intern("main");
        let pkg = pool.new_package(main, "main", false);
        let pkg_scope = pool.package(pkg).scope;
        let scope = pool.new_scope(Some(pkg_scope));
        let sig = pool.func_type(&[], &[], false);
        let decl = pool.new_func(Some(pkg), main, sig);
        pool.declare(pkg_scope, decl);
        Fixture {
            pool,
            arena: ExprArena::new(),
            pkg,
            scope,
            decl,
            config: CheckerConfig::unlimited(),
            pos: 0,
        }
    }

    pub fn name(&self, s: &str) -> Name {
        self.pool.interner().intern(s)
    }

    pub fn type_str(&self, ty: Idx) -> String {
        self.pool.format_type_from(ty, Some(self.pkg))
    }

    pub fn span(&self, expr: ExprId) -> Span {
        self.arena.span(expr)
    }

    fn next_span(&mut self, width: usize) -> Span {
        let width = u32::try_from(width.max(1)).unwrap_or(u32::MAX / 2);
        let span = Span::new(self.pos, self.pos + width);
        self.pos += width + 1;
        span
    }

    fn alloc(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.arena.alloc_expr(Expr::new(kind, span))
    }

    // === Expressions ===

    pub fn ident(&mut self, s: &str) -> ExprId {
        let name = self.name(s);
        let span = self.next_span(s.len());
        self.alloc(ExprKind::Ident(name), span)
    }

    pub fn int(&mut self, value: i64) -> ExprId {
        let span = self.next_span(value.to_string().len());
        self.alloc(ExprKind::Int(value), span)
    }

    pub fn float(&mut self, value: f64) -> ExprId {
        let span = self.next_span(value.to_string().len());
        self.alloc(ExprKind::Float(value.to_bits()), span)
    }

    pub fn string(&mut self, s: &str) -> ExprId {
        let name = self.name(s);
        let span = self.next_span(s.len() + 2);
        self.alloc(ExprKind::String(name), span)
    }

    pub fn paren(&mut self, inner: ExprId) -> ExprId {
        let span = self.span(inner);
        self.alloc(ExprKind::Paren(inner), span)
    }

    pub fn call(&mut self, func: ExprId, args: &[ExprId]) -> ExprId {
        self.call_with(func, args, false)
    }

    /// `func(args...)`
    pub fn call_spread(&mut self, func: ExprId, args: &[ExprId]) -> ExprId {
        self.call_with(func, args, true)
    }

    fn call_with(&mut self, func: ExprId, args: &[ExprId], spread: bool) -> ExprId {
        let spread = spread.then(|| self.next_span(3));
        let rparen = self.next_span(1);
        let span = self.span(func).merge(rparen);
        let args = self.arena.alloc_expr_list(args.iter().copied());
        self.alloc(
            ExprKind::Call {
                func,
                args,
                spread,
                rparen,
            },
            span,
        )
    }

    /// Call a named function: `name(args)`.
    pub fn call_named(&mut self, name: &str, args: &[ExprId]) -> ExprId {
        let func = self.ident(name);
        self.call(func, args)
    }

    pub fn selector(&mut self, base: ExprId, sel: &str) -> ExprId {
        let name = self.name(sel);
        let sel_span = self.next_span(sel.len());
        let span = self.span(base).merge(sel_span);
        self.alloc(
            ExprKind::Selector {
                base,
                sel: name,
                sel_span,
            },
            span,
        )
    }

    /// `base.sel` with `base` an identifier.
    pub fn select(&mut self, base: &str, sel: &str) -> ExprId {
        let base = self.ident(base);
        self.selector(base, sel)
    }

    pub fn index(&mut self, base: ExprId, index: ExprId) -> ExprId {
        let end = self.next_span(1);
        let span = self.span(base).merge(end);
        self.alloc(ExprKind::Index { base, index }, span)
    }

    fn unary(&mut self, op: UnaryOp, operand: ExprId) -> ExprId {
        let span = self.span(operand);
        self.alloc(ExprKind::Unary { op, operand }, span)
    }

    pub fn addr(&mut self, operand: ExprId) -> ExprId {
        self.unary(UnaryOp::Addr, operand)
    }

    pub fn recv(&mut self, operand: ExprId) -> ExprId {
        self.unary(UnaryOp::Recv, operand)
    }

    pub fn star(&mut self, inner: ExprId) -> ExprId {
        let span = self.span(inner);
        self.alloc(ExprKind::Star(inner), span)
    }

    pub fn slice_type(&mut self, elem: ExprId) -> ExprId {
        let span = self.span(elem);
        self.alloc(ExprKind::SliceType(elem), span)
    }

    pub fn error_expr(&mut self) -> ExprId {
        let span = self.next_span(1);
        self.alloc(ExprKind::Error, span)
    }

    // === Declarations in the function scope ===

    pub fn var(&mut self, s: &str, ty: Idx) -> ObjId {
        let name = self.name(s);
        let obj = self.pool.new_var(Some(self.pkg), name, ty);
        self.pool.declare(self.scope, obj);
        obj
    }

    pub fn constant(&mut self, s: &str, ty: Idx, value: ConstValue) -> ObjId {
        let name = self.name(s);
        let obj = self.pool.new_const(Some(self.pkg), name, ty, value);
        self.pool.declare(self.scope, obj);
        obj
    }

    /// With `variadic`, the last entry of `params` is the element type:
    /// `sig(&[INT], &[], true)` is `func(...int)`.
    pub fn sig(&mut self, params: &[Idx], results: &[Idx], variadic: bool) -> Idx {
        let mut params = params.to_vec();
        if variadic {
            if let Some(last) = params.last_mut() {
                *last = self.pool.slice(*last);
            }
        }
        self.pool.func_type(&params, results, variadic)
    }

    pub fn func(&mut self, s: &str, params: &[Idx], results: &[Idx], variadic: bool) -> ObjId {
        let sig = self.sig(params, results, variadic);
        let name = self.name(s);
        let obj = self.pool.new_func(Some(self.pkg), name, sig);
        self.pool.declare(self.scope, obj);
        obj
    }

    // === Types ===

    /// `type s underlying`, declared in the package scope.
    pub fn named(&mut self, s: &str, underlying: Idx) -> Idx {
        let name = self.name(s);
        let ty = self.pool.new_named(Some(self.pkg), name, underlying);
        if let Some(obj) = self.pool.named_obj(ty) {
            let pkg_scope = self.pool.package(self.pkg).scope;
            self.pool.declare(pkg_scope, obj);
        }
        ty
    }

    /// Struct type; embedded fields are named after their type.
    pub fn struct_type(&mut self, fields: &[(&str, Idx, bool)]) -> Idx {
        let mut objs = Vec::with_capacity(fields.len());
        for &(field, ty, embedded) in fields {
            let field = self.name(field);
            objs.push(self.pool.new_field(Some(self.pkg), field, ty, embedded));
        }
        self.pool.struct_type(objs)
    }

    pub fn named_struct(&mut self, s: &str, fields: &[(&str, Idx, bool)]) -> Idx {
        let st = self.struct_type(fields);
        self.named(s, st)
    }

    pub fn method(
        &mut self,
        recv: Idx,
        s: &str,
        pointer: bool,
        params: &[Idx],
        results: &[Idx],
    ) -> ObjId {
        let name = self.name(s);
        self.pool.declare_method(
            recv,
            name,
            pointer,
            params.iter().copied().map(Var::unnamed).collect(),
            results.iter().copied().map(Var::unnamed).collect(),
            false,
        )
    }

    /// Interface of methods without parameters or results.
    pub fn interface(&mut self, methods: &[&str]) -> Idx {
        let sig = self.sig(&[], &[], false);
        let objs = methods
            .iter()
            .map(|m| {
                let name = self.name(m);
                self.pool.new_func(Some(self.pkg), name, sig)
            })
            .collect();
        self.pool.interface(objs, Vec::new())
    }

    // === Imported packages ===

    /// Import package `s` into the function scope. Returns the package and
    /// its `PkgName` object.
    pub fn import(&mut self, s: &str, fake: bool) -> (PackageId, ObjId) {
        let name = self.name(s);
        let imported = self.pool.new_package(name, format!("example.com/{s}"), fake);
        let pkg_name = self.pool.new_pkg_name(self.pkg, name, imported);
        self.pool.declare(self.scope, pkg_name);
        (imported, pkg_name)
    }

    pub fn declare_in(&mut self, pkg: PackageId, obj: ObjId) -> ObjId {
        let scope = self.pool.package(pkg).scope;
        self.pool.declare(scope, obj);
        obj
    }

    // === Running ===

    /// Check `expr` with no restriction on its mode.
    pub fn check(&mut self, expr: ExprId) -> Outcome {
        self.run(|checker, x| checker.raw_expr(x, expr))
            .unwrap_or_else(|err| panic!("internal error: {err}"))
    }

    pub fn try_check(&mut self, expr: ExprId) -> CheckResult<Outcome> {
        self.run(|checker, x| checker.raw_expr(x, expr))
    }

    /// Run `f` against a checker over the fixture's pool and arena.
    pub fn run(
        &mut self,
        f: impl FnOnce(&mut Checker<'_>, &mut Operand) -> CheckResult<ExprClass>,
    ) -> CheckResult<Outcome> {
        let mut checker = Checker::new(&mut self.pool, &self.arena, self.pkg, self.config.clone());
        checker.set_scope(self.scope);
        checker.set_decl(Some(self.decl));
        let mut x = Operand::invalid();
        let class = f(&mut checker, &mut x)?;
        let has_call_or_recv = checker.has_call_or_recv();
        let output = checker.finish();
        Ok(Outcome {
            operand: x,
            class,
            diagnostics: output.diagnostics,
            info: output.info,
            has_call_or_recv,
        })
    }
}
