//! Selector expressions `x.sel`.
//!
//! Four shapes:
//!
//! | base                 | result                                        |
//! |----------------------|-----------------------------------------------|
//! | package name `p`     | the member of `p`, by declaration kind        |
//! | type `T`             | method expression, receiver as first parameter |
//! | value or variable    | field, or method value without receiver       |
//! | invalid              | invalid, nothing reported                     |

use tern_diagnostic::ErrorCode;
use tern_ir::ExprKind;
use tern_types::{
    LookupResult, ObjId, ObjKind, PackageId, Selection, SelectionKind, Signature, TypeData, Var,
};

use crate::{CheckResult, Checker, InternalError, Mode, Operand, SelectorSyntax};

impl Checker<'_> {
    #[tracing::instrument(level = "trace", skip_all, fields(sel = self.name_str(sel.sel)))]
    pub fn selector(&mut self, x: &mut Operand, sel: &SelectorSyntax) -> CheckResult<()> {
        let scope = self.lookup_scope(sel.sel)?;

        if let ExprKind::Ident(ident) = self.context.arena.get_expr(sel.base).kind {
            if let Some((_, obj)) = self.pool.lookup_parent(scope, ident) {
                if let ObjKind::PkgName { imported } = self.pool.object(obj).kind {
                    return self.qualified_member(x, sel, obj, imported);
                }
            }
        }

        self.expr_or_type(x, sel.base)?;
        if x.is_invalid() {
            x.expr = Some(sel.expr);
            return Ok(());
        }

        let result = self.pool.lookup_field_or_method(
            x.typ,
            x.mode == Mode::Variable,
            Some(self.pkg),
            sel.sel,
        );
        let Some(obj) = result.obj else {
            self.report_missing_member(x, sel, &result);
            x.set_invalid();
            x.expr = Some(sel.expr);
            return Ok(());
        };

        if x.mode == Mode::TypeExpr {
            self.method_expr(x, sel, obj, result)?;
        } else {
            self.member_value(x, sel, obj, result)?;
        }
        x.expr = Some(sel.expr);
        Ok(())
    }

    /// `pkg.Name`
    fn qualified_member(
        &mut self,
        x: &mut Operand,
        sel: &SelectorSyntax,
        pkg_name: ObjId,
        imported: PackageId,
    ) -> CheckResult<()> {
        if self.pool.object(pkg_name).pkg != Some(self.pkg) {
            return Err(InternalError::ForeignPkgName {
                name: self.name_str(self.pool.object(pkg_name).name).to_owned(),
            });
        }
        self.record_use(sel.base, pkg_name);
        self.mark_used(pkg_name);

        let package = self.pool.package(imported);
        let (pkg_label, fake) = (self.name_str(package.name), package.fake);
        let member = self.pool.scope(package.scope).lookup(sel.sel);
        let name = self.name_str(sel.sel);
        x.expr = Some(sel.expr);

        let Some(member) = member else {
            if !fake {
                self.error(
                    ErrorCode::E2023,
                    sel.sel_span,
                    format!("{name} not declared by package {pkg_label}"),
                    "not declared",
                );
            }
            x.set_invalid();
            return Ok(());
        };

        if !self.pool.object(member).exported && !fake {
            self.error(
                ErrorCode::E2024,
                sel.sel_span,
                format!("{name} not exported by package {pkg_label}"),
                "not exported",
            );
        }
        self.record_use(sel.expr, member);

        let object = self.pool.object(member);
        x.typ = object.ty;
        x.mode = match &object.kind {
            ObjKind::Const(value) => Mode::Constant(value.clone()),
            ObjKind::TypeName => Mode::TypeExpr,
            ObjKind::Var { .. } => Mode::Variable,
            ObjKind::Func => Mode::Value,
            ObjKind::Builtin(id) => Mode::Builtin(*id),
            ObjKind::PkgName { .. } | ObjKind::Nil => {
                return Err(InternalError::UnexpectedObject {
                    name: name.to_owned(),
                    kind: match object.kind {
                        ObjKind::Nil => "nil",
                        _ => "package name",
                    },
                });
            }
        };
        Ok(())
    }

    fn report_missing_member(&mut self, x: &Operand, sel: &SelectorSyntax, result: &LookupResult) {
        let name = self.name_str(sel.sel);
        if result.is_ambiguous() {
            self.error(
                ErrorCode::E2026,
                sel.sel_span,
                format!("ambiguous selector {name}"),
                "reachable through several embedded fields",
            );
        } else if result.needs_addressable() {
            let message = format!(
                "{name} is not in method set of {}",
                self.type_string(x.typ)
            );
            self.error(
                ErrorCode::E2027,
                sel.sel_span,
                message,
                "method needs an addressable receiver",
            );
        } else {
            let message = format!("{} has no field or method {name}", self.describe(x));
            self.error(ErrorCode::E2025, sel.sel_span, message, "unknown member");
        }
    }

    /// `T.m`: a function taking the receiver as its first parameter.
    fn method_expr(
        &mut self,
        x: &mut Operand,
        sel: &SelectorSyntax,
        obj: ObjId,
        result: LookupResult,
    ) -> CheckResult<()> {
        let sig = match self.pool.object(obj).kind {
            ObjKind::Func => self.pool.signature_of(self.pool.object(obj).ty).cloned(),
            _ => None,
        };
        let Some(sig) = sig else {
            let message = format!(
                "{} has no method {}",
                self.describe(x),
                self.name_str(sel.sel)
            );
            self.error(ErrorCode::E2025, sel.sel_span, message, "not a method");
            x.set_invalid();
            return Ok(());
        };

        self.record_selection(
            sel.expr,
            Selection {
                kind: SelectionKind::MethodExpr,
                recv: x.typ,
                obj,
                index: result.index,
                indirect: result.indirect,
            },
        );

        let mut params = Vec::with_capacity(self.pool.tuple_len(sig.params) + 1);
        params.push(Var::unnamed(x.typ));
        params.extend_from_slice(self.pool.tuple_vars(sig.params));
        let params = self.pool.tuple(params);
        x.mode = Mode::Value;
        x.typ = self.pool.signature_type(Signature {
            recv: None,
            params,
            results: sig.results,
            variadic: sig.variadic,
        });
        self.add_decl_dep(obj);
        Ok(())
    }

    /// `x.f` or `x.m` on a value or variable.
    fn member_value(
        &mut self,
        x: &mut Operand,
        sel: &SelectorSyntax,
        obj: ObjId,
        result: LookupResult,
    ) -> CheckResult<()> {
        let object = self.pool.object(obj);
        match object.kind {
            ObjKind::Var { is_field: true, .. } => {
                let field_ty = object.ty;
                self.record_selection(
                    sel.expr,
                    Selection {
                        kind: SelectionKind::FieldVal,
                        recv: x.typ,
                        obj,
                        index: result.index,
                        indirect: result.indirect,
                    },
                );
                x.mode = if x.mode == Mode::Variable || result.indirect {
                    Mode::Variable
                } else {
                    Mode::Value
                };
                x.typ = field_ty;
            }
            ObjKind::Func => {
                let Some(sig) = self.pool.signature_of(object.ty).cloned() else {
                    return Err(self.unexpected_selection(sel));
                };
                self.record_selection(
                    sel.expr,
                    Selection {
                        kind: SelectionKind::MethodVal,
                        recv: x.typ,
                        obj,
                        index: result.index,
                        indirect: result.indirect,
                    },
                );
                if self.config.verify_method_sets {
                    self.verify_method_set(x, sel, obj)?;
                }
                x.mode = Mode::Value;
                x.typ = self.pool.signature_type(Signature { recv: None, ..sig });
                self.add_decl_dep(obj);
            }
            _ => return Err(self.unexpected_selection(sel)),
        }
        Ok(())
    }

    fn unexpected_selection(&self, sel: &SelectorSyntax) -> InternalError {
        InternalError::UnexpectedSelection {
            name: self.name_str(sel.sel).to_owned(),
        }
    }

    /// The method found by lookup must be the one the receiver's method
    /// set holds. An addressable receiver `x` of type `T` is looked up in
    /// the method set of `*T`.
    fn verify_method_set(&mut self, x: &Operand, sel: &SelectorSyntax, obj: ObjId) -> CheckResult<()> {
        let mut recv = x.typ;
        if x.mode == Mode::Variable
            && !matches!(self.pool.get(recv), TypeData::Pointer(_))
            && !self.pool.is_interface(recv)
        {
            recv = self.pool.pointer(recv);
        }
        let method_set = self.pool.method_set(recv);
        let found = method_set
            .lookup(&*self.pool, Some(self.pkg), sel.sel)
            .map(|selection| selection.obj);
        if found == Some(obj) {
            return Ok(());
        }
        tracing::error!(?found, ?obj, "method set disagrees with lookup");
        Err(InternalError::MethodSetMismatch {
            recv: self.type_string(recv),
            name: self.name_str(sel.sel).to_owned(),
        })
    }
}
