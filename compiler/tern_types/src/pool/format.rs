//! Type formatting for diagnostics and debugging.

#![allow(clippy::format_push_string)]

use crate::{Idx, PackageId, Pool, Signature, TypeData, Var};

impl Pool {
    /// Format a type without package qualification.
    pub fn format_type(&self, idx: Idx) -> String {
        self.format_type_from(idx, None)
    }

    /// Format a type as seen from package `from`: named types declared in
    /// another package are written `pkg.T`.
    pub fn format_type_from(&self, idx: Idx, from: Option<PackageId>) -> String {
        let mut buf = String::new();
        self.format_type_into(idx, from, &mut buf);
        buf
    }

    /// Format a signature as `func(params) results`.
    pub fn format_signature(&self, sig: &Signature, from: Option<PackageId>) -> String {
        let mut buf = String::from("func");
        self.format_signature_into(sig, from, &mut buf);
        buf
    }

    fn format_type_into(&self, idx: Idx, from: Option<PackageId>, buf: &mut String) {
        match self.get(idx) {
            TypeData::Basic(kind) => buf.push_str(kind.name()),
            TypeData::Slice(elem) => {
                buf.push_str("[]");
                self.format_type_into(*elem, from, buf);
            }
            TypeData::Pointer(base) => {
                buf.push('*');
                self.format_type_into(*base, from, buf);
            }
            TypeData::Map { key, value } => {
                buf.push_str("map[");
                self.format_type_into(*key, from, buf);
                buf.push(']');
                self.format_type_into(*value, from, buf);
            }
            TypeData::Chan(elem) => {
                buf.push_str("chan ");
                self.format_type_into(*elem, from, buf);
            }
            TypeData::Tuple(vars) => self.format_vars(vars, false, from, buf),
            TypeData::Signature(sig) => {
                buf.push_str("func");
                self.format_signature_into(sig, from, buf);
            }
            TypeData::Struct(fields) => {
                buf.push_str("struct{");
                for (i, &field) in fields.iter().enumerate() {
                    if i > 0 {
                        buf.push_str("; ");
                    }
                    let obj = self.object(field);
                    if !obj.is_embedded_field() {
                        buf.push_str(self.name_str(obj.name));
                        buf.push(' ');
                    }
                    self.format_type_into(obj.ty, from, buf);
                }
                buf.push('}');
            }
            TypeData::Interface(data) => {
                buf.push_str("interface{");
                let mut first = true;
                for &m in &data.methods {
                    if !first {
                        buf.push_str("; ");
                    }
                    first = false;
                    let obj = self.object(m);
                    buf.push_str(self.name_str(obj.name));
                    if let Some(sig) = self.signature_of(obj.ty) {
                        self.format_signature_into(sig, from, buf);
                    }
                }
                for &embed in &data.embeds {
                    if !first {
                        buf.push_str("; ");
                    }
                    first = false;
                    self.format_type_into(embed, from, buf);
                }
                buf.push('}');
            }
            TypeData::Named(data) => {
                let obj = self.object(data.obj);
                if let Some(pkg) = obj.pkg.filter(|&p| from.is_some_and(|f| f != p)) {
                    buf.push_str(self.name_str(self.package(pkg).name));
                    buf.push('.');
                }
                buf.push_str(self.name_str(obj.name));
            }
        }
    }

    fn format_signature_into(&self, sig: &Signature, from: Option<PackageId>, buf: &mut String) {
        self.format_vars(self.tuple_vars(sig.params), sig.variadic, from, buf);
        let results = self.tuple_vars(sig.results);
        match results {
            [] => {}
            [single] if single.name.is_empty() => {
                buf.push(' ');
                self.format_type_into(single.ty, from, buf);
            }
            _ => {
                buf.push(' ');
                self.format_vars(results, false, from, buf);
            }
        }
    }

    fn format_vars(&self, vars: &[Var], variadic: bool, from: Option<PackageId>, buf: &mut String) {
        buf.push('(');
        for (i, var) in vars.iter().enumerate() {
            if i > 0 {
                buf.push_str(", ");
            }
            if !var.name.is_empty() {
                buf.push_str(self.name_str(var.name));
                buf.push(' ');
            }
            if variadic && i + 1 == vars.len() {
                buf.push_str("...");
                let elem = self.slice_elem(var.ty).unwrap_or(var.ty);
                self.format_type_into(elem, from, buf);
            } else {
                self.format_type_into(var.ty, from, buf);
            }
        }
        buf.push(')');
    }
}
