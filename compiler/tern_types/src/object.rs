//! Declared objects: everything a name can resolve to.

use tern_ir::{Name, Span};

use crate::{BuiltinId, ConstValue, Idx, PackageId};

/// Handle to an [`Object`] in the pool.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Debug)]
#[repr(transparent)]
pub struct ObjId(u32);

impl ObjId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        ObjId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// What kind of entity an object is.
#[derive(Clone, Debug, PartialEq)]
pub enum ObjKind {
    Const(ConstValue),
    /// Variable, parameter or struct field.
    Var { is_field: bool, embedded: bool },
    /// Function or method. A method's signature has a receiver.
    Func,
    TypeName,
    Builtin(BuiltinId),
    /// Import binding in a file scope.
    PkgName { imported: PackageId },
    /// The predeclared `nil`.
    Nil,
}

/// A declared entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Object {
    pub name: Name,
    pub span: Span,
    /// Declaring package; `None` for universe objects.
    pub pkg: Option<PackageId>,
    pub ty: Idx,
    pub kind: ObjKind,
    /// Cached exportedness of `name`.
    pub exported: bool,
}

impl Object {
    /// Whether this object is identified by (`pkg`, `name`).
    ///
    /// Exported names are global; unexported names are qualified by their
    /// declaring package.
    pub fn same_id(&self, pkg: Option<PackageId>, name: Name) -> bool {
        if self.name != name {
            return false;
        }
        self.exported || self.pkg == pkg
    }

    #[inline]
    pub fn is_func(&self) -> bool {
        matches!(self.kind, ObjKind::Func)
    }

    #[inline]
    pub fn is_field(&self) -> bool {
        matches!(self.kind, ObjKind::Var { is_field: true, .. })
    }

    #[inline]
    pub fn is_embedded_field(&self) -> bool {
        matches!(
            self.kind,
            ObjKind::Var {
                is_field: true,
                embedded: true
            }
        )
    }
}

/// A name is exported if it begins with an uppercase letter.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}
