//! Type system for Tern.
//!
//! All types live in a single [`Pool`] and are referenced by 32-bit [`Idx`]
//! handles. Declared entities (constants, variables, fields, functions,
//! methods, type names, builtins, package names) are [`Object`]s in the
//! same pool, addressed by [`ObjId`]. Scopes and packages are pool-owned
//! as well, so the checker never holds references into the graph, only
//! indices.
//!
//! # Member lookup
//!
//! [`Pool::lookup_field_or_method`] performs the breadth-first search over
//! embedded fields that resolves `x.f`, and [`Pool::method_set`] computes
//! the complete method set of a type. Both follow the same depth, collision
//! and addressability rules.

mod basic;
mod builtin;
mod constant;
mod data;
mod idx;
mod lookup;
mod method_set;
mod object;
mod package;
mod pool;
mod predicates;
mod scope;
mod selection;
mod universe;

pub use basic::{BasicInfo, BasicKind};
pub use builtin::{BuiltinId, BuiltinInfo, ExprClass};
pub use constant::ConstValue;
pub use data::{InterfaceData, NamedData, Signature, TypeData, Var};
pub use idx::Idx;
pub use lookup::LookupResult;
pub use method_set::MethodSet;
pub use object::{is_exported, ObjId, ObjKind, Object};
pub use package::{Package, PackageId};
pub use pool::Pool;
pub use scope::{Scope, ScopeId};
pub use selection::{FieldPath, Selection, SelectionKind};

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Idx, ObjId};
    tern_ir::static_assert_size!(Idx, 4);
    tern_ir::static_assert_size!(ObjId, 4);
}
