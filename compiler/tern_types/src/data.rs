//! Type data stored in the pool.

use tern_ir::Name;

use crate::{BasicKind, Idx, ObjId};

/// A named, typed slot in a parameter, result or receiver list.
///
/// Unnamed parameters carry [`Name::EMPTY`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Var {
    pub name: Name,
    pub ty: Idx,
}

impl Var {
    pub const fn new(name: Name, ty: Idx) -> Self {
        Var { name, ty }
    }

    pub const fn unnamed(ty: Idx) -> Self {
        Var {
            name: Name::EMPTY,
            ty,
        }
    }
}

/// A function or method signature.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Signature {
    /// Receiver, present only for methods.
    pub recv: Option<Var>,
    /// Parameter list, always a [`TypeData::Tuple`].
    pub params: Idx,
    /// Result list, always a [`TypeData::Tuple`].
    pub results: Idx,
    /// The last parameter is `...T`, stored with slice type `[]T`.
    pub variadic: bool,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct InterfaceData {
    /// Explicitly declared methods (`Func` objects without receiver).
    pub methods: Vec<ObjId>,
    /// Embedded interface types.
    pub embeds: Vec<Idx>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct NamedData {
    /// The declaring `TypeName` object.
    pub obj: ObjId,
    /// Underlying type; never itself a `Named`.
    pub underlying: Idx,
    /// Methods declared with this type as receiver base.
    pub methods: Vec<ObjId>,
}

/// The shape of a type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeData {
    Basic(BasicKind),
    /// `[]T`
    Slice(Idx),
    /// `*T`
    Pointer(Idx),
    /// `map[K]V`
    Map { key: Idx, value: Idx },
    /// `chan T`
    Chan(Idx),
    /// Ordered list of values staging parameters or results.
    ///
    /// Tuples never contain tuples.
    Tuple(Vec<Var>),
    Signature(Signature),
    /// Struct with its field objects (`Var` objects with `is_field`).
    Struct(Vec<ObjId>),
    Interface(InterfaceData),
    Named(NamedData),
}

impl TypeData {
    /// Whether values of this shape are interned structurally.
    ///
    /// Structs, interfaces and named types have identity and are always
    /// allocated fresh.
    pub(crate) fn is_structural(&self) -> bool {
        matches!(
            self,
            TypeData::Slice(_)
                | TypeData::Pointer(_)
                | TypeData::Map { .. }
                | TypeData::Chan(_)
                | TypeData::Tuple(_)
                | TypeData::Signature(_)
        )
    }
}
