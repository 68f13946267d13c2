//! The universe scope: predeclared types, constants, `nil` and builtins.

use tern_ir::Span;

use crate::{BasicKind, BuiltinId, ConstValue, Idx, ObjKind, Pool, ScopeId, Var};

/// Populate the universe scope. Returns the `error` type.
pub(crate) fn populate(pool: &mut Pool) -> Idx {
    let interner = pool.interner().clone();
    let define = |pool: &mut Pool, name: &str, ty: Idx, kind: ObjKind| {
        let obj = pool.new_object(interner.intern(name), Span::DUMMY, None, ty, kind);
        pool.declare(ScopeId::UNIVERSE, obj);
    };

    for kind in [
        BasicKind::Bool,
        BasicKind::Int,
        BasicKind::Int32,
        BasicKind::Int64,
        BasicKind::Uint8,
        BasicKind::Float64,
        BasicKind::String,
    ] {
        define(pool, kind.name(), kind.idx(), ObjKind::TypeName);
    }
    define(pool, "byte", Idx::UINT8, ObjKind::TypeName);
    define(pool, "rune", Idx::INT32, ObjKind::TypeName);

    for (name, value) in [("true", true), ("false", false)] {
        define(
            pool,
            name,
            Idx::UNTYPED_BOOL,
            ObjKind::Const(ConstValue::Bool(value)),
        );
    }
    define(pool, "nil", Idx::UNTYPED_NIL, ObjKind::Nil);

    for id in BuiltinId::ALL {
        define(pool, id.name(), Idx::INVALID, ObjKind::Builtin(id));
    }

    // type error interface { Error() string }
    let error_sig = pool.signature(None, Vec::new(), vec![Var::unnamed(Idx::STRING)], false);
    let error_method = pool.new_func(None, interner.intern("Error"), error_sig);
    let iface = pool.interface(vec![error_method], Vec::new());
    let error = pool.new_named(None, interner.intern("error"), iface);
    if let Some(obj) = pool.named_obj(error) {
        pool.declare(ScopeId::UNIVERSE, obj);
    }
    error
}
