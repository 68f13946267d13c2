//! Constructors for types, objects, scopes and packages.

use tern_ir::{Name, Span};

use crate::{
    is_exported, ConstValue, Idx, InterfaceData, NamedData, ObjId, ObjKind, Object, Package,
    PackageId, Pool, Scope, ScopeId, Signature, TypeData, Var,
};

impl Pool {
    // === Composite Types ===

    /// `[]elem`
    pub fn slice(&mut self, elem: Idx) -> Idx {
        self.intern(TypeData::Slice(elem))
    }

    /// `*base`
    pub fn pointer(&mut self, base: Idx) -> Idx {
        self.intern(TypeData::Pointer(base))
    }

    /// `map[key]value`
    pub fn map(&mut self, key: Idx, value: Idx) -> Idx {
        self.intern(TypeData::Map { key, value })
    }

    /// `chan elem`
    pub fn chan(&mut self, elem: Idx) -> Idx {
        self.intern(TypeData::Chan(elem))
    }

    /// Tuple of the given entries.
    pub fn tuple(&mut self, vars: Vec<Var>) -> Idx {
        debug_assert!(
            vars.iter()
                .all(|v| !matches!(self.get(v.ty), TypeData::Tuple(_))),
            "tuples never nest"
        );
        self.intern(TypeData::Tuple(vars))
    }

    /// Tuple of unnamed entries.
    pub fn tuple_of(&mut self, types: &[Idx]) -> Idx {
        self.tuple(types.iter().copied().map(Var::unnamed).collect())
    }

    /// Signature from parameter and result lists.
    ///
    /// When `variadic` is set the last parameter must already have slice
    /// type.
    pub fn signature(
        &mut self,
        recv: Option<Var>,
        params: Vec<Var>,
        results: Vec<Var>,
        variadic: bool,
    ) -> Idx {
        debug_assert!(
            !variadic || params.last().is_some(),
            "variadic signature without parameters"
        );
        let params = self.tuple(params);
        let results = self.tuple(results);
        self.intern(TypeData::Signature(Signature {
            recv,
            params,
            results,
            variadic,
        }))
    }

    /// Signature without receiver from unnamed parameter and result types.
    pub fn func_type(&mut self, params: &[Idx], results: &[Idx], variadic: bool) -> Idx {
        self.signature(
            None,
            params.iter().copied().map(Var::unnamed).collect(),
            results.iter().copied().map(Var::unnamed).collect(),
            variadic,
        )
    }

    /// Intern a signature whose parameter and result tuples already exist.
    pub fn signature_type(&mut self, sig: Signature) -> Idx {
        self.intern(TypeData::Signature(sig))
    }

    /// Struct type over field objects created with [`Pool::new_field`].
    pub fn struct_type(&mut self, fields: Vec<ObjId>) -> Idx {
        self.push_type(TypeData::Struct(fields))
    }

    /// Interface type with declared methods and embedded interfaces.
    pub fn interface(&mut self, methods: Vec<ObjId>, embeds: Vec<Idx>) -> Idx {
        self.push_type(TypeData::Interface(InterfaceData { methods, embeds }))
    }

    /// Declare a named type. Its `TypeName` object is created alongside.
    ///
    /// `underlying` may be [`Idx::INVALID`] and set later through
    /// [`Pool::set_underlying`] for recursive declarations.
    pub fn new_named(&mut self, pkg: Option<PackageId>, name: Name, underlying: Idx) -> Idx {
        let obj = self.new_object(name, Span::DUMMY, pkg, Idx::INVALID, ObjKind::TypeName);
        let underlying = self.underlying(underlying);
        let idx = self.push_type(TypeData::Named(NamedData {
            obj,
            underlying,
            methods: Vec::new(),
        }));
        self.object_mut(obj).ty = idx;
        idx
    }

    pub fn set_underlying(&mut self, named: Idx, underlying: Idx) {
        let underlying = self.underlying(underlying);
        if let TypeData::Named(data) = self.type_mut(named) {
            data.underlying = underlying;
        }
    }

    /// Attach a method to a named type.
    pub fn add_method(&mut self, named: Idx, method: ObjId) {
        if let TypeData::Named(data) = self.type_mut(named) {
            data.methods.push(method);
        }
    }

    /// Declare a method on `named` with a value (`T`) or pointer (`*T`)
    /// receiver and attach it.
    pub fn declare_method(
        &mut self,
        named: Idx,
        name: Name,
        pointer_recv: bool,
        params: Vec<Var>,
        results: Vec<Var>,
        variadic: bool,
    ) -> ObjId {
        let pkg = match self.get(named) {
            TypeData::Named(data) => self.object(data.obj).pkg,
            _ => None,
        };
        let recv_ty = if pointer_recv {
            self.pointer(named)
        } else {
            named
        };
        let sig = self.signature(Some(Var::unnamed(recv_ty)), params, results, variadic);
        let method = self.new_func(pkg, name, sig);
        self.add_method(named, method);
        method
    }

    // === Objects ===

    pub fn new_object(
        &mut self,
        name: Name,
        span: Span,
        pkg: Option<PackageId>,
        ty: Idx,
        kind: ObjKind,
    ) -> ObjId {
        let raw = u32::try_from(self.objects.len()).unwrap_or_else(|_| {
            panic!("object table exceeded u32::MAX entries");
        });
        let exported = is_exported(self.name_str(name));
        self.objects.push(Object {
            name,
            span,
            pkg,
            ty,
            kind,
            exported,
        });
        ObjId::from_raw(raw)
    }

    pub fn new_var(&mut self, pkg: Option<PackageId>, name: Name, ty: Idx) -> ObjId {
        self.new_object(
            name,
            Span::DUMMY,
            pkg,
            ty,
            ObjKind::Var {
                is_field: false,
                embedded: false,
            },
        )
    }

    /// Struct field. An embedded field is named after its type.
    pub fn new_field(
        &mut self,
        pkg: Option<PackageId>,
        name: Name,
        ty: Idx,
        embedded: bool,
    ) -> ObjId {
        self.new_object(
            name,
            Span::DUMMY,
            pkg,
            ty,
            ObjKind::Var {
                is_field: true,
                embedded,
            },
        )
    }

    pub fn new_const(
        &mut self,
        pkg: Option<PackageId>,
        name: Name,
        ty: Idx,
        value: ConstValue,
    ) -> ObjId {
        self.new_object(name, Span::DUMMY, pkg, ty, ObjKind::Const(value))
    }

    pub fn new_func(&mut self, pkg: Option<PackageId>, name: Name, sig: Idx) -> ObjId {
        self.new_object(name, Span::DUMMY, pkg, sig, ObjKind::Func)
    }

    /// Import binding: `name` refers to package `imported` from within `pkg`.
    pub fn new_pkg_name(&mut self, pkg: PackageId, name: Name, imported: PackageId) -> ObjId {
        self.new_object(
            name,
            Span::DUMMY,
            Some(pkg),
            Idx::INVALID,
            ObjKind::PkgName { imported },
        )
    }

    // === Scopes and Packages ===

    pub fn new_scope(&mut self, parent: Option<ScopeId>) -> ScopeId {
        let raw = u32::try_from(self.scopes.len()).unwrap_or_else(|_| {
            panic!("scope table exceeded u32::MAX entries");
        });
        self.scopes.push(Scope::new(parent));
        ScopeId::from_raw(raw)
    }

    /// Bind `obj` under its own name. Returns the existing object if the
    /// name is already bound in `scope`.
    pub fn declare(&mut self, scope: ScopeId, obj: ObjId) -> Option<ObjId> {
        let name = self.object(obj).name;
        self.scopes[scope.index()].insert(name, obj)
    }

    /// New package whose scope is nested in the universe.
    pub fn new_package(&mut self, name: Name, path: impl Into<String>, fake: bool) -> PackageId {
        let scope = self.new_scope(Some(ScopeId::UNIVERSE));
        let raw = u32::try_from(self.packages.len()).unwrap_or_else(|_| {
            panic!("package table exceeded u32::MAX entries");
        });
        self.packages.push(Package {
            name,
            path: path.into(),
            scope,
            fake,
        });
        PackageId::from_raw(raw)
    }
}
