//! The type pool.
//!
//! Owns every type, object, scope and package of a checking session.
//! Composite types with no identity of their own (slices, pointers, maps,
//! channels, tuples, signatures) are interned, so structurally equal ones
//! share an [`Idx`]. Structs, interfaces and named types are allocated
//! fresh on every construction.

mod construct;
mod format;

use rustc_hash::FxHashMap;
use tern_ir::{Name, SharedInterner};

use crate::{BasicKind, Idx, ObjId, Object, Package, PackageId, Scope, ScopeId, TypeData};

pub struct Pool {
    types: Vec<TypeData>,
    interned: FxHashMap<TypeData, Idx>,
    objects: Vec<Object>,
    scopes: Vec<Scope>,
    packages: Vec<Package>,
    interner: SharedInterner,
    /// The predeclared `error` interface.
    error_type: Idx,
    /// `interface{}`, shared by every builtin that accepts any value.
    empty_interface: Idx,
}

impl Pool {
    /// Create a pool holding the basic types and the universe scope.
    pub fn new(interner: SharedInterner) -> Self {
        let mut pool = Pool {
            types: Vec::with_capacity(64),
            interned: FxHashMap::default(),
            objects: Vec::new(),
            scopes: vec![Scope::new(None)],
            packages: Vec::new(),
            interner,
            error_type: Idx::INVALID,
            empty_interface: Idx::INVALID,
        };
        for kind in BasicKind::ALL {
            pool.types.push(TypeData::Basic(kind));
        }
        let empty = TypeData::Tuple(Vec::new());
        pool.types.push(empty.clone());
        pool.interned.insert(empty, Idx::EMPTY_TUPLE);
        debug_assert_eq!(pool.types.len(), Idx::FIRST_DYNAMIC as usize);

        pool.error_type = crate::universe::populate(&mut pool);
        pool.empty_interface = pool.interface(Vec::new(), Vec::new());
        pool
    }

    #[inline]
    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    /// The string of an interned name.
    #[inline]
    pub fn name_str(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    /// Type data at `idx`.
    #[inline]
    pub fn get(&self, idx: Idx) -> &TypeData {
        &self.types[idx.index()]
    }

    /// Number of allocated types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    #[inline]
    pub fn error_type(&self) -> Idx {
        self.error_type
    }

    #[inline]
    pub fn empty_interface(&self) -> Idx {
        self.empty_interface
    }

    #[inline]
    pub fn universe(&self) -> ScopeId {
        ScopeId::UNIVERSE
    }

    #[inline]
    pub fn object(&self, id: ObjId) -> &Object {
        &self.objects[id.index()]
    }

    #[inline]
    pub fn object_mut(&mut self, id: ObjId) -> &mut Object {
        &mut self.objects[id.index()]
    }

    #[inline]
    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    #[inline]
    pub fn package(&self, id: PackageId) -> &Package {
        &self.packages[id.index()]
    }

    /// Look up `name` starting at `scope` and walking outwards.
    ///
    /// Returns the scope that binds the name along with the object.
    pub fn lookup_parent(&self, scope: ScopeId, name: Name) -> Option<(ScopeId, ObjId)> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let s = self.scope(id);
            if let Some(obj) = s.lookup(name) {
                return Some((id, obj));
            }
            current = s.parent;
        }
        None
    }

    /// Add type data, reusing an existing index for interned shapes.
    fn intern(&mut self, data: TypeData) -> Idx {
        if data.is_structural() {
            if let Some(&idx) = self.interned.get(&data) {
                return idx;
            }
        }
        let idx = self.push_type(data.clone());
        if data.is_structural() {
            self.interned.insert(data, idx);
        }
        idx
    }

    fn push_type(&mut self, data: TypeData) -> Idx {
        let raw = u32::try_from(self.types.len()).unwrap_or_else(|_| {
            panic!("type pool exceeded u32::MAX entries");
        });
        self.types.push(data);
        Idx::from_raw(raw)
    }

    fn type_mut(&mut self, idx: Idx) -> &mut TypeData {
        &mut self.types[idx.index()]
    }
}
