//! Lexical scopes.

use rustc_hash::FxHashMap;
use tern_ir::Name;

use crate::ObjId;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct ScopeId(u32);

impl ScopeId {
    /// The universe scope is always the first scope allocated.
    pub const UNIVERSE: ScopeId = ScopeId(0);

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        ScopeId(raw)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A mapping from names to objects with an optional enclosing scope.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    names: FxHashMap<Name, ObjId>,
}

impl Scope {
    pub fn new(parent: Option<ScopeId>) -> Self {
        Scope {
            parent,
            names: FxHashMap::default(),
        }
    }

    /// Look up `name` in this scope only.
    pub fn lookup(&self, name: Name) -> Option<ObjId> {
        self.names.get(&name).copied()
    }

    /// Insert an object; returns the previous binding of the name, leaving
    /// it in place, if one exists.
    pub fn insert(&mut self, name: Name, obj: ObjId) -> Option<ObjId> {
        if let Some(&existing) = self.names.get(&name) {
            return Some(existing);
        }
        self.names.insert(name, obj);
        None
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
