//! Recording tables filled while checking.
//!
//! Downstream tooling reads these: go-to-definition uses `uses`, the
//! backend reads `types` and `selections`, initialization order reads
//! `deps`, and unused-import reporting reads `used`.

use rustc_hash::{FxHashMap, FxHashSet};
use tern_ir::ExprId;
use tern_types::{Idx, ObjId, Selection};

use crate::Mode;

/// Mode and type recorded for an expression.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeAndValue {
    pub mode: Mode,
    pub ty: Idx,
}

#[derive(Debug, Default)]
pub struct TypeInfo {
    pub types: FxHashMap<ExprId, TypeAndValue>,
    /// Identifiers and qualified selectors `pkg.Name` to their object.
    pub uses: FxHashMap<ExprId, ObjId>,
    /// Field and method selectors.
    pub selections: FxHashMap<ExprId, Selection>,
    /// Objects each declaration refers to, in first-reference order.
    pub deps: FxHashMap<ObjId, Vec<ObjId>>,
    pub used: FxHashSet<ObjId>,
}

impl TypeInfo {
    pub fn type_of(&self, expr: ExprId) -> Option<&TypeAndValue> {
        self.types.get(&expr)
    }

    pub fn use_of(&self, expr: ExprId) -> Option<ObjId> {
        self.uses.get(&expr).copied()
    }

    pub fn selection(&self, expr: ExprId) -> Option<&Selection> {
        self.selections.get(&expr)
    }

    /// Dependencies recorded for `decl`, empty if none.
    pub fn deps_of(&self, decl: ObjId) -> &[ObjId] {
        self.deps.get(&decl).map_or(&[], Vec::as_slice)
    }

    pub fn is_used(&self, obj: ObjId) -> bool {
        self.used.contains(&obj)
    }
}
