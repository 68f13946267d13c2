//! Packages.

use tern_ir::Name;

use crate::ScopeId;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Debug)]
#[repr(transparent)]
pub struct PackageId(u32);

impl PackageId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        PackageId(raw)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A package and its top-level scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Package {
    pub name: Name,
    pub path: String,
    pub scope: ScopeId,
    /// Placeholder for an import that failed to load. Missing members of a
    /// fake package are not reported.
    pub fake: bool,
}
