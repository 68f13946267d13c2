//! Type index handle.
//!
//! Every type is stored in the [`Pool`](crate::Pool) and referenced by its
//! 32-bit index. Basic types have fixed indices so they can be named
//! without a pool lookup.

use std::fmt;

/// A 32-bit index into the type pool.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct Idx(u32);

impl Idx {
    // === Basic Types (indices 0-13) ===
    // Pre-interned at pool creation in `BasicKind` order.

    /// Placeholder for an erroneous type.
    pub const INVALID: Self = Self(0);
    pub const BOOL: Self = Self(1);
    pub const INT: Self = Self(2);
    /// `int32`, also spelled `rune`.
    pub const INT32: Self = Self(3);
    pub const INT64: Self = Self(4);
    /// `uint8`, also spelled `byte`.
    pub const UINT8: Self = Self(5);
    pub const FLOAT64: Self = Self(6);
    pub const STRING: Self = Self(7);
    pub const UNTYPED_BOOL: Self = Self(8);
    pub const UNTYPED_INT: Self = Self(9);
    pub const UNTYPED_RUNE: Self = Self(10);
    pub const UNTYPED_FLOAT: Self = Self(11);
    pub const UNTYPED_STRING: Self = Self(12);
    pub const UNTYPED_NIL: Self = Self(13);

    /// The empty tuple `()`, result list of functions without results.
    pub const EMPTY_TUPLE: Self = Self(14);

    /// First index for dynamically allocated types.
    pub const FIRST_DYNAMIC: u32 = 15;

    /// Create an index from a raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_invalid(self) -> bool {
        self.0 == Self::INVALID.0
    }

    /// Check if this is one of the pre-interned basic types.
    #[inline]
    pub const fn is_basic(self) -> bool {
        self.0 <= Self::UNTYPED_NIL.0
    }
}

impl fmt::Debug for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Idx({})", self.0)
    }
}
