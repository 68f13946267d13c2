//! Basic (predeclared, non-composite) types.

use bitflags::bitflags;

use crate::Idx;

/// The kind of a basic type.
///
/// Discriminants match the fixed [`Idx`] of each basic type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum BasicKind {
    Invalid,
    Bool,
    Int,
    Int32,
    Int64,
    Uint8,
    Float64,
    String,
    UntypedBool,
    UntypedInt,
    UntypedRune,
    UntypedFloat,
    UntypedString,
    UntypedNil,
}

bitflags! {
    /// Properties of a basic type.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct BasicInfo: u8 {
        const BOOLEAN  = 1 << 0;
        const INTEGER  = 1 << 1;
        const UNSIGNED = 1 << 2;
        const FLOAT    = 1 << 3;
        const STRING   = 1 << 4;
        const UNTYPED  = 1 << 5;

        const NUMERIC = Self::INTEGER.bits() | Self::FLOAT.bits();
        const ORDERED = Self::NUMERIC.bits() | Self::STRING.bits();
        const CONST_TYPE = Self::BOOLEAN.bits() | Self::NUMERIC.bits() | Self::STRING.bits();
    }
}

impl BasicKind {
    /// All basic kinds, in index order.
    pub const ALL: [BasicKind; 14] = [
        BasicKind::Invalid,
        BasicKind::Bool,
        BasicKind::Int,
        BasicKind::Int32,
        BasicKind::Int64,
        BasicKind::Uint8,
        BasicKind::Float64,
        BasicKind::String,
        BasicKind::UntypedBool,
        BasicKind::UntypedInt,
        BasicKind::UntypedRune,
        BasicKind::UntypedFloat,
        BasicKind::UntypedString,
        BasicKind::UntypedNil,
    ];

    /// The fixed pool index of this basic type.
    #[inline]
    pub const fn idx(self) -> Idx {
        Idx::from_raw(self as u32)
    }

    pub fn info(self) -> BasicInfo {
        match self {
            BasicKind::Invalid => BasicInfo::empty(),
            BasicKind::Bool => BasicInfo::BOOLEAN,
            BasicKind::Int | BasicKind::Int32 | BasicKind::Int64 => BasicInfo::INTEGER,
            BasicKind::Uint8 => BasicInfo::INTEGER | BasicInfo::UNSIGNED,
            BasicKind::Float64 => BasicInfo::FLOAT,
            BasicKind::String => BasicInfo::STRING,
            BasicKind::UntypedBool => BasicInfo::BOOLEAN | BasicInfo::UNTYPED,
            BasicKind::UntypedInt | BasicKind::UntypedRune => {
                BasicInfo::INTEGER | BasicInfo::UNTYPED
            }
            BasicKind::UntypedFloat => BasicInfo::FLOAT | BasicInfo::UNTYPED,
            BasicKind::UntypedString => BasicInfo::STRING | BasicInfo::UNTYPED,
            BasicKind::UntypedNil => BasicInfo::UNTYPED,
        }
    }

    /// Source-level spelling used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            BasicKind::Invalid => "invalid type",
            BasicKind::Bool => "bool",
            BasicKind::Int => "int",
            BasicKind::Int32 => "int32",
            BasicKind::Int64 => "int64",
            BasicKind::Uint8 => "uint8",
            BasicKind::Float64 => "float64",
            BasicKind::String => "string",
            BasicKind::UntypedBool => "untyped bool",
            BasicKind::UntypedInt => "untyped int",
            BasicKind::UntypedRune => "untyped rune",
            BasicKind::UntypedFloat => "untyped float",
            BasicKind::UntypedString => "untyped string",
            BasicKind::UntypedNil => "untyped nil",
        }
    }

    #[inline]
    pub fn is_untyped(self) -> bool {
        self.info().contains(BasicInfo::UNTYPED)
    }

    /// The typed counterpart an untyped constant defaults to.
    pub fn default_kind(self) -> BasicKind {
        match self {
            BasicKind::UntypedBool => BasicKind::Bool,
            BasicKind::UntypedInt => BasicKind::Int,
            BasicKind::UntypedRune => BasicKind::Int32,
            BasicKind::UntypedFloat => BasicKind::Float64,
            BasicKind::UntypedString => BasicKind::String,
            other => other,
        }
    }
}
