//! Resolved selector expressions.

use smallvec::SmallVec;

use crate::{Idx, ObjId};

/// Path of field indices from the receiver to the selected member.
///
/// The last entry indexes the field or method itself; the preceding ones
/// walk embedded fields.
pub type FieldPath = SmallVec<[usize; 4]>;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SelectionKind {
    /// `x.f` is a struct field.
    FieldVal,
    /// `x.m` is a method bound to `x`.
    MethodVal,
    /// `T.m` is a method expression.
    MethodExpr,
}

/// What a selector `x.f` resolved to.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Selection {
    pub kind: SelectionKind,
    /// Type of `x`.
    pub recv: Idx,
    pub obj: ObjId,
    pub index: FieldPath,
    /// A pointer was dereferenced on the way to the member.
    pub indirect: bool,
}
