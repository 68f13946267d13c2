//! Internal invariant violations.
//!
//! These are defects in the checker itself, never in the checked program,
//! so they are not diagnostics. Every checking function returns
//! [`CheckResult`] and `?` carries an `InternalError` out of the pass.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InternalError {
    /// A selector or identifier was checked before any lookup scope was
    /// established.
    #[error("lookup scope not established before checking `{name}`")]
    ScopeNotSet { name: String },

    /// The replaying getter of a single unpacked operand was asked for
    /// another position.
    #[error("single unpacked operand queried at index {index}")]
    UnpackIndex { index: usize },

    #[error("method set of `{recv}` disagrees with lookup of `{name}`")]
    MethodSetMismatch { recv: String, name: String },

    #[error("package member `{name}` has unexpected kind {kind}")]
    UnexpectedObject { name: String, kind: &'static str },

    #[error("package name `{name}` is declared by another package")]
    ForeignPkgName { name: String },

    #[error("selection `{name}` is neither a field nor a method")]
    UnexpectedSelection { name: String },

    #[error("variadic parameter of type `{ty}` is not a slice")]
    NonSliceVariadic { ty: String },
}

pub type CheckResult<T> = Result<T, InternalError>;
