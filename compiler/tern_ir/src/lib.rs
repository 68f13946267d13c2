//! Tern IR - syntax-side data structures consumed by the checker.
//!
//! This crate contains:
//! - Spans for source locations
//! - Names for interned identifiers
//! - The flat expression arena (`ExprArena`, `ExprId`, `ExprRange`)
//! - AST nodes for the call and selector surface of the language
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: Strings → Name(u32)
//! - **Flatten Everything**: No Box<Expr>, use ExprId(u32) indices
//!
//! Floats are stored as u64 bits so every node stays `Eq + Hash`.

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
pub mod ast;
mod expr_id;
mod interner;
mod name;
mod print;
mod span;

pub use arena::ExprArena;
pub use ast::{Expr, ExprKind, UnaryOp};
pub use expr_id::{ExprId, ExprRange};
pub use interner::{InternError, SharedInterner, StringInterner};
pub use name::Name;
pub use print::ExprPrinter;
pub use span::{Span, SpanError};
