//! Call and selector resolution for Tern.
//!
//! The checker decides what a call `f(args)` or a selector `x.f` means,
//! which mode and type the result carries, and reports diagnostics when
//! the program is ill-typed.
//!
//! # Module Structure
//!
//! - `operand`: `Operand` and its closed `Mode`
//! - `checker`: the `Checker` context, diagnostic and recording helpers
//! - `unpack`: lazy multi-value adapter over argument lists
//! - `call`: call classifier, argument matcher, per-argument binding
//! - `builtin`: builtin function dispatch
//! - `conversion`: `T(x)` conversion rule
//! - `assignment`: assignability of an operand to a target type
//! - `selector`: package members, fields, methods, method expressions
//! - `expr`: the expression evaluator driving the above
//!
//! User errors become diagnostics and demote the operand to
//! [`Mode::Invalid`]. Broken invariants surface as [`InternalError`] and
//! end the pass.

mod assignment;
mod builtin;
mod call;
mod checker;
mod config;
mod conversion;
mod error;
mod expr;
mod operand;
mod selector;
mod stack;
mod syntax;
mod type_info;
mod unpack;

#[cfg(test)]
mod test_helpers;

pub use checker::{CheckOutput, Checker};
pub use config::CheckerConfig;
pub use error::{CheckResult, InternalError};
pub use operand::{Mode, Operand};
pub use syntax::{CallSyntax, SelectorSyntax};
pub use tern_types::{ExprClass, Selection, SelectionKind};
pub use type_info::{TypeAndValue, TypeInfo};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set, and only the first call has any
/// effect.
///
/// ```bash
/// RUST_LOG=tern_check=trace cargo test -p tern_check
/// RUST_LOG=tern_check::selector=debug,tern_types::lookup=trace tern check main.tn
/// ```
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

