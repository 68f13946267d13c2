//! Diagnostic system for checker error reporting.
//!
//! Every user-facing problem becomes a [`Diagnostic`]:
//! - Error code for searchability
//! - Clear message naming the offending construct
//! - Primary span (where it went wrong)
//! - Optional notes
//!
//! Diagnostics are accumulated in a [`DiagnosticQueue`], never thrown.
//! Checking continues after each report so that one pass surfaces every
//! independent problem.

mod diagnostic;
mod error_code;
pub mod queue;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label};
pub use error_code::{ErrorCategory, ErrorCode};
pub use queue::{DiagnosticConfig, DiagnosticQueue};
