//! Collects diagnostics for one pass, then hands them out sorted.
//!
//! - Error limit, after which further reports are dropped
//! - Deduplication of a report repeated at the same span
//! - Position-sorted flush

use std::hash::{Hash, Hasher};

use tern_ir::Span;

use crate::Diagnostic;

/// Identity of a report for deduplication: primary span and full message.
#[inline]
fn report_key(diag: &Diagnostic) -> (Option<Span>, u64) {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    diag.message.hash(&mut hasher);
    (diag.primary_span(), hasher.finish())
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of errors before stopping (0 = unlimited).
    pub error_limit: usize,
    /// Drop a report identical in span and message to the previous one.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 10,
            deduplicate: true,
        }
    }
}

impl DiagnosticConfig {
    /// No limit and no deduplication.
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: false,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
struct Queued {
    diagnostic: Diagnostic,
    /// 1-based.
    line: u32,
    /// 1-based.
    column: u32,
}

/// Diagnostics of one pass, in emission order until flushed.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticQueue {
    queued: Vec<Queued>,
    error_count: usize,
    last: Option<(Option<Span>, u64)>,
    config: DiagnosticConfig,
}

impl Default for DiagnosticQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::with_config(DiagnosticConfig::default())
    }

    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            queued: Vec::new(),
            error_count: 0,
            last: None,
            config,
        }
    }

    /// Queue a diagnostic placed at `line`:`column`.
    ///
    /// Returns `false` if the error limit or deduplication dropped it.
    /// The position only orders the flush; two reports that differ in span
    /// or message are always both kept.
    pub fn emit(&mut self, diag: Diagnostic, line: u32, column: u32) -> bool {
        if self.limit_reached() {
            return false;
        }

        let key = report_key(&diag);
        if self.config.deduplicate && self.last == Some(key) {
            return false;
        }
        self.last = Some(key);
        self.error_count += 1;

        self.queued.push(Queued {
            diagnostic: diag,
            line,
            column,
        });
        true
    }

    pub fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.error_count >= self.config.error_limit
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn len(&self) -> usize {
        self.queued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }

    /// Sort by position and drain the queue.
    ///
    /// Reports at the same position keep emission order.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        self.queued.sort_by_key(|q| (q.line, q.column));
        self.error_count = 0;
        self.last = None;
        self.queued.drain(..).map(|q| q.diagnostic).collect()
    }
}
