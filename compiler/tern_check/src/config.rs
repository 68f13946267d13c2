//! Checker configuration.

use tern_diagnostic::DiagnosticConfig;

/// Environment variable overriding [`CheckerConfig::verify_method_sets`].
pub const VERIFY_METHOD_SETS_ENV: &str = "TERN_VERIFY_METHOD_SETS";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckerConfig {
    pub diagnostics: DiagnosticConfig,
    /// Re-resolve every method value through the receiver's method set and
    /// treat disagreement as an internal error.
    pub verify_method_sets: bool,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        CheckerConfig {
            diagnostics: DiagnosticConfig::default(),
            verify_method_sets: cfg!(debug_assertions),
        }
    }
}

impl CheckerConfig {
    /// Defaults, with `TERN_VERIFY_METHOD_SETS=0|1` applied.
    pub fn from_env() -> Self {
        let value = std::env::var(VERIFY_METHOD_SETS_ENV).ok();
        Self::default().with_verify_override(value.as_deref())
    }

    /// No error limit, no deduplication, method sets verified.
    pub fn unlimited() -> Self {
        CheckerConfig {
            diagnostics: DiagnosticConfig::unlimited(),
            verify_method_sets: true,
        }
    }

    #[must_use]
    pub fn with_verify_method_sets(mut self, verify: bool) -> Self {
        self.verify_method_sets = verify;
        self
    }

    fn with_verify_override(self, value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("1" | "true" | "on") => self.with_verify_method_sets(true),
            Some("0" | "false" | "off") => self.with_verify_method_sets(false),
            Some(other) => {
                tracing::warn!(
                    value = other,
                    "ignoring unrecognized {VERIFY_METHOD_SETS_ENV}"
                );
                self
            }
            None => self,
        }
    }
}
