//! Error codes for checker diagnostics.
//!
//! Each code is a unique identifier (e.g., `E2004`) usable for `--explain`
//! lookups. All checker codes live in the E2xxx (type error) range.

use std::fmt;

/// Error codes for checker diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Operand not assignable to the target type
    E2001,
    /// Undeclared identifier
    E2003,
    /// Wrong number of arguments (call or conversion)
    E2004,
    /// Call of a non-function value
    E2020,
    /// Invalid type conversion
    E2021,
    /// Misuse of the spread marker `...`
    E2022,
    /// Member not declared by package
    E2023,
    /// Member not exported by package
    E2024,
    /// No such field or method
    E2025,
    /// Ambiguous selector
    E2026,
    /// Method not in the method set of the receiver
    E2027,
    /// Invalid argument to a builtin
    E2028,
    /// Operand of the wrong category (no value, type, builtin)
    E2029,
    /// Invalid operation (index, dereference, address-of, receive)
    E2030,
}

/// Broad classes of user-facing checker errors.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCategory {
    /// Wrong number of arguments, illegal spread.
    Shape,
    /// Wrong kind of operand for the operation.
    Kind,
    /// Name resolution failures.
    Lookup,
    /// Reported by the assignability or conversion rules.
    Delegated,
}

impl ErrorCode {
    /// All error code variants.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E2001,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2020,
        ErrorCode::E2021,
        ErrorCode::E2022,
        ErrorCode::E2023,
        ErrorCode::E2024,
        ErrorCode::E2025,
        ErrorCode::E2026,
        ErrorCode::E2027,
        ErrorCode::E2028,
        ErrorCode::E2029,
        ErrorCode::E2030,
    ];

    /// Get the code as a string (e.g., "E2004").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2020 => "E2020",
            ErrorCode::E2021 => "E2021",
            ErrorCode::E2022 => "E2022",
            ErrorCode::E2023 => "E2023",
            ErrorCode::E2024 => "E2024",
            ErrorCode::E2025 => "E2025",
            ErrorCode::E2026 => "E2026",
            ErrorCode::E2027 => "E2027",
            ErrorCode::E2028 => "E2028",
            ErrorCode::E2029 => "E2029",
            ErrorCode::E2030 => "E2030",
        }
    }

    /// The error class this code belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorCode::E2004 | ErrorCode::E2022 => ErrorCategory::Shape,
            ErrorCode::E2020 | ErrorCode::E2028 | ErrorCode::E2029 | ErrorCode::E2030 => {
                ErrorCategory::Kind
            }
            ErrorCode::E2003
            | ErrorCode::E2023
            | ErrorCode::E2024
            | ErrorCode::E2025
            | ErrorCode::E2026
            | ErrorCode::E2027 => ErrorCategory::Lookup,
            ErrorCode::E2001 | ErrorCode::E2021 => ErrorCategory::Delegated,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E2001"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

#[cfg(test)]
mod tests;
