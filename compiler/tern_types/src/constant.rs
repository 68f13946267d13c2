//! Compile-time constant values.

use std::fmt;

use crate::BasicKind;

/// A compile-time constant.
///
/// Integers are held at 128 bits so that untyped constants can exceed
/// every typed range before representability is checked.
#[derive(Clone, Debug, PartialEq)]
pub enum ConstValue {
    Bool(bool),
    Int(i128),
    Float(f64),
    Str(String),
}

impl ConstValue {
    /// Convert to a value of the given basic kind, if representable.
    ///
    /// Floats with an integral value are representable by integer kinds;
    /// integers are always representable by float kinds.
    pub fn representable(&self, kind: BasicKind) -> Option<ConstValue> {
        match (self, kind) {
            (ConstValue::Bool(_), BasicKind::Bool | BasicKind::UntypedBool) => Some(self.clone()),
            (ConstValue::Str(_), BasicKind::String | BasicKind::UntypedString) => {
                Some(self.clone())
            }
            (
                ConstValue::Int(_) | ConstValue::Float(_),
                BasicKind::Float64 | BasicKind::UntypedFloat,
            ) => self.to_float().map(ConstValue::Float),
            (
                ConstValue::Int(_) | ConstValue::Float(_),
                BasicKind::Int
                | BasicKind::Int32
                | BasicKind::Int64
                | BasicKind::Uint8
                | BasicKind::UntypedInt
                | BasicKind::UntypedRune,
            ) => {
                let v = self.to_int()?;
                let (min, max) = int_range(kind);
                (min..=max).contains(&v).then_some(ConstValue::Int(v))
            }
            _ => None,
        }
    }

    /// Exact integer value, if this is an integer or an integral float.
    pub fn to_int(&self) -> Option<i128> {
        match *self {
            ConstValue::Int(v) => Some(v),
            #[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
            ConstValue::Float(f) if f.is_finite() && f.trunc() == f && f.abs() < 1e38 => {
                Some(f as i128)
            }
            _ => None,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn to_float(&self) -> Option<f64> {
        match *self {
            ConstValue::Int(v) => Some(v as f64),
            ConstValue::Float(f) => Some(f),
            _ => None,
        }
    }

    /// The string an integer converts to: its code point, or U+FFFD when
    /// the value is not a valid scalar value.
    pub fn codepoint_string(value: i128) -> ConstValue {
        let ch = u32::try_from(value)
            .ok()
            .and_then(char::from_u32)
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        ConstValue::Str(ch.to_string())
    }
}

/// Inclusive range of an integer kind. Untyped integers are bounded only
/// by the 128-bit container.
fn int_range(kind: BasicKind) -> (i128, i128) {
    match kind {
        BasicKind::Int | BasicKind::Int64 => (i128::from(i64::MIN), i128::from(i64::MAX)),
        BasicKind::Int32 => (i128::from(i32::MIN), i128::from(i32::MAX)),
        BasicKind::Uint8 => (0, i128::from(u8::MAX)),
        _ => (i128::MIN, i128::MAX),
    }
}

impl fmt::Display for ConstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstValue::Bool(b) => write!(f, "{b}"),
            ConstValue::Int(v) => write!(f, "{v}"),
            ConstValue::Float(v) => write!(f, "{v}"),
            ConstValue::Str(s) => write!(f, "{s:?}"),
        }
    }
}
