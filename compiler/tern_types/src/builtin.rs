//! Predeclared builtin functions.

/// How a call expression may be used.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprClass {
    /// `T(x)`
    Conversion,
    /// Produces a value; not allowed as a statement on its own.
    Expression,
    /// May stand alone as a statement.
    Statement,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BuiltinId {
    Append,
    Cap,
    Close,
    Copy,
    Delete,
    Len,
    Make,
    New,
    Panic,
    Print,
    Println,
    Recover,
}

/// Argument shape and usage class of a builtin.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct BuiltinInfo {
    pub name: &'static str,
    /// Number of required arguments.
    pub nargs: usize,
    /// Accepts more than `nargs` arguments.
    pub variadic: bool,
    pub class: ExprClass,
}

impl BuiltinId {
    pub const ALL: [BuiltinId; 12] = [
        BuiltinId::Append,
        BuiltinId::Cap,
        BuiltinId::Close,
        BuiltinId::Copy,
        BuiltinId::Delete,
        BuiltinId::Len,
        BuiltinId::Make,
        BuiltinId::New,
        BuiltinId::Panic,
        BuiltinId::Print,
        BuiltinId::Println,
        BuiltinId::Recover,
    ];

    pub const fn info(self) -> BuiltinInfo {
        const fn entry(
            name: &'static str,
            nargs: usize,
            variadic: bool,
            class: ExprClass,
        ) -> BuiltinInfo {
            BuiltinInfo {
                name,
                nargs,
                variadic,
                class,
            }
        }

        match self {
            BuiltinId::Append => entry("append", 1, true, ExprClass::Expression),
            BuiltinId::Cap => entry("cap", 1, false, ExprClass::Expression),
            BuiltinId::Close => entry("close", 1, false, ExprClass::Statement),
            BuiltinId::Copy => entry("copy", 2, false, ExprClass::Statement),
            BuiltinId::Delete => entry("delete", 2, false, ExprClass::Statement),
            BuiltinId::Len => entry("len", 1, false, ExprClass::Expression),
            BuiltinId::Make => entry("make", 1, true, ExprClass::Expression),
            BuiltinId::New => entry("new", 1, false, ExprClass::Expression),
            BuiltinId::Panic => entry("panic", 1, false, ExprClass::Statement),
            BuiltinId::Print => entry("print", 0, true, ExprClass::Statement),
            BuiltinId::Println => entry("println", 0, true, ExprClass::Statement),
            BuiltinId::Recover => entry("recover", 0, false, ExprClass::Statement),
        }
    }

    #[inline]
    pub const fn name(self) -> &'static str {
        self.info().name
    }
}
