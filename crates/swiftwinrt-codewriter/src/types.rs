//! Swift type expressions

use std::fmt;

/// A Swift type expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SwiftType {
    /// A (possibly dotted) type name with generic arguments: `Foundation.UUID`, `Array<T>`
    Identifier {
        /// Type name; qualified names keep their dots
        name: String,
        /// Generic arguments
        generic_args: Vec<SwiftType>,
    },
    /// `T?`, or `T!` when implicitly unwrapped
    Optional {
        /// Wrapped type
        wrapped: Box<SwiftType>,
        /// Render as `T!`
        implicit_unwrap: bool,
    },
    /// `[T]`
    Array(Box<SwiftType>),
    /// `Any`
    Any,
    /// `Bool`
    Bool,
    /// `Int`, `UInt`, or a sized variant such as `Int8`
    Int {
        /// Bit width; `None` for the pointer-sized integer
        bits: Option<u8>,
        /// Signedness
        signed: bool,
    },
    /// `Float`
    Float,
}

impl SwiftType {
    /// A plain named type
    pub fn identifier(name: impl Into<String>) -> Self {
        Self::generic(name, Vec::new())
    }

    /// A named type with generic arguments
    pub fn generic(name: impl Into<String>, generic_args: Vec<SwiftType>) -> Self {
        SwiftType::Identifier {
            name: name.into(),
            generic_args,
        }
    }

    /// A member type reached through a chain of names: `UTF16.CodeUnit`
    pub fn chain(names: &[&str]) -> Self {
        Self::identifier(names.join("."))
    }

    /// Wrap in an optional
    pub fn optional(wrapped: SwiftType, implicit_unwrap: bool) -> Self {
        SwiftType::Optional {
            wrapped: Box::new(wrapped),
            implicit_unwrap,
        }
    }

    /// `[element]`
    pub fn array(element: SwiftType) -> Self {
        SwiftType::Array(Box::new(element))
    }

    /// A sized or pointer-sized integer
    pub fn int(bits: Option<u8>, signed: bool) -> Self {
        SwiftType::Int { bits, signed }
    }

    /// `UnsafeMutablePointer<pointee>`
    pub fn unsafe_mutable_pointer(pointee: SwiftType) -> Self {
        Self::generic("UnsafeMutablePointer", vec![pointee])
    }

    /// Whether this is an optional of either flavor
    pub fn is_optional(&self) -> bool {
        matches!(self, SwiftType::Optional { .. })
    }
}

impl fmt::Display for SwiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwiftType::Identifier { name, generic_args } => {
                write!(f, "{}", name)?;
                if !generic_args.is_empty() {
                    write!(f, "<")?;
                    for (index, arg) in generic_args.iter().enumerate() {
                        if index > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", arg)?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
            SwiftType::Optional {
                wrapped,
                implicit_unwrap,
            } => write!(f, "{}{}", wrapped, if *implicit_unwrap { "!" } else { "?" }),
            SwiftType::Array(element) => write!(f, "[{}]", element),
            SwiftType::Any => write!(f, "Any"),
            SwiftType::Bool => write!(f, "Bool"),
            SwiftType::Int { bits, signed } => {
                write!(f, "{}Int", if *signed { "" } else { "U" })?;
                if let Some(bits) = bits {
                    write!(f, "{}", bits)?;
                }
                Ok(())
            }
            SwiftType::Float => write!(f, "Float"),
        }
    }
}

/// Declaration visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwiftVisibility {
    /// `open`
    Open,
    /// `public`
    Public,
    /// `internal`
    Internal,
    /// `fileprivate`
    Fileprivate,
    /// `private`
    Private,
}

impl fmt::Display for SwiftVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwiftVisibility::Open => write!(f, "open"),
            SwiftVisibility::Public => write!(f, "public"),
            SwiftVisibility::Internal => write!(f, "internal"),
            SwiftVisibility::Fileprivate => write!(f, "fileprivate"),
            SwiftVisibility::Private => write!(f, "private"),
        }
    }
}

/// A function parameter: `_ name: inout T`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwiftParameter {
    /// Argument label; `None` uses the parameter name as label
    pub label: Option<String>,
    /// Parameter name
    pub name: String,
    /// Passed `inout`
    pub is_inout: bool,
    /// Parameter type
    pub ty: SwiftType,
}

impl SwiftParameter {
    /// An unlabeled parameter (`_ name: T`)
    pub fn unlabeled(name: impl Into<String>, ty: SwiftType) -> Self {
        Self {
            label: Some("_".to_string()),
            name: name.into(),
            is_inout: false,
            ty,
        }
    }
}

impl fmt::Display for SwiftParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(label) = &self.label {
            write!(f, "{} ", label)?;
        }
        write!(f, "{}: ", self.name)?;
        if self.is_inout {
            write!(f, "inout ")?;
        }
        write!(f, "{}", self.ty)
    }
}
