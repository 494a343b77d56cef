//! Textual type signatures used by metadata documents
//!
//! ```text
//! type   := base suffix*
//! base   := '!' ident
//!         | qualified ('<' type (',' type)* '>')?
//! suffix := '[]' | '*'
//! ```
//!
//! Names are kept unresolved here; the store binds them to definitions.

use crate::error::{MetadataError, MetadataResult};
use std::fmt;

/// An unresolved type signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSig {
    /// A named type with optional generic arguments
    Named {
        /// Fully qualified name, including any generic suffix
        full_name: String,
        /// Generic arguments
        args: Vec<TypeSig>,
    },
    /// `T[]`
    Array(Box<TypeSig>),
    /// `!T`
    GenericParam(String),
    /// `T*`
    Pointer(Box<TypeSig>),
}

impl TypeSig {
    /// Parse a complete signature string
    pub fn parse(text: &str) -> MetadataResult<Self> {
        let mut parser = SigParser { text, pos: 0 };
        let sig = parser.parse_type()?;
        parser.skip_whitespace();
        if parser.pos != text.len() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(sig)
    }
}

impl fmt::Display for TypeSig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSig::Named { full_name, args } => {
                write!(f, "{}", full_name)?;
                if !args.is_empty() {
                    write!(f, "<")?;
                    for (index, arg) in args.iter().enumerate() {
                        if index > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", arg)?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
            TypeSig::Array(element) => write!(f, "{}[]", element),
            TypeSig::GenericParam(name) => write!(f, "!{}", name),
            TypeSig::Pointer(pointee) => write!(f, "{}*", pointee),
        }
    }
}

struct SigParser<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> SigParser<'a> {
    fn error(&self, reason: &str) -> MetadataError {
        MetadataError::InvalidSignature {
            signature: self.text.to_string(),
            reason: format!("{} at offset {}", reason, self.pos),
        }
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn eat(&mut self, expected: &str) -> bool {
        self.skip_whitespace();
        if self.text[self.pos..].starts_with(expected) {
            self.pos += expected.len();
            true
        } else {
            false
        }
    }

    fn parse_type(&mut self) -> MetadataResult<TypeSig> {
        self.skip_whitespace();
        let mut sig = if self.eat("!") {
            TypeSig::GenericParam(self.parse_identifier()?)
        } else {
            self.parse_named()?
        };

        loop {
            if self.eat("[]") {
                sig = TypeSig::Array(Box::new(sig));
            } else if self.eat("*") {
                sig = TypeSig::Pointer(Box::new(sig));
            } else {
                return Ok(sig);
            }
        }
    }

    fn parse_named(&mut self) -> MetadataResult<TypeSig> {
        let mut full_name = self.parse_identifier()?;
        while self.text[self.pos..].starts_with('.') {
            self.pos += 1;
            full_name.push('.');
            full_name.push_str(&self.parse_identifier()?);
        }

        let mut args = Vec::new();
        if self.eat("<") {
            loop {
                args.push(self.parse_type()?);
                if self.eat(",") {
                    continue;
                }
                if self.eat(">") {
                    break;
                }
                return Err(self.error("expected ',' or '>'"));
            }
        }

        Ok(TypeSig::Named { full_name, args })
    }

    fn parse_identifier(&mut self) -> MetadataResult<String> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '`' {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
        if self.pos == start {
            return Err(self.error("expected identifier"));
        }
        Ok(self.text[start..self.pos].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(full_name: &str, args: Vec<TypeSig>) -> TypeSig {
        TypeSig::Named {
            full_name: full_name.to_string(),
            args,
        }
    }

    #[test]
    fn test_parse_simple_name() {
        assert_eq!(TypeSig::parse("System.Int32").unwrap(), named("System.Int32", vec![]));
    }

    #[test]
    fn test_parse_generic_instantiation() {
        let sig = TypeSig::parse("Windows.Foundation.IReference`1<System.Int32>").unwrap();
        assert_eq!(
            sig,
            named(
                "Windows.Foundation.IReference`1",
                vec![named("System.Int32", vec![])]
            )
        );
    }

    #[test]
    fn test_parse_nested_generics_and_suffixes() {
        let sig = TypeSig::parse("Windows.Foundation.Collections.IMap`2<System.String, !T[]>[]")
            .unwrap();
        assert_eq!(
            sig,
            TypeSig::Array(Box::new(named(
                "Windows.Foundation.Collections.IMap`2",
                vec![
                    named("System.String", vec![]),
                    TypeSig::Array(Box::new(TypeSig::GenericParam("T".to_string()))),
                ]
            )))
        );
    }

    #[test]
    fn test_parse_pointer() {
        assert_eq!(
            TypeSig::parse("System.Byte*").unwrap(),
            TypeSig::Pointer(Box::new(named("System.Byte", vec![])))
        );
    }

    #[test]
    fn test_display_round_trips_text() {
        let text = "Windows.Foundation.Collections.IMap`2<System.String, !T[]>";
        assert_eq!(TypeSig::parse(text).unwrap().to_string(), text);
    }

    #[test]
    fn test_parse_errors() {
        assert!(TypeSig::parse("").is_err());
        assert!(TypeSig::parse("System.").is_err());
        assert!(TypeSig::parse("Foo<System.Int32").is_err());
        assert!(TypeSig::parse("Foo<>").is_err());
        assert!(TypeSig::parse("System.Int32 extra").is_err());
    }
}
