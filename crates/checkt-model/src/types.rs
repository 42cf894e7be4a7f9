//! Type expressions.
//!
//! The manifest spells types the way they appear in source
//! (`Class<T1>`, `java.util.Map<K, java.util.List<V>>`, `int[]`,
//! `? extends Number`). [`parse_type`] turns them into a [`TypeRef`] tree.
//!
//! A `TypeRef` is scope-free: `T` parses as `Named { name: "T", args: [] }`.
//! Whether it denotes a type variable is decided later against the owning
//! type's parameters (see `descriptors`).

use std::fmt;
use thiserror::Error;

const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "char", "double", "float", "int", "long", "short", "void",
];

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// `int`, `boolean`, `void`, ...
    Primitive(String),
    /// A class or interface type, or a bare name that may resolve to a type variable.
    Named { name: String, args: Vec<TypeRef> },
    /// `T[]`
    Array(Box<TypeRef>),
    /// `?`, `? extends T`, `? super T`
    Wildcard(Option<WildcardBound>),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum WildcardBound {
    Extends(Box<TypeRef>),
    Super(Box<TypeRef>),
}

impl TypeRef {
    pub fn named(name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        Self::Named {
            name: name.into(),
            args,
        }
    }

    /// A bare simple name, which is how a type variable is written.
    pub fn var(name: impl Into<String>) -> Self {
        Self::named(name, Vec::new())
    }

    pub const fn unknown() -> Self {
        Self::Wildcard(None)
    }

    /// True for a class/interface type written with at least one type argument.
    #[must_use]
    pub fn is_parameterized(&self) -> bool {
        matches!(self, Self::Named { args, .. } if !args.is_empty())
    }

    #[must_use]
    pub fn type_arguments(&self) -> &[TypeRef] {
        match self {
            Self::Named { args, .. } => args,
            _ => &[],
        }
    }

    /// The name if this could be a type-variable reference: a simple,
    /// unqualified name without type arguments.
    #[must_use]
    pub fn as_simple_name(&self) -> Option<&str> {
        match self {
            Self::Named { name, args } if args.is_empty() && !name.contains('.') => {
                Some(name.as_str())
            }
            _ => None,
        }
    }

    /// Calls `f` for every simple name occurring anywhere in this type.
    pub fn for_each_simple_name(&self, f: &mut impl FnMut(&str)) {
        match self {
            Self::Primitive(_) => {}
            Self::Named { name, args } => {
                if args.is_empty() && !name.contains('.') {
                    f(name);
                }
                for arg in args {
                    arg.for_each_simple_name(f);
                }
            }
            Self::Array(elem) => elem.for_each_simple_name(f),
            Self::Wildcard(Some(WildcardBound::Extends(bound) | WildcardBound::Super(bound))) => {
                bound.for_each_simple_name(f);
            }
            Self::Wildcard(None) => {}
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(name) => f.write_str(name),
            Self::Named { name, args } => {
                f.write_str(name)?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            Self::Array(elem) => write!(f, "{elem}[]"),
            Self::Wildcard(None) => f.write_str("?"),
            Self::Wildcard(Some(WildcardBound::Extends(bound))) => write!(f, "? extends {bound}"),
            Self::Wildcard(Some(WildcardBound::Super(bound))) => write!(f, "? super {bound}"),
        }
    }
}

// =============================================================================
// Parser
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeParseError {
    #[error("empty type expression")]
    Empty,
    #[error("unexpected character '{ch}' at offset {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("expected {expected} at offset {pos}")]
    Expected { expected: &'static str, pos: usize },
    #[error("primitive type '{0}' cannot be used as a type argument")]
    PrimitiveArgument(String),
    #[error("unexpected trailing input at offset {0}")]
    Trailing(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token<'a> {
    Ident(&'a str),
    Dot,
    Comma,
    Lt,
    Gt,
    LBracket,
    RBracket,
    Question,
}

fn tokenize(text: &str) -> Result<Vec<(Token<'_>, usize)>, TypeParseError> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();
    while let Some(&(pos, ch)) = chars.peek() {
        let token = match ch {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '.' => Token::Dot,
            ',' => Token::Comma,
            '<' => Token::Lt,
            '>' => Token::Gt,
            '[' => Token::LBracket,
            ']' => Token::RBracket,
            '?' => Token::Question,
            c if is_ident_start(c) => {
                let mut end = pos;
                while let Some(&(i, c)) = chars.peek() {
                    if !is_ident_part(c) {
                        break;
                    }
                    end = i + c.len_utf8();
                    chars.next();
                }
                tokens.push((Token::Ident(&text[pos..end]), pos));
                continue;
            }
            other => return Err(TypeParseError::UnexpectedChar { ch: other, pos }),
        };
        chars.next();
        tokens.push((token, pos));
    }
    Ok(tokens)
}

pub(crate) fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

pub(crate) fn is_ident_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

struct Parser<'a> {
    tokens: Vec<(Token<'a>, usize)>,
    index: usize,
    len: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.index).map(|(t, _)| t)
    }

    fn pos(&self) -> usize {
        self.tokens
            .get(self.index)
            .map(|(_, p)| *p)
            .unwrap_or(self.len)
    }

    fn eat(&mut self, token: &Token<'_>) -> bool {
        if self.peek() == Some(token) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &Token<'_>, expected: &'static str) -> Result<(), TypeParseError> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(TypeParseError::Expected {
                expected,
                pos: self.pos(),
            })
        }
    }

    fn ident(&mut self) -> Result<&'a str, TypeParseError> {
        match self.peek() {
            Some(Token::Ident(name)) => {
                let name = *name;
                self.index += 1;
                Ok(name)
            }
            _ => Err(TypeParseError::Expected {
                expected: "identifier",
                pos: self.pos(),
            }),
        }
    }

    fn parse_type(&mut self, allow_wildcard: bool) -> Result<TypeRef, TypeParseError> {
        if allow_wildcard && self.eat(&Token::Question) {
            let bound = match self.peek() {
                Some(Token::Ident("extends")) => {
                    self.index += 1;
                    Some(WildcardBound::Extends(Box::new(self.parse_type(false)?)))
                }
                Some(Token::Ident("super")) => {
                    self.index += 1;
                    Some(WildcardBound::Super(Box::new(self.parse_type(false)?)))
                }
                _ => None,
            };
            return Ok(TypeRef::Wildcard(bound));
        }

        let mut name = self.ident()?.to_string();
        while self.eat(&Token::Dot) {
            name.push('.');
            name.push_str(self.ident()?);
        }

        let mut ty = if PRIMITIVES.contains(&name.as_str()) {
            TypeRef::Primitive(name)
        } else {
            let mut args = Vec::new();
            if self.eat(&Token::Lt) {
                loop {
                    let arg = self.parse_type(true)?;
                    if let TypeRef::Primitive(p) = &arg {
                        return Err(TypeParseError::PrimitiveArgument(p.clone()));
                    }
                    args.push(arg);
                    if !self.eat(&Token::Comma) {
                        break;
                    }
                }
                self.expect(&Token::Gt, "'>'")?;
            }
            TypeRef::Named { name, args }
        };

        while self.eat(&Token::LBracket) {
            self.expect(&Token::RBracket, "']'")?;
            ty = TypeRef::Array(Box::new(ty));
        }
        Ok(ty)
    }
}

/// Parse a type expression.
pub fn parse_type(text: &str) -> Result<TypeRef, TypeParseError> {
    let tokens = tokenize(text)?;
    if tokens.is_empty() {
        return Err(TypeParseError::Empty);
    }
    let mut parser = Parser {
        tokens,
        index: 0,
        len: text.len(),
    };
    let ty = parser.parse_type(false)?;
    if parser.index != parser.tokens.len() {
        return Err(TypeParseError::Trailing(parser.pos()));
    }
    Ok(ty)
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod types_tests;
