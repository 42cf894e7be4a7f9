//! Declaration IR for generated sources.
//!
//! The tree mirrors the generated output:
//! compilation unit → classes → members → statements → expressions.
//! Types are carried as already-rendered strings; the engines own type
//! shaping, the printer owns layout.

/// A single generated source file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompilationUnit {
    /// `None` for the default namespace.
    pub package: Option<String>,
    /// Fully qualified imports; printed sorted and deduplicated.
    pub imports: Vec<String>,
    pub classes: Vec<ClassDecl>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Modifier {
    Public,
    Private,
    Static,
    Final,
}

impl Modifier {
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Static => "static",
            Self::Final => "final",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    pub modifiers: Vec<Modifier>,
    pub name: String,
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    /// `modifiers ty name = initializer;`
    Field {
        modifiers: Vec<Modifier>,
        ty: String,
        name: String,
        initializer: Option<Expr>,
    },
    /// `modifiers Name(params) { body }`
    Constructor {
        modifiers: Vec<Modifier>,
        params: Vec<Param>,
        body: Vec<Stmt>,
    },
    Method(MethodDecl),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    /// Annotation text without the leading `@`, e.g. `SuppressWarnings("unchecked")`.
    pub annotations: Vec<String>,
    pub modifiers: Vec<Modifier>,
    /// Type parameter declarations, bounds included (`T extends Number`).
    pub type_params: Vec<String>,
    pub return_type: String,
    pub name: String,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub ty: String,
    pub name: String,
}

impl Param {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// `if (condition) { then_branch }`
    If {
        condition: Expr,
        then_branch: Vec<Stmt>,
    },
    /// `throw expr;`
    Throw(Expr),
    /// `return expr;`
    Return(Expr),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Identifier: `o`, `map`
    Name(String),
    /// `null`
    Null,
    /// `receiver.method(args)`
    Call {
        receiver: Box<Expr>,
        method: String,
        args: Vec<Expr>,
    },
    /// `left op right`
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    /// `(ty) expr`
    Cast { ty: String, expr: Box<Expr> },
    /// `new ty(args)`
    New { ty: String, args: Vec<Expr> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// Reference comparison.
    Same,
    NotSame,
    Or,
}

impl BinaryOp {
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Same => "==",
            Self::NotSame => "!=",
            Self::Or => "||",
        }
    }

    /// Higher binds tighter.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Same | Self::NotSame => 2,
            Self::Or => 1,
        }
    }
}

// =============================================================================
// Builders
// =============================================================================

impl Expr {
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    pub fn call(receiver: Expr, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Call {
            receiver: Box::new(receiver),
            method: method.into(),
            args,
        }
    }

    pub fn binary(left: Expr, op: BinaryOp, right: Expr) -> Self {
        Self::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn same(left: Expr, right: Expr) -> Self {
        Self::binary(left, BinaryOp::Same, right)
    }

    pub fn not_same(left: Expr, right: Expr) -> Self {
        Self::binary(left, BinaryOp::NotSame, right)
    }

    pub fn or(left: Expr, right: Expr) -> Self {
        Self::binary(left, BinaryOp::Or, right)
    }

    pub fn cast(ty: impl Into<String>, expr: Expr) -> Self {
        Self::Cast {
            ty: ty.into(),
            expr: Box::new(expr),
        }
    }

    pub fn new_instance(ty: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::New {
            ty: ty.into(),
            args,
        }
    }
}
