//! Witness tokens.
//!
//! A token plays the role a class literal plays in an erased generic API: it
//! names the type argument it stands for, and it is compared by identity.
//! Two tokens minted separately for the same type are *not* the same
//! witness. Clones share identity.

use std::any::TypeId;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Runtime name for a type argument.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    #[must_use]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[derive(Debug)]
struct TokenData {
    args: Vec<TypeTag>,
}

/// An erased witness. Equality is identity.
#[derive(Clone)]
pub struct AnyToken(Arc<TokenData>);

impl AnyToken {
    /// A fresh witness whose static type carries `args` as type arguments,
    /// e.g. `Pair<String, Integer>` carries two.
    #[must_use]
    pub fn with_args(args: Vec<TypeTag>) -> Self {
        Self(Arc::new(TokenData { args }))
    }

    #[must_use]
    pub fn args(&self) -> &[TypeTag] {
        &self.0.args
    }

    #[must_use]
    pub fn same(&self, other: &AnyToken) -> bool {
        crate::identity::same(&self.0, &other.0)
    }
}

impl fmt::Debug for AnyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyToken")
            .field("args", &self.0.args)
            .field("at", &Arc::as_ptr(&self.0))
            .finish()
    }
}

/// A witness for a single type argument `T`.
pub struct Token<T: ?Sized> {
    inner: AnyToken,
    _marker: PhantomData<fn() -> T>,
}

impl<T: ?Sized + 'static> Token<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: AnyToken::with_args(vec![TypeTag::of::<T>()]),
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub fn erase(&self) -> AnyToken {
        self.inner.clone()
    }

    #[must_use]
    pub fn as_any(&self) -> &AnyToken {
        &self.inner
    }
}

impl<T: ?Sized + 'static> Default for Token<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Clone for Token<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: ?Sized> fmt::Debug for Token<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}
