//! Runtime half of the erasure-witness pattern.
//!
//! A value carries N erased type parameters. Some of them are witnessed by
//! tokens stored at construction. A narrowing checks caller-supplied tokens
//! against the stored ones by identity and returns a re-typed view of the
//! same value; nothing is copied.
//!
//! - [`ParamSlot`]: one parameter of a view, either bound or unknown
//! - [`Token`] / [`AnyToken`]: identity-compared witnesses
//! - [`Erased`] / [`Narrowing`]: views and the checked re-typing between them
//! - [`IdentityMap`]: associative store keyed by reference identity

pub mod identity;
pub mod narrow;
pub mod slot;
pub mod token;

pub use identity::{IdentityMap, same};
pub use narrow::{CastMismatch, Erased, Narrowing, WitnessCheck, Witnessed};
pub use slot::ParamSlot;
pub use token::{AnyToken, Token, TypeTag};
