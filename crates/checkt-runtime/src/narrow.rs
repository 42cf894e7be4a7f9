//! Checked re-typing of erased views.

use crate::identity;
use crate::slot::ParamSlot;
use crate::token::{AnyToken, TypeTag};
use std::sync::Arc;
use thiserror::Error;

/// Raised when a witness does not prove the narrowing it was offered for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CastMismatch {
    #[error("{operation}: expected {expected} witnesses, got {actual}")]
    WitnessCount {
        operation: String,
        expected: usize,
        actual: usize,
    },
    #[error("{operation}: no witness supplied for '{accessor}'")]
    MissingWitness { operation: String, accessor: String },
    #[error("{operation}: instance has no token accessor '{accessor}'")]
    UnknownAccessor { operation: String, accessor: String },
    #[error("{operation}: witness for '{accessor}' is not the instance's token")]
    NotIdentical { operation: String, accessor: String },
    #[error("{operation}: witness for '{accessor}' has no type argument at position {position}")]
    MalformedWitness {
        operation: String,
        accessor: String,
        position: usize,
    },
}

/// Instances that expose their stored tokens by accessor name.
pub trait Witnessed {
    fn token(&self, accessor: &str) -> Option<&AnyToken>;
}

/// A shared instance together with the type arguments it is statically claimed to have.
#[derive(Debug)]
pub struct Erased<O: ?Sized> {
    instance: Arc<O>,
    slots: Vec<ParamSlot<TypeTag>>,
}

impl<O: ?Sized> Erased<O> {
    /// The fully erased view `O<?, ..., ?>`.
    pub fn new(instance: Arc<O>, arity: usize) -> Self {
        Self {
            instance,
            slots: vec![ParamSlot::Unknown; arity],
        }
    }

    pub fn with_slots(instance: Arc<O>, slots: Vec<ParamSlot<TypeTag>>) -> Self {
        Self { instance, slots }
    }

    #[must_use]
    pub fn instance(&self) -> &Arc<O> {
        &self.instance
    }

    #[must_use]
    pub fn slots(&self) -> &[ParamSlot<TypeTag>] {
        &self.slots
    }

    #[must_use]
    pub fn slot(&self, index: usize) -> Option<&ParamSlot<TypeTag>> {
        self.slots.get(index)
    }

    /// True if both views refer to the very same instance.
    #[must_use]
    pub fn is_same_instance(&self, other: &Erased<O>) -> bool {
        identity::same(&self.instance, &other.instance)
    }

    /// Widen back to the fully erased view.
    #[must_use]
    pub fn erase(&self) -> Self {
        Self::new(Arc::clone(&self.instance), self.slots.len())
    }
}

impl<O: ?Sized> Clone for Erased<O> {
    fn clone(&self) -> Self {
        Self {
            instance: Arc::clone(&self.instance),
            slots: self.slots.clone(),
        }
    }
}

/// One witness parameter of a narrowing: which accessor it is checked
/// against, and which parameters its type arguments pin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WitnessCheck {
    pub accessor: String,
    /// `(type argument position in the witness, owning parameter index)`.
    pub binds: Vec<(usize, usize)>,
}

/// A narrowing operation: identity checks plus the resulting view shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Narrowing {
    pub name: String,
    pub arity: usize,
    pub checks: Vec<WitnessCheck>,
    /// Keep the input's slots for parameters this narrowing does not pin,
    /// instead of resetting them to unknown.
    pub passthrough: bool,
}

impl Narrowing {
    /// Check every witness against the live token of its accessor, then
    /// return the same instance re-typed.
    pub fn apply<O: Witnessed + ?Sized>(
        &self,
        target: &Erased<O>,
        witnesses: &[Option<&AnyToken>],
    ) -> Result<Erased<O>, CastMismatch> {
        if witnesses.len() != self.checks.len() {
            return Err(CastMismatch::WitnessCount {
                operation: self.name.clone(),
                expected: self.checks.len(),
                actual: witnesses.len(),
            });
        }

        let mut slots: Vec<ParamSlot<TypeTag>> = if self.passthrough {
            let mut slots = target.slots.clone();
            slots.resize(self.arity, ParamSlot::Unknown);
            slots
        } else {
            vec![ParamSlot::Unknown; self.arity]
        };

        for (check, witness) in self.checks.iter().zip(witnesses) {
            let Some(witness) = witness else {
                return Err(CastMismatch::MissingWitness {
                    operation: self.name.clone(),
                    accessor: check.accessor.clone(),
                });
            };
            let Some(live) = target.instance.token(&check.accessor) else {
                return Err(CastMismatch::UnknownAccessor {
                    operation: self.name.clone(),
                    accessor: check.accessor.clone(),
                });
            };
            if !live.same(witness) {
                return Err(CastMismatch::NotIdentical {
                    operation: self.name.clone(),
                    accessor: check.accessor.clone(),
                });
            }
            for &(position, param) in &check.binds {
                let Some(tag) = witness.args().get(position) else {
                    return Err(CastMismatch::MalformedWitness {
                        operation: self.name.clone(),
                        accessor: check.accessor.clone(),
                        position,
                    });
                };
                if let Some(slot) = slots.get_mut(param) {
                    *slot = ParamSlot::Bound(*tag);
                }
            }
        }

        Ok(Erased::with_slots(Arc::clone(&target.instance), slots))
    }
}
