//! Cast emission.
//!
//! Each validated owning type yields one full narrowing and, when it has
//! more than one accessor, one partial narrowing per accessor. A [`CastPlan`]
//! describes an operation independently of its rendering: which witnesses it
//! takes, which parameters it pins, and the parameter slots of its input and
//! result views. The plan is lowered twice: to Java IR for the holder class,
//! and to a [`checkt_runtime::Narrowing`] that has the same check semantics.

use checkt_emitter::{ClassDecl, CompilationUnit, Expr, Member, MethodDecl, Modifier, Param, Stmt};
use checkt_model::{OwningType, TokenAccessor, TypeRef};
use checkt_runtime::{Narrowing, ParamSlot, WitnessCheck};
use fixedbitset::FixedBitSet;
use std::sync::Arc;
use tracing::trace;

use crate::grouping::{NamespaceGroup, TypeGroup};
use crate::naming::{fresh_name, local_name};
use crate::options::{GeneratorOptions, SignatureStyle};

const INSTANCE_NAME: &str = "o";
const MISMATCH_EXCEPTION: &str = "ClassCastException";

/// One witness argument of a narrowing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WitnessParam {
    /// The accessor the witness is compared against.
    pub accessor: String,
    pub param_name: String,
    /// Rendered declared return type of the accessor.
    pub ty: String,
    /// `(type argument position, owning parameter index)` for every direct
    /// type argument that names an owning parameter.
    pub binds: Vec<(usize, usize)>,
}

#[derive(Debug, Clone)]
pub struct CastPlan {
    pub name: String,
    pub owner: Arc<OwningType>,
    pub witnesses: Vec<WitnessParam>,
    /// Parameters bound by this narrowing.
    pub pinned: FixedBitSet,
    /// Parameters declared on the operation itself, in declaration order.
    pub quantified: Vec<usize>,
    pub input: Vec<ParamSlot<usize>>,
    pub output: Vec<ParamSlot<usize>>,
    pub public: bool,
    pub instance_name: String,
    pub style: SignatureStyle,
}

impl CastPlan {
    /// The narrowing over every accessor of the type.
    #[must_use]
    pub fn full(group: &TypeGroup, options: &GeneratorOptions) -> Self {
        Self::build(
            options.cast_name.clone(),
            &group.owner,
            &group.accessors,
            options.signature_style,
        )
    }

    /// The narrowing over a single accessor.
    #[must_use]
    pub fn partial(
        group: &TypeGroup,
        accessor: &TokenAccessor,
        options: &GeneratorOptions,
    ) -> Self {
        let name = format!("{}{}", options.partial_cast_prefix, accessor.token_name().upper);
        Self::build(
            name,
            &group.owner,
            std::slice::from_ref(accessor),
            options.signature_style,
        )
    }

    fn build(
        name: String,
        owner: &Arc<OwningType>,
        accessors: &[TokenAccessor],
        style: SignatureStyle,
    ) -> Self {
        let arity = owner.type_parameters.len();
        let mut pinned = FixedBitSet::with_capacity(arity);
        let mut mentioned = FixedBitSet::with_capacity(arity);
        let mut taken: Vec<String> = Vec::with_capacity(accessors.len());
        let mut witnesses = Vec::with_capacity(accessors.len());

        for accessor in accessors {
            let binds: Vec<(usize, usize)> = accessor
                .return_type
                .type_arguments()
                .iter()
                .enumerate()
                .filter_map(|(position, arg)| {
                    accessor
                        .resolve_type_variable(arg)
                        .map(|param| (position, param))
                })
                .collect();
            for &(_, param) in &binds {
                pinned.insert(param);
            }

            let ty = witness_type(accessor);
            mark_owner_params(owner, &ty, &mut mentioned);

            let taken_refs: Vec<&str> = taken.iter().map(String::as_str).collect();
            let param_name = fresh_name(&local_name(&accessor.token_name().lower), &taken_refs);
            taken.push(param_name.clone());

            witnesses.push(WitnessParam {
                accessor: accessor.name.clone(),
                param_name,
                ty: ty.to_string(),
                binds,
            });
        }

        let taken_refs: Vec<&str> = taken.iter().map(String::as_str).collect();
        let instance_name = fresh_name(INSTANCE_NAME, &taken_refs);

        let (quantified, input, output): (Vec<usize>, Vec<_>, Vec<_>) = match style {
            SignatureStyle::Wildcard => {
                mentioned.union_with(&pinned);
                close_over_bounds(owner, &mut mentioned);
                let output = (0..arity)
                    .map(|i| {
                        if pinned.contains(i) {
                            ParamSlot::Bound(i)
                        } else {
                            ParamSlot::Unknown
                        }
                    })
                    .collect();
                (
                    mentioned.ones().collect(),
                    vec![ParamSlot::Unknown; arity],
                    output,
                )
            }
            SignatureStyle::Passthrough => {
                let input = (0..arity)
                    .map(|i| {
                        if pinned.contains(i) {
                            ParamSlot::Unknown
                        } else {
                            ParamSlot::Bound(i)
                        }
                    })
                    .collect();
                ((0..arity).collect(), input, (0..arity).map(ParamSlot::Bound).collect())
            }
        };

        trace!(
            owner = %owner.qualified_name(),
            operation = %name,
            pinned = pinned.count_ones(..),
            "cast plan"
        );
        Self {
            name,
            owner: Arc::clone(owner),
            witnesses,
            pinned,
            quantified,
            input,
            output,
            public: owner.visibility.is_public(),
            instance_name,
            style,
        }
    }

    #[must_use]
    pub fn input_type(&self) -> String {
        render_view(&self.owner, &self.input)
    }

    #[must_use]
    pub fn output_type(&self) -> String {
        render_view(&self.owner, &self.output)
    }

    /// Lower to a static method of the holder class.
    #[must_use]
    pub fn to_method(&self, options: &GeneratorOptions) -> MethodDecl {
        let mut annotations = Vec::new();
        if options.suppress_unchecked {
            annotations.push("SuppressWarnings(\"unchecked\")".to_string());
        }
        let mut modifiers = Vec::with_capacity(2);
        if self.public {
            modifiers.push(Modifier::Public);
        }
        modifiers.push(Modifier::Static);

        let mut params = Vec::with_capacity(self.witnesses.len() + 1);
        params.push(Param::new(self.input_type(), &self.instance_name));
        params.extend(
            self.witnesses
                .iter()
                .map(|w| Param::new(&w.ty, &w.param_name)),
        );

        let mut body: Vec<Stmt> = self
            .witnesses
            .iter()
            .map(|w| Stmt::If {
                condition: Expr::or(
                    Expr::same(Expr::name(&w.param_name), Expr::Null),
                    Expr::not_same(
                        Expr::call(Expr::name(&self.instance_name), &w.accessor, vec![]),
                        Expr::name(&w.param_name),
                    ),
                ),
                then_branch: vec![Stmt::Throw(Expr::new_instance(MISMATCH_EXCEPTION, vec![]))],
            })
            .collect();
        let output = self.output_type();
        body.push(Stmt::Return(Expr::cast(
            output.clone(),
            Expr::name(&self.instance_name),
        )));

        MethodDecl {
            annotations,
            modifiers,
            type_params: self
                .quantified
                .iter()
                .map(|&i| self.owner.type_parameters[i].declaration())
                .collect(),
            return_type: output,
            name: self.name.clone(),
            params,
            body,
        }
    }

    /// The same checks as a runtime narrowing.
    #[must_use]
    pub fn narrowing(&self) -> Narrowing {
        Narrowing {
            name: self.name.clone(),
            arity: self.owner.type_parameters.len(),
            checks: self
                .witnesses
                .iter()
                .map(|w| WitnessCheck {
                    accessor: w.accessor.clone(),
                    binds: w.binds.clone(),
                })
                .collect(),
            passthrough: self.style == SignatureStyle::Passthrough,
        }
    }
}

/// Every cast operation for one owning type: the full narrowing first, then
/// the partial ones in accessor order.
#[must_use]
pub fn plan_type(group: &TypeGroup, options: &GeneratorOptions) -> Vec<CastPlan> {
    let mut plans = vec![CastPlan::full(group, options)];
    if group.accessors.len() > 1 {
        plans.extend(
            group
                .accessors
                .iter()
                .map(|accessor| CastPlan::partial(group, accessor, options)),
        );
    }
    plans
}

/// The holder compilation unit for one namespace.
#[must_use]
pub fn holder_unit(namespace: &NamespaceGroup, options: &GeneratorOptions) -> CompilationUnit {
    let mut modifiers = Vec::with_capacity(2);
    if namespace.has_public_type() {
        modifiers.push(Modifier::Public);
    }
    modifiers.push(Modifier::Final);

    let mut members = vec![Member::Constructor {
        modifiers: vec![Modifier::Private],
        params: Vec::new(),
        body: Vec::new(),
    }];
    for group in &namespace.types {
        members.extend(
            plan_type(group, options)
                .iter()
                .map(|plan| Member::Method(plan.to_method(options))),
        );
    }

    CompilationUnit {
        package: (!namespace.namespace.is_empty()).then(|| namespace.namespace.clone()),
        imports: Vec::new(),
        classes: vec![ClassDecl {
            modifiers,
            name: options.holder_name.clone(),
            members,
        }],
    }
}

/// `Owner<A, ?, C>` for the given slots.
fn render_view(owner: &OwningType, slots: &[ParamSlot<usize>]) -> String {
    if slots.is_empty() {
        return owner.simple_name.clone();
    }
    let args: Vec<&str> = slots
        .iter()
        .map(|slot| match slot {
            ParamSlot::Bound(i) => owner.type_parameters[*i].name.as_str(),
            ParamSlot::Unknown => "?",
        })
        .collect();
    format!("{}<{}>", owner.simple_name, args.join(", "))
}

/// The accessor's return type as a parameter type. Occurrences of the
/// accessor's own type parameters are out of scope in the holder and become
/// `?` at the nearest type-argument position.
fn witness_type(accessor: &TokenAccessor) -> TypeRef {
    if accessor.method_type_parameters.is_empty() {
        return accessor.return_type.clone();
    }
    let locals = &accessor.method_type_parameters;
    match &accessor.return_type {
        TypeRef::Named { name, args } => TypeRef::named(
            name.clone(),
            args.iter().map(|arg| erase_locals(arg, locals)).collect(),
        ),
        other => other.clone(),
    }
}

fn erase_locals(arg: &TypeRef, locals: &[String]) -> TypeRef {
    if let TypeRef::Named { name, args } = arg {
        if args.is_empty() {
            return if locals.contains(name) {
                TypeRef::unknown()
            } else {
                arg.clone()
            };
        }
        return TypeRef::named(
            name.clone(),
            args.iter().map(|a| erase_locals(a, locals)).collect(),
        );
    }
    let mut mentions = false;
    arg.for_each_simple_name(&mut |n| mentions |= locals.iter().any(|l| l == n));
    if mentions { TypeRef::unknown() } else { arg.clone() }
}

fn mark_owner_params(owner: &OwningType, ty: &TypeRef, set: &mut FixedBitSet) {
    ty.for_each_simple_name(&mut |name| {
        if let Some(i) = owner.param_index(name) {
            set.insert(i);
        }
    });
}

/// Extend `set` with every parameter its members' bounds refer to, transitively.
fn close_over_bounds(owner: &OwningType, set: &mut FixedBitSet) {
    let mut stack: Vec<usize> = set.ones().collect();
    while let Some(i) = stack.pop() {
        let mut referenced = FixedBitSet::with_capacity(owner.type_parameters.len());
        for bound in &owner.type_parameters[i].bounds {
            mark_owner_params(owner, bound, &mut referenced);
        }
        for j in referenced.ones() {
            if !set.put(j) {
                stack.push(j);
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/casts_tests.rs"]
mod casts_tests;
