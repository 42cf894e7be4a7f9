//! Container emission.
//!
//! A container is a `final` class wrapping an identity-keyed map. The map
//! holds erased entries and the generated accessors cast values back to the
//! declared value type; since nothing else can reach the map, those casts are
//! unchecked.

use checkt_emitter::{ClassDecl, CompilationUnit, Expr, Member, MethodDecl, Modifier, Param, Stmt};
use checkt_model::ContainerDeclaration;
use tracing::trace;

use crate::options::GeneratorOptions;

const STORE_FIELD: &str = "map";
const STORE_TYPE: &str = "Map<Object, Object>";
const STORE_IMPL: &str = "IdentityHashMap<>";
const IMPORTS: [&str; 2] = ["java.util.IdentityHashMap", "java.util.Map"];

#[must_use]
pub fn container_unit(
    container: &ContainerDeclaration,
    options: &GeneratorOptions,
) -> CompilationUnit {
    let declaring = &container.declaring_type;
    let public = declaring.visibility.is_public();
    let key_type = container.key_type.to_string();
    let value_type = container.value_type.to_string();
    trace!(
        container = %container.qualified_class_name(),
        key = %key_type,
        value = %value_type,
        "container"
    );

    let mut class_modifiers = Vec::with_capacity(2);
    if public {
        class_modifiers.push(Modifier::Public);
    }
    class_modifiers.push(Modifier::Final);

    let store = Member::Field {
        modifiers: vec![Modifier::Private, Modifier::Final],
        ty: STORE_TYPE.to_string(),
        name: STORE_FIELD.to_string(),
        initializer: Some(Expr::new_instance(STORE_IMPL, vec![])),
    };

    let accessor = |name: &str, params: Vec<Param>| {
        let args = params.iter().map(|p| Expr::name(&p.name)).collect();
        let mut annotations = Vec::new();
        if options.suppress_unchecked {
            annotations.push("SuppressWarnings(\"unchecked\")".to_string());
        }
        Member::Method(MethodDecl {
            annotations,
            modifiers: if public { vec![Modifier::Public] } else { Vec::new() },
            type_params: declaring
                .type_parameters
                .iter()
                .map(|p| p.declaration())
                .collect(),
            return_type: value_type.clone(),
            name: name.to_string(),
            params,
            body: vec![Stmt::Return(Expr::cast(
                value_type.clone(),
                Expr::call(Expr::name(STORE_FIELD), name, args),
            ))],
        })
    };

    let put = accessor(
        "put",
        vec![
            Param::new(key_type.clone(), "key"),
            Param::new(value_type.clone(), "value"),
        ],
    );
    let get = accessor("get", vec![Param::new(key_type.clone(), "key")]);

    CompilationUnit {
        package: (!declaring.namespace.is_empty()).then(|| declaring.namespace.clone()),
        imports: IMPORTS.iter().map(ToString::to_string).collect(),
        classes: vec![ClassDecl {
            modifiers: class_modifiers,
            name: container.class_name.clone(),
            members: vec![store, put, get],
        }],
    }
}

#[cfg(test)]
#[path = "tests/containers_tests.rs"]
mod containers_tests;
