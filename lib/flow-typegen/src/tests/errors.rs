use crate::{
    ast::OperationKind,
    error::{SourcePosition, TypegenError},
    pipeline::{transform, TransformOptions},
    tests::testkit::{init_logger, inline_schema, transform_operation, transform_operation_with},
    utils::parsing::parse_operation,
};

#[test]
fn unknown_field() {
    init_logger();
    let err = transform_operation("query {\n  hero { nickname }\n}").expect_err("to fail");

    assert_eq!(
        err,
        TypegenError::FieldNotFound {
            field_name: "nickname".to_string(),
            type_name: "Character".to_string(),
            position: SourcePosition { line: 2, column: 10 },
        }
    );
    assert_eq!(err.to_string(), "Could not resolve field 'nickname' on type 'Character' at 2:10");
}

#[test]
fn composite_field_without_selection() {
    init_logger();
    let err = transform_operation("query { hero }").expect_err("to fail");

    assert!(matches!(
        err,
        TypegenError::MissingSelectionSet { ref field_name, ref type_name, .. }
            if field_name == "hero" && type_name == "Character"
    ));
}

#[test]
fn unknown_variable_type() {
    init_logger();
    let err = transform_operation("query ($ep: Era) { hero(episode: $ep) { id } }")
        .expect_err("to fail");

    assert!(matches!(
        err,
        TypegenError::TypeNotFound { ref type_name, .. } if type_name == "Era"
    ));
}

#[test]
fn output_type_as_variable() {
    init_logger();
    let err = transform_operation("query ($droid: Droid) { hero { id } }").expect_err("to fail");

    assert!(matches!(
        err,
        TypegenError::NotInputType { ref type_name, .. } if type_name == "Droid"
    ));
}

#[test]
fn inline_fragment_on_scalar() {
    init_logger();
    let err = transform_operation("query { hero { ... on String { length } } }")
        .expect_err("to fail");

    assert!(matches!(
        err,
        TypegenError::NotCompositeType { ref type_name, .. } if type_name == "String"
    ));
}

#[test]
fn fragment_on_unknown_type() {
    init_logger();
    let err = transform_operation("fragment F on Jedi { name } query { hero { ...F } }")
        .expect_err("to fail");

    assert!(matches!(
        err,
        TypegenError::TypeNotFound { ref type_name, .. } if type_name == "Jedi"
    ));
}

#[test]
fn missing_subscription_root() {
    init_logger();
    let err = transform_operation("subscription { hero { id } }").expect_err("to fail");

    assert_eq!(
        err,
        TypegenError::RootOperationNotFound {
            operation_kind: OperationKind::Subscription
        }
    );
    assert_eq!(err.to_string(), "Schema has no root type for subscription operations");
}

#[test]
fn input_object_as_output_field() {
    init_logger();
    let schema = inline_schema(
        r#"
          input Filter { term: String }
          type Query { filter: Filter }
        "#,
    );
    let document = parse_operation("query { filter { term } }").expect("to parse");

    let err = transform(&schema, &document).expect_err("to fail");
    assert!(matches!(
        err,
        TypegenError::NotOutputType { ref type_name, .. } if type_name == "Filter"
    ));
}

#[test]
fn recursive_input_object() {
    init_logger();
    let schema = inline_schema(
        r#"
          input Tree { label: String children: [Tree!] }
          type Query { grow(tree: Tree): Boolean }
        "#,
    );
    let document =
        parse_operation("query ($tree: Tree) { grow(tree: $tree) }").expect("to parse");

    let err = transform(&schema, &document).expect_err("to fail");
    assert_eq!(
        err,
        TypegenError::RecursiveInputType {
            type_name: "Tree".to_string()
        }
    );
}

#[test]
fn repeated_input_object_is_not_recursion() {
    init_logger();
    let schema = inline_schema(
        r#"
          input Point { x: Float! y: Float! }
          input Segment { from: Point! to: Point! }
          type Query { length(segment: Segment!): Float }
        "#,
    );
    let document =
        parse_operation("query ($segment: Segment!) { length(segment: $segment) }")
            .expect("to parse");

    let result = transform(&schema, &document).expect("to transform");
    assert_eq!(
        result.operations[0]
            .variable("segment")
            .map(ToString::to_string)
            .as_deref(),
        Some("{from: {x: number, y: number}, to: {x: number, y: number}}")
    );
}

#[test]
fn selection_deeper_than_max_depth() {
    init_logger();
    let options = TransformOptions {
        max_depth: 2,
        ..TransformOptions::default()
    };

    let shallow = transform_operation_with("query { hero { name } }", &options);
    assert!(shallow.is_ok());

    let err = transform_operation_with("query { hero { friends { name } } }", &options)
        .expect_err("to fail");
    assert_eq!(err, TypegenError::MaxDepthExceeded { max_depth: 2 });
}

#[test]
fn fragment_deepened_by_spreading() {
    init_logger();
    let options = TransformOptions {
        max_depth: 3,
        ..TransformOptions::default()
    };

    // each selection set is shallow enough on its own
    let err = transform_operation_with(
        r#"
          query { hero { friends { ...Deep } } }
          fragment Deep on Character { friends { name } }
        "#,
        &options,
    )
    .expect_err("to fail");
    assert_eq!(err, TypegenError::MaxDepthExceeded { max_depth: 3 });
}

/// A query spreading `F0`, where every fragment nests `levels` selections of `friends` around a
/// spread of the next one.
fn fragment_chain(fragments: usize, levels: usize) -> String {
    let mut document = String::from("query { hero { ...F0 } }\n");
    for i in 0..fragments {
        let innermost = if i + 1 == fragments {
            "name".to_string()
        } else {
            format!("...F{}", i + 1)
        };
        document.push_str(&format!(
            "fragment F{} on Character {{ {}{}{} }}\n",
            i,
            "friends { ".repeat(levels),
            innermost,
            " }".repeat(levels)
        ));
    }
    document
}

#[test]
fn long_fragment_chain_exceeds_max_depth() {
    init_logger();
    // every fragment fits within the cap on its own
    let err = transform_operation(&fragment_chain(100, 40)).expect_err("to fail");
    assert_eq!(
        err,
        TypegenError::MaxDepthExceeded {
            max_depth: TransformOptions::default().max_depth
        }
    );

    let err = transform_operation(&fragment_chain(50, 40)).expect_err("to fail");
    assert_eq!(
        err,
        TypegenError::MaxDepthExceeded {
            max_depth: TransformOptions::default().max_depth
        }
    );
}

#[test]
fn short_fragment_chain_within_max_depth() {
    init_logger();
    assert!(transform_operation(&fragment_chain(3, 10)).is_ok());

    let options = TransformOptions {
        max_depth: 4,
        ..TransformOptions::default()
    };
    let at_the_cap = transform_operation_with(
        r#"
          query { hero { ...Friends } }
          fragment Friends on Character { friends { name } }
        "#,
        &options,
    );
    assert!(at_the_cap.is_ok());
}

#[test]
fn unknown_fragment() {
    init_logger();
    let err = transform_operation("query { hero { ...Missing } }").expect_err("to fail");

    assert_eq!(
        err,
        TypegenError::FragmentNotFound {
            fragment_name: "Missing".to_string()
        }
    );
}

#[test]
fn unknown_fragment_inside_fragment() {
    init_logger();
    let err = transform_operation(
        r#"
          query { hero { ...Outer } }
          fragment Outer on Character { friends { ...Missing } }
        "#,
    )
    .expect_err("to fail");

    assert_eq!(
        err,
        TypegenError::FragmentNotFound {
            fragment_name: "Missing".to_string()
        }
    );
}

#[test]
fn cyclic_fragments() {
    init_logger();
    let err = transform_operation(
        r#"
          query { hero { ...A } }
          fragment A on Character { name ...B }
          fragment B on Character { friends { ...A } }
        "#,
    )
    .expect_err("to fail");

    assert_eq!(err.to_string(), "Fragments spread each other in a cycle: A, B");
}
