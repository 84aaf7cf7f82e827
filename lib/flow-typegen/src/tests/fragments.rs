use std::error::Error;

use indexmap::IndexMap;

use crate::{
    ast::{RawResult, Type},
    pipeline::{flatten, link, resolve, TransformOptions},
    tests::testkit::{init_logger, printed_result, starwars_schema, transform_operation},
    utils::parsing::parse_operation,
};

#[test]
fn repeated_spreads_merge_into_one_object() -> Result<(), Box<dyn Error>> {
    init_logger();
    let result = transform_operation(
        r#"
          query {
            leftComparison: hero(episode: EMPIRE) {
              ...comparisonFields
              ...comparisonFields
            }
            rightComparison: hero(episode: JEDI) {
              ...comparisonFields
            }
          }

          fragment comparisonFields on Character {
            __typename
            name
            appearsIn
            friends {
              name
            }
          }
        "#,
    )?;

    let comparison = r#"?{__typename: ( "Human" | "Droid" ), name: string, appearsIn: Array<?( "NEWHOPE" | "EMPIRE" | "JEDI" )>, friends: ?Array<?{name: string}>}"#;
    assert_eq!(
        printed_result(&result),
        format!(
            "{{leftComparison: {}, rightComparison: {}}}",
            comparison, comparison
        )
    );

    Ok(())
}

#[test]
fn spreading_a_narrower_fragment_twice_gives_one_branch() -> Result<(), Box<dyn Error>> {
    init_logger();
    let operation = r#"
      query {
        hero {
          ...DroidFields
          ...DroidFields
        }
      }

      fragment DroidFields on Droid {
        primaryFunction
      }
    "#;

    let schema = starwars_schema();
    let document = parse_operation(operation)?;
    let raw = resolve(&schema, &document, &TransformOptions::default())?;
    let flattened = flatten(link(raw, &TransformOptions::default())?);

    let hero = flattened.operations[0].selection.fields[0]
        .field_type
        .selection()
        .expect("hero selects fields");
    assert_eq!(hero.fragments.len(), 1);
    assert_eq!(hero.fragments[0].on, "Droid");

    assert_eq!(
        printed_result(&transform_operation(operation)?),
        "{hero: ?( {primaryFunction: ?string} | {} )}"
    );

    Ok(())
}

#[test]
fn fragments_spreading_fragments() -> Result<(), Box<dyn Error>> {
    init_logger();
    let result = transform_operation(
        r#"
          query {
            hero { ...HeroDetails }
          }

          fragment HeroDetails on Character {
            name
            friends { ...FriendName }
            ...DroidDetails
          }

          fragment FriendName on Character { name }

          fragment DroidDetails on Droid { primaryFunction }
        "#,
    )?;

    assert_eq!(
        printed_result(&result),
        "{hero: ?( {name: string, friends: ?Array<?{name: string}>} & ( {primaryFunction: ?string} | {} ) )}"
    );

    Ok(())
}

#[test]
fn fragment_on_union_inside_list() -> Result<(), Box<dyn Error>> {
    init_logger();
    let result = transform_operation(
        r#"
          query {
            search(text: "x") { ...Named }
          }

          fragment Named on SearchResult {
            ... on Character { name }
            ... on Starship { name }
          }
        "#,
    )?;

    assert_eq!(
        printed_result(&result),
        "{search: ?Array<?( {name: string} | {name: string} | {} )>}"
    );

    Ok(())
}

#[test]
fn linking_ignores_fragment_declaration_order() -> Result<(), Box<dyn Error>> {
    init_logger();
    let schema = starwars_schema();
    let document = parse_operation(
        r#"
          query {
            hero { ...A }
            search(text: "x") { ...C }
          }

          fragment A on Character { ...B id }
          fragment B on Character { name friends { ...C } }
          fragment C on Character { appearsIn }
        "#,
    )?;

    let raw = resolve(&schema, &document, &TransformOptions::default())?;
    let reversed = RawResult {
        operations: raw.operations.clone(),
        fragments: raw
            .fragments
            .iter()
            .rev()
            .map(|(name, selection)| (name.clone(), selection.clone()))
            .collect::<IndexMap<_, _>>(),
    };

    let options = TransformOptions::default();
    assert_eq!(link(raw, &options)?, link(reversed, &options)?);

    Ok(())
}

#[test]
fn unlinked_spreads_are_substituted() -> Result<(), Box<dyn Error>> {
    init_logger();
    let schema = starwars_schema();
    let document = parse_operation(
        r#"
          query { hero { ...Name } }
          fragment Name on Character { name }
        "#,
    )?;

    let raw = resolve(&schema, &document, &TransformOptions::default())?;
    let hero = match &raw.operations[0].selection.fields[0].field_type {
        Type::Selection(selection) => selection,
        other => panic!("unexpected hero type: {:?}", other),
    };
    assert_eq!(hero.fragment_references, vec!["Name"]);

    let linked = link(raw, &TransformOptions::default())?;
    let hero = linked.operations[0].selection.fields[0]
        .field_type
        .selection()
        .expect("hero selects fields");
    assert_eq!(hero.fragments.len(), 1);
    assert_eq!(hero.fragments[0].on, "Character");
    assert_eq!(hero.fragments[0].fields[0].name, "name");

    Ok(())
}
