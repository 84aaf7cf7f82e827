use std::error::Error;

use crate::{
    pipeline::{build, flatten, link, resolve, TransformOptions},
    tests::testkit::{init_logger, starwars_schema},
    utils::parsing::parse_operation,
};

#[test]
fn each_stage_in_isolation() -> Result<(), Box<dyn Error>> {
    init_logger();
    let schema = starwars_schema();
    let document = parse_operation(
        r#"
          query Hero($ep: Episode) {
            hero(episode: $ep) {
              name
              appearsIn
              ...Details
              ... on Droid { primaryFunction }
            }
          }

          fragment Details on Character {
            id
            ... on Droid { name }
          }
        "#,
    )?;
    let options = TransformOptions::default();

    let raw = resolve(&schema, &document, &options)?;
    insta::assert_snapshot!(format!("{}", raw), @r"
    query Hero($ep: enum(NEWHOPE | EMPIRE | JEDI)) {
      hero: Character {
        name: String!
        appearsIn: [enum(NEWHOPE | EMPIRE | JEDI)]!
        ... on Droid {
          primaryFunction: String
        }
        ...Details
      }
    }
    fragment Details on Character {
      id: ID!
      ... on Droid {
        name: String!
      }
    }
    ");

    let linked = link(raw, &options)?;
    insta::assert_snapshot!(format!("{}", linked), @r"
    query Hero($ep: enum(NEWHOPE | EMPIRE | JEDI)) {
      hero: Character {
        name: String!
        appearsIn: [enum(NEWHOPE | EMPIRE | JEDI)]!
        ... on Droid {
          primaryFunction: String
        }
        ... on Character {
          id: ID!
          ... on Droid {
            name: String!
          }
        }
      }
    }
    ");

    let flattened = flatten(linked);
    insta::assert_snapshot!(format!("{}", flattened), @r"
    query Hero($ep: enum(NEWHOPE | EMPIRE | JEDI)) {
      hero: Character {
        name: String!
        appearsIn: [enum(NEWHOPE | EMPIRE | JEDI)]!
        id: ID!
        ... on Droid {
          primaryFunction: String
          name: String!
        }
      }
    }
    ");

    let typed = build(flattened, &options)?;
    insta::assert_snapshot!(format!("{}", typed), @r#"
    query Hero
      $ep: ?( "NEWHOPE" | "EMPIRE" | "JEDI" )
      => {hero: ?( {name: string, appearsIn: Array<?( "NEWHOPE" | "EMPIRE" | "JEDI" )>, id: string} & ( {primaryFunction: ?string, name: string} | {} ) )}
    "#);

    Ok(())
}

#[test]
fn typed_result_serializes_to_json() -> Result<(), Box<dyn Error>> {
    init_logger();
    let schema = starwars_schema();
    let document = parse_operation("query Droid { droid(id: 1) { name primaryFunction } }")?;
    let typed = crate::pipeline::transform(&schema, &document)?;

    insta::assert_snapshot!(serde_json::to_string(&typed)?, @r#"{"operations":[{"kind":"query","name":"Droid","result":{"kind":"Object","of":[{"key":"droid","type":{"kind":"Nullable","of":{"kind":"Object","of":[{"key":"name","type":{"kind":"String"}},{"key":"primaryFunction","type":{"kind":"Nullable","of":{"kind":"String"}}}]}}}]},"variables":[]}]}"#);

    Ok(())
}
