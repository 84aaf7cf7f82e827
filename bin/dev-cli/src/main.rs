use std::env;
use std::error::Error;
use std::process;

use graphql_flow_typegen::ast::QueryDocument;
use graphql_flow_typegen::pipeline::{build, flatten, link, resolve, TransformOptions};
use graphql_flow_typegen::utils::parsing::{parse_operation, parse_schema};
use graphql_flow_typegen::{print, SchemaIndex};
use graphql_flow_typegen_config::log::{LogFormat, LoggingConfig};
use graphql_flow_typegen_config::{load_config, TypegenConfig};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const USAGE: &str =
    "Usage: typegen-dev-cli <resolve|link|flatten|build|print> <schema_path> <operation_path> [--json] [--config <path>]";

fn init_logger(log_config: &LoggingConfig) {
    let tree_layer = matches!(log_config.format, LogFormat::Text).then(|| {
        tracing_tree::HierarchicalLayer::new(2)
            .with_bracketed_fields(true)
            .with_deferred_spans(false)
            .with_wraparound(25)
            .with_indent_lines(true)
            .with_timer(tracing_tree::time::Uptime::default())
            .with_thread_names(false)
            .with_thread_ids(false)
            .with_targets(false)
    });
    let json_layer = matches!(log_config.format, LogFormat::Json).then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(tree_layer)
        .with(json_layer)
        .with(EnvFilter::new(log_config.env_filter_str()))
        .init();
}

#[derive(Debug, PartialEq, Eq)]
struct CliArgs {
    command: String,
    schema_path: String,
    operation_path: String,
    as_json: bool,
    config_path: Option<String>,
}

/// Splits flags from positional arguments, flags may appear anywhere after the program name.
fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliArgs, String> {
    let mut positional = Vec::new();
    let mut as_json = false;
    let mut config_path = None;

    let mut args = args.into_iter().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => as_json = true,
            "--config" => match args.next() {
                Some(path) => config_path = Some(path),
                None => return Err("Missing value for '--config'".to_string()),
            },
            _ => positional.push(arg),
        }
    }

    match <[String; 3]>::try_from(positional) {
        Ok([command, schema_path, operation_path]) => Ok(CliArgs {
            command,
            schema_path,
            operation_path,
            as_json,
            config_path,
        }),
        Err(_) => Err(USAGE.to_string()),
    }
}

fn main() {
    let args = match parse_args(env::args()) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };

    let config = match load_config(args.config_path.clone()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };
    init_logger(&config.log);

    if let Err(err) = run(
        &args.command,
        &args.schema_path,
        &args.operation_path,
        args.as_json,
        &config,
    ) {
        eprintln!("{}", err);
        process::exit(1);
    }
}

fn run(
    command: &str,
    schema_path: &str,
    operation_path: &str,
    as_json: bool,
    config: &TypegenConfig,
) -> Result<(), Box<dyn Error>> {
    let options = TransformOptions {
        max_depth: config.transform.max_depth,
        exact_typename: config.transform.exact_typename,
    };
    let (schema, document) = read_inputs(schema_path, operation_path)?;
    debug!("running '{}' with {:?}", command, options);

    match command {
        "resolve" => {
            println!("{}", resolve(&schema, &document, &options)?);
        }
        "link" => {
            let raw = resolve(&schema, &document, &options)?;
            println!("{}", link(raw, &options)?);
        }
        "flatten" => {
            let raw = resolve(&schema, &document, &options)?;
            println!("{}", flatten(link(raw, &options)?));
        }
        "build" => {
            let raw = resolve(&schema, &document, &options)?;
            let typed = build(flatten(link(raw, &options)?), &options)?;
            if as_json {
                println!("{}", serde_json::to_string_pretty(&typed)?);
            } else {
                print!("{}", typed);
            }
        }
        "print" => {
            let raw = resolve(&schema, &document, &options)?;
            let typed = build(flatten(link(raw, &options)?), &options)?;
            for operation in &typed.operations {
                println!("{}", print(&operation.result));
                for variable in &operation.variables {
                    println!("${}: {}", variable.name, print(&variable.variable_type));
                }
            }
        }
        _ => {
            return Err(format!(
                "Unknown command '{}'. Available commands: resolve, link, flatten, build, print",
                command
            )
            .into());
        }
    }

    Ok(())
}

fn read_inputs(
    schema_path: &str,
    operation_path: &str,
) -> Result<(SchemaIndex, QueryDocument), Box<dyn Error>> {
    let sdl = std::fs::read_to_string(schema_path)
        .map_err(|err| format!("Unable to read schema file '{}': {}", schema_path, err))?;
    let schema = SchemaIndex::new(&parse_schema(&sdl)?);

    let operation = std::fs::read_to_string(operation_path)
        .map_err(|err| format!("Unable to read operation file '{}': {}", operation_path, err))?;
    let document = parse_operation(&operation)?;

    Ok((schema, document))
}
