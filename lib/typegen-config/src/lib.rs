mod env_overrides;
pub mod log;
pub mod transform;

use std::convert::Infallible;
use std::path::PathBuf;

use config::{Config, File, FileFormat, FileSourceFile};
use envconfig::Envconfig;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    env_overrides::{EnvVarOverrides, EnvVarOverridesError},
    log::LoggingConfig,
    transform::TransformConfig,
};

#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TypegenConfig {
    /// The logger configuration.
    ///
    /// Only warnings and errors are printed by default in release builds.
    #[serde(default)]
    pub log: LoggingConfig,

    /// Configuration of the schema and document to type transformation.
    #[serde(default)]
    pub transform: TransformConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum TypegenConfigError {
    #[error("Failed to load configuration: {0}")]
    ConfigLoadError(#[from] config::ConfigError),
    #[error("Failed to apply configuration overrides: {0}")]
    EnvVarOverridesError(#[from] EnvVarOverridesError),
    #[error("Failed to load the environment variables: {0}")]
    EnvVarLoadError(#[from] envconfig::Error),
    #[error("Failed to parse the configuration file path: {0}")]
    ConfigPathParseError(Infallible),
}

static DEFAULT_FILE_NAMES: &[&str] = &[
    "typegen.config.yaml",
    "typegen.config.yml",
    "typegen.config.json",
    "typegen.config.json5",
];

/// Loads the configuration from `override_config_path`, or from the first default file
/// found in the working directory, then applies the environment overrides.
pub fn load_config(
    override_config_path: Option<String>,
) -> Result<TypegenConfig, TypegenConfigError> {
    let env_overrides = EnvVarOverrides::init_from_env()?;
    let mut config = Config::builder();

    if let Some(path_str) = override_config_path {
        let path_buf = path_str
            .parse::<PathBuf>()
            .map_err(TypegenConfigError::ConfigPathParseError)?;
        let as_file: File<FileSourceFile, _> = path_buf.into();

        config = config.add_source(as_file.required(true));
    } else {
        for name in DEFAULT_FILE_NAMES {
            config = config.add_source(File::with_name(name).required(false));
        }
    }

    config = env_overrides.apply_overrides(config)?;

    Ok(config.build()?.try_deserialize::<TypegenConfig>()?)
}

pub fn parse_yaml_config(config_raw: &str) -> Result<TypegenConfig, TypegenConfigError> {
    Config::builder()
        .add_source(File::from_str(config_raw, FileFormat::Yaml))
        .build()?
        .try_deserialize::<TypegenConfig>()
        .map_err(TypegenConfigError::ConfigLoadError)
}

#[cfg(test)]
mod tests {
    use crate::log::{LogFormat, LogLevel};
    use crate::{parse_yaml_config, TypegenConfig};

    #[test]
    fn empty_config_uses_defaults() {
        let config = parse_yaml_config("").expect("to parse");

        assert_eq!(config.transform.max_depth, 64);
        assert!(!config.transform.exact_typename);
        assert_eq!(config.log.format, LogFormat::Text);
        assert_eq!(config.log.filter, None);
    }

    #[test]
    fn reads_every_section() {
        let config = parse_yaml_config(
            r#"
log:
  level: trace
  format: json
  filter: graphql_flow_typegen=trace
transform:
  max_depth: 12
  exact_typename: true
"#,
        )
        .expect("to parse");

        assert_eq!(config.log.level, LogLevel::Trace);
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.log.env_filter_str(), "graphql_flow_typegen=trace");
        assert_eq!(config.transform.max_depth, 12);
        assert!(config.transform.exact_typename);
    }

    #[test]
    fn level_is_the_default_filter() {
        let config = parse_yaml_config("log:\n  level: warn\n").expect("to parse");
        assert_eq!(config.log.env_filter_str(), "warn");
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(parse_yaml_config("transform:\n  max_dept: 3\n").is_err());
        assert!(parse_yaml_config("output: flow\n").is_err());
    }

    #[test]
    fn schema_lists_sections() {
        let schema =
            serde_json::to_value(schemars::schema_for!(TypegenConfig)).expect("to serialize");
        let properties = schema
            .get("properties")
            .and_then(|properties| properties.as_object())
            .expect("root properties");

        assert!(properties.contains_key("log"));
        assert!(properties.contains_key("transform"));
    }
}
