use serde::{Deserialize, Serialize};

/// What downconversion does with a metadata key it has no legacy slot for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnrecognizedMetadataPolicy {
    /// Append it as an ordinary top-level field, failing if the name is taken.
    Passthrough,
    /// Fail the conversion.
    Reject,
    /// Discard it with a warning.
    Drop,
}

const DEFAULT_UNRECOGNIZED_METADATA_POLICY: UnrecognizedMetadataPolicy =
    UnrecognizedMetadataPolicy::Passthrough;

#[derive(Debug)]
pub enum ConfigError {
    ParseJson(serde_json::Error),
}

impl From<serde_json::Error> for ConfigError {
    fn from(error: serde_json::Error) -> ConfigError {
        ConfigError::ParseJson(error)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataConfiguration {
    pub unrecognized_metadata_policy: UnrecognizedMetadataPolicy,
}

impl Default for MetadataConfiguration {
    fn default() -> MetadataConfiguration {
        MetadataConfiguration {
            unrecognized_metadata_policy: DEFAULT_UNRECOGNIZED_METADATA_POLICY,
        }
    }
}

impl MetadataConfiguration {
    /// Later flags win. Unknown arguments are ignored.
    pub fn compile_from_args(args: &[String]) -> MetadataConfiguration {
        let mut config = MetadataConfiguration::default();
        for arg in args {
            match arg.as_str() {
                "--passthrough-unrecognized-metadata" => {
                    config.unrecognized_metadata_policy = UnrecognizedMetadataPolicy::Passthrough
                }
                "--reject-unrecognized-metadata" => {
                    config.unrecognized_metadata_policy = UnrecognizedMetadataPolicy::Reject
                }
                "--drop-unrecognized-metadata" => {
                    config.unrecognized_metadata_policy = UnrecognizedMetadataPolicy::Drop
                }
                _ => (),
            }
        }
        config
    }

    pub fn from_json_str(json: &str) -> Result<MetadataConfiguration, ConfigError> {
        let config = serde_json::from_str(json)?;
        Ok(config)
    }
}

#[cfg(test)]
mod config_tests {
    use crate::config::{MetadataConfiguration, UnrecognizedMetadataPolicy};

    fn to_args(args: &[&str]) -> Vec<String> {
        args.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn test_default_policy_is_passthrough() {
        let config = MetadataConfiguration::compile_from_args(&to_args(&["rpcmeta"]));
        assert_eq!(
            config.unrecognized_metadata_policy,
            UnrecognizedMetadataPolicy::Passthrough
        );
    }

    #[test]
    fn test_compile_from_args() {
        let config = MetadataConfiguration::compile_from_args(&to_args(&[
            "rpcmeta",
            "--verbose",
            "--reject-unrecognized-metadata",
        ]));
        assert_eq!(
            config.unrecognized_metadata_policy,
            UnrecognizedMetadataPolicy::Reject
        );

        let config = MetadataConfiguration::compile_from_args(&to_args(&[
            "--reject-unrecognized-metadata",
            "--drop-unrecognized-metadata",
        ]));
        assert_eq!(
            config.unrecognized_metadata_policy,
            UnrecognizedMetadataPolicy::Drop
        );
    }

    #[test]
    fn test_from_json_str() {
        let config =
            MetadataConfiguration::from_json_str(r#"{"unrecognized_metadata_policy":"drop"}"#)
                .unwrap();
        assert_eq!(
            config.unrecognized_metadata_policy,
            UnrecognizedMetadataPolicy::Drop
        );

        let config = MetadataConfiguration::from_json_str("{}").unwrap();
        assert_eq!(config, MetadataConfiguration::default());

        assert!(MetadataConfiguration::from_json_str(
            r#"{"unrecognized_metadata_policy":"explode"}"#
        )
        .is_err());
    }
}
