mod defaults;

use crate::cli::ContactsArgs;
use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use kdcontacts::core::io::traits::MalformedPolicy;
use kdcontacts::engine::config::{ContactConfig, ContactConfigBuilder};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
enum PartialMalformedPolicy {
    Abort,
    Skip,
}

impl From<PartialMalformedPolicy> for MalformedPolicy {
    fn from(p: PartialMalformedPolicy) -> Self {
        match p {
            PartialMalformedPolicy::Abort => MalformedPolicy::Abort,
            PartialMalformedPolicy::Skip => MalformedPolicy::Skip,
        }
    }
}

/// Contents of a TOML config file. Every key is optional.
///
/// ```toml
/// radius = 4.5
/// malformed-records = "skip"
/// ```
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PartialContactConfig {
    radius: Option<f64>,
    malformed_records: Option<PartialMalformedPolicy>,
}

impl PartialContactConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading configuration from {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads the file named by `--config`, or an empty config when none was given.
    pub fn load(args: &ContactsArgs) -> Result<Self> {
        match &args.config {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolves every setting with command line > config file > built-in default.
    pub fn merge_with_cli(self, args: &ContactsArgs) -> Result<ContactConfig> {
        let defaults = DefaultsConfig::default();

        let radius = args.radius.or(self.radius).unwrap_or(defaults.radius);
        let malformed_records = if args.skip_malformed {
            MalformedPolicy::Skip
        } else {
            self.malformed_records
                .map(Into::into)
                .unwrap_or(defaults.malformed_records)
        };

        let config = ContactConfigBuilder::new()
            .radius(radius)
            .malformed_records(malformed_records)
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;
        debug!(?config, "Resolved contact configuration.");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(text: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn no_file_and_no_flags_gives_defaults() {
        let config = PartialContactConfig::default()
            .merge_with_cli(&ContactsArgs::default())
            .unwrap();
        assert_eq!(config, ContactConfig::default());
    }

    #[test]
    fn file_values_fill_unset_arguments() {
        let file = write_config("radius = 4.0\nmalformed-records = \"skip\"\n");
        let partial = PartialContactConfig::from_file(file.path()).unwrap();
        let config = partial.merge_with_cli(&ContactsArgs::default()).unwrap();
        assert_eq!(config.radius, 4.0);
        assert_eq!(config.malformed_records, MalformedPolicy::Skip);
    }

    #[test]
    fn command_line_overrides_file() {
        let file = write_config("radius = 4.0\nmalformed-records = \"abort\"\n");
        let args = ContactsArgs {
            radius: Some(6.5),
            skip_malformed: true,
            config: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let config = PartialContactConfig::load(&args)
            .unwrap()
            .merge_with_cli(&args)
            .unwrap();
        assert_eq!(config.radius, 6.5);
        assert_eq!(config.malformed_records, MalformedPolicy::Skip);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = write_config("radius = 4.0\ncutoff = 3.0\n");
        let result = PartialContactConfig::from_file(file.path());
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn missing_file_is_reported_with_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        match PartialContactConfig::from_file(&path) {
            Err(CliError::FileParsing { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn non_finite_radius_is_a_config_error() {
        let file = write_config("radius = inf\n");
        let partial = PartialContactConfig::from_file(file.path()).unwrap();
        let result = partial.merge_with_cli(&ContactsArgs::default());
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
