//! Merge config file values with command-line overrides

use super::file::ConfigFile;
use crate::error::TierSizerError;
use crate::source::mongosh::DEFAULT_MONGOSH_BINARY;
use crate::tier::{validate_threshold, TierTable};

/// Effective settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Recommendation threshold in (0, 1]
    pub threshold: f64,
    /// Tier table, ascending by capacity
    pub tiers: TierTable,
    /// mongosh binary
    pub mongosh_binary: String,
    /// Connection string, if any
    pub uri: Option<String>,
}

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// `--threshold`
    pub threshold: Option<f64>,
    /// `--uri`
    pub uri: Option<String>,
}

/// Resolves effective settings
pub struct SettingsResolver;

impl SettingsResolver {
    /// Resolve settings, with overrides winning over file values
    ///
    /// # Examples
    ///
    /// ```
    /// use asp_tier_sizer::config::{ConfigFile, Overrides, SettingsResolver};
    ///
    /// let overrides = Overrides { threshold: Some(0.5), uri: None };
    /// let settings = SettingsResolver::resolve(&ConfigFile::default(), &overrides)?;
    /// assert_eq!(settings.threshold, 0.5);
    /// assert_eq!(settings.mongosh_binary, "mongosh");
    /// # Ok::<(), asp_tier_sizer::error::TierSizerError>(())
    /// ```
    pub fn resolve(config: &ConfigFile, overrides: &Overrides) -> Result<Settings, TierSizerError> {
        let threshold = match overrides.threshold {
            Some(value) => {
                validate_threshold(value).map_err(|_| TierSizerError::InvalidThreshold { value })?
            }
            None => config.threshold,
        };

        let tiers = config
            .tier_table()
            .map_err(|source| TierSizerError::InvalidConfig {
                path: super::CONFIG_FILE_NAME.into(),
                source,
            })?;

        let mongosh = config.mongosh.clone().unwrap_or_default();

        Ok(Settings {
            threshold,
            tiers,
            mongosh_binary: mongosh
                .binary
                .unwrap_or_else(|| DEFAULT_MONGOSH_BINARY.to_string()),
            uri: overrides.uri.clone().or(mongosh.uri),
        })
    }
}
