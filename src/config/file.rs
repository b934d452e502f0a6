//! Configuration file data structures

use serde::{Deserialize, Serialize};

use crate::source::mongosh::DEFAULT_MONGOSH_BINARY;
use crate::tier::{validate_threshold, Tier, TierTable, TierTableError, DEFAULT_THRESHOLD};

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = ".asp-tier-sizer.toml";

/// asp-tier-sizer configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Fraction of tier capacity usage should stay at or below
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// mongosh connection settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mongosh: Option<MongoshSettings>,

    /// Custom tier table (replaces the built-in SP tiers when set)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiers: Option<Vec<Tier>>,
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

/// mongosh settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MongoshSettings {
    /// Shell binary name or path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binary: Option<String>,

    /// Connection string of the stream processing instance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

impl ConfigFile {
    /// Config pre-filled with the built-in tiers, used by `init`
    pub fn starter() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            mongosh: Some(MongoshSettings {
                binary: Some(DEFAULT_MONGOSH_BINARY.to_string()),
                uri: None,
            }),
            tiers: Some(TierTable::default().tiers().to_vec()),
        }
    }

    /// Validate threshold range and tier ordering
    pub fn validate(&self) -> Result<(), TierTableError> {
        validate_threshold(self.threshold)?;
        if let Some(tiers) = &self.tiers {
            TierTable::new(tiers.clone())?;
        }
        Ok(())
    }

    /// Tier table from the file, or the built-in table when unset
    pub fn tier_table(&self) -> Result<TierTable, TierTableError> {
        match &self.tiers {
            Some(tiers) => TierTable::new(tiers.clone()),
            None => Ok(TierTable::default()),
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            mongosh: None,
            tiers: None,
        }
    }
}
