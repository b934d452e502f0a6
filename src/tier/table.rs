//! Tier definitions and the ordered tier table

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Default recommendation threshold (70% of tier capacity)
///
/// Stream Processing reserves 20% of a tier's memory for system overhead and
/// terminates processors that exceed the remaining 80%. The 70% target leaves
/// headroom below that hard limit; only the 70% figure is enforced here.
pub const DEFAULT_THRESHOLD: f64 = 0.70;

/// Errors found while validating a tier table or threshold
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TierTableError {
    /// Table has no tiers
    #[error("tier table is empty")]
    Empty,

    /// Tier with zero capacity
    #[error("tier '{0}' has zero capacity")]
    ZeroCapacity(String),

    /// Tier name appears more than once
    #[error("tier '{0}' is defined more than once")]
    DuplicateName(String),

    /// Tiers are not sorted ascending by capacity
    #[error("tier '{later}' ({later_bytes} bytes) is smaller than preceding tier '{earlier}' ({earlier_bytes} bytes)")]
    NotAscending {
        /// Name of the earlier (larger) tier
        earlier: String,
        /// Capacity of the earlier tier
        earlier_bytes: u64,
        /// Name of the later (smaller) tier
        later: String,
        /// Capacity of the later tier
        later_bytes: u64,
    },

    /// Threshold outside (0, 1]
    #[error("threshold {0} must be greater than 0 and at most 1")]
    ThresholdOutOfRange(f64),
}

/// A memory-capacity class offered for running a stream processor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    /// Tier identifier (e.g. "SP10")
    pub name: String,
    /// Total memory capacity in bytes
    #[serde(rename = "capacity-bytes")]
    pub capacity_bytes: u64,
}

impl Tier {
    /// Create a new tier
    pub fn new(name: impl Into<String>, capacity_bytes: u64) -> Self {
        Self {
            name: name.into(),
            capacity_bytes,
        }
    }

    /// Largest usage (in bytes) that still fits this tier at `threshold`
    pub fn usage_ceiling(&self, threshold: f64) -> f64 {
        self.capacity_bytes as f64 * threshold
    }
}

/// Tier table ordered ascending by capacity
///
/// # Examples
///
/// ```
/// use asp_tier_sizer::tier::TierTable;
///
/// let table = TierTable::default();
/// assert_eq!(table.len(), 5);
/// assert_eq!(table.smallest().map(|t| t.name.as_str()), Some("SP2"));
/// assert_eq!(table.largest().map(|t| t.name.as_str()), Some("SP50"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierTable {
    tiers: Vec<Tier>,
}

impl TierTable {
    /// Build a table, validating ordering and capacities
    pub fn new(tiers: Vec<Tier>) -> Result<Self, TierTableError> {
        let table = Self { tiers };
        table.validate()?;
        Ok(table)
    }

    /// Check the table invariants
    ///
    /// Capacities must be positive and non-decreasing; equal capacities are
    /// allowed and resolve by order. Names must be unique.
    pub fn validate(&self) -> Result<(), TierTableError> {
        if self.tiers.is_empty() {
            return Err(TierTableError::Empty);
        }

        let mut seen = HashSet::with_capacity(self.tiers.len());
        for tier in &self.tiers {
            if tier.capacity_bytes == 0 {
                return Err(TierTableError::ZeroCapacity(tier.name.clone()));
            }
            if !seen.insert(tier.name.as_str()) {
                return Err(TierTableError::DuplicateName(tier.name.clone()));
            }
        }

        for pair in self.tiers.windows(2) {
            if pair[1].capacity_bytes < pair[0].capacity_bytes {
                return Err(TierTableError::NotAscending {
                    earlier: pair[0].name.clone(),
                    earlier_bytes: pair[0].capacity_bytes,
                    later: pair[1].name.clone(),
                    later_bytes: pair[1].capacity_bytes,
                });
            }
        }

        Ok(())
    }

    /// Tiers in ascending capacity order
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// Number of tiers
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Whether the table has no tiers
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Smallest tier
    pub fn smallest(&self) -> Option<&Tier> {
        self.tiers.first()
    }

    /// Largest tier
    pub fn largest(&self) -> Option<&Tier> {
        self.tiers.last()
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self {
            tiers: vec![
                Tier::new("SP2", 536_870_912),
                Tier::new("SP5", 1_073_741_824),
                Tier::new("SP10", 2_147_483_648),
                Tier::new("SP30", 8_589_934_592),
                Tier::new("SP50", 34_359_738_368),
            ],
        }
    }
}

impl<'a> IntoIterator for &'a TierTable {
    type Item = &'a Tier;
    type IntoIter = std::slice::Iter<'a, Tier>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiers.iter()
    }
}

/// Validate a recommendation threshold
///
/// # Examples
///
/// ```
/// use asp_tier_sizer::tier::validate_threshold;
///
/// assert!(validate_threshold(0.7).is_ok());
/// assert!(validate_threshold(1.0).is_ok());
/// assert!(validate_threshold(0.0).is_err());
/// assert!(validate_threshold(1.2).is_err());
/// ```
pub fn validate_threshold(threshold: f64) -> Result<f64, TierTableError> {
    if threshold.is_finite() && threshold > 0.0 && threshold <= 1.0 {
        Ok(threshold)
    } else {
        Err(TierTableError::ThresholdOutOfRange(threshold))
    }
}
