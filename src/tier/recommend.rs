//! Smallest-safe-tier selection

use serde::Serialize;

use super::table::{Tier, TierTable};

/// Recommended tier for an observed memory usage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// Name of the recommended tier
    pub tier_name: String,
    /// Capacity of the recommended tier in bytes
    pub tier_capacity_bytes: u64,
    /// Usage as a percentage of tier capacity, rounded to one decimal place
    pub percent_used: f64,
}

impl Recommendation {
    fn for_tier(tier: &Tier, usage_bytes: u64) -> Self {
        Self {
            tier_name: tier.name.clone(),
            tier_capacity_bytes: tier.capacity_bytes,
            percent_used: round_one_decimal(usage_bytes as f64 / tier.capacity_bytes as f64 * 100.0),
        }
    }
}

/// Find the smallest tier whose threshold share of capacity covers `usage_bytes`
///
/// Tiers are scanned in table order and the first one satisfying
/// `usage_bytes <= capacity_bytes * threshold` wins. Returns `None` when the
/// usage exceeds the threshold share of every tier.
///
/// # Examples
///
/// ```
/// use asp_tier_sizer::tier::{recommend_tier, TierTable, DEFAULT_THRESHOLD};
///
/// let tiers = TierTable::default();
///
/// let rec = recommend_tier(300_000_000, &tiers, DEFAULT_THRESHOLD).unwrap();
/// assert_eq!(rec.tier_name, "SP2");
/// assert_eq!(rec.percent_used, 55.9);
///
/// assert!(recommend_tier(30_000_000_000_000, &tiers, DEFAULT_THRESHOLD).is_none());
/// ```
pub fn recommend_tier(usage_bytes: u64, tiers: &TierTable, threshold: f64) -> Option<Recommendation> {
    let usage = usage_bytes as f64;

    tiers
        .tiers()
        .iter()
        // Multiply, never divide: `capacity >= usage / threshold` rounds the
        // other way at exact ceilings (700 / 0.7 is just above 1000.0).
        .find(|tier| usage <= tier.usage_ceiling(threshold))
        .map(|tier| Recommendation::for_tier(tier, usage_bytes))
}

/// Round to one decimal place, halves away from zero
///
/// # Examples
///
/// ```
/// use asp_tier_sizer::tier::round_one_decimal;
///
/// assert_eq!(round_one_decimal(37.25290298), 37.3);
/// assert_eq!(round_one_decimal(12.25), 12.3);
/// assert_eq!(round_one_decimal(0.04), 0.0);
/// ```
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
