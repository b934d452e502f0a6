//! Tier table and tier recommendation
//!
//! This module provides:
//! - The ordered table of stream processing tiers (SP2 through SP50 by default)
//! - Threshold validation
//! - Smallest-safe-tier selection for an observed memory usage

pub mod recommend;
pub mod table;

pub use recommend::{recommend_tier, round_one_decimal, Recommendation};
pub use table::{validate_threshold, Tier, TierTable, TierTableError, DEFAULT_THRESHOLD};
