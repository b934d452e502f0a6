//! Memory usage values as reported by processor statistics
//!
//! `memoryUsageBytes` arrives either as a plain JSON number or, for values
//! the shell keeps as 64-bit integers, as an Extended JSON wrapper
//! `{"$numberLong": "<digits>"}`. Both are normalized to `u64` bytes here
//! before any sizing arithmetic happens.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw memory usage in one of its source representations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MemoryUsage {
    /// 64-bit integer wrapper (`{"$numberLong": "123"}`)
    Int64 {
        /// Decimal digits of the wrapped integer
        #[serde(rename = "$numberLong")]
        number_long: String,
    },
    /// Native JSON number
    Native(f64),
}

impl MemoryUsage {
    /// Decode a raw JSON value, returning `None` for unsupported shapes
    ///
    /// # Examples
    ///
    /// ```
    /// use asp_tier_sizer::source::MemoryUsage;
    /// use serde_json::json;
    ///
    /// assert_eq!(MemoryUsage::from_value(&json!(1024)), Some(MemoryUsage::Native(1024.0)));
    /// assert!(MemoryUsage::from_value(&json!({"$numberLong": "1024"})).is_some());
    /// assert!(MemoryUsage::from_value(&json!("1024")).is_none());
    /// ```
    pub fn from_value(value: &Value) -> Option<Self> {
        Self::deserialize(value).ok()
    }

    /// Normalize to a byte count
    ///
    /// Returns `None` for negative, non-finite, or unparseable values.
    /// Fractional native numbers are rounded to the nearest byte.
    ///
    /// # Examples
    ///
    /// ```
    /// use asp_tier_sizer::source::MemoryUsage;
    ///
    /// let wrapped = MemoryUsage::Int64 { number_long: "300000000".to_string() };
    /// assert_eq!(wrapped.to_bytes(), Some(300_000_000));
    /// assert_eq!(MemoryUsage::Native(-1.0).to_bytes(), None);
    /// ```
    pub fn to_bytes(&self) -> Option<u64> {
        match self {
            Self::Native(value) => {
                if value.is_finite() && *value >= 0.0 && *value <= u64::MAX as f64 {
                    Some(value.round() as u64)
                } else {
                    None
                }
            }
            Self::Int64 { number_long } => {
                let parsed: i64 = number_long.trim().parse().ok()?;
                u64::try_from(parsed).ok()
            }
        }
    }
}
