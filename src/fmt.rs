//! Shared formatting utilities for size display and console output

use console::Emoji;
use std::fmt;

/// Environment variable that turns emoji off (set by `--no-emoji`)
pub const NO_EMOJI_ENV: &str = "NO_EMOJI";

/// Whether emoji should be printed
///
/// Emoji are off when `NO_EMOJI` is set to anything. Otherwise the terminal
/// decides, as for a plain [`console::Emoji`].
pub fn emoji_enabled() -> bool {
    std::env::var_os(NO_EMOJI_ENV).is_none()
}

/// An emoji with a plain-text fallback that honors `NO_EMOJI`
#[derive(Clone, Copy)]
pub struct Glyph(Emoji<'static, 'static>);

impl fmt::Debug for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Glyph").field(&self.0 .0).field(&self.0 .1).finish()
    }
}

impl Glyph {
    /// Create a glyph from an emoji and its fallback
    pub const fn new(emoji: &'static str, fallback: &'static str) -> Self {
        Self(Emoji(emoji, fallback))
    }

    /// Plain-text fallback
    pub fn fallback(&self) -> &'static str {
        self.0 .1
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if emoji_enabled() {
            fmt::Display::fmt(&self.0, f)
        } else {
            f.write_str(self.fallback())
        }
    }
}

/// Checkmark emoji for success
pub const CHECKMARK: Glyph = Glyph::new("✅", "[OK]");

/// Sparkles emoji for completion/success
pub const SPARKLES: Glyph = Glyph::new("✨", "*");

/// Info emoji for informational messages
pub const INFO: Glyph = Glyph::new("ℹ️", "i");

/// Chart emoji for metrics/statistics
pub const CHART: Glyph = Glyph::new("📊", "~");

/// Warning emoji for caution/alerts
pub const WARNING: Glyph = Glyph::new("⚠️", "!");

/// Format bytes as human-readable size string
///
/// # Examples
///
/// ```
/// use asp_tier_sizer::fmt::format_bytes;
///
/// assert_eq!(format_bytes(512), "512 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(536_870_912), "512.00 MB");
/// assert_eq!(format_bytes(34_359_738_368), "32.00 GB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Format an integer with comma thousands separators
///
/// # Examples
///
/// ```
/// use asp_tier_sizer::fmt::format_thousands;
///
/// assert_eq!(format_thousands(0), "0");
/// assert_eq!(format_thousands(999), "999");
/// assert_eq!(format_thousands(300_000_000), "300,000,000");
/// ```
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

/// Format a threshold fraction as a percentage without trailing zeros
///
/// # Examples
///
/// ```
/// use asp_tier_sizer::fmt::format_threshold_percent;
///
/// assert_eq!(format_threshold_percent(0.70), "70");
/// assert_eq!(format_threshold_percent(0.725), "72.5");
/// ```
pub fn format_threshold_percent(threshold: f64) -> String {
    let percent = (threshold * 10_000.0).round() / 100.0;
    let text = format!("{:.2}", percent);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
