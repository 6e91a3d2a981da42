//! Guide engine configuration.

use serde::Deserialize;

/// Tunables for the guide engine. Defaults match production behavior;
/// tests shrink the delays or drive paused time.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GuideConfig {
    /// Wait after scrolling the target into view before rendering.
    pub scroll_settle_ms: u64,
    /// Wait before performing an auto-executed action.
    pub auto_execute_delay_ms: u64,
    /// How long the error notice stays up before skipping forward.
    pub skip_on_failure_delay_ms: u64,
    /// Wait after completion before the session auto-stops.
    pub complete_stop_delay_ms: u64,
    /// Outward padding of the highlight box around the target.
    pub highlight_padding: f64,
    /// Assumed message bubble footprint.
    pub bubble_width: f64,
    pub bubble_height: f64,
    /// Gap between the bubble and the target edge.
    pub bubble_offset: f64,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            scroll_settle_ms: 300,
            auto_execute_delay_ms: 1_500,
            skip_on_failure_delay_ms: 2_000,
            complete_stop_delay_ms: 2_000,
            highlight_padding: 5.0,
            bubble_width: 320.0,
            bubble_height: 100.0,
            bubble_offset: 20.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GuideConfig::default();
        assert_eq!(config.scroll_settle_ms, 300);
        assert_eq!(config.auto_execute_delay_ms, 1_500);
        assert_eq!(config.skip_on_failure_delay_ms, 2_000);
        assert_eq!(config.complete_stop_delay_ms, 2_000);
        assert_eq!(config.highlight_padding, 5.0);
        assert_eq!((config.bubble_width, config.bubble_height), (320.0, 100.0));
    }
}
