use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Scroll direction inferred from consecutive top offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    #[default]
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// How a scroll sample should be interpreted by the tracker.
///
/// `Natural` samples come from the user scrolling and take whichever path the
/// offset delta implies. `Jump` samples come from programmatic moves (Home,
/// End, page jumps) and are always handled by the down path with its
/// threshold bypassed, so the window re-anchors on the visible rows even when
/// the offset decreased. `Edge` samples come from a sentinel entering the
/// viewport and take the path of that edge; the down path bypasses its
/// threshold here too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollIntent {
    #[default]
    Natural,
    Jump,
    Edge(Direction),
}

impl ScrollIntent {
    /// Whether the down path should skip its slide threshold.
    pub fn forces_down(self) -> bool {
        matches!(self, ScrollIntent::Jump | ScrollIntent::Edge(Direction::Down))
    }
}

/// Raw scroll position in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollOffset {
    pub top: f64,
    pub left: f64,
}

impl ScrollOffset {
    pub fn new(top: f64, left: f64) -> Self {
        ScrollOffset { top, left }
    }

    /// Vertical-only offset.
    pub fn top(top: f64) -> Self {
        ScrollOffset { top, left: 0.0 }
    }

    /// Return a copy with negative or non-finite components replaced by zero.
    ///
    /// Hosts occasionally report overscroll (negative) offsets; those are
    /// clamped here rather than rejected.
    pub fn clamped(self) -> Self {
        fn fix(v: f64) -> f64 {
            if v.is_finite() && v > 0.0 {
                v
            } else {
                0.0
            }
        }
        ScrollOffset {
            top: fix(self.top),
            left: fix(self.left),
        }
    }
}

/// A debounced scroll sample handed to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollSample {
    pub offset: ScrollOffset,
    pub intent: ScrollIntent,
}

impl ScrollSample {
    pub fn natural(offset: ScrollOffset) -> Self {
        ScrollSample {
            offset,
            intent: ScrollIntent::Natural,
        }
    }

    pub fn jump(offset: ScrollOffset) -> Self {
        ScrollSample {
            offset,
            intent: ScrollIntent::Jump,
        }
    }
}

/// Geometry and tuning for a virtualized list.
///
/// `quarter_divisor` and `up_lookahead_factor` carry the empirically tuned
/// constants of the windowing heuristic; keep the defaults unless a host has
/// measured a reason to change them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Fixed row height in pixels. Variable-height rows are not supported.
    pub item_height: f64,
    /// Height of the scrolling viewport in pixels.
    pub viewport_height: f64,
    /// Number of indices the live window holds. Should exceed the number of
    /// simultaneously visible rows so the window can read ahead.
    pub window_item_count: usize,
    /// The slide threshold is `window_item_count / quarter_divisor`.
    pub quarter_divisor: usize,
    /// Multiplier on the visible row count used as upward lookahead when the
    /// quarter window is smaller than the viewport.
    pub up_lookahead_factor: f64,
    /// Multi-select consumers tolerate an end overshoot on the up path.
    pub multi_select: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            item_height: 36.0,
            viewport_height: 360.0,
            window_item_count: 30,
            quarter_divisor: 4,
            up_lookahead_factor: 1.25,
            multi_select: false,
        }
    }
}

impl WindowConfig {
    /// Reject configurations the window arithmetic cannot divide by.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.item_height.is_finite() || self.item_height <= 0.0 {
            return Err(ConfigError::ItemHeight(self.item_height));
        }
        if !self.viewport_height.is_finite() || self.viewport_height < 0.0 {
            return Err(ConfigError::ViewportHeight(self.viewport_height));
        }
        if self.window_item_count == 0 {
            return Err(ConfigError::WindowItemCount);
        }
        if self.quarter_divisor == 0 {
            return Err(ConfigError::QuarterDivisor);
        }
        if !self.up_lookahead_factor.is_finite() || self.up_lookahead_factor <= 0.0 {
            return Err(ConfigError::LookaheadFactor(self.up_lookahead_factor));
        }
        Ok(())
    }

    /// Number of rows visible at once (fractional).
    pub fn visible_count(&self) -> f64 {
        self.viewport_height / self.item_height
    }

    /// The slide threshold, `window_item_count / quarter_divisor`.
    pub fn quarter(&self) -> f64 {
        self.window_item_count as f64 / self.quarter_divisor as f64
    }
}

/// The contiguous range of indices currently materialized, plus the
/// bookkeeping the tracker needs to decide the next slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportState {
    pub start_index: usize,
    pub end_index: usize,
    pub current_page_number: usize,
    pub direction: Direction,
    pub previous_start_index: usize,
    pub previous_end_index: usize,
}

impl ViewportState {
    /// The window a freshly initialized widget starts with: `[0, window)`
    /// shrunk to the item count.
    pub fn initial(config: &WindowConfig, total: usize) -> Self {
        let end = config.window_item_count.min(total);
        ViewportState {
            start_index: 0,
            end_index: end,
            current_page_number: usize::from(end > 0),
            direction: Direction::Down,
            previous_start_index: 0,
            previous_end_index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.end_index - self.start_index
    }

    pub fn is_empty(&self) -> bool {
        self.end_index == self.start_index
    }

    pub fn range(&self) -> Range<usize> {
        self.start_index..self.end_index
    }

    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }

    /// Whether `range` shares at least one index with this window.
    pub fn overlaps(&self, range: &Range<usize>) -> bool {
        range.start < self.end_index && self.start_index < range.end
    }

    /// True when both windows cover the same indices.
    pub fn same_window(&self, other: &ViewportState) -> bool {
        self.start_index == other.start_index && self.end_index == other.end_index
    }

    /// Pixels of empty space the host renders above the first materialized row.
    pub fn spacer_before(&self, config: &WindowConfig) -> f64 {
        self.start_index as f64 * config.item_height
    }

    /// Pixels of empty space below the last materialized row.
    pub fn spacer_after(&self, config: &WindowConfig, total: usize) -> f64 {
        total.saturating_sub(self.end_index) as f64 * config.item_height
    }
}

impl fmt::Display for ViewportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}) page {} {}",
            self.start_index, self.end_index, self.current_page_number, self.direction
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_offset_replaces_negative_and_nan() {
        let o = ScrollOffset::new(-12.0, f64::NAN).clamped();
        assert_eq!(o, ScrollOffset::new(0.0, 0.0));
        let o = ScrollOffset::new(40.5, 3.0).clamped();
        assert_eq!(o, ScrollOffset::new(40.5, 3.0));
    }

    #[test]
    fn validate_rejects_zero_sizes() {
        let mut c = WindowConfig::default();
        assert!(c.validate().is_ok());
        c.item_height = 0.0;
        assert!(matches!(c.validate(), Err(ConfigError::ItemHeight(_))));
        c = WindowConfig {
            window_item_count: 0,
            ..WindowConfig::default()
        };
        assert!(matches!(c.validate(), Err(ConfigError::WindowItemCount)));
        c = WindowConfig {
            quarter_divisor: 0,
            ..WindowConfig::default()
        };
        assert!(matches!(c.validate(), Err(ConfigError::QuarterDivisor)));
    }

    #[test]
    fn initial_window_shrinks_to_total() {
        let c = WindowConfig::default();
        let s = ViewportState::initial(&c, 12);
        assert_eq!(s.range(), 0..12);
        let s = ViewportState::initial(&c, 500);
        assert_eq!(s.range(), 0..30);
        assert_eq!(s.current_page_number, 1);
        let s = ViewportState::initial(&c, 0);
        assert!(s.is_empty());
        assert_eq!(s.current_page_number, 0);
    }

    #[test]
    fn spacers_account_for_rows_outside_window() {
        let c = WindowConfig::default();
        let s = ViewportState {
            start_index: 10,
            end_index: 40,
            ..ViewportState::initial(&c, 100)
        };
        assert_eq!(s.spacer_before(&c), 360.0);
        assert_eq!(s.spacer_after(&c, 100), 60.0 * 36.0);
        assert!(s.overlaps(&(35..50)));
        assert!(!s.overlaps(&(40..50)));
    }
}
