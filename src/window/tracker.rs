//! Window slide computation.
//!
//! Everything in here is a pure function of the previous [`ViewportState`],
//! the scroll sample and the item count. The caller owns the only mutable
//! copy of the state and decides what to do with a new window (fetch,
//! render, reconcile selection).

use tracing::{debug, trace};

use super::state::{Direction, ScrollIntent, ScrollSample, ViewportState, WindowConfig};
use crate::errors::ConfigError;

/// Computes which indices must be materialized for a scroll position.
#[derive(Debug, Clone)]
pub struct ViewportWindowTracker {
    config: WindowConfig,
}

impl ViewportWindowTracker {
    /// Build a tracker; fails fast on configurations that would divide by zero.
    pub fn new(config: WindowConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(ViewportWindowTracker { config })
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Change the viewport height after a host resize.
    pub fn set_viewport_height(&mut self, height: f64) -> Result<(), ConfigError> {
        let mut next = self.config.clone();
        next.viewport_height = height;
        next.validate()?;
        self.config = next;
        Ok(())
    }

    /// Infer the direction of travel from the previous and current top
    /// offsets. An unchanged offset keeps the previous direction.
    pub fn direction_of(
        &self,
        previous: &ViewportState,
        previous_top: f64,
        sample: &ScrollSample,
    ) -> Direction {
        match sample.intent {
            ScrollIntent::Jump => return Direction::Down,
            ScrollIntent::Edge(direction) => return direction,
            ScrollIntent::Natural => {}
        }
        let top = sample.offset.clamped().top;
        if top > previous_top {
            Direction::Down
        } else if top < previous_top {
            Direction::Up
        } else {
            previous.direction
        }
    }

    /// Compute the next window, or `None` when the window does not have to
    /// move (threshold not crossed, or the candidate equals `previous`).
    pub fn compute(
        &self,
        previous: &ViewportState,
        previous_top: f64,
        sample: ScrollSample,
        total: usize,
    ) -> Option<ViewportState> {
        let top = sample.offset.clamped().top;
        let direction = self.direction_of(previous, previous_top, &sample);
        let next = match direction {
            Direction::Down => {
                self.compute_down(previous, top, total, sample.intent.forces_down())
            }
            Direction::Up => self.compute_up(previous, top, total),
        }?;

        if next.same_window(previous) {
            trace!(window = %previous, "window unchanged");
            return None;
        }
        debug!(
            from = %previous,
            to = %next,
            top,
            total,
            "window slid"
        );
        Some(next)
    }

    /// Down path: keep the visible rows inside the window with a quarter
    /// window of context above them. `force` bypasses the slide threshold.
    pub fn compute_down(
        &self,
        previous: &ViewportState,
        top: f64,
        total: usize,
        force: bool,
    ) -> Option<ViewportState> {
        let window = self.config.window_item_count;
        let exact_top = top / self.config.item_height;
        let exact_end = exact_top + self.config.visible_count();
        let quarter = self.config.quarter();

        let has_window = !previous.is_empty();
        let threshold = previous.start_index as f64 + window as f64 / 2.0 + quarter;
        let crossed = exact_end > threshold && previous.end_index < total;
        if has_window && !force && !crossed {
            return None;
        }

        let mut start = (exact_end.round() - quarter.round()).max(0.0);
        // never start below the row currently at the top of the viewport
        start = start.min(exact_top.floor());
        if start + (window as f64) < exact_end {
            start = exact_end.ceil() - window as f64;
        }
        let start = to_index(start);
        let (start, end) = clamp_window(start, start + window as i64, window, total, false);

        Some(ViewportState {
            start_index: start,
            end_index: end,
            current_page_number: end.div_ceil(window),
            direction: Direction::Down,
            previous_start_index: previous.start_index,
            previous_end_index: previous.end_index,
        })
    }

    /// Up path: mirror of the down path, anchored on the top of the window.
    pub fn compute_up(
        &self,
        previous: &ViewportState,
        top: f64,
        total: usize,
    ) -> Option<ViewportState> {
        let window = self.config.window_item_count;
        let exact_top = top / self.config.item_height;
        let visible = self.config.visible_count();
        let quarter = self.config.quarter();

        let load_at = previous.start_index as f64 + quarter;
        if exact_top >= load_at {
            return None;
        }

        let lookahead = if quarter > visible {
            quarter
        } else {
            visible * self.config.up_lookahead_factor
        };
        let end = to_index((exact_top + lookahead).round());
        let (start, end) = clamp_window(
            end - window as i64,
            end,
            window,
            total,
            self.config.multi_select,
        );

        Some(ViewportState {
            start_index: start,
            end_index: end,
            current_page_number: start.div_ceil(window),
            direction: Direction::Up,
            previous_start_index: previous.start_index,
            previous_end_index: previous.end_index,
        })
    }
}

/// Clamp a candidate `[start, end)` to `[0, total]` with at most `window`
/// indices. Shared by both directions.
///
/// A negative start re-anchors the window at `[0, window)`. An end past
/// `total` is pulled back to `total`; unless `keep_start` is set the start
/// follows so the window keeps `window` items when the list has that many.
pub fn clamp_window(
    start: i64,
    end: i64,
    window: usize,
    total: usize,
    keep_start: bool,
) -> (usize, usize) {
    let window = i64::try_from(window).unwrap_or(i64::MAX);
    let total = i64::try_from(total).unwrap_or(i64::MAX);
    let (mut start, mut end) = if start < 0 {
        (0, window)
    } else {
        (start, end)
    };
    if end > total {
        end = total;
        if !keep_start {
            start = (total - window).max(0);
        }
    }
    start = start.clamp(0, end.max(0));
    end = end.max(start).min(start.saturating_add(window));
    (from_index(start), from_index(end))
}

fn to_index(v: f64) -> i64 {
    if v.is_finite() {
        v as i64
    } else {
        0
    }
}

fn from_index(v: i64) -> usize {
    usize::try_from(v).unwrap_or(0)
}
