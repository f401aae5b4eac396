use super::*;

impl<S: DataSource> VirtualList<S> {
    /// Number of whole rows the viewport shows (at least one).
    pub fn page_size(&self) -> usize {
        let cfg = self.tracker.config();
        ((cfg.viewport_height / cfg.item_height).floor() as usize).max(1)
    }

    /// Scroll the minimum amount that keeps `index` fully on screen.
    fn scroll_into_view(&mut self, index: usize, intent: ScrollIntent, now: Instant) {
        let page = self.page_size();
        let item_height = self.tracker.config().item_height;
        let top_row = (self.scroll_top / item_height).floor() as usize;

        let new_top_row = if index < top_row {
            index
        } else if index >= top_row + page {
            index + 1 - page
        } else if intent == ScrollIntent::Jump {
            top_row
        } else {
            return;
        };
        let top = (new_top_row as f64 * item_height).min(self.max_scroll_top());
        self.on_scroll_with(ScrollOffset::top(top), intent, now);
    }

    fn focus(&mut self, intent: ScrollIntent, now: Instant) {
        if let Some(active) = self.selection.active() {
            self.scroll_into_view(active, intent, now);
        }
    }

    /// Move focus down by one entry.
    pub fn select_next(&mut self, now: Instant) {
        self.selection.select_next(self.total);
        self.focus(ScrollIntent::Natural, now);
    }

    /// Move focus up by one entry.
    pub fn select_prev(&mut self, now: Instant) {
        self.selection.select_prev(self.total);
        self.focus(ScrollIntent::Natural, now);
    }

    /// Move focus down by one viewport.
    pub fn page_down(&mut self, now: Instant) {
        self.selection.page_down(self.page_size(), self.total);
        self.focus(ScrollIntent::Natural, now);
    }

    /// Move focus up by one viewport.
    pub fn page_up(&mut self, now: Instant) {
        self.selection.page_up(self.page_size(), self.total);
        self.focus(ScrollIntent::Natural, now);
    }

    /// Jump to the first entry.
    pub fn select_first(&mut self, now: Instant) {
        self.selection.set_active(0, self.total);
        self.focus(ScrollIntent::Jump, now);
    }

    /// Jump to the last entry.
    pub fn select_last(&mut self, now: Instant) {
        self.selection.set_active(self.total.saturating_sub(1), self.total);
        self.focus(ScrollIntent::Jump, now);
    }

    /// Toggle the selection mark on the focused entry.
    pub fn toggle_active(&mut self) {
        if let Some(active) = self.selection.active() {
            self.selection.toggle(active);
        }
    }

    /// Scroll by `rows` (negative scrolls up), clamped to the list.
    pub fn scroll_rows(&mut self, rows: i64, now: Instant) {
        let item_height = self.tracker.config().item_height;
        let top = (self.scroll_top + rows as f64 * item_height).clamp(0.0, self.max_scroll_top());
        self.on_scroll(ScrollOffset::top(top), now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ListRow, VecDataSource};
    use std::time::Duration;

    fn list(n: u64) -> VirtualList<VecDataSource<ListRow>> {
        let rows = (0..n).map(|i| ListRow::new(i, format!("Item {i}"))).collect();
        VirtualList::new(
            VecDataSource::new(rows),
            WindowConfig::default(),
            DebounceProfile::Standard,
        )
        .unwrap()
    }

    #[test]
    fn focus_below_viewport_scrolls_minimally() {
        let mut l = list(150);
        let now = Instant::now();
        for _ in 0..10 {
            l.select_next(now);
        }
        assert_eq!(l.selection().active(), Some(9));
        assert_eq!(l.scroll_top(), 0.0);
        l.select_next(now);
        assert_eq!(l.selection().active(), Some(10));
        assert_eq!(l.scroll_top(), 36.0);
    }

    #[test]
    fn select_last_jumps_to_end_of_list() {
        let mut l = list(150);
        let first = l.start();
        assert!(first.is_some());
        let now = Instant::now();
        l.select_last(now);
        assert_eq!(l.selection().active(), Some(149));
        assert_eq!(l.scroll_top(), 140.0 * 36.0);
        let req = l.flush().unwrap();
        assert_eq!(l.state().range(), 120..150);
        assert_eq!(req.range, 120..150);

        l.select_first(now);
        assert_eq!(l.scroll_top(), 0.0);
        l.flush();
        assert_eq!(l.state().range(), 0..30);
    }

    #[test]
    fn rapid_keydown_collapses_to_one_recompute() {
        let mut l = list(150);
        assert!(l.start().is_some());
        let t0 = Instant::now();
        let mut fetches = 0;
        for i in 0..30u64 {
            let now = t0 + Duration::from_millis(i * 3);
            l.select_next(now);
            if l.poll(now).is_some() {
                fetches += 1;
            }
        }
        if l.poll(t0 + Duration::from_millis(250)).is_some() {
            fetches += 1;
        }
        assert!(fetches <= 2, "{fetches} fetches for 30 key presses");
        assert_eq!(l.selection().active(), Some(29));
        assert!(l.state().contains(29));
    }

    #[test]
    fn wheel_scroll_clamps_to_list() {
        let mut l = list(20);
        let now = Instant::now();
        l.scroll_rows(-3, now);
        assert_eq!(l.scroll_top(), 0.0);
        l.scroll_rows(500, now);
        assert_eq!(l.scroll_top(), 10.0 * 36.0);
    }

    #[test]
    fn toggle_marks_focused_row() {
        let mut l = list(5);
        let now = Instant::now();
        l.select_next(now);
        l.select_next(now);
        l.toggle_active();
        assert!(l.selection().is_selected(1));
    }
}
