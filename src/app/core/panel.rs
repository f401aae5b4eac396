use std::collections::BTreeSet;

use crate::window::ViewportState;

/// Focus and selection state for a virtualized list.
///
/// Indices are absolute item indices, so the state survives the window
/// sliding. It stores nothing about rendering and can be unit-tested on its
/// own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Index of the focused (keyboard-active) item, if any.
    active: Option<usize>,
    /// Items marked as selected.
    selected: BTreeSet<usize>,
    /// Whether more than one item may be selected at once.
    multi: bool,
}

impl Selection {
    pub fn new(multi: bool) -> Self {
        Selection {
            active: None,
            selected: BTreeSet::new(),
            multi,
        }
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Focus `index`, clamped to the last item. No-op on an empty list.
    pub fn set_active(&mut self, index: usize, total: usize) {
        self.active = if total == 0 {
            None
        } else {
            Some(index.min(total - 1))
        };
    }

    /// Move focus down by one, clamping at the last entry. An unfocused list
    /// focuses the first item.
    pub fn select_next(&mut self, total: usize) {
        let next = self.active.map_or(0, |a| a.saturating_add(1));
        self.set_active(next, total);
    }

    /// Move focus up by one, clamping at zero.
    pub fn select_prev(&mut self, total: usize) {
        let prev = self.active.map_or(0, |a| a.saturating_sub(1));
        self.set_active(prev, total);
    }

    pub fn page_down(&mut self, page: usize, total: usize) {
        let next = self.active.map_or(0, |a| a.saturating_add(page.max(1)));
        self.set_active(next, total);
    }

    pub fn page_up(&mut self, page: usize, total: usize) {
        let prev = self.active.map_or(0, |a| a.saturating_sub(page.max(1)));
        self.set_active(prev, total);
    }

    /// Toggle the selection mark on `index`. Single-select lists replace the
    /// previous mark.
    pub fn toggle(&mut self, index: usize) {
        if self.selected.remove(&index) {
            return;
        }
        if !self.multi {
            self.selected.clear();
        }
        self.selected.insert(index);
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.selected.iter().copied()
    }

    /// Drop marks past the end of the list and keep focus in bounds.
    pub fn clamp(&mut self, total: usize) {
        self.selected.retain(|i| *i < total);
        if let Some(a) = self.active {
            self.set_active(a, total);
        }
    }

    pub fn clear(&mut self) {
        self.active = None;
        self.selected.clear();
    }

    /// Whether the focused item is materialized in `window`. Hosts use this
    /// to decide if the focus highlight can be painted or must wait for the
    /// next window.
    pub fn reconcile(&self, window: &ViewportState) -> bool {
        self.active.is_some_and(|a| window.contains(a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::WindowConfig;

    #[test]
    fn focus_moves_and_clamps() {
        let mut s = Selection::new(false);
        s.select_next(5);
        assert_eq!(s.active(), Some(0));
        s.page_down(10, 5);
        assert_eq!(s.active(), Some(4));
        s.select_next(5);
        assert_eq!(s.active(), Some(4));
        s.page_up(3, 5);
        assert_eq!(s.active(), Some(1));
        s.select_prev(5);
        s.select_prev(5);
        assert_eq!(s.active(), Some(0));
    }

    #[test]
    fn empty_list_has_no_focus() {
        let mut s = Selection::new(false);
        s.select_next(0);
        assert_eq!(s.active(), None);
    }

    #[test]
    fn single_select_replaces_mark() {
        let mut s = Selection::new(false);
        s.toggle(3);
        s.toggle(7);
        assert_eq!(s.selected().collect::<Vec<_>>(), vec![7]);
        s.toggle(7);
        assert_eq!(s.selected().count(), 0);
    }

    #[test]
    fn multi_select_accumulates_and_clamps() {
        let mut s = Selection::new(true);
        s.toggle(3);
        s.toggle(70);
        s.set_active(70, 100);
        s.clamp(50);
        assert_eq!(s.selected().collect::<Vec<_>>(), vec![3]);
        assert_eq!(s.active(), Some(49));
    }

    #[test]
    fn reconcile_checks_window_membership() {
        let cfg = WindowConfig::default();
        let w = ViewportState::initial(&cfg, 100);
        let mut s = Selection::new(false);
        assert!(!s.reconcile(&w));
        s.set_active(12, 100);
        assert!(s.reconcile(&w));
        s.set_active(30, 100);
        assert!(!s.reconcile(&w));
    }
}
