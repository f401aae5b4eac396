use super::state::Direction;

/// Axis-aligned rectangle in pixels, in the same coordinate space as the
/// viewport it is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect { x, y, width, height }
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Predicate over `(boundary row, viewport, margin)`.
pub type SentinelPredicate = fn(&Rect, &Rect, f64) -> bool;

/// The last materialized row is about to scroll into view.
pub fn bottom_entered(boundary: &Rect, viewport: &Rect, margin: f64) -> bool {
    boundary.top() <= viewport.bottom() + margin
}

/// The first materialized row is about to scroll into view.
pub fn top_entered(boundary: &Rect, viewport: &Rect, margin: f64) -> bool {
    boundary.bottom() >= viewport.top() - margin
}

/// Boundary check for one edge of the materialized rows.
#[derive(Debug, Clone, Copy)]
pub struct SentinelDescriptor {
    pub direction: Direction,
    predicate: SentinelPredicate,
    entered: bool,
}

impl SentinelDescriptor {
    pub fn new(direction: Direction, predicate: SentinelPredicate) -> Self {
        SentinelDescriptor {
            direction,
            predicate,
            entered: false,
        }
    }

    /// Re-evaluate the predicate; the `entered` flag only reflects the latest
    /// check.
    pub fn check(&mut self, boundary: &Rect, viewport: &Rect, margin: f64) -> bool {
        self.entered = (self.predicate)(boundary, viewport, margin);
        self.entered
    }

    pub fn entered(&self) -> bool {
        self.entered
    }
}

/// The pair of sentinels guarding both edges of the window.
#[derive(Debug, Clone, Copy)]
pub struct Sentinels {
    pub up: SentinelDescriptor,
    pub down: SentinelDescriptor,
    pub margin: f64,
}

impl Sentinels {
    pub fn new(margin: f64) -> Self {
        Sentinels {
            up: SentinelDescriptor::new(Direction::Up, top_entered),
            down: SentinelDescriptor::new(Direction::Down, bottom_entered),
            margin,
        }
    }

    /// Check both edges. `None` for an edge means there is nothing left to
    /// load on that side. Down wins when both edges are in view.
    pub fn check(
        &mut self,
        top_row: Option<&Rect>,
        bottom_row: Option<&Rect>,
        viewport: &Rect,
    ) -> Option<Direction> {
        let margin = self.margin;
        let up = top_row.is_some_and(|r| self.up.check(r, viewport, margin));
        let down = bottom_row.is_some_and(|r| self.down.check(r, viewport, margin));
        if top_row.is_none() {
            self.up.entered = false;
        }
        if bottom_row.is_none() {
            self.down.entered = false;
        }
        match (up, down) {
            (_, true) => Some(Direction::Down),
            (true, false) => Some(Direction::Up),
            _ => None,
        }
    }
}

impl Default for Sentinels {
    fn default() -> Self {
        Sentinels::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(index: usize) -> Rect {
        Rect::new(0.0, index as f64 * 36.0, 200.0, 36.0)
    }

    #[test]
    fn far_boundaries_do_not_enter() {
        let mut s = Sentinels::new(0.0);
        // viewport shows rows 10..20, window holds 0..30
        let viewport = Rect::new(0.0, 360.0, 200.0, 360.0);
        assert_eq!(s.check(Some(&row(0)), Some(&row(29)), &viewport), None);
        assert!(!s.up.entered());
        assert!(!s.down.entered());
    }

    #[test]
    fn bottom_row_near_viewport_enters() {
        let mut s = Sentinels::new(36.0);
        let viewport = Rect::new(0.0, 720.0, 200.0, 360.0);
        assert_eq!(
            s.check(None, Some(&row(30)), &viewport),
            Some(Direction::Down)
        );
        assert!(s.down.entered());
    }

    #[test]
    fn flag_is_recomputed_each_check() {
        let mut s = Sentinels::new(0.0);
        let near = Rect::new(0.0, 0.0, 200.0, 360.0);
        assert_eq!(s.check(Some(&row(0)), None, &near), Some(Direction::Up));
        let far = Rect::new(0.0, 3600.0, 200.0, 360.0);
        assert_eq!(s.check(Some(&row(0)), None, &far), None);
        assert!(!s.up.entered());
    }
}
