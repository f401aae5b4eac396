use std::ops::Range;
use std::time::Instant;

use tracing::{debug, trace, warn};

use self::panel::Selection;
use crate::data::{DataSource, Filter, GeneratedDataCache, ScrollQuery};
use crate::errors::{FetchError, VirtualListError};
use crate::window::{
    DebounceProfile, Rect, ScrollDebouncer, ScrollIntent, ScrollOffset, ScrollSample,
    Sentinels, ViewportState, ViewportWindowTracker, WindowConfig,
};

pub mod panel;
mod navigation;

/// A fetch the host must run against the data source and hand back through
/// [`VirtualList::complete_fetch`].
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    /// Reset generation the request belongs to.
    pub generation: u64,
    /// The window that was current when the request was issued.
    pub window: Range<usize>,
    /// Indices to fetch.
    pub range: Range<usize>,
    /// Query for exactly `range`.
    pub query: ScrollQuery,
}

/// What [`VirtualList::complete_fetch`] did with a fetch result.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Rows were cached. `rendered` is true when window listeners fired.
    /// `follow_up` carries a fetch for indices the window still lacks.
    Applied {
        rows: usize,
        rendered: bool,
        follow_up: Option<FetchRequest>,
    },
    /// The result belonged to a reset generation or to a window the user
    /// has scrolled past; it was dropped.
    Stale,
}

type WindowListener = Box<dyn FnMut(&ViewportState)>;

/// A virtualized list over a [`DataSource`].
///
/// The host feeds scroll offsets and keyboard moves in, polls for debounced
/// recomputation, runs the returned [`FetchRequest`]s however it likes and
/// hands results back. The list keeps the only mutable copy of the window
/// state.
pub struct VirtualList<S: DataSource> {
    source: S,
    tracker: ViewportWindowTracker,
    state: ViewportState,
    /// Top offset of the last sample the tracker saw.
    applied_top: f64,
    /// Most recent raw top offset, applied or not.
    scroll_top: f64,
    total: usize,
    cache: GeneratedDataCache<S::Row>,
    debouncer: ScrollDebouncer,
    sentinels: Sentinels,
    selection: Selection,
    base_query: ScrollQuery,
    generation: u64,
    pending: Vec<(u64, Range<usize>)>,
    listeners: Vec<WindowListener>,
}

impl<S: DataSource> VirtualList<S> {
    /// Build a list over `source`. Fails fast on an invalid `config`.
    pub fn new(
        source: S,
        config: WindowConfig,
        profile: DebounceProfile,
    ) -> Result<Self, VirtualListError> {
        let tracker = ViewportWindowTracker::new(config)?;
        let total = source.total_count(None).map_err(VirtualListError::Count)?;
        let state = ViewportState::initial(tracker.config(), total);
        let selection = Selection::new(tracker.config().multi_select);
        Ok(VirtualList {
            source,
            tracker,
            state,
            applied_top: 0.0,
            scroll_top: 0.0,
            total,
            cache: GeneratedDataCache::new(),
            debouncer: ScrollDebouncer::from_profile(profile),
            sentinels: Sentinels::default(),
            selection,
            base_query: ScrollQuery::new(),
            generation: 0,
            pending: Vec::new(),
            listeners: Vec::new(),
        })
    }

    /// Margin in pixels within which a sentinel counts as entered.
    pub fn with_sentinel_margin(mut self, margin: f64) -> Self {
        self.sentinels = Sentinels::new(margin);
        self
    }

    /// Issue the fetch for the initial window (or render it right away when
    /// there is nothing to fetch).
    pub fn start(&mut self) -> Option<FetchRequest> {
        self.request_window()
    }

    /// Register a listener fired whenever the rows of a new window are
    /// available.
    pub fn on_window_changed(&mut self, listener: impl FnMut(&ViewportState) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Record a user scroll. Recomputation happens on the next
    /// [`poll`](Self::poll) after the debounce interval.
    pub fn on_scroll(&mut self, offset: ScrollOffset, now: Instant) {
        self.on_scroll_with(offset, ScrollIntent::Natural, now);
    }

    pub fn on_scroll_with(&mut self, offset: ScrollOffset, intent: ScrollIntent, now: Instant) {
        let offset = offset.clamped();
        self.scroll_top = offset.top;
        self.debouncer.record(ScrollSample { offset, intent }, now);
    }

    /// Run the debounced recomputation if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<FetchRequest> {
        let sample = self.debouncer.poll(now)?;
        self.apply_sample(sample)
    }

    /// Run any pending recomputation immediately.
    pub fn flush(&mut self) -> Option<FetchRequest> {
        let sample = self.debouncer.flush()?;
        self.apply_sample(sample)
    }

    /// When the pending recomputation is due, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    fn apply_sample(&mut self, sample: ScrollSample) -> Option<FetchRequest> {
        let next = self
            .tracker
            .compute(&self.state, self.applied_top, sample, self.total);
        self.applied_top = sample.offset.top;
        self.commit(next?)
    }

    fn commit(&mut self, next: ViewportState) -> Option<FetchRequest> {
        self.state = next;
        if self.selection.active().is_some() && !self.selection.reconcile(&next) {
            debug!(active = ?self.selection.active(), window = %next, "focused row outside window");
        }
        self.request_window()
    }

    /// Fetch what the current window lacks, or render it when fully cached.
    fn request_window(&mut self) -> Option<FetchRequest> {
        let Some(range) = self.cache.missing_in(self.state.range()) else {
            self.notify();
            return None;
        };
        let request = FetchRequest {
            generation: self.generation,
            window: self.state.range(),
            query: self.base_query.for_range(range.clone()),
            range,
        };
        debug!(
            generation = request.generation,
            range = ?request.range,
            window = %self.state,
            "fetch requested"
        );
        self.pending.push((request.generation, request.range.clone()));
        Some(request)
    }

    fn notify(&mut self) {
        let state = self.state;
        for listener in &mut self.listeners {
            listener(&state);
        }
    }

    /// Apply the result of a fetch issued by this list.
    ///
    /// Results for an older generation or for a window the user has since
    /// scrolled past are dropped, failed or not. A failed fetch for the
    /// current window is returned to the host; the window itself stays where
    /// scroll geometry put it.
    pub fn complete_fetch(
        &mut self,
        request: &FetchRequest,
        result: Result<Vec<S::Row>, FetchError>,
    ) -> Result<FetchOutcome, VirtualListError> {
        self.pending
            .retain(|(g, r)| !(*g == request.generation && *r == request.range));

        if request.generation != self.generation {
            debug!(
                generation = request.generation,
                current = self.generation,
                "dropping fetch from before reset"
            );
            return Ok(FetchOutcome::Stale);
        }

        if !self.state.overlaps(&request.range) {
            debug!(
                range = ?request.range,
                window = %self.state,
                failed = result.is_err(),
                "dropping fetch for a window scrolled past"
            );
            return Ok(FetchOutcome::Stale);
        }

        let mut rows = match result {
            Ok(rows) => rows,
            Err(source) => {
                warn!(range = ?request.range, error = %source, "fetch failed");
                return Err(VirtualListError::Fetch {
                    start: request.range.start,
                    end: request.range.end,
                    source,
                });
            }
        };

        rows.truncate(request.range.len());
        let inserted = self.cache.insert_batch(request.range.start, rows);

        match self.cache.missing_in(self.state.range()) {
            None => {
                self.notify();
                Ok(FetchOutcome::Applied {
                    rows: inserted,
                    rendered: true,
                    follow_up: None,
                })
            }
            Some(missing) if ranges_overlap(&missing, &request.range) => {
                // the source returned fewer rows than asked for; render what exists
                warn!(
                    requested = ?request.range,
                    returned = inserted,
                    "short read from data source"
                );
                self.notify();
                Ok(FetchOutcome::Applied {
                    rows: inserted,
                    rendered: true,
                    follow_up: None,
                })
            }
            Some(missing) => {
                let in_flight = self
                    .pending
                    .iter()
                    .any(|(g, r)| *g == self.generation && ranges_overlap(r, &missing));
                let follow_up = if in_flight {
                    None
                } else {
                    self.request_window()
                };
                Ok(FetchOutcome::Applied {
                    rows: inserted,
                    rendered: false,
                    follow_up,
                })
            }
        }
    }

    /// Invalidate the cache and restart from the top of the list.
    ///
    /// Fetches still in flight belong to the previous generation and will be
    /// dropped when they complete.
    pub fn reset(&mut self) -> Result<Option<FetchRequest>, VirtualListError> {
        let total = self
            .source
            .total_count(self.base_query.filter())
            .map_err(VirtualListError::Count)?;
        self.generation += 1;
        self.total = total;
        self.cache.clear();
        self.pending.clear();
        self.debouncer.cancel();
        self.applied_top = 0.0;
        self.scroll_top = 0.0;
        self.state = ViewportState::initial(self.tracker.config(), total);
        self.selection.clamp(total);
        debug!(generation = self.generation, total, "list reset");
        Ok(self.request_window())
    }

    /// Replace the filter and reset.
    pub fn set_filter(
        &mut self,
        filter: Option<Filter>,
    ) -> Result<Option<FetchRequest>, VirtualListError> {
        let mut query = ScrollQuery::new();
        if let Some(f) = filter {
            query = query.with_filter(f);
        }
        if self.base_query.descending() {
            query = query.sorted(true);
        }
        let previous = std::mem::replace(&mut self.base_query, query);
        match self.reset() {
            Ok(request) => {
                self.selection.clear();
                Ok(request)
            }
            Err(e) => {
                // an unusable filter must not replace a working one
                self.base_query = previous;
                Err(e)
            }
        }
    }

    /// Change the sort order and reset.
    pub fn set_descending(
        &mut self,
        descending: bool,
    ) -> Result<Option<FetchRequest>, VirtualListError> {
        self.base_query = self.base_query.clone().sorted(descending);
        self.reset()
    }

    /// Swap in a new data source and reset.
    pub fn set_source(&mut self, source: S) -> Result<Option<FetchRequest>, VirtualListError> {
        self.source = source;
        self.reset()
    }

    /// Follow a host resize. The window is re-anchored on the next poll.
    pub fn set_viewport_height(&mut self, height: f64, now: Instant) -> Result<(), VirtualListError> {
        if (height - self.tracker.config().viewport_height).abs() < f64::EPSILON {
            return Ok(());
        }
        self.tracker.set_viewport_height(height)?;
        self.on_scroll_with(ScrollOffset::top(self.scroll_top), ScrollIntent::Jump, now);
        Ok(())
    }

    /// Check the sentinels against host-supplied geometry.
    ///
    /// An entered sentinel records an `Edge` sample at the viewport's top
    /// offset; the window moves on the next [`poll`](Self::poll) like any
    /// other scroll. Nothing is recorded while a sample is already pending,
    /// or for a sentinel against the last direction of travel. Returns
    /// whether a sample was recorded.
    pub fn check_sentinels_with(
        &mut self,
        top_row: Option<&Rect>,
        bottom_row: Option<&Rect>,
        viewport: &Rect,
        now: Instant,
    ) -> bool {
        if self.debouncer.is_pending() {
            return false;
        }
        let Some(direction) = self.sentinels.check(top_row, bottom_row, viewport) else {
            return false;
        };
        // the rows behind the last slide are in view by construction
        if direction != self.state.direction {
            return false;
        }
        let top = viewport.top().max(0.0);
        trace!(%direction, top, window = %self.state, "sentinel entered");
        self.on_scroll_with(ScrollOffset::top(top), ScrollIntent::Edge(direction), now);
        true
    }

    /// Check the sentinels using the list's own uniform-row geometry.
    pub fn check_sentinels(&mut self, now: Instant) -> bool {
        let cfg = self.tracker.config();
        let row = |i: usize| Rect::new(0.0, i as f64 * cfg.item_height, 0.0, cfg.item_height);
        let top_row = (self.state.start_index > 0).then(|| row(self.state.start_index));
        let bottom_row = (self.state.end_index < self.total && !self.state.is_empty())
            .then(|| row(self.state.end_index - 1));
        let viewport = Rect::new(0.0, self.scroll_top, 0.0, cfg.viewport_height);
        self.check_sentinels_with(top_row.as_ref(), bottom_row.as_ref(), &viewport, now)
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    pub fn config(&self) -> &WindowConfig {
        self.tracker.config()
    }

    pub fn total_count(&self) -> usize {
        self.total
    }

    pub fn cache(&self) -> &GeneratedDataCache<S::Row> {
        &self.cache
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn query(&self) -> &ScrollQuery {
        &self.base_query
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    pub fn is_fetch_pending(&self) -> bool {
        self.pending.iter().any(|(g, _)| *g == self.generation)
    }

    /// Cached rows of the current window, in index order.
    pub fn visible_rows(&self) -> Vec<(usize, &S::Row)> {
        self.cache.rows_in(self.state.range()).collect()
    }

    /// Indices on screen at the latest scroll offset.
    pub fn viewport_range(&self) -> Range<usize> {
        let cfg = self.tracker.config();
        let first = (self.scroll_top / cfg.item_height).floor() as usize;
        let last = ((self.scroll_top + cfg.viewport_height) / cfg.item_height).ceil() as usize;
        first.min(self.total)..last.min(self.total)
    }

    /// Largest top offset that still fills the viewport.
    pub fn max_scroll_top(&self) -> f64 {
        let cfg = self.tracker.config();
        (self.total as f64 * cfg.item_height - cfg.viewport_height).max(0.0)
    }
}

fn ranges_overlap(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}
