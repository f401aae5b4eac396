use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::state::{ScrollIntent, ScrollSample};

/// Coalescing interval presets. Engines that fire scroll events more often
/// get the longer interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebounceProfile {
    /// 200 ms.
    Gecko,
    /// 100 ms.
    #[default]
    Standard,
    /// Explicit interval in milliseconds.
    Custom(u64),
}

impl DebounceProfile {
    pub fn interval(&self) -> Duration {
        match self {
            DebounceProfile::Gecko => Duration::from_millis(200),
            DebounceProfile::Standard => Duration::from_millis(100),
            DebounceProfile::Custom(ms) => Duration::from_millis(*ms),
        }
    }
}

/// Single pending-timer scheduler for scroll samples.
///
/// The first sample after an idle period arms a deadline `interval` in the
/// future; later samples only replace the stored sample. When the deadline
/// passes, [`poll`](Self::poll) hands out the most recent sample exactly once.
/// A continuous stream of events therefore recomputes at most once per
/// interval and always with the newest offset.
#[derive(Debug, Clone)]
pub struct ScrollDebouncer {
    interval: Duration,
    deadline: Option<Instant>,
    latest: Option<ScrollSample>,
}

impl ScrollDebouncer {
    pub fn new(interval: Duration) -> Self {
        ScrollDebouncer {
            interval,
            deadline: None,
            latest: None,
        }
    }

    pub fn from_profile(profile: DebounceProfile) -> Self {
        Self::new(profile.interval())
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Store `sample` as the latest one and arm the timer if idle.
    ///
    /// A pending `Jump` intent survives later natural samples in the same
    /// interval so a programmatic jump is not lost to a trailing wheel event.
    pub fn record(&mut self, sample: ScrollSample, now: Instant) {
        let intent = match self.latest {
            Some(prev) if prev.intent == ScrollIntent::Jump => ScrollIntent::Jump,
            _ => sample.intent,
        };
        self.latest = Some(ScrollSample {
            offset: sample.offset,
            intent,
        });
        if self.deadline.is_none() {
            let deadline = now + self.interval;
            trace!(?deadline, "debounce armed");
            self.deadline = Some(deadline);
        }
    }

    /// Fire if the deadline has passed, yielding the most recent sample.
    pub fn poll(&mut self, now: Instant) -> Option<ScrollSample> {
        match self.deadline {
            Some(deadline) if now >= deadline => self.flush(),
            _ => None,
        }
    }

    /// Fire immediately regardless of the deadline.
    pub fn flush(&mut self) -> Option<ScrollSample> {
        self.deadline = None;
        let sample = self.latest.take();
        if sample.is_some() {
            trace!("debounce fired");
        }
        sample
    }

    /// Drop the pending sample without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
        self.latest = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}
