//! Virtualized-list windowing: which indices are materialized for a given
//! scroll position, and when that range has to slide.

pub mod debounce;
pub mod sentinel;
pub mod state;
pub mod tracker;

pub use debounce::{DebounceProfile, ScrollDebouncer};
pub use sentinel::{Rect, SentinelDescriptor, Sentinels};
pub use state::{
    Direction, ScrollIntent, ScrollOffset, ScrollSample, ViewportState, WindowConfig,
};
pub use tracker::{clamp_window, ViewportWindowTracker};
