pub mod app;
pub mod data;
pub mod errors;
pub mod input;
pub mod runner;
pub mod ui;
pub mod window;

pub use crate::app::{FetchOutcome, FetchRequest, Selection, VirtualList};
pub use crate::data::{DataSource, Filter, ListRow, ScrollQuery, VecDataSource};
pub use crate::errors::{ConfigError, FetchError, VirtualListError};
pub use crate::window::{
    DebounceProfile, Direction, ScrollIntent, ScrollOffset, ViewportState, ViewportWindowTracker,
    WindowConfig,
};
