//! Row providers and the sparse cache of materialized rows.

pub mod cache;
pub mod json;
pub mod query;
pub mod source;
#[cfg(feature = "fs-watch")]
pub mod watcher;

pub use cache::GeneratedDataCache;
pub use json::{write_rows, JsonFileSource};
pub use query::{Filter, QueryFragment, ScrollQuery};
pub use source::{DataSource, ListRow, RowText, VecDataSource};
