pub mod core;
pub mod settings;

pub use core::panel::Selection;
pub use core::{FetchOutcome, FetchRequest, VirtualList};
