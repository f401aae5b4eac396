//! Terminal host for the list: event loop, key handling and the fetch worker.

pub mod demo_source;
pub mod event_loop_main;
pub mod fetch_worker;
pub mod handlers;
pub mod host;
pub mod simulate;
pub mod terminal;
#[cfg(feature = "fs-watch")]
pub mod watch_helpers;

pub use demo_source::{generate_rows, DemoSource};
pub use event_loop_main::{run_app, RunOptions};
pub use simulate::{parse_offsets, run_script};
