// Reload the JSON data file when it changes on disk.
// Feature-gated so the crate does not need notify without `fs-watch`.
#![cfg(feature = "fs-watch")]

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;

use tracing::info;

use crate::app::FetchRequest;
use crate::data::watcher::{spawn_watcher, DataFileEvent};
use crate::data::JsonFileSource;
use crate::runner::demo_source::DemoSource;
use crate::runner::host::Host;

/// Whether `evt` concerns the watched file at `path`.
///
/// notify may report the path in a different form than it was registered
/// with, so only the file name is compared.
pub(crate) fn is_change_to(evt: &DataFileEvent, path: &Path) -> bool {
    match evt {
        DataFileEvent::Changed(p) => p.file_name() == path.file_name(),
        DataFileEvent::Removed(_) | DataFileEvent::Other => false,
    }
}

pub struct DataFileWatch {
    path: PathBuf,
    events: Receiver<DataFileEvent>,
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl DataFileWatch {
    pub fn start(path: PathBuf) -> Self {
        let (tx, events) = mpsc::channel();
        let (stop, stop_rx) = mpsc::channel();
        let handle = spawn_watcher(path.clone(), tx, stop_rx);
        DataFileWatch {
            path,
            events,
            stop: Some(stop),
            handle: Some(handle),
        }
    }

    /// Apply pending file events to `host`. Several writes in a row reload
    /// only once.
    pub fn drain(&self, host: &mut Host) -> Option<FetchRequest> {
        let mut reload = false;
        for evt in self.events.try_iter() {
            if let DataFileEvent::Removed(p) = &evt {
                host.report(format!("data file {} removed", p.display()));
            }
            reload |= is_change_to(&evt, &self.path);
        }
        if !reload {
            return None;
        }
        let source = match JsonFileSource::open(&self.path) {
            Ok(source) => source,
            Err(e) => {
                // editors often write in several steps; the next event retries
                host.report(e);
                return None;
            }
        };
        info!(path = %self.path.display(), rows = source.len(), "data file reloaded");
        let latency = host.list.source().latency();
        match host.list.set_source(DemoSource::file(source).with_latency(latency)) {
            Ok(request) => {
                host.status = None;
                request
            }
            Err(e) => {
                host.report(e);
                None
            }
        }
    }
}

impl Drop for DataFileWatch {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(all(test, feature = "fs-watch"))]
mod tests {
    use super::*;

    #[test]
    fn only_changes_to_the_watched_file_reload() {
        let path = Path::new("/tmp/data/rows.json");
        let ev = DataFileEvent::Changed(PathBuf::from("/private/tmp/data/rows.json"));
        assert!(is_change_to(&ev, path));
        let other = DataFileEvent::Changed(PathBuf::from("/tmp/data/other.json"));
        assert!(!is_change_to(&other, path));
        assert!(!is_change_to(&DataFileEvent::Removed(path.to_path_buf()), path));
    }
}
