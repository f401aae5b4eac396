#![cfg(feature = "fs-watch")]

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};

/// Change to a watched data file. The host answers either variant by
/// reopening the source and resetting the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataFileEvent {
    /// The file was created, written or renamed into place.
    Changed(PathBuf),
    /// The file was removed.
    Removed(PathBuf),
    /// Anything else notify reports.
    Other,
}

fn map_notify_event(event: &Event) -> DataFileEvent {
    match event.paths.as_slice() {
        [_, to, ..] => DataFileEvent::Changed(to.clone()),
        [p] => match &event.kind {
            EventKind::Create(_) | EventKind::Modify(_) => DataFileEvent::Changed(p.clone()),
            EventKind::Remove(_) => DataFileEvent::Removed(p.clone()),
            _ => DataFileEvent::Other,
        },
        [] => DataFileEvent::Other,
    }
}

/// Spawn a background thread that watches the data file at `path` and sends
/// mapped events into `tx` until `stop_rx` is signalled or dropped.
/// Errors are logged via `tracing`; the watcher thread has nobody to return
/// them to.
pub fn spawn_watcher(
    path: PathBuf,
    tx: Sender<DataFileEvent>,
    stop_rx: Receiver<()>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        let res: notify::Result<RecommendedWatcher> = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    let ev = map_notify_event(&event);
                    if ev == DataFileEvent::Other {
                        return;
                    }
                    if let Err(e) = tx.send(ev) {
                        tracing::error!("failed to send data file event: {:#?}", e);
                    }
                }
                Err(e) => tracing::error!("data file watcher error: {:#?}", e),
            },
            Config::default(),
        );

        match res {
            Ok(mut watcher) => {
                if let Err(e) = watcher.watch(&path, RecursiveMode::NonRecursive) {
                    tracing::error!("failed to watch {}: {:#?}", path.display(), e);
                    return;
                }
                if stop_rx.recv().is_err() {
                    tracing::debug!("stop signal closed, exiting watcher for {}", path.display());
                }
            }
            Err(e) => tracing::error!("failed to create watcher for {}: {:#?}", path.display(), e),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind, RemoveKind};

    fn make_event(kind: EventKind, paths: Vec<PathBuf>) -> Event {
        Event {
            kind,
            paths,
            attrs: Default::default(),
        }
    }

    #[test]
    fn map_modify_and_create() {
        let ev = make_event(EventKind::Modify(ModifyKind::Any), vec![PathBuf::from("/tmp/rows.json")]);
        assert_eq!(map_notify_event(&ev), DataFileEvent::Changed(PathBuf::from("/tmp/rows.json")));
        let ev = make_event(EventKind::Create(CreateKind::File), vec![PathBuf::from("/tmp/rows.json")]);
        assert_eq!(map_notify_event(&ev), DataFileEvent::Changed(PathBuf::from("/tmp/rows.json")));
    }

    #[test]
    fn map_remove() {
        let ev = make_event(EventKind::Remove(RemoveKind::Any), vec![PathBuf::from("/tmp/rows.json")]);
        assert_eq!(map_notify_event(&ev), DataFileEvent::Removed(PathBuf::from("/tmp/rows.json")));
    }

    #[test]
    fn map_rename_reports_destination() {
        let ev = make_event(
            EventKind::Modify(ModifyKind::Any),
            vec![PathBuf::from("/tmp/rows.json.tmp"), PathBuf::from("/tmp/rows.json")],
        );
        assert_eq!(map_notify_event(&ev), DataFileEvent::Changed(PathBuf::from("/tmp/rows.json")));
    }
}
