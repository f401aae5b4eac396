use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::info;

use crate::app::settings::Settings;
use crate::app::{FetchOutcome, FetchRequest, VirtualList};
use crate::data::ListRow;
use crate::input::{poll, read_event, InputEvent};
use crate::runner::demo_source::DemoSource;
use crate::runner::fetch_worker::FetchWorker;
use crate::runner::handlers::{self, Handled};
use crate::runner::host::Host;
use crate::runner::terminal::{init_terminal, restore_terminal, HostTerminal};
use crate::ui;

/// Longest the loop sleeps waiting for input.
const INPUT_POLL: Duration = Duration::from_millis(50);

/// How the terminal host was started.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub settings: Settings,
    /// JSON file backing the list; reloaded on change with `fs-watch`.
    pub data_file: Option<PathBuf>,
}

pub fn run_app(source: DemoSource, options: RunOptions) -> anyhow::Result<()> {
    let settings = &options.settings;
    let list = VirtualList::new(source, settings.window_config()?, settings.scroll.profile)?
        .with_sentinel_margin(settings.scroll.sentinel_margin);
    let mut host = Host::new(list, settings);
    let worker = FetchWorker::<ListRow>::spawn()?;

    let mut terminal = init_terminal(host.mouse_enabled)?;
    let res = event_loop(&mut terminal, &mut host, &worker, &options);
    restore_terminal(terminal)?;
    info!(renders = host.renders(), "terminal host exited");
    res
}

fn submit(worker: &FetchWorker<ListRow>, host: &mut Host, request: Option<FetchRequest>) {
    if let Some(request) = request {
        if !worker.dispatch(&host.list, request) {
            host.report("fetch worker stopped");
        }
    }
}

/// Feed finished fetches back into the list, chaining follow-ups.
fn drain_fetches(worker: &FetchWorker<ListRow>, host: &mut Host) {
    while let Some(done) = worker.try_recv() {
        match host.list.complete_fetch(&done.request, done.result) {
            Ok(FetchOutcome::Applied {
                follow_up: Some(request),
                ..
            }) => submit(worker, host, Some(request)),
            Ok(_) => {}
            Err(e) => host.report(e),
        }
    }
}

fn event_loop(
    terminal: &mut HostTerminal,
    host: &mut Host,
    worker: &FetchWorker<ListRow>,
    options: &RunOptions,
) -> anyhow::Result<()> {
    let size = terminal.size()?;
    handlers::handle_resize(host, ui::list_body_height(size.height), Instant::now());
    // resizing re-anchors on the current offset; when that leaves the initial
    // window in place the initial fetch still has to go out
    let first = host.list.flush().or_else(|| host.list.start());
    submit(worker, host, first);

    #[cfg(feature = "fs-watch")]
    let watch = options
        .data_file
        .clone()
        .map(crate::runner::watch_helpers::DataFileWatch::start);
    #[cfg(not(feature = "fs-watch"))]
    let _ = &options.data_file;

    loop {
        terminal.draw(|f| ui::ui(f, host))?;

        let now = Instant::now();
        let timeout = host
            .list
            .next_deadline()
            .map(|d| d.saturating_duration_since(now).min(INPUT_POLL))
            .unwrap_or(INPUT_POLL);

        if poll(timeout)? {
            let now = Instant::now();
            match read_event()? {
                InputEvent::Key(key) => match handlers::handle_key(host, key, now)? {
                    Handled::Quit => break,
                    Handled::Continue(request) => submit(worker, host, request),
                },
                InputEvent::Wheel(notches) => handlers::handle_wheel(host, notches, now),
                InputEvent::Resize(_, rows) => {
                    handlers::handle_resize(host, ui::list_body_height(rows), now)
                }
                InputEvent::Other => {}
            }
        }

        let now = Instant::now();
        let request = host.list.poll(now);
        submit(worker, host, request);
        host.list.check_sentinels(now);
        drain_fetches(worker, host);

        #[cfg(feature = "fs-watch")]
        if let Some(watch) = &watch {
            let request = watch.drain(host);
            submit(worker, host, request);
        }
    }
    Ok(())
}
