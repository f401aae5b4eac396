use std::time::Duration;

use chrono::{NaiveDateTime, TimeDelta};
use futures::future::{BoxFuture, FutureExt};
use rand::Rng;

use crate::data::{DataSource, Filter, JsonFileSource, ListRow, ScrollQuery, VecDataSource};
use crate::errors::FetchError;

/// Rows the demo host can show.
#[derive(Clone)]
pub enum DemoRows {
    Generated(VecDataSource<ListRow>),
    File(JsonFileSource),
}

/// Data source used by the terminal host: generated or file-backed rows
/// behind an optional simulated network delay.
#[derive(Clone)]
pub struct DemoSource {
    rows: DemoRows,
    latency: Duration,
    jitter: Duration,
}

impl DemoSource {
    pub fn generated(rows: Vec<ListRow>) -> Self {
        DemoSource {
            rows: DemoRows::Generated(VecDataSource::new(rows)),
            latency: Duration::ZERO,
            jitter: Duration::ZERO,
        }
    }

    pub fn file(source: JsonFileSource) -> Self {
        DemoSource {
            rows: DemoRows::File(source),
            latency: Duration::ZERO,
            jitter: Duration::ZERO,
        }
    }

    /// Delay every fetch by `latency` plus up to `latency / 2` of random jitter.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self.jitter = latency / 2;
        self
    }

    pub fn rows(&self) -> &DemoRows {
        &self.rows
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    fn delay(&self) -> Duration {
        let jitter_ms = self.jitter.as_millis() as u64;
        if jitter_ms == 0 {
            return self.latency;
        }
        self.latency + Duration::from_millis(rand::rng().random_range(0..=jitter_ms))
    }
}

impl DataSource for DemoSource {
    type Row = ListRow;

    fn total_count(&self, filter: Option<&Filter>) -> Result<usize, FetchError> {
        match &self.rows {
            DemoRows::Generated(rows) => rows.total_count(filter),
            DemoRows::File(file) => file.total_count(filter),
        }
    }

    fn fetch(&self, query: &ScrollQuery) -> BoxFuture<'static, Result<Vec<ListRow>, FetchError>> {
        let fut = match &self.rows {
            DemoRows::Generated(rows) => rows.fetch(query),
            DemoRows::File(file) => file.fetch(query),
        };
        let delay = self.delay();
        if delay.is_zero() {
            return fut;
        }
        // fetches are driven on the worker thread, so blocking here only
        // holds up that thread
        async move {
            std::thread::sleep(delay);
            fut.await
        }
        .boxed()
    }
}

/// `count` rows labelled `Item <n>`, each stamped one minute before the
/// previous one starting at `newest`.
pub fn generate_rows(count: usize, newest: NaiveDateTime) -> Vec<ListRow> {
    (0..count)
        .map(|i| {
            let stamp = newest
                .checked_sub_signed(TimeDelta::minutes(i as i64))
                .unwrap_or(newest);
            ListRow::new(i as u64, format!("Item {i}"))
                .with_detail(stamp.format("%Y-%m-%d %H:%M").to_string())
        })
        .collect()
}
