use std::borrow::Cow;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use rayon::prelude::*;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use super::query::{Filter, ScrollQuery};
use crate::errors::FetchError;

/// Above this many rows, filtering runs on the rayon pool.
const PARALLEL_FILTER_THRESHOLD: usize = 10_000;

/// Asynchronous, skip/take-paged row provider.
///
/// `fetch` returns a `'static` future so the host can drive it wherever it
/// likes (a worker thread, an executor, or inline with `block_on` in tests).
pub trait DataSource: Send + Sync + 'static {
    type Row: Clone + Send + 'static;

    /// Number of rows matching `filter` (all rows when `None`).
    fn total_count(&self, filter: Option<&Filter>) -> Result<usize, FetchError>;

    /// Rows selected by `query`, in query order.
    fn fetch(&self, query: &ScrollQuery) -> BoxFuture<'static, Result<Vec<Self::Row>, FetchError>>;
}

/// Text a row is filtered on.
pub trait RowText {
    fn row_text(&self) -> Cow<'_, str>;
}

impl RowText for String {
    fn row_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl RowText for &'static str {
    fn row_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(*self)
    }
}

/// The row shape used by the bundled sources and the terminal demo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRow {
    pub id: u64,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ListRow {
    pub fn new(id: u64, label: impl Into<String>) -> Self {
        ListRow {
            id,
            label: label.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl RowText for ListRow {
    fn row_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.label.as_str())
    }
}

enum Matcher {
    All,
    Contains(String),
    Regex(Regex),
}

impl Matcher {
    fn compile(filter: Option<&Filter>) -> Result<Self, FetchError> {
        match filter {
            None => Ok(Matcher::All),
            Some(Filter::Contains(s)) if s.is_empty() => Ok(Matcher::All),
            Some(Filter::Contains(s)) => Ok(Matcher::Contains(s.to_lowercase())),
            Some(Filter::Regex(p)) => RegexBuilder::new(p)
                .case_insensitive(true)
                .build()
                .map(Matcher::Regex)
                .map_err(|source| FetchError::InvalidPattern {
                    pattern: p.clone(),
                    source,
                }),
        }
    }

    fn matches(&self, text: &str) -> bool {
        match self {
            Matcher::All => true,
            Matcher::Contains(needle) => text.to_lowercase().contains(needle.as_str()),
            Matcher::Regex(re) => re.is_match(text),
        }
    }
}

/// In-memory data source over a shared row vector.
pub struct VecDataSource<R> {
    rows: Arc<Vec<R>>,
}

impl<R> Clone for VecDataSource<R> {
    fn clone(&self) -> Self {
        VecDataSource {
            rows: Arc::clone(&self.rows),
        }
    }
}

impl<R> VecDataSource<R>
where
    R: RowText + Clone + Send + Sync + 'static,
{
    pub fn new(rows: Vec<R>) -> Self {
        VecDataSource {
            rows: Arc::new(rows),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn all(&self) -> &[R] {
        &self.rows
    }

    /// Indices of rows matching `filter`, in source order.
    fn matching_indices(rows: &[R], filter: Option<&Filter>) -> Result<Vec<usize>, FetchError> {
        let matcher = Matcher::compile(filter)?;
        if let Matcher::All = matcher {
            return Ok((0..rows.len()).collect());
        }
        let indices = if rows.len() > PARALLEL_FILTER_THRESHOLD {
            rows.par_iter()
                .enumerate()
                .filter(|(_, r)| matcher.matches(&r.row_text()))
                .map(|(i, _)| i)
                .collect()
        } else {
            rows.iter()
                .enumerate()
                .filter(|(_, r)| matcher.matches(&r.row_text()))
                .map(|(i, _)| i)
                .collect()
        };
        Ok(indices)
    }

    /// Run `query` synchronously.
    pub fn query(&self, query: &ScrollQuery) -> Result<Vec<R>, FetchError> {
        let mut indices = Self::matching_indices(&self.rows, query.filter())?;
        if query.descending() {
            indices.reverse();
        }
        let take = query.take().unwrap_or(usize::MAX);
        Ok(indices
            .into_iter()
            .skip(query.skip())
            .take(take)
            .filter_map(|i| self.rows.get(i).cloned())
            .collect())
    }
}

impl<R> DataSource for VecDataSource<R>
where
    R: RowText + Clone + Send + Sync + 'static,
{
    type Row = R;

    fn total_count(&self, filter: Option<&Filter>) -> Result<usize, FetchError> {
        match filter {
            None => Ok(self.rows.len()),
            Some(f) => Ok(Self::matching_indices(&self.rows, Some(f))?.len()),
        }
    }

    fn fetch(&self, query: &ScrollQuery) -> BoxFuture<'static, Result<Vec<R>, FetchError>> {
        let source = self.clone();
        let query = query.clone();
        async move { source.query(&query) }.boxed()
    }
}
