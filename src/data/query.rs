use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Row filter carried by a [`ScrollQuery`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// Case-insensitive substring match.
    Contains(String),
    /// Regular expression match (`regex` syntax).
    Regex(String),
}

/// One composable piece of a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryFragment {
    Filter(Filter),
    SortBy { descending: bool },
    Skip(usize),
    Take(usize),
}

impl QueryFragment {
    fn is_paging(&self) -> bool {
        matches!(self, QueryFragment::Skip(_) | QueryFragment::Take(_))
    }
}

/// A skip/take style query derived from the current window.
///
/// Queries are rebuilt each time the window moves. [`paged`](Self::paged)
/// strips every existing `Skip`/`Take` before appending the new pair, so a
/// query never carries paging left over from an earlier window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollQuery {
    fragments: Vec<QueryFragment>,
}

impl ScrollQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any filter with `filter`.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.fragments
            .retain(|f| !matches!(f, QueryFragment::Filter(_)));
        self.fragments.insert(0, QueryFragment::Filter(filter));
        self
    }

    pub fn sorted(mut self, descending: bool) -> Self {
        self.fragments
            .retain(|f| !matches!(f, QueryFragment::SortBy { .. }));
        self.fragments.push(QueryFragment::SortBy { descending });
        self
    }

    /// Copy of this query with every paging fragment removed.
    pub fn without_paging(&self) -> Self {
        ScrollQuery {
            fragments: self
                .fragments
                .iter()
                .filter(|f| !f.is_paging())
                .cloned()
                .collect(),
        }
    }

    /// Copy of this query paged to `skip`/`take`.
    pub fn paged(&self, skip: usize, take: usize) -> Self {
        let mut q = self.without_paging();
        q.fragments.push(QueryFragment::Skip(skip));
        q.fragments.push(QueryFragment::Take(take));
        q
    }

    /// Query for exactly the indices in `range`.
    pub fn for_range(&self, range: Range<usize>) -> Self {
        self.paged(range.start, range.len())
    }

    pub fn fragments(&self) -> &[QueryFragment] {
        &self.fragments
    }

    pub fn filter(&self) -> Option<&Filter> {
        self.fragments.iter().find_map(|f| match f {
            QueryFragment::Filter(filter) => Some(filter),
            _ => None,
        })
    }

    pub fn descending(&self) -> bool {
        self.fragments
            .iter()
            .any(|f| matches!(f, QueryFragment::SortBy { descending: true }))
    }

    pub fn skip(&self) -> usize {
        self.fragments
            .iter()
            .find_map(|f| match f {
                QueryFragment::Skip(n) => Some(*n),
                _ => None,
            })
            .unwrap_or(0)
    }

    pub fn take(&self) -> Option<usize> {
        self.fragments.iter().find_map(|f| match f {
            QueryFragment::Take(n) => Some(*n),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paging_replaces_stale_skip_take() {
        let q = ScrollQuery::new()
            .with_filter(Filter::Contains("ab".into()))
            .paged(0, 30)
            .paged(29, 30);
        let paging: Vec<_> = q
            .fragments()
            .iter()
            .filter(|f| matches!(f, QueryFragment::Skip(_) | QueryFragment::Take(_)))
            .collect();
        assert_eq!(paging.len(), 2);
        assert_eq!(q.skip(), 29);
        assert_eq!(q.take(), Some(30));
        assert_eq!(q.filter(), Some(&Filter::Contains("ab".into())));
    }

    #[test]
    fn without_paging_keeps_other_fragments() {
        let q = ScrollQuery::new().sorted(true).for_range(10..25);
        assert_eq!(q.take(), Some(15));
        let bare = q.without_paging();
        assert_eq!(bare.fragments(), &[QueryFragment::SortBy { descending: true }]);
        assert_eq!(bare.skip(), 0);
        assert_eq!(bare.take(), None);
        assert!(bare.descending());
    }

    #[test]
    fn with_filter_replaces_previous_filter() {
        let q = ScrollQuery::new()
            .with_filter(Filter::Contains("a".into()))
            .with_filter(Filter::Regex("^b".into()));
        assert_eq!(q.filter(), Some(&Filter::Regex("^b".into())));
        assert_eq!(q.fragments().len(), 1);
    }
}
