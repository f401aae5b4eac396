use std::collections::BTreeMap;
use std::ops::Range;

/// Sparse index → row cache for materialized rows.
///
/// Entries are only added by fetch completion and only removed by
/// [`clear`](Self::clear) (new data source, new filter, destroy).
#[derive(Debug, Clone)]
pub struct GeneratedDataCache<R> {
    rows: BTreeMap<usize, R>,
}

impl<R> Default for GeneratedDataCache<R> {
    fn default() -> Self {
        GeneratedDataCache {
            rows: BTreeMap::new(),
        }
    }
}

impl<R> GeneratedDataCache<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> Option<&R> {
        self.rows.get(&index)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.rows.contains_key(&index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Store `rows` at consecutive indices starting at `start`. Returns the
    /// number of rows inserted.
    pub fn insert_batch(&mut self, start: usize, rows: Vec<R>) -> usize {
        let n = rows.len();
        self.rows
            .extend(rows.into_iter().enumerate().map(|(i, r)| (start + i, r)));
        n
    }

    /// Smallest range covering every index of `range` that is not cached.
    pub fn missing_in(&self, range: Range<usize>) -> Option<Range<usize>> {
        let first = range.clone().find(|i| !self.rows.contains_key(i))?;
        let last = range.rev().find(|i| !self.rows.contains_key(i))?;
        Some(first..last + 1)
    }

    /// Cached rows within `range`, in index order.
    pub fn rows_in(&self, range: Range<usize>) -> impl Iterator<Item = (usize, &R)> {
        self.rows.range(range).map(|(i, r)| (*i, r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_range_spans_gaps() {
        let mut c = GeneratedDataCache::new();
        assert_eq!(c.missing_in(0..30), Some(0..30));
        c.insert_batch(0, (0..30).collect::<Vec<_>>());
        assert_eq!(c.missing_in(0..30), None);
        assert_eq!(c.missing_in(20..50), Some(30..50));
        c.insert_batch(40, vec![40, 41]);
        assert_eq!(c.missing_in(20..50), Some(30..50));
        assert_eq!(c.missing_in(35..42), Some(35..40));
        assert!(c.missing_in(5..5).is_none());
    }

    #[test]
    fn rows_in_returns_ordered_slice() {
        let mut c = GeneratedDataCache::new();
        c.insert_batch(10, vec!["a", "b", "c"]);
        let got: Vec<_> = c.rows_in(9..12).collect();
        assert_eq!(got, vec![(10, &"a"), (11, &"b")]);
        assert_eq!(c.len(), 3);
        c.clear();
        assert!(c.is_empty());
    }
}
