use std::path::{Path, PathBuf};

use futures::future::BoxFuture;
use tracing::info;

use super::query::{Filter, ScrollQuery};
use super::source::{DataSource, ListRow, VecDataSource};
use crate::errors::FetchError;

/// Rows loaded from a JSON array of [`ListRow`] objects.
///
/// The file is read once; when it changes on disk the host opens a fresh
/// source and hands it to [`VirtualList::set_source`](crate::app::VirtualList::set_source).
#[derive(Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    rows: VecDataSource<ListRow>,
}

impl JsonFileSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FetchError> {
        let path = path.as_ref().to_path_buf();
        let text = std::fs::read_to_string(&path).map_err(|source| FetchError::Io {
            path: path.clone(),
            source,
        })?;
        let rows: Vec<ListRow> = serde_json::from_str(&text).map_err(|source| FetchError::Json {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), rows = rows.len(), "loaded JSON data file");
        Ok(JsonFileSource {
            path,
            rows: VecDataSource::new(rows),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl DataSource for JsonFileSource {
    type Row = ListRow;

    fn total_count(&self, filter: Option<&Filter>) -> Result<usize, FetchError> {
        self.rows.total_count(filter)
    }

    fn fetch(&self, query: &ScrollQuery) -> BoxFuture<'static, Result<Vec<ListRow>, FetchError>> {
        self.rows.fetch(query)
    }
}

/// Write `rows` as a JSON array, the format [`JsonFileSource::open`] reads.
pub fn write_rows(path: impl AsRef<Path>, rows: &[ListRow]) -> Result<(), FetchError> {
    let path = path.as_ref();
    let text = serde_json::to_string_pretty(rows).map_err(|source| FetchError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, text).map_err(|source| FetchError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use futures::executor::block_on;

    #[test]
    fn open_reads_rows_and_serves_pages() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("rows.json");
        file.write_str(
            r#"[{"id": 1, "label": "alpha"}, {"id": 2, "label": "beta", "detail": "b"}, {"id": 3, "label": "gamma"}]"#,
        )
        .unwrap();

        let src = JsonFileSource::open(file.path()).unwrap();
        assert_eq!(src.len(), 3);
        let rows = block_on(src.fetch(&ScrollQuery::new().paged(1, 5))).unwrap();
        assert_eq!(rows[0], ListRow::new(2, "beta").with_detail("b"));
        assert_eq!(rows[1].label, "gamma");
    }

    #[test]
    fn malformed_json_is_an_error() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("bad.json");
        file.write_str("{ not json").unwrap();
        assert!(matches!(
            JsonFileSource::open(file.path()),
            Err(FetchError::Json { .. })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let temp = assert_fs::TempDir::new().unwrap();
        assert!(matches!(
            JsonFileSource::open(temp.path().join("nope.json")),
            Err(FetchError::Io { .. })
        ));
    }

    #[test]
    fn write_rows_round_trips_through_open() {
        let temp = assert_fs::TempDir::new().unwrap();
        let path = temp.path().join("out.json");
        let rows = vec![ListRow::new(7, "seven"), ListRow::new(8, "eight")];
        write_rows(&path, &rows).unwrap();
        let src = JsonFileSource::open(&path).unwrap();
        assert_eq!(src.total_count(None).unwrap(), 2);
    }
}
