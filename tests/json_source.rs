use assert_fs::prelude::*;
use futures::executor::block_on;
use vlist::app::{FetchOutcome, VirtualList};
use vlist::data::{write_rows, DataSource, Filter, JsonFileSource, ListRow, ScrollQuery};
use vlist::errors::FetchError;
use vlist::window::{DebounceProfile, ScrollOffset, WindowConfig};

fn rows(n: u64) -> Vec<ListRow> {
    (0..n)
        .map(|i| ListRow::new(i, format!("Row {i}")).with_detail(if i % 2 == 0 { "even" } else { "odd" }))
        .collect()
}

#[test]
fn written_rows_serve_paged_fetches() {
    let dir = assert_fs::TempDir::new().unwrap();
    let file = dir.child("rows.json");
    write_rows(file.path(), &rows(80)).unwrap();

    let source = JsonFileSource::open(file.path()).unwrap();
    assert_eq!(source.len(), 80);
    let page = block_on(source.fetch(&ScrollQuery::new().for_range(40..45))).unwrap();
    assert_eq!(page.iter().map(|r| r.id).collect::<Vec<_>>(), vec![40, 41, 42, 43, 44]);
    assert_eq!(page[0].detail.as_deref(), Some("even"));
}

#[test]
fn list_over_json_file_scrolls_and_filters() {
    let dir = assert_fs::TempDir::new().unwrap();
    let file = dir.child("rows.json");
    write_rows(file.path(), &rows(200)).unwrap();
    let source = JsonFileSource::open(file.path()).unwrap();
    let mut list = VirtualList::new(source, WindowConfig::default(), DebounceProfile::Standard).unwrap();

    let req = list.start().unwrap();
    let fetched = block_on(list.source().fetch(&req.query));
    list.complete_fetch(&req, fetched).unwrap();

    list.on_scroll(ScrollOffset::top(3600.0), std::time::Instant::now());
    let req = list.flush().unwrap();
    let fetched = block_on(list.source().fetch(&req.query));
    let out = list.complete_fetch(&req, fetched).unwrap();
    assert!(matches!(out, FetchOutcome::Applied { rendered: true, .. }));
    assert!(list.state().contains(100));

    let req = list
        .set_filter(Some(Filter::Regex(r"^row 1\d\d$".into())))
        .unwrap()
        .unwrap();
    assert_eq!(list.total_count(), 100);
    let fetched = block_on(list.source().fetch(&req.query));
    list.complete_fetch(&req, fetched).unwrap();
    assert_eq!(list.visible_rows()[0].1.id, 100);
}

#[test]
fn malformed_file_reports_path() {
    let dir = assert_fs::TempDir::new().unwrap();
    let file = dir.child("broken.json");
    file.write_str("[{\"id\": 1, \"label\": ").unwrap();
    match JsonFileSource::open(file.path()) {
        Err(e @ FetchError::Json { .. }) => assert!(e.to_string().contains("broken.json")),
        Err(other) => panic!("unexpected error {other}"),
        Ok(_) => panic!("malformed JSON accepted"),
    }
}
