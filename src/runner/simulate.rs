//! Headless mode: feed a scripted list of scroll offsets through a
//! [`VirtualList`] and print every window it settles on.

use std::io::Write;
use std::ops::Range;

use anyhow::Context;
use futures::executor::block_on;

use crate::app::{FetchOutcome, FetchRequest, VirtualList};
use crate::data::DataSource;
use crate::window::ScrollOffset;

/// Parse `"0,1068,5040"` into offsets.
pub fn parse_offsets(script: &str) -> anyhow::Result<Vec<f64>> {
    script
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .with_context(|| format!("invalid scroll offset `{s}`"))
        })
        .collect()
}

/// Run `request` and any follow-ups inline. Returns the ranges fetched.
fn run_fetches<S: DataSource>(
    list: &mut VirtualList<S>,
    request: Option<FetchRequest>,
) -> anyhow::Result<Vec<Range<usize>>> {
    let mut fetched = Vec::new();
    let mut next = request;
    while let Some(req) = next.take() {
        let rows = block_on(list.source().fetch(&req.query));
        fetched.push(req.range.clone());
        if let FetchOutcome::Applied { follow_up, .. } = list.complete_fetch(&req, rows)? {
            next = follow_up;
        }
    }
    Ok(fetched)
}

fn describe(fetched: &[Range<usize>]) -> String {
    if fetched.is_empty() {
        return "cached".to_string();
    }
    let ranges: Vec<String> = fetched
        .iter()
        .map(|r| format!("{}..{}", r.start, r.end))
        .collect();
    format!("fetched {}", ranges.join(", "))
}

/// Start `list`, then apply each offset in `offsets` as a settled scroll.
/// One line per step is written to `out`.
pub fn run_script<S, W>(list: &mut VirtualList<S>, offsets: &[f64], out: &mut W) -> anyhow::Result<()>
where
    S: DataSource,
    W: Write,
{
    let now = std::time::Instant::now();
    let first = list.start();
    let fetched = run_fetches(list, first)?;
    writeln!(out, "start  {}  {}", list.state(), describe(&fetched))?;

    for &top in offsets {
        list.on_scroll(ScrollOffset::top(top), now);
        let request = list.flush();
        let fetched = run_fetches(list, request)?;
        writeln!(out, "top {:>7}  {}  {}", top, list.state(), describe(&fetched))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_parse_and_reject_garbage() {
        assert_eq!(parse_offsets("0, 1068,,5040").unwrap(), vec![0.0, 1068.0, 5040.0]);
        assert!(parse_offsets("10,abc").is_err());
    }

    #[test]
    fn describe_lists_ranges() {
        assert_eq!(describe(&[]), "cached");
        assert_eq!(describe(&[30..59, 60..61]), "fetched 30..59, 60..61");
    }
}
