use std::collections::BTreeMap;

use tracing::warn;

use crate::models::report::StatusReport;
use crate::service::text_rules::last_integer;

/// Marker phrase a genuine statistics report carries in its body.
pub const DEFAULT_STATS_MARKER: &str = "Statistic Information for Each Category";

/// Pick the most recent report whose title mentions the current year and
/// whose body carries the marker phrase. `None` is a valid terminal state:
/// no student has registered a task yet.
pub fn latest_report<'a>(
    reports: &'a [StatusReport],
    year: i32,
    marker: &str,
) -> Option<&'a StatusReport> {
    let year_token = year.to_string();
    reports
        .iter()
        .filter(|report| report.title.contains(&year_token) && report.body.contains(marker))
        .next_back()
}

/// Map "number of tasks registered" to the students sitting at that count.
/// A later line for the same count overwrites the earlier one.
pub fn collect_task_counts(body: &str) -> BTreeMap<u32, Vec<String>> {
    let mut counts = BTreeMap::new();
    for line in body.to_lowercase().lines() {
        if !line.contains("students with") {
            continue;
        }
        let Some((head, tail)) = line.split_once(':') else {
            warn!("skipping malformed stats line {line:?}");
            continue;
        };
        let Some(task_count) = last_integer(head) else {
            warn!("skipping stats line without a count {line:?}");
            continue;
        };
        let students: Vec<String> = tail
            .replace(' ', "")
            .trim_matches('*')
            .split(',')
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
        counts.insert(task_count, students);
    }
    counts
}
