use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::ExtractError;
use crate::models::deadline::DeadlineRecord;
use crate::service::text_rules::{hour_token, last_integer, month_day};

const DEADLINE_PHRASE: &str = "deadline to complete task";

/// Collect task deadlines from every paragraph carrying a "deadlines"
/// section. A later line for the same task number overwrites the earlier one.
pub fn collect_deadlines(
    paragraphs: &[String],
    year: i32,
) -> Result<BTreeMap<u32, DeadlineRecord>, ExtractError> {
    let mut deadlines = BTreeMap::new();
    for paragraph in paragraphs {
        let lowered = paragraph.to_lowercase();
        if !lowered.contains("deadlines") {
            continue;
        }
        for line in lowered.lines() {
            if !line.contains(DEADLINE_PHRASE) {
                continue;
            }
            let record = parse_deadline_line(line, year)?;
            deadlines.insert(record.task_number, record);
        }
    }
    Ok(deadlines)
}

/// One deadline line reads like
/// `task 2 deadline to complete task: january 15 23h59 (optional)`.
/// Task number is the last integer before the first colon; date and hour are
/// scanned from the rest. A line without both tokens cannot be defaulted.
fn parse_deadline_line(line: &str, year: i32) -> Result<DeadlineRecord, ExtractError> {
    let format_err = || ExtractError::DeadlineFormat(line.to_string());

    let (head, tail) = line.split_once(':').ok_or_else(format_err)?;
    let task_number = last_integer(head).ok_or_else(format_err)?;
    let (month, day) = month_day(tail).ok_or_else(format_err)?;
    let hour = hour_token(tail).ok_or_else(format_err)?;

    let due_at = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, 0, 0))
        .ok_or_else(format_err)?;

    Ok(DeadlineRecord {
        task_number,
        due_at,
        optional: line.contains("optional"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn due(year: i32, month: u32, day: u32, hour: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn reads_task_number_date_hour_and_optional_flag() {
        let paragraphs = vec![
            "Deadlines\ntask 2 deadline to complete task: january 15 23h59 (optional)\n"
                .to_string(),
        ];
        let deadlines = collect_deadlines(&paragraphs, 2026).unwrap();

        let record = &deadlines[&2];
        assert_eq!(record.task_number, 2);
        assert_eq!(record.due_at, due(2026, 1, 15, 23));
        assert!(record.optional);
    }

    #[test]
    fn ignores_paragraphs_without_a_deadlines_section() {
        let paragraphs =
            vec!["Schedule\ntask 1 deadline to complete task: march 2 17h00\n".to_string()];
        assert!(collect_deadlines(&paragraphs, 2026).unwrap().is_empty());
    }

    #[test]
    fn later_line_for_the_same_task_wins() {
        let paragraphs = vec![
            "Deadlines\n\
             task 1 deadline to complete task: march 2 17h00\n\
             task 1 deadline to complete task: march 9 17h00\n"
                .to_string(),
        ];
        let deadlines = collect_deadlines(&paragraphs, 2026).unwrap();

        assert_eq!(deadlines.len(), 1);
        assert_eq!(deadlines[&1].due_at, due(2026, 3, 9, 17));
    }

    #[test]
    fn mandatory_lines_are_not_optional() {
        let paragraphs =
            vec!["Deadlines\ntask 3 deadline to complete task: april 1 12h00\n".to_string()];
        let deadlines = collect_deadlines(&paragraphs, 2026).unwrap();
        assert!(!deadlines[&3].optional);
    }

    #[test]
    fn missing_hour_is_a_format_error() {
        let paragraphs =
            vec!["Deadlines\ntask 1 deadline to complete task: march 2\n".to_string()];
        assert!(matches!(
            collect_deadlines(&paragraphs, 2026),
            Err(ExtractError::DeadlineFormat(_))
        ));
    }

    #[test]
    fn missing_date_is_a_format_error() {
        let paragraphs =
            vec!["Deadlines\ntask 1 deadline to complete task: 23h59 sharp\n".to_string()];
        assert!(matches!(
            collect_deadlines(&paragraphs, 2026),
            Err(ExtractError::DeadlineFormat(_))
        ));
    }

    #[test]
    fn abbreviated_months_are_not_recognized_in_deadline_lines() {
        // Deadline lines spell months in full; "mar 2" alone has no date.
        let paragraphs = vec!["Deadlines\ntask 1 deadline to complete task: mar 2 17h00\n".to_string()];
        assert!(collect_deadlines(&paragraphs, 2026).is_err());
    }
}
