use std::collections::BTreeMap;

use crate::models::deadline::DeadlineRecord;
use crate::models::event::CalendarEvent;
use crate::service::aggregation::NextWeek;

/// Disclosure appended to every outgoing message.
pub const AUTO_TRAILER: &str =
    "This message is automatically generated, please do not respond";

/// One schedule line per event. Summaries from the scheduling system come in
/// Swedish, the two known kinds are translated, anything else passes through.
pub fn event_line(event: &CalendarEvent) -> String {
    let mut category = event.summary.as_str();
    if event.summary.contains("Laboration") {
        category = "Laboratory";
    }
    if event.summary.contains("Lektion") {
        category = "Lecture";
    }
    format!(
        "- {} on {} from {} to {} in room {}",
        category,
        event.start.format("%A %dth %B"),
        event.start.format("%Hh%M"),
        event.end.format("%Hh%M"),
        event.location
    )
}

/// Reflow the raw week paragraph into mail-ready text: markdown bullets
/// become dashes, the heading loses its brackets, and "material" lines are
/// unfolded into an indented sub-list with `name:` prefixes.
pub fn week_program_text(body: &str) -> String {
    let mut text = String::new();
    for line in body.replace('*', "-").lines() {
        if line.is_empty() {
            continue;
        }
        let reshaped = if line.contains("Week") {
            line.trim().replace('[', "").replace(']', " ")
        } else if line.contains("material") {
            line.replace('[', "\n     -")
                .replace(']', ": ")
                .replace(')', "")
                .replace('(', "")
                .replace("and", "")
                .replace(',', "")
        } else {
            line.to_string()
        };
        text.push_str(&reshaped);
        text.push('\n');
    }
    text
}

/// The announcement shared by every recipient: the program for the selected
/// week followed by its schedule.
pub fn common_digest(course_name: &str, next_week: &NextWeek) -> String {
    let mut schedule = String::new();
    for event in &next_week.events {
        schedule.push_str(&event_line(event));
        schedule.push('\n');
    }
    let program = week_program_text(&next_week.week.body);
    format!(
        "Hello,\nHere is the summary for next week {course_name} course\n\n\
         Program of {program}\nSchedule:\n{schedule}"
    )
}

/// Per-student task status. A student at or past the last known deadline is
/// congratulated; everyone else is told their next deadline, picking the
/// closest following task number when the schedule skips one.
pub fn student_addendum(
    task_number: u32,
    deadlines: &BTreeMap<u32, DeadlineRecord>,
) -> String {
    let mut text = String::from("\nTask summary\n");
    let highest = deadlines.keys().next_back().copied().unwrap_or(0);
    if task_number >= highest {
        text.push_str("You have registered all your tasks! Congrats.");
        return text;
    }
    match deadlines.range(task_number + 1..).next() {
        Some((_, next)) => {
            let optional = if next.optional { " (optional) " } else { " " };
            let plural = if task_number < 2 { "" } else { "s" };
            text.push_str(&format!(
                "You have {} task{} registered and your next{}task is {}",
                task_number,
                plural,
                optional,
                next.due_at.format("%A %dth %B %H:%M")
            ));
        }
        None => text.push_str("You have registered all your tasks! Congrats."),
    }
    text
}

/// Full message body for one student.
pub fn student_digest(common: &str, addendum: &str) -> String {
    format!("{common}\n{addendum}\n\n{AUTO_TRAILER}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::week::WeekRecord;
    use crate::service::calendar_service::COURSE_TZ;
    use chrono::{NaiveDate, TimeZone};

    fn event(summary: &str, location: &str) -> CalendarEvent {
        let start = COURSE_TZ.with_ymd_and_hms(2026, 3, 16, 13, 0, 0).unwrap();
        CalendarEvent {
            summary: summary.to_string(),
            start,
            end: start + chrono::Duration::hours(2),
            location: location.to_string(),
        }
    }

    fn deadline(task_number: u32, month: u32, day: u32, optional: bool) -> DeadlineRecord {
        DeadlineRecord {
            task_number,
            due_at: NaiveDate::from_ymd_opt(2026, month, day)
                .unwrap()
                .and_hms_opt(23, 0, 0)
                .unwrap(),
            optional,
        }
    }

    fn deadline_map(records: Vec<DeadlineRecord>) -> BTreeMap<u32, DeadlineRecord> {
        records
            .into_iter()
            .map(|record| (record.task_number, record))
            .collect()
    }

    #[test]
    fn event_lines_translate_known_summaries() {
        assert_eq!(
            event_line(&event("Laboration 2", "B1")),
            "- Laboratory on Monday 16th March from 13h00 to 15h00 in room B1"
        );
        assert_eq!(
            event_line(&event("Lektion 5", "E32")),
            "- Lecture on Monday 16th March from 13h00 to 15h00 in room E32"
        );
    }

    #[test]
    fn unknown_summaries_pass_through_as_category() {
        let line = event_line(&event("Guest seminar", "D2"));
        assert!(line.starts_with("- Guest seminar on "));
    }

    #[test]
    fn program_heading_loses_brackets_and_material_lines_unfold() {
        let body = "Week 3 ([Mar 14])\n\
                    \n\
                    * Reading material [Intro](https://a.io) and [Guide](https://b.io)\n\
                    * Bring laptops\n";
        let program = week_program_text(body);

        assert!(program.starts_with("Week 3 (Mar 14 )\n"));
        assert!(program.contains("\n     -Intro: "));
        assert!(program.contains("\n     -Guide: "));
        assert!(!program.contains("and"));
        assert!(program.contains("- Bring laptops\n"));
    }

    #[test]
    fn empty_lines_are_dropped_from_the_program() {
        let program = week_program_text("Week 1 (Jan 5)\n\n\nLecture only\n");
        assert_eq!(program, "Week 1 (Jan 5)\nLecture only\n");
    }

    #[test]
    fn common_digest_carries_program_and_schedule() {
        let next_week = NextWeek {
            week: WeekRecord {
                week_number: 3,
                date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
                body: "Week 3 (Mar 14)\nLecture on pipelines\n".to_string(),
            },
            events: vec![event("Lektion 5", "E32")],
        };
        let digest = common_digest("DevOps", &next_week);

        assert!(digest.contains("summary for next week DevOps course"));
        assert!(digest.contains("Program of Week 3 (Mar 14)\n"));
        assert!(digest.contains("Schedule:\n- Lecture on Monday 16th March"));
    }

    #[test]
    fn addendum_names_the_next_deadline() {
        let deadlines = deadline_map(vec![
            deadline(1, 1, 15, false),
            deadline(2, 2, 15, false),
            deadline(3, 3, 15, false),
        ]);
        let text = student_addendum(1, &deadlines);

        assert!(text.starts_with("\nTask summary\n"));
        assert!(text.contains("You have 1 task registered"));
        assert!(text.contains("your next task is Sunday 15th February 23:00"));
    }

    #[test]
    fn plural_kicks_in_at_two_tasks() {
        let deadlines = deadline_map(vec![
            deadline(1, 1, 15, false),
            deadline(2, 2, 15, false),
            deadline(3, 3, 15, false),
            deadline(4, 4, 15, false),
        ]);
        assert!(student_addendum(2, &deadlines).contains("You have 2 tasks registered"));
    }

    #[test]
    fn optional_deadlines_are_flagged() {
        let deadlines = deadline_map(vec![
            deadline(1, 1, 15, false),
            deadline(2, 2, 15, true),
            deadline(3, 3, 15, false),
        ]);
        assert!(student_addendum(1, &deadlines).contains("your next (optional) task is"));
    }

    #[test]
    fn finished_students_get_the_completion_message() {
        let deadlines = deadline_map(vec![deadline(1, 1, 15, false), deadline(2, 2, 15, false)]);
        for done in [2, 3, 10] {
            let text = student_addendum(done, &deadlines);
            assert!(text.contains("You have registered all your tasks! Congrats."));
        }
    }

    #[test]
    fn sparse_deadline_keys_fall_forward_to_the_next_task() {
        let deadlines = deadline_map(vec![deadline(1, 1, 15, false), deadline(4, 4, 15, false)]);
        let text = student_addendum(1, &deadlines);
        assert!(text.contains("your next task is Wednesday 15th April 23:00"));
    }

    #[test]
    fn empty_deadline_schedule_still_renders() {
        let text = student_addendum(0, &BTreeMap::new());
        assert!(text.contains("Congrats"));
    }

    #[test]
    fn student_digest_ends_with_the_trailer() {
        let body = student_digest("common part", "\nTask summary\naddendum part");
        assert!(body.starts_with("common part\n"));
        assert!(body.ends_with(AUTO_TRAILER));
    }
}
