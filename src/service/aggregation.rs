use chrono::NaiveDate;

use crate::models::event::CalendarEvent;
use crate::models::week::WeekRecord;

/// The week paragraph and calendar events selected for the upcoming digest.
#[derive(Debug, Clone)]
pub struct NextWeek {
    pub week: WeekRecord,
    pub events: Vec<CalendarEvent>,
}

// The two windows differ on purpose: weeks are picked within 8 days, events
// within 7. Narrowing or widening either changes the digest contents that
// recipients have been receiving, so both bounds stay as they are.

/// First week record dated strictly within the next seven days, in list
/// order. `None` means there is nothing to announce, which is a defined
/// outcome rather than an error.
pub fn next_week(today: NaiveDate, weeks: &[WeekRecord]) -> Option<&WeekRecord> {
    weeks.iter().find(|week| {
        let days = (week.date - today).num_days();
        days > 0 && days < 8
    })
}

/// Events starting strictly within the next six days, feed order preserved.
pub fn events_in_window(today: NaiveDate, events: &[CalendarEvent]) -> Vec<CalendarEvent> {
    events
        .iter()
        .filter(|event| {
            let days = (event.start.date_naive() - today).num_days();
            days > 0 && days < 7
        })
        .cloned()
        .collect()
}

/// Join the week selection with its calendar events.
pub fn next_week_digest(
    today: NaiveDate,
    weeks: &[WeekRecord],
    events: &[CalendarEvent],
) -> Option<NextWeek> {
    let week = next_week(today, weeks)?.clone();
    let events = events_in_window(today, events);
    Some(NextWeek { week, events })
}
