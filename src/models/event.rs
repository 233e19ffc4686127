use chrono::DateTime;
use chrono_tz::Tz;

/// One calendar occurrence, start and end normalized to the course timezone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub summary: String,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub location: String,
}
