use std::io::BufReader;

use chrono::{NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use ical::parser::ical::component::IcalEvent;
use ical::property::Property;

use crate::error::ExtractError;
use crate::models::event::CalendarEvent;

/// All rendered times are wall clock in the course timezone, whatever the
/// feed publishes in.
pub const COURSE_TZ: Tz = chrono_tz::Europe::Stockholm;

/// Parse an iCalendar feed into events ordered by start time. Recurring and
/// overlapping occurrences are kept as-is, the output is a faithful ordered
/// transcription of the feed.
pub fn collect_events(feed: &str) -> Result<Vec<CalendarEvent>, ExtractError> {
    let reader = ical::IcalParser::new(BufReader::new(feed.as_bytes()));
    let mut events = Vec::new();
    for calendar in reader {
        let calendar =
            calendar.map_err(|err| ExtractError::CalendarSyntax(err.to_string()))?;
        for vevent in &calendar.events {
            events.push(parse_event(vevent)?);
        }
    }
    events.sort_by_key(|event| event.start);
    Ok(events)
}

fn parse_event(vevent: &IcalEvent) -> Result<CalendarEvent, ExtractError> {
    let mut summary = String::new();
    let mut location = String::new();
    let mut start = None;
    let mut end = None;

    for property in &vevent.properties {
        match property.name.as_str() {
            "SUMMARY" => summary = property.value.clone().unwrap_or_default(),
            // Feeds escape commas and semicolons in LOCATION, drop the backslashes.
            "LOCATION" => {
                location = property.value.clone().unwrap_or_default().replace('\\', "")
            }
            "DTSTART" => start = Some(parse_timestamp(property)?),
            "DTEND" => end = Some(parse_timestamp(property)?),
            _ => {}
        }
    }

    Ok(CalendarEvent {
        summary,
        start: start.ok_or(ExtractError::MissingEventField("DTSTART"))?,
        end: end.ok_or(ExtractError::MissingEventField("DTEND"))?,
        location,
    })
}

/// Accepts the timestamp shapes seen in the wild: `...Z` UTC instants,
/// TZID-qualified local times, floating local times and bare dates.
fn parse_timestamp(property: &Property) -> Result<chrono::DateTime<Tz>, ExtractError> {
    let value = property
        .value
        .as_deref()
        .ok_or(ExtractError::MissingEventField("timestamp value"))?;
    let format_err = || ExtractError::TimestampFormat(value.to_string());

    if let Some(instant) = value.strip_suffix('Z') {
        let naive = NaiveDateTime::parse_from_str(instant, "%Y%m%dT%H%M%S")
            .map_err(|_| format_err())?;
        return Ok(naive.and_utc().with_timezone(&COURSE_TZ));
    }

    let tz = match param_value(property, "TZID") {
        Some(name) => name.parse::<Tz>().map_err(|_| format_err())?,
        None => COURSE_TZ,
    };
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y%m%dT%H%M%S") {
        return tz
            .from_local_datetime(&naive)
            .single()
            .map(|local| local.with_timezone(&COURSE_TZ))
            .ok_or_else(format_err);
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y%m%d") {
        let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(format_err)?;
        return tz
            .from_local_datetime(&midnight)
            .single()
            .map(|local| local.with_timezone(&COURSE_TZ))
            .ok_or_else(format_err);
    }
    Err(format_err())
}

fn param_value<'a>(property: &'a Property, key: &str) -> Option<&'a str> {
    property
        .params
        .as_ref()?
        .iter()
        .find(|(name, _)| name == key)
        .and_then(|(_, values)| values.first())
        .map(String::as_str)
}
