use chrono::NaiveDate;

use crate::error::ExtractError;
use crate::models::week::WeekRecord;
use crate::service::months::month_number;

pub const DEFAULT_WEEK_BOUND: u32 = 20;

// The week match is a sliding text scan over the start of the heading, not a
// structural parse. Only the first 15 characters of the first line count, and
// every candidate week number is tried, so a "week 12" heading also lands in
// week 1. Downstream rendering depends on this exact shape.
const HEADING_WINDOW: usize = 15;

/// Split the raw document into heading-delimited paragraphs.
pub fn split_paragraphs(document: &str) -> Vec<String> {
    document.split('#').map(str::to_string).collect()
}

/// Collect every paragraph describing a numbered week, in paragraph order.
/// Duplicate week numbers are appended, not deduplicated.
pub fn collect_weeks(
    paragraphs: &[String],
    nb_weeks: u32,
    year: i32,
) -> Result<Vec<WeekRecord>, ExtractError> {
    let mut weeks = Vec::new();
    for paragraph in paragraphs {
        let heading = paragraph.lines().next().unwrap_or("");
        let window: String = heading.to_lowercase().chars().take(HEADING_WINDOW).collect();
        for week in 1..=nb_weeks {
            if window.contains(&format!("week {week}")) {
                weeks.push(WeekRecord {
                    week_number: week,
                    date: heading_date(heading, year)?,
                    body: paragraph.clone(),
                });
            }
        }
    }
    Ok(weeks)
}

/// Read the calendar date out of a week heading such as `Week 3 (Mar 14)`.
/// The date token is whatever sits after the last opening parenthesis.
fn heading_date(heading: &str, year: i32) -> Result<NaiveDate, ExtractError> {
    let token = heading
        .rsplit('(')
        .next()
        .unwrap_or("")
        .trim_end()
        .trim_end_matches(')')
        .to_lowercase();
    let month_token = token
        .trim_matches(|c: char| c.is_ascii_digit() || c.is_whitespace())
        .to_string();
    let month = month_number(&month_token)?;

    let day_digits: String = token
        .chars()
        .filter(|c| !month_token.contains(*c))
        .filter(|c| c.is_ascii_digit())
        .collect();
    let day: u32 = day_digits
        .parse()
        .map_err(|_| ExtractError::WeekHeading(heading.to_string()))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| ExtractError::WeekHeading(heading.to_string()))
}
