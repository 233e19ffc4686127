use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use tracing::info;

use crate::clients::calendar_client::CalendarSource;
use crate::clients::github_client::{DocumentSource, StatusReportSource};
use crate::clients::mail_client::Mailer;
use crate::models::deadline::DeadlineRecord;
use crate::service::aggregation::next_week_digest;
use crate::service::calendar_service::collect_events;
use crate::service::deadline_service::collect_deadlines;
use crate::service::digest_service::common_digest;
use crate::service::dispatch::dispatch_digests;
use crate::service::stats_service::{collect_task_counts, latest_report};
use crate::service::week_service::{collect_weeks, split_paragraphs};

pub struct DigestConfig {
    pub course_name: String,
    pub course_code: String,
    pub stats_marker: String,
    pub nb_weeks: u32,
}

/// Everything needed to mail the digests, assembled from the three sources.
pub struct DigestBundle {
    pub subject: String,
    pub common: String,
    pub task_counts: BTreeMap<u32, Vec<String>>,
    pub deadlines: BTreeMap<u32, DeadlineRecord>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum DigestOutcome {
    Sent { students: usize },
    NoUpcomingWeek,
}

/// Fetch and extract everything, then aggregate for the week after `today`.
/// `Ok(None)` means no week paragraph falls within the window and there is
/// nothing to announce. Every extraction must succeed before any mail can be
/// composed, a half-understood source aborts the run here.
pub async fn build_digest<D, C, S>(
    documents: &D,
    calendar: &C,
    reports: &S,
    config: &DigestConfig,
    today: NaiveDate,
) -> Result<Option<DigestBundle>, Box<dyn std::error::Error + Send + Sync>>
where
    D: DocumentSource,
    C: CalendarSource,
    S: StatusReportSource,
{
    let year = today.year();

    let document = documents.fetch_document().await?;
    let paragraphs = split_paragraphs(&document);
    let deadlines = collect_deadlines(&paragraphs, year)?;
    let weeks = collect_weeks(&paragraphs, config.nb_weeks, year)?;
    info!(
        "extracted {} week paragraphs and {} task deadlines",
        weeks.len(),
        deadlines.len()
    );

    let feed = calendar.fetch_calendar().await?;
    let events = collect_events(&feed)?;
    info!("collected {} calendar events", events.len());

    let Some(next_week) = next_week_digest(today, &weeks, &events) else {
        info!("no week paragraph within the next seven days, nothing to announce");
        return Ok(None);
    };
    info!(
        "selected week {} with {} events",
        next_week.week.week_number,
        next_week.events.len()
    );
    let common = common_digest(&config.course_name, &next_week);

    let candidates = reports.search_reports().await?;
    let task_counts = match latest_report(&candidates, year, &config.stats_marker) {
        Some(report) => collect_task_counts(&report.body),
        None => {
            info!("no status report matched, no student has registered a task yet");
            BTreeMap::new()
        }
    };

    Ok(Some(DigestBundle {
        subject: format!(
            "[{}] {} course weekly summary",
            config.course_code, config.course_name
        ),
        common,
        task_counts,
        deadlines,
    }))
}

/// Full pipeline: build the digest and mail every student with at least one
/// registered task.
pub async fn run_digest<D, C, S, M>(
    documents: &D,
    calendar: &C,
    reports: &S,
    mailer: &M,
    config: &DigestConfig,
    today: NaiveDate,
) -> Result<DigestOutcome, Box<dyn std::error::Error + Send + Sync>>
where
    D: DocumentSource,
    C: CalendarSource,
    S: StatusReportSource,
    M: Mailer,
{
    let Some(bundle) = build_digest(documents, calendar, reports, config, today).await? else {
        return Ok(DigestOutcome::NoUpcomingWeek);
    };
    let students = dispatch_digests(
        mailer,
        &bundle.subject,
        &bundle.common,
        &bundle.task_counts,
        &bundle.deadlines,
    )
    .await?;
    Ok(DigestOutcome::Sent { students })
}
