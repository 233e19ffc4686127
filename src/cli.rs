use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::error;

use crate::clients::calendar_client::HttpCalendarClient;
use crate::clients::github_client::{GithubDocumentClient, GithubIssueClient};
use crate::clients::mail_client::ResendMailer;
use crate::config::AppConfig;
use crate::runtime::{self, DigestConfig, DigestOutcome};
use crate::service::stats_service::DEFAULT_STATS_MARKER;
use crate::service::week_service::DEFAULT_WEEK_BOUND;

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build this week's digest and mail every registered student.
    Run,
    /// Build this week's digest and print it without sending anything.
    Preview,
}

pub async fn cli(config: AppConfig) {
    // Fine to panic here
    let cli = Cli::parse();
    let get_prop = |key: &str| -> Option<String> {
        config.get(key).or_else(|| std::env::var(key).ok())
    };
    let require = |key: &str| -> String {
        get_prop(key).unwrap_or_else(|| panic!("{} must be set", key))
    };

    let http = reqwest::Client::new();
    let documents = GithubDocumentClient::new(http.clone(), require("DOCUMENT_URL"));
    let calendar = HttpCalendarClient::new(http.clone(), require("CALENDAR_URL"));
    let reports = GithubIssueClient::new(http, require("ISSUE_SEARCH_URL"));

    let digest_config = DigestConfig {
        course_name: get_prop("COURSE_NAME").unwrap_or("DevOps".to_string()),
        course_code: get_prop("COURSE_CODE").unwrap_or("DD2482".to_string()),
        stats_marker: get_prop("STATS_MARKER").unwrap_or(DEFAULT_STATS_MARKER.to_string()),
        nb_weeks: DEFAULT_WEEK_BOUND,
    };
    let today = Local::now().date_naive();

    match &cli.command {
        Commands::Run => {
            let mailer = ResendMailer::new(
                &require("RESEND_API_KEY"),
                require("MAIL_FROM"),
                require("MAIL_DOMAIN"),
            );
            match runtime::run_digest(&documents, &calendar, &reports, &mailer, &digest_config, today)
                .await
            {
                Ok(DigestOutcome::Sent { students }) => {
                    println!("Sent the weekly digest to {} students", students);
                }
                Ok(DigestOutcome::NoUpcomingWeek) => {
                    println!("No upcoming week to announce, nothing sent");
                }
                Err(e) => {
                    error!("digest run aborted: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Preview => {
            match runtime::build_digest(&documents, &calendar, &reports, &digest_config, today)
                .await
            {
                Ok(Some(bundle)) => {
                    println!("Subject: {}\n", bundle.subject);
                    println!("{}", bundle.common);
                    for (task_number, students) in &bundle.task_counts {
                        let addendum = crate::service::digest_service::student_addendum(
                            *task_number,
                            &bundle.deadlines,
                        );
                        println!("--- students at {} tasks: {}", task_number, students.join(", "));
                        println!("{}\n", addendum);
                    }
                }
                Ok(None) => println!("No upcoming week to announce"),
                Err(e) => {
                    error!("digest preview aborted: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}
