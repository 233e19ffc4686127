use std::collections::BTreeMap;

use tracing::info;

use crate::clients::mail_client::Mailer;
use crate::models::deadline::DeadlineRecord;
use crate::service::digest_service::{student_addendum, student_digest};

/// Send one personalized digest per student. The addendum is rendered once
/// per task count and shared by every student at that count. A transport
/// failure aborts the remaining sends.
pub async fn dispatch_digests<M: Mailer>(
    mailer: &M,
    subject: &str,
    common: &str,
    task_counts: &BTreeMap<u32, Vec<String>>,
    deadlines: &BTreeMap<u32, DeadlineRecord>,
) -> Result<usize, Box<dyn std::error::Error + Send + Sync>> {
    let mut sent = 0;
    for (task_number, students) in task_counts {
        let addendum = student_addendum(*task_number, deadlines);
        let body = student_digest(common, &addendum);
        for student in students {
            mailer.send(student, subject, &body).await?;
            sent += 1;
        }
        info!(
            "dispatched digest to {} students with {} registered tasks",
            students.len(),
            task_number
        );
    }
    Ok(sent)
}
