use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Due date for one numbered task, as announced in the course document.
/// The timestamp is wall-clock time in the course timezone, current year.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DeadlineRecord {
    pub task_number: u32,
    pub due_at: NaiveDateTime,
    pub optional: bool,
}
