use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One "Week N" section of the course document. The body keeps the raw
/// paragraph text, heading line included, for later rendering.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct WeekRecord {
    pub week_number: u32,
    pub date: NaiveDate,
    pub body: String,
}
