use crate::error::ExtractError;
use crate::service::text_rules::FULL_MONTHS;

/// Resolve a month token, full name or 3-letter abbreviation, to 1..=12.
/// The source date cannot be trusted past an unknown token, so the caller
/// must treat the error as fatal for the line being processed.
pub fn month_number(token: &str) -> Result<u32, ExtractError> {
    let lower = token.trim().to_lowercase();
    for (idx, name) in FULL_MONTHS.iter().enumerate() {
        if lower == *name || lower == name[..3] {
            return Ok(idx as u32 + 1);
        }
    }
    Err(ExtractError::MonthFormat(token.to_string()))
}
