//! Line-level extraction rules shared by the document and report parsers.
//! Each rule matches one recurring convention of the source prose.

/// Full month names, index + 1 is the month number.
pub const FULL_MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Last run of digits in `text`, parsed as an integer.
pub fn last_integer(text: &str) -> Option<u32> {
    let mut result = None;
    let mut current = String::new();
    for c in text.chars() {
        if c.is_ascii_digit() {
            current.push(c);
        } else if !current.is_empty() {
            result = Some(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        result = Some(current);
    }
    result.and_then(|digits| digits.parse().ok())
}

/// First `<full month name> <1-2 digit day>` token in `text`, lowercase input.
pub fn month_day(text: &str) -> Option<(u32, u32)> {
    let mut best: Option<(usize, u32, u32)> = None;
    for (idx, name) in FULL_MONTHS.iter().enumerate() {
        for (pos, _) in text.match_indices(name) {
            let Some(day) = day_after_month(&text[pos + name.len()..]) else {
                continue;
            };
            if best.is_none_or(|(seen, _, _)| pos < seen) {
                best = Some((pos, idx as u32 + 1, day));
            }
        }
    }
    best.map(|(_, month, day)| (month, day))
}

// One whitespace, then up to two digits.
fn day_after_month(rest: &str) -> Option<u32> {
    let rest = rest.strip_prefix(|c: char| c.is_whitespace())?;
    let digits: String = rest
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .take(2)
        .collect();
    if digits.is_empty() { None } else { digits.parse().ok() }
}

/// First `<digits>h` token in `text`; trailing minutes are ignored.
pub fn hour_token(text: &str) -> Option<u32> {
    let bytes = text.as_bytes();
    for (pos, b) in bytes.iter().enumerate() {
        if *b == b'h' && pos > 0 && bytes[pos - 1].is_ascii_digit() {
            let mut start = pos;
            while start > 0 && bytes[start - 1].is_ascii_digit() {
                start -= 1;
            }
            return text[start..pos].parse().ok();
        }
    }
    None
}
