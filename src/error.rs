use thiserror::Error;

/// Raised when source text does not follow the conventions the extractors
/// rely on. Fatal for the run: a digest built from a half-understood source
/// must not be sent.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("unrecognized month token {0:?}")]
    MonthFormat(String),

    #[error("week heading {0:?} carries no readable day")]
    WeekHeading(String),

    #[error("deadline line {0:?} is missing a date or hour token")]
    DeadlineFormat(String),

    #[error("unrecognized calendar timestamp {0:?}")]
    TimestampFormat(String),

    #[error("calendar event is missing {0}")]
    MissingEventField(&'static str),

    #[error("calendar feed could not be parsed: {0}")]
    CalendarSyntax(String),
}

/// Raised by the outbound source clients.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("unexpected document encoding {0:?}")]
    Encoding(String),

    #[error("request failed with status {0}")]
    Status(reqwest::StatusCode),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("document payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("document payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
