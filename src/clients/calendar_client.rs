use tracing::info;

use crate::error::FetchError;

/// Provides the raw iCalendar feed text.
pub trait CalendarSource {
    async fn fetch_calendar(&self) -> Result<String, FetchError>;
}

pub struct HttpCalendarClient {
    client: reqwest::Client,
    url: String,
}

impl HttpCalendarClient {
    pub fn new(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }
}

impl CalendarSource for HttpCalendarClient {
    async fn fetch_calendar(&self) -> Result<String, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .header("User-Agent", "digestBot")
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        let feed = response.text().await?;
        info!("fetched calendar feed, {} bytes", feed.len());
        Ok(feed)
    }
}
