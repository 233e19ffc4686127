use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use tracing::info;

use crate::error::FetchError;
use crate::models::report::StatusReport;

/// Provides the raw course document text.
pub trait DocumentSource {
    async fn fetch_document(&self) -> Result<String, FetchError>;
}

/// Provides the candidate status reports.
pub trait StatusReportSource {
    async fn search_reports(&self) -> Result<Vec<StatusReport>, FetchError>;
}

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    content: String,
    encoding: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    items: Vec<StatusReport>,
}

/// Course document via the repository contents API. The payload is expected
/// base64; any other encoding means the document cannot be trusted.
pub struct GithubDocumentClient {
    client: reqwest::Client,
    url: String,
}

impl GithubDocumentClient {
    pub fn new(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }
}

impl DocumentSource for GithubDocumentClient {
    async fn fetch_document(&self) -> Result<String, FetchError> {
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
        let payload: ContentsResponse = response.json().await?;
        decode_contents(payload)
    }
}

fn decode_contents(payload: ContentsResponse) -> Result<String, FetchError> {
    match payload.encoding.as_deref() {
        Some("base64") => {
            // The API wraps base64 payloads in newlines.
            let raw: String = payload
                .content
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            let bytes = BASE64.decode(raw.as_bytes())?;
            let text = String::from_utf8(bytes)?;
            info!("decoded document, {} bytes", text.len());
            Ok(text)
        }
        other => Err(FetchError::Encoding(other.unwrap_or("none").to_string())),
    }
}

/// Status reports via the issue search API.
pub struct GithubIssueClient {
    client: reqwest::Client,
    url: String,
}

impl GithubIssueClient {
    pub fn new(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }
}

impl StatusReportSource for GithubIssueClient {
    async fn search_reports(&self) -> Result<Vec<StatusReport>, FetchError> {
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
        let payload: SearchResponse = response.json().await?;
        info!("issue search returned {} candidates", payload.items.len());
        Ok(payload.items)
    }
}
