use reqwest::StatusCode;
use roster_schema::RawErrorBody;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ClientError {
    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// The server answered with a non-success status. `body` is the decoded error
    /// payload when the server sent one.
    #[error("Server returned {status}: {}", status_detail(.body.as_ref()))]
    Status {
        status: StatusCode,
        body: Option<RawErrorBody>,
    },
}

fn status_detail(body: Option<&RawErrorBody>) -> &str {
    body.map_or("<no error body>", |b| b.message.as_str())
}
