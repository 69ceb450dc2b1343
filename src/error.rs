use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    // Non-2xx response; `detail` is the backend's message when it sent one
    #[error("API error ({status}): {detail}")]
    Api { status: u16, detail: String },

    // 401 from the backend; the session token has already been dropped
    #[error("unauthorized: {detail}")]
    Unauthorized { detail: String },

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),

    #[error("invalid configuration for {key}: {reason}")]
    Config { key: &'static str, reason: String },
}

impl Error {
    /// Message suitable for showing to the person who triggered the action.
    ///
    /// Backend rejections carry their own `detail`; everything else falls back
    /// to `fallback` so transport noise never reaches the user.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Error::Api { detail, .. } | Error::Unauthorized { detail } if !detail.is_empty() => {
                detail.clone()
            }
            Error::Validation(message) => message.clone(),
            _ => fallback.to_string(),
        }
    }
}
