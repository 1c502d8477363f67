use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("YOUTUBE_API_KEY not set. Run `yt-rank init` to configure, or export it directly.")]
    ApiKeyMissing,

    #[error("Channel not found: {0}")]
    ChannelNotFound(String),

    #[error("Malformed API response: {0}")]
    MalformedResponse(String),

    #[error("YouTube API error: {0}")]
    Api(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
