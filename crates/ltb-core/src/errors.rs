/// Core error type for the bot.
///
/// Adapter crates map their specific errors into this type so the run
/// controller can handle failures consistently (run-aborting vs per-ad).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("listings source error: {0}")]
    Source(String),

    #[error("delivery error: {0}")]
    Delivery(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
