use {crate::format::FormatError, wallet_activity_decoder::DecodeError};

pub type ActivityResult<T> = Result<T, ActivityError>;

#[derive(Debug, thiserror::Error)]
pub enum ActivityError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("feed read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("pipeline error: {0}")]
    Pipeline(String),
}
