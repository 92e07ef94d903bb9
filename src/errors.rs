use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecopyError {
    #[error("Clipboard initialization failed: {0}")]
    ClipboardInitError(String),

    #[error("Clipboard write failed: {0}")]
    ClipboardWriteError(String),

    #[error("IO Error: {0}")]
    IoError(String),

    #[error("Cannot read root directory {0}: {1}")]
    RootUnreadable(String, String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<std::io::Error> for RecopyError {
    fn from(err: std::io::Error) -> Self {
        RecopyError::IoError(err.to_string())
    }
}
