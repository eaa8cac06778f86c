// One error type for the whole pad.
// Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Creating the window failed
    #[error("Window init error: {0}")]
    WindowInit(String),
    /// Updating the window buffer failed
    #[error("Window update error: {0}")]
    WindowUpdate(String),
    /// Reading, parsing or validating the settings file failed
    #[error("Settings error: {0}")]
    Settings(String),
    /// PNG encoding of the export failed
    #[error("Encode error: {0}")]
    Encode(#[from] image::ImageError),
    /// Writing the exported file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Settings(e.to_string())
    }
}
