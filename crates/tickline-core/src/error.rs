use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The host could not report a rendered width this cycle
    #[error("Measurement unavailable for {region}: {reason}")]
    MeasurementUnavailable { region: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn measurement(region: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MeasurementUnavailable {
            region: region.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
