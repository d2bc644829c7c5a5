use thiserror::Error;

pub use reqwest::StatusCode;

/// Failure of a combined weather search. `Display` is the message shown to the user.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to fetch weather data.")]
    Current(#[source] RequestError),

    #[error("Failed to fetch forecast.")]
    Forecast(#[source] RequestError),
}

impl FetchError {
    pub fn request_error(&self) -> &RequestError {
        match self {
            FetchError::Current(e) | FetchError::Forecast(e) => e,
        }
    }
}

/// Why a single upstream request failed.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("request could not be sent: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream answered {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("response body is not valid JSON for this endpoint: {0}")]
    Decode(#[from] serde_json::Error),
}
