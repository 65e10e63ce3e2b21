/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Base address or joined request URL could not be parsed.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    /// Network or request execution error from `reqwest`.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// Non-success HTTP status code with raw response body.
    #[error("http error {status}: {body}")]
    Http { status: u16, body: String },
    /// Response body is not valid JSON or does not match the record shape.
    #[error("decode error: {0}")]
    Decode(String),
    /// Writing the report to the output sink failed.
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}
