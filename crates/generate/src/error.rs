use thiserror::Error;

/// Failure of a structured generation call. Always terminal for the caller.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("failed to reach generation provider: {0}")]
    Transport(String),

    #[error("generation provider returned {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("generation provider returned no text: {0}")]
    EmptyResponse(String),

    #[error("generated output is not valid JSON: {0}")]
    MalformedOutput(String),

    #[error("generated output does not match the expected shape: {0}")]
    SchemaMismatch(String),
}
