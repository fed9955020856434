use thiserror::Error;

/// Main error type for trace validation operations
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("Capture read error: {0}")]
    Capture(#[from] std::io::Error),

    #[error("Frame invalid: {0}")]
    FrameInvalid(String),

    #[error("Invalid hex payload: {0}")]
    InvalidHex(String),

    #[error("LLC header check failed for couple {couple}")]
    LlcValidation { couple: usize },

    #[error("No decodable request/response APDU pair in couple {couple}")]
    RequestResponseValidation { couple: usize },

    #[error("APDU pairing check failed for couple {couple}")]
    PairValidation { couple: usize },

    #[error("APDU detail check failed for couple {couple}")]
    DetailValidation { couple: usize },
}

/// Result type alias for trace validation operations
pub type TraceResult<T> = Result<T, TraceError>;
