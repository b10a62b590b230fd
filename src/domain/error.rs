//! Domain error types.
//!
//! Arithmetic edge cases (zero denominators, short history) never surface
//! here: the stage that creates them absorbs them as NaN cells. Only
//! structural mismatches at the panel boundary and configuration problems
//! are fatal.

/// Top-level error type for quantmom.
#[derive(Debug, thiserror::Error)]
pub enum QuantmomError {
    #[error("panel shape mismatch: {reason}")]
    ShapeMismatch { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("no data for {code} on {exchange}")]
    NoData { code: String, exchange: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn exit_code(err: &QuantmomError) -> u8 {
    match err {
        QuantmomError::Io(_) => 1,
        QuantmomError::ConfigParse { .. }
        | QuantmomError::ConfigMissing { .. }
        | QuantmomError::ConfigInvalid { .. } => 2,
        QuantmomError::Data { .. } | QuantmomError::NoData { .. } => 3,
        QuantmomError::ShapeMismatch { .. } => 4,
    }
}

impl From<&QuantmomError> for std::process::ExitCode {
    fn from(err: &QuantmomError) -> Self {
        std::process::ExitCode::from(exit_code(err))
    }
}
