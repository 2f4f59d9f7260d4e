//! Domain error types.

/// Top-level error type for bbrsi.
#[derive(Debug, thiserror::Error)]
pub enum HyperoptError {
    #[error("missing field: table has no '{column}' column")]
    MissingField { column: String },

    #[error("unknown trigger for {dimension}: '{value}'")]
    UnknownTrigger { dimension: String, value: String },

    #[error("missing parameter: {name}")]
    MissingParameter { name: String },

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

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

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&HyperoptError> for std::process::ExitCode {
    fn from(err: &HyperoptError) -> Self {
        let code: u8 = match err {
            HyperoptError::Io(_) => 1,
            HyperoptError::ConfigParse { .. }
            | HyperoptError::ConfigMissing { .. }
            | HyperoptError::ConfigInvalid { .. } => 2,
            HyperoptError::Data { .. } => 3,
            HyperoptError::UnknownTrigger { .. }
            | HyperoptError::MissingParameter { .. }
            | HyperoptError::InvalidParameter { .. } => 4,
            HyperoptError::MissingField { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
