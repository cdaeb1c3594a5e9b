//! Domain error types.

/// Top-level error type for tranchedesk.
#[derive(Debug, thiserror::Error)]
pub enum TrancheError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("unknown tranche: {id}")]
    UnknownTranche { id: String },

    #[error("invalid draft {field}: {reason}")]
    InvalidDraft { field: String, reason: String },

    #[error("invalid order '{order}': {reason}")]
    InvalidOrder { order: String, reason: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TrancheError {
    pub fn unknown_tranche(id: &str) -> Self {
        TrancheError::UnknownTranche { id: id.to_string() }
    }
}

impl From<&TrancheError> for std::process::ExitCode {
    fn from(err: &TrancheError) -> Self {
        let code: u8 = match err {
            TrancheError::Io(_) | TrancheError::Csv(_) => 1,
            TrancheError::ConfigParse { .. } | TrancheError::ConfigInvalid { .. } => 2,
            TrancheError::UnknownTranche { .. } => 3,
            TrancheError::InvalidDraft { .. } | TrancheError::InvalidOrder { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
