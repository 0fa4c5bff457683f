use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("Invalid configuration: {field} — {reason}")]
    InvalidConfiguration { field: String, reason: String },

    #[error("Financial impossibility: {0}")]
    FinancialImpossibility(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CorpusError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        CorpusError::InvalidConfiguration {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending config field, if this is a configuration error.
    pub fn field(&self) -> Option<&str> {
        match self {
            CorpusError::InvalidConfiguration { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CorpusError {
    fn from(e: serde_json::Error) -> Self {
        CorpusError::SerializationError(e.to_string())
    }
}
