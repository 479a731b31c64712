//! Errors raised while generating a file.

use protobind_descriptor::LookupError;

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("{source}")]
    FileNotFound {
        #[source]
        source: LookupError,
    },

    /// A method's input or output type does not resolve.
    #[error("{file}: {service}.{method}: {source}")]
    TypeNotFound {
        file: String,
        service: String,
        method: String,
        #[source]
        source: LookupError,
    },

    /// The file breaks a structural rule of the selected dialect.
    #[error("{file}: unsupported input for {dialect}: {reason}")]
    UnsupportedInput {
        file: String,
        dialect: &'static str,
        reason: String,
    },

    #[error("unknown dialect: {0}")]
    UnknownDialect(String),

    #[error("invalid generator parameter: {0}")]
    InvalidParameter(String),
}

impl GenerateError {
    /// Whether the error is a failed registry lookup.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            GenerateError::FileNotFound { .. } | GenerateError::TypeNotFound { .. }
        )
    }
}
