use kube::core::ErrorResponse;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// An operation failed; the message is surfaced as-is.
    #[error("{0}")]
    OperationFailed(String),

    #[error("Resource not found: {resource} {name} in namespace {namespace}")]
    NotFound {
        resource: String,
        name: String,
        namespace: String,
    },

    #[error("Resource already exists: {resource} {name} in namespace {namespace}")]
    AlreadyExists {
        resource: String,
        name: String,
        namespace: String,
    },

    #[error("No object returned for {verb} {resource}")]
    EmptyResponse { verb: String, resource: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error(transparent)]
    Kube(#[from] kube::Error),
}

impl Error {
    /// Shorthand for [`Error::OperationFailed`]
    pub fn failed(message: impl Into<String>) -> Self {
        Error::OperationFailed(message.into())
    }

    /// Convert into the `kube::Error::Api` a real API server would produce
    pub fn into_kube_err(self) -> kube::Error {
        let (code, reason) = match &self {
            Error::NotFound { .. } | Error::EmptyResponse { .. } => (404, "NotFound"),
            Error::AlreadyExists { .. } => (409, "AlreadyExists"),
            Error::InvalidRequest(_) => (400, "BadRequest"),
            Error::Kube(kube::Error::Api(response)) => {
                return kube::Error::Api(response.clone());
            }
            _ => (500, "InternalError"),
        };

        kube::Error::Api(ErrorResponse {
            status: "Failure".to_string(),
            message: self.to_string(),
            reason: reason.to_string(),
            code,
        })
    }
}
