use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Status envelope returned for submissions and errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusMessage {
    /// HTTP status code, as a string
    #[schema(example = "202")]
    pub status: String,

    /// Category label on success, otherwise the reason for failure
    #[schema(example = "Pre High")]
    pub message: String,
}

impl StatusMessage {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: status.to_string(),
            message: message.into(),
        }
    }
}
