use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    Internal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Failure while turning entity snapshots into a table payload.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{entity} {id} has no {relation}")]
    MissingRelation {
        entity: &'static str,
        id: i64,
        relation: &'static str,
    },
    #[error("failed to encode table payload: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<RenderError> for ApiError {
    fn from(value: RenderError) -> Self {
        Self::new(ErrorCode::Internal, value.to_string())
    }
}
