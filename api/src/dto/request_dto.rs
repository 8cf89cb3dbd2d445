use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use si_core::domain::entities::Request;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewRequestDto {
    /// What the requester is looking for
    #[validate(length(min = 1, max = 1000))]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestDto {
    pub id: i64,
    pub requester_id: i64,
    pub description: String,
    pub created: DateTime<Utc>,
}

impl From<Request> for RequestDto {
    fn from(request: Request) -> Self {
        Self {
            id: request.id,
            requester_id: request.requester_id,
            description: request.description,
            created: request.created,
        }
    }
}
