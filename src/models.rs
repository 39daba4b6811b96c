use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::RecordCategory;

/// Missing fields read as empty, so incomplete credentials are rejected as
/// invalid rather than as a malformed body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginReqDto {
    #[schema(example = "salary_admin")]
    #[serde(default)]
    pub username: String,
    #[schema(example = "salary@123")]
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    #[schema(example = true)]
    pub success: bool,
    pub role: RecordCategory,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Record updated")]
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedResponse {
    #[schema(example = "Record added")]
    pub message: String,
    #[schema(example = 42)]
    pub id: u64,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}
