use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct QrRequest {
    #[validate(length(min = 1))]
    pub content: String,
    pub size: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QrResponse {
    pub svg: String,
    pub content: String,
    pub size: u32,
}
