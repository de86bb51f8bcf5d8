use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Persisted student record. `qr_code` holds the rendered SVG encoding
/// the public verification URL for the student's matric number.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Student {
    pub id: Uuid,
    pub matric: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub course: String,
    pub level: String,
    pub section: String,
    pub image: Option<String>,
    pub qr_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public identity fields returned by the QR verification endpoint.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct StudentVerification {
    pub matric: String,
    pub first_name: String,
    pub last_name: String,
    pub course: String,
    pub level: String,
    pub section: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterStudentRequest {
    #[validate(length(min = 2))]
    pub matric: String,
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(length(min = 1))]
    pub gender: String,
    #[validate(length(min = 2))]
    pub course: String,
    #[validate(length(min = 1))]
    pub level: String,
    #[validate(length(min = 1))]
    pub section: String,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentRequest {
    #[validate(length(min = 2))]
    pub matric: Option<String>,
    #[validate(length(min = 1))]
    pub first_name: Option<String>,
    #[validate(length(min = 1))]
    pub last_name: Option<String>,
    #[validate(length(min = 1))]
    pub gender: Option<String>,
    #[validate(length(min = 2))]
    pub course: Option<String>,
    #[validate(length(min = 1))]
    pub level: Option<String>,
    #[validate(length(min = 1))]
    pub section: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct SearchQuery {
    /// Substring matched against first and last names.
    pub name: String,
}
