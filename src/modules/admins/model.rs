use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Role tier of a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "admin_tier", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Student,
    Admin,
}

/// Account status of a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "admin_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Inactive,
    Banned,
    Suspended,
    Deleted,
}

/// Persisted admin record. Never serialized directly; responses go
/// through [`AdminResponse`] so the password hash stays internal.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Admin {
    pub id: Uuid,
    pub email: String,
    pub hashed_password: String,
    pub full_name: String,
    pub tier: Tier,
    pub status: Status,
    pub requires_password_change: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Admin {
    pub fn is_admin(&self) -> bool {
        self.tier == Tier::Admin
    }

    /// Full unrestricted access: admin tier and an active account.
    pub fn has_full_access(&self) -> bool {
        self.is_admin() && self.status == Status::Active
    }
}

/// Append-only record of an admin action.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct AdminAuditLog {
    pub id: Uuid,
    pub admin_id: Uuid,
    pub action: String,
    pub entity_type: String,
    pub entity_id: String,
    pub details: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAdminRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(length(min = 1))]
    pub full_name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminResponse {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub tier: Tier,
    pub status: Status,
    pub requires_password_change: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Admin> for AdminResponse {
    fn from(admin: Admin) -> Self {
        Self {
            id: admin.id,
            email: admin.email,
            full_name: admin.full_name,
            tier: admin.tier,
            status: admin.status,
            requires_password_change: admin.requires_password_change,
            last_login: admin.last_login,
            created_at: admin.created_at,
        }
    }
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct AuditLogQuery {
    /// Maximum number of entries to return (default 50, capped at 200).
    pub limit: Option<i64>,
}
