use sqlx::PgPool;
use tracing::{instrument, warn};

use crate::config::jwt::JwtConfig;
use crate::modules::admins::model::{Admin, Status};
use crate::modules::admins::service::AdminService;
use crate::modules::auth::model::{ChangePasswordRequest, LoginRequest, LoginResponse};
use crate::security::token::issue_access_token;
use crate::utils::errors::AppError;
use crate::utils::password::{hash_password, verify_password};

pub struct AuthService;

impl AuthService {
    /// Authenticates an admin and issues an access token.
    ///
    /// Invalid credentials, an inactive account and an insufficient tier
    /// all fail with 401; the messages are stable but deliberately do not
    /// reveal whether the email exists.
    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login_admin(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let Some(admin) = AdminService::find_by_email(db, &dto.email).await? else {
            warn!("login attempt for unknown admin");
            return Err(AppError::unauthorized("Incorrect email or password"));
        };

        if !verify_password(&dto.password, &admin.hashed_password)? {
            warn!(admin = %admin.email, "failed login attempt");
            return Err(AppError::unauthorized("Incorrect email or password"));
        }

        if admin.status != Status::Active {
            return Err(AppError::unauthorized("Admin account is inactive"));
        }

        if !admin.has_full_access() {
            return Err(AppError::unauthorized("Insufficient admin privileges"));
        }

        AdminService::touch_last_login(db, admin.id).await?;

        let access_token = issue_access_token(
            &admin.id.to_string(),
            jwt_config.access_token_ttl,
            jwt_config,
        )?;

        AdminService::record_audit(
            db,
            admin.id,
            "LOGIN",
            "ADMIN",
            &admin.id.to_string(),
            serde_json::json!({ "email": admin.email }),
        )
        .await;

        Ok(LoginResponse {
            access_token,
            token_type: "bearer".to_string(),
        })
    }

    /// Replaces the admin's password after verifying the current one and
    /// clears any pending mandatory change.
    #[instrument(skip(db, admin, dto))]
    pub async fn change_password(
        db: &PgPool,
        admin: &Admin,
        dto: ChangePasswordRequest,
    ) -> Result<(), AppError> {
        if !verify_password(&dto.current_password, &admin.hashed_password)? {
            warn!(admin = %admin.email, "password change with wrong current password");
            return Err(AppError::unauthorized("Incorrect current password"));
        }

        let hashed_password = hash_password(&dto.new_password)?;
        AdminService::update_password(db, admin.id, &hashed_password).await?;

        AdminService::record_audit(
            db,
            admin.id,
            "PASSWORD_CHANGED",
            "ADMIN",
            &admin.id.to_string(),
            serde_json::json!({ "email": admin.email }),
        )
        .await;

        Ok(())
    }
}
