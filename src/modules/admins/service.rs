use sqlx::PgPool;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::config::bootstrap::BootstrapConfig;
use crate::modules::admins::model::{Admin, AdminAuditLog, CreateAdminRequest, Status, Tier};
use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

const ADMIN_COLUMNS: &str = "id, email, hashed_password, full_name, tier, status, \
                             requires_password_change, last_login, created_at";

pub struct AdminService;

impl AdminService {
    #[instrument(skip(db))]
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<Admin>, AppError> {
        let admin = sqlx::query_as::<_, Admin>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admins WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?;

        Ok(admin)
    }

    #[instrument(skip(db))]
    pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<Admin>, AppError> {
        let admin = sqlx::query_as::<_, Admin>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admins WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?;

        Ok(admin)
    }

    /// Creates a new admin account. Accounts created this way must change
    /// their password on first use.
    #[instrument(skip(db, dto))]
    pub async fn create_admin(
        db: &PgPool,
        dto: CreateAdminRequest,
        created_by: Uuid,
    ) -> Result<Admin, AppError> {
        let hashed_password = hash_password(&dto.password)?;

        let admin = sqlx::query_as::<_, Admin>(&format!(
            "INSERT INTO admins (email, hashed_password, full_name, tier, status, requires_password_change) \
             VALUES ($1, $2, $3, $4, $5, TRUE) \
             RETURNING {ADMIN_COLUMNS}"
        ))
        .bind(&dto.email)
        .bind(&hashed_password)
        .bind(&dto.full_name)
        .bind(Tier::Admin)
        .bind(Status::Active)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(format!(
                        "Admin with email {} already exists",
                        dto.email
                    ));
                }
            }
            AppError::database(e)
        })?;

        Self::record_audit(
            db,
            created_by,
            "ADMIN_CREATED",
            "ADMIN",
            &admin.id.to_string(),
            serde_json::json!({
                "email": admin.email,
                "requires_password_change": true,
            }),
        )
        .await;

        Ok(admin)
    }

    /// Seeds the initial admin account if it does not exist. Idempotent;
    /// called once at startup.
    pub async fn ensure_initial_admin(
        db: &PgPool,
        bootstrap: &BootstrapConfig,
    ) -> anyhow::Result<()> {
        if Self::find_by_email(db, &bootstrap.admin_email)
            .await
            .map_err(|e| e.error)?
            .is_some()
        {
            info!("initial admin already exists");
            return Ok(());
        }

        let hashed_password = hash_password(&bootstrap.admin_password).map_err(|e| e.error)?;

        let admin = sqlx::query_as::<_, Admin>(&format!(
            "INSERT INTO admins (email, hashed_password, full_name, tier, status) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {ADMIN_COLUMNS}"
        ))
        .bind(&bootstrap.admin_email)
        .bind(&hashed_password)
        .bind(&bootstrap.admin_name)
        .bind(Tier::Admin)
        .bind(Status::Active)
        .fetch_one(db)
        .await?;

        Self::record_audit(
            db,
            admin.id,
            "ADMIN_CREATED",
            "ADMIN",
            &admin.id.to_string(),
            serde_json::json!({ "email": admin.email, "bootstrap": true }),
        )
        .await;

        info!(email = %admin.email, "created initial admin");
        Ok(())
    }

    /// Writes an audit entry for an admin action. Failures are logged and
    /// never fail the triggering request.
    pub async fn record_audit(
        db: &PgPool,
        admin_id: Uuid,
        action: &str,
        entity_type: &str,
        entity_id: &str,
        details: serde_json::Value,
    ) {
        let result = sqlx::query(
            "INSERT INTO admin_audit_logs (admin_id, action, entity_type, entity_id, details) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(admin_id)
        .bind(action)
        .bind(entity_type)
        .bind(entity_id)
        .bind(details)
        .execute(db)
        .await;

        match result {
            Ok(_) => info!(action = %action, "audit log written"),
            Err(e) => error!(action = %action, "failed to write audit log: {e}"),
        }
    }

    #[instrument(skip(db))]
    pub async fn list_audit_logs(db: &PgPool, limit: i64) -> Result<Vec<AdminAuditLog>, AppError> {
        let limit = limit.clamp(1, 200);

        let logs = sqlx::query_as::<_, AdminAuditLog>(
            "SELECT id, admin_id, action, entity_type, entity_id, details, created_at \
             FROM admin_audit_logs ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        Ok(logs)
    }

    #[instrument(skip(db))]
    pub async fn touch_last_login(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE admins SET last_login = NOW() WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(AppError::database)?;

        Ok(())
    }

    /// Stores a new password hash and clears the pending-change flag.
    #[instrument(skip(db, hashed_password))]
    pub async fn update_password(
        db: &PgPool,
        id: Uuid,
        hashed_password: &str,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE admins SET hashed_password = $1, requires_password_change = FALSE \
             WHERE id = $2",
        )
        .bind(hashed_password)
        .bind(id)
        .execute(db)
        .await
        .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            warn!(admin_id = %id, "password update for unknown admin");
            return Err(AppError::not_found("Admin not found"));
        }

        Ok(())
    }
}
