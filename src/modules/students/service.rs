use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::modules::admins::model::Admin;
use crate::modules::admins::service::AdminService;
use crate::modules::qr::service::{DEFAULT_PIXEL_SIZE, QrService};
use crate::modules::students::model::{
    RegisterStudentRequest, Student, StudentVerification, UpdateStudentRequest,
};
use crate::utils::errors::AppError;

const STUDENT_COLUMNS: &str = "id, matric, first_name, last_name, gender, course, level, \
                               section, image, qr_code, created_at, updated_at";

/// URL encoded into a student's QR code; scanning resolves the public
/// verification endpoint for the matric number.
fn verification_url(public_url: &str, matric: &str) -> String {
    format!("{public_url}/api/v1/student/verify/{matric}")
}

pub struct StudentService;

impl StudentService {
    #[instrument(skip(db, dto, admin))]
    pub async fn register_student(
        db: &PgPool,
        dto: RegisterStudentRequest,
        public_url: &str,
        admin: &Admin,
    ) -> Result<Student, AppError> {
        let qr_code = QrService::render_svg(
            &verification_url(public_url, &dto.matric),
            DEFAULT_PIXEL_SIZE,
        )?;

        let student = sqlx::query_as::<_, Student>(&format!(
            "INSERT INTO students (matric, first_name, last_name, gender, course, level, section, image, qr_code) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(&dto.matric)
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.gender)
        .bind(&dto.course)
        .bind(&dto.level)
        .bind(&dto.section)
        .bind(&dto.image)
        .bind(&qr_code)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(format!(
                        "Student with matric {} is already registered",
                        dto.matric
                    ));
                }
            }
            AppError::database(e)
        })?;

        AdminService::record_audit(
            db,
            admin.id,
            "STUDENT_REGISTERED",
            "STUDENT",
            &student.id.to_string(),
            serde_json::json!({
                "matric": student.matric,
                "course": student.course,
                "level": student.level,
                "section": student.section,
            }),
        )
        .await;

        info!(admin = %admin.email, matric = %student.matric, "student registered");
        Ok(student)
    }

    #[instrument(skip(db))]
    pub async fn list_students(db: &PgPool) -> Result<Vec<Student>, AppError> {
        let students = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students ORDER BY created_at DESC"
        ))
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        Ok(students)
    }

    #[instrument(skip(db))]
    pub async fn search_students(db: &PgPool, name: &str) -> Result<Vec<Student>, AppError> {
        let pattern = format!("%{name}%");

        let students = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students \
             WHERE first_name ILIKE $1 OR last_name ILIKE $1 \
             ORDER BY last_name, first_name"
        ))
        .bind(&pattern)
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        Ok(students)
    }

    #[instrument(skip(db))]
    pub async fn get_student(db: &PgPool, id: Uuid) -> Result<Student, AppError> {
        let student = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("Student not found"))?;

        Ok(student)
    }

    /// Partial update. The QR code is regenerated when the matric number
    /// changes, since it encodes the verification URL.
    #[instrument(skip(db, dto, admin))]
    pub async fn update_student(
        db: &PgPool,
        id: Uuid,
        dto: UpdateStudentRequest,
        public_url: &str,
        admin: &Admin,
    ) -> Result<Student, AppError> {
        let existing = Self::get_student(db, id).await?;

        let matric_changed = dto
            .matric
            .as_deref()
            .is_some_and(|m| m != existing.matric);

        let matric = dto.matric.unwrap_or(existing.matric);
        let first_name = dto.first_name.unwrap_or(existing.first_name);
        let last_name = dto.last_name.unwrap_or(existing.last_name);
        let gender = dto.gender.unwrap_or(existing.gender);
        let course = dto.course.unwrap_or(existing.course);
        let level = dto.level.unwrap_or(existing.level);
        let section = dto.section.unwrap_or(existing.section);
        let image = dto.image.or(existing.image);

        let qr_code = if matric_changed {
            QrService::render_svg(&verification_url(public_url, &matric), DEFAULT_PIXEL_SIZE)?
        } else {
            existing.qr_code
        };

        let student = sqlx::query_as::<_, Student>(&format!(
            "UPDATE students SET matric = $1, first_name = $2, last_name = $3, gender = $4, \
             course = $5, level = $6, section = $7, image = $8, qr_code = $9, updated_at = NOW() \
             WHERE id = $10 \
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(&matric)
        .bind(&first_name)
        .bind(&last_name)
        .bind(&gender)
        .bind(&course)
        .bind(&level)
        .bind(&section)
        .bind(&image)
        .bind(&qr_code)
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(format!(
                        "Student with matric {matric} is already registered"
                    ));
                }
            }
            AppError::database(e)
        })?;

        AdminService::record_audit(
            db,
            admin.id,
            "STUDENT_UPDATED",
            "STUDENT",
            &student.id.to_string(),
            serde_json::json!({ "matric": student.matric }),
        )
        .await;

        Ok(student)
    }

    #[instrument(skip(db, admin))]
    pub async fn delete_student(db: &PgPool, id: Uuid, admin: &Admin) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Student not found"));
        }

        AdminService::record_audit(
            db,
            admin.id,
            "STUDENT_DELETED",
            "STUDENT",
            &id.to_string(),
            serde_json::json!({}),
        )
        .await;

        Ok(())
    }

    /// Public lookup behind the QR verification URL.
    #[instrument(skip(db))]
    pub async fn verify_by_matric(
        db: &PgPool,
        matric: &str,
    ) -> Result<StudentVerification, AppError> {
        let student = sqlx::query_as::<_, StudentVerification>(
            "SELECT matric, first_name, last_name, course, level, section \
             FROM students WHERE matric = $1",
        )
        .bind(matric)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("Student not found"))?;

        Ok(student)
    }
}
