use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::admins::model::{
    AdminAuditLog, AdminResponse, CreateAdminRequest, Status, Tier,
};
use crate::modules::auth::model::{
    ChangePasswordRequest, LoginRequest, LoginResponse, MessageResponse,
};
use crate::modules::qr::model::{QrRequest, QrResponse};
use crate::modules::students::model::{
    RegisterStudentRequest, Student, StudentVerification, UpdateStudentRequest,
};
use crate::utils::errors::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::change_password,
        crate::modules::admins::controller::create_admin,
        crate::modules::admins::controller::get_me,
        crate::modules::admins::controller::list_audit_logs,
        crate::modules::students::controller::register_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::search_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::students::controller::verify_student,
        crate::modules::qr::controller::generate_qr,
    ),
    components(
        schemas(
            LoginRequest,
            LoginResponse,
            ChangePasswordRequest,
            MessageResponse,
            CreateAdminRequest,
            AdminResponse,
            AdminAuditLog,
            Tier,
            Status,
            Student,
            StudentVerification,
            RegisterStudentRequest,
            UpdateStudentRequest,
            QrRequest,
            QrResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Admin authentication endpoints"),
        (name = "Admins", description = "Admin account management"),
        (name = "Students", description = "Student registry and QR verification"),
        (name = "QR", description = "QR code rendering")
    ),
    info(
        title = "QRPass API",
        version = "0.1.0",
        description = "Student registration and QR issuance backend with JWT-secured admin access.",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
