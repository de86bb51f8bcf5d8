use axum::Json;
use tracing::instrument;

use crate::modules::qr::model::{QrRequest, QrResponse};
use crate::modules::qr::service::{DEFAULT_PIXEL_SIZE, QrService};
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::ValidatedJson;

/// Render arbitrary content as an SVG QR code
#[utoipa::path(
    post,
    path = "/api/v1/qr/generate",
    request_body = QrRequest,
    responses(
        (status = 200, description = "Rendered QR code", body = QrResponse),
        (status = 400, description = "Empty or unencodable content", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "QR"
)]
#[instrument(skip(dto))]
pub async fn generate_qr(
    ValidatedJson(dto): ValidatedJson<QrRequest>,
) -> Result<Json<QrResponse>, AppError> {
    let size = dto.size.unwrap_or(DEFAULT_PIXEL_SIZE);
    let svg = QrService::render_svg(&dto.content, size)?;

    Ok(Json(QrResponse {
        svg,
        content: dto.content,
        size,
    }))
}
