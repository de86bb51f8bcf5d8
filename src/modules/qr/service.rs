use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};

use crate::utils::errors::AppError;

/// Module pixel size bounds; the default matches the upstream renderer.
pub const DEFAULT_PIXEL_SIZE: u32 = 10;
const MAX_PIXEL_SIZE: u32 = 40;

pub struct QrService;

impl QrService {
    /// Renders `content` as a black-on-white SVG QR code with error
    /// correction level Q. `size` is the pixel width of one module.
    pub fn render_svg(content: &str, size: u32) -> Result<String, AppError> {
        if content.trim().is_empty() {
            return Err(AppError::bad_request("Content cannot be empty"));
        }

        let size = size.clamp(1, MAX_PIXEL_SIZE);

        let code = QrCode::with_error_correction_level(content, EcLevel::Q)
            .map_err(|e| AppError::bad_request(format!("Failed to encode content: {e}")))?;

        let modules = code.width() as u32;
        let dimension = modules * size;

        let rendered = code
            .render::<svg::Color>()
            .min_dimensions(dimension, dimension)
            .quiet_zone(true)
            .dark_color(svg::Color("#000000"))
            .light_color(svg::Color("#ffffff"))
            .build();

        Ok(rendered)
    }
}
