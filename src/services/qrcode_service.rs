// src/services/qrcode_service.rs

use image::{DynamicImage, ImageOutputFormat, Luma};
use qrcode::{EcLevel, QrCode};

use crate::common::error::AppError;

const QR_SIZE_PX: u32 = 256;

// QR Code impresso na mesa, levando o cliente ao formulário de feedback.
#[derive(Clone)]
pub struct QrCodeService {
    public_base_url: String,
}

impl QrCodeService {
    pub fn new(public_base_url: &str) -> Self {
        Self {
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn feedback_url(&self, table_id: u32) -> String {
        format!("{}/#/feedback/{}", self.public_base_url, table_id)
    }

    pub fn render_feedback_png(&self, table_id: u32) -> Result<Vec<u8>, AppError> {
        let url = self.feedback_url(table_id);

        let code = QrCode::with_error_correction_level(url.as_bytes(), EcLevel::H)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        let image_buffer = code
            .render::<Luma<u8>>()
            .quiet_zone(true)
            .min_dimensions(QR_SIZE_PX, QR_SIZE_PX)
            .build();

        let mut png = Vec::new();
        DynamicImage::ImageLuma8(image_buffer)
            .write_to(&mut png, ImageOutputFormat::Png)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        Ok(png)
    }
}
