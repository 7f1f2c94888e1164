use std::io::Cursor;

use image::{imageops, DynamicImage, ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};

use super::GeneratorError;

#[cfg_attr(test, mockall::automock)]
pub trait QrCodeGenerator: Send + Sync {
    /// Encode `content` as a square PNG of `size` pixels
    fn generate(&self, content: &str, level: EcLevel, size: u32)
        -> Result<Vec<u8>, GeneratorError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PngQrCodeGenerator;

impl PngQrCodeGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl QrCodeGenerator for PngQrCodeGenerator {
    fn generate(
        &self,
        content: &str,
        level: EcLevel,
        size: u32,
    ) -> Result<Vec<u8>, GeneratorError> {
        let code = QrCode::with_error_correction_level(content.as_bytes(), level)
            .map_err(|e| GeneratorError::QrCode(e.to_string()))?;

        let mut rendered = code
            .render::<Luma<u8>>()
            .min_dimensions(size, size)
            .build();

        // The renderer rounds up to whole modules
        if rendered.width() != size || rendered.height() != size {
            rendered = imageops::resize(&rendered, size, size, imageops::FilterType::Nearest);
        }

        let mut bytes = Vec::new();
        DynamicImage::ImageLuma8(rendered).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }
}
