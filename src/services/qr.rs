use crate::error::GatewayError;
use image::{codecs::png::PngEncoder, ExtendedColorType, ImageEncoder, Rgba, RgbaImage};
use qrcode::{Color, EcLevel, QrCode};

const MODULE_SIZE: u32 = 10;
const BORDER_MODULES: u32 = 4;

/// Renders a wallet address as PNG bytes: error correction L, 10 px
/// modules, 4-module quiet zone, opaque black modules on a transparent
/// background.
pub fn render_wallet_qr(wallet: &str) -> Result<Vec<u8>, GatewayError> {
    let code = QrCode::with_error_correction_level(wallet.as_bytes(), EcLevel::L)
        .map_err(|e| GatewayError::QrEncoding(e.to_string()))?;

    let width = code.width() as u32;
    let side = (width + 2 * BORDER_MODULES) * MODULE_SIZE;
    let mut img = RgbaImage::from_pixel(side, side, Rgba([0, 0, 0, 0]));

    for (i, color) in code.to_colors().iter().enumerate() {
        if *color != Color::Dark {
            continue;
        }
        let x0 = (i as u32 % width + BORDER_MODULES) * MODULE_SIZE;
        let y0 = (i as u32 / width + BORDER_MODULES) * MODULE_SIZE;
        for dy in 0..MODULE_SIZE {
            for dx in 0..MODULE_SIZE {
                img.put_pixel(x0 + dx, y0 + dy, Rgba([0, 0, 0, 255]));
            }
        }
    }

    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(img.as_raw(), side, side, ExtendedColorType::Rgba8)
        .map_err(|e| GatewayError::QrEncoding(e.to_string()))?;

    Ok(bytes)
}
