use std::io::Cursor;

use image::{GrayImage, ImageFormat, Luma};
use qrcode::{Color, QrCode};

use crate::error::LabelError;

/// Quiet zone around the code, in modules.
pub const BORDER: u32 = 1;

/// Default requested size for square codes, in pixels.
pub const DEFAULT_SIZE: u32 = 200;

/// Encode `url` into a QR symbol.
pub(crate) fn encode(url: &str) -> Result<QrCode, LabelError> {
    QrCode::new(url.as_bytes()).map_err(|e| LabelError::Encode(e.to_string()))
}

/// Pixels per module for a requested size: `size / 40`, never below 2.
pub fn module_scale(size: u32) -> u32 {
    (size / 40).max(2)
}

/// Dark/light grid of a symbol with the quiet zone applied.
pub(crate) struct Grid {
    colors: Vec<Color>,
    modules: u32,
}

impl Grid {
    pub(crate) fn new(code: &QrCode) -> Self {
        Self {
            colors: code.to_colors(),
            modules: code.width() as u32,
        }
    }

    /// Side length in modules, including the quiet zone on both sides.
    pub(crate) fn side(&self) -> u32 {
        self.modules + 2 * BORDER
    }

    /// Whether the module at (x, y), counted from the outer edge of the
    /// quiet zone, is dark.
    pub(crate) fn is_dark(&self, x: u32, y: u32) -> bool {
        if x < BORDER || y < BORDER {
            return false;
        }
        let (mx, my) = (x - BORDER, y - BORDER);
        if mx >= self.modules || my >= self.modules {
            return false;
        }
        self.colors[(my * self.modules + mx) as usize] == Color::Dark
    }
}

/// Render `url` as a black-on-white square PNG.
pub fn render_qr_png(url: &str, size: u32) -> Result<Vec<u8>, LabelError> {
    let grid = Grid::new(&encode(url)?);
    let scale = module_scale(size);
    let side = grid.side() * scale;

    let img = GrayImage::from_fn(side, side, |x, y| {
        if grid.is_dark(x / scale, y / scale) {
            Luma([0u8])
        } else {
            Luma([255u8])
        }
    });

    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|e| LabelError::Image(e.to_string()))?;
    Ok(buf)
}
