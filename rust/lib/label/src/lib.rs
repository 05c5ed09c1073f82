//! Printable codes for box links.
//!
//! Given the public URL of a box, produce either a square QR code (PNG)
//! or a 2×1 label carrying the code and the box name (SVG).

pub mod error;
pub mod label;
pub mod qr;

pub use error::LabelError;
pub use label::render_label_svg;
pub use qr::{render_qr_png, DEFAULT_SIZE};

/// Which image to produce for a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelStyle {
    /// Rectangular label with code and name.
    #[default]
    Label,
    /// Square code only.
    Qr,
}

impl LabelStyle {
    /// Parse the `style` query value. `"qr"` selects the square code;
    /// anything else, including no value, selects the label.
    pub fn from_query(style: Option<&str>) -> Self {
        match style.map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("qr") => LabelStyle::Qr,
            _ => LabelStyle::Label,
        }
    }
}

/// Encoded image plus its media type.
#[derive(Debug, Clone)]
pub struct RenderedImage {
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Render the image for a box.
///
/// `size` only applies to [`LabelStyle::Qr`]; labels have a fixed size.
pub fn render(style: LabelStyle, name: &str, url: &str, size: u32) -> Result<RenderedImage, LabelError> {
    match style {
        LabelStyle::Qr => Ok(RenderedImage {
            content_type: "image/png",
            bytes: render_qr_png(url, size)?,
        }),
        LabelStyle::Label => Ok(RenderedImage {
            content_type: "image/svg+xml",
            bytes: render_label_svg(name, url)?,
        }),
    }
}
