use std::fmt::Write;

use crate::error::LabelError;
use crate::qr::{encode, Grid};

/// 2×1 inch label at 192 dpi, the common thermal label size.
pub const LABEL_WIDTH: u32 = 384;
pub const LABEL_HEIGHT: u32 = 192;

const QR_X: f64 = 10.0;
const QR_Y: f64 = 16.0;
const QR_SIDE: f64 = 160.0;
const TEXT_X: u32 = 200;
const TEXT_Y: u32 = 100;

/// Longest name printed on a label, in characters.
pub const MAX_NAME_CHARS: usize = 22;

/// Render a printable label: the QR code for `url` on the left and the
/// box name on the right, as an SVG document.
pub fn render_label_svg(name: &str, url: &str) -> Result<Vec<u8>, LabelError> {
    let grid = Grid::new(&encode(url)?);
    let module = QR_SIDE / f64::from(grid.side());

    let mut path = String::new();
    for y in 0..grid.side() {
        for x in 0..grid.side() {
            if grid.is_dark(x, y) {
                let px = QR_X + f64::from(x) * module;
                let py = QR_Y + f64::from(y) * module;
                let _ = write!(path, "M{px:.2} {py:.2}h{module:.2}v{module:.2}h-{module:.2}z");
            }
        }
    }

    let title: String = name.chars().take(MAX_NAME_CHARS).collect();
    let svg = format!(
        concat!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"##,
            r##"<rect width="100%" height="100%" fill="#fff"/>"##,
            r##"<path d="{path}" fill="#000" shape-rendering="crispEdges"/>"##,
            r##"<text x="{tx}" y="{ty}" font-family="sans-serif" font-size="18" fill="#000">{title}</text>"##,
            "</svg>\n",
        ),
        w = LABEL_WIDTH,
        h = LABEL_HEIGHT,
        path = path,
        tx = TEXT_X,
        ty = TEXT_Y,
        title = escape_xml(&title),
    );
    Ok(svg.into_bytes())
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
