//! SVG to PNG rasterization for exported previews

use crate::error::{OfferError, OfferResult};
use resvg::{tiny_skia, usvg};
use std::io::Cursor;
use std::sync::{Arc, OnceLock};

/// System fonts, loaded once on first export
fn font_database() -> Arc<usvg::fontdb::Database> {
    static FONTS: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();

    FONTS
        .get_or_init(|| {
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();
            tracing::debug!(faces = db.len(), "Font database loaded");
            Arc::new(db)
        })
        .clone()
}

/// Renders an SVG document onto a white canvas and encodes it as PNG.
pub fn svg_to_png(svg: &str) -> OfferResult<Vec<u8>> {
    let options = usvg::Options {
        fontdb: font_database(),
        ..usvg::Options::default()
    };
    let tree = usvg::Tree::from_str(svg, &options)
        .map_err(|e| OfferError::Internal(format!("svg parse: {}", e)))?;

    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| OfferError::Internal("zero-sized preview canvas".to_string()))?;
    pixmap.fill(tiny_skia::Color::WHITE);
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    // The canvas is opaque, so premultiplied RGBA equals straight RGBA
    let image = image::RgbaImage::from_raw(size.width(), size.height(), pixmap.take())
        .ok_or_else(|| OfferError::Internal("pixmap size mismatch".to_string()))?;

    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(|e| OfferError::Internal(format!("png encode: {}", e)))?;

    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_shapes_at_svg_size() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="20">
            <rect x="0" y="0" width="40" height="20" fill="#2563eb"/>
        </svg>"##;

        let png = svg_to_png(svg).unwrap();
        let decoded = image::load_from_memory_with_format(&png, image::ImageFormat::Png)
            .unwrap()
            .to_rgba8();
        assert_eq!(decoded.dimensions(), (40, 20));
        assert_eq!(decoded.get_pixel(20, 10).0, [0x25, 0x63, 0xeb, 0xff]);
    }

    #[test]
    fn malformed_svg_is_an_internal_error() {
        let err = svg_to_png("<svg").unwrap_err();
        assert!(matches!(err, OfferError::Internal(_)));
    }
}
