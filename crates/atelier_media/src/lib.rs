//! Image decoding and thumbnail renditions for Atelier.
//!
//! Everything here is local computation: decode once, derive the bounded
//! thumbnail, and encode the three renditions the pipeline uploads (JPEG,
//! lossy WebP, and the background-removed lossless alpha WebP).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use atelier_error::{AtelierResult, MediaError, MediaErrorKind};
use image::DynamicImage;
use image::imageops::FilterType;
use tracing::debug;

/// Thumbnails are bounded to this many pixels on the longer side.
pub const THUMB_MAX_DIM: u32 = 1000;

/// JPEG and lossy WebP thumbnail quality.
pub const THUMB_QUALITY: u8 = 80;

/// Dimensions and detected format of a decoded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    /// Pixel width
    pub width: u32,
    /// Pixel height
    pub height: u32,
    /// Detected format name, lowercase (e.g. "png")
    pub format: String,
}

/// Decode image bytes and report their dimensions and format.
///
/// This runs before any remote call so malformed submissions fail the item
/// without touching the store.
pub fn probe_image(bytes: &[u8]) -> AtelierResult<(DynamicImage, ImageInfo)> {
    let format = image::guess_format(bytes)
        .map_err(|e| MediaError::new(MediaErrorKind::Decode(format!("unknown format: {e}"))))?;
    let image = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| MediaError::new(MediaErrorKind::Decode(e.to_string())))?;
    let info = ImageInfo {
        width: image.width(),
        height: image.height(),
        format: format
            .extensions_str()
            .first()
            .copied()
            .unwrap_or("unknown")
            .to_string(),
    };
    debug!(width = info.width, height = info.height, format = %info.format, "Decoded image");
    Ok((image, info))
}

/// Aspect-preserving resize bounded to [`THUMB_MAX_DIM`].
///
/// Images already within the bound are returned unscaled; thumbnails never
/// upscale.
pub fn bounded_thumbnail(image: &DynamicImage) -> DynamicImage {
    if image.width() <= THUMB_MAX_DIM && image.height() <= THUMB_MAX_DIM {
        return image.clone();
    }
    image.resize(THUMB_MAX_DIM, THUMB_MAX_DIM, FilterType::Lanczos3)
}

/// Encode as baseline JPEG at [`THUMB_QUALITY`], flattening any alpha or
/// luminance-alpha mode to opaque RGB.
pub fn encode_jpeg(image: &DynamicImage) -> AtelierResult<Vec<u8>> {
    let rgb = image.to_rgb8();
    let mut out = Vec::new();
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, THUMB_QUALITY);
    rgb.write_with_encoder(encoder)
        .map_err(|e| MediaError::new(MediaErrorKind::Encode(format!("jpeg: {e}"))))?;
    Ok(out)
}

/// Encode as lossy WebP at [`THUMB_QUALITY`].
pub fn encode_webp(image: &DynamicImage) -> AtelierResult<Vec<u8>> {
    let rgb = image.to_rgb8();
    let encoded = webp::Encoder::from_rgb(rgb.as_raw(), rgb.width(), rgb.height())
        .encode(f32::from(THUMB_QUALITY));
    Ok(encoded.to_vec())
}

/// Encode as lossless WebP, preserving the alpha channel.
pub fn encode_webp_lossless(image: &DynamicImage) -> AtelierResult<Vec<u8>> {
    let rgba = image.to_rgba8();
    let encoded =
        webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height()).encode_lossless();
    Ok(encoded.to_vec())
}

/// Build the alpha thumbnail from background-removed bytes: decode as RGBA,
/// bounded resize, lossless WebP.
pub fn alpha_thumbnail(bytes: &[u8]) -> AtelierResult<Vec<u8>> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| MediaError::new(MediaErrorKind::Decode(format!("alpha image: {e}"))))?;
    let rgba = DynamicImage::ImageRgba8(image.to_rgba8());
    encode_webp_lossless(&bounded_thumbnail(&rgba))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let buffer = ImageBuffer::from_pixel(width, height, Rgba([120u8, 30, 200, 255]));
        let image = DynamicImage::ImageRgba8(buffer);
        let mut out = Cursor::new(Vec::new());
        image.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn probe_reports_dimensions_and_format() {
        let bytes = png_bytes(64, 48);
        let (_, info) = probe_image(&bytes).unwrap();
        assert_eq!((info.width, info.height), (64, 48));
        assert_eq!(info.format, "png");
    }

    #[test]
    fn probe_rejects_garbage() {
        let err = probe_image(b"not an image").unwrap_err();
        assert!(format!("{err}").contains("decode"));
    }

    #[test]
    fn thumbnail_bounds_but_never_upscales() {
        let bytes = png_bytes(2000, 500);
        let (image, _) = probe_image(&bytes).unwrap();
        let thumb = bounded_thumbnail(&image);
        assert_eq!(thumb.width(), THUMB_MAX_DIM);
        assert_eq!(thumb.height(), 250);

        let small = png_bytes(64, 48);
        let (image, _) = probe_image(&small).unwrap();
        let thumb = bounded_thumbnail(&image);
        assert_eq!((thumb.width(), thumb.height()), (64, 48));
    }

    #[test]
    fn jpeg_rendition_is_opaque_and_decodable() {
        let buffer = ImageBuffer::from_pixel(32, 32, Rgba([10u8, 20, 30, 128]));
        let image = DynamicImage::ImageRgba8(buffer);
        let jpeg = encode_jpeg(&image).unwrap();
        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!(decoded.color().channel_count(), 3);
    }

    #[test]
    fn webp_renditions_decode_back() {
        let bytes = png_bytes(40, 40);
        let (image, _) = probe_image(&bytes).unwrap();
        let lossy = encode_webp(&image).unwrap();
        assert_eq!(image::guess_format(&lossy).unwrap(), image::ImageFormat::WebP);
        let lossless = encode_webp_lossless(&image).unwrap();
        assert_eq!(
            image::guess_format(&lossless).unwrap(),
            image::ImageFormat::WebP
        );
    }

    #[test]
    fn alpha_thumbnail_preserves_transparency() {
        let buffer = ImageBuffer::from_pixel(1200, 1200, Rgba([0u8, 0, 0, 0]));
        let image = DynamicImage::ImageRgba8(buffer);
        let mut out = Cursor::new(Vec::new());
        image.write_to(&mut out, image::ImageFormat::Png).unwrap();

        let webp_bytes = alpha_thumbnail(&out.into_inner()).unwrap();
        let decoded = image::load_from_memory(&webp_bytes).unwrap();
        assert_eq!(decoded.width(), THUMB_MAX_DIM);
        assert!(decoded.color().has_alpha());
    }
}
