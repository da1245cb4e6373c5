use base64::Engine;
use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader};
use std::io::Cursor;

use crate::error::SimplifyError;

// ── Decoded screenshot ───────────────────────────────────────────────────────

#[derive(Debug)]
pub struct DecodedImage {
    pub image: DynamicImage,
    /// Original encoded bytes, forwarded to the completion service unchanged.
    pub bytes: Vec<u8>,
    /// MIME type forwarded to the completion service as `inline_data.mime_type`.
    pub mime_type: &'static str,
    pub width: u32,
    pub height: u32,
}

// ── Decoder ──────────────────────────────────────────────────────────────────

/// Decode a base64 screenshot, tolerating a data-URL header.
///
/// Browsers hand captures over as `data:image/png;base64,<payload>`; anything
/// up to and including the `base64,` marker is stripped before decoding.
pub fn decode_image(base64_string: &str) -> Result<DecodedImage, SimplifyError> {
    let payload = match base64_string.split_once("base64,") {
        Some((_, rest)) => rest,
        None => base64_string,
    };

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| SimplifyError::Decode(format!("Invalid base64 image data: {}", e)))?;

    decode_bytes(bytes)
}

fn decode_bytes(bytes: Vec<u8>) -> Result<DecodedImage, SimplifyError> {
    let reader = ImageReader::new(Cursor::new(&bytes))
        .with_guessed_format()
        .map_err(|e| SimplifyError::Decode(format!("Cannot detect image format: {}", e)))?;

    let format = reader.format();
    let image = reader
        .decode()
        .map_err(|e| SimplifyError::Decode(format!("Invalid image data: {}", e)))?;

    let (width, height) = image.dimensions();
    Ok(DecodedImage {
        image,
        bytes,
        mime_type: mime_for_format(format),
        width,
        height,
    })
}

fn mime_for_format(format: Option<ImageFormat>) -> &'static str {
    match format {
        Some(ImageFormat::Jpeg) => "image/jpeg",
        Some(ImageFormat::Gif) => "image/gif",
        Some(ImageFormat::WebP) => "image/webp",
        // Screenshot captures default to PNG.
        _ => "image/png",
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::RgbaImage;

    /// A tiny in-memory PNG, base64-encoded, for round-trip tests.
    pub(crate) fn test_png_base64(width: u32, height: u32) -> String {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width,
            height,
            image::Rgba([120, 40, 200, 255]),
        ));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        base64::engine::general_purpose::STANDARD.encode(buf.into_inner())
    }

    #[test]
    fn bare_base64_round_trips_dimensions() {
        let encoded = test_png_base64(17, 9);
        let decoded = decode_image(&encoded).unwrap();
        assert_eq!((decoded.width, decoded.height), (17, 9));
        assert_eq!(decoded.mime_type, "image/png");
    }

    #[test]
    fn data_url_prefix_is_stripped() {
        let encoded = format!("data:image/png;base64,{}", test_png_base64(32, 24));
        let decoded = decode_image(&encoded).unwrap();
        assert_eq!((decoded.width, decoded.height), (32, 24));
    }

    #[test]
    fn malformed_base64_is_a_decode_error() {
        let err = decode_image("this is !!! not base64").unwrap_err();
        assert!(matches!(err, SimplifyError::Decode(_)));
    }

    #[test]
    fn valid_base64_of_non_image_is_a_decode_error() {
        let encoded = base64::engine::general_purpose::STANDARD.encode(b"just some text");
        let err = decode_image(&encoded).unwrap_err();
        assert!(matches!(err, SimplifyError::Decode(_)));
    }

    #[test]
    fn empty_input_is_a_decode_error() {
        assert!(matches!(
            decode_image("").unwrap_err(),
            SimplifyError::Decode(_)
        ));
    }

    #[test]
    fn original_bytes_are_preserved() {
        use base64::Engine;
        let encoded = test_png_base64(8, 8);
        let raw = base64::engine::general_purpose::STANDARD
            .decode(&encoded)
            .unwrap();
        let decoded = decode_image(&encoded).unwrap();
        assert_eq!(decoded.bytes, raw);
    }
}
