//! Image codec - raster images to and from stored blobs
//!
//! Blobs are self-contained PNG files. Uploads in other formats are decoded
//! and re-encoded on the way in; nothing is resized or recompressed beyond that.

use std::io::Cursor;
use std::path::Path;
use image::{DynamicImage, ImageFormat, RgbaImage};
use crate::{Error, Result};

/// Upload extensions accepted by [`load_upload`]
pub const UPLOAD_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Encode an image as a PNG blob
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, ImageFormat::Png)?;
    let blob = buf.into_inner();
    tracing::debug!(
        width = image.width(),
        height = image.height(),
        bytes = blob.len(),
        "Encoded PNG blob"
    );
    Ok(blob)
}

/// Decode a stored blob back into an image
pub fn decode(blob: &[u8]) -> Result<DynamicImage> {
    Ok(image::load_from_memory(blob)?)
}

/// Read an uploaded image file and convert it to a PNG blob
pub fn load_upload(path: &Path) -> Result<Vec<u8>> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    if !UPLOAD_EXTENSIONS.contains(&ext.as_str()) {
        return Err(Error::UnsupportedUpload(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    let image = image::load_from_memory(&bytes)?;
    encode_png(&image)
}

/// Encode raw RGBA8 pixel data (e.g. a drawing canvas) as a PNG blob
pub fn rgba_to_png(width: u32, height: u32, pixels: Vec<u8>) -> Result<Vec<u8>> {
    let expected = width as usize * height as usize * 4;
    let actual = pixels.len();
    let buffer = RgbaImage::from_raw(width, height, pixels).ok_or_else(|| {
        Error::InvalidCanvas(format!(
            "{}x{} RGBA needs {} bytes, got {}",
            width, height, expected, actual
        ))
    })?;
    encode_png(&DynamicImage::ImageRgba8(buffer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 7) as u8, (y * 13) as u8, (x ^ y) as u8, 200])
        })
    }

    #[test]
    fn test_png_is_lossless() {
        let original = DynamicImage::ImageRgba8(gradient(31, 17));

        let blob = encode_png(&original).unwrap();
        assert!(blob.starts_with(b"\x89PNG"));

        let decoded = decode(&blob).unwrap();
        assert_eq!(decoded.width(), 31);
        assert_eq!(decoded.height(), 17);
        assert_eq!(decoded.to_rgba8().as_raw(), original.to_rgba8().as_raw());
    }

    #[test]
    fn test_decode_garbage_is_malformed() {
        let err = decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, Error::MalformedImage(_)));
    }

    #[test]
    fn test_rgba_to_png() {
        let pixels = gradient(4, 3).into_raw();
        let blob = rgba_to_png(4, 3, pixels.clone()).unwrap();
        assert_eq!(decode(&blob).unwrap().to_rgba8().into_raw(), pixels);
    }

    #[test]
    fn test_rgba_to_png_size_mismatch() {
        let err = rgba_to_png(4, 3, vec![0; 10]).unwrap_err();
        assert!(matches!(err, Error::InvalidCanvas(_)));
    }

    #[test]
    fn test_load_upload_reencodes_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.JPG");
        DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(gradient(8, 8)).to_rgb8())
            .save_with_format(&path, ImageFormat::Jpeg)
            .unwrap();

        let blob = load_upload(&path).unwrap();
        assert_eq!(image::guess_format(&blob).unwrap(), ImageFormat::Png);
        let decoded = decode(&blob).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 8));
    }

    #[test]
    fn test_load_upload_rejects_other_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.gif");
        std::fs::write(&path, b"GIF89a").unwrap();

        assert!(matches!(load_upload(&path), Err(Error::UnsupportedUpload(_))));
    }
}
