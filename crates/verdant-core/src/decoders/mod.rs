//! Image decoders for the supported input formats
//!
//! Support for JPEG and PNG tray photographs.

mod jpeg;
mod png;


use std::path::Path;

/// Supported image extensions (matched case-insensitively)
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Decoded image data
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Interleaved RGB data, 8 bits per channel
    pub data: Vec<u8>,

    /// Number of channels (always 3 after decoding)
    pub channels: u8,
}

impl DecodedImage {
    /// View the pixel data as an `image::RgbImage` for processing
    pub fn to_rgb_image(&self) -> Result<image::RgbImage, String> {
        image::RgbImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| "Decoded buffer does not match image dimensions".to_string())
    }
}

/// Check whether a file extension belongs to a supported image format
///
/// Matching is case-insensitive: `JPG`, `jpg` and `Jpg` are all accepted.
pub fn is_supported_extension(ext: &str) -> bool {
    let ext = ext.to_lowercase();
    SUPPORTED_EXTENSIONS.iter().any(|&s| s == ext)
}

/// Validate that a path exists and carries a supported extension
///
/// Front ends call this before decoding so that a bad pick is reported
/// instead of crashing the session.
pub fn validate_input_path(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("File not found: {}", path.display()));
    }
    if !path.is_file() {
        return Err(format!("Not a file: {}", path.display()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| format!("No file extension found: {}", path.display()))?;

    if !is_supported_extension(extension) {
        return Err(format!(
            "Unsupported file format: {} (supported: {})",
            extension,
            SUPPORTED_EXTENSIONS.join(", ")
        ));
    }

    Ok(())
}

/// Decode an image from a file path
pub fn decode_image<P: AsRef<Path>>(path: P) -> Result<DecodedImage, String> {
    let path = path.as_ref();
    validate_input_path(path)?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| "No file extension found".to_string())?;

    match extension.as_str() {
        "jpg" | "jpeg" => jpeg::decode_jpeg(path),
        "png" => png::decode_png(path),
        _ => Err(format!("Unsupported file format: {}", extension)),
    }
}
