//! PNG decoding via the png crate.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::DecodedImage;

/// Decode a PNG file
pub fn decode_png<P: AsRef<Path>>(path: P) -> Result<DecodedImage, String> {
    let file =
        File::open(path.as_ref()).map_err(|e| format!("Failed to open PNG file: {}", e))?;
    let decoder = png::Decoder::new(BufReader::new(file));
    let mut reader = decoder
        .read_info()
        .map_err(|e| format!("Failed to read PNG info: {}", e))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let color_type = info.color_type;
    let bit_depth = info.bit_depth;

    let buffer_size = reader
        .output_buffer_size()
        .ok_or_else(|| "Failed to determine PNG buffer size".to_string())?;
    let mut buf = vec![0u8; buffer_size];
    let frame_info = reader
        .next_frame(&mut buf)
        .map_err(|e| format!("Failed to read PNG frame: {}", e))?;

    let bytes = &buf[..frame_info.buffer_size()];

    let data = match (color_type, bit_depth) {
        (png::ColorType::Grayscale, png::BitDepth::Eight) => {
            decode_gray(bytes, width, height, 1)?
        }
        (png::ColorType::Grayscale, png::BitDepth::Sixteen) => {
            decode_gray(bytes, width, height, 2)?
        }
        (png::ColorType::Rgb, png::BitDepth::Eight) => decode_rgb8(bytes, width, height)?,
        (png::ColorType::Rgb, png::BitDepth::Sixteen) => decode_rgb16(bytes, width, height)?,
        (png::ColorType::Rgba, png::BitDepth::Eight) => decode_rgba8(bytes, width, height)?,
        (png::ColorType::Rgba, png::BitDepth::Sixteen) => decode_rgba16(bytes, width, height)?,
        (png::ColorType::GrayscaleAlpha, _) => {
            return Err("Grayscale+Alpha PNG not supported".to_string());
        }
        (png::ColorType::Indexed, _) => {
            return Err("Indexed PNG not supported".to_string());
        }
        _ => {
            return Err(format!(
                "Unsupported PNG format: {:?} with bit depth {:?}",
                color_type, bit_depth
            ));
        }
    };

    Ok(DecodedImage {
        width,
        height,
        data,
        channels: 3,
    })
}

/// Expand grayscale (8- or 16-bit big-endian) to 8-bit RGB
fn decode_gray(
    bytes: &[u8],
    width: u32,
    height: u32,
    bytes_per_pixel: usize,
) -> Result<Vec<u8>, String> {
    let expected_len = (width * height) as usize * bytes_per_pixel;
    if bytes.len() != expected_len {
        return Err(format!(
            "PNG buffer size mismatch: expected {}, got {}",
            expected_len,
            bytes.len()
        ));
    }

    // For 16-bit samples (big-endian) the high byte is the 8-bit value
    Ok(bytes
        .chunks_exact(bytes_per_pixel)
        .flat_map(|chunk| {
            let gray = chunk[0];
            [gray, gray, gray]
        })
        .collect())
}

/// 8-bit RGB is already in the layout we want
fn decode_rgb8(bytes: &[u8], width: u32, height: u32) -> Result<Vec<u8>, String> {
    let expected_len = (width * height * 3) as usize;
    if bytes.len() != expected_len {
        return Err(format!(
            "PNG buffer size mismatch: expected {}, got {}",
            expected_len,
            bytes.len()
        ));
    }

    Ok(bytes.to_vec())
}

/// Reduce 16-bit RGB (big-endian) to 8 bits per channel
fn decode_rgb16(bytes: &[u8], width: u32, height: u32) -> Result<Vec<u8>, String> {
    let expected_len = (width * height * 3 * 2) as usize;
    if bytes.len() != expected_len {
        return Err(format!(
            "PNG buffer size mismatch: expected {}, got {}",
            expected_len,
            bytes.len()
        ));
    }

    Ok(bytes.chunks_exact(2).map(|chunk| chunk[0]).collect())
}

/// Drop the alpha channel from 8-bit RGBA
fn decode_rgba8(bytes: &[u8], width: u32, height: u32) -> Result<Vec<u8>, String> {
    let expected_len = (width * height * 4) as usize;
    if bytes.len() != expected_len {
        return Err(format!(
            "PNG buffer size mismatch: expected {}, got {}",
            expected_len,
            bytes.len()
        ));
    }

    Ok(bytes
        .chunks_exact(4)
        .flat_map(|rgba| [rgba[0], rgba[1], rgba[2]])
        .collect())
}

/// Reduce 16-bit RGBA (big-endian) to 8-bit RGB, dropping alpha
fn decode_rgba16(bytes: &[u8], width: u32, height: u32) -> Result<Vec<u8>, String> {
    let expected_len = (width * height * 4 * 2) as usize;
    if bytes.len() != expected_len {
        return Err(format!(
            "PNG buffer size mismatch: expected {}, got {}",
            expected_len,
            bytes.len()
        ));
    }

    Ok(bytes
        .chunks_exact(8)
        .flat_map(|rgba| [rgba[0], rgba[2], rgba[4]])
        .collect())
}
