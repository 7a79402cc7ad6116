//! JPEG decoding via the jpeg-decoder crate.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use jpeg_decoder::PixelFormat;

use super::DecodedImage;

/// Decode a JPEG file
pub fn decode_jpeg<P: AsRef<Path>>(path: P) -> Result<DecodedImage, String> {
    let file =
        File::open(path.as_ref()).map_err(|e| format!("Failed to open JPEG file: {}", e))?;
    let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(file));

    let pixels = decoder
        .decode()
        .map_err(|e| format!("Failed to decode JPEG image: {}", e))?;
    let info = decoder
        .info()
        .ok_or_else(|| "Failed to read JPEG image info".to_string())?;

    let width = info.width as u32;
    let height = info.height as u32;

    let data = match info.pixel_format {
        PixelFormat::RGB24 => decode_rgb24(&pixels, width, height)?,
        PixelFormat::L8 => decode_l8(&pixels, width, height)?,
        PixelFormat::L16 => decode_l16(&pixels, width, height)?,
        PixelFormat::CMYK32 => {
            return Err("CMYK JPEG images are not supported".to_string());
        }
    };

    Ok(DecodedImage {
        width,
        height,
        data,
        channels: 3,
    })
}

/// 8-bit RGB data is already in the layout we want
fn decode_rgb24(buf: &[u8], width: u32, height: u32) -> Result<Vec<u8>, String> {
    let expected_len = (width * height * 3) as usize;
    if buf.len() != expected_len {
        return Err(format!(
            "JPEG buffer size mismatch: expected {}, got {}",
            expected_len,
            buf.len()
        ));
    }

    Ok(buf.to_vec())
}

/// Expand 8-bit grayscale to RGB
fn decode_l8(buf: &[u8], width: u32, height: u32) -> Result<Vec<u8>, String> {
    let expected_len = (width * height) as usize;
    if buf.len() != expected_len {
        return Err(format!(
            "JPEG buffer size mismatch: expected {}, got {}",
            expected_len,
            buf.len()
        ));
    }

    Ok(buf.iter().flat_map(|&gray| [gray, gray, gray]).collect())
}

/// Reduce 16-bit grayscale (big-endian) to 8 bits and expand to RGB
fn decode_l16(buf: &[u8], width: u32, height: u32) -> Result<Vec<u8>, String> {
    let expected_len = (width * height * 2) as usize;
    if buf.len() != expected_len {
        return Err(format!(
            "JPEG buffer size mismatch: expected {}, got {}",
            expected_len,
            buf.len()
        ));
    }

    Ok(buf
        .chunks_exact(2)
        .flat_map(|chunk| {
            let gray16 = u16::from_be_bytes([chunk[0], chunk[1]]);
            let gray = (gray16 >> 8) as u8;
            [gray, gray, gray]
        })
        .collect())
}
