//! Parsing functions for CLI arguments.

use verdant_core::geometry::SelectionRect;
use verdant_core::models::RoiMode;

/// Parse a region string in format "x,y,width,height"
///
/// # Arguments
/// * `region_str` - A string in format "x,y,width,height"
///
/// # Returns
/// A `SelectionRect` with the parsed coordinates
pub fn parse_region(region_str: &str) -> Result<SelectionRect, String> {
    let parts: Vec<&str> = region_str.split(',').collect();
    if parts.len() != 4 {
        return Err(format!(
            "Region must be in format x,y,width,height, got: {}",
            region_str
        ));
    }

    let x = parts[0]
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("Invalid x coordinate: {}", parts[0]))?;
    let y = parts[1]
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("Invalid y coordinate: {}", parts[1]))?;
    let width = parts[2]
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("Invalid width: {}", parts[2]))?;
    let height = parts[3]
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("Invalid height: {}", parts[3]))?;

    if width == 0 || height == 0 {
        return Err(format!(
            "Region width and height must be non-zero, got: {}",
            region_str
        ));
    }

    Ok(SelectionRect::new(x, y, width, height))
}

/// Parse a size string in format "WIDTHxHEIGHT" (e.g. "600x400")
pub fn parse_size(size_str: &str) -> Result<(u32, u32), String> {
    let parts: Vec<&str> = size_str.split(['x', 'X']).collect();
    if parts.len() != 2 {
        return Err(format!(
            "Size must be in format WIDTHxHEIGHT (e.g. 600x400), got: {}",
            size_str
        ));
    }

    let width = parts[0]
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("Invalid width: {}", parts[0]))?;
    let height = parts[1]
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("Invalid height: {}", parts[1]))?;

    if width == 0 || height == 0 {
        return Err(format!("Size must be non-zero, got: {}", size_str));
    }

    Ok((width, height))
}

/// Parse an ROI filter mode from string
///
/// Supported values:
/// - "partial" (default): keep objects that overlap the ROI, counting their full area
/// - "cutto": count only object pixels inside the ROI
pub fn parse_roi_mode(mode_str: &str) -> Result<RoiMode, String> {
    match mode_str.to_lowercase().as_str() {
        "partial" | "default" | "" => Ok(RoiMode::Partial),
        "cutto" | "cut" => Ok(RoiMode::Cutto),
        _ => Err(format!(
            "Unknown ROI mode: '{}'. Valid options: partial (default), cutto",
            mode_str
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_region_valid() {
        let rect = parse_region("200,200,400,300").unwrap();

        assert_eq!(rect, SelectionRect::new(200, 200, 400, 300));
    }

    #[test]
    fn test_parse_region_with_spaces() {
        let rect = parse_region(" 10, 20, 30, 40 ").unwrap();

        assert_eq!(rect, SelectionRect::new(10, 20, 30, 40));
    }

    #[test]
    fn test_parse_region_wrong_arity() {
        assert!(parse_region("10,20,30").is_err());
        assert!(parse_region("10,20,30,40,50").is_err());
        assert!(parse_region("").is_err());
    }

    #[test]
    fn test_parse_region_rejects_zero_size() {
        let result = parse_region("10,20,0,40");

        assert!(result.is_err());
        assert!(result.unwrap_err().contains("non-zero"));
    }

    #[test]
    fn test_parse_region_rejects_non_numeric() {
        let result = parse_region("10,twenty,30,40");

        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid y coordinate"));
    }

    #[test]
    fn test_parse_size_valid() {
        assert_eq!(parse_size("600x400").unwrap(), (600, 400));
        assert_eq!(parse_size("100X100").unwrap(), (100, 100));
    }

    #[test]
    fn test_parse_size_invalid() {
        assert!(parse_size("600").is_err());
        assert!(parse_size("600x").is_err());
        assert!(parse_size("0x400").is_err());
    }

    #[test]
    fn test_parse_roi_mode() {
        assert_eq!(parse_roi_mode("partial").unwrap(), RoiMode::Partial);
        assert_eq!(parse_roi_mode("PARTIAL").unwrap(), RoiMode::Partial);
        assert_eq!(parse_roi_mode("cutto").unwrap(), RoiMode::Cutto);
        assert!(parse_roi_mode("largest").is_err());
    }
}
