//! Write a starter configuration file.

use std::path::Path;

/// Commented starter config mirroring the built-in defaults.
const STARTER_CONFIG: &str = "\
# Verdant analysis defaults.
# Every value shown here matches the built-in default; uncomment and edit
# the ones you want to change.
defaults:
  # Binary threshold on the HSV value channel (dark-object polarity):
  # pixels at or below this value count as plant material.
  threshold: 95

  # Mask value written for foreground pixels.
  #max_value: 255

  # Connected regions smaller than this many pixels are treated as noise
  # and removed before object detection.
  #fill_min_size: 4000

  # Region of interest centered in the selected crop.
  #roi_width: 100
  #roi_height: 100

  # partial: keep objects overlapping the ROI, counting their full area.
  # cutto:   count only object pixels inside the ROI.
  #roi_mode: partial

  # Longest edge of the displayed image in the GUI.
  #display_max_dimension: 1400

  # Drags shorter than this many display pixels are ignored.
  #min_selection_px: 10.0
";

/// Write a starter `verdant.yml` to the given path.
///
/// Safe to run multiple times - won't overwrite an existing file unless
/// `force` is true.
pub fn cmd_init(path: &Path, force: bool) -> Result<(), String> {
    if path.exists() && !force {
        return Err(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ));
    }

    std::fs::write(path, STARTER_CONFIG)
        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;

    println!("Wrote starter config to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::tempdir;

    #[test]
    fn test_init_writes_parseable_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("verdant.yml");

        cmd_init(&path, false).unwrap();

        let handle = verdant_core::config::load_analysis_config(Some(&path));
        assert!(handle.source.is_some());
        assert_eq!(handle.config.defaults.threshold, 95);
        // Commented-out values stay at their built-in defaults
        assert_eq!(handle.config.defaults.fill_min_size, 4000);
    }

    #[test]
    fn test_init_refuses_overwrite_without_force() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("verdant.yml");
        std::fs::write(&path, "defaults:\n  threshold: 42\n").unwrap();

        let result = cmd_init(&path, false);

        assert!(result.is_err());
        assert!(result.unwrap_err().contains("already exists"));

        cmd_init(&path, true).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("threshold: 95"));
    }
}
