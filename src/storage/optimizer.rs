use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use log::debug;

use crate::error_handling::types::StorageError;

/// Sibling path carrying the `_optimized` suffix:
/// `x_snapshot.jpg` -> `x_snapshot_optimized.jpg`.
pub fn optimized_path(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    source.with_file_name(format!("{}_optimized.jpg", stem))
}

/// Re-encode the JPEG at `source` at the given quality (0-100) into its
/// `_optimized` sibling. The caller decides what happens to the original.
pub fn optimize(source: &Path, quality: u8) -> Result<PathBuf, StorageError> {
    let img = image::open(source)
        .map_err(|e| StorageError::Optimize(format!("{}: {}", source.display(), e)))?;
    let target = optimized_path(source);
    let file = File::create(&target).map_err(StorageError::WriteFailed)?;
    let mut writer = BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(&mut writer, quality);
    img.write_with_encoder(encoder)
        .map_err(|e| StorageError::Optimize(format!("{}: {}", target.display(), e)))?;
    debug!("Optimized {} -> {}", source.display(), target.display());
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};
    use tempfile::TempDir;

    fn write_test_jpeg(path: &Path) {
        let img = ImageBuffer::from_pixel(32, 24, Rgb([120u8, 140, 160]));
        img.save(path).unwrap();
    }

    #[test]
    fn test_optimized_path_suffix() {
        let src = Path::new("/tmp/20240102_133705_cam_1_snapshot.jpg");
        assert_eq!(
            optimized_path(src),
            Path::new("/tmp/20240102_133705_cam_1_snapshot_optimized.jpg")
        );
    }

    #[test]
    fn test_reencode_writes_sibling() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("20240102_133705_cam_1_snapshot.jpg");
        write_test_jpeg(&src);
        let out = optimize(&src, 40).unwrap();
        assert!(out.is_file());
        assert!(src.is_file());
        assert!(out
            .file_name()
            .unwrap()
            .to_str()
            .unwrap()
            .ends_with("_snapshot_optimized.jpg"));
    }

    #[test]
    fn test_undecodable_input_is_reported() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("broken_snapshot.jpg");
        std::fs::write(&src, b"not a jpeg").unwrap();
        assert!(matches!(optimize(&src, 40), Err(StorageError::Optimize(_))));
    }
}
