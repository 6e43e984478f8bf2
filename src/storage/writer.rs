use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::{debug, warn};

use crate::error_handling::types::StorageError;
use crate::storage::optimizer;
use crate::storage::paths::PathAllocator;

/// Persists one fetched snapshot: allocate the bucketed path, write the
/// bytes, optionally re-encode and drop the original.
pub struct SnapshotWriter {
    allocator: PathAllocator,
    optimize: bool,
    quality: u8,
    keep_original: bool,
}

impl SnapshotWriter {
    pub fn new<P: AsRef<Path>>(root: P, optimize: bool, quality: u8, keep_original: bool) -> Self {
        Self {
            allocator: PathAllocator::new(root),
            optimize,
            quality,
            keep_original,
        }
    }

    /// Write `bytes` for `camera` under the bucket for `now`. Returns the
    /// path of the file that remains on disk (the optimized one when the
    /// original is dropped).
    pub fn store(
        &self,
        camera: &str,
        bytes: &[u8],
        now: DateTime<Local>,
    ) -> Result<PathBuf, StorageError> {
        let path = self.allocator.allocate(camera, now)?;
        fs::write(&path, bytes).map_err(StorageError::WriteFailed)?;
        debug!("Wrote {} byte(s) to {}", bytes.len(), path.display());

        if !self.optimize {
            return Ok(path);
        }
        let optimized = optimizer::optimize(&path, self.quality)?;
        if !self.keep_original {
            if let Err(e) = fs::remove_file(&path) {
                // Already gone is fine; the optimized copy is what we keep.
                warn!("Could not remove original {}: {}", path.display(), e);
            }
        }
        Ok(optimized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use image::{ImageBuffer, Rgb};
    use tempfile::TempDir;

    fn jpeg_bytes() -> Vec<u8> {
        let img = ImageBuffer::from_pixel(32, 24, Rgb([10u8, 20, 30]));
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Jpeg).unwrap();
        out.into_inner()
    }

    fn ts() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 2, 13, 37, 5).unwrap()
    }

    #[test]
    fn test_plain_store() {
        let dir = TempDir::new().unwrap();
        let writer = SnapshotWriter::new(dir.path(), false, 40, false);
        let path = writer.store("cam_1", b"rawbytes", ts()).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"rawbytes");
        assert!(path.ends_with("20240102/cam_1/20240102_133705_cam_1_snapshot.jpg"));
    }

    #[test]
    fn test_optimized_store_drops_original() {
        let dir = TempDir::new().unwrap();
        let writer = SnapshotWriter::new(dir.path(), true, 40, false);
        let kept = writer.store("cam_1", &jpeg_bytes(), ts()).unwrap();
        assert!(kept
            .file_name()
            .unwrap()
            .to_str()
            .unwrap()
            .ends_with("_snapshot_optimized.jpg"));
        assert!(kept.is_file());
        let original = kept.with_file_name("20240102_133705_cam_1_snapshot.jpg");
        assert!(!original.exists());
    }

    #[test]
    fn test_optimized_store_keeps_original_when_asked() {
        let dir = TempDir::new().unwrap();
        let writer = SnapshotWriter::new(dir.path(), true, 40, true);
        let kept = writer.store("cam_1", &jpeg_bytes(), ts()).unwrap();
        let original = kept.with_file_name("20240102_133705_cam_1_snapshot.jpg");
        assert!(kept.is_file());
        assert!(original.is_file());
    }

    #[test]
    fn test_optimize_failure_surfaces() {
        let dir = TempDir::new().unwrap();
        let writer = SnapshotWriter::new(dir.path(), true, 40, false);
        let err = writer.store("cam_1", b"not a jpeg", ts()).unwrap_err();
        assert!(matches!(err, StorageError::Optimize(_)));
    }
}
