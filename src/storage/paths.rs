use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error_handling::types::StorageError;

pub const DATE_FORMAT: &str = "%Y%m%d";
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Computes storage paths for new snapshots and materializes the date/camera
/// directory pair on demand.
///
/// Layout: `<root>/<YYYYMMDD>/<camera>/<YYYYMMDD_HHMMSS>_<camera>_snapshot.jpg`.
/// Filenames sort lexicographically in chronological order; the retention
/// engine relies on that, so the timestamp format must stay sortable.
/// Two snapshots for one camera within the same second collapse onto the same
/// path; the later write wins, which is accepted drift.
pub struct PathAllocator {
    root: PathBuf,
}

impl PathAllocator {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Path for a snapshot of `camera` taken at `now`, creating the
    /// date/camera directories if absent. Creation is idempotent; there is no
    /// exists-check beforehand.
    pub fn allocate(
        &self,
        camera: &str,
        now: DateTime<Local>,
    ) -> Result<PathBuf, StorageError> {
        let date = now.format(DATE_FORMAT).to_string();
        let timestamp = now.format(TIMESTAMP_FORMAT).to_string();
        let dir = self.root.join(date).join(camera);
        fs::create_dir_all(&dir).map_err(StorageError::WriteFailed)?;
        Ok(dir.join(format!("{}_{}_snapshot.jpg", timestamp, camera)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn test_layout() {
        let dir = TempDir::new().unwrap();
        let allocator = PathAllocator::new(dir.path());
        let now = Local.with_ymd_and_hms(2024, 1, 2, 13, 37, 5).unwrap();
        let path = allocator.allocate("cam_1", now).unwrap();
        assert_eq!(
            path,
            dir.path()
                .join("20240102")
                .join("cam_1")
                .join("20240102_133705_cam_1_snapshot.jpg")
        );
        assert!(path.parent().unwrap().is_dir());
    }

    #[test]
    fn test_allocation_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let allocator = PathAllocator::new(dir.path());
        let now = Local.with_ymd_and_hms(2024, 1, 2, 13, 37, 5).unwrap();
        let first = allocator.allocate("cam_1", now).unwrap();
        let second = allocator.allocate("cam_1", now).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_filenames_sort_chronologically() {
        let dir = TempDir::new().unwrap();
        let allocator = PathAllocator::new(dir.path());
        let earlier = Local.with_ymd_and_hms(2024, 1, 2, 9, 59, 59).unwrap();
        let later = Local.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap();
        let a = allocator.allocate("cam_1", earlier).unwrap();
        let b = allocator.allocate("cam_1", later).unwrap();
        assert!(a.file_name().unwrap() < b.file_name().unwrap());
    }
}
