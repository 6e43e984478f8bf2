use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error_handling::types::StorageError;

/// Rotation policy over the date/camera bucket tree.
///
/// Each poll cycle operates only on the lexicographically smallest date
/// bucket under the root: empty camera buckets are removed, an emptied date
/// bucket is removed (and the oldest bucket recomputed), and once the cycle
/// counter passes `rec_period` a single oldest file per camera bucket is
/// deleted. One file per camera per cycle bounds deletion work to O(cameras)
/// and drains backlog at the same rate snapshots arrive, so steady-state disk
/// usage stays at `rec_period` snapshots per camera.
///
/// "Oldest" always means lexicographic name order. The snapshot naming scheme
/// (`YYYYMMDD` buckets, `YYYYMMDD_HHMMSS_...` files) guarantees that string
/// order equals chronological order.
///
/// Deletion races against external actors (a bucket or file vanishing between
/// list and delete) are logged and skipped, never escalated; the loop must
/// survive a human clearing the tree by hand.
pub struct RetentionEngine {
    root: PathBuf,
    rec_period: f64,
}

impl RetentionEngine {
    pub fn new<P: AsRef<Path>>(root: P, rec_period: f64) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            rec_period,
        }
    }

    /// One pruning pass, run after all cameras of cycle `cycle` were fetched.
    ///
    /// An entirely empty root is a precondition violation (the first cycle
    /// writes before it prunes); a root drained DURING the pass is normal and
    /// ends the pass cleanly.
    pub fn prune(&self, cycle: u64) -> Result<(), StorageError> {
        let mut oldest = self
            .oldest_date_bucket()?
            .ok_or(StorageError::EmptyRoot)?;

        for cam_dir in self.camera_buckets(&oldest) {
            match Self::is_empty_dir(&cam_dir) {
                Ok(true) => match fs::remove_dir(&cam_dir) {
                    Ok(()) => debug!("Removed empty camera bucket {}", cam_dir.display()),
                    Err(e) => warn!("Could not remove {}: {}", cam_dir.display(), e),
                },
                Ok(false) => {}
                Err(e) => warn!("Skipping {}: {}", cam_dir.display(), e),
            }
        }

        match Self::is_empty_dir(&oldest) {
            Ok(true) => {
                match fs::remove_dir(&oldest) {
                    Ok(()) => debug!("Removed empty date bucket {}", oldest.display()),
                    Err(e) => warn!("Could not remove {}: {}", oldest.display(), e),
                }
                // The next step must target a bucket that still exists.
                oldest = match self.oldest_date_bucket()? {
                    Some(next) => next,
                    None => return Ok(()),
                };
            }
            Ok(false) => {}
            Err(e) => {
                warn!("Date bucket {} vanished: {}", oldest.display(), e);
                return Ok(());
            }
        }

        if cycle as f64 > self.rec_period {
            for cam_dir in self.camera_buckets(&oldest) {
                match Self::oldest_file(&cam_dir) {
                    Ok(Some(file)) => match fs::remove_file(&file) {
                        Ok(()) => debug!("Pruned {}", file.display()),
                        Err(e) => warn!("Could not prune {}: {}", file.display(), e),
                    },
                    Ok(None) => {}
                    Err(e) => warn!("Skipping {}: {}", cam_dir.display(), e),
                }
            }
        }

        Ok(())
    }

    /// Lexicographically smallest date bucket under the root, or `None` when
    /// the root holds no buckets. Stray files in the root (a `.keep`, a note)
    /// are not buckets and are never selected.
    fn oldest_date_bucket(&self) -> Result<Option<PathBuf>, StorageError> {
        let entries = fs::read_dir(&self.root).map_err(StorageError::ListFailed)?;
        let mut oldest: Option<PathBuf> = None;
        for entry in entries {
            let entry = entry.map_err(StorageError::ListFailed)?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let replace = match &oldest {
                Some(current) => path.file_name() < current.file_name(),
                None => true,
            };
            if replace {
                oldest = Some(path);
            }
        }
        Ok(oldest)
    }

    /// Camera subdirectories of a date bucket. A bucket that vanished between
    /// selection and listing yields an empty set.
    fn camera_buckets(&self, date_bucket: &Path) -> Vec<PathBuf> {
        let entries = match fs::read_dir(date_bucket) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Could not list {}: {}", date_bucket.display(), e);
                return Vec::new();
            }
        };
        let mut buckets: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        buckets.sort();
        buckets
    }

    fn is_empty_dir(path: &Path) -> io::Result<bool> {
        Ok(fs::read_dir(path)?.next().is_none())
    }

    /// Lexicographically smallest file in a camera bucket.
    fn oldest_file(dir: &Path) -> io::Result<Option<PathBuf>> {
        let mut oldest: Option<PathBuf> = None;
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let replace = match &oldest {
                Some(current) => path.file_name() < current.file_name(),
                None => true,
            };
            if replace {
                oldest = Some(path);
            }
        }
        Ok(oldest)
    }
}
