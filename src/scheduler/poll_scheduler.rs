use std::time::Duration;

use chrono::Local;
use log::{debug, error, info, warn};

use crate::cameras::fetcher::SnapshotFetcher;
use crate::configuration::config::Config;
use crate::error_handling::types::StorageError;
use crate::storage::paths::TIMESTAMP_FORMAT;
use crate::storage::retention::RetentionEngine;
use crate::storage::writer::SnapshotWriter;

/// Drives the fetch -> count -> prune -> sleep loop.
///
/// Cameras are fetched strictly one after another; each network call and any
/// re-encode completes before the next camera starts. A failing camera is
/// logged and skipped, leaving no file for that camera this cycle; the next
/// cycle retries it naturally. The cycle counter lives here, not in any
/// global, and resets with the process.
pub struct PollScheduler<'a, F: SnapshotFetcher> {
    config: &'a Config,
    fetcher: F,
    writer: SnapshotWriter,
    retention: RetentionEngine,
    cycle: u64,
}

impl<'a, F: SnapshotFetcher> PollScheduler<'a, F> {
    pub fn new(config: &'a Config, fetcher: F) -> Self {
        let writer = SnapshotWriter::new(
            &config.storage_root,
            config.optimize,
            config.quality,
            config.keep_original,
        );
        let retention = RetentionEngine::new(&config.storage_root, config.rec_period);
        Self {
            config,
            fetcher,
            writer,
            retention,
            cycle: 0,
        }
    }

    pub fn cycle_count(&self) -> u64 {
        self.cycle
    }

    /// One full poll cycle: fetch every camera, bump the counter, prune.
    pub async fn run_cycle(&mut self) {
        for camera in &self.config.cameras {
            let now = Local::now();
            let token = now.format(TIMESTAMP_FORMAT).to_string();
            let bytes = match self
                .fetcher
                .fetch(camera, self.config.resolution, &token)
                .await
            {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!("Fetch failed for {}: {}", camera.name, e);
                    continue;
                }
            };
            match self.writer.store(&camera.name, &bytes, now) {
                Ok(path) => debug!("Saved {} snapshot at {}", camera.name, path.display()),
                Err(e) => error!("Could not store snapshot for {}: {}", camera.name, e),
            }
        }

        self.cycle += 1;
        debug!(
            "Saved snapshot(s): {} | #{}",
            Local::now().format(TIMESTAMP_FORMAT),
            self.cycle
        );

        match self.retention.prune(self.cycle) {
            Ok(()) => {}
            Err(StorageError::EmptyRoot) => {
                // Every camera failed before anything was written; nothing to
                // rotate yet.
                warn!("Retention pass skipped: no date buckets yet");
            }
            Err(e) => error!("Retention pass failed: {}", e),
        }
    }

    /// Run forever. Termination is external (process signal); there is no
    /// jitter or skew compensation, so the cycle period is the interval plus
    /// fetch and prune time.
    pub async fn run(&mut self) {
        info!(
            "Polling {} camera(s) every {}s, retaining {} cycle(s)",
            self.config.cameras.len(),
            self.config.interval_secs,
            self.config.rec_period
        );
        loop {
            self.run_cycle().await;
            tokio::time::sleep(Duration::from_secs(self.config.interval_secs)).await;
        }
    }
}
