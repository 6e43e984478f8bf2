use clap::{ArgGroup, Parser};
use log::{debug, info};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::cameras::registry::{Camera, CameraRegistry};
use crate::configuration::resolution::{QualityPolicy, Resolution, ResolutionPolicy};
use crate::error_handling::types::ConfigError;

/// Command-line surface of the snapshot daemon.
///
/// Parsed exactly once at startup; everything downstream reads the validated
/// [`Config`] built from it, never the raw arguments.
#[derive(Parser, Debug, Clone)]
#[command(name = "reosnap")]
#[command(version = "0.1.0")]
#[command(about = "Save live snapshots of Reolink camera feeds")]
#[command(group(ArgGroup::new("res").args(["resolution", "width", "height"])))]
#[command(group(ArgGroup::new("window").args(["hours", "minutes", "seconds"])))]
pub struct Args {
    /// Fallback username for credential entries that leave theirs blank
    #[arg(short, long, default_value = "snapshotuser")]
    pub username: String,

    /// Snapshot resolution tier [low/medium/high/max]
    #[arg(short, long)]
    pub resolution: Option<String>,

    /// Explicit snapshot width (height derived as 3/4)
    #[arg(long)]
    pub width: Option<u32>,

    /// Explicit snapshot height (width derived as 4/3)
    #[arg(long)]
    pub height: Option<u32>,

    /// Re-encode each snapshot to reduce its size
    #[arg(short, long, action = clap::ArgAction::SetTrue)]
    pub optimize: bool,

    /// Optimization quality [low/medium/high/max/0-100]
    #[arg(short, long)]
    pub quality: Option<String>,

    /// Keep the original file next to its optimized copy
    #[arg(short = 'k', long = "keep-og", action = clap::ArgAction::SetTrue)]
    pub keep_og: bool,

    /// Retention window in hours
    #[arg(short = 'H', long)]
    pub hours: Option<u64>,

    /// Retention window in minutes
    #[arg(short = 'm', long)]
    pub minutes: Option<u64>,

    /// Retention window in seconds
    #[arg(short = 's', long)]
    pub seconds: Option<u64>,

    /// Seconds to sleep between poll cycles
    #[arg(short, long, default_value_t = 4, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: u64,

    /// Path to the output directory (default: home directory)
    #[arg(short = 'O', long)]
    pub output: Option<PathBuf>,

    /// Path to the camera credential file (address,username,password per line)
    #[arg(short, long)]
    pub cameras: Option<PathBuf>,

    /// Enable verbose per-cycle logging
    #[arg(short, long, action = clap::ArgAction::SetTrue)]
    pub verbose: bool,

    /// Show license and exit
    #[arg(short, long, action = clap::ArgAction::SetTrue)]
    pub license: bool,

    /// Re-launch detached from the terminal and exit
    #[arg(short, long, action = clap::ArgAction::SetTrue)]
    pub detach: bool,
}

/// Validated, immutable runtime configuration.
///
/// All fatal checks (resolution, quality, output path, credential file)
/// happen in [`Config::from_args`], before the poll loop starts.
#[derive(Debug, Clone)]
pub struct Config {
    pub cameras: Vec<Camera>,
    pub resolution: Resolution,
    pub optimize: bool,
    pub quality: u8,
    pub keep_original: bool,
    pub interval_secs: u64,
    pub rec_period: f64,
    pub storage_root: PathBuf,
}

impl Args {
    /// Serialize back into an argument list for the detached re-launch.
    ///
    /// Built from the parsed fields, never from raw argv: clustered short
    /// flags (`-vd`) would survive a string filter and make the child detach
    /// again. The detach flag itself is dropped so the child enters the loop.
    pub fn relaunch_argv(&self) -> Vec<String> {
        let mut argv = vec!["--username".to_string(), self.username.clone()];
        if let Some(res) = &self.resolution {
            argv.push("--resolution".into());
            argv.push(res.clone());
        }
        if let Some(width) = self.width {
            argv.push("--width".into());
            argv.push(width.to_string());
        }
        if let Some(height) = self.height {
            argv.push("--height".into());
            argv.push(height.to_string());
        }
        if self.optimize {
            argv.push("--optimize".into());
        }
        if let Some(quality) = &self.quality {
            argv.push("--quality".into());
            argv.push(quality.clone());
        }
        if self.keep_og {
            argv.push("--keep-og".into());
        }
        if let Some(hours) = self.hours {
            argv.push("--hours".into());
            argv.push(hours.to_string());
        }
        if let Some(minutes) = self.minutes {
            argv.push("--minutes".into());
            argv.push(minutes.to_string());
        }
        if let Some(seconds) = self.seconds {
            argv.push("--seconds".into());
            argv.push(seconds.to_string());
        }
        argv.push("--interval".into());
        argv.push(self.interval.to_string());
        if let Some(output) = &self.output {
            argv.push("--output".into());
            argv.push(output.to_string_lossy().into_owned());
        }
        if let Some(cameras) = &self.cameras {
            argv.push("--cameras".into());
            argv.push(cameras.to_string_lossy().into_owned());
        }
        if self.verbose {
            argv.push("--verbose".into());
        }
        argv
    }
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        let resolution = ResolutionPolicy::resolve(
            args.resolution.as_deref(),
            args.width,
            args.height,
        )?;
        let quality = QualityPolicy::resolve(args.quality.as_deref())?;

        let output_root = Self::resolve_output_root(args.output)?;
        let storage_root = output_root.join("Surveillance");
        fs::create_dir_all(&storage_root)?;

        let window_secs = if let Some(h) = args.hours {
            h * 3600
        } else if let Some(m) = args.minutes {
            m * 60
        } else if let Some(s) = args.seconds {
            s
        } else {
            12 * 3600
        };
        let rec_period = window_secs as f64 / args.interval as f64;
        debug!(
            "Retention window {}s at {}s interval -> rec_period {}",
            window_secs, args.interval, rec_period
        );

        let cameras_path = args.cameras.ok_or_else(|| {
            ConfigError::MalformedCredentials("no credential file specified (--cameras)".into())
        })?;
        let mut registry = CameraRegistry::from_file(&cameras_path)?;
        registry.apply_default_username(&args.username);

        info!("Storing snapshots under {}", storage_root.display());

        Ok(Config {
            cameras: registry.into_cameras(),
            resolution,
            optimize: args.optimize,
            quality,
            keep_original: args.keep_og,
            interval_secs: args.interval,
            rec_period,
            storage_root,
        })
    }

    /// Resolve the user-supplied output directory, defaulting to the home
    /// directory. A supplied path must already exist; `.`-relative paths are
    /// anchored at the current directory.
    fn resolve_output_root(output: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
        let root = match output {
            None => {
                return dirs::home_dir()
                    .ok_or_else(|| ConfigError::InvalidOutputPath(PathBuf::from("~")))
            }
            Some(path) => path,
        };
        if !root.is_dir() {
            return Err(ConfigError::InvalidOutputPath(root));
        }
        if root.is_relative() {
            let cwd = env::current_dir()?;
            return Ok(cwd.join(root));
        }
        Ok(root)
    }
}
