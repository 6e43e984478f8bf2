use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error_handling::types::ConfigError;

/// One configured camera endpoint.
///
/// `name` is assigned from the position of the entry in the credential file
/// (`cam_1`, `cam_2`, ...) and doubles as the camera bucket directory name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    pub name: String,
    pub address: String,
    pub username: String,
    pub password: String,
}

/// Ordered set of cameras parsed from a line-oriented credential file.
///
/// File format: one camera per line, `address,username,password`
/// comma-separated. Blank lines and lines starting with `#` are skipped and
/// do not advance camera numbering.
#[derive(Debug, Clone)]
pub struct CameraRegistry {
    cameras: Vec<Camera>,
}

impl CameraRegistry {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let registry = Self::parse(&content)?;
        if registry.cameras.is_empty() {
            return Err(ConfigError::NoCameras(path.to_path_buf()));
        }
        info!(
            "Loaded {} camera(s) from {}",
            registry.cameras.len(),
            path.display()
        );
        Ok(registry)
    }

    fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut cameras = Vec::new();
        for (lineno, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.splitn(3, ',');
            let address = fields.next().map(str::trim).unwrap_or_default();
            let username = fields.next().map(str::trim);
            let password = fields.next().map(str::trim);
            let (username, password) = match (username, password) {
                (Some(u), Some(p)) => (u, p),
                _ => {
                    return Err(ConfigError::MalformedCredentials(format!(
                        "line {}: expected address,username,password",
                        lineno + 1
                    )))
                }
            };
            if address.is_empty() {
                return Err(ConfigError::MalformedCredentials(format!(
                    "line {}: empty camera address",
                    lineno + 1
                )));
            }
            let name = format!("cam_{}", cameras.len() + 1);
            debug!("Registered {} -> {}", name, address);
            cameras.push(Camera {
                name,
                address: address.to_string(),
                username: username.to_string(),
                password: password.to_string(),
            });
        }
        Ok(Self { cameras })
    }

    pub fn cameras(&self) -> &[Camera] {
        &self.cameras
    }

    pub fn into_cameras(self) -> Vec<Camera> {
        self.cameras
    }

    /// Fill in the CLI-level default username on entries that left it blank.
    pub fn apply_default_username(&mut self, username: &str) {
        for cam in &mut self.cameras {
            if cam.username.is_empty() {
                cam.username = username.to_string();
            }
        }
    }
}
