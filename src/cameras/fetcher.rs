use log::debug;

use crate::cameras::registry::Camera;
use crate::configuration::resolution::Resolution;
use crate::error_handling::types::FetchError;

/// Boundary between the poll loop and the camera network protocol.
///
/// The scheduler awaits each fetch to completion before moving to the next
/// camera; implementations must not spawn background work of their own.
#[allow(async_fn_in_trait)]
pub trait SnapshotFetcher {
    async fn fetch(
        &self,
        camera: &Camera,
        resolution: Resolution,
        token: &str,
    ) -> Result<Vec<u8>, FetchError>;
}

/// Build the snapshot GET URL for a camera.
///
/// `token` is the per-request timestamp used as a cache-buster. Addresses
/// without a scheme get `http://` prefixed.
pub fn snapshot_url(camera: &Camera, resolution: Resolution, token: &str) -> String {
    let address = camera.address.trim_end_matches('/');
    let base = if address.contains("://") {
        address.to_string()
    } else {
        format!("http://{}", address)
    };
    format!(
        "{}/cgi-bin/api.cgi?cmd=Snap&channel=0&width={}&height={}&rs={}&user={}&password={}",
        base, resolution.width, resolution.height, token, camera.username, camera.password
    )
}

/// HTTP implementation of [`SnapshotFetcher`] against the Reolink snapshot
/// endpoint.
pub struct HttpSnapshotFetcher {
    client: reqwest::Client,
}

impl HttpSnapshotFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpSnapshotFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotFetcher for HttpSnapshotFetcher {
    async fn fetch(
        &self,
        camera: &Camera,
        resolution: Resolution,
        token: &str,
    ) -> Result<Vec<u8>, FetchError> {
        let url = snapshot_url(camera, resolution, token);
        debug!("GET {} for {}", camera.address, camera.name);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera(address: &str) -> Camera {
        Camera {
            name: "cam_1".into(),
            address: address.into(),
            username: "snapshotuser".into(),
            password: "secret".into(),
        }
    }

    #[test]
    fn test_url_layout() {
        let res = Resolution { width: 1856.0, height: 1392.0 };
        let url = snapshot_url(&camera("http://192.168.1.10"), res, "20240102_120000");
        assert_eq!(
            url,
            "http://192.168.1.10/cgi-bin/api.cgi?cmd=Snap&channel=0&width=1856&height=1392\
             &rs=20240102_120000&user=snapshotuser&password=secret"
        );
    }

    #[test]
    fn test_scheme_defaulted_when_absent() {
        let res = Resolution { width: 1600.0, height: 1200.0 };
        let url = snapshot_url(&camera("192.168.1.10"), res, "t");
        assert!(url.starts_with("http://192.168.1.10/cgi-bin/"));

        let url = snapshot_url(&camera("https://cam.example.com"), res, "t");
        assert!(url.starts_with("https://cam.example.com/cgi-bin/"));
    }

    #[test]
    fn test_trailing_slash_not_doubled() {
        let res = Resolution { width: 1600.0, height: 1200.0 };
        let url = snapshot_url(&camera("http://192.168.1.10/"), res, "t");
        assert!(url.contains("192.168.1.10/cgi-bin/"));
        assert!(!url.contains("//cgi-bin"));
    }

    #[test]
    fn test_fractional_height_kept_in_url() {
        // An explicit odd width derives a non-integral height; the URL keeps it.
        let res = Resolution { width: 1001.0, height: 750.75 };
        let url = snapshot_url(&camera("192.168.1.10"), res, "t");
        assert!(url.contains("width=1001&height=750.75&"));
    }
}
