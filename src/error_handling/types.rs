use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ConfigError {
    InvalidResolution(String),
    InvalidQuality(String),
    InvalidOutputPath(PathBuf),
    MalformedCredentials(String),
    NoCameras(PathBuf),
    IoError(std::io::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidResolution(s) => write!(f, "Invalid resolution: {}", s),
            ConfigError::InvalidQuality(s) => write!(f, "Invalid quality: {}", s),
            ConfigError::InvalidOutputPath(p) => write!(f, "Invalid output path: {}", p.display()),
            ConfigError::MalformedCredentials(s) => write!(f, "Credential file error: {}", s),
            ConfigError::NoCameras(p) => write!(f, "No cameras configured in {}", p.display()),
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

#[derive(Debug)]
pub enum FetchError {
    InvalidAddress(String),
    Status(u16),
    Transport(reqwest::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::InvalidAddress(a) => write!(f, "Invalid camera address: {}", a),
            FetchError::Status(code) => write!(f, "Snapshot request failed with HTTP {}", code),
            FetchError::Transport(e) => write!(f, "Snapshot request failed: {}", e),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err)
    }
}

#[derive(Debug)]
pub enum StorageError {
    EmptyRoot,
    ListFailed(std::io::Error),
    WriteFailed(std::io::Error),
    Optimize(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::EmptyRoot => write!(f, "Storage root holds no date buckets"),
            StorageError::ListFailed(e) => write!(f, "Directory listing failed: {}", e),
            StorageError::WriteFailed(e) => write!(f, "Snapshot write failed: {}", e),
            StorageError::Optimize(e) => write!(f, "Image optimization failed: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}
