use std::path::PathBuf;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `9000`).
    pub port: u16,
    /// Allowed CORS origins. Taken from `FRONT_URL`, which names the single
    /// front-end allowed to call the API.
    pub cors_origins: Vec<String>,
    /// Directory holding content-addressed images and `default.jpg`.
    pub image_dir: PathBuf,
    /// Maximum accepted request body size in bytes (default: 10 MiB).
    pub max_upload_bytes: usize,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `9000`                     |
    /// | `FRONT_URL`            | `http://localhost:3000`    |
    /// | `IMAGE_DIR`            | `images`                   |
    /// | `MAX_UPLOAD_BYTES`     | `10485760`                 |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "9000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let front_url = std::env::var("FRONT_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "http://localhost:3000".into());

        let image_dir = std::env::var("IMAGE_DIR")
            .unwrap_or_else(|_| "images".into())
            .into();

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| (10 * 1024 * 1024).to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins: vec![front_url.trim().to_string()],
            image_dir,
            max_upload_bytes,
            request_timeout_secs,
        }
    }
}
