use std::path::PathBuf;

use stockroom_core::facets::FacetScope;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory uploaded photo assets are written to.
    pub upload_dir: PathBuf,
    /// Which products brand/size/condition facets are computed over.
    pub facet_scope: FacetScope,
    /// Safety cap on the number of rows a CSV export may contain.
    pub export_row_cap: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `UPLOAD_DIR`           | `storage/uploads`          |
    /// | `FACET_SCOPE`          | `in_stock`                 |
    /// | `EXPORT_ROW_CAP`       | `10000`                    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let upload_dir = PathBuf::from(
            std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "storage/uploads".into()),
        );

        let facet_scope: FacetScope = std::env::var("FACET_SCOPE")
            .unwrap_or_else(|_| "in_stock".into())
            .parse()
            .expect("FACET_SCOPE must be 'in_stock' or 'all'");

        let export_row_cap: i64 = std::env::var("EXPORT_ROW_CAP")
            .unwrap_or_else(|_| "10000".into())
            .parse()
            .expect("EXPORT_ROW_CAP must be a valid i64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            upload_dir,
            facet_scope,
            export_row_cap,
        }
    }
}
