//! Configuration module
//!
//! Service configuration is read from the environment (optionally seeded
//! from a `.env` file). Storage is optional: without a backend the service
//! still transforms images but rejects persistence requests.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{DEFAULT_MAX_BODY_SIZE_MB, DEFAULT_OPERATION_TIMEOUT_SECS, DEFAULT_PORT};
use crate::storage_types::StorageBackend;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub max_body_size_bytes: usize,
    /// 0 disables the deadline
    pub operation_timeout_secs: u64,
    pub watermark_font_path: Option<PathBuf>,
    // Storage configuration
    pub storage_backend: Option<StorageBackend>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, etc.)
    pub aws_region: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_port: DEFAULT_PORT,
            environment: "development".to_string(),
            max_body_size_bytes: DEFAULT_MAX_BODY_SIZE_MB * 1024 * 1024,
            operation_timeout_secs: DEFAULT_OPERATION_TIMEOUT_SECS,
            watermark_font_path: None,
            storage_backend: None,
            s3_region: None,
            s3_endpoint: None,
            aws_region: None,
            local_storage_path: None,
            local_storage_base_url: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let max_body_size_mb = env::var("MAX_BODY_SIZE_MB")
            .unwrap_or_else(|_| DEFAULT_MAX_BODY_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(DEFAULT_MAX_BODY_SIZE_MB);

        let storage_backend = match env::var("STORAGE_BACKEND") {
            Ok(s) if !s.trim().is_empty() => Some(s.parse::<StorageBackend>()?),
            _ => None,
        };

        let config = Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment,
            max_body_size_bytes: max_body_size_mb * 1024 * 1024,
            operation_timeout_secs: env::var("OPERATION_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_OPERATION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(DEFAULT_OPERATION_TIMEOUT_SECS),
            watermark_font_path: env::var("WATERMARK_FONT_PATH").ok().map(PathBuf::from),
            storage_backend,
            s3_region: env::var("S3_REGION").ok(),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            aws_region: env::var("AWS_REGION").ok(),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL").ok(),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_body_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_BODY_SIZE_MB must be greater than 0"));
        }

        match self.storage_backend {
            Some(StorageBackend::Local) if self.local_storage_path.is_none() => Err(
                anyhow::anyhow!("LOCAL_STORAGE_PATH must be set when STORAGE_BACKEND=local"),
            ),
            Some(StorageBackend::S3) if self.region().is_none() => Err(anyhow::anyhow!(
                "S3_REGION or AWS_REGION must be set when STORAGE_BACKEND=s3"
            )),
            _ => Ok(()),
        }
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    /// Deadline applied to each engine and storage call, if any
    pub fn operation_timeout(&self) -> Option<Duration> {
        if self.operation_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.operation_timeout_secs))
        }
    }

    pub fn storage_backend(&self) -> Option<StorageBackend> {
        self.storage_backend
    }

    /// S3 region, falling back to the standard AWS variable
    pub fn region(&self) -> Option<&str> {
        self.s3_region.as_deref().or(self.aws_region.as_deref())
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.s3_endpoint.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.local_storage_path.as_deref()
    }

    pub fn local_storage_base_url(&self) -> Option<&str> {
        self.local_storage_base_url.as_deref()
    }
}
