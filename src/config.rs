use std::env;
use std::path::PathBuf;
use anyhow::{bail, Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub service_port: u16,
    pub service_host: String,
    /// Always starts and ends with `/`.
    pub mount_prefix: String,
    /// Served at `/static`. The route-finder pages expect it to hold
    /// `scripts/hoghackproject.js`, which is deployed alongside the binary.
    pub static_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let service_port = lookup("SERVICE_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = lookup("SERVICE_HOST")
            .unwrap_or_else(|| "0.0.0.0".to_string());

        let mount_prefix = normalize_mount_prefix(
            &lookup("MOUNT_PREFIX").unwrap_or_else(|| "/".to_string()),
        )
        .context("MOUNT_PREFIX is invalid")?;

        let static_dir = lookup("STATIC_DIR")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);

        Ok(Config {
            service_port,
            service_host,
            mount_prefix,
            static_dir,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.service_host, self.service_port)
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Pages mounted at: {}", self.mount_prefix);
        tracing::info!("  Static files: {}",
            self.static_dir
                .as_ref()
                .map(|dir| dir.display().to_string())
                .unwrap_or_else(|| "disabled".to_string()));
        tracing::info!("  Service listening on: {}", self.bind_address());
    }
}

fn normalize_mount_prefix(prefix: &str) -> Result<String> {
    if !prefix.starts_with('/') {
        bail!("mount prefix must start with '/', got '{}'", prefix);
    }
    if prefix.contains(['?', '#', '{', '}']) {
        bail!("mount prefix must be a plain path, got '{}'", prefix);
    }
    if prefix.ends_with('/') {
        Ok(prefix.to_string())
    } else {
        Ok(format!("{}/", prefix))
    }
}
