use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Folder (relative to the working directory) that receives downloaded images.
pub const DEFAULT_DEST_FOLDER: &str = "Fetched_Images";
/// Filename used when a URL path has no usable last segment.
pub const DEFAULT_FALLBACK_FILENAME: &str = "downloaded_image.jpg";
/// Input line that ends URL entry (compared case-insensitively after trimming).
pub const DEFAULT_TERMINATOR: &str = "done";

/// Global configuration loaded from `~/.config/imgfetch/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Destination folder for saved images; created on first write.
    pub dest_folder: PathBuf,
    /// Whole-request timeout in seconds (connect + transfer).
    pub timeout_secs: u64,
    /// Filename used when the URL path ends in `/` or has no segment.
    pub fallback_filename: String,
    /// Sentinel line that ends URL entry.
    pub terminator: String,
    /// `User-Agent` header sent with every GET.
    pub user_agent: String,
    /// Maximum number of redirects followed per request.
    pub max_redirects: u32,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            dest_folder: PathBuf::from(DEFAULT_DEST_FOLDER),
            timeout_secs: 10,
            fallback_filename: DEFAULT_FALLBACK_FILENAME.to_string(),
            terminator: DEFAULT_TERMINATOR.to_string(),
            user_agent: concat!("imgfetch/", env!("CARGO_PKG_VERSION")).to_string(),
            max_redirects: 10,
        }
    }
}

impl FetcherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Rejects values that would leave a request unbounded or input unterminated.
    pub fn validate(&self) -> Result<()> {
        // libcurl treats a zero timeout as "wait forever".
        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be at least 1");
        }
        if self.terminator.trim().is_empty() {
            anyhow::bail!("terminator must not be empty");
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("imgfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FetcherConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FetcherConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit path. The file must exist.
pub fn load_from(path: &Path) -> Result<FetcherConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let cfg: FetcherConfig = toml::from_str(&data)
        .with_context(|| format!("invalid config: {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config: {}", path.display()))?;
    Ok(cfg)
}
