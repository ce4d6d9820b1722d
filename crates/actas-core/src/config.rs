use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Browser-like User-Agent; the results API rejects bare library agents.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const MAX_DELAY_SECS: f64 = 3600.0;

/// Global configuration loaded from `~/.config/actas/config.toml` (or `--config`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Results endpoint that accepts one mesa per POST.
    pub endpoint: String,
    /// CSV roster listing every mesa to fetch.
    pub roster_path: PathBuf,
    /// Header of the roster column holding the mesa codes.
    pub id_column: String,
    /// Roster field delimiter (single ASCII character).
    pub delimiter: char,
    /// Directory that receives `mesa_<id>.jpg` files; created on demand.
    pub output_dir: PathBuf,
    /// Pause between consecutive requests, in seconds (e.g. 0.5 = 500ms).
    pub delay_secs: f64,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    /// JSON field name carrying the mesa code in the request body.
    pub request_field: String,
    pub user_agent: String,
    /// Extra request headers sent with every request.
    pub headers: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: "https://computo.oep.org.bo/api/v1/resultados/mesa".to_string(),
            roster_path: PathBuf::from("mesas.csv"),
            id_column: "CodigoMesa".to_string(),
            delimiter: ',',
            output_dir: PathBuf::from("oep_tally_sheets"),
            delay_secs: 0.5,
            timeout_secs: 10,
            request_field: "codigoMesa".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headers: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn delay(&self) -> Duration {
        Duration::from_secs_f64(self.delay_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Delimiter as the byte the CSV reader expects. Only valid after `validate`.
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter as u8
    }

    /// Pretty TOML, as written to a fresh config file.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        let endpoint = url::Url::parse(&self.endpoint)
            .with_context(|| format!("invalid endpoint URL: {}", self.endpoint))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            bail!("endpoint must be http or https, got {}", endpoint.scheme());
        }
        if !(0.0..=MAX_DELAY_SECS).contains(&self.delay_secs) {
            bail!(
                "delay_secs must be between 0 and {}, got {}",
                MAX_DELAY_SECS,
                self.delay_secs
            );
        }
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be greater than zero");
        }
        if self.id_column.trim().is_empty() {
            bail!("id_column must not be empty");
        }
        if self.request_field.trim().is_empty() {
            bail!("request_field must not be empty");
        }
        if !self.delimiter.is_ascii() || self.delimiter == '"' || self.delimiter == '\n' {
            bail!("delimiter must be a single ASCII character, got {:?}", self.delimiter);
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("actas")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from `path`, creating a default file if none exists.
pub fn load_or_init_at(path: &Path) -> Result<Config> {
    if !path.exists() {
        let default_cfg = Config::default();
        let toml = default_cfg.to_toml()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, toml).with_context(|| format!("write config: {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data =
        fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    let cfg: Config =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}
