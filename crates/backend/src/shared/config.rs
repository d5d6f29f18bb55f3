use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub source: SourceConfig,
    pub server: ServerConfig,
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    /// CSV file with the inventory/profitability rows.
    pub path: String,
    /// How long a loaded dataset is reused before the file is checked again.
    pub cache_ttl_secs: u64,
}

impl SourceConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub default_top_n: usize,
    pub min_top_n: usize,
    pub max_top_n: usize,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[source]
path = "data/df_estoque_st.csv"
cache_ttl_secs = 3600

[server]
host = "127.0.0.1"
port = 3000

[dashboard]
default_top_n = 7
min_top_n = 5
max_top_n = 20
"#;

/// Parse and sanity-check a TOML document.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;

    let d = &config.dashboard;
    if d.min_top_n == 0 || d.min_top_n > d.max_top_n {
        anyhow::bail!(
            "invalid top_n bounds: min_top_n={} max_top_n={}",
            d.min_top_n,
            d.max_top_n
        );
    }
    if !(d.min_top_n..=d.max_top_n).contains(&d.default_top_n) {
        anyhow::bail!(
            "default_top_n={} outside [{}, {}]",
            d.default_top_n,
            d.min_top_n,
            d.max_top_n
        );
    }

    Ok(config)
}

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return parse_config(&contents);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

/// Resolve the source file path.
///
/// Absolute paths are used as is. Relative paths are tried next to the
/// executable first, then relative to the current directory.
pub fn get_source_path(config: &Config) -> PathBuf {
    let source_path = Path::new(&config.source.path);

    if source_path.is_absolute() {
        return source_path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let resolved_path = exe_dir.join(source_path);
            if resolved_path.exists() {
                return resolved_path;
            }
        }
    }

    source_path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.source.path, "data/df_estoque_st.csv");
        assert_eq!(config.source.cache_ttl(), Duration::from_secs(3600));
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.dashboard.default_top_n, 7);
        assert_eq!(config.dashboard.min_top_n, 5);
        assert_eq!(config.dashboard.max_top_n, 20);
    }

    #[test]
    fn test_invalid_top_n_bounds_rejected() {
        let contents = DEFAULT_CONFIG.replace("default_top_n = 7", "default_top_n = 30");
        assert!(parse_config(&contents).is_err());

        let contents = DEFAULT_CONFIG.replace("min_top_n = 5", "min_top_n = 0");
        assert!(parse_config(&contents).is_err());
    }

    #[test]
    fn test_missing_section_rejected() {
        assert!(parse_config("[source]\npath = \"x.csv\"\ncache_ttl_secs = 1\n").is_err());
    }

    #[test]
    fn test_absolute_source_path_kept() {
        let mut config = parse_config(DEFAULT_CONFIG).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let abs = dir.path().join("estoque.csv");
        config.source.path = abs.to_string_lossy().into_owned();
        assert_eq!(get_source_path(&config), abs);
    }
}
