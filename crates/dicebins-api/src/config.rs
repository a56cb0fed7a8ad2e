use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_ENV: &str = "DICEBINS_CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "dicebins.toml";

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    #[serde(default = "default_env_type")]
    pub env_type: String,
}

impl Default for Environment {
    fn default() -> Self {
        Self { env_type: default_env_type() }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_true")]
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), enable_cors: true }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Caps on what a single HTTP response may materialise.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LimitsConfig {
    #[serde(default = "default_max_precincts")]
    pub max_precincts: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self { max_precincts: default_max_precincts() }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: default_log_filter(), json: false }
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct DicebinsConfig {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DicebinsConfig {
    /// Loads the file named by `DICEBINS_CONFIG_PATH` (default `dicebins.toml`).
    /// A missing file yields the built-in defaults; a malformed one is an error.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Self::config_path())
    }

    pub fn config_path() -> PathBuf {
        std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(config_str) => Self::from_toml_str(&config_str)
                .map_err(|e| anyhow::anyhow!("failed to parse {}: {e}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(anyhow::anyhow!("failed to read {}: {e}", path.display())),
        }
    }

    pub fn from_toml_str(config_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(config_str)
    }

    /// Applies `DICEBINS_*` environment overrides. Unparseable values are ignored.
    pub fn apply_profile(mut self) -> Self {
        if let Ok(host) = std::env::var("DICEBINS_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("DICEBINS_PORT") {
            if let Ok(port_num) = port.parse::<u16>() {
                self.server.port = port_num;
            }
        }
        if let Ok(cors) = std::env::var("DICEBINS_ENABLE_CORS") {
            if let Ok(cors_flag) = cors.parse::<bool>() {
                self.server.enable_cors = cors_flag;
            }
        }
        if let Ok(max_precincts) = std::env::var("DICEBINS_MAX_PRECINCTS") {
            if let Ok(max_precincts_num) = max_precincts.parse::<u64>() {
                self.limits.max_precincts = max_precincts_num;
            }
        }
        if let Ok(json) = std::env::var("DICEBINS_LOG_JSON") {
            if let Ok(json_flag) = json.parse::<bool>() {
                self.logging.json = json_flag;
            }
        }

        self
    }
}

fn default_env_type() -> String {
    "default".to_string()
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    3000
}
fn default_true() -> bool {
    true
}
fn default_max_precincts() -> u64 {
    100_000
}
fn default_log_filter() -> String {
    "dicebins=debug,dicebins_api=debug,tower_http=debug,info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_uses_defaults() {
        let config = DicebinsConfig::from_toml_str("").unwrap();
        assert_eq!(config, DicebinsConfig::default());
        assert_eq!(config.server.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.limits.max_precincts, 100_000);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = DicebinsConfig::from_toml_str(
            r#"
[server]
port = 8080

[limits]
max_precincts = 500
"#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(config.server.enable_cors);
        assert_eq!(config.limits.max_precincts, 500);
        assert!(!config.logging.json);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = \"not a port\"").unwrap();
        assert!(DicebinsConfig::load_from(file.path()).is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DicebinsConfig::load_from(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, DicebinsConfig::default());
    }
}
