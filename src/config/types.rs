use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub dashscope: DashScopeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding the landing page and its assets.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashScopeConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Never defaulted; supplied by the config file or `DASHSCOPE_API_KEY`.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    #[serde(default = "default_edit_timeout_secs")]
    pub edit_timeout_secs: u64,
    #[serde(default = "default_debug_timeout_secs")]
    pub debug_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            logs: LogsConfig::default(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for DashScopeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            edit_timeout_secs: default_edit_timeout_secs(),
            debug_timeout_secs: default_debug_timeout_secs(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "https://dashscope.aliyuncs.com/api/v1".to_string()
}

fn default_edit_timeout_secs() -> u64 {
    60
}

fn default_debug_timeout_secs() -> u64 {
    30
}
