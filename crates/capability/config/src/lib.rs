//! 应用运行配置加载。

use std::env;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_addr: String,
    /// 缺省时使用内存存储
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub apply_schema: bool,
    /// 传输层接受的共享密钥（当前密钥在前，轮换期旧密钥在后）
    pub api_keys: Vec<String>,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// 从任意键值来源读取配置。
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("MNEMOSYNE_API_KEY")
            .ok_or_else(|| ConfigError::Missing("MNEMOSYNE_API_KEY".to_string()))?;
        if api_key.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "MNEMOSYNE_API_KEY".to_string(),
                "empty".to_string(),
            ));
        }
        let mut api_keys = vec![api_key];
        if let Some(previous) = read_optional(&lookup, "MNEMOSYNE_API_KEY_PREVIOUS") {
            api_keys.push(previous);
        }

        let http_addr =
            lookup("MNEMOSYNE_HTTP_ADDR").unwrap_or_else(|| "127.0.0.1:8080".to_string());
        let database_url = read_optional(&lookup, "MNEMOSYNE_DATABASE_URL");
        let database_max_connections =
            read_u32_with_default(&lookup, "MNEMOSYNE_DB_MAX_CONNECTIONS", 8)?;
        if database_max_connections == 0 {
            return Err(ConfigError::Invalid(
                "MNEMOSYNE_DB_MAX_CONNECTIONS".to_string(),
                "0".to_string(),
            ));
        }
        let apply_schema = read_bool_with_default(&lookup, "MNEMOSYNE_APPLY_SCHEMA", false)?;

        Ok(Self {
            http_addr,
            database_url,
            database_max_connections,
            apply_schema,
            api_keys,
        })
    }
}

fn read_u32_with_default<F>(lookup: &F, key: &str, default: u32) -> Result<u32, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = match lookup(key) {
        Some(value) => value,
        None => return Ok(default),
    };
    value
        .parse::<u32>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

fn read_bool_with_default<F>(lookup: &F, key: &str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = match lookup(key) {
        Some(value) => value,
        None => return Ok(default),
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" => Ok(true),
        "0" | "false" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid(key.to_string(), value)),
    }
}
