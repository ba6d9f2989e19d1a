//! Config - 環境変数からの設定
//!
//! | 変数              | 既定値             |
//! |-------------------|--------------------|
//! | `LUNAR_ADDR`      | `0.0.0.0:8088`     |
//! | `LUNAR_TOPIC`     | `rockets.messages` |
//! | `LUNAR_CONSUMERS` | `1`                |
//! | `LUNAR_POLL_MS`   | `200`              |
//! | `LUNAR_LOG_JSON`  | `false`            |
//!
//! 未設定なら既定値、設定されていて parse できなければ起動時にエラー。

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_TOPIC: &str = "rockets.messages";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub topic: String,
    pub consumers: usize,
    /// consumer が 1 回の pop で待つ時間（shutdown の反応速度もこれで決まる）
    pub poll_interval: Duration,
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8088)),
            topic: DEFAULT_TOPIC.to_string(),
            consumers: 1,
            poll_interval: Duration::from_millis(200),
            log_json: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// `lookup` は変数名から値を返す（テストでは HashMap などを渡す）
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            bind_addr: parse_or(&lookup, "LUNAR_ADDR", defaults.bind_addr)?,
            topic: lookup("LUNAR_TOPIC").unwrap_or(defaults.topic),
            consumers: parse_or(&lookup, "LUNAR_CONSUMERS", defaults.consumers)?,
            poll_interval: parse_or(&lookup, "LUNAR_POLL_MS", 200u64).map(Duration::from_millis)?,
            log_json: parse_or(&lookup, "LUNAR_LOG_JSON", defaults.log_json)?,
        })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}
