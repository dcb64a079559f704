use std::str::FromStr;
use std::time::Duration;

use log::LevelFilter;
use thiserror::Error;

use crate::fetch::DEFAULT_PARALLEL;
use crate::hipchat::DEFAULT_API_URL;

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value `{value}` for {name}")]
    Invalid { name: &'static str, value: String },
    #[error("{0} must be positive")]
    NotPositive(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub http_timeout: Duration,
    pub parallel: usize,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            parallel: DEFAULT_PARALLEL,
            log_level: LevelFilter::Info,
        }
    }
}

fn parse_var<T, F>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

impl Config {
    /// Reads the process environment, including a `.env` file if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| dotenv::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();

        let timeout_secs =
            parse_var(&lookup, "EMOJIPACK_HTTP_TIMEOUT", DEFAULT_HTTP_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::NotPositive("EMOJIPACK_HTTP_TIMEOUT"));
        }
        let parallel = parse_var(&lookup, "EMOJIPACK_PARALLEL", default.parallel)?;
        if parallel == 0 {
            return Err(ConfigError::NotPositive("EMOJIPACK_PARALLEL"));
        }

        Ok(Self {
            api_url: lookup("HIPCHAT_API_URL").unwrap_or(default.api_url),
            http_timeout: Duration::from_secs(timeout_secs),
            parallel,
            log_level: parse_var(&lookup, "EMOJIPACK_LOG", default.log_level)?,
        })
    }
}
