use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_SESSION_DB: &str = "sqlite:yivote_session.db";
const DEFAULT_REFRESH_SECS: u64 = 10; // live results page polls every 10s

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub session_db: String,
    pub refresh_interval: Duration,
    pub dev_mode: bool,
    pub export_dir: PathBuf,
}

impl Config {
    /// Reads `YIVOTE_*` variables from the process environment.
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("YIVOTE_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let session_db =
            lookup("YIVOTE_SESSION_DB").unwrap_or_else(|| DEFAULT_SESSION_DB.to_string());

        let refresh_secs = match lookup("YIVOTE_REFRESH_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(0) | Err(_) => {
                    return Err(Error::Config {
                        key: "YIVOTE_REFRESH_SECS",
                        reason: format!("expected a positive number of seconds, got {:?}", raw),
                    });
                }
                Ok(secs) => secs,
            },
            None => DEFAULT_REFRESH_SECS,
        };

        let dev_mode = match lookup("YIVOTE_DEV_MODE") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| Error::Config {
                key: "YIVOTE_DEV_MODE",
                reason: format!("expected true/false, got {:?}", raw),
            })?,
            None => false,
        };

        let export_dir = lookup("YIVOTE_EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            api_url,
            session_db,
            refresh_interval: Duration::from_secs(refresh_secs),
            dev_mode,
            export_dir,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
