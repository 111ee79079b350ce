use std::{env, path::PathBuf};

/// Service configuration, read once from the environment at startup.
///
/// The remote KV is optional; without `ONAM_KV_URL`/`ONAM_KV_TOKEN` the
/// service runs mirror-only and reports `kvAvailable: false`, which is how
/// local development works.
pub struct Config {
    pub bind: String,
    pub kv_url: Option<String>,
    pub kv_token: Option<String>,
    pub mirror: PathBuf,
}

impl Config {
    pub fn from_env() -> Config {
        Config {
            bind: env::var("ONAM_BIND").unwrap_or_else(|_| "127.0.0.1:9002".to_owned()),
            kv_url: env::var("ONAM_KV_URL")
                .ok()
                .map(|url| url.trim_end_matches('/').to_owned()),
            kv_token: env::var("ONAM_KV_TOKEN").ok(),
            mirror: env::var("ONAM_MIRROR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("onam-leaderboard.json")),
        }
    }
}
