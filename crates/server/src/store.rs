use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use onam_core::leaderboard::Leaderboard;
use serde::Deserialize;

use crate::config::Config;

/// Key the serialized leaderboard lives under in the remote KV.
const KV_KEY: &str = "onam-snake-leaderboard";

/// One storage facade over two backends: the remote KV when it answers, a
/// local JSON mirror otherwise. Callers learn which one served them through
/// the boolean availability flag, never through an error.
pub struct Storage {
    remote: Option<RemoteKv>,
    mirror: Mirror,
}

impl Storage {
    pub fn new(config: &Config) -> Storage {
        let remote = match (&config.kv_url, &config.kv_token) {
            (Some(url), Some(token)) => {
                info!("Remote KV configured at {url}");
                Some(RemoteKv::new(url.clone(), token.clone()))
            }
            _ => {
                info!("No remote KV configured, serving from the local mirror");
                None
            }
        };
        Storage {
            remote,
            mirror: Mirror {
                path: config.mirror.clone(),
            },
        }
    }

    #[cfg(test)]
    pub(crate) fn mirror_only(path: PathBuf) -> Storage {
        Storage {
            remote: None,
            mirror: Mirror { path },
        }
    }

    /// Reads the leaderboard, remote first. The flag reports whether the
    /// remote store answered. A missing mirror file is an empty list; a
    /// corrupt one is a real error.
    pub async fn load(&self) -> Result<(Leaderboard, bool)> {
        if let Some(remote) = &self.remote {
            match remote.get().await {
                Ok(board) => return Ok((board.unwrap_or_default(), true)),
                Err(e) => warn!("KV not available, reading the mirror: {e:#}"),
            }
        }
        Ok((self.mirror.read()?, false))
    }

    /// Writes the leaderboard, remote first with the mirror as fallback.
    /// Returns whether the remote store took the write.
    pub async fn save(&self, board: &Leaderboard) -> Result<bool> {
        if let Some(remote) = &self.remote {
            match remote.set(board).await {
                Ok(()) => return Ok(true),
                Err(e) => warn!("KV not available, writing to the mirror: {e:#}"),
            }
        }
        self.mirror.write(board)?;
        Ok(false)
    }
}

/// Upstash-style KV REST: bearer token, `GET {url}/get/{key}` answering
/// `{"result": <stringified value> | null}`, `POST {url}/set/{key}` with the
/// value as the raw body.
struct RemoteKv {
    client: reqwest::Client,
    url: String,
    token: String,
}

#[derive(Deserialize)]
struct GetResult {
    result: Option<String>,
}

impl RemoteKv {
    fn new(url: String, token: String) -> RemoteKv {
        RemoteKv {
            client: reqwest::Client::new(),
            url,
            token,
        }
    }

    async fn get(&self) -> Result<Option<Leaderboard>> {
        let response = self
            .client
            .get(format!("{}/get/{KV_KEY}", self.url))
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?;

        let body: GetResult = response.json().await?;
        match body.result {
            Some(raw) => Ok(Some(
                serde_json::from_str(&raw).context("malformed leaderboard in KV")?,
            )),
            None => Ok(None),
        }
    }

    async fn set(&self, board: &Leaderboard) -> Result<()> {
        let raw = serde_json::to_string(board)?;
        self.client
            .post(format!("{}/set/{KV_KEY}", self.url))
            .bearer_auth(&self.token)
            .body(raw)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

struct Mirror {
    path: PathBuf,
}

impl Mirror {
    fn read(&self) -> Result<Leaderboard> {
        if !self.path.exists() {
            return Ok(Leaderboard::new());
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("could not read mirror at {}", self.path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("corrupt mirror at {}", self.path.display()))
    }

    fn write(&self, board: &Leaderboard) -> Result<()> {
        let raw = serde_json::to_string_pretty(board)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("could not write mirror at {}", self.path.display()))
    }
}
