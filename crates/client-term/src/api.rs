use std::time::Duration;

use anyhow::Result;
use onam_core::{
    api::{SubmitRequest, SubmitResponse},
    leaderboard::Entry,
};

/// Blocking client for the leaderboard service. The timeout is short so an
/// unreachable server stalls the game loop for at most a moment.
pub struct LeaderboardClient {
    agent: ureq::Agent,
    base: String,
}

impl LeaderboardClient {
    pub fn new(base: String) -> LeaderboardClient {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(2)))
            .build();
        LeaderboardClient {
            agent: config.into(),
            base: base.trim_end_matches('/').to_owned(),
        }
    }

    pub fn fetch(&self) -> Result<Vec<Entry>> {
        let entries = self
            .agent
            .get(format!("{}/leaderboard", self.base))
            .call()?
            .body_mut()
            .read_json::<Vec<Entry>>()?;
        Ok(entries)
    }

    pub fn submit(&self, name: &str, score: u32) -> Result<SubmitResponse> {
        let response = self
            .agent
            .post(format!("{}/leaderboard", self.base))
            .send_json(SubmitRequest {
                name: name.to_owned(),
                score,
            })?
            .body_mut()
            .read_json::<SubmitResponse>()?;
        Ok(response)
    }
}
