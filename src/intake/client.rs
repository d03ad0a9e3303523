//! HTTP client for the intake endpoint
//!
//! Posts the application as JSON. ureq is blocking, so each delivery runs
//! on tokio's blocking pool.

use super::traits::{IntakeClientTrait, IntakeError};
use crate::state::FormState;
use async_trait::async_trait;
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Client for the registry's intake endpoint
#[derive(Clone)]
pub struct IntakeClient {
    agent: ureq::Agent,
    url: String,
}

impl IntakeClient {
    pub fn new(url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(CONNECT_TIMEOUT)
            .timeout_read(REQUEST_TIMEOUT)
            .timeout_write(REQUEST_TIMEOUT)
            .build();
        Self {
            agent,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn post(agent: &ureq::Agent, url: &str, body: &str) -> Result<(), IntakeError> {
    let response = agent
        .post(url)
        .set("Content-Type", "application/json")
        .send_string(body);
    match response {
        Ok(resp) if (200..=299).contains(&resp.status()) => Ok(()),
        Ok(resp) => Err(IntakeError::Status(resp.status())),
        Err(ureq::Error::Status(code, _)) => Err(IntakeError::Status(code)),
        Err(ureq::Error::Transport(transport)) => {
            Err(IntakeError::Transport(transport.to_string()))
        }
    }
}

#[async_trait]
impl IntakeClientTrait for IntakeClient {
    async fn deliver(&self, payload: &FormState) -> Result<(), IntakeError> {
        let body = serde_json::to_string(payload).map_err(|e| IntakeError::Encode(e.to_string()))?;
        let agent = self.agent.clone();
        let url = self.url.clone();
        tokio::task::spawn_blocking(move || post(&agent, &url, &body))
            .await
            .map_err(|e| IntakeError::Task(e.to_string()))?
    }
}
