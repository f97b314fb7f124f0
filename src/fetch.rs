use std::time::Duration;

use tracing::{error, info, info_span};
use ureq::Agent;

use crate::error::FetchError;

/// Blocking HTTP client for schedule pages. One GET per call, no retries.
#[derive(Clone)]
pub struct Fetcher {
    agent: Agent,
    user_agent: String,
}

impl Fetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Self {
        // Non-2xx responses are mapped to FetchError::Status below.
        let config = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build();
        Self {
            agent: Agent::new_with_config(config),
            user_agent: user_agent.to_string(),
        }
    }

    /// GET `url` and return the body as text.
    pub fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response_result = {
            let _span = info_span!("schedule_fetch", url = %url).entered();
            self.agent
                .get(url)
                .header("User-Agent", self.user_agent.as_str())
                .call()
        };
        let response = response_result.map_err(|e| {
            error!(error = %e, url = %url, "Request failed");
            FetchError::Transport(e.to_string())
        })?;

        let code = response.status().as_u16();
        if !(200..300).contains(&code) {
            error!(status = code, url = %url, "Schedule GET returned non-success status");
            return Err(FetchError::Status { code, url: url.to_string() });
        }

        let mut body_reader = response.into_body();
        let body = body_reader.read_to_string().map_err(|e| {
            error!(error = %e, "Failed to read response body");
            FetchError::Body(e.to_string())
        })?;
        info!(status = code, bytes = body.len(), "Fetched schedule");
        Ok(body)
    }
}
