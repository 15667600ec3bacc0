//! Anonymous usage ping.
//!
//! The ping is a GET to a configured endpoint carrying the template name,
//! `source=cli` and the tool version. It is spawned onto the current runtime
//! and never awaited; failures are only traced.

use std::sync::Arc;

use tracing::{debug, trace};

use stencil_core::{
    application::ports::UsageReporter,
    error::{StencilError, StencilResult},
};

/// Setting this variable to `1` disables the ping entirely.
pub const TELEMETRY_OPTOUT_ENV: &str = "STENCIL_TELEMETRY_OPTOUT";

pub fn telemetry_opted_out() -> bool {
    std::env::var(TELEMETRY_OPTOUT_ENV).is_ok_and(|v| v.trim() == "1")
}

/// Pick the reporter for this run: a real one only when an endpoint is
/// configured and the user has not opted out.
pub fn usage_reporter(
    endpoint: Option<&str>,
    user_agent: &str,
    version: &str,
) -> Arc<dyn UsageReporter> {
    let endpoint = match endpoint {
        Some(e) if !e.trim().is_empty() => e,
        _ => return Arc::new(NoopUsageReporter),
    };
    if telemetry_opted_out() {
        debug!("Telemetry disabled by {TELEMETRY_OPTOUT_ENV}");
        return Arc::new(NoopUsageReporter);
    }

    match HttpUsageReporter::new(endpoint, user_agent, version) {
        Ok(reporter) => Arc::new(reporter),
        Err(e) => {
            debug!(error = %e, "Telemetry unavailable");
            Arc::new(NoopUsageReporter)
        }
    }
}

/// Reporter that records nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopUsageReporter;

impl UsageReporter for NoopUsageReporter {
    fn record(&self, _name: &str) {}
}

#[derive(Debug, Clone)]
pub struct HttpUsageReporter {
    client: reqwest::Client,
    endpoint: String,
    version: String,
}

impl HttpUsageReporter {
    pub fn new(endpoint: &str, user_agent: &str, version: &str) -> StencilResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| StencilError::setup("telemetry client", e))?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            version: version.to_string(),
        })
    }

    fn request(&self, name: &str) -> reqwest::RequestBuilder {
        self.client.get(&self.endpoint).query(&[
            ("name", name),
            ("source", "cli"),
            ("version", self.version.as_str()),
        ])
    }

    /// Send one ping and return the response status.
    pub async fn send(&self, name: &str) -> Result<u16, reqwest::Error> {
        let response = self.request(name).send().await?;
        Ok(response.status().as_u16())
    }
}

impl UsageReporter for HttpUsageReporter {
    fn record(&self, name: &str) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            trace!("No async runtime, usage ping skipped");
            return;
        };

        let request = self.request(name);
        runtime.spawn(async move {
            match request.send().await {
                Ok(response) => trace!(status = response.status().as_u16(), "Usage recorded"),
                Err(e) => trace!(error = %e, "Usage ping failed"),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;

    use super::*;

    #[tokio::test]
    async fn ping_carries_name_source_and_version() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/stats/record")
                    .query_param("name", "react-app")
                    .query_param("source", "cli")
                    .query_param("version", "1.2.3");
                then.status(200);
            })
            .await;

        let reporter =
            HttpUsageReporter::new(&server.url("/stats/record"), "stencil-cli", "1.2.3").unwrap();
        assert_eq!(reporter.send("react-app").await.unwrap(), 200);
        mock.assert_async().await;
    }

    #[test]
    fn record_outside_runtime_is_silent() {
        let reporter = HttpUsageReporter::new("http://127.0.0.1:1/record", "stencil-cli", "0").unwrap();
        reporter.record("web");
    }

    #[tokio::test]
    async fn record_never_blocks_on_unreachable_endpoint() {
        let reporter = HttpUsageReporter::new("http://127.0.0.1:1/record", "stencil-cli", "0").unwrap();
        reporter.record("web");
    }

    #[test]
    fn missing_endpoint_yields_noop() {
        let reporter = usage_reporter(None, "stencil-cli", "0");
        reporter.record("web");
        let reporter = usage_reporter(Some("  "), "stencil-cli", "0");
        reporter.record("web");
    }
}
