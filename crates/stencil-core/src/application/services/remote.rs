use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::{
    application::{ApplicationError, ports::HttpClient},
    error::StencilResult,
};

/// GET `url` and decode the body as JSON.
///
/// Error statuses and undecodable bodies are both terminal. The raw payload of
/// a bad body is only emitted at debug level.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    http: &dyn HttpClient,
    url: &str,
) -> StencilResult<T> {
    trace!(url, "GET");
    let response = http.get(url).await?.error_for_status(url)?;

    serde_json::from_slice(&response.body).map_err(|e| {
        debug!(
            url,
            payload = %String::from_utf8_lossy(&response.body),
            "Invalid JSON"
        );
        ApplicationError::MalformedResponse {
            url: url.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}
