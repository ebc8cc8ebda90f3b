use super::asteroid::AsteroidRecord;
use super::response_common::{
    HTTPResponseType, JSONBodyHTTPResponseType, ResponseError, status_reason,
};
use std::collections::BTreeMap;

/// The weekly feed: records keyed by ISO calendar date. A `BTreeMap` keeps the
/// date keys in chronological order, so flattening preserves a deterministic
/// input order for sort tie-breaking.
#[derive(serde::Deserialize, Debug, Clone)]
pub struct NeoFeedResponse {
    near_earth_objects: BTreeMap<String, Vec<AsteroidRecord>>,
}

impl NeoFeedResponse {
    pub fn near_earth_objects(&self) -> &BTreeMap<String, Vec<AsteroidRecord>> {
        &self.near_earth_objects
    }
}

impl JSONBodyHTTPResponseType for NeoFeedResponse {}

impl HTTPResponseType for NeoFeedResponse {
    type ParsedResponseType = NeoFeedResponse;

    async fn read_response(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError> {
        let resp = Self::unwrap_return_code(response).await?;
        Self::parse_json_body(resp).await
    }

    /// The feed endpoint reports failures with an optional structured body:
    /// `{error:{message}}` or `{error_message}`. Probe those first and fall
    /// back to the bare status text.
    async fn unwrap_return_code(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ResponseError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let mut message = format!("NASA NeoWs API returned an error: {}", status.as_u16());
        let detail = response.json::<FeedErrorBody>().await.ok().and_then(|b| b.into_message());
        match detail {
            Some(m) => message.push_str(&format!(" - {m}")),
            None => message.push_str(&format!(" {}", status_reason(status))),
        }
        Err(ResponseError::Upstream(message))
    }
}

#[derive(serde::Deserialize, Debug)]
struct FeedErrorBody {
    #[serde(default)]
    error: Option<FeedErrorDetail>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(serde::Deserialize, Debug)]
struct FeedErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

impl FeedErrorBody {
    fn into_message(self) -> Option<String> {
        self.error.and_then(|e| e.message).or(self.error_message)
    }
}
