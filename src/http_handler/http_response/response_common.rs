use strum_macros::Display;

pub(crate) trait JSONBodyHTTPResponseType: HTTPResponseType {
    async fn parse_json_body(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError>
    where Self::ParsedResponseType: for<'de> serde::Deserialize<'de> {
        Ok(response.json::<Self::ParsedResponseType>().await?)
    }
}

/// Marker for response types that are plain serde deserializations of a JSON
/// body behind the default status handling.
pub(crate) trait SerdeJSONBodyHTTPResponseType {}

impl<T> JSONBodyHTTPResponseType for T
where
    T: SerdeJSONBodyHTTPResponseType,
    for<'de> T: serde::Deserialize<'de>,
{
}

impl<T> HTTPResponseType for T
where
    T: SerdeJSONBodyHTTPResponseType,
    for<'de> T: serde::Deserialize<'de>,
{
    type ParsedResponseType = T;

    async fn read_response(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError> {
        let resp = Self::unwrap_return_code(response).await?;
        Self::parse_json_body(resp).await
    }
}

pub(crate) trait HTTPResponseType {
    type ParsedResponseType;
    async fn read_response(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError>;

    async fn unwrap_return_code(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ResponseError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else if status == reqwest::StatusCode::NOT_FOUND {
            Err(ResponseError::NotFound)
        } else if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            Err(ResponseError::RateLimited)
        } else {
            Err(ResponseError::Upstream(status_reason(status)))
        }
    }
}

/// Human-readable reason for a status code, falling back to the bare number
/// for codes without a canonical reason phrase.
pub(crate) fn status_reason(status: reqwest::StatusCode) -> String {
    status.canonical_reason().map_or_else(|| status.as_u16().to_string(), str::to_string)
}

#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum ResponseError {
    /// The backend reported 404 for the requested resource.
    NotFound,
    /// The backend reported 429; transient on text generation, where the
    /// caller retries before giving up.
    #[strum(to_string = "Too Many Requests")]
    RateLimited,
    /// Any other non-success status, carrying its reason text.
    #[strum(to_string = "{0}")]
    Upstream(String),
    /// A success body that did not match the expected shape.
    #[strum(to_string = "malformed response body")]
    InvalidShape,
    #[strum(to_string = "no connection to the backend")]
    NoConnection,
    Unknown,
}

impl std::error::Error for ResponseError {}
impl From<reqwest::Error> for ResponseError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            ResponseError::InvalidShape
        } else if value.is_timeout() || value.is_redirect() {
            ResponseError::Upstream(value.to_string())
        } else if value.is_connect() {
            ResponseError::NoConnection
        } else {
            ResponseError::Unknown
        }
    }
}
