use super::super::http_response::generate_text::GenerateTextResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, JSONBodyHTTPRequestType};

/// `POST /gemini` with the prompt wrapped in the expected
/// `{ contents: [{ parts: [{ text }] }] }` envelope.
#[derive(Debug)]
pub struct GenerateTextRequest {
    body: GenerateTextBody,
}

impl GenerateTextRequest {
    pub fn new(prompt: &str) -> Self {
        Self {
            body: GenerateTextBody {
                contents: vec![RequestContent {
                    parts: vec![RequestPart { text: String::from(prompt) }],
                }],
            },
        }
    }
}

impl JSONBodyHTTPRequestType for GenerateTextRequest {
    type Body = GenerateTextBody;
    fn json_body(&self) -> &Self::Body { &self.body }
}

impl HTTPRequestType for GenerateTextRequest {
    type Response = GenerateTextResponse;
    fn endpoint(&self) -> String { String::from("/gemini") }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Post }
    fn header_params(&self) -> reqwest::header::HeaderMap {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        headers
    }
}

#[derive(serde::Serialize, Debug)]
pub struct GenerateTextBody {
    contents: Vec<RequestContent>,
}

#[derive(serde::Serialize, Debug)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(serde::Serialize, Debug)]
struct RequestPart {
    text: String,
}
