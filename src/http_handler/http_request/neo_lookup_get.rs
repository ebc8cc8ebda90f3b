use super::super::http_response::asteroid::AsteroidRecord;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, NoBodyHTTPRequestType};

#[derive(Debug)]
pub struct NeoLookupRequest {
    id: String,
}

impl NeoLookupRequest {
    pub fn new(id: &str) -> Self { Self { id: String::from(id) } }
}

impl NoBodyHTTPRequestType for NeoLookupRequest {}

impl HTTPRequestType for NeoLookupRequest {
    type Response = AsteroidRecord;
    fn endpoint(&self) -> String { format!("/neo-lookup/{}", self.id) }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Get }
}
