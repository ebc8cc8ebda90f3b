use super::super::http_response::neo_feed::NeoFeedResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, NoBodyHTTPRequestType};
use chrono::NaiveDate;

#[derive(Debug)]
pub struct NeoFeedRequest {
    start_date: NaiveDate,
}

impl NeoFeedRequest {
    pub fn new(start_date: NaiveDate) -> Self { Self { start_date } }
}

impl NoBodyHTTPRequestType for NeoFeedRequest {}

impl HTTPRequestType for NeoFeedRequest {
    type Response = NeoFeedResponse;
    fn endpoint(&self) -> String {
        format!("/neo-feed?start_date={}", self.start_date.format("%Y-%m-%d"))
    }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Get }
}
