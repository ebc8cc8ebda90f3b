use crate::http_handler::{
    GatewayError,
    http_client::HTTPClient,
    http_request::{
        generate_text_post::GenerateTextRequest,
        neo_feed_get::NeoFeedRequest,
        neo_lookup_get::NeoLookupRequest,
        request_common::{JSONBodyHTTPRequestType, NoBodyHTTPRequestType},
    },
    http_response::{
        asteroid::AsteroidRecord, neo_feed::NeoFeedResponse, response_common::ResponseError,
    },
};
use crate::log;
use chrono::NaiveDate;
use std::time::Duration;

/// Facade over the three backend routes. Owns the HTTP client; panels share
/// one gateway behind an `Arc`.
///
/// No caching and no dedup of identical in-flight requests: every trigger is
/// one fresh call.
#[derive(Debug)]
pub struct NeoGateway {
    client: HTTPClient,
}

impl NeoGateway {
    /// Retries after a rate-limited text-generation call, on top of the
    /// initial attempt.
    const TEXT_GEN_RETRIES: u32 = 3;
    /// Backoff before the first retry; doubled after every further 429.
    const TEXT_GEN_BASE_DELAY: Duration = Duration::from_millis(1000);

    pub fn new(base_url: &str) -> Self {
        Self { client: HTTPClient::new(base_url) }
    }

    /// Fetches a single record by SPK-ID. A backend 404 becomes
    /// [`GatewayError::NotFound`] carrying the requested id; any other
    /// non-success status is upstream. Never retried.
    pub async fn lookup_asteroid(&self, id: &str) -> Result<AsteroidRecord, GatewayError> {
        match NeoLookupRequest::new(id).send_request(&self.client).await {
            Ok(record) => Ok(record),
            Err(ResponseError::NotFound) => Err(GatewayError::NotFound { id: String::from(id) }),
            Err(e) => Err(GatewayError::Upstream(format!("NASA API returned an error: {e}"))),
        }
    }

    /// Fetches the feed for the week starting at `start_date`. Error bodies
    /// are probed for a structured message by the response layer, so an
    /// `Upstream` variant already carries the full display text.
    pub async fn fetch_weekly_feed(
        &self,
        start_date: NaiveDate,
    ) -> Result<NeoFeedResponse, GatewayError> {
        NeoFeedRequest::new(start_date).send_request(&self.client).await.map_err(|e| match e {
            ResponseError::Upstream(msg) => GatewayError::Upstream(msg),
            other => GatewayError::Upstream(format!("NASA NeoWs API returned an error: {other}")),
        })
    }

    /// Posts a prompt and extracts the first candidate's first text segment.
    ///
    /// On 429 the call is retried up to [`Self::TEXT_GEN_RETRIES`] times with
    /// a doubling delay starting at [`Self::TEXT_GEN_BASE_DELAY`]. The delay
    /// suspends only this task; other panels keep making progress.
    pub async fn generate_text(&self, prompt: &str) -> Result<String, GatewayError> {
        let req = GenerateTextRequest::new(prompt);
        let mut delay = Self::TEXT_GEN_BASE_DELAY;
        let mut retries_left = Self::TEXT_GEN_RETRIES;
        loop {
            match req.send_request(&self.client).await {
                Ok(response) => {
                    return response.into_text().ok_or(GatewayError::InvalidResponseShape);
                }
                Err(ResponseError::RateLimited) if retries_left > 0 => {
                    retries_left -= 1;
                    log!("Text generation rate limited, retrying in {}ms", delay.as_millis());
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(ResponseError::InvalidShape) => return Err(GatewayError::InvalidResponseShape),
                Err(e) => return Err(GatewayError::Upstream(format!("Gemini API Error: {e}"))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    const EROS_BODY: &str = r#"{
        "id": "2000433",
        "name": "433 Eros",
        "absolute_magnitude_h": 10.41,
        "estimated_diameter": {
            "kilometers": {"estimated_diameter_min": 22.0067027115, "estimated_diameter_max": 16.84},
            "meters": {"estimated_diameter_min": 22006.7027114738, "estimated_diameter_max": 49435.6191253583}
        },
        "is_potentially_hazardous_asteroid": false,
        "close_approach_data": [],
        "orbital_data": {
            "eccentricity": "0.2227",
            "semi_major_axis": "1.4581",
            "orbital_period": "643.1",
            "perihelion_distance": "1.1334",
            "aphelion_distance": "1.7828",
            "inclination": "10.8277",
            "orbit_class": {
                "orbit_class_type": "AMO",
                "orbit_class_description": "Near-Earth asteroid orbits similar to that of 1221 Amor"
            }
        }
    }"#;

    #[tokio::test]
    async fn lookup_parses_record() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/neo-lookup/2000433")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(EROS_BODY)
            .create_async()
            .await;

        let gateway = NeoGateway::new(&server.url());
        let record = gateway.lookup_asteroid("2000433").await.unwrap();
        assert_eq!(record.name(), "433 Eros");
        assert!(!record.is_hazardous());
        let orbital = record.orbital_data().unwrap();
        assert_eq!(orbital.eccentricity(), "0.2227");
        assert_eq!(orbital.orbit_class().class_type(), "AMO");
    }

    #[tokio::test]
    async fn lookup_404_error_names_the_id() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/neo-lookup/99999999")
            .with_status(404)
            .create_async()
            .await;

        let gateway = NeoGateway::new(&server.url());
        let err = gateway.lookup_asteroid("99999999").await.unwrap_err();
        assert!(matches!(err, GatewayError::NotFound { .. }));
        assert!(err.to_string().contains("99999999"));
    }

    #[tokio::test]
    async fn lookup_other_status_is_upstream() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/neo-lookup/2000433")
            .with_status(500)
            .create_async()
            .await;

        let gateway = NeoGateway::new(&server.url());
        let err = gateway.lookup_asteroid("2000433").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "NASA API returned an error: Internal Server Error"
        );
    }

    #[tokio::test]
    async fn lookup_rate_limited_reports_status_reason() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/neo-lookup/2000433")
            .with_status(429)
            .create_async()
            .await;

        let gateway = NeoGateway::new(&server.url());
        let err = gateway.lookup_asteroid("2000433").await.unwrap_err();
        assert_eq!(err.to_string(), "NASA API returned an error: Too Many Requests");
    }

    #[tokio::test]
    async fn feed_error_uses_nested_message() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", mockito::Matcher::Regex("^/neo-feed".into()))
            .with_status(403)
            .with_body(r#"{"error": {"message": "API key invalid"}}"#)
            .create_async()
            .await;

        let gateway = NeoGateway::new(&server.url());
        let start = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        let err = gateway.fetch_weekly_feed(start).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "NASA NeoWs API returned an error: 403 - API key invalid"
        );
    }

    #[tokio::test]
    async fn feed_error_uses_flat_message() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", mockito::Matcher::Regex("^/neo-feed".into()))
            .with_status(400)
            .with_body(r#"{"error_message": "start_date out of range"}"#)
            .create_async()
            .await;

        let gateway = NeoGateway::new(&server.url());
        let start = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        let err = gateway.fetch_weekly_feed(start).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "NASA NeoWs API returned an error: 400 - start_date out of range"
        );
    }

    #[tokio::test]
    async fn feed_error_falls_back_to_status_text() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", mockito::Matcher::Regex("^/neo-feed".into()))
            .with_status(502)
            .with_body("not json")
            .create_async()
            .await;

        let gateway = NeoGateway::new(&server.url());
        let start = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        let err = gateway.fetch_weekly_feed(start).await.unwrap_err();
        assert_eq!(err.to_string(), "NASA NeoWs API returned an error: 502 Bad Gateway");
    }

    #[tokio::test]
    async fn feed_sends_start_date_query() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/neo-feed?start_date=2026-08-30")
            .with_status(200)
            .with_body(r#"{"near_earth_objects": {}}"#)
            .create_async()
            .await;

        let gateway = NeoGateway::new(&server.url());
        let start = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        let feed = gateway.fetch_weekly_feed(start).await.unwrap();
        assert!(feed.near_earth_objects().is_empty());
        m.assert_async().await;
    }

    #[tokio::test]
    async fn generate_text_extracts_first_candidate() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/gemini")
            .with_status(200)
            .with_body(
                r#"{"candidates": [{"content": {"parts": [{"text": "A rocky wanderer."}]}}]}"#,
            )
            .create_async()
            .await;

        let gateway = NeoGateway::new(&server.url());
        let text = gateway.generate_text("describe Eros").await.unwrap();
        assert_eq!(text, "A rocky wanderer.");
    }

    #[tokio::test]
    async fn generate_text_rejects_empty_candidates() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/gemini")
            .with_status(200)
            .with_body(r#"{"candidates": []}"#)
            .create_async()
            .await;

        let gateway = NeoGateway::new(&server.url());
        let err = gateway.generate_text("describe Eros").await.unwrap_err();
        assert_eq!(err, GatewayError::InvalidResponseShape);
    }

    #[tokio::test]
    async fn generate_text_terminal_status_is_upstream() {
        let mut server = Server::new_async().await;
        let _m = server.mock("POST", "/gemini").with_status(400).create_async().await;

        let gateway = NeoGateway::new(&server.url());
        let err = gateway.generate_text("describe Eros").await.unwrap_err();
        assert_eq!(err.to_string(), "Gemini API Error: Bad Request");
    }

    #[tokio::test]
    async fn generate_text_gives_up_after_three_retries() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/gemini")
            .with_status(429)
            .expect(4)
            .create_async()
            .await;

        let gateway = NeoGateway::new(&server.url());
        let err = gateway.generate_text("describe Eros").await.unwrap_err();
        assert_eq!(err.to_string(), "Gemini API Error: Too Many Requests");
        // 1 initial attempt + 3 retries, never a 5th request
        m.assert_async().await;
    }

    /// Serves one scripted HTTP response per connection, closing each
    /// connection afterwards so the client cannot reuse it.
    async fn serve_scripted(listener: tokio::net::TcpListener, responses: Vec<String>) {
        for response in responses {
            let Ok((mut socket, _)) = listener.accept().await else { return };
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                match socket.read(&mut chunk).await {
                    Ok(0) => break,
                    Ok(n) => {
                        buf.extend_from_slice(&chunk[..n]);
                        if request_complete(&buf) {
                            break;
                        }
                    }
                    Err(_) => return,
                }
            }
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    }

    fn request_complete(buf: &[u8]) -> bool {
        let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            return false;
        };
        let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
        let content_length = headers
            .lines()
            .find_map(|l| l.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        buf.len() >= header_end + 4 + content_length
    }

    fn rate_limited_response() -> String {
        String::from("HTTP/1.1 429 Too Many Requests\r\ncontent-length: 0\r\nconnection: close\r\n\r\n")
    }

    fn success_response(text: &str) -> String {
        let body = format!(r#"{{"candidates":[{{"content":{{"parts":[{{"text":"{text}"}}]}}}}]}}"#);
        format!(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            body.len(),
            body
        )
    }

    #[tokio::test]
    async fn generate_text_succeeds_on_third_attempt_after_backoff() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(serve_scripted(
            listener,
            vec![
                rate_limited_response(),
                rate_limited_response(),
                success_response("All clear."),
            ],
        ));

        let gateway = NeoGateway::new(&format!("http://{addr}"));
        let started = std::time::Instant::now();
        let text = gateway.generate_text("describe Eros").await.unwrap();
        assert_eq!(text, "All clear.");
        // two backoff waits: 1000ms + 2000ms
        assert!(started.elapsed() >= Duration::from_millis(3000));
    }
}
