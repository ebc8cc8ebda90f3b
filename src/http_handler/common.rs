use strum_macros::Display;

/// Terminal failure of a gateway operation, displayed verbatim inside the
/// panel that issued the request.
///
/// Rate limiting never appears here: the text-generation retry loop either
/// resolves it into a success or exhausts into [`GatewayError::Upstream`].
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Rejected locally before any network call was made.
    #[strum(to_string = "{0}")]
    Validation(String),
    /// The lookup backend reported a 404 for the requested SPK-ID.
    #[strum(to_string = "Asteroid with SPK-ID \"{id}\" not found. Please check the ID and try again.")]
    NotFound { id: String },
    /// Any other non-success status, from any of the three endpoints.
    #[strum(to_string = "{0}")]
    Upstream(String),
    /// A 2xx text-generation body without a usable candidate text.
    #[strum(to_string = "Invalid response structure from Gemini API.")]
    InvalidResponseShape,
}

impl std::error::Error for GatewayError {}
