use super::response_common::SerdeJSONBodyHTTPResponseType;

/// Response of the text-generation endpoint: a list of candidate completions.
/// Only the first candidate's first text segment is ever used.
#[derive(serde::Deserialize, Debug)]
pub struct GenerateTextResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl SerdeJSONBodyHTTPResponseType for GenerateTextResponse {}

impl GenerateTextResponse {
    /// Extracts the first candidate's first text segment, if present.
    pub fn into_text(self) -> Option<String> {
        self.candidates.into_iter().next()?.content?.parts.into_iter().next()?.text
    }
}

#[derive(serde::Deserialize, Debug)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(serde::Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(serde::Deserialize, Debug)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}
