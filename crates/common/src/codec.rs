use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug)]
pub struct CodecError(pub serde_json::Error);

impl std::fmt::Display for CodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "codec: {}", self.0)
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(e: serde_json::Error) -> Self {
        Self(e)
    }
}

pub fn encode<R: Serialize>(records: &[R]) -> Result<String, CodecError> {
    Ok(serde_json::to_string(records)?)
}

/// Parses a stored JSON array. A missing or blank payload, or a literal
/// `null`, is an empty rule set rather than an error.
pub fn decode<R: DeserializeOwned>(payload: Option<&str>) -> Result<Vec<R>, CodecError> {
    match payload.map(str::trim) {
        None | Some("") => Ok(Vec::new()),
        Some(text) => {
            let parsed: Option<Vec<R>> = serde_json::from_str(text)?;
            Ok(parsed.unwrap_or_default())
        }
    }
}

/// True when the store holds nothing usable under a key.
pub fn is_missing(payload: Option<&str>) -> bool {
    matches!(payload.map(str::trim), None | Some("") | Some("null"))
}
