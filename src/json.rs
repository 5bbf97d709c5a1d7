use crate::error::DecodeError;

pub(crate) fn decode(body: &[u8]) -> Result<serde_json::Value, DecodeError> {
    serde_json::from_slice(body).map_err(|e| DecodeError::new(&e, body))
}

/// A named string field of an object. Absent, null and non-string values all read as `None`.
pub(crate) fn string_field(object: &serde_json::Value, name: &str) -> Option<String> {
    object.get(name)?.as_str().map(str::to_owned)
}
