//! Request body construction and response envelope parsing.

use base64::Engine;
use serde_json::{Map, Value};

use crate::error::FetchError;
use crate::roster::MesaId;

/// Attachment list key; the English alias is accepted as well.
const ATTACHMENT_KEYS: [&str; 2] = ["adjunto", "attachments"];
/// Base64 payload key inside an attachment.
const PAYLOAD_KEYS: [&str; 2] = ["valor", "value"];

/// JSON body for one mesa, e.g. `{"codigoMesa":123456}`.
pub fn request_body(field: &str, id: MesaId) -> Vec<u8> {
    let mut obj = Map::new();
    obj.insert(field.to_string(), Value::from(id));
    Value::Object(obj).to_string().into_bytes()
}

/// Pull the base64 image string out of the first attachment.
///
/// Unparseable JSON is a decode error; valid JSON without a usable payload
/// (no list, empty list, missing/empty/non-string field) is `MissingPayload`.
pub fn extract_payload(body: &[u8]) -> Result<String, FetchError> {
    let doc: Value = serde_json::from_slice(body).map_err(FetchError::InvalidJson)?;
    ATTACHMENT_KEYS
        .iter()
        .find_map(|k| doc.get(k).and_then(Value::as_array))
        .and_then(|list| list.first())
        .and_then(|first| {
            PAYLOAD_KEYS
                .iter()
                .find_map(|k| first.get(k).and_then(Value::as_str))
        })
        .filter(|s| !s.trim().is_empty())
        .map(str::to_owned)
        .ok_or(FetchError::MissingPayload)
}

/// Decode a standard base64 payload. Line breaks and other ASCII whitespace are ignored.
pub fn decode_image(payload: &str) -> Result<Vec<u8>, FetchError> {
    let compact: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    base64::engine::general_purpose::STANDARD
        .decode(compact.as_bytes())
        .map_err(FetchError::InvalidBase64)
}
