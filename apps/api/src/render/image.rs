//! Image payloads embedded in layout labels.
//!
//! A label holds either a `data:<mime>;base64,<payload>` URI or bare base64.
//! Bare payloads get their MIME type from the file signature.

use base64::Engine;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image payload is empty")]
    Empty,

    #[error("malformed data URI: {0}")]
    MalformedDataUri(&'static str),

    #[error("payload is not valid base64: {0}")]
    NotBase64(#[from] base64::DecodeError),

    #[error("unrecognized image format")]
    UnknownFormat,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImagePayload {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImagePayload {
    pub fn parse(label: &str) -> Result<Self, ImageError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(ImageError::Empty);
        }

        if let Some(rest) = label.strip_prefix("data:") {
            let (header, data) = rest
                .split_once(',')
                .ok_or(ImageError::MalformedDataUri("missing comma"))?;
            let mime = header
                .strip_suffix(";base64")
                .ok_or(ImageError::MalformedDataUri("only base64 data URIs are supported"))?;
            let bytes = decode(data)?;
            let mime = if mime.is_empty() {
                sniff_mime(&bytes).ok_or(ImageError::UnknownFormat)?.to_string()
            } else {
                mime.to_string()
            };
            return Ok(Self { mime, bytes });
        }

        let bytes = decode(label)?;
        let mime = sniff_mime(&bytes).ok_or(ImageError::UnknownFormat)?;
        Ok(Self {
            mime: mime.to_string(),
            bytes,
        })
    }

    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime,
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

fn decode(data: &str) -> Result<Vec<u8>, ImageError> {
    // Pasted payloads are often wrapped across lines.
    let compact: String = data.chars().filter(|c| !c.is_whitespace()).collect();
    Ok(base64::engine::general_purpose::STANDARD.decode(compact)?)
}

fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0x89, b'P', b'N', b'G', ..] => Some("image/png"),
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [b'G', b'I', b'F', b'8', ..] => Some("image/gif"),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some("image/webp"),
        _ => None,
    }
}

/// What an image-class item displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "src", rename_all = "camelCase")]
pub enum ImageSource {
    DataUri(String),
    Placeholder,
}

impl ImageSource {
    /// Falls back to the placeholder graphic for empty or undecodable labels.
    pub fn from_label(key: &str, label: &str) -> Self {
        match ImagePayload::parse(label) {
            Ok(payload) => ImageSource::DataUri(payload.to_data_uri()),
            Err(ImageError::Empty) => ImageSource::Placeholder,
            Err(e) => {
                warn!("Image field '{key}' has an unusable payload: {e}");
                ImageSource::Placeholder
            }
        }
    }
}
