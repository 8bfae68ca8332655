//! Representation codec.
//!
//! Structured values travel as JSON or XML; uploads travel as opaque byte
//! streams; responses are turned into a [`Payload`] according to the
//! [`ResponseKind`] the calling operation asked for.

use crate::error::{RestError, Result};
use crate::transport::{HttpResponse, RequestBody};
use crate::upload::UploadStream;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// Structured representation negotiated for request entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaType {
    #[default]
    Json,
    Xml,
}

impl MediaType {
    /// MIME type sent as `Content-Type`
    pub fn mime(&self) -> &'static str {
        match self {
            MediaType::Json => "application/json",
            MediaType::Xml => "application/xml",
        }
    }

    /// Short name used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            MediaType::Json => "JSON",
            MediaType::Xml => "XML",
        }
    }

    /// Recognize a `Content-Type` header value. Parameters such as
    /// `charset` are ignored.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if essence == "application/json" || essence.ends_with("+json") {
            Some(MediaType::Json)
        } else if essence == "application/xml" || essence == "text/xml" || essence.ends_with("+xml")
        {
            Some(MediaType::Xml)
        } else {
            None
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Serialize a value in the given representation.
///
/// XML documents take their root element from the serde name of the type,
/// so `#[serde(rename = "community")]` yields `<community>…</community>`.
pub fn encode<T: Serialize>(media: MediaType, value: &T) -> Result<Vec<u8>> {
    match media {
        MediaType::Json => serde_json::to_vec(value).map_err(|e| RestError::encoding(media.name(), e)),
        MediaType::Xml => quick_xml::se::to_string(value)
            .map(String::into_bytes)
            .map_err(|e| RestError::encoding(media.name(), e)),
    }
}

/// Deserialize a body in the given representation.
pub fn decode<T: DeserializeOwned>(media: MediaType, body: &[u8]) -> Result<T> {
    match media {
        MediaType::Json => {
            serde_json::from_slice(body).map_err(|e| RestError::encoding(media.name(), e))
        }
        MediaType::Xml => {
            let text = std::str::from_utf8(body).map_err(|e| RestError::encoding(media.name(), e))?;
            quick_xml::de::from_str(text).map_err(|e| RestError::encoding(media.name(), e))
        }
    }
}

/// Content type of [`Entity::Text`] bodies
pub const TEXT_PLAIN: &str = "text/plain; charset=UTF-8";

/// Request entity. Exactly one kind of body per request.
#[derive(Debug)]
pub enum Entity {
    /// No body
    Empty,
    /// An already encoded structured value
    Structured { media: MediaType, body: Vec<u8> },
    /// Plain UTF-8 text, sent as `text/plain`
    Text(String),
    /// Opaque upload, sent unmodified
    Stream(UploadStream),
}

impl Entity {
    /// Encode `value` now, so that encoding failures surface before any
    /// request is attempted.
    pub fn structured<T: Serialize>(media: MediaType, value: &T) -> Result<Self> {
        Ok(Entity::Structured {
            media,
            body: encode(media, value)?,
        })
    }

    /// Content type implied by the entity, if any
    pub fn content_type(&self) -> Option<String> {
        match self {
            Entity::Empty => None,
            Entity::Structured { media, .. } => Some(media.mime().to_string()),
            Entity::Text(_) => Some(TEXT_PLAIN.to_string()),
            Entity::Stream(stream) => Some(stream.content_type().to_string()),
        }
    }

    pub(crate) fn into_body(self) -> RequestBody {
        match self {
            Entity::Empty => RequestBody::Empty,
            Entity::Structured { body, .. } => RequestBody::Bytes(body),
            Entity::Text(text) => RequestBody::Bytes(text.into_bytes()),
            Entity::Stream(stream) => RequestBody::Stream(stream),
        }
    }
}

impl From<UploadStream> for Entity {
    fn from(stream: UploadStream) -> Self {
        Entity::Stream(stream)
    }
}

/// What the calling operation expects back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// A JSON or XML document
    Structured,
    /// A UTF-8 text body, such as the login token
    Text,
    /// Raw bytes, returned verbatim
    Bytes,
    /// Body is read and dropped
    Discard,
}

impl ResponseKind {
    /// `Accept` header sent for this kind
    pub fn accept(&self) -> &'static str {
        match self {
            ResponseKind::Structured => MediaType::Json.mime(),
            ResponseKind::Text => "text/plain, */*",
            ResponseKind::Bytes | ResponseKind::Discard => "*/*",
        }
    }
}

/// Decoded response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Structured document, not yet bound to a type
    Structured { media: MediaType, body: Vec<u8> },
    Text(String),
    Bytes(Vec<u8>),
    /// No result: the operation discards the body, or a structured body was
    /// expected and none came back
    Nothing,
}

impl Payload {
    /// Interpret a successful response for the given kind. `fallback` is
    /// used when a structured response has no recognizable content type.
    pub fn from_response(
        kind: ResponseKind,
        response: HttpResponse,
        fallback: MediaType,
    ) -> Result<Self> {
        match kind {
            ResponseKind::Discard => Ok(Payload::Nothing),
            ResponseKind::Bytes => Ok(Payload::Bytes(response.body)),
            ResponseKind::Text => String::from_utf8(response.body)
                .map(Payload::Text)
                .map_err(|e| RestError::encoding("UTF-8", e)),
            ResponseKind::Structured => {
                if response.body.is_empty() {
                    return Ok(Payload::Nothing);
                }
                let media = response
                    .content_type()
                    .and_then(MediaType::from_content_type)
                    .unwrap_or(fallback);
                Ok(Payload::Structured {
                    media,
                    body: response.body,
                })
            }
        }
    }

    /// Bind a structured payload to `T`.
    ///
    /// `Nothing` only decodes into types that accept an absent value, such
    /// as `Option<T>` or `()`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T> {
        match self {
            Payload::Structured { media, body } => decode(media, &body),
            Payload::Nothing => {
                serde_json::from_value(serde_json::Value::Null).map_err(|_| RestError::EmptyBody)
            }
            Payload::Text(text) => {
                serde_json::from_str(&text).map_err(|e| RestError::encoding("JSON", e))
            }
            Payload::Bytes(bytes) => decode(MediaType::Json, &bytes),
        }
    }

    /// Raw body bytes; empty for `Nothing`
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Payload::Structured { body, .. } | Payload::Bytes(body) => body,
            Payload::Text(text) => text.into_bytes(),
            Payload::Nothing => Vec::new(),
        }
    }

    /// Body as text; `None` for `Nothing`
    pub fn into_text(self) -> Result<Option<String>> {
        match self {
            Payload::Text(text) => Ok(Some(text)),
            Payload::Nothing => Ok(None),
            Payload::Structured { body, .. } | Payload::Bytes(body) => String::from_utf8(body)
                .map(Some)
                .map_err(|e| RestError::encoding("UTF-8", e)),
        }
    }

    pub fn is_nothing(&self) -> bool {
        matches!(self, Payload::Nothing)
    }
}
