use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::TranscodeError;
use crate::media_type;
use crate::transcoder::{decode_payload, encode_payload};

// @module: Stored document record as seen by the editor

/// A stored document: name, media type and binary payload.
///
/// The payload is serialized as base64, the form in which it travels between
/// the document store and the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    // @field: File name, including extension
    pub name: String,

    // @field: MIME type
    #[serde(rename = "mimetype")]
    pub media_type: String,

    // @field: Raw content
    #[serde(rename = "datas", serialize_with = "to_base64", deserialize_with = "from_base64", default)]
    pub payload: Vec<u8>,
}

impl Document {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            payload,
        }
    }

    /// Build a document from its base64 transport form
    pub fn from_base64(
        name: impl Into<String>,
        media_type: impl Into<String>,
        datas: &str,
    ) -> Result<Self, TranscodeError> {
        Ok(Self::new(name, media_type, decode_payload(datas)?))
    }

    pub fn payload_base64(&self) -> String {
        encode_payload(&self.payload)
    }

    pub fn is_text_editable(&self) -> bool {
        media_type::is_editable(&self.media_type)
    }
}

fn to_base64<S: Serializer>(payload: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&encode_payload(payload))
}

fn from_base64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    let datas = String::deserialize(deserializer)?;
    decode_payload(&datas).map_err(serde::de::Error::custom)
}
