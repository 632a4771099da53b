//! Binary envelope shared by every object kind
//!
//! ## Format
//!
//! `<type> <decimal-payload-length>\0<payload>`
//!
//! The content address of an object is the SHA-1 of its encoded envelope, so two objects
//! with the same type and payload always share an ID.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::SprigError;
use bytes::Bytes;
use derive_new::new;

/// A decoded envelope: the type tag and the payload it wraps
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Envelope {
    pub object_type: ObjectType,
    pub payload: Bytes,
}

impl Envelope {
    /// Wrap a payload as `<type> <len>\0<payload>`
    pub fn encode(object_type: ObjectType, payload: &[u8]) -> Bytes {
        let header = format!("{} {}\0", object_type.as_str(), payload.len());

        let mut encoded = Vec::with_capacity(header.len() + payload.len());
        encoded.extend_from_slice(header.as_bytes());
        encoded.extend_from_slice(payload);

        Bytes::from(encoded)
    }

    /// Split an encoded envelope back into its type tag and payload
    ///
    /// The declared length must match the number of bytes after the NUL separator exactly.
    pub fn decode(data: &[u8]) -> anyhow::Result<Self> {
        let space = data
            .iter()
            .position(|&b| b == b' ')
            .ok_or_else(|| SprigError::malformed("missing type separator"))?;
        let nul = data
            .iter()
            .position(|&b| b == b'\0')
            .ok_or_else(|| SprigError::malformed("missing length separator"))?;

        if nul < space {
            return Err(SprigError::malformed("missing type separator").into());
        }

        let type_tag = std::str::from_utf8(&data[..space])
            .map_err(|_| SprigError::malformed("type tag is not valid UTF-8"))?;
        let object_type = ObjectType::try_from(type_tag)?;

        let length = &data[space + 1..nul];
        if length.is_empty() || !length.iter().all(u8::is_ascii_digit) {
            return Err(SprigError::malformed("bad length").into());
        }
        let length: usize = std::str::from_utf8(length)
            .ok()
            .and_then(|length| length.parse().ok())
            .ok_or_else(|| SprigError::malformed("bad length"))?;

        let payload = &data[nul + 1..];
        if length != payload.len() {
            return Err(SprigError::malformed("bad length").into());
        }

        Ok(Self::new(object_type, Bytes::copy_from_slice(payload)))
    }

    /// Content address of an encoded envelope
    pub fn object_id(encoded: &[u8]) -> ObjectId {
        ObjectId::hash(encoded)
    }
}
