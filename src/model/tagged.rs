//! Decoding of `type`-keyed unions.
//!
//! The API encodes a union as a `type` string naming the sibling key that
//! holds the payload:
//!
//! ```json
//! { "id": "…", "type": "paragraph", "paragraph": { "rich_text": [] } }
//! ```
//!
//! [`RawTagged`] captures the shared fields, the tag and every other key;
//! [`RawTagged::resolve`] then decodes the one payload the tag points at into
//! an externally tagged Rust enum. Request bodies usually omit `type`, so a
//! missing tag is inferred from the single known payload key present.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// An externally tagged enum whose variant names are the wire tags.
pub trait TaggedUnion: DeserializeOwned {
    /// Name used in error messages, e.g. `block`.
    const KIND: &'static str;
    /// Every tag the enum has a variant for.
    const TAGS: &'static [&'static str];
}

/// Why a tagged union could not be decoded.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("unsupported {kind} type '{tag}'")]
    UnknownTag { kind: &'static str, tag: String },

    #[error("{kind} has no type tag and no recognised payload")]
    MissingTag { kind: &'static str },

    #[error("{kind} of type '{tag}' carries no '{tag}' payload")]
    MissingPayload { kind: &'static str, tag: String },

    #[error("invalid {kind} '{tag}' payload: {source}")]
    Payload {
        kind: &'static str,
        tag: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Wire form of a tagged union with shared fields `M`.
#[derive(Debug, Deserialize)]
pub struct RawTagged<M> {
    #[serde(flatten)]
    meta: M,
    #[serde(rename = "type", default)]
    tag: Option<String>,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl<M> RawTagged<M> {
    pub(crate) fn resolve<K: TaggedUnion>(self) -> Result<(M, K), SchemaError> {
        let Self {
            meta,
            tag,
            mut rest,
        } = self;

        let tag = match tag {
            Some(tag) => tag,
            None => rest
                .keys()
                .find(|key| K::TAGS.contains(&key.as_str()))
                .cloned()
                .ok_or(SchemaError::MissingTag { kind: K::KIND })?,
        };

        if !K::TAGS.contains(&tag.as_str()) {
            return Err(SchemaError::UnknownTag { kind: K::KIND, tag });
        }

        let payload = rest.remove(&tag).ok_or_else(|| SchemaError::MissingPayload {
            kind: K::KIND,
            tag: tag.clone(),
        })?;

        let mut single = Map::with_capacity(1);
        single.insert(tag.clone(), payload);
        let kind = serde_json::from_value(Value::Object(single)).map_err(|source| {
            SchemaError::Payload {
                kind: K::KIND,
                tag,
                source,
            }
        })?;

        Ok((meta, kind))
    }
}

/// Placeholder for unions without shared fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empty {}

/// `deserialize_with` adapter for fields holding a bare [`TaggedUnion`].
pub(crate) fn deserialize_tagged<'de, D, K>(deserializer: D) -> Result<K, D::Error>
where
    D: Deserializer<'de>,
    K: TaggedUnion,
{
    RawTagged::<Empty>::deserialize(deserializer)?
        .resolve()
        .map(|(_, kind)| kind)
        .map_err(D::Error::custom)
}
