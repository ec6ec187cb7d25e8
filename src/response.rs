use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::ClientError;

/// Error body the API returns alongside any non-200 status.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiFailure {
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

/// Decodes a raw response into `T`, or into a [`ClientError`].
///
/// Only `200 OK` counts as success. For any other status the body is read as
/// an [`ApiFailure`]; when that fails too, the error still carries the
/// status and an empty message.
pub(crate) fn decode<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T, ClientError> {
    if status == StatusCode::OK {
        return serde_json::from_slice(body).map_err(ClientError::Decode);
    }

    let failure = serde_json::from_slice::<ApiFailure>(body).unwrap_or_else(|error| {
        log::debug!("unmarshalling failure response for status {status}: {error}");
        ApiFailure::default()
    });

    Err(ClientError::Remote { status, failure })
}
