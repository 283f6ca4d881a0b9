use crate::client::VoatError;
use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

pub mod comment;
pub mod submission;
pub mod subverse;

/// Field deserializer that turns a value of the wrong type into `None`
/// instead of failing the whole payload.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match T::deserialize(&value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            debug!("Ignoring mistyped field value {}: {}", value, e);
            Ok(None)
        }
    }
}

/// Envelope wrapped around every Voat API response.
#[derive(Deserialize, Debug)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiErrorBody>,
}

/// Error details carried by an unsuccessful envelope
#[derive(Deserialize, Debug, Default)]
pub struct ApiErrorBody {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub message: String,
}

impl<T> ApiResponse<T> {
    /// Unwrap the payload, turning `success: false` into an error.
    pub fn into_result(self) -> Result<T, VoatError> {
        if !self.success {
            let error = self.error.unwrap_or_default();
            return Err(VoatError::ApiError(if error.kind.is_empty() {
                error.message
            } else {
                format!("{}: {}", error.kind, error.message)
            }));
        }
        self.data
            .ok_or_else(|| VoatError::ApiError("Response did not contain any data".to_string()))
    }
}

/// Body of a successful `api/token` response
#[derive(Deserialize, Debug)]
pub struct TokenResponse {
    #[serde(rename = "userName")]
    pub user_name: String,
    pub access_token: String,
    pub token_type: String,
    // Either a number or a digit string, validated by AuthToken
    pub expires_in: serde_json::Value,
}
