//! Bearer tokens issued by the `api/token` endpoint.

use crate::client::{error_detail, VoatError, API_KEY_HEADER};
use crate::models::TokenResponse;
use chrono::{DateTime, TimeDelta, Utc};
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde_json::Value;
use url::Url;

/// Small holder for Voat's auth tokens.
///
/// The raw token is only handed out while the token is still valid; once
/// `acquired_at + expires_in` has passed every accessor fails with
/// [`VoatError::ExpiredToken`].
#[derive(Debug, Clone)]
pub struct AuthToken {
    pub username: String,
    pub token_type: String,
    /// Validity window in seconds.
    pub expires_in: i64,
    pub acquired_at: DateTime<Utc>,
    token: String,
}

impl AuthToken {
    /// Build a token acquired now.
    ///
    /// `expiry` may be an integer or a string made only of ASCII digits;
    /// anything else fails with [`VoatError::BadExpiry`].
    pub fn new<V: Into<Value>>(
        username: &str,
        token: &str,
        token_type: &str,
        expiry: V,
    ) -> Result<Self, VoatError> {
        Self::with_acquired_at(username, token, token_type, expiry, Utc::now())
    }

    pub fn with_acquired_at<V: Into<Value>>(
        username: &str,
        token: &str,
        token_type: &str,
        expiry: V,
        acquired_at: DateTime<Utc>,
    ) -> Result<Self, VoatError> {
        let expires_in = parse_expiry(&expiry.into())?;
        Ok(Self {
            username: username.to_string(),
            token_type: token_type.to_string(),
            expires_in,
            acquired_at,
            token: token.to_string(),
        })
    }

    /// Request a token with the password grant.
    pub async fn get_auth(
        http: &Client,
        token_url: Url,
        username: &str,
        password: &str,
        api_key: &str,
    ) -> Result<Self, VoatError> {
        let params = [
            ("grant_type", "password"),
            ("username", username),
            ("password", password),
        ];

        debug!("Requesting token for {} from {}", username, token_url);
        let response = http
            .post(token_url)
            .header(API_KEY_HEADER, api_key)
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(VoatError::from_status(status, error_detail(&body)));
        }

        let json: TokenResponse = serde_json::from_str(&body)?;
        Self::new(
            &json.user_name,
            &json.access_token,
            &json.token_type,
            json.expires_in,
        )
    }

    /// The instant from which the token is no longer usable. Saturates for
    /// windows too large to represent.
    pub fn expires_at(&self) -> DateTime<Utc> {
        TimeDelta::try_seconds(self.expires_in)
            .and_then(|window| self.acquired_at.checked_add_signed(window))
            .unwrap_or(if self.expires_in < 0 {
                DateTime::<Utc>::MIN_UTC
            } else {
                DateTime::<Utc>::MAX_UTC
            })
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at()
    }

    /// The raw token, as long as it has not expired.
    pub fn token(&self) -> Result<&str, VoatError> {
        self.token_at(Utc::now())
    }

    pub fn token_at(&self, now: DateTime<Utc>) -> Result<&str, VoatError> {
        if now >= self.expires_at() {
            return Err(VoatError::ExpiredToken);
        }
        Ok(&self.token)
    }

    /// Value for the `Authorization` header, e.g. `Bearer abc123`.
    pub fn authorization(&self) -> Result<String, VoatError> {
        Ok(format!("{} {}", capitalize(&self.token_type), self.token()?))
    }

    pub fn headers(&self) -> Result<HeaderMap, VoatError> {
        let value = HeaderValue::from_str(&self.authorization()?)
            .map_err(|e| VoatError::InvalidHeader(e.to_string()))?;
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }
}

/// Integers too large for `i64` saturate to `i64::MAX`.
fn parse_expiry(value: &Value) -> Result<i64, VoatError> {
    let parsed = match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_u64().map(|_| i64::MAX)),
        Value::String(text) if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) => {
            // Only overflow can fail once every byte is a digit
            Some(text.parse::<i64>().unwrap_or(i64::MAX))
        }
        _ => None,
    };
    parsed.ok_or_else(|| VoatError::BadExpiry(value.to_string()))
}

/// First character upper-cased, the rest lower-cased.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
