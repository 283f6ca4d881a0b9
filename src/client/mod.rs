use crate::auth::AuthToken;
use crate::models::comment::CommentData;
use crate::models::submission::SubmissionData;
use crate::models::subverse::SubverseData;
use crate::models::ApiResponse;
use crate::objects::{Comment, Submission, Subverse, VoatHandle, VoatObject};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Error as ReqwestError, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.voat.co";
pub const DEFAULT_USER_AGENT: &str = "voatrust/0.1";
/// Header carrying the application's API key on every request.
pub const API_KEY_HEADER: &str = "Voat-ApiKey";

// Define a custom error type for handling Voat API errors
#[derive(Debug)]
pub enum VoatError {
    RequestError(ReqwestError),
    ParseError(serde_json::Error),
    InvalidUrl(url::ParseError),
    /// The API answered with `success: false` or an unusable envelope.
    ApiError(String),
    /// The API answered with a non-success HTTP status.
    Http { status: u16, message: String },
    /// A token was constructed with an expiry that is not an integer.
    BadExpiry(String),
    /// The token's validity window has elapsed.
    ExpiredToken,
    InvalidHeader(String),
    MissingConfig(&'static str),
}

impl VoatError {
    /// Translate a non-success HTTP status into an error, keeping the API's
    /// own message when the body carried one.
    pub fn from_status(status: StatusCode, detail: Option<String>) -> Self {
        let reason = match status.as_u16() {
            400 => "bad request",
            401 => "unauthorized, check the API key or token",
            403 => "forbidden",
            404 => "not found",
            429 => "throttled by the API",
            500..=599 => "server error",
            _ => "unexpected status",
        };
        let message = match detail {
            Some(detail) if !detail.is_empty() => format!("{}: {}", reason, detail),
            _ => reason.to_string(),
        };
        VoatError::Http {
            status: status.as_u16(),
            message,
        }
    }
}

impl fmt::Display for VoatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VoatError::RequestError(err) => write!(f, "Request error: {}", err),
            VoatError::ParseError(err) => write!(f, "Parse error: {}", err),
            VoatError::InvalidUrl(err) => write!(f, "Invalid URL: {}", err),
            VoatError::ApiError(msg) => write!(f, "Voat API error: {}", msg),
            VoatError::Http { status, message } => write!(f, "HTTP {}: {}", status, message),
            VoatError::BadExpiry(value) => {
                write!(f, "Bad expiry date, must be int! (got {})", value)
            }
            VoatError::ExpiredToken => write!(f, "This token is expired!"),
            VoatError::InvalidHeader(msg) => write!(f, "Invalid header value: {}", msg),
            VoatError::MissingConfig(var) => {
                write!(f, "{} environment variable must be set", var)
            }
        }
    }
}

impl std::error::Error for VoatError {}

impl From<ReqwestError> for VoatError {
    fn from(err: ReqwestError) -> Self {
        VoatError::RequestError(err)
    }
}

impl From<serde_json::Error> for VoatError {
    fn from(err: serde_json::Error) -> Self {
        VoatError::ParseError(err)
    }
}

impl From<url::ParseError> for VoatError {
    fn from(err: url::ParseError) -> Self {
        VoatError::InvalidUrl(err)
    }
}

/// The access handle that entities hold onto for resolving their relations.
///
/// `VoatClient` is the HTTP implementation; anything else that can answer
/// these three questions (a test double, a cache in front of the client) can
/// be attached to entities instead.
#[async_trait]
pub trait VoatApi: fmt::Debug + Send + Sync {
    /// All comments of a submission.
    async fn fetch_comments(
        &self,
        submission_id: i64,
        subverse: &str,
    ) -> Result<Vec<Comment>, VoatError>;

    /// The submissions currently listed in a subverse.
    async fn get_subverse_posts(&self, subverse: &str) -> Result<Vec<Submission>, VoatError>;

    /// A single comment by id.
    async fn get_comment(&self, comment_id: i64) -> Result<Comment, VoatError>;
}

#[derive(Clone, Debug)]
pub struct VoatClient {
    pub client: Client,
    pub api_key: String,
    pub base_url: Url,
    pub user_agent: String,
    pub auth_token: Option<AuthToken>,
}

impl VoatClient {
    pub fn new(api_key: &str) -> Result<Self, VoatError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL, DEFAULT_USER_AGENT)
    }

    pub fn with_base_url(
        api_key: &str,
        base_url: &str,
        user_agent: &str,
    ) -> Result<Self, VoatError> {
        debug!(
            "Creating VoatClient for {} with user_agent: {}",
            base_url, user_agent
        );
        Ok(Self {
            client: Self::get_client(user_agent)?,
            api_key: api_key.to_string(),
            base_url: Url::parse(base_url)?,
            user_agent: user_agent.to_string(),
            auth_token: None,
        })
    }

    /// Create a client from a configuration object
    pub fn from_config(config: &crate::config::AppConfig) -> Result<Self, VoatError> {
        let api_key = config.require_api_key()?;
        Self::with_base_url(&api_key, &config.base_url, &config.user_agent)
    }

    fn get_client(user_agent: &str) -> Result<Client, VoatError> {
        Ok(Client::builder().user_agent(user_agent).build()?)
    }

    /// A shareable handle pointing back at this client, attached to every
    /// entity the client returns.
    pub fn handle(&self) -> VoatHandle {
        Arc::new(self.clone())
    }

    /// Use an already acquired token for subsequent requests.
    pub fn set_token(&mut self, token: AuthToken) {
        self.auth_token = Some(token);
    }

    /// Acquire a token with the password grant and keep it for subsequent
    /// requests.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<AuthToken, VoatError> {
        let url = self.endpoint(&["api", "token"])?;
        let token =
            AuthToken::get_auth(&self.client, url, username, password, &self.api_key).await?;
        info!(
            "Authenticated as {} (token valid for {}s)",
            token.username, token.expires_in
        );
        self.auth_token = Some(token.clone());
        Ok(token)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, VoatError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| VoatError::ApiError(format!("Unusable base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET an endpoint and unwrap the `data` member of its envelope.
    async fn get_data<T: DeserializeOwned>(&self, url: Url) -> Result<T, VoatError> {
        debug!("GET {}", url);
        let mut request = self.client.get(url).header(API_KEY_HEADER, &self.api_key);
        if let Some(token) = &self.auth_token {
            request = request.header(AUTHORIZATION, token.authorization()?);
        }

        let response = request.send().await?;
        let status = response.status();
        debug!("Response status: {}", status);
        let body = response.text().await?;

        if !status.is_success() {
            return Err(VoatError::from_status(status, error_detail(&body)));
        }

        debug!("Response body length: {} bytes", body.len());
        let envelope: ApiResponse<T> = serde_json::from_str(&body)?;
        envelope.into_result()
    }

    pub async fn get_subverse(&self, name: &str) -> Result<Subverse, VoatError> {
        let url = self.endpoint(&["api", "v1", "v", name, "info"])?;
        let data: SubverseData = self.get_data(url).await?;
        Ok(Subverse::from_raw(data, Some(self.handle())))
    }

    pub async fn get_submission(&self, subverse: &str, id: i64) -> Result<Submission, VoatError> {
        let id = id.to_string();
        let url = self.endpoint(&["api", "v1", "v", subverse, &id])?;
        let data: SubmissionData = self.get_data(url).await?;
        Ok(Submission::from_raw(data, Some(self.handle())))
    }
}

#[async_trait]
impl VoatApi for VoatClient {
    async fn fetch_comments(
        &self,
        submission_id: i64,
        subverse: &str,
    ) -> Result<Vec<Comment>, VoatError> {
        let id = submission_id.to_string();
        let url = self.endpoint(&["api", "v1", "v", subverse, &id, "comments"])?;
        let data: Vec<CommentData> = self.get_data(url).await?;
        debug!("Fetched {} comments for submission {}", data.len(), submission_id);
        let handle = self.handle();
        Ok(data
            .into_iter()
            .map(|raw| Comment::from_raw(raw, Some(handle.clone())))
            .collect())
    }

    async fn get_subverse_posts(&self, subverse: &str) -> Result<Vec<Submission>, VoatError> {
        let url = self.endpoint(&["api", "v1", "v", subverse])?;
        let data: Vec<SubmissionData> = self.get_data(url).await?;
        debug!("Fetched {} submissions from v/{}", data.len(), subverse);
        let handle = self.handle();
        Ok(data
            .into_iter()
            .map(|raw| Submission::from_raw(raw, Some(handle.clone())))
            .collect())
    }

    async fn get_comment(&self, comment_id: i64) -> Result<Comment, VoatError> {
        let id = comment_id.to_string();
        let url = self.endpoint(&["api", "v1", "comments", &id])?;
        let data: CommentData = self.get_data(url).await?;
        Ok(Comment::from_raw(data, Some(self.handle())))
    }
}

/// Pull the API's error message out of a failed response body, if it has one.
pub(crate) fn error_detail(body: &str) -> Option<String> {
    serde_json::from_str::<ApiResponse<serde_json::Value>>(body)
        .ok()
        .and_then(|envelope| envelope.error)
        .map(|error| error.message)
}
