use crate::auth::AuthToken;
use crate::client::{VoatClient, VoatError};
use crate::objects::format_date;
use chrono_tz::Tz;
use log::{error, info};

/// Credentials used for the password grant
#[derive(Debug, Clone)]
pub struct TokenOptions {
    pub username: String,
    pub password: String,
    pub tz: Tz,
}

#[derive(Debug)]
pub struct TokenResult {
    pub token: AuthToken,
    pub message: String,
}

/// Operation for acquiring an auth token
pub struct TokenOperation {
    options: TokenOptions,
    client: VoatClient,
}

impl TokenOperation {
    pub fn with_client(options: TokenOptions, client: VoatClient) -> Self {
        Self { options, client }
    }

    pub async fn execute(&mut self) -> Result<TokenResult, VoatError> {
        info!("Requesting a token for {}", self.options.username);
        let token = self
            .client
            .login(&self.options.username, &self.options.password)
            .await?;

        let message = format!(
            "Authenticated as {}\nToken type: {}\nValid until: {}",
            token.username,
            token.token_type,
            format_date(Some(token.expires_at()), self.options.tz)
        );
        Ok(TokenResult { token, message })
    }
}

/// CLI handler function for token command
pub async fn handle_token_command(
    options: TokenOptions,
    client: VoatClient,
) -> Result<(), VoatError> {
    let mut operation = TokenOperation::with_client(options, client);
    match operation.execute().await {
        Ok(result) => {
            println!("{}", result.message);
            Ok(())
        }
        Err(err) => {
            error!("Error acquiring token: {:?}", err);
            Err(err)
        }
    }
}
