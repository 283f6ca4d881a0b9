use crate::client::{VoatClient, VoatError};
use crate::objects::Subverse;
use chrono_tz::Tz;
use log::{error, info};

/// Configuration options for showing a subverse
#[derive(Debug, Clone)]
pub struct SubverseInfoOptions {
    pub name: String,
    pub tz: Tz,
}

#[derive(Debug)]
pub struct SubverseInfoResult {
    pub subverse: Subverse,
    pub formatted_output: String,
}

/// Operation for fetching a subverse's info
pub struct SubverseInfoOperation {
    options: SubverseInfoOptions,
    client: VoatClient,
}

impl SubverseInfoOperation {
    pub fn with_client(options: SubverseInfoOptions, client: VoatClient) -> Self {
        Self { options, client }
    }

    pub async fn execute(&self) -> Result<SubverseInfoResult, VoatError> {
        info!("Fetching info for v/{}", self.options.name);
        let subverse = self.client.get_subverse(&self.options.name).await?;
        let formatted_output = subverse.format_summary(self.options.tz);
        Ok(SubverseInfoResult {
            subverse,
            formatted_output,
        })
    }
}

/// CLI handler function for subverse command
pub async fn handle_subverse_info_command(
    options: SubverseInfoOptions,
    client: VoatClient,
) -> Result<(), VoatError> {
    let operation = SubverseInfoOperation::with_client(options, client);
    match operation.execute().await {
        Ok(result) => {
            println!("{}", result.formatted_output);
            Ok(())
        }
        Err(err) => {
            error!("Error fetching subverse info: {:?}", err);
            Err(err)
        }
    }
}
