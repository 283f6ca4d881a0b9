use crate::client::{VoatApi, VoatClient, VoatError};
use crate::objects::Comment;
use chrono_tz::Tz;
use log::{error, info};

/// Configuration options for showing a single comment in context
#[derive(Debug, Clone)]
pub struct CommentOptions {
    pub comment_id: i64,
    pub tz: Tz,
}

/// Result of a comment lookup
#[derive(Debug)]
pub struct CommentResult {
    pub comment: Comment,
    /// Formatted message for CLI output
    pub formatted_output: String,
}

/// Operation for fetching a comment with its parent and direct replies
pub struct CommentOperation {
    options: CommentOptions,
    client: VoatClient,
}

impl CommentOperation {
    pub fn with_client(options: CommentOptions, client: VoatClient) -> Self {
        Self { options, client }
    }

    pub async fn execute(&self) -> Result<CommentResult, VoatError> {
        info!("Fetching comment {}", self.options.comment_id);
        let comment = self.client.get_comment(self.options.comment_id).await?;
        let tz = self.options.tz;

        let mut output = String::new();
        let parent = comment.parent().await;
        if parent.is_placeholder() {
            output.push_str("In reply to: (top level or unavailable)\n\n");
        } else {
            output.push_str("In reply to:\n");
            output.push_str(&parent.format_summary(tz));
            output.push_str("\n\n");
        }

        output.push_str(&comment.format_summary(tz));
        output.push('\n');

        let children = comment.children().await?;
        output.push_str(&format!("\n{} replies\n", children.len()));
        for child in children {
            for line in child.format_summary(tz).lines() {
                output.push_str("    ");
                output.push_str(line);
                output.push('\n');
            }
        }

        Ok(CommentResult {
            comment,
            formatted_output: output,
        })
    }
}

/// CLI handler function for comment command
pub async fn handle_comment_command(
    options: CommentOptions,
    client: VoatClient,
) -> Result<(), VoatError> {
    let operation = CommentOperation::with_client(options, client);
    match operation.execute().await {
        Ok(result) => {
            println!("{}", result.formatted_output);
            Ok(())
        }
        Err(err) => {
            error!("Error executing comment operation: {:?}", err);
            Err(err)
        }
    }
}
