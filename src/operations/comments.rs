use crate::client::{VoatClient, VoatError};
use crate::objects::{Comment, Submission};
use chrono_tz::Tz;
use log::{error, info};
use std::collections::{HashMap, HashSet};

/// Configuration options for showing a submission with its comments
#[derive(Debug, Clone)]
pub struct CommentsOptions {
    pub subverse: String,
    pub submission_id: i64,
    pub tz: Tz,
}

#[derive(Debug)]
pub struct CommentsResult {
    pub submission: Submission,
    pub comment_count: usize,
    pub formatted_output: String,
}

/// Operation for fetching a submission and rendering its comment thread
pub struct CommentsOperation {
    options: CommentsOptions,
    client: VoatClient,
}

impl CommentsOperation {
    pub fn with_client(options: CommentsOptions, client: VoatClient) -> Self {
        Self { options, client }
    }

    pub async fn execute(&self) -> Result<CommentsResult, VoatError> {
        info!(
            "Fetching submission {} from v/{}",
            self.options.submission_id, self.options.subverse
        );
        let submission = self
            .client
            .get_submission(&self.options.subverse, self.options.submission_id)
            .await?;

        let mut output = submission.format_summary(self.options.tz);
        let comment_count = {
            let comments = submission.comments().await?;
            output.push_str(&format!("\n{} comments\n", comments.len()));
            output.push_str(&render_thread(comments, self.options.tz));
            comments.len()
        };

        Ok(CommentsResult {
            submission,
            comment_count,
            formatted_output: output,
        })
    }
}

/// Render comments as an indented tree. Comments whose parent is not in the
/// set are shown at the top level.
pub fn render_thread(comments: &[Comment], tz: Tz) -> String {
    let ids: HashSet<i64> = comments.iter().map(|comment| comment.id).collect();
    let mut replies: HashMap<i64, Vec<usize>> = HashMap::new();
    let mut roots = Vec::new();
    for (index, comment) in comments.iter().enumerate() {
        match comment.parent_id {
            Some(parent) if parent != comment.id && ids.contains(&parent) => {
                replies.entry(parent).or_default().push(index)
            }
            _ => roots.push(index),
        }
    }

    let mut output = String::new();
    let mut stack: Vec<(usize, usize)> = roots.into_iter().rev().map(|i| (i, 0)).collect();
    // Keyed on position: ids may repeat, e.g. when missing ids default to -1
    let mut seen = HashSet::new();
    while let Some((index, depth)) = stack.pop() {
        if !seen.insert(index) {
            continue;
        }
        let comment = &comments[index];
        let indent = "    ".repeat(depth);
        for line in comment.format_summary(tz).lines() {
            output.push_str(&indent);
            output.push_str(line);
            output.push('\n');
        }
        if let Some(children) = replies.get(&comment.id) {
            stack.extend(children.iter().rev().map(|child| (*child, depth + 1)));
        }
    }
    output
}

/// CLI handler function for comments command
pub async fn handle_comments_command(
    options: CommentsOptions,
    client: VoatClient,
) -> Result<(), VoatError> {
    let operation = CommentsOperation::with_client(options, client);
    match operation.execute().await {
        Ok(result) => {
            println!("{}", result.formatted_output);
            Ok(())
        }
        Err(err) => {
            error!("Error executing comments operation: {:?}", err);
            Err(err)
        }
    }
}
