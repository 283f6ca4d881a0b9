use super::{format_date, parse_date, VoatHandle, VoatObject};
use crate::client::VoatError;
use crate::models::comment::CommentData;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use log::{debug, warn};
use std::collections::HashMap;
use tokio::sync::OnceCell;

/// A comment on a submission. Top-level comments have no `parent_id`.
#[derive(Debug, Clone)]
pub struct Comment {
    pub id: i64,
    pub date: Option<DateTime<Utc>>,
    pub content: String,
    /// Upvotes minus downvotes.
    pub karma: i64,
    pub subverse: String,
    pub author: String,
    pub parent_id: Option<i64>,
    pub submission_id: Option<i64>,
    pub extra: HashMap<String, serde_json::Value>,
    voat: Option<VoatHandle>,
    parent: OnceCell<Box<Comment>>,
    children: OnceCell<Vec<Comment>>,
}

/// The empty placeholder handed out when a parent cannot be resolved.
impl Default for Comment {
    fn default() -> Self {
        Self::from_raw(CommentData::default(), None)
    }
}

impl VoatObject for Comment {
    type Raw = CommentData;

    fn from_raw(raw: CommentData, voat: Option<VoatHandle>) -> Self {
        Self {
            id: raw.id.unwrap_or(-1),
            date: parse_date(raw.date.as_deref()),
            content: raw.content.unwrap_or_default(),
            karma: raw
                .up_votes
                .unwrap_or(0)
                .saturating_sub(raw.down_votes.unwrap_or(0)),
            subverse: raw.subverse.unwrap_or_default(),
            author: raw.user_name.unwrap_or_default(),
            parent_id: raw.parent_id,
            submission_id: raw.submission_id,
            extra: raw.additional_fields,
            voat,
            parent: OnceCell::new(),
            children: OnceCell::new(),
        }
    }

    fn voat(&self) -> Option<&VoatHandle> {
        self.voat.as_ref()
    }

    fn attach(&mut self, voat: VoatHandle) {
        self.voat = Some(voat);
    }
}

impl Comment {
    /// True for the placeholder returned when no parent could be resolved.
    pub fn is_placeholder(&self) -> bool {
        self.id == -1 && self.voat.is_none() && self.content.is_empty()
    }

    /// The comment this one replies to, fetched on first access.
    ///
    /// This never fails. Without a handle, without a parent id, or when the
    /// fetch errors, the result is an empty placeholder comment, and that
    /// placeholder is cached like any other answer. The fetch error itself is
    /// only logged.
    pub async fn parent(&self) -> &Comment {
        self.parent.get_or_init(|| self.resolve_parent()).await
    }

    async fn resolve_parent(&self) -> Box<Comment> {
        let (voat, parent_id) = match (&self.voat, self.parent_id) {
            (Some(voat), Some(parent_id)) => (voat, parent_id),
            _ => return Box::default(),
        };
        debug!("Resolving parent {} of comment {}", parent_id, self.id);
        match voat.get_comment(parent_id).await {
            Ok(parent) => Box::new(parent),
            Err(err) => {
                warn!(
                    "Could not fetch parent {} of comment {}, using placeholder: {}",
                    parent_id, self.id, err
                );
                Box::default()
            }
        }
    }

    pub fn is_parent_resolved(&self) -> bool {
        self.parent.initialized()
    }

    /// Direct replies to this comment, taken from the full comment set of the
    /// owning submission on first access.
    pub async fn children(&self) -> Result<&[Comment], VoatError> {
        let children = self
            .children
            .get_or_try_init(|| self.resolve_children())
            .await?;
        Ok(children.as_slice())
    }

    async fn resolve_children(&self) -> Result<Vec<Comment>, VoatError> {
        let (voat, submission_id) = match (&self.voat, self.submission_id) {
            (Some(voat), Some(submission_id)) => (voat, submission_id),
            _ => return Ok(Vec::new()),
        };
        debug!(
            "Resolving children of comment {} from submission {}",
            self.id, submission_id
        );
        let comments = voat.fetch_comments(submission_id, &self.subverse).await?;
        Ok(comments
            .into_iter()
            .filter(|comment| comment.parent_id == Some(self.id))
            .collect())
    }

    pub fn is_children_resolved(&self) -> bool {
        self.children.initialized()
    }

    pub fn format_summary(&self, tz: Tz) -> String {
        format!(
            "#{} by {} ({} pts, {})\n{}",
            self.id,
            self.author,
            self.karma,
            format_date(self.date, tz),
            self.content
        )
    }
}
