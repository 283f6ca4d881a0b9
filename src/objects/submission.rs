use super::{format_date, parse_date, Comment, VoatHandle, VoatObject};
use crate::client::VoatError;
use crate::models::submission::SubmissionData;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use log::debug;
use std::collections::HashMap;
use tokio::sync::OnceCell;

/// A post in a subverse, either a text post or a link.
#[derive(Debug, Clone)]
pub struct Submission {
    pub id: i64,
    pub title: String,
    /// Body text for text posts, the linked URL for link posts.
    pub content: String,
    pub author: String,
    pub subverse: String,
    pub karma: i64,
    pub views: i64,
    pub date: Option<DateTime<Utc>>,
    pub is_url: bool,
    pub extra: HashMap<String, serde_json::Value>,
    voat: Option<VoatHandle>,
    comments: OnceCell<Vec<Comment>>,
}

impl Default for Submission {
    fn default() -> Self {
        Self::from_raw(SubmissionData::default(), None)
    }
}

impl VoatObject for Submission {
    type Raw = SubmissionData;

    fn from_raw(raw: SubmissionData, voat: Option<VoatHandle>) -> Self {
        let url = raw.url.filter(|url| !url.is_empty());
        let is_url = url.is_some();
        let content = match raw.content.filter(|content| !content.is_empty()) {
            Some(content) => content,
            None => url.unwrap_or_default(),
        };

        Self {
            id: raw.id.unwrap_or(-1),
            title: raw.title.unwrap_or_default(),
            content,
            author: raw.user_name.unwrap_or_default(),
            subverse: raw.subverse.unwrap_or_default(),
            karma: raw.up_votes.unwrap_or(-1),
            views: raw.views.unwrap_or(-1),
            date: parse_date(raw.date.as_deref()),
            is_url,
            extra: raw.additional_fields,
            voat,
            comments: OnceCell::new(),
        }
    }

    fn voat(&self) -> Option<&VoatHandle> {
        self.voat.as_ref()
    }

    fn attach(&mut self, voat: VoatHandle) {
        self.voat = Some(voat);
    }
}

impl Submission {
    /// The submission's comments, fetched on first access.
    ///
    /// Without a handle this is always empty. A failed fetch is returned to
    /// the caller and the next call tries again.
    pub async fn comments(&self) -> Result<&[Comment], VoatError> {
        let comments = self
            .comments
            .get_or_try_init(|| async {
                match &self.voat {
                    Some(voat) => {
                        debug!("Resolving comments of submission {}", self.id);
                        voat.fetch_comments(self.id, &self.subverse).await
                    }
                    None => Ok(Vec::new()),
                }
            })
            .await?;
        Ok(comments.as_slice())
    }

    pub fn set_comments(&mut self, comments: Vec<Comment>) {
        self.comments = OnceCell::from(comments);
    }

    pub fn is_comments_resolved(&self) -> bool {
        self.comments.initialized()
    }

    /// Format a submission for display with important metadata
    pub fn format_summary(&self, tz: Tz) -> String {
        let mut content = format!(
            "Title: {}\nAuthor: {}\nSubverse: v/{}\nKarma: {} | Views: {}\nPosted: {}\n",
            self.title,
            self.author,
            self.subverse,
            self.karma,
            self.views,
            format_date(self.date, tz),
        );

        if self.is_url {
            content.push_str(&format!("Link: {}\n", self.content));
        } else if !self.content.is_empty() {
            let text = if self.content.chars().count() > 500 {
                format!("{}...", self.content.chars().take(500).collect::<String>())
            } else {
                self.content.clone()
            };
            content.push_str("\nContent:\n---------\n");
            content.push_str(&text);
            content.push_str("\n---------\n");
        }

        content
    }

    /// One-line summary: type marker, karma, title, author
    pub fn format_short_summary(&self) -> String {
        format!(
            "[{}] #{} ({} pts) {} - by {}",
            if self.is_url { "L" } else { "T" },
            self.id,
            self.karma,
            self.title,
            self.author
        )
    }
}
