use super::{format_date, parse_date, Submission, VoatHandle, VoatObject};
use crate::client::VoatError;
use crate::models::subverse::SubverseData;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use log::debug;
use std::collections::HashMap;
use tokio::sync::OnceCell;

/// A community, identified by its `name`.
#[derive(Debug, Clone)]
pub struct Subverse {
    pub name: String,
    pub title: String,
    pub nsfw: bool,
    pub sidebar: String,
    pub description: String,
    pub subscribers: i64,
    pub date: Option<DateTime<Utc>>,
    pub extra: HashMap<String, serde_json::Value>,
    voat: Option<VoatHandle>,
    posts: OnceCell<Vec<Submission>>,
}

impl Default for Subverse {
    fn default() -> Self {
        Self::from_raw(SubverseData::default(), None)
    }
}

impl VoatObject for Subverse {
    type Raw = SubverseData;

    fn from_raw(raw: SubverseData, voat: Option<VoatHandle>) -> Self {
        Self {
            name: raw.name.unwrap_or_default(),
            title: raw.title.unwrap_or_default(),
            nsfw: raw.rated_adult.unwrap_or(false),
            sidebar: raw.sidebar.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            subscribers: raw.subscriber_count.unwrap_or(-1),
            date: parse_date(raw.creation_date.as_deref()),
            extra: raw.additional_fields,
            voat,
            posts: OnceCell::new(),
        }
    }

    fn voat(&self) -> Option<&VoatHandle> {
        self.voat.as_ref()
    }

    fn attach(&mut self, voat: VoatHandle) {
        self.voat = Some(voat);
    }
}

impl Subverse {
    /// Submissions currently listed in the subverse, fetched on first access.
    pub async fn posts(&self) -> Result<&[Submission], VoatError> {
        let posts = self
            .posts
            .get_or_try_init(|| async {
                match &self.voat {
                    Some(voat) => {
                        debug!("Resolving posts of v/{}", self.name);
                        voat.get_subverse_posts(&self.name).await
                    }
                    None => Ok(Vec::new()),
                }
            })
            .await?;
        Ok(posts.as_slice())
    }

    pub fn set_posts(&mut self, posts: Vec<Submission>) {
        self.posts = OnceCell::from(posts);
    }

    pub fn is_posts_resolved(&self) -> bool {
        self.posts.initialized()
    }

    pub fn format_summary(&self, tz: Tz) -> String {
        let mut content = format!(
            "v/{} - {}\nSubscribers: {}\nCreated: {}\n",
            self.name,
            self.title,
            self.subscribers,
            format_date(self.date, tz),
        );
        if self.nsfw {
            content.push_str("Flags: [NSFW]\n");
        }
        if !self.description.is_empty() {
            content.push_str(&format!("\n{}\n", self.description));
        }
        if !self.sidebar.is_empty() {
            content.push_str("\nSidebar:\n---------\n");
            content.push_str(&self.sidebar);
            content.push_str("\n---------\n");
        }
        content
    }
}
