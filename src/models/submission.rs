use super::lenient;
use serde::Deserialize;
use std::collections::HashMap;

/// Submission payload as returned by the API. Every field is optional; the
/// entity layer decides the defaults.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionData {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub user_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub subverse: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub up_votes: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub views: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub date: Option<String>,

    // Additional fields we don't explicitly model
    #[serde(flatten)]
    pub additional_fields: HashMap<String, serde_json::Value>,
}
