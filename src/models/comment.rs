use super::lenient;
use serde::Deserialize;
use std::collections::HashMap;

/// Comment payload. Note the upper-case `ID` suffixes the API uses for the
/// foreign keys.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CommentData {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient", rename = "parentID")]
    pub parent_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient", rename = "submissionID")]
    pub submission_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub subverse: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub user_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub up_votes: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub down_votes: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub date: Option<String>,

    #[serde(flatten)]
    pub additional_fields: HashMap<String, serde_json::Value>,
}
