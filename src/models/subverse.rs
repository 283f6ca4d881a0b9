use super::lenient;
use serde::Deserialize;
use std::collections::HashMap;

/// Subverse info payload
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SubverseData {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub sidebar: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub rated_adult: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub subscriber_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub creation_date: Option<String>,

    #[serde(flatten)]
    pub additional_fields: HashMap<String, serde_json::Value>,
}
