use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Standalone news entry. Carries no relation to match or standing
/// state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: u32,
    pub title: String,
    pub summary: String,
    pub image: String,
    #[serde(default)]
    pub content: Option<String>,
    pub date: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewsDraft {
    pub title: String,
    pub summary: String,
    pub image: String,
    #[serde(default)]
    pub content: Option<String>,
    pub date: NaiveDateTime,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewsPatch {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub image: Option<String>,
    #[serde(default, deserialize_with = "crate::patch::double_option")]
    pub content: Option<Option<String>>,
    pub date: Option<NaiveDateTime>,
}

impl NewsItem {
    pub fn apply_patch(&mut self, patch: NewsPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(summary) = patch.summary {
            self.summary = summary;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
    }
}
