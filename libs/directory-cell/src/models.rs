use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Specialty {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub building_id: Option<i64>,
    #[serde(default)]
    pub building: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: i64,
    pub full_name: String,
    #[serde(default)]
    pub title: Option<String>,
    pub specialty_id: i64,
    #[serde(default)]
    pub room_id: Option<i64>,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub building: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Doctor {
    /// "BS.CKI Nguyễn Văn An" when a title exists, bare name otherwise.
    pub fn display_name(&self) -> String {
        match &self.title {
            Some(title) => format!("{} {}", title, self.full_name),
            None => self.full_name.clone(),
        }
    }
}
