use crate::utils::{deserialize_id, deserialize_optional_id};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    #[serde(default, alias = "username")]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub company_id: Option<i64>,
    #[serde(default)]
    pub is_main: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
