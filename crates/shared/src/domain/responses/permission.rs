use crate::utils::{deserialize_id, deserialize_optional_id};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionResponse {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub role_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub module_action_id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub description: String,
}
