use crate::domain::responses::PermissionResponse;
use crate::utils::{deserialize_id, deserialize_null_default};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleResponse {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    #[serde(deserialize_with = "deserialize_id")]
    pub company_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub permissions: Vec<PermissionResponse>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_string_ids_and_null_permissions() {
        let role: RoleResponse = serde_json::from_value(serde_json::json!({
            "id": "12",
            "company_id": 3,
            "name": "auditor",
            "description": "read only",
            "permissions": null
        }))
        .unwrap();

        assert_eq!(role.id, 12);
        assert_eq!(role.company_id, 3);
        assert!(role.permissions.is_empty());
    }

    #[test]
    fn decodes_nested_permissions() {
        let role: RoleResponse = serde_json::from_value(serde_json::json!({
            "id": 1,
            "company_id": 3,
            "name": "admin",
            "permissions": [
                {"id": "5", "role_id": 1, "module_action_id": 2, "name": "companies.write"}
            ]
        }))
        .unwrap();

        assert_eq!(role.permissions.len(), 1);
        assert_eq!(role.permissions[0].id, 5);
        assert_eq!(role.permissions[0].module_action_id, Some(2));
    }
}
