use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRoleRequest {
    #[validate(range(min = 1, message = "Company ID is required"))]
    pub company_id: i64,

    #[validate(length(min = 1, message = "Role name is required"))]
    pub name: String,

    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateRoleRequest {
    #[validate(length(min = 1, message = "Role name is required"))]
    pub name: String,

    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRolePermissionsRequest {
    pub permission_ids: Vec<i64>,
}

/// Body of `POST /rbac/roles/assign`; the backend expects camelCase keys here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRoleRequest {
    pub role_id: i64,
    pub user_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_body_uses_camel_case() {
        let body = serde_json::to_value(AssignRoleRequest {
            role_id: 4,
            user_id: 9,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"roleId": 4, "userId": 9}));
    }

    #[test]
    fn role_without_company_is_invalid() {
        let req = CreateRoleRequest {
            company_id: 0,
            name: "auditor".into(),
            description: String::new(),
        };
        assert!(req.validate().is_err());
    }
}
