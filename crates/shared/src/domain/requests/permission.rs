use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePermissionRequest {
    #[validate(range(min = 1, message = "Company ID is required"))]
    pub company_id: i64,

    #[validate(range(min = 1, message = "Role ID is required"))]
    pub role_id: i64,

    #[validate(length(min = 1, message = "Permission name is required"))]
    pub name: String,

    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePermissionModuleActionsRequest {
    pub module_action_ids: Vec<i64>,
}
