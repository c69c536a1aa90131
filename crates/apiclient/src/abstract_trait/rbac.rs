use async_trait::async_trait;
use shared::{
    domain::{
        requests::{CreatePermissionRequest, CreateRoleRequest, UpdateRoleRequest},
        responses::{ModuleActionResponse, PermissionResponse, RoleResponse},
    },
    errors::ClientError,
};
use std::sync::Arc;

pub type DynRbacService = Arc<dyn RbacServiceTrait + Send + Sync>;

#[async_trait]
pub trait RbacServiceTrait {
    async fn list_roles(&self, company_id: i64) -> Result<Vec<RoleResponse>, ClientError>;
    async fn list_permissions(
        &self,
        company_id: i64,
    ) -> Result<Vec<PermissionResponse>, ClientError>;
    async fn create_role(&self, input: &CreateRoleRequest) -> Result<RoleResponse, ClientError>;
    async fn update_role(
        &self,
        role_id: i64,
        input: &UpdateRoleRequest,
    ) -> Result<RoleResponse, ClientError>;
    async fn delete_role(&self, role_id: i64) -> Result<(), ClientError>;
    async fn update_role_permissions(
        &self,
        role_id: i64,
        permission_ids: &[i64],
    ) -> Result<(), ClientError>;
    async fn assign_user_to_role(&self, role_id: i64, user_id: i64) -> Result<(), ClientError>;
    async fn create_permission(
        &self,
        input: &CreatePermissionRequest,
    ) -> Result<PermissionResponse, ClientError>;
    async fn list_module_actions(&self) -> Result<Vec<ModuleActionResponse>, ClientError>;
    async fn permission_module_actions(
        &self,
        permission_id: i64,
    ) -> Result<Vec<ModuleActionResponse>, ClientError>;
    async fn update_permission_module_actions(
        &self,
        permission_id: i64,
        module_action_ids: &[i64],
    ) -> Result<(), ClientError>;
}
