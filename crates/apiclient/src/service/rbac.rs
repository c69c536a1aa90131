use crate::{
    abstract_trait::RbacServiceTrait, client::ApiClient, service::require_company_id,
    transport::ApiRequest,
};
use async_trait::async_trait;
use shared::{
    domain::{
        requests::{
            AssignRoleRequest, CreatePermissionRequest, CreateRoleRequest,
            UpdatePermissionModuleActionsRequest, UpdateRolePermissionsRequest, UpdateRoleRequest,
        },
        responses::{ModuleActionResponse, PermissionResponse, RoleResponse},
    },
    errors::ClientError,
};
use std::sync::Arc;
use tracing::{error, info};
use validator::Validate;

/// Roles, permissions and module actions under `/rbac`.
#[derive(Debug, Clone)]
pub struct RbacService {
    client: Arc<ApiClient>,
}

impl RbacService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RbacServiceTrait for RbacService {
    async fn list_roles(&self, company_id: i64) -> Result<Vec<RoleResponse>, ClientError> {
        require_company_id(company_id)?;
        info!("Fetching roles for company {company_id}");

        let roles = self
            .client
            .request_list(ApiRequest::get(format!("/rbac/roles/company/{company_id}")))
            .await
            .inspect_err(|err| error!("Failed to fetch roles for company {company_id}: {err}"))?;

        info!("Fetched {} roles", roles.len());
        Ok(roles)
    }

    async fn list_permissions(
        &self,
        company_id: i64,
    ) -> Result<Vec<PermissionResponse>, ClientError> {
        require_company_id(company_id)?;
        info!("Fetching permissions for company {company_id}");

        let permissions = self
            .client
            .request_list(ApiRequest::get(format!(
                "/rbac/permissions/company/{company_id}"
            )))
            .await
            .inspect_err(|err| {
                error!("Failed to fetch permissions for company {company_id}: {err}")
            })?;

        info!("Fetched {} permissions", permissions.len());
        Ok(permissions)
    }

    async fn create_role(&self, input: &CreateRoleRequest) -> Result<RoleResponse, ClientError> {
        require_company_id(input.company_id)?;
        input.validate()?;
        info!("Creating role {} in company {}", input.name, input.company_id);

        let request = ApiRequest::post("/rbac/roles").with_json(input)?;
        let role: RoleResponse = self
            .client
            .request_json(request)
            .await
            .inspect_err(|err| error!("Failed to create role {}: {err}", input.name))?;

        info!("Role {} created with id {}", role.name, role.id);
        Ok(role)
    }

    async fn update_role(
        &self,
        role_id: i64,
        input: &UpdateRoleRequest,
    ) -> Result<RoleResponse, ClientError> {
        input.validate()?;
        info!("Updating role {role_id}");

        let request = ApiRequest::put(format!("/rbac/roles/{role_id}")).with_json(input)?;
        let role = self
            .client
            .request_json(request)
            .await
            .inspect_err(|err| error!("Failed to update role {role_id}: {err}"))?;

        info!("Role {role_id} updated");
        Ok(role)
    }

    async fn delete_role(&self, role_id: i64) -> Result<(), ClientError> {
        info!("Deleting role {role_id}");

        self.client
            .request_empty(ApiRequest::delete(format!("/rbac/roles/{role_id}")))
            .await
            .inspect_err(|err| error!("Failed to delete role {role_id}: {err}"))?;

        info!("Role {role_id} deleted");
        Ok(())
    }

    async fn update_role_permissions(
        &self,
        role_id: i64,
        permission_ids: &[i64],
    ) -> Result<(), ClientError> {
        info!(
            "Setting {} permissions on role {role_id}",
            permission_ids.len()
        );

        let body = UpdateRolePermissionsRequest {
            permission_ids: permission_ids.to_vec(),
        };
        let request =
            ApiRequest::put(format!("/rbac/roles/{role_id}/permissions")).with_json(&body)?;

        self.client
            .request_empty(request)
            .await
            .inspect_err(|err| error!("Failed to update permissions of role {role_id}: {err}"))?;

        info!("Permissions of role {role_id} updated");
        Ok(())
    }

    async fn assign_user_to_role(&self, role_id: i64, user_id: i64) -> Result<(), ClientError> {
        info!("Assigning user {user_id} to role {role_id}");

        let request =
            ApiRequest::post("/rbac/roles/assign").with_json(&AssignRoleRequest { role_id, user_id })?;

        self.client
            .request_empty(request)
            .await
            .inspect_err(|err| {
                error!("Failed to assign user {user_id} to role {role_id}: {err}")
            })?;

        info!("User {user_id} assigned to role {role_id}");
        Ok(())
    }

    async fn create_permission(
        &self,
        input: &CreatePermissionRequest,
    ) -> Result<PermissionResponse, ClientError> {
        require_company_id(input.company_id)?;
        input.validate()?;
        info!(
            "Creating permission {} for role {}",
            input.name, input.role_id
        );

        let request = ApiRequest::post("/rbac/permissions").with_json(input)?;
        let permission: PermissionResponse = self
            .client
            .request_json(request)
            .await
            .inspect_err(|err| error!("Failed to create permission {}: {err}", input.name))?;

        info!("Permission {} created with id {}", permission.name, permission.id);
        Ok(permission)
    }

    async fn list_module_actions(&self) -> Result<Vec<ModuleActionResponse>, ClientError> {
        info!("Fetching module actions");

        self.client
            .request_list(ApiRequest::get("/rbac/module-actions"))
            .await
            .inspect_err(|err| error!("Failed to fetch module actions: {err}"))
    }

    async fn permission_module_actions(
        &self,
        permission_id: i64,
    ) -> Result<Vec<ModuleActionResponse>, ClientError> {
        info!("Fetching module actions of permission {permission_id}");

        self.client
            .request_list(ApiRequest::get(format!(
                "/rbac/permissions/{permission_id}/module-actions"
            )))
            .await
            .inspect_err(|err| {
                error!("Failed to fetch module actions of permission {permission_id}: {err}")
            })
    }

    async fn update_permission_module_actions(
        &self,
        permission_id: i64,
        module_action_ids: &[i64],
    ) -> Result<(), ClientError> {
        info!(
            "Setting {} module actions on permission {permission_id}",
            module_action_ids.len()
        );

        let body = UpdatePermissionModuleActionsRequest {
            module_action_ids: module_action_ids.to_vec(),
        };
        let request = ApiRequest::put(format!("/rbac/permissions/{permission_id}/module-actions"))
            .with_json(&body)?;

        self.client
            .request_empty(request)
            .await
            .inspect_err(|err| {
                error!("Failed to update module actions of permission {permission_id}: {err}")
            })?;

        info!("Module actions of permission {permission_id} updated");
        Ok(())
    }
}
