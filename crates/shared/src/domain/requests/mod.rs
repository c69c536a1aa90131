mod auth;
mod company;
mod permission;
mod role;
mod user;

pub use self::auth::{LoginRequest, RefreshTokenRequest, RegisterRequest};
pub use self::company::{CreateCompanyRequest, UpdateCompanyRequest};
pub use self::permission::{CreatePermissionRequest, UpdatePermissionModuleActionsRequest};
pub use self::role::{
    AssignRoleRequest, CreateRoleRequest, UpdateRolePermissionsRequest, UpdateRoleRequest,
};
pub use self::user::{RegisterCompanyUserRequest, SearchUsersRequest, UpdateUserRequest};
