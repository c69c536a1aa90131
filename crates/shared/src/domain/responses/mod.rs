mod company;
mod module_action;
mod permission;
mod role;
mod token;
mod user;

pub use self::company::CompanyResponse;
pub use self::module_action::ModuleActionResponse;
pub use self::permission::PermissionResponse;
pub use self::role::RoleResponse;
pub use self::token::TokenResponse;
pub use self::user::UserResponse;
