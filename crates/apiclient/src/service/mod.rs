mod auth;
mod company;
mod rbac;
mod user;

pub use self::auth::AuthService;
pub use self::company::CompanyService;
pub use self::rbac::RbacService;
pub use self::user::UserService;

use shared::errors::ClientError;

pub const COMPANY_ID_REQUIRED: &str = "Company ID is required";

/// Positive company id or a local validation failure; nothing is sent.
pub(crate) fn require_company_id(company_id: i64) -> Result<(), ClientError> {
    if company_id > 0 {
        Ok(())
    } else {
        Err(ClientError::Validation(vec![COMPANY_ID_REQUIRED.to_string()]))
    }
}
