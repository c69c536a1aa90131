use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateCompanyRequest {
    #[validate(length(min = 3, max = 100, message = "Company name must be 3 to 100 characters"))]
    pub name: String,

    #[validate(email(message = "Company email must be a valid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Company phone is required"))]
    pub phone: String,

    #[validate(length(min = 1, message = "Company address is required"))]
    pub address: String,

    #[validate(length(min = 1, message = "Company identifier is required"))]
    pub identifier: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateCompanyRequest {
    #[validate(length(min = 3, max = 100, message = "Company name must be 3 to 100 characters"))]
    pub name: String,

    #[validate(email(message = "Company email must be a valid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Company phone is required"))]
    pub phone: String,

    #[validate(length(min = 1, message = "Company identifier is required"))]
    pub identifier: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}
