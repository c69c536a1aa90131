use crate::{
    abstract_trait::UserServiceTrait, client::ApiClient, service::require_company_id,
    transport::ApiRequest,
};
use async_trait::async_trait;
use serde::Serialize;
use shared::{
    domain::{
        requests::{RegisterCompanyUserRequest, SearchUsersRequest, UpdateUserRequest},
        responses::UserResponse,
    },
    errors::ClientError,
};
use std::sync::Arc;
use tracing::{error, info};
use validator::Validate;

#[derive(Debug, Clone)]
pub struct UserService {
    client: Arc<ApiClient>,
}

impl UserService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[derive(Serialize)]
struct RegisterUserBody<'a> {
    #[serde(flatten)]
    user: &'a RegisterCompanyUserRequest,
    company_id: i64,
}

#[derive(Serialize)]
struct UpdateUserBody<'a> {
    #[serde(flatten)]
    user: &'a UpdateUserRequest,
    #[serde(rename = "companyId")]
    company_id: i64,
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn list_users(&self, company_id: i64) -> Result<Vec<UserResponse>, ClientError> {
        self.search_users(&SearchUsersRequest::for_company(company_id))
            .await
    }

    async fn search_users(
        &self,
        input: &SearchUsersRequest,
    ) -> Result<Vec<UserResponse>, ClientError> {
        require_company_id(input.company_id)?;
        input.validate()?;
        info!("Searching users of company {}", input.company_id);

        let request = ApiRequest::get("/users/search").with_query_pairs(input.query_pairs());
        let users = self
            .client
            .request_list(request)
            .await
            .inspect_err(|err| {
                error!("Failed to search users of company {}: {err}", input.company_id)
            })?;

        info!("Found {} users", users.len());
        Ok(users)
    }

    async fn register_user(
        &self,
        company_id: i64,
        input: &RegisterCompanyUserRequest,
    ) -> Result<UserResponse, ClientError> {
        require_company_id(company_id)?;
        input.validate()?;
        info!("Registering user {} in company {company_id}", input.username);

        let body = RegisterUserBody {
            user: input,
            company_id,
        };
        let request = ApiRequest::post("/company-users/register").with_json(&body)?;
        let user: UserResponse = self
            .client
            .request_json(request)
            .await
            .inspect_err(|err| error!("Failed to register user {}: {err}", input.username))?;

        info!("User {} registered with id {}", input.username, user.id);
        Ok(user)
    }

    async fn update_user(
        &self,
        company_id: i64,
        user_id: i64,
        input: &UpdateUserRequest,
    ) -> Result<UserResponse, ClientError> {
        require_company_id(company_id)?;
        input.validate()?;
        info!("Updating user {user_id} in company {company_id}");

        let body = UpdateUserBody {
            user: input,
            company_id,
        };
        let request = ApiRequest::put(format!("/users/{user_id}")).with_json(&body)?;
        let user = self
            .client
            .request_json(request)
            .await
            .inspect_err(|err| error!("Failed to update user {user_id}: {err}"))?;

        info!("User {user_id} updated");
        Ok(user)
    }

    async fn delete_user(&self, company_id: i64, user_id: i64) -> Result<(), ClientError> {
        require_company_id(company_id)?;
        info!("Deleting user {user_id} from company {company_id}");

        let request =
            ApiRequest::delete(format!("/users/{user_id}")).with_query("companyId", company_id);

        self.client
            .request_empty(request)
            .await
            .inspect_err(|err| error!("Failed to delete user {user_id}: {err}"))?;

        info!("User {user_id} deleted");
        Ok(())
    }
}
