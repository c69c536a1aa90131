use async_trait::async_trait;
use shared::{
    domain::{
        requests::{RegisterCompanyUserRequest, SearchUsersRequest, UpdateUserRequest},
        responses::UserResponse,
    },
    errors::ClientError,
};
use std::sync::Arc;

pub type DynUserService = Arc<dyn UserServiceTrait + Send + Sync>;

#[async_trait]
pub trait UserServiceTrait {
    async fn list_users(&self, company_id: i64) -> Result<Vec<UserResponse>, ClientError>;
    async fn search_users(
        &self,
        input: &SearchUsersRequest,
    ) -> Result<Vec<UserResponse>, ClientError>;
    async fn register_user(
        &self,
        company_id: i64,
        input: &RegisterCompanyUserRequest,
    ) -> Result<UserResponse, ClientError>;
    async fn update_user(
        &self,
        company_id: i64,
        user_id: i64,
        input: &UpdateUserRequest,
    ) -> Result<UserResponse, ClientError>;
    async fn delete_user(&self, company_id: i64, user_id: i64) -> Result<(), ClientError>;
}
