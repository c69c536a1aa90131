use async_trait::async_trait;
use shared::{
    domain::{
        requests::{LoginRequest, RegisterRequest},
        responses::TokenResponse,
    },
    errors::ClientError,
};
use std::sync::Arc;

pub type DynAuthService = Arc<dyn AuthServiceTrait + Send + Sync>;

#[async_trait]
pub trait AuthServiceTrait {
    async fn login(&self, input: &LoginRequest) -> Result<TokenResponse, ClientError>;
    async fn register(&self, input: &RegisterRequest) -> Result<(), ClientError>;
    async fn logout(&self) -> Result<(), ClientError>;
    async fn is_authenticated(&self) -> bool;
}
