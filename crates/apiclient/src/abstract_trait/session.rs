use crate::session::Tokens;
use async_trait::async_trait;
use shared::errors::ClientError;
use std::sync::Arc;

pub type DynSessionStore = Arc<dyn SessionStoreTrait + Send + Sync>;

#[async_trait]
pub trait SessionStoreTrait {
    async fn load(&self) -> Result<Tokens, ClientError>;
    async fn save(&self, tokens: &Tokens) -> Result<(), ClientError>;
    async fn clear(&self) -> Result<(), ClientError>;
}
