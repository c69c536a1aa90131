use crate::transport::{ApiRequest, ApiResponse};
use async_trait::async_trait;
use shared::errors::ClientError;
use std::sync::Arc;

pub type DynHttpTransport = Arc<dyn HttpTransportTrait + Send + Sync>;

/// Sends one request and returns whatever the server answered.
///
/// Implementations must not interpret status codes; a 401 is a successful
/// exchange at this layer. Only network-level failures are errors.
#[async_trait]
pub trait HttpTransportTrait {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError>;
}
