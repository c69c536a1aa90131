use async_trait::async_trait;
use shared::{
    domain::{
        requests::{CreateCompanyRequest, UpdateCompanyRequest},
        responses::CompanyResponse,
    },
    errors::ClientError,
};
use std::sync::Arc;

pub type DynCompanyService = Arc<dyn CompanyServiceTrait + Send + Sync>;

#[async_trait]
pub trait CompanyServiceTrait {
    async fn list(&self) -> Result<Vec<CompanyResponse>, ClientError>;
    async fn find_by_id(&self, id: i64) -> Result<CompanyResponse, ClientError>;
    async fn create(&self, input: &CreateCompanyRequest) -> Result<CompanyResponse, ClientError>;
    async fn update(
        &self,
        id: i64,
        input: &UpdateCompanyRequest,
    ) -> Result<CompanyResponse, ClientError>;
    async fn delete(&self, id: i64) -> Result<(), ClientError>;
}
