use crate::{abstract_trait::CompanyServiceTrait, client::ApiClient, transport::ApiRequest};
use async_trait::async_trait;
use shared::{
    domain::{
        requests::{CreateCompanyRequest, UpdateCompanyRequest},
        responses::CompanyResponse,
    },
    errors::ClientError,
};
use std::sync::Arc;
use tracing::{error, info};
use validator::Validate;

#[derive(Debug, Clone)]
pub struct CompanyService {
    client: Arc<ApiClient>,
}

impl CompanyService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CompanyServiceTrait for CompanyService {
    async fn list(&self) -> Result<Vec<CompanyResponse>, ClientError> {
        info!("Fetching companies");

        let companies = self
            .client
            .request_list(ApiRequest::get("/companies"))
            .await
            .inspect_err(|err| error!("Failed to fetch companies: {err}"))?;

        info!("Fetched {} companies", companies.len());
        Ok(companies)
    }

    async fn find_by_id(&self, id: i64) -> Result<CompanyResponse, ClientError> {
        info!("Fetching company {id}");

        self.client
            .request_json(ApiRequest::get(format!("/companies/{id}")))
            .await
            .inspect_err(|err| error!("Failed to fetch company {id}: {err}"))
    }

    async fn create(&self, input: &CreateCompanyRequest) -> Result<CompanyResponse, ClientError> {
        info!("Creating company: {}", input.name);
        input.validate()?;

        let request = ApiRequest::post("/companies").with_json(input)?;
        let company: CompanyResponse = self
            .client
            .request_json(request)
            .await
            .inspect_err(|err| error!("Failed to create company {}: {err}", input.name))?;

        info!("Company {} created with id {}", company.name, company.id);
        Ok(company)
    }

    async fn update(
        &self,
        id: i64,
        input: &UpdateCompanyRequest,
    ) -> Result<CompanyResponse, ClientError> {
        info!("Updating company {id}");
        input.validate()?;

        let request = ApiRequest::put(format!("/companies/{id}")).with_json(input)?;
        let company = self
            .client
            .request_json(request)
            .await
            .inspect_err(|err| error!("Failed to update company {id}: {err}"))?;

        info!("Company {id} updated");
        Ok(company)
    }

    async fn delete(&self, id: i64) -> Result<(), ClientError> {
        info!("Deleting company {id}");

        self.client
            .request_empty(ApiRequest::delete(format!("/companies/{id}")))
            .await
            .inspect_err(|err| error!("Failed to delete company {id}: {err}"))?;

        info!("Company {id} deleted");
        Ok(())
    }
}
