use crate::{
    abstract_trait::AuthServiceTrait,
    client::ApiClient,
    session::{AuthEvent, Tokens},
    transport::ApiRequest,
};
use async_trait::async_trait;
use shared::{
    domain::{
        requests::{LoginRequest, RegisterRequest},
        responses::TokenResponse,
    },
    errors::ClientError,
};
use std::sync::Arc;
use tracing::{error, info};
use validator::Validate;

#[derive(Debug, Clone)]
pub struct AuthService {
    client: Arc<ApiClient>,
}

impl AuthService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthServiceTrait for AuthService {
    async fn login(&self, input: &LoginRequest) -> Result<TokenResponse, ClientError> {
        info!("Logging in user: {}", input.username);
        input.validate()?;

        let request = ApiRequest::post("/auth/login").with_json(input)?;

        let tokens: TokenResponse = match self.client.request_public(request).await {
            Ok(response) => response.json()?,
            Err(err) => {
                error!("Login failed for {}: {err}", input.username);
                return Err(err);
            }
        };

        let session = self.client.session();
        session.set_tokens(Tokens::from(&tokens)).await?;
        session.emit(AuthEvent::SignedIn);

        info!("User {} logged in successfully", input.username);
        Ok(tokens)
    }

    async fn register(&self, input: &RegisterRequest) -> Result<(), ClientError> {
        info!("Registering user: {}", input.username);
        input.validate()?;

        // `confirm_password` is never serialized.
        let request = ApiRequest::post("/auth/register").with_json(input)?;

        match self.client.request_public(request).await {
            Ok(_) => {
                info!("User {} registered successfully", input.username);
                Ok(())
            }
            Err(err) => {
                error!("Registration failed for {}: {err}", input.username);
                Err(err)
            }
        }
    }

    async fn logout(&self) -> Result<(), ClientError> {
        let session = self.client.session();
        session.clear().await?;
        session.emit(AuthEvent::SignedOut);

        info!("Signed out");
        Ok(())
    }

    async fn is_authenticated(&self) -> bool {
        self.client.session().is_authenticated().await
    }
}
