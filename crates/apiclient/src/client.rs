use crate::abstract_trait::DynHttpTransport;
use crate::session::{AuthEvent, LoginRequiredReason, Session, Tokens};
use crate::transport::{ApiRequest, ApiResponse};
use http::StatusCode;
use serde::de::DeserializeOwned;
use shared::{
    domain::{requests::RefreshTokenRequest, responses::TokenResponse},
    errors::{ClientError, HttpError},
    utils::{Method, Metrics, RefreshOutcome, Status},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

pub const REFRESH_PATH: &str = "/auth/refresh";

/// HTTP client that attaches the session's bearer token and recovers from
/// an expired access token by refreshing once and replaying the request.
#[derive(Clone)]
pub struct ApiClient {
    transport: DynHttpTransport,
    session: Arc<Session>,
    metrics: Metrics,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(transport: DynHttpTransport, session: Arc<Session>, metrics: Metrics) -> Self {
        Self {
            transport,
            session,
            metrics,
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub async fn request(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let sent_token = self.session.access_token().await;
        let response = self
            .dispatch(request.clone().with_bearer(sent_token.as_deref())?)
            .await?;

        if response.status != StatusCode::UNAUTHORIZED {
            return Self::accept(response);
        }

        if request.is_replay() {
            warn!(
                "{} {} was rejected on replay",
                request.method, request.path
            );
            return Err(ClientError::AuthenticationRequired(
                "request was rejected after a token refresh".to_string(),
            ));
        }

        info!(
            "{} {} answered 401, refreshing access token",
            request.method, request.path
        );
        let fresh_token = self.refresh_after(sent_token.as_deref()).await?;

        let replay = request.as_replay().with_bearer(Some(&fresh_token))?;
        let response = self.dispatch(replay).await?;

        if response.status == StatusCode::UNAUTHORIZED {
            warn!("Replayed request was rejected with a fresh access token");
            return Err(ClientError::AuthenticationRequired(
                "request was rejected after a token refresh".to_string(),
            ));
        }

        Self::accept(response)
    }

    /// Sends without a bearer token and without refresh handling.
    pub async fn request_public(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let response = self.dispatch(request.with_bearer(None)?).await?;
        Self::accept(response)
    }

    pub async fn request_json<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, ClientError> {
        self.request(request).await?.json()
    }

    /// Decodes a JSON array; `null` or an empty body reads as no items.
    pub async fn request_list<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<Vec<T>, ClientError> {
        let response = self.request(request).await?;
        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        Ok(response.json::<Option<Vec<T>>>()?.unwrap_or_default())
    }

    pub async fn request_empty(&self, request: ApiRequest) -> Result<(), ClientError> {
        self.request(request).await.map(|_| ())
    }

    async fn dispatch(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let method = Method::from(&request.method);
        debug!(
            method = %request.method,
            path = %request.path,
            attempt = ?request.attempt,
            "Sending request"
        );

        let start = Instant::now();
        let result = self.transport.send(request).await;
        let elapsed = start.elapsed().as_secs_f64();

        match &result {
            Ok(response) => self
                .metrics
                .record(method, Status::from(response.status), elapsed),
            Err(err) => {
                error!("Request failed before a response arrived: {err}");
                self.metrics.record(method, Status::Error, elapsed);
            }
        }

        result
    }

    fn accept(response: ApiResponse) -> Result<ApiResponse, ClientError> {
        if response.is_success() {
            Ok(response)
        } else {
            Err(HttpError::from_response(response.status, &response.body).into())
        }
    }

    /// Returns an access token newer than `stale`, exchanging the refresh
    /// token only if no concurrent caller already did.
    async fn refresh_after(&self, stale: Option<&str>) -> Result<String, ClientError> {
        // Held until the new pair is installed; logins and logouts queue
        // behind it.
        let writer = self.session.lock_writes().await;
        let current = writer.tokens().await;

        if current.has_access_token() && Some(current.access_token.as_str()) != stale {
            debug!("Access token already refreshed by a concurrent request");
            self.metrics.record_refresh(RefreshOutcome::Reused);
            return Ok(current.access_token);
        }

        if !current.has_refresh_token() {
            self.metrics.record_refresh(RefreshOutcome::Missing);

            // A token was sent but the session is now empty: someone else
            // already cleared it and notified subscribers.
            let already_cleared = current.is_empty() && stale.is_some();
            if !already_cleared {
                warn!("No refresh token available, login required");
                writer
                    .expire(LoginRequiredReason::MissingRefreshToken)
                    .await;
            }
            return Err(ClientError::AuthenticationRequired(
                LoginRequiredReason::MissingRefreshToken.to_string(),
            ));
        }

        match self.exchange_refresh_token(&current.refresh_token).await {
            Ok(tokens) => {
                let access_token = tokens.access_token.clone();
                if let Err(err) = writer.set_tokens(Tokens::from(tokens)).await {
                    warn!("Refreshed tokens could not be persisted: {err}");
                }
                self.metrics.record_refresh(RefreshOutcome::Success);
                self.session.emit(AuthEvent::TokensRefreshed);
                info!("Access token refreshed");
                Ok(access_token)
            }
            Err(err) => {
                error!("Token refresh failed: {err}");
                self.metrics.record_refresh(RefreshOutcome::Failure);
                writer.expire(LoginRequiredReason::RefreshRejected).await;
                Err(ClientError::AuthenticationRequired(format!(
                    "{}: {err}",
                    LoginRequiredReason::RefreshRejected
                )))
            }
        }
    }

    async fn exchange_refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<TokenResponse, ClientError> {
        let body = RefreshTokenRequest {
            refresh_token: refresh_token.to_string(),
        };
        let response = self
            .request_public(ApiRequest::post(REFRESH_PATH).with_json(&body)?)
            .await?;

        let tokens: TokenResponse = response.json()?;
        if tokens.access_token.is_empty() {
            return Err(ClientError::InvalidResponse(
                "refresh response did not include an access token".to_string(),
            ));
        }
        Ok(tokens)
    }
}
