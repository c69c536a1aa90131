use crate::{
    abstract_trait::{DynHttpTransport, DynSessionStore},
    client::ApiClient,
    di::DependenciesInject,
    session::{FileSessionStore, Session},
    transport::ReqwestTransport,
};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::{
    config::ClientConfig,
    utils::{Metrics, encode_registry},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub config: ClientConfig,
    pub session: Arc<Session>,
    pub client: Arc<ApiClient>,
    pub di_container: DependenciesInject,
    pub registry: Arc<Mutex<Registry>>,
    pub metrics: Metrics,
}

impl AppState {
    pub async fn new(config: &ClientConfig) -> Result<Self> {
        info!("Using backend at {}", config.base_url);

        let transport = ReqwestTransport::from_config(config)
            .context("Failed to build HTTP transport")?;
        let store = FileSessionStore::new(&config.session_file);

        Ok(Self::from_parts(config.clone(), Arc::new(transport), Arc::new(store)).await)
    }

    pub async fn from_parts(
        config: ClientConfig,
        transport: DynHttpTransport,
        store: DynSessionStore,
    ) -> Self {
        let registry = Arc::new(Mutex::new(Registry::default()));
        let metrics = Metrics::new();
        metrics.register(&mut *registry.lock().await);

        let session = Arc::new(Session::restore(store).await);
        let client = Arc::new(ApiClient::new(transport, session.clone(), metrics.clone()));
        let di_container = DependenciesInject::new(client.clone());

        Self {
            config,
            session,
            client,
            di_container,
            registry,
            metrics,
        }
    }

    pub async fn encode_metrics(&self) -> Result<String> {
        let registry = self.registry.lock().await;
        encode_registry(&registry).context("Failed to encode metrics")
    }
}
