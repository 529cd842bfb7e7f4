use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use kairos_core::cluster::{CoordinationStore, Membership};
use kairos_core::config::KairosConfig;
use kairos_core::error::{KairosError, Result};
use kairos_core::job::JobStore;
use kairos_runtime::dashboard::{create_dashboard_router, DashboardState};
use kairos_runtime::{AgentContext, EtcdClient};

/// The dashboard runtime.
pub struct Kairos {
    config: KairosConfig,
    context: AgentContext,
    shutdown_tx: broadcast::Sender<()>,
}

impl Kairos {
    /// Create a new builder for configuring KAIROS.
    pub fn builder() -> KairosBuilder {
        KairosBuilder::new()
    }

    /// Get the configuration.
    pub fn config(&self) -> &KairosConfig {
        &self.config
    }

    /// Get the context shared with dashboard requests.
    pub fn context(&self) -> &AgentContext {
        &self.context
    }

    /// The dashboard router, mounted under the configured path prefix.
    pub fn router(&self) -> Router {
        let dashboard = create_dashboard_router(DashboardState::new(self.context.clone()));
        let router = if self.context.path_prefix.is_empty() {
            dashboard
        } else {
            Router::new().nest(&self.context.path_prefix, dashboard)
        };
        router.layer(TraceLayer::new_for_http())
    }

    /// Serve the dashboard until Ctrl-C or [`Kairos::shutdown`].
    pub async fn run(self) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.dashboard.host, self.config.dashboard.port)
            .parse()
            .map_err(|e| KairosError::Config(format!("Invalid listen address: {}", e)))?;

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!(
            %addr,
            prefix = %self.context.path_prefix,
            member = %self.context.member_name,
            "Dashboard listening"
        );

        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let shutdown = async move {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Received shutdown signal");
                }
                _ = shutdown_rx.recv() => {
                    tracing::info!("Received shutdown notification");
                }
            }
        };

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Dashboard stopped");
        Ok(())
    }

    /// Request shutdown.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }
}

/// Builder for [`Kairos`].
///
/// Collaborators left unset are served by an [`EtcdClient`] built from the
/// store configuration.
pub struct KairosBuilder {
    config: Option<KairosConfig>,
    version: String,
    membership: Option<Arc<dyn Membership>>,
    coordination: Option<Arc<dyn CoordinationStore>>,
    jobs: Option<Arc<dyn JobStore>>,
}

impl KairosBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: None,
            version: env!("CARGO_PKG_VERSION").to_string(),
            membership: None,
            coordination: None,
            jobs: None,
        }
    }

    /// Set the configuration.
    pub fn config(mut self, config: KairosConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Override the reported agent version.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn membership(mut self, membership: Arc<dyn Membership>) -> Self {
        self.membership = Some(membership);
        self
    }

    pub fn coordination(mut self, store: Arc<dyn CoordinationStore>) -> Self {
        self.coordination = Some(store);
        self
    }

    pub fn jobs(mut self, store: Arc<dyn JobStore>) -> Self {
        self.jobs = Some(store);
        self
    }

    /// Build the runtime.
    pub fn build(self) -> Result<Kairos> {
        let config = self
            .config
            .ok_or_else(|| KairosError::Config("Configuration is required".into()))?;
        config.validate()?;

        let mut etcd: Option<Arc<EtcdClient>> = None;
        let mut store_client = || -> Result<Arc<EtcdClient>> {
            if let Some(client) = &etcd {
                return Ok(client.clone());
            }
            let client = Arc::new(EtcdClient::new(&config.store)?);
            etcd = Some(client.clone());
            Ok(client)
        };

        let membership: Arc<dyn Membership> = match self.membership {
            Some(membership) => membership,
            None => store_client()? as Arc<dyn Membership>,
        };
        let coordination: Arc<dyn CoordinationStore> = match self.coordination {
            Some(store) => store,
            None => store_client()? as Arc<dyn CoordinationStore>,
        };
        let jobs: Arc<dyn JobStore> = match self.jobs {
            Some(store) => store,
            None => store_client()? as Arc<dyn JobStore>,
        };

        let member_name = member_name(&config);
        let context = AgentContext::new(self.version, member_name, membership, coordination, jobs)
            .with_path_prefix(config.dashboard.path_prefix.clone());

        let (shutdown_tx, _) = broadcast::channel(1);

        Ok(Kairos {
            config,
            context,
            shutdown_tx,
        })
    }
}

impl Default for KairosBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Configured member name, else the host name.
fn member_name(config: &KairosConfig) -> String {
    if let Some(name) = config.node.name.as_ref().filter(|n| !n.is_empty()) {
        return name.clone();
    }

    hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "kairos".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use kairos_core::job::Job;
    use kairos_runtime::testing::{MockCoordinationStore, MockJobStore, MockMembership};
    use tower::ServiceExt;

    fn mocked(config: KairosConfig) -> KairosBuilder {
        Kairos::builder()
            .config(config)
            .version("9.9.9")
            .membership(Arc::new(MockMembership::with_leader("node-a")))
            .coordination(Arc::new(MockCoordinationStore::new()))
            .jobs(Arc::new(
                MockJobStore::new().with_jobs(vec![Job::new("backup", "@daily")]),
            ))
    }

    fn named(name: &str) -> KairosConfig {
        let mut config = KairosConfig::default();
        config.node.name = Some(name.to_string());
        config
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[test]
    fn test_build_requires_config() {
        let result = Kairos::builder().build();
        assert!(matches!(result, Err(KairosError::Config(_))));
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let mut config = KairosConfig::default();
        config.dashboard.path_prefix = "dashboard".to_string();
        assert!(mocked(config).build().is_err());
    }

    #[test]
    fn test_build_with_store_client() {
        let kairos = Kairos::builder()
            .config(KairosConfig::default())
            .build()
            .unwrap();
        assert_eq!(kairos.context().path_prefix, "/dashboard");
        assert_eq!(kairos.context().version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_member_name_from_config() {
        let kairos = mocked(named("node-b")).build().unwrap();
        assert_eq!(kairos.context().member_name, "node-b");
        assert_eq!(kairos.context().version, "9.9.9");
    }

    #[test]
    fn test_member_name_falls_back_to_host() {
        let kairos = mocked(named("")).build().unwrap();
        assert!(!kairos.context().member_name.is_empty());
    }

    #[tokio::test]
    async fn test_router_mounted_under_prefix() {
        let kairos = mocked(named("node-b")).build().unwrap();

        let (status, body) = get(kairos.router(), "/dashboard/jobs").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("backup"));
        assert!(body.contains("node-a"));
        assert!(body.contains("href=\"/dashboard/jobs/backup/executions\""));

        let (status, _) = get(kairos.router(), "/jobs").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_custom_prefix() {
        let mut config = named("node-b");
        config.dashboard.path_prefix = "/ui/".to_string();
        let kairos = mocked(config).build().unwrap();
        assert_eq!(kairos.context().path_prefix, "/ui");

        let (status, body) = get(kairos.router(), "/ui").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("href=\"/ui/assets/styles.css\""));
    }

    #[tokio::test]
    async fn test_root_prefix() {
        let mut config = named("node-b");
        config.dashboard.path_prefix = "/".to_string();
        let kairos = mocked(config).build().unwrap();
        assert_eq!(kairos.context().path_prefix, "");

        let (status, _) = get(kairos.router(), "/jobs").await;
        assert_eq!(status, StatusCode::OK);
    }
}
