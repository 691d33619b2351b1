use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::{dev::Server, middleware::Logger, web, App, HttpResponse, HttpServer};
use anyhow::Context;
use prometheus::{Registry, TextEncoder};

use crate::health::{Checks, HealthChecks};
use crate::logging::init_logging;

const ENDPOINTS: [&str; 4] = ["/health/live", "/health/ready", "/health/startup", "/metrics"];

/// Health and metrics endpoint, separate from the application.
#[derive(Clone, Debug, clap::Args)]
#[command(rename_all_env = "SCREAMING_SNAKE_CASE", next_help_heading = "Infrastructure")]
pub struct InfrastructureConfig {
    /// Serve health checks and metrics
    #[arg(long, env)]
    pub infrastructure_enabled: bool,
    /// Address of the health and metrics endpoint
    #[arg(long, env, default_value = "[::1]:9010")]
    pub infrastructure_bind: SocketAddr,
    /// Worker threads of the health and metrics endpoint
    #[arg(long, env, default_value_t = 1)]
    pub infrastructure_workers: usize,
}

impl Default for InfrastructureConfig {
    fn default() -> Self {
        Self {
            infrastructure_enabled: false,
            infrastructure_bind: SocketAddr::from(([0, 0, 0, 0, 0, 0, 0, 1], 9010)),
            infrastructure_workers: 1,
        }
    }
}

/// What the application gets to register its checks and metrics with.
#[derive(Clone)]
pub struct InitContext {
    pub metrics: Arc<Metrics>,
    pub health: Arc<HealthChecks>,
}

/// Process wide metrics.
#[derive(Default)]
pub struct Metrics {
    registry: Registry,
}

impl Metrics {
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

#[derive(Default)]
pub struct Infrastructure {
    config: InfrastructureConfig,
    metrics: Arc<Metrics>,
    health: Arc<HealthChecks>,
}

impl From<InfrastructureConfig> for Infrastructure {
    fn from(config: InfrastructureConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }
}

impl Infrastructure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the application next to the infrastructure endpoint.
    ///
    /// Returns as soon as the application ends, the endpoint fails, or the process is asked to
    /// terminate.
    pub async fn run<F, Fut>(self, id: &str, main: F) -> anyhow::Result<()>
    where
        F: FnOnce(InitContext) -> Fut,
        Fut: Future<Output = anyhow::Result<()>> + 'static,
    {
        init_logging(id);

        let endpoint = self.endpoint()?;
        let main = main(InitContext {
            metrics: self.metrics.clone(),
            health: self.health.clone(),
        });

        let endpoint = async move {
            match endpoint {
                Some(server) => server.await.context("Failed to run infrastructure endpoint"),
                None => futures::future::pending().await,
            }
        };

        tokio::select! {
            result = main => result,
            result = endpoint => result,
            result = shutdown_signal() => {
                log::info!("Shutting down {id}");
                result
            }
        }
    }

    fn endpoint(&self) -> anyhow::Result<Option<Server>> {
        if !self.config.infrastructure_enabled {
            log::info!("Infrastructure endpoint is disabled");
            return Ok(None);
        }

        let metrics = self.metrics.clone();
        let health = self.health.clone();

        let mut http = HttpServer::new(move || {
            App::new()
                .wrap(Logger::default())
                .configure(|cfg| configure(cfg, metrics.clone(), health.clone()))
        });

        if self.config.infrastructure_workers > 0 {
            http = http.workers(self.config.infrastructure_workers);
        }

        let bind = self.config.infrastructure_bind;
        let http = http
            .bind(bind)
            .with_context(|| format!("Failed to bind infrastructure endpoint: {bind}"))?;

        for (addr, scheme) in http.addrs_with_scheme() {
            log::info!("Infrastructure endpoint: {scheme}://{addr}");
        }

        Ok(Some(http.run()))
    }
}

fn configure(cfg: &mut web::ServiceConfig, metrics: Arc<Metrics>, health: Arc<HealthChecks>) {
    cfg.app_data(web::Data::from(metrics))
        .app_data(web::Data::from(health))
        .route("/", web::get().to(index))
        .route("/health/live", web::get().to(liveness))
        .route("/health/ready", web::get().to(readiness))
        .route("/health/startup", web::get().to(startup))
        .route("/metrics", web::get().to(render_metrics));
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().json(ENDPOINTS)
}

async fn check(checks: &Checks) -> HttpResponse {
    let result = checks.run().await;
    let mut response = match result.is_up() {
        true => HttpResponse::Ok(),
        false => HttpResponse::ServiceUnavailable(),
    };
    response.json(result.results)
}

async fn liveness(health: web::Data<HealthChecks>) -> HttpResponse {
    check(&health.liveness).await
}

async fn readiness(health: web::Data<HealthChecks>) -> HttpResponse {
    check(&health.readiness).await
}

async fn startup(health: web::Data<HealthChecks>) -> HttpResponse {
    check(&health.startup).await
}

async fn render_metrics(metrics: web::Data<Metrics>) -> HttpResponse {
    match TextEncoder::new().encode_to_string(&metrics.registry().gather()) {
        Ok(text) => HttpResponse::Ok().content_type("text/plain; version=0.0.4").body(text),
        Err(err) => {
            log::warn!("Failed to encode metrics: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Resolves once the process gets interrupted or terminated.
#[cfg(unix)]
async fn shutdown_signal() -> anyhow::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate()).context("Failed to listen for SIGTERM")?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result.context("Failed to listen for SIGINT"),
        _ = terminate.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> anyhow::Result<()> {
    tokio::signal::ctrl_c().await.context("Failed to listen for Ctrl-C")
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::health::{from_fn, Probe};
    use actix_web::{http::StatusCode, test};
    use prometheus::IntCounter;

    #[actix_web::test]
    async fn endpoints() {
        let metrics = Arc::new(Metrics::default());
        let health = Arc::new(HealthChecks::default());

        let counter = IntCounter::new("things_total", "Things").unwrap();
        metrics.registry().register(Box::new(counter.clone())).unwrap();
        counter.inc_by(3);

        let (probe, started) = Probe::new("starting");
        health.startup.register("started", started).await;
        health.liveness.register("alive", from_fn(|| Ok(()))).await;

        let app = test::init_service(App::new().configure(|cfg| configure(cfg, metrics.clone(), health.clone()))).await;
        let get = |uri: &str| test::TestRequest::get().uri(uri).to_request();

        let list: Vec<String> = test::call_and_read_body_json(&app, get("/")).await;
        assert_eq!(list, ENDPOINTS);

        let response = test::call_service(&app, get("/health/live")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = test::call_service(&app, get("/health/startup")).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        probe.set(true);
        let response = test::call_service(&app, get("/health/startup")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = test::call_and_read_body(&app, get("/metrics")).await;
        let body = String::from_utf8_lossy(&body);
        assert!(body.contains("things_total 3"), "{body}");
    }

    #[tokio::test]
    async fn main_ends_run() {
        let result = Infrastructure::new().run("test", |_| async { Ok(()) }).await;
        assert!(result.is_ok());

        let result = Infrastructure::new()
            .run("test", |_| async { Err(anyhow::anyhow!("failed")) })
            .await;
        assert_eq!(result.unwrap_err().to_string(), "failed");
    }
}
