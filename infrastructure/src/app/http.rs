use std::net::{Ipv6Addr, SocketAddr, TcpListener};
use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::{dev::Server, web, HttpServer};
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use anyhow::{anyhow, Context};
use bytesize::ByteSize;
use prometheus::Registry;

use crate::app::{new_app, AppOptions};

/// Settings of an application's HTTP server.
#[derive(Clone, Debug, clap::Args)]
#[command(rename_all_env = "SCREAMING_SNAKE_CASE", next_help_heading = "HTTP server")]
pub struct HttpServerConfig {
    /// Worker threads, zero uses one per core
    #[arg(id = "http-server-workers", long, env = "HTTP_SERVER_WORKERS", default_value_t = 0)]
    pub workers: usize,

    /// Maximum size of a request payload
    #[arg(id = "http-server-request-limit", long, env = "HTTP_SERVER_REQUEST_LIMIT", default_value = "256KiB")]
    pub request_limit: ByteSize,

    /// Maximum size of a URL-encoded form
    #[arg(id = "http-server-form-limit", long, env = "HTTP_SERVER_FORM_LIMIT", default_value = "16KiB")]
    pub form_limit: ByteSize,

    /// Time a client gets to send the request head
    #[arg(id = "http-server-request-timeout", long, env = "HTTP_SERVER_REQUEST_TIMEOUT", default_value = "15s")]
    pub request_timeout: humantime::Duration,

    /// Compress responses
    #[arg(id = "http-server-compress", long, env = "HTTP_SERVER_COMPRESS")]
    pub compress: bool,

    /// Don't send CORS headers
    #[arg(id = "http-server-disable-cors", long, env = "HTTP_SERVER_DISABLE_CORS")]
    pub disable_cors: bool,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            request_limit: ByteSize::kib(256),
            form_limit: ByteSize::kib(16),
            request_timeout: Duration::from_secs(15).into(),
            compress: false,
            disable_cors: false,
        }
    }
}

type Configurator = dyn Fn(&mut web::ServiceConfig) + Send + Sync;

enum Bind {
    Address(SocketAddr),
    Listener(TcpListener),
}

/// Runs an application with the common middleware and limits.
pub struct HttpServerBuilder {
    config: HttpServerConfig,
    bind: Bind,
    configurator: Option<Arc<Configurator>>,
    metrics: Option<PrometheusMetrics>,
}

impl Default for HttpServerBuilder {
    fn default() -> Self {
        Self::new(HttpServerConfig::default())
    }
}

impl HttpServerBuilder {
    pub fn new(config: HttpServerConfig) -> Self {
        Self {
            config,
            bind: Bind::Address(SocketAddr::from((Ipv6Addr::LOCALHOST, 8080))),
            configurator: None,
            metrics: None,
        }
    }

    /// Set up the services of the application. Called once per worker.
    pub fn configure<F>(mut self, configurator: F) -> Self
    where
        F: Fn(&mut web::ServiceConfig) + Send + Sync + 'static,
    {
        self.configurator = Some(Arc::new(configurator));
        self
    }

    /// Record request metrics, prefixed with `namespace`.
    pub fn metrics(mut self, registry: &Registry, namespace: &str) -> anyhow::Result<Self> {
        let metrics = PrometheusMetricsBuilder::new(namespace)
            .registry(registry.clone())
            .build()
            .map_err(|err| anyhow!("Failed to set up request metrics: {err}"))?;
        self.metrics = Some(metrics);
        Ok(self)
    }

    pub fn bind(mut self, addr: impl Into<SocketAddr>) -> Self {
        self.bind = Bind::Address(addr.into());
        self
    }

    /// Use an already bound listener, instead of binding on start.
    pub fn listen(mut self, listener: TcpListener) -> Self {
        self.bind = Bind::Listener(listener);
        self
    }

    /// Bind and start the server. It serves requests once the returned handle gets polled.
    pub fn start(self) -> anyhow::Result<Server> {
        let Self {
            config,
            bind,
            configurator,
            metrics,
        } = self;

        let request_limit = config.request_limit.as_u64() as usize;
        let form_limit = config.form_limit.as_u64() as usize;
        let compress = config.compress;
        let cors = !config.disable_cors;

        let mut http = HttpServer::new(move || {
            let configurator = configurator.clone();
            new_app(AppOptions {
                cors: cors.then(Cors::permissive),
                metrics: metrics.clone(),
                compress,
            })
            .app_data(web::PayloadConfig::new(request_limit))
            .app_data(web::FormConfig::default().limit(form_limit))
            .configure(move |svc| {
                if let Some(configurator) = configurator {
                    configurator(svc);
                }
            })
        })
        .client_request_timeout(config.request_timeout.into());

        if config.workers > 0 {
            http = http.workers(config.workers);
        }

        http = match bind {
            Bind::Address(addr) => http.bind(addr).with_context(|| format!("Failed to bind to {addr}"))?,
            Bind::Listener(listener) => {
                let addr = listener.local_addr()?;
                http.listen(listener)
                    .with_context(|| format!("Failed to listen on {addr}"))?
            }
        };

        for addr in http.addrs() {
            log::info!("Listening on http://{addr}");
        }

        Ok(http.run())
    }

    pub async fn run(self) -> anyhow::Result<()> {
        self.start()?.await.context("Failed to run HTTP server")
    }
}
