use std::net::{IpAddr, SocketAddr, TcpListener};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use askroom_infrastructure::app::http::{HttpServerBuilder, HttpServerConfig};
use askroom_infrastructure::health::Probe;
use askroom_infrastructure::{Infrastructure, InfrastructureConfig};

mod error;
mod room;
mod server;
mod state;

pub use error::Error;
pub use room::Rooms;
pub use server::ApiDoc;
pub use state::AppState;

#[derive(clap::Args, Debug)]
#[command(about = "Run the api server", args_conflicts_with_subcommands = true)]
pub struct Run {
    #[arg(short, long, env = "BIND", default_value = "0.0.0.0")]
    pub bind: IpAddr,

    #[arg(short = 'p', long = "port", env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Directory of the built web client, containing `index.html` and `static/`
    #[arg(long = "dist", env = "DIST_PATH", default_value = "./public/dist")]
    pub dist: PathBuf,

    #[command(flatten)]
    pub http: HttpServerConfig,

    #[command(flatten)]
    pub infra: InfrastructureConfig,
}

impl Run {
    /// Run the server. A provided listener takes precedence over the bind address and port.
    pub async fn run(self, listener: Option<TcpListener>) -> anyhow::Result<ExitCode> {
        let Run {
            bind,
            port,
            dist,
            http,
            infra,
        } = self;

        Infrastructure::from(infra)
            .run("askroom-api", |context| async move {
                let state = Arc::new(AppState::new(context.metrics.registry()).context("register metrics")?);
                let spa = Arc::new(server::spa::Spa::new(dist));

                if !spa.entry().is_file() {
                    log::warn!("Entry document not found: {}", spa.entry().display());
                }

                let (started, check) = Probe::new("Not started yet");
                context.health.startup.register("started", check).await;
                context.health.readiness.register("entry", spa.check()).await;

                let mut server = HttpServerBuilder::new(http)
                    .metrics(context.metrics.registry(), "askroom_api")?
                    .configure(move |cfg| {
                        cfg.app_data(actix_web::web::Data::from(state.clone()));
                        server::config(cfg, spa.clone());
                    });

                server = match listener {
                    Some(listener) => server.listen(listener),
                    None => server.bind(SocketAddr::new(bind, port)),
                };

                let server = server.start()?;
                started.set(true);
                server.await.context("run HTTP server")
            })
            .await?;

        Ok(ExitCode::SUCCESS)
    }
}
