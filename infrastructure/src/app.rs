pub mod http;

use actix_cors::Cors;
use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::{Compress, Logger},
    App, Error,
};
use actix_web_extras::middleware::Condition;
use actix_web_prom::PrometheusMetrics;

/// Optional middleware of an application.
#[derive(Default)]
pub struct AppOptions {
    pub cors: Option<Cors>,
    pub metrics: Option<PrometheusMetrics>,
    pub compress: bool,
}

/// Create an application with the common middleware stack.
///
/// Middleware wrapped last runs first. A request gets logged, then measured, then passes CORS
/// handling, and finally the response gets compressed.
pub fn new_app(
    options: AppOptions,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(Condition::from_option(options.compress.then(Compress::default)))
        // may answer preflight requests on its own
        .wrap(Condition::from_option(options.cors))
        .wrap(Condition::from_option(options.metrics))
        .wrap(Logger::default())
}
