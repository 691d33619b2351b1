use std::path::PathBuf;
use std::sync::Arc;

use actix_files::{Files, NamedFile};
use actix_web::{
    http::{Method, StatusCode},
    web, HttpRequest, HttpResponse,
};
use askroom_infrastructure::health::{from_fn, FnCheck};
use askroom_navigation::{app_routes, RouteTable, View};

use crate::Error;

const ENTRY: &str = "index.html";
const STATIC: &str = "static";

/// The built web client.
///
/// The client navigates in history mode, so every path it knows must be answered with its entry
/// document.
pub struct Spa {
    dist: PathBuf,
    routes: RouteTable<View>,
}

impl Spa {
    pub fn new(dist: impl Into<PathBuf>) -> Self {
        Self {
            dist: dist.into(),
            routes: app_routes(),
        }
    }

    pub fn entry(&self) -> PathBuf {
        self.dist.join(ENTRY)
    }

    /// A check, reporting down while the entry document is missing.
    pub fn check(&self) -> FnCheck<impl Fn() -> Result<(), String> + Send + Sync> {
        let entry = self.entry();
        from_fn(move || match entry.is_file() {
            true => Ok(()),
            false => Err(format!("Missing entry document: {}", entry.display())),
        })
    }

    /// The status to answer a client path with.
    fn status(&self, path: &str) -> StatusCode {
        match self.routes.resolve(path) {
            Some(m) => {
                log::debug!("{path} -> {}", m.name());
                StatusCode::OK
            }
            None => StatusCode::NOT_FOUND,
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig, spa: Arc<Spa>) {
    cfg.app_data(web::Data::from(spa.clone()))
        .service(Files::new("/static", spa.dist.join(STATIC)))
        .default_service(web::to(index));
}

async fn index(req: HttpRequest, spa: web::Data<Spa>) -> Result<HttpResponse, Error> {
    if !matches!(*req.method(), Method::GET | Method::HEAD) || req.path().starts_with("/api/") {
        return Err(Error::NotFound);
    }

    let status = spa.status(req.path());

    let entry = NamedFile::open_async(spa.entry())
        .await
        .map_err(|err| Error::Internal(format!("Unable to open entry document: {err}")))?;

    let mut response = entry.into_response(&req);
    // conditional requests may have turned this into a "not modified"
    if response.status() == StatusCode::OK {
        *response.status_mut() = status;
    }

    Ok(response)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::server::test::{app, dist};
    use actix_web::test;
    use askroom_infrastructure::health::Check;

    #[actix_web::test]
    async fn client_routes() {
        let dist = dist();
        let app = test::init_service(app(dist.path())).await;

        for (path, expected) in [
            ("/", StatusCode::OK),
            ("/lobby", StatusCode::OK),
            ("/Team-1?tab=open", StatusCode::OK),
            ("/a/b", StatusCode::NOT_FOUND),
            ("//", StatusCode::NOT_FOUND),
            ("/lobby/extra", StatusCode::NOT_FOUND),
        ] {
            let request = test::TestRequest::get().uri(path).to_request();
            let response = test::call_service(&app, request).await;
            assert_eq!(response.status(), expected, "for {path}");

            let body = test::read_body(response).await;
            assert_eq!(body, "<html><body>askroom</body></html>", "for {path}");
        }
    }

    #[actix_web::test]
    async fn static_files() {
        let dist = dist();
        let app = test::init_service(app(dist.path())).await;

        let request = test::TestRequest::get().uri("/static/app.js").to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(test::read_body(response).await, "console.log('askroom');");

        let request = test::TestRequest::get().uri("/static/missing.js").to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn only_get_paths() {
        let dist = dist();
        let app = test::init_service(app(dist.path())).await;

        let request = test::TestRequest::post().uri("/lobby").to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let request = test::TestRequest::get().uri("/api/v2/rooms").to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let status: askroom_model::response::Status = test::read_body_json(response).await;
        assert_eq!(status.status, "Not found");
    }

    #[actix_web::test]
    async fn missing_entry() {
        let dist = tempfile::tempdir().unwrap();
        let spa = Spa::new(dist.path());
        assert!(spa.check().check().await.is_err());

        let app = test::init_service(app(dist.path())).await;
        let request = test::TestRequest::get().uri("/lobby").to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        std::fs::write(dist.path().join(ENTRY), "entry").unwrap();
        assert!(spa.check().check().await.is_ok());
    }
}
