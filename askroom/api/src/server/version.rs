use actix_web::{get, web, HttpResponse};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct VersionInformation {
    pub name: String,
    pub version: String,
    pub description: String,
}

impl VersionInformation {
    /// The information of this build.
    pub fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").into(),
            version: env!("CARGO_PKG_VERSION").into(),
            description: env!("CARGO_PKG_DESCRIPTION").into(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/.well-known/askroom/version",
    responses(
        (status = 200, description = "Get version information", body = VersionInformation),
    ),
)]
#[get("/.well-known/askroom/version")]
pub async fn version(version: web::Data<VersionInformation>) -> HttpResponse {
    HttpResponse::Ok().json(version)
}

pub fn config(cfg: &mut web::ServiceConfig, version_information: VersionInformation) {
    cfg.app_data(web::Data::new(version_information)).service(version);
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn current() {
        let app = test::init_service(App::new().configure(|cfg| config(cfg, VersionInformation::current()))).await;

        let request = test::TestRequest::get().uri("/.well-known/askroom/version").to_request();
        let info: VersionInformation = test::call_and_read_body_json(&app, request).await;
        assert_eq!(info.name, "askroom-api");
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
    }
}
