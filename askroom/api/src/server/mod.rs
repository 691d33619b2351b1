use std::sync::Arc;

use actix_web::{error::UrlencodedError, web, HttpResponse};
use askroom_model::prelude::*;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;
use crate::Error;

pub mod question;
pub mod room;
pub mod spa;
pub mod version;

#[derive(OpenApi)]
#[openapi(
    paths(
        room::create_room,
        room::list_rooms,
        room::close_room,
        room::register,
        question::publish_question,
        question::get_questions,
        question::vote,
        version::version,
    ),
    components(schemas(
        Status,
        CreatedRoom,
        Registered,
        Published,
        QuestionList,
        Question,
        Voted,
        RoomList,
        RoomName,
        CreateRoomForm,
        UserForm,
        QuestionForm,
        VoteForm,
        version::VersionInformation,
    )),
    tags(
        (name = "room", description = "Rooms and their users"),
        (name = "question", description = "Questions and votes"),
    )
)]
pub struct ApiDoc;

pub fn config(cfg: &mut web::ServiceConfig, spa: Arc<spa::Spa>) {
    cfg.service(
        web::scope("/api/v1")
            .service(room::create_room)
            .service(room::list_rooms)
            .service(room::close_room)
            .service(room::register)
            .service(question::publish_question)
            .service(question::get_questions)
            .service(question::vote)
            .default_service(web::to(not_found)),
    )
    .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/openapi.json", ApiDoc::openapi()));

    version::config(cfg, version::VersionInformation::current());
    // must be last, it answers all remaining paths
    spa::config(cfg, spa);
}

async fn not_found() -> Result<HttpResponse, Error> {
    Err(Error::NotFound)
}

/// Form values of a request, taken from the body first, then from the query.
///
/// A body that isn't URL-encoded is ignored. Any other problem with the body fails the request.
pub(crate) fn form_values<T>(
    form: Result<web::Form<T>, actix_web::Error>,
    query: Option<web::Query<T>>,
) -> Result<T, Error>
where
    T: Merge + Default,
{
    let form = match form {
        Ok(form) => form.into_inner(),
        Err(err) => match err.as_error::<UrlencodedError>() {
            Some(UrlencodedError::ContentType) => T::default(),
            Some(UrlencodedError::Overflow { .. }) => return Err(Error::PayloadTooLarge),
            _ => return Err(Error::InvalidPayload(err.to_string())),
        },
    };
    let query = query.map(web::Query::into_inner).unwrap_or_default();
    Ok(form.merge(query))
}

pub(crate) type State = web::Data<AppState>;
