use actix_web::{get, post, web, HttpResponse};
use askroom_model::prelude::*;

use super::{form_values, State};
use crate::Error;

/// Publish a question to a room.
#[utoipa::path(
    post,
    tag = "question",
    path = "/api/v1/publishQuestion/{roomName}",
    request_body(content = QuestionForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Question published", body = Published),
        (status = BAD_REQUEST, description = "Room does not exist, or the question is too short", body = Status),
        (status = UNAUTHORIZED, description = "User is not registered with the room", body = Status),
        (status = FORBIDDEN, description = "The room has been closed", body = Status),
    ),
    params(
        ("roomName" = String, Path, description = "Name of the room"),
    )
)]
#[post("/publishQuestion/{roomName}")]
pub async fn publish_question(
    state: State,
    room_name: web::Path<String>,
    form: Result<web::Form<QuestionForm>, actix_web::Error>,
    query: Option<web::Query<QuestionForm>>,
) -> Result<HttpResponse, Error> {
    let values = form_values(form, query)?;
    let id = state.rooms.lock().publish_question(
        &room_name,
        values.user_id.as_deref().unwrap_or_default(),
        values.question.as_deref().unwrap_or_default(),
    )?;

    state.metrics.questions_published.inc();

    Ok(HttpResponse::Ok().json(Published {
        status: STATUS_OK.into(),
        id,
    }))
}

/// Get all questions of a room, ordered by id.
#[utoipa::path(
    get,
    tag = "question",
    path = "/api/v1/getQuestions/{roomName}",
    responses(
        (status = 200, description = "Questions of the room", body = QuestionList),
        (status = BAD_REQUEST, description = "Room does not exist", body = Status),
    ),
    params(
        ("roomName" = String, Path, description = "Name of the room"),
    )
)]
#[get("/getQuestions/{roomName}")]
pub async fn get_questions(state: State, room_name: web::Path<String>) -> Result<HttpResponse, Error> {
    let questions = state.rooms.lock().questions(&room_name)?;
    Ok(HttpResponse::Ok().json(questions))
}

/// Vote on a question, replacing an earlier vote of the same user.
#[utoipa::path(
    post,
    tag = "question",
    path = "/api/v1/vote/{roomName}",
    request_body(content = VoteForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Vote recorded", body = Voted),
        (status = BAD_REQUEST, description = "Room or question does not exist, or the vote is invalid", body = Status),
        (status = UNAUTHORIZED, description = "User is not registered with the room", body = Status),
    ),
    params(
        ("roomName" = String, Path, description = "Name of the room"),
    )
)]
#[post("/vote/{roomName}")]
pub async fn vote(
    state: State,
    room_name: web::Path<String>,
    form: Result<web::Form<VoteForm>, actix_web::Error>,
    query: Option<web::Query<VoteForm>>,
) -> Result<HttpResponse, Error> {
    let values = form_values(form, query)?;
    let new_count = state.rooms.lock().vote(
        &room_name,
        values.user_id.as_deref().unwrap_or_default(),
        values.question_id.as_deref().unwrap_or_default(),
        values.value.as_deref().unwrap_or_default(),
    )?;

    state.metrics.votes_cast.inc();

    Ok(HttpResponse::Ok().json(Voted {
        status: STATUS_OK.into(),
        new_count,
    }))
}
