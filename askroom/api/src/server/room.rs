use actix_web::{post, route, web, HttpResponse};
use askroom_model::prelude::*;

use super::{form_values, State};
use crate::Error;

/// Create a new room. The caller becomes its owner.
#[utoipa::path(
    post,
    tag = "room",
    path = "/api/v1/createRoom",
    request_body(content = CreateRoomForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Room created", body = CreatedRoom),
        (status = BAD_REQUEST, description = "Invalid room name, or the room already exists", body = Status),
    ),
)]
#[post("/createRoom")]
pub async fn create_room(
    state: State,
    form: Result<web::Form<CreateRoomForm>, actix_web::Error>,
    query: Option<web::Query<CreateRoomForm>>,
) -> Result<HttpResponse, Error> {
    let values = form_values(form, query)?;
    let (_, owner) = state
        .rooms
        .lock()
        .create_room(values.room_name.as_deref().unwrap_or_default())?;

    state.metrics.rooms_created.inc();
    state.metrics.rooms.inc();

    Ok(HttpResponse::Ok().json(CreatedRoom {
        status: STATUS_OK.into(),
        user_id: owner,
    }))
}

/// List the names of all rooms.
#[utoipa::path(
    get,
    tag = "room",
    path = "/api/v1/listRooms",
    responses(
        (status = 200, description = "Names of all rooms, sorted", body = RoomList),
    ),
)]
#[route("/listRooms", method = "GET", method = "POST")]
pub async fn list_rooms(state: State) -> HttpResponse {
    let rooms = state.rooms.lock().list_rooms();
    HttpResponse::Ok().json(RoomList { rooms })
}

/// Close a room, no more questions can be published afterwards.
#[utoipa::path(
    post,
    tag = "room",
    path = "/api/v1/closeRoom/{roomName}",
    request_body(content = UserForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Room closed", body = Status),
        (status = BAD_REQUEST, description = "Room does not exist", body = Status),
        (status = UNAUTHORIZED, description = "Not the owner of the room", body = Status),
    ),
    params(
        ("roomName" = String, Path, description = "Name of the room"),
    )
)]
#[post("/closeRoom/{roomName}")]
pub async fn close_room(
    state: State,
    room_name: web::Path<String>,
    form: Result<web::Form<UserForm>, actix_web::Error>,
    query: Option<web::Query<UserForm>>,
) -> Result<HttpResponse, Error> {
    let values = form_values(form, query)?;
    state
        .rooms
        .lock()
        .close_room(&room_name, values.user_id.as_deref().unwrap_or_default())?;

    Ok(HttpResponse::Ok().json(Status::ok()))
}

/// Register with a room.
///
/// A user id already registered with the room is kept, otherwise a new one is issued.
#[utoipa::path(
    post,
    tag = "room",
    path = "/api/v1/register/{roomName}",
    request_body(content = UserForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "User registered", body = Registered),
        (status = BAD_REQUEST, description = "Room does not exist", body = Status),
    ),
    params(
        ("roomName" = String, Path, description = "Name of the room"),
    )
)]
#[post("/register/{roomName}")]
pub async fn register(
    state: State,
    room_name: web::Path<String>,
    form: Result<web::Form<UserForm>, actix_web::Error>,
    query: Option<web::Query<UserForm>>,
) -> Result<HttpResponse, Error> {
    let values = form_values(form, query)?;
    let id = state.rooms.lock().register(&room_name, values.user_id.as_deref())?;

    Ok(HttpResponse::Ok().json(Registered {
        status: STATUS_OK.into(),
        id,
    }))
}
