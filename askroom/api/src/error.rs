use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use askroom_model::response::Status;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Bad room name")]
    InvalidRoomName,
    #[error("Room already exists")]
    RoomExists,
    #[error("Room does not exist")]
    RoomNotFound,
    #[error("Must be registered to room")]
    NotRegistered,
    #[error("Must be authorized to room")]
    NotAuthorized,
    #[error("Must be the owner of room to close it")]
    NotOwner,
    #[error("The room has been closed")]
    RoomClosed,
    #[error("Question too short to be valid")]
    QuestionTooShort,
    #[error("Could not read question ID")]
    InvalidQuestionId,
    #[error("No question found with such ID")]
    QuestionNotFound,
    #[error("Vote must be either 1, 0, or -1")]
    InvalidVote,
    #[error("Request payload too large")]
    PayloadTooLarge,
    #[error("Invalid request payload: {0}")]
    InvalidPayload(String),
    #[error("Not found")]
    NotFound,
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<askroom_model::Error> for Error {
    fn from(value: askroom_model::Error) -> Self {
        match value {
            askroom_model::Error::InvalidRoomName => Self::InvalidRoomName,
            askroom_model::Error::InvalidVote => Self::InvalidVote,
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRoomName
            | Self::RoomExists
            | Self::RoomNotFound
            | Self::QuestionTooShort
            | Self::InvalidQuestionId
            | Self::QuestionNotFound
            | Self::InvalidVote
            | Self::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            Self::NotRegistered | Self::NotAuthorized | Self::NotOwner => StatusCode::UNAUTHORIZED,
            Self::RoomClosed => StatusCode::FORBIDDEN,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = match self {
            Self::Internal(err) => {
                log::error!("{err}");
                Status::new("Internal server error")
            }
            _ => Status::new(self.to_string()),
        };
        HttpResponse::build(self.status_code()).json(status)
    }
}
