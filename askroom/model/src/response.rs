use crate::question::Question;
use crate::room::RoomName;

pub const STATUS_OK: &str = "ok";

/// A plain status, also used to report errors.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct Status {
    pub status: String,
}

impl Status {
    pub fn ok() -> Self {
        Self {
            status: STATUS_OK.into(),
        }
    }

    pub fn new(status: impl Into<String>) -> Self {
        Self { status: status.into() }
    }

    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// A room got created, the user is its owner.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct CreatedRoom {
    pub status: String,
    #[serde(rename = "uID")]
    pub user_id: String,
}

/// A user got registered with a room.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct Registered {
    pub status: String,
    pub id: String,
}

/// A question got published.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct Published {
    pub status: String,
    pub id: u64,
}

/// All questions of a room.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct QuestionList {
    pub questions: Vec<Question>,
    pub is_closed: bool,
}

/// A vote got recorded.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct Voted {
    pub status: String,
    /// The new vote count of the question
    #[serde(rename = "newCt")]
    pub new_count: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct RoomList {
    pub rooms: Vec<RoomName>,
}
