//! Form values of requests.
//!
//! All fields are optional, the server decides what is required. Values may be sent either as
//! URL-encoded body or as query parameters.

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct CreateRoomForm {
    #[serde(rename = "roomName")]
    pub room_name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct UserForm {
    /// The id of the user
    #[serde(rename = "uID")]
    pub user_id: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct QuestionForm {
    #[serde(rename = "uID")]
    pub user_id: Option<String>,
    pub question: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct VoteForm {
    #[serde(rename = "uID")]
    pub user_id: Option<String>,
    /// The id of the question
    #[serde(rename = "qID")]
    pub question_id: Option<String>,
    /// -1, 0 or 1
    #[serde(rename = "val")]
    pub value: Option<String>,
}

/// Combine two sets of form values, preferring the ones of `self`.
pub trait Merge {
    fn merge(self, other: Self) -> Self;
}

impl Merge for CreateRoomForm {
    fn merge(self, other: Self) -> Self {
        Self {
            room_name: self.room_name.or(other.room_name),
        }
    }
}

impl Merge for UserForm {
    fn merge(self, other: Self) -> Self {
        Self {
            user_id: self.user_id.or(other.user_id),
        }
    }
}

impl Merge for QuestionForm {
    fn merge(self, other: Self) -> Self {
        Self {
            user_id: self.user_id.or(other.user_id),
            question: self.question.or(other.question),
        }
    }
}

impl Merge for VoteForm {
    fn merge(self, other: Self) -> Self {
        Self {
            user_id: self.user_id.or(other.user_id),
            question_id: self.question_id.or(other.question_id),
            value: self.value.or(other.value),
        }
    }
}
