use crate::Error;

/// A question, along with its vote count.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct Question {
    pub id: u64,
    /// The text of the question
    pub q: String,
    /// Sum of all votes
    pub vote: i64,
}

/// A vote of a single user on a question.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Vote {
    Down,
    #[default]
    Neutral,
    Up,
}

impl Vote {
    pub fn value(self) -> i64 {
        match self {
            Self::Down => -1,
            Self::Neutral => 0,
            Self::Up => 1,
        }
    }
}

impl TryFrom<i64> for Vote {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::Down),
            0 => Ok(Self::Neutral),
            1 => Ok(Self::Up),
            _ => Err(Error::InvalidVote),
        }
    }
}

impl From<Vote> for i64 {
    fn from(value: Vote) -> Self {
        value.value()
    }
}
