use crate::Error;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

lazy_static::lazy_static! {
    static ref ROOM_NAME: Regex =
        Regex::new(r"^[a-zA-Z0-9]+([a-zA-Z0-9](_|-)?[a-zA-Z0-9])*[a-zA-Z0-9]*$").expect("valid room name regex");
}

/// The name of a room.
///
/// Room names are case-insensitive, they are always stored in lowercase.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
#[serde(transparent)]
pub struct RoomName(String);

impl RoomName {
    /// Validate a name for a new room.
    ///
    /// Names consist of ASCII letters and digits, single `-` or `_` may separate them.
    pub fn parse(name: &str) -> Result<Self, Error> {
        if ROOM_NAME.is_match(name) {
            Ok(Self(name.to_lowercase()))
        } else {
            Err(Error::InvalidRoomName)
        }
    }

    /// The key to look up an existing room, taken from a request path.
    pub fn lookup(name: &str) -> Self {
        Self(name.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for RoomName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RoomName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
