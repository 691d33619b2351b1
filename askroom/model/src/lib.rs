//! The data model of the askroom API.
//!
//! Field names follow what the web client sends and expects, which is why some of them are not
//! snake case on the wire.

pub mod form;
pub mod question;
pub mod response;
pub mod room;

pub mod prelude {
    pub use crate::form::*;
    pub use crate::question::*;
    pub use crate::response::*;
    pub use crate::room::*;
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Bad room name")]
    InvalidRoomName,
    #[error("Vote must be either 1, 0, or -1")]
    InvalidVote,
}
