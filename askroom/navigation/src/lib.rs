//! Navigation for the askroom client.
//!
//! The client is a single page application. Every URL it can show is declared once, in a
//! [`RouteTable`], binding a path pattern and a symbolic name to a view:
//!
//! ```
//! use askroom_navigation::{app_routes, View};
//!
//! let routes = app_routes();
//!
//! let home = routes.resolve("/").unwrap();
//! assert_eq!(*home.view(), View::Home);
//!
//! let observer = routes.resolve("/standup").unwrap();
//! assert_eq!(*observer.view(), View::Observer);
//! assert_eq!(observer.params().get("roomName"), Some("standup"));
//! ```
//!
//! A [`Router`] wraps the table, tracks the current location on top of a [`History`], and
//! renders URLs. The default mode is [`Mode::History`], producing URLs without a fragment
//! marker. This requires the server to answer every client path with the entry document,
//! which is why the API server uses the same table.

mod app;
mod history;
mod pattern;
mod router;
mod table;

pub use app::*;
pub use history::*;
pub use pattern::*;
pub use router::*;
pub use table::*;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid path pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: &'static str },
    #[error("duplicate route name: {0}")]
    DuplicateName(String),
    #[error("route '{0}' is ambiguous with route '{1}'")]
    Ambiguous(String, String),
    #[error("unknown route name: {0}")]
    UnknownName(String),
    #[error("missing parameter '{param}' for route '{route}'")]
    MissingParam { route: String, param: String },
    #[error("empty parameter '{param}' for route '{route}'")]
    EmptyParam { route: String, param: String },
    #[error("no route matches path: {0}")]
    NotFound(String),
}
