use crate::{Params, RouteDescriptor, RouteMatch, RouteTable};

pub const HOME: &str = "Home";
pub const OBSERVER: &str = "Observer";
pub const ROOM_NAME: &str = "roomName";

/// The views of the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum View {
    /// Create or join a room.
    Home,
    /// Follow the questions of a room.
    Observer,
}

lazy_static::lazy_static! {
    static ref APP_ROUTES: RouteTable<View> = build_app_routes();
}

/// The route table of the application.
///
/// The table is built once, cloning it is cheap.
pub fn app_routes() -> RouteTable<View> {
    APP_ROUTES.clone()
}

fn build_app_routes() -> RouteTable<View> {
    let routes = [
        RouteDescriptor::new("/", HOME, View::Home),
        RouteDescriptor::new("/:roomName", OBSERVER, View::Observer),
    ];

    // the patterns are static, and covered by tests
    RouteTable::new(routes.into_iter().map(|r| r.expect("valid route pattern")))
        .expect("unambiguous route table")
}

/// Typed variant of the application routes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppRoute {
    Home,
    Observer { room_name: String },
}

impl AppRoute {
    /// Resolve a path against the application table.
    pub fn parse(path: &str) -> Option<Self> {
        app_routes().resolve(path).as_ref().and_then(Self::from_match)
    }

    pub fn from_match(m: &RouteMatch<View>) -> Option<Self> {
        match m.view() {
            View::Home => Some(Self::Home),
            View::Observer => m.params().get(ROOM_NAME).map(|room_name| Self::Observer {
                room_name: room_name.to_string(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Home => HOME,
            Self::Observer { .. } => OBSERVER,
        }
    }

    pub fn params(&self) -> Params {
        match self {
            Self::Home => Params::default(),
            Self::Observer { room_name } => Params::from_iter([(ROOM_NAME, room_name.as_str())]),
        }
    }

    /// Render the path. Returns `None` for an observer route with an empty room name.
    pub fn to_path(&self) -> Option<String> {
        app_routes().location(self.name(), &self.params()).ok()
    }
}
