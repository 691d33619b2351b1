use crate::{Error, History, MemoryHistory, Params, RouteMatch, RouteTable};

/// How locations are reflected in the URL.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Plain paths (`/base/lobby`), requires the server to answer all client paths.
    #[default]
    History,
    /// Paths after a fragment marker (`/base/#/lobby`).
    Hash,
}

/// Where to navigate to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    Path(String),
    Named { name: String, params: Params },
}

impl Target {
    pub fn path(path: impl Into<String>) -> Self {
        Self::Path(path.into())
    }

    pub fn named(name: impl Into<String>, params: Params) -> Self {
        Self::Named {
            name: name.into(),
            params,
        }
    }
}

impl From<&str> for Target {
    fn from(value: &str) -> Self {
        Self::Path(value.to_string())
    }
}

impl From<String> for Target {
    fn from(value: String) -> Self {
        Self::Path(value)
    }
}

/// A router, tracking the current route on top of a [`History`].
#[derive(Debug)]
pub struct Router<V, H = MemoryHistory> {
    routes: RouteTable<V>,
    history: H,
    mode: Mode,
    base: String,
    current: Option<RouteMatch<V>>,
}

impl<V> Router<V, MemoryHistory> {
    pub fn new(routes: RouteTable<V>) -> Self {
        Self::with_history(routes, MemoryHistory::default())
    }
}

impl<V, H: History> Router<V, H> {
    pub fn with_history(routes: RouteTable<V>, history: H) -> Self {
        let current = routes.resolve(history.current());
        Self {
            routes,
            history,
            mode: Mode::default(),
            base: String::new(),
            current,
        }
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the base path all URLs are served under, like `/app`.
    pub fn base(mut self, base: impl AsRef<str>) -> Self {
        let base = base.as_ref().trim_matches('/');
        self.base = match base.is_empty() {
            true => String::new(),
            false => format!("/{base}"),
        };
        self
    }

    pub fn routes(&self) -> &RouteTable<V> {
        &self.routes
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// The current path, relative to the base.
    pub fn path(&self) -> &str {
        self.history.current()
    }

    /// The current route, `None` if the current path doesn't match any route.
    pub fn current(&self) -> Option<&RouteMatch<V>> {
        self.current.as_ref()
    }

    /// The parameters of the current route.
    pub fn params(&self) -> Option<&Params> {
        self.current.as_ref().map(|m| m.params())
    }

    pub fn push(&mut self, target: impl Into<Target>) -> Result<Option<&RouteMatch<V>>, Error> {
        let path = self.target_path(&target.into())?;
        log::debug!("Push: {path}");
        self.history.push(path);
        Ok(self.sync())
    }

    pub fn replace(&mut self, target: impl Into<Target>) -> Result<Option<&RouteMatch<V>>, Error> {
        let path = self.target_path(&target.into())?;
        log::debug!("Replace: {path}");
        self.history.replace(path);
        Ok(self.sync())
    }

    pub fn go(&mut self, delta: isize) -> bool {
        let moved = self.history.go(delta);
        if moved {
            self.sync();
        }
        moved
    }

    pub fn back(&mut self) -> bool {
        self.go(-1)
    }

    pub fn forward(&mut self) -> bool {
        self.go(1)
    }

    /// Render the URL for a target.
    pub fn href(&self, target: impl Into<Target>) -> Result<String, Error> {
        let path = self.target_path(&target.into())?;
        Ok(match self.mode {
            Mode::History => format!("{}{}", self.base, path),
            Mode::Hash => format!("{}/#{}", self.base, path),
        })
    }

    /// Extract the router path from a URL path as rendered by [`Self::href`].
    ///
    /// Returns `None` if the URL isn't below the base.
    pub fn route_path(&self, url: &str) -> Option<String> {
        let rest = match self.base.is_empty() {
            true => url,
            false => {
                let rest = url.strip_prefix(&self.base)?;
                if !(rest.is_empty() || rest.starts_with(['/', '?', '#'])) {
                    return None;
                }
                rest
            }
        };

        let path = match self.mode {
            Mode::History => rest,
            Mode::Hash => rest.split_once('#').map(|(_, fragment)| fragment).unwrap_or(""),
        };

        Some(match path.is_empty() || !path.starts_with('/') {
            true => format!("/{path}"),
            false => path.to_string(),
        })
    }

    fn target_path(&self, target: &Target) -> Result<String, Error> {
        match target {
            Target::Path(path) => Ok(path.clone()),
            Target::Named { name, params } => self.routes.location(name, params),
        }
    }

    fn sync(&mut self) -> Option<&RouteMatch<V>> {
        self.current = self.routes.resolve(self.history.current());
        self.current.as_ref()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{app_routes, View};

    #[test]
    fn starts_at_home() {
        let router = Router::new(app_routes());
        assert_eq!(router.path(), "/");
        assert_eq!(router.current().map(|m| *m.view()), Some(View::Home));
        assert_eq!(router.params(), Some(&Params::default()));
    }

    #[test]
    fn push_and_back() {
        let mut router = Router::new(app_routes());

        let current = router.push("/lobby").unwrap().unwrap();
        assert_eq!(*current.view(), View::Observer);
        assert_eq!(router.params().and_then(|p| p.get("roomName")), Some("lobby"));

        assert!(router.back());
        assert_eq!(router.current().map(|m| m.name()), Some("Home"));
        assert!(router.forward());
        assert_eq!(router.current().map(|m| m.name()), Some("Observer"));
    }

    #[test]
    fn push_unmatched() {
        let mut router = Router::new(app_routes());
        assert!(router.push("/a/b").unwrap().is_none());
        assert!(router.current().is_none());
        assert!(router.params().is_none());
        assert_eq!(router.path(), "/a/b");
    }

    #[test]
    fn push_named() {
        let mut router = Router::new(app_routes());
        router
            .push(Target::named("Observer", Params::from_iter([("roomName", "lobby")])))
            .unwrap();
        assert_eq!(router.path(), "/lobby");

        let err = router.push(Target::named("Observer", Params::default())).unwrap_err();
        assert!(matches!(err, Error::MissingParam { .. }));
        // failed navigation doesn't change the location
        assert_eq!(router.path(), "/lobby");
    }

    #[test]
    fn replace_current() {
        let mut router = Router::new(app_routes());
        router.push("/one").unwrap();
        router.replace("/two").unwrap();
        assert_eq!(router.history().len(), 2);
        assert!(router.back());
        assert_eq!(router.path(), "/");
    }

    #[test]
    fn history_href_has_no_fragment() {
        let router = Router::new(app_routes()).base("/app/");
        let href = router
            .href(Target::named("Observer", Params::from_iter([("roomName", "lobby")])))
            .unwrap();
        assert_eq!(href, "/app/lobby");
        assert!(!href.contains('#'));
        assert_eq!(router.href("/").unwrap(), "/app/");
    }

    #[test]
    fn hash_href() {
        let router = Router::new(app_routes()).mode(Mode::Hash);
        assert_eq!(router.href("/lobby").unwrap(), "/#/lobby");
    }

    #[test]
    fn route_path_strips_base() {
        let router = Router::new(app_routes()).base("app");
        assert_eq!(router.route_path("/app/lobby").as_deref(), Some("/lobby"));
        assert_eq!(router.route_path("/app").as_deref(), Some("/"));
        assert_eq!(router.route_path("/application"), None);
        assert_eq!(router.route_path("/other"), None);

        let router = Router::new(app_routes()).mode(Mode::Hash);
        assert_eq!(router.route_path("/#/lobby").as_deref(), Some("/lobby"));
        assert_eq!(router.route_path("/").as_deref(), Some("/"));
    }
}
