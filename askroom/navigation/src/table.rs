use crate::{split_path, Error, PathPattern};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Parameters extracted from, or used to render, a path.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Binds a path pattern and a name to a view.
#[derive(Clone, Debug)]
pub struct RouteDescriptor<V> {
    pub path: PathPattern,
    pub name: String,
    pub view: V,
}

impl<V> RouteDescriptor<V> {
    pub fn new(path: &str, name: impl Into<String>, view: V) -> Result<Self, Error> {
        Ok(Self {
            path: PathPattern::parse(path)?,
            name: name.into(),
            view,
        })
    }
}

/// The outcome of resolving a path.
#[derive(Clone, Debug)]
pub struct RouteMatch<V> {
    route: Arc<RouteDescriptor<V>>,
    path: String,
    params: Params,
}

impl<V> RouteMatch<V> {
    pub fn route(&self) -> &RouteDescriptor<V> {
        &self.route
    }

    pub fn name(&self) -> &str {
        &self.route.name
    }

    pub fn view(&self) -> &V {
        &self.route.view
    }

    /// The path which got resolved, as it was requested.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn params(&self) -> &Params {
        &self.params
    }
}

impl<V: PartialEq> PartialEq for RouteMatch<V> {
    fn eq(&self, other: &Self) -> bool {
        self.route.name == other.route.name && self.route.view == other.route.view && self.params == other.params
    }
}

/// The immutable set of navigable routes.
#[derive(Debug)]
pub struct RouteTable<V> {
    routes: Vec<Arc<RouteDescriptor<V>>>,
}

impl<V> Clone for RouteTable<V> {
    fn clone(&self) -> Self {
        Self {
            routes: self.routes.clone(),
        }
    }
}

impl<V> RouteTable<V> {
    /// Create a new table, rejecting duplicate names and routes which would shadow each other.
    pub fn new(routes: impl IntoIterator<Item = RouteDescriptor<V>>) -> Result<Self, Error> {
        let mut result: Vec<Arc<RouteDescriptor<V>>> = Vec::new();

        for route in routes {
            for existing in &result {
                if existing.name == route.name {
                    return Err(Error::DuplicateName(route.name));
                }
                if existing.path.same_shape(&route.path) {
                    return Err(Error::Ambiguous(route.path.to_string(), existing.path.to_string()));
                }
            }
            result.push(Arc::new(route));
        }

        Ok(Self { routes: result })
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteDescriptor<V>> {
        self.routes.iter().map(|r| r.as_ref())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Resolve a path to a single route.
    ///
    /// If more than one route matches, the one with most static segments wins, then the one
    /// declared first.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch<V>> {
        let segments = split_path(path)?;

        let mut best: Option<(&Arc<RouteDescriptor<V>>, Params)> = None;
        for route in &self.routes {
            if let Some(params) = route.path.matches(&segments) {
                let better = match &best {
                    Some((current, _)) => route.path.specificity() > current.path.specificity(),
                    None => true,
                };
                if better {
                    best = Some((route, params));
                }
            }
        }

        let result = best.map(|(route, params)| RouteMatch {
            route: route.clone(),
            path: path.to_string(),
            params,
        });

        if result.is_none() {
            log::debug!("No route for path: {path}");
        }

        result
    }

    pub fn by_name(&self, name: &str) -> Option<&RouteDescriptor<V>> {
        self.iter().find(|r| r.name == name)
    }

    /// Render the path of a named route.
    pub fn location(&self, name: &str, params: &Params) -> Result<String, Error> {
        let route = self.by_name(name).ok_or_else(|| Error::UnknownName(name.to_string()))?;
        route.path.render(&route.name, params)
    }

    /// Resolve a named route, the same way navigating to its rendered path would.
    pub fn resolve_named(&self, name: &str, params: &Params) -> Result<RouteMatch<V>, Error> {
        let path = self.location(name, params)?;
        self.resolve(&path).ok_or(Error::NotFound(path))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn table() -> RouteTable<&'static str> {
        RouteTable::new([
            RouteDescriptor::new("/", "Home", "home").unwrap(),
            RouteDescriptor::new("/:roomName", "Observer", "observer").unwrap(),
            RouteDescriptor::new("/about", "About", "about").unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn most_specific_wins() {
        let table = table();
        assert_eq!(table.resolve("/about").unwrap().name(), "About");
        assert_eq!(table.resolve("/ABOUT").unwrap().name(), "About");
        assert_eq!(table.resolve("/lobby").unwrap().name(), "Observer");
        assert_eq!(table.resolve("/").unwrap().name(), "Home");
    }

    #[test]
    fn unmatched() {
        let table = table();
        assert!(table.resolve("/a/b").is_none());
        assert!(table.resolve("").is_none());
        assert!(table.resolve("lobby").is_none());
    }

    #[test]
    fn duplicate_name() {
        let result = RouteTable::new([
            RouteDescriptor::new("/", "Home", ()).unwrap(),
            RouteDescriptor::new("/:id", "Home", ()).unwrap(),
        ]);
        assert_eq!(result.unwrap_err(), Error::DuplicateName("Home".into()));
    }

    #[test]
    fn ambiguous() {
        let result = RouteTable::new([
            RouteDescriptor::new("/:roomName", "Observer", ()).unwrap(),
            RouteDescriptor::new("/:other", "Other", ()).unwrap(),
        ]);
        assert_eq!(
            result.unwrap_err(),
            Error::Ambiguous("/:other".into(), "/:roomName".into())
        );
    }

    #[test]
    fn named() {
        let table = table();
        let params = Params::from_iter([("roomName", "lobby")]);
        assert_eq!(table.location("Observer", &params).unwrap(), "/lobby");
        assert_eq!(table.location("Home", &Params::default()).unwrap(), "/");
        assert_eq!(
            table.location("Missing", &params),
            Err(Error::UnknownName("Missing".into()))
        );
    }

    #[test]
    fn named_matches_path() {
        let table = table();
        let params = Params::from_iter([("roomName", "lobby")]);

        let by_name = table.resolve_named("Observer", &params).unwrap();
        let by_path = table.resolve("/lobby").unwrap();

        assert_eq!(by_name, by_path);
        assert_eq!(by_name.path(), by_path.path());
    }

    #[test]
    fn params_serialize_flat() {
        let params = Params::from_iter([("roomName", "lobby")]);
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            serde_json::json!({"roomName": "lobby"})
        );
    }
}
