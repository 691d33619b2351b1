use crate::{Error, Params};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// A single segment of a path pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    /// Matches the text, ignoring ASCII case.
    Static(String),
    /// Matches any non-empty segment, capturing it under the name.
    Param(String),
}

/// A parsed path pattern, like `/` or `/:roomName`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Result<Self, Error> {
        let invalid = |reason| Error::InvalidPattern {
            pattern: pattern.to_string(),
            reason,
        };

        let rest = pattern.strip_prefix('/').ok_or_else(|| invalid("must start with '/'"))?;

        let mut segments: Vec<Segment> = Vec::new();
        if !rest.is_empty() {
            for segment in rest.split('/') {
                if segment.is_empty() {
                    return Err(invalid("empty segment"));
                }
                match segment.strip_prefix(':') {
                    Some("") => return Err(invalid("empty parameter name")),
                    Some(name) => {
                        if segments.iter().any(|s| matches!(s, Segment::Param(n) if n == name)) {
                            return Err(invalid("duplicate parameter name"));
                        }
                        segments.push(Segment::Param(name.to_string()));
                    }
                    None => segments.push(Segment::Static(segment.to_string())),
                }
            }
        }

        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of all parameters, in order of appearance.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }

    /// Number of static segments. Higher means more specific.
    pub fn specificity(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Static(_)))
            .count()
    }

    /// Two patterns with the same shape match exactly the same set of paths.
    pub fn same_shape(&self, other: &PathPattern) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Param(_), Segment::Param(_)) => true,
                    (Segment::Static(a), Segment::Static(b)) => a.eq_ignore_ascii_case(b),
                    _ => false,
                })
    }

    /// Match already split path segments, returning the decoded parameters.
    pub fn matches(&self, path: &[&str]) -> Option<Params> {
        if path.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::default();
        for (segment, value) in self.segments.iter().zip(path) {
            match segment {
                Segment::Static(text) => {
                    if !text.eq_ignore_ascii_case(value) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if value.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), decode(value).into_owned());
                }
            }
        }

        Some(params)
    }

    /// Render a concrete path, encoding the parameter values.
    ///
    /// `route` is only used for error reporting.
    pub fn render(&self, route: &str, params: &Params) -> Result<String, Error> {
        if self.segments.is_empty() {
            return Ok("/".into());
        }

        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Static(text) => path.push_str(text),
                Segment::Param(name) => {
                    let value = params.get(name).ok_or_else(|| Error::MissingParam {
                        route: route.to_string(),
                        param: name.clone(),
                    })?;
                    if value.is_empty() {
                        return Err(Error::EmptyParam {
                            route: route.to_string(),
                            param: name.clone(),
                        });
                    }
                    path.push_str(&urlencoding::encode(value));
                }
            }
        }

        Ok(path)
    }
}

impl FromStr for PathPattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Split a URL path into its segments.
///
/// Query and fragment are dropped, as is a single trailing slash. Returns `None` for anything
/// that isn't an absolute path, or contains empty segments.
pub fn split_path(path: &str) -> Option<Vec<&str>> {
    let path = match path.find(['?', '#']) {
        Some(pos) => &path[..pos],
        None => path,
    };

    let rest = path.strip_prefix('/')?;
    if rest.is_empty() {
        return Some(vec![]);
    }

    let rest = rest.strip_suffix('/').unwrap_or(rest);
    if rest.is_empty() {
        return None;
    }

    let segments: Vec<&str> = rest.split('/').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return None;
    }

    Some(segments)
}

fn decode(value: &str) -> Cow<'_, str> {
    urlencoding::decode(value).unwrap_or(Cow::Borrowed(value))
}
