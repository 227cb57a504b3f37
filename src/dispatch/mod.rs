//! Request dispatch.
//!
//! Four fixed path patterns, tried in order, first match wins. Matching
//! ignores the method; handlers decide what GET and POST mean.

use std::collections::BTreeMap;

use crate::errors::AppError;

/// Every endpoint the service answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    ListBoards,
    NewBoard,
    ViewBoard,
    AddComment,
}

/// Routing table. `<name>` captures one non-empty path segment.
pub const ROUTES: &[(&str, Endpoint)] = &[
    ("/", Endpoint::ListBoards),
    ("/new", Endpoint::NewBoard),
    ("/<board_id>", Endpoint::ViewBoard),
    ("/<board_id>/add_comment", Endpoint::AddComment),
];

/// Named values captured from the path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(BTreeMap<&'static str, String>);

impl PathParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Like [`PathParams::get`], for parameters the route guarantees.
    pub fn require(&self, name: &str) -> Result<&str, AppError> {
        self.get(name)
            .ok_or_else(|| AppError::Internal(format!("route captured no '{}'", name)))
    }
}

/// Outcome of a successful match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub endpoint: Endpoint,
    pub params: PathParams,
}

/// Resolve a request path against [`ROUTES`].
pub fn resolve(path: &str) -> Result<RouteMatch, AppError> {
    ROUTES
        .iter()
        .find_map(|(pattern, endpoint)| {
            match_pattern(pattern, path).map(|params| RouteMatch {
                endpoint: *endpoint,
                params,
            })
        })
        .ok_or_else(|| AppError::NotFound(format!("No page at {}", path)))
}

fn match_pattern(pattern: &'static str, path: &str) -> Option<PathParams> {
    let pattern_segments: Vec<&'static str> = pattern.split('/').collect();
    let path_segments: Vec<&str> = path.split('/').collect();
    if pattern_segments.len() != path_segments.len() {
        return None;
    }

    let mut params = PathParams::default();
    for (expected, actual) in pattern_segments.into_iter().zip(path_segments) {
        match expected
            .strip_prefix('<')
            .and_then(|rest| rest.strip_suffix('>'))
        {
            Some(name) => {
                if actual.is_empty() {
                    return None;
                }
                params.0.insert(name, actual.to_string());
            }
            None if expected == actual => {}
            None => return None,
        }
    }
    Some(params)
}
