//! Route lookup.
//!
//! Routes are compiled once and frozen. Lookup order is: patterns without a
//! trailing wildcard first (more literal segments first), then wildcard
//! patterns; registration order breaks ties. First match wins.

use std::cmp::Reverse;

use axum::http::Method;

use super::pattern::{PatternError, RouteParams, RoutePattern};

/// The operations a request can be dispatched to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Compose and return one email preview
    RenderEmail,
    /// Store a variable and return the refreshed variable list
    UpdateVariables,
    /// Render the home page
    Home,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::RenderEmail => "render_email",
            Operation::UpdateVariables => "update_variables",
            Operation::Home => "home",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Route {
    pub method: Method,
    pub pattern: RoutePattern,
    pub operation: Operation,
}

impl Route {
    pub fn new(method: Method, pattern: &str, operation: Operation) -> Result<Self, PatternError> {
        Ok(Self {
            method,
            pattern: RoutePattern::parse(pattern)?,
            operation,
        })
    }
}

/// Result of a successful lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub operation: Operation,
    pub params: RouteParams,
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(mut routes: Vec<Route>) -> Self {
        routes.sort_by_key(|r| (r.pattern.has_wildcard(), Reverse(r.pattern.literal_count())));
        Self { routes }
    }

    /// The preview server's routes:
    ///
    /// | Method | Pattern | Operation |
    /// |---|---|---|
    /// | GET | `/:lang/:theme/:template` | render email |
    /// | POST | `/variables` | update variable |
    /// | GET | `/*` | home page |
    pub fn standard() -> Result<Self, PatternError> {
        Self::from_specs([
            (Method::GET, "/:lang/:theme/:template", Operation::RenderEmail),
            (Method::POST, "/variables", Operation::UpdateVariables),
            (Method::GET, "/*", Operation::Home),
        ])
    }

    /// Build a table from `(method, pattern, operation)` triples. The first
    /// pattern that fails to parse fails the whole table.
    pub fn from_specs<'a, I>(specs: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = (Method, &'a str, Operation)>,
    {
        let routes = specs
            .into_iter()
            .map(|(method, pattern, operation)| Route::new(method, pattern, operation))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(routes))
    }

    /// Find the route for a request. `None` when nothing matches.
    pub fn find(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        self.routes
            .iter()
            .filter(|route| route.method == *method)
            .find_map(|route| {
                route.pattern.matches(path).map(|params| RouteMatch {
                    operation: route.operation,
                    params,
                })
            })
    }
}
