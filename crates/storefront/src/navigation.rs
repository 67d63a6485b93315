//! Navigational locations and the navigator abstraction.
//!
//! A [`Location`] is a path plus ordered query parameters. Views never touch
//! a global history; they are handed a [`Navigator`] and ask it to move.

use std::fmt;

use url::form_urlencoded;

/// Query parameter the root path uses for the active search text.
pub const SEARCH_PARAM: &str = "search";

/// A path with query parameters, e.g. `/?search=bag`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    path: String,
    query: Vec<(String, String)>,
}

impl Location {
    /// A location without query parameters.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    /// The root path carrying `search=<text>`.
    #[must_use]
    pub fn search(text: &str) -> Self {
        Self::new("/").with_query(vec![(SEARCH_PARAM.to_string(), text.to_string())])
    }

    /// Parse an href such as `/checkout/7` or `/?search=red+shoes`.
    #[must_use]
    pub fn parse(href: &str) -> Self {
        let href = href.split_once('#').map_or(href, |(before, _)| before);
        let (path, query) = href.split_once('?').unwrap_or((href, ""));
        let path = if path.is_empty() { "/" } else { path };
        Self {
            path: path.to_string(),
            query: form_urlencoded::parse(query.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        }
    }

    /// Replace all query parameters.
    #[must_use]
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// The path component.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// All query parameters in order.
    #[must_use]
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// First value of the named query parameter.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Render back to an href with form-encoded parameters.
    #[must_use]
    pub fn href(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish();
        format!("{}?{query}", self.path)
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new("/")
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href())
    }
}

/// Moves the user between locations.
pub trait Navigator {
    /// The current location.
    fn location(&self) -> &Location;

    /// Replace the current location's query parameters, keeping its path.
    fn set_search_params(&mut self, params: Vec<(String, String)>);

    /// Go to `href`.
    fn navigate(&mut self, href: &str);
}

/// In-memory history stack.
#[derive(Debug, Clone)]
pub struct HistoryNavigator {
    past: Vec<Location>,
    current: Location,
}

impl HistoryNavigator {
    /// Start at `initial`.
    #[must_use]
    pub const fn new(initial: Location) -> Self {
        Self {
            past: Vec::new(),
            current: initial,
        }
    }

    /// Every location visited, oldest first, ending with the current one.
    #[must_use]
    pub fn history(&self) -> Vec<&Location> {
        self.past.iter().chain(std::iter::once(&self.current)).collect()
    }

    fn push(&mut self, next: Location) {
        let previous = std::mem::replace(&mut self.current, next);
        self.past.push(previous);
    }
}

impl Default for HistoryNavigator {
    fn default() -> Self {
        Self::new(Location::default())
    }
}

impl Navigator for HistoryNavigator {
    fn location(&self) -> &Location {
        &self.current
    }

    fn set_search_params(&mut self, params: Vec<(String, String)>) {
        let next = self.current.clone().with_query(params);
        tracing::debug!(location = %next, "Updated search params");
        self.push(next);
    }

    fn navigate(&mut self, href: &str) {
        let next = Location::parse(href);
        tracing::debug!(location = %next, "Navigated");
        self.push(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_href() {
        let location = Location::parse("/?search=red+shoes&page=2");
        assert_eq!(location.path(), "/");
        assert_eq!(location.query_param("search"), Some("red shoes"));
        assert_eq!(location.query_param("page"), Some("2"));
        assert_eq!(location.href(), "/?search=red+shoes&page=2");
    }

    #[test]
    fn test_parse_without_query() {
        let location = Location::parse("/checkout/12");
        assert_eq!(location.path(), "/checkout/12");
        assert!(location.query().is_empty());
        assert_eq!(location.href(), "/checkout/12");
    }

    #[test]
    fn test_parse_empty_path_is_root() {
        assert_eq!(Location::parse("?search=bag").path(), "/");
        assert_eq!(Location::parse("").path(), "/");
    }

    #[test]
    fn test_search_location_keeps_empty_value() {
        assert_eq!(Location::search("").href(), "/?search=");
        assert_eq!(Location::search("bag").href(), "/?search=bag");
    }

    #[test]
    fn test_history_navigator_records_moves() {
        let mut nav = HistoryNavigator::new(Location::parse("/products?category=shoes"));
        nav.set_search_params(vec![("search".to_string(), "bag".to_string())]);
        assert_eq!(nav.location().href(), "/products?search=bag");

        nav.navigate("/?search=bag");
        assert_eq!(nav.location().href(), "/?search=bag");
        assert_eq!(nav.history().len(), 3);
    }
}
