//! Search bar: a text field kept in step with the location's `search` parameter.

use askama::Template;

use crate::navigation::{Location, Navigator, SEARCH_PARAM};

/// Search form state.
///
/// The location is the source of truth: whenever its `search` parameter
/// changes, [`SearchBar::sync`] overwrites whatever the shopper typed.
/// Typing never touches the location until [`SearchBar::submit`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Template)]
#[template(path = "components/search_bar.html")]
pub struct SearchBar {
    query: String,
    /// `search` value last seen on the location.
    observed: String,
}

impl SearchBar {
    /// Start with the location's current `search` value.
    #[must_use]
    pub fn from_location(location: &Location) -> Self {
        let search = search_param(location).to_string();
        Self {
            query: search.clone(),
            observed: search,
        }
    }

    /// The text currently in the field.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The shopper typed.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    /// Pull the location's `search` value into the field if it changed since
    /// the last sync. Returns whether the field was overwritten.
    pub fn sync(&mut self, location: &Location) -> bool {
        let search = search_param(location);
        if search == self.observed {
            return false;
        }
        self.observed = search.to_string();
        self.query = search.to_string();
        true
    }

    /// Write the field into the location and go to the root search page.
    ///
    /// Empty queries are submitted like any other.
    pub fn submit<N: Navigator>(&mut self, navigator: &mut N) {
        navigator.set_search_params(vec![(SEARCH_PARAM.to_string(), self.query.clone())]);
        navigator.navigate(&Location::search(&self.query).href());
        self.observed.clone_from(&self.query);
    }
}

fn search_param(location: &Location) -> &str {
    location.query_param(SEARCH_PARAM).unwrap_or_default()
}
