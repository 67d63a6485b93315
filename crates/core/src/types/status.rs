//! Status enums shared by data-fetching views.

use serde::{Deserialize, Serialize};

/// Lifecycle of a data fetch backing a view.
///
/// A fetch starts in `Loading` and settles exactly once into `Success` or
/// `Error`. There is no automatic retry: only a full reload starts a new
/// fetch and re-enters `Loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    #[default]
    Loading,
    Success,
    Error,
}

impl LoadStatus {
    /// Whether the fetch has settled (successfully or not).
    #[must_use]
    pub const fn is_settled(self) -> bool {
        !matches!(self, Self::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_loading() {
        assert_eq!(LoadStatus::default(), LoadStatus::Loading);
        assert!(!LoadStatus::Loading.is_settled());
        assert!(LoadStatus::Success.is_settled());
        assert!(LoadStatus::Error.is_settled());
    }
}
