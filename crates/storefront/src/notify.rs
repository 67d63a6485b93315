//! User-facing notifications.

use std::str::FromStr;

/// Blocking notification surface (a modal alert in a browser, a message on
/// stderr in a terminal).
pub trait Notifier {
    /// Show `message` to the user.
    fn alert(&self, message: &str);
}

/// Whether failed cart mutations (quantity change, bulk delete) reach the
/// user.
///
/// Checkout failures always notify; this only governs the mutations, which
/// otherwise fail with nothing more than a log line and unchanged state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorVisibility {
    /// Log the failure and leave state untouched.
    #[default]
    LogOnly,
    /// Log the failure and also alert the user.
    Notify,
}

impl FromStr for ErrorVisibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "log" | "log_only" => Ok(Self::LogOnly),
            "notify" => Ok(Self::Notify),
            other => Err(format!("expected `log` or `notify`, got `{other}`")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_visibility_parse() {
        assert_eq!("log".parse::<ErrorVisibility>(), Ok(ErrorVisibility::LogOnly));
        assert_eq!("NOTIFY".parse::<ErrorVisibility>(), Ok(ErrorVisibility::Notify));
        assert!("loud".parse::<ErrorVisibility>().is_err());
    }
}
