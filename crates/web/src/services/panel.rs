//! Shared result and presentation types for the third-party data adapters.
//!
//! Both the weather and market adapters return `Result<_, FetchError>`. Pages
//! turn that into a [`Panel`], which has exactly one way to render each of the
//! ready, empty and failed outcomes.

use thiserror::Error;

/// Failure of an outbound data fetch.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The adapter lacks the credentials it needs.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    /// The request never produced a response (DNS, connect, timeout).
    #[error("request failed: {0}")]
    Transport(String),

    /// The provider answered with a non-success status.
    #[error("provider returned HTTP {status}")]
    Status { status: u16 },

    /// The body could not be decoded.
    #[error("unreadable response: {0}")]
    Parse(String),

    /// The market response had no `records` array.
    #[error("response is missing the records array")]
    MissingRecords,
}

impl FetchError {
    /// Whether reloading the page could plausibly succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        !matches!(self, Self::NotConfigured(_))
    }

    /// Translation key of the message shown to the user.
    #[must_use]
    pub const fn message_key(&self) -> &'static str {
        match self {
            Self::NotConfigured(_) => "error.notConfigured",
            Self::Transport(_) => "error.unreachable",
            Self::Status { .. } | Self::Parse(_) | Self::MissingRecords => "error.badResponse",
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status {
                status: status.as_u16(),
            }
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Presentation state of one data panel.
#[derive(Debug, Clone)]
pub enum Panel<T> {
    /// Data to render.
    Ready(T),
    /// The provider answered but had nothing to show.
    Empty,
    /// The fetch failed.
    Failed(FetchError),
}

impl<T> Panel<T> {
    /// Build a panel from a list-valued fetch, mapping an empty list to
    /// [`Panel::Empty`].
    pub fn from_list<U>(result: Result<Vec<U>, FetchError>, f: impl FnOnce(Vec<U>) -> T) -> Self {
        match result {
            Ok(items) if items.is_empty() => Self::Empty,
            Ok(items) => Self::Ready(f(items)),
            Err(err) => Self::Failed(err),
        }
    }

    #[must_use]
    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    #[must_use]
    pub const fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Whether the failure card should offer a retry link.
    #[must_use]
    pub const fn can_retry(&self) -> bool {
        match self {
            Self::Failed(err) => err.is_retryable(),
            _ => false,
        }
    }

    /// What to render in place of data.
    #[must_use]
    pub const fn status(&self) -> PanelStatus {
        PanelStatus {
            empty: self.is_empty(),
            message_key: match self {
                Self::Failed(err) => Some(err.message_key()),
                _ => None,
            },
            retry: self.can_retry(),
        }
    }
}

/// Template-facing summary of a panel that has no data to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelStatus {
    pub empty: bool,
    /// Translation key of the failure message.
    pub message_key: Option<&'static str>,
    pub retry: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_list_empty() {
        let panel: Panel<usize> = Panel::from_list(Ok(Vec::<u8>::new()), |v| v.len());
        assert!(panel.is_empty());
        assert!(panel.ready().is_none());
    }

    #[test]
    fn test_from_list_ready() {
        let panel = Panel::from_list(Ok(vec![1, 2, 3]), |v| v.len());
        assert_eq!(panel.ready(), Some(&3));
    }

    #[test]
    fn test_not_configured_has_no_retry() {
        let panel: Panel<()> =
            Panel::from_list(Err::<Vec<u8>, _>(FetchError::NotConfigured("weather")), |_| ());
        assert!(panel.error().is_some());
        assert!(!panel.can_retry());
    }

    #[test]
    fn test_status_failure_can_retry() {
        let panel: Panel<()> = Panel::Failed(FetchError::Status { status: 500 });
        assert!(panel.can_retry());
        assert_eq!(
            panel.error().map(FetchError::message_key),
            Some("error.badResponse")
        );
    }

    #[test]
    fn test_status_of_each_state() {
        let ready = Panel::Ready(1).status();
        assert!(!ready.empty && ready.message_key.is_none());

        assert!(Panel::<()>::Empty.status().empty);

        let failed = Panel::<()>::Failed(FetchError::NotConfigured("weather")).status();
        assert_eq!(failed.message_key, Some("error.notConfigured"));
        assert!(!failed.retry);
    }
}
