use crate::models::{BookingConflict, CampsiteSuggestion};

/// Everything that can go wrong talking to the booking backend.
///
/// `Api` carries the structured payload the server attaches to business
/// failures (conflicting bookings, alternative suggestions) so callers can
/// show all of it, not just the message.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
        conflicts: Vec<BookingConflict>,
        suggestions: Vec<CampsiteSuggestion>,
    },
}

impl ApiError {
    /// Server error with no structured payload, used when the error body
    /// was missing or not parseable JSON.
    pub fn http_status(status: u16) -> Self {
        ApiError::Api {
            status,
            code: None,
            message: format!("request failed with HTTP {status}"),
            conflicts: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Operator-initiated retry can help for transport failures; config
    /// errors are fatal to the run and server business errors need a
    /// different input, not the same request again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }

    pub fn conflicts(&self) -> &[BookingConflict] {
        match self {
            ApiError::Api { conflicts, .. } => conflicts,
            _ => &[],
        }
    }

    pub fn suggestions(&self) -> &[CampsiteSuggestion] {
        match self {
            ApiError::Api { suggestions, .. } => suggestions,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_fallback_message() {
        let err = ApiError::http_status(502);
        assert_eq!(err.to_string(), "request failed with HTTP 502");
        assert!(err.conflicts().is_empty());
        assert!(err.suggestions().is_empty());
    }

    #[test]
    fn test_only_transport_is_retryable() {
        assert!(!ApiError::Config("missing token".into()).is_retryable());
        assert!(!ApiError::http_status(409).is_retryable());
    }
}
