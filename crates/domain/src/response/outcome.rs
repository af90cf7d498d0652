//! Classified result of a single HTTP attempt.

use serde_json::Value;

/// HTTP 401, the only status that triggers a token refresh.
pub const UNAUTHORIZED: u16 = 401;

/// Outcome of exactly one HTTP attempt.
///
/// `Unauthorized` is kept apart from `Failed`: it is the trigger for the
/// refresh-and-retry path and must never be folded into a generic error.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseOutcome<T> {
    /// 2xx response with its decoded payload.
    Ok(T),
    /// 401 response, whatever the body said.
    Unauthorized,
    /// Any other non-success status.
    Failed {
        /// HTTP status code
        status: u16,
        /// Best-effort JSON body; absent when it could not be parsed
        body: Option<Value>,
    },
}

impl<T> ResponseOutcome<T> {
    /// Classifies a status code whose success payload is already known.
    pub fn from_status(status: u16, success: impl FnOnce() -> T, body: Option<Value>) -> Self {
        if status == UNAUTHORIZED {
            Self::Unauthorized
        } else if (200..300).contains(&status) {
            Self::Ok(success())
        } else {
            Self::Failed { status, body }
        }
    }

    /// Returns true for a 2xx outcome.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Returns true for a 401 outcome.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Maps the success payload.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ResponseOutcome<U> {
        match self {
            Self::Ok(value) => ResponseOutcome::Ok(f(value)),
            Self::Unauthorized => ResponseOutcome::Unauthorized,
            Self::Failed { status, body } => ResponseOutcome::Failed { status, body },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unauthorized_ignores_body() {
        let outcome = ResponseOutcome::from_status(401, || 1, Some(json!({"detail": "x"})));
        assert!(outcome.is_unauthorized());
    }

    #[test]
    fn test_success_range() {
        assert!(ResponseOutcome::from_status(200, || 1, None).is_ok());
        assert!(ResponseOutcome::from_status(204, || 1, None).is_ok());
    }

    #[test]
    fn test_failed_keeps_status_and_body() {
        let outcome: ResponseOutcome<i32> =
            ResponseOutcome::from_status(500, || 1, Some(json!({"error": "server"})));
        assert_eq!(
            outcome,
            ResponseOutcome::Failed {
                status: 500,
                body: Some(json!({"error": "server"})),
            }
        );
    }

    #[test]
    fn test_map_preserves_classification() {
        let outcome: ResponseOutcome<i32> = ResponseOutcome::Unauthorized;
        assert!(outcome.map(|v| v * 2).is_unauthorized());
        assert_eq!(ResponseOutcome::Ok(2).map(|v| v * 2), ResponseOutcome::Ok(4));
    }
}
