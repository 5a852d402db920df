//! Error Kind - Classification of errors
//!
//! [`ErrorKind`] is the single place where an error class is tied to an
//! HTTP status code and a reason phrase.

use serde::Serialize;

/// Error classification shared by every domain crate.
///
/// Each variant maps to exactly one HTTP status code (RFC 9110).
///
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::NotAcceptable.status_code(), 406);
/// assert_eq!(ErrorKind::NotFound.as_str(), "Not Found");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// 400 - malformed or semantically invalid input
    BadRequest,
    /// 401 - missing or rejected credentials
    Unauthorized,
    /// 403 - authenticated but not allowed
    Forbidden,
    /// 404 - resource does not exist (or is not visible to the caller)
    NotFound,
    /// 406 - entitlement missing, e.g. an expired subscription
    NotAcceptable,
    /// 408 - upstream or client timed out
    RequestTimeout,
    /// 409 - conflicts with the current state of the resource
    Conflict,
    /// 422 - well formed but cannot be processed
    UnprocessableEntity,
    /// 429 - rate limited
    TooManyRequests,
    /// 500 - bug or unexpected infrastructure failure
    InternalServerError,
    /// 502 - an upstream dependency answered with garbage
    BadGateway,
    /// 503 - dependency temporarily unavailable
    ServiceUnavailable,
}

impl ErrorKind {
    /// HTTP status code for this kind.
    #[inline]
    pub const fn status_code(&self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::NotAcceptable => 406,
            ErrorKind::RequestTimeout => 408,
            ErrorKind::Conflict => 409,
            ErrorKind::UnprocessableEntity => 422,
            ErrorKind::TooManyRequests => 429,
            ErrorKind::InternalServerError => 500,
            ErrorKind::BadGateway => 502,
            ErrorKind::ServiceUnavailable => 503,
        }
    }

    /// Standard reason phrase.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "Bad Request",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::NotAcceptable => "Not Acceptable",
            ErrorKind::RequestTimeout => "Request Timeout",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::UnprocessableEntity => "Unprocessable Entity",
            ErrorKind::TooManyRequests => "Too Many Requests",
            ErrorKind::InternalServerError => "Internal Server Error",
            ErrorKind::BadGateway => "Bad Gateway",
            ErrorKind::ServiceUnavailable => "Service Unavailable",
        }
    }

    /// 5xx. These are the ones worth an `error!` log line.
    #[inline]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// 4xx.
    #[inline]
    pub const fn is_client_error(&self) -> bool {
        let code = self.status_code();
        code >= 400 && code < 500
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let table = [
            (ErrorKind::BadRequest, 400),
            (ErrorKind::Unauthorized, 401),
            (ErrorKind::Forbidden, 403),
            (ErrorKind::NotFound, 404),
            (ErrorKind::NotAcceptable, 406),
            (ErrorKind::RequestTimeout, 408),
            (ErrorKind::Conflict, 409),
            (ErrorKind::UnprocessableEntity, 422),
            (ErrorKind::TooManyRequests, 429),
            (ErrorKind::InternalServerError, 500),
            (ErrorKind::BadGateway, 502),
            (ErrorKind::ServiceUnavailable, 503),
        ];
        for (kind, code) in table {
            assert_eq!(kind.status_code(), code, "{kind:?}");
        }
    }

    #[test]
    fn test_server_and_client_split() {
        assert!(ErrorKind::NotAcceptable.is_client_error());
        assert!(!ErrorKind::NotAcceptable.is_server_error());
        assert!(ErrorKind::BadGateway.is_server_error());
        assert!(!ErrorKind::InternalServerError.is_client_error());
    }

    #[test]
    fn test_serialize_screaming_snake_case() {
        let json = serde_json::to_string(&ErrorKind::NotAcceptable).unwrap();
        assert_eq!(json, r#""NOT_ACCEPTABLE""#);
    }
}
