use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use shai_history::DEFAULT_SCOPE;
use shai_utils::parse::sanitize_scope;

/// Header a client uses to keep its history apart from everyone else's.
pub const CLIENT_ID_HEADER: &str = "x-client-id";

/// History scope resolved from the `X-Client-Id` header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientScope(String);

impl ClientScope {
    pub fn from_header(raw: Option<&str>) -> Self {
        let scope = raw
            .and_then(sanitize_scope)
            .unwrap_or_else(|| DEFAULT_SCOPE.to_owned());
        Self(scope)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for ClientScope
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(CLIENT_ID_HEADER)
            .and_then(|value| value.to_str().ok());

        Ok(Self::from_header(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_unusable_header_falls_back_to_shared() {
        assert_eq!(ClientScope::from_header(None).as_str(), DEFAULT_SCOPE);
        assert_eq!(ClientScope::from_header(Some("///")).as_str(), DEFAULT_SCOPE);
    }

    #[test]
    fn header_is_sanitized() {
        assert_eq!(ClientScope::from_header(Some(" tab-42 ")).as_str(), "tab-42");
        assert_eq!(ClientScope::from_header(Some("a:b")).as_str(), "ab");
    }
}
