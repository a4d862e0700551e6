use crate::api::AppState;
use crate::links;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

/// Userid of the signed-in account, taken from the trusted auth header
///
/// Anonymous requests and malformed userids both yield `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthenticatedUser(pub Option<String>);

impl AuthenticatedUser {
    pub fn userid(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = state.config.auth.user_header.as_str();
        let userid = parts
            .headers
            .get(header)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|userid| links::split_user(userid).is_some())
            .map(str::to_string);

        if userid.is_none() && parts.headers.contains_key(header) {
            tracing::warn!(header = header, "Ignoring malformed authenticated userid");
        }

        Ok(Self(userid))
    }
}
