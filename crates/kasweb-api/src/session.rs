//! Browser session and route guards
//!
//! The token and user profile live in one `HttpOnly` cookie holding
//! URL-encoded JSON. Nothing is stored server-side; a cookie that does not
//! decode is treated as no session.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use kasweb_client::BackendClient;
use kasweb_config::SessionConfig;
use kasweb_core::access::{self, Action};
use kasweb_core::{Role, User};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

use crate::error::{ApiError, ApiResult, SessionExpired};
use crate::{is_htmx_request, AppState};

/// What the session cookie carries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    pub token: String,
    pub user: User,
}

/// Session of the current request; empty for guests
#[derive(Debug, Clone, Default)]
pub struct Session {
    data: Option<SessionData>,
}

impl Session {
    pub fn new(data: SessionData) -> Self {
        Self { data: Some(data) }
    }

    pub fn guest() -> Self {
        Self::default()
    }

    pub fn is_signed_in(&self) -> bool {
        self.data.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.data.as_ref().map(|d| &d.user)
    }

    pub fn token(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.token.as_str())
    }

    /// Role used for menus and guards; guests without a session
    pub fn role(&self) -> Role {
        self.user().map(|u| u.role).unwrap_or(Role::Guest)
    }

    pub fn display_name(&self) -> &str {
        self.user().map(|u| u.name.as_str()).unwrap_or("Guest")
    }

    pub fn can(&self, action: Action) -> bool {
        access::can(action, self.role())
    }

    /// Refuse the request unless the role allows `action`
    pub fn require(&self, action: Action) -> ApiResult<()> {
        match access::check_action(action, self.role(), self.is_signed_in()) {
            access::Access::Allow => Ok(()),
            access::Access::Login => Err(ApiError::Unauthorized),
            access::Access::Denied => Err(ApiError::Forbidden),
        }
    }

    /// Backend client acting on behalf of this session
    pub fn client(&self, state: &AppState) -> BackendClient {
        match self.token() {
            Some(token) => state.client.with_token(token),
            None => state.client.clone(),
        }
    }
}

/// Serialize session data into a cookie value
pub fn encode_session(data: &SessionData) -> String {
    let json = serde_json::to_string(data).unwrap_or_default();
    urlencoding::encode(&json).into_owned()
}

/// Parse a cookie value; anything malformed yields `None`
pub fn decode_session(value: &str) -> Option<SessionData> {
    let json = urlencoding::decode(value).ok()?;
    match serde_json::from_str::<SessionData>(&json) {
        Ok(data) if !data.token.is_empty() => Some(data),
        Ok(_) => None,
        Err(e) => {
            log::debug!("Ignoring malformed session cookie: {}", e);
            None
        }
    }
}

/// Value of the named cookie among all `Cookie` headers
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

/// `Set-Cookie` value storing the session
pub fn session_cookie(config: &SessionConfig, data: &SessionData) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        config.cookie_name,
        encode_session(data),
        config.max_age_hours * 3600
    );
    if config.secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value removing the session
pub fn clear_cookie(config: &SessionConfig) -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", config.cookie_name)
}

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let data = read_cookie(&parts.headers, &state.config.session.cookie_name).and_then(decode_session);
        Ok(Session { data })
    }
}

/// Guard layer applied to every route
///
/// Checks the path against the access table before the handler runs. On the
/// way out it drops the cookie of an expired session and, for HTMX requests,
/// turns `303` redirects into `HX-Redirect` so the whole page navigates.
pub async fn guard(
    State(state): State<AppState>,
    session: Session,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let htmx = is_htmx_request(request.headers());

    let decision = access::check_path(&path, session.role(), session.is_signed_in());
    let mut response = match decision.redirect_target() {
        Some(target) => {
            log::info!(
                "Refused {} for role {} ({:?}), redirecting to {}",
                path,
                session.role(),
                decision,
                target
            );
            Redirect::to(target).into_response()
        }
        None => next.run(request).await,
    };

    if response.extensions().get::<SessionExpired>().is_some() {
        if let Ok(value) = HeaderValue::from_str(&clear_cookie(&state.config.session)) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }

    if htmx && response.status() == StatusCode::SEE_OTHER {
        if let Some(location) = response.headers_mut().remove(header::LOCATION) {
            *response.status_mut() = StatusCode::OK;
            response.headers_mut().insert("hx-redirect", location);
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SessionData {
        SessionData {
            token: "eyJhbGciOi.payload.sig".to_string(),
            user: User {
                id: "u1".to_string(),
                name: "Bendahara GKJW".to_string(),
                email: "admin@gkjw.com".to_string(),
                role: Role::Admin,
                created_at: String::new(),
            },
        }
    }

    #[test]
    fn test_session_cookie_round_trip() {
        let encoded = encode_session(&sample());
        assert!(!encoded.contains(';'));
        assert!(!encoded.contains(' '));
        assert_eq!(decode_session(&encoded), Some(sample()));
    }

    #[test]
    fn test_garbage_cookie_is_no_session() {
        assert!(decode_session("not-json").is_none());
        assert!(decode_session("%7B%22token%22%3A%22%22%7D").is_none());
        assert!(decode_session("%E0%A4%A").is_none());
    }

    #[test]
    fn test_read_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark; kasweb_session=abc; x=1"));
        assert_eq!(read_cookie(&headers, "kasweb_session"), Some("abc"));
        assert_eq!(read_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_cookie_attributes() {
        let mut config = SessionConfig::default();
        let cookie = session_cookie(&config, &sample());
        assert!(cookie.starts_with("kasweb_session="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=86400"));
        assert!(!cookie.contains("Secure"));

        config.secure = true;
        assert!(session_cookie(&config, &sample()).ends_with("; Secure"));
        assert!(clear_cookie(&config).contains("Max-Age=0"));
    }

    #[test]
    fn test_session_role_and_actions() {
        let guest = Session::guest();
        assert_eq!(guest.role(), Role::Guest);
        assert_eq!(guest.display_name(), "Guest");
        assert!(matches!(guest.require(Action::Approve), Err(ApiError::Unauthorized)));

        let mut member = sample();
        member.user.role = Role::Member;
        let member = Session::new(member);
        assert!(!member.can(Action::Approve));
        assert!(matches!(member.require(Action::EditTransaction), Err(ApiError::Forbidden)));

        let admin = Session::new(sample());
        assert!(admin.require(Action::Reject).is_ok());
    }
}
