//! Request authentication middleware.
//!
//! Reads the credential from the `jwt` cookie, falling back to an
//! `Authorization: Bearer` header, and attaches the resulting
//! [`TenantContext`] to the request. Handlers behind this layer read the
//! tenant with `Extension<TenantContext>`; nothing else writes it.

use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::CookieJar;
use carelink_auth::{CREDENTIAL_COOKIE, TenantContext};
use surrealdb::Connection;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn require_staff<C: Connection>(
    State(state): State<AppState<C>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = presented_credential(&jar, request.headers());
    let ctx: TenantContext = state.authenticator.authenticate(token.as_deref())?;
    debug!(hospital_id = %ctx.hospital_id, "Request authenticated");

    request.extensions_mut().insert(ctx);
    Ok(next.run(request).await)
}

/// The credential carried by the request, cookie first.
fn presented_credential(jar: &CookieJar, headers: &HeaderMap) -> Option<String> {
    if let Some(cookie) = jar.get(CREDENTIAL_COOKIE) {
        return Some(cookie.value().to_string());
    }
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(pairs: &[(header::HeaderName, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(name.clone(), HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn cookie_wins_over_bearer() {
        let h = headers(&[
            (header::COOKIE, "theme=dark; jwt=from-cookie"),
            (header::AUTHORIZATION, "Bearer from-header"),
        ]);
        let jar = CookieJar::from_headers(&h);
        assert_eq!(
            presented_credential(&jar, &h).as_deref(),
            Some("from-cookie")
        );
    }

    #[test]
    fn bearer_header_is_a_fallback() {
        let h = headers(&[(header::AUTHORIZATION, "Bearer from-header")]);
        let jar = CookieJar::from_headers(&h);
        assert_eq!(
            presented_credential(&jar, &h).as_deref(),
            Some("from-header")
        );
    }

    #[test]
    fn other_schemes_are_ignored() {
        let h = headers(&[(header::AUTHORIZATION, "Basic YWxpY2U6cHc=")]);
        let jar = CookieJar::from_headers(&h);
        assert_eq!(presented_credential(&jar, &h), None);
    }
}
