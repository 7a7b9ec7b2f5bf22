//! Locale routing middleware.
//!
//! Runs in front of every route. Exempt requests pass straight through.
//! Localized requests are checked by the admin route guard, annotated with
//! the resolved locale and forwarded. Everything else is redirected to its
//! localized path.

use axum::{
    extract::{Request, State},
    http::{header::ACCEPT_LANGUAGE, HeaderName, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::{debug, info};

use crate::i18n::{Locale, LocaleDecision, RequestPath};
use crate::security::has_admin_session;
use crate::server::AppState;

/// Original request path, forwarded to handlers on localized requests.
pub const X_PATHNAME: HeaderName = HeaderName::from_static("x-pathname");

pub async fn locale_routing(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    // Non-ASCII fragments are decoded lossily so they only fail to match.
    let accept_language = request
        .headers()
        .get(ACCEPT_LANGUAGE)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());

    let decision = state.resolver.resolve(&path, accept_language.as_deref());
    state.metrics.record_decision(&decision);

    match decision {
        LocaleDecision::Proceed { locale: None } => next.run(request).await,
        LocaleDecision::Proceed {
            locale: Some(locale),
        } => {
            let has_session = has_admin_session(request.headers(), state.admin_token.as_deref());
            if let Some(target) = admin_redirect(&locale, &path, has_session) {
                state.metrics.record_admin_redirect();
                info!("Admin guard redirecting {} to {}", path, target);
                return Redirect::temporary(&target).into_response();
            }

            if let Ok(value) = HeaderValue::from_str(&path) {
                request.headers_mut().insert(X_PATHNAME, value);
            }
            request.extensions_mut().insert(locale);
            next.run(request).await
        }
        LocaleDecision::Redirect {
            location,
            locale,
            matched,
        } => {
            let location = match request.uri().query() {
                Some(query) => format!("{}?{}", location, query),
                None => location,
            };
            debug!(
                "Redirecting {} to {} (locale {}, {:?})",
                path, location, locale, matched
            );
            Redirect::temporary(&location).into_response()
        }
    }
}

/// Admin route guard for a localized path.
///
/// - `/{locale}/admin/panel/...` without a session goes to the login page.
/// - `/{locale}/admin` (the login page) with a session goes to the panel.
pub fn admin_redirect(locale: &Locale, path: &str, has_session: bool) -> Option<String> {
    let path = RequestPath::parse(path);
    let rest = match path.segments() {
        [first, rest @ ..] if *first == locale.code() => rest,
        _ => return None,
    };

    match rest {
        ["admin"] if has_session => Some(format!("/{}/admin/panel", locale)),
        ["admin", "panel", ..] if !has_session => Some(format!("/{}/admin", locale)),
        _ => None,
    }
}
