//! HTTP server: shared state, routes and the page context handler.

use anyhow::{Context, Result};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode, Uri},
    middleware,
    routing::get,
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::i18n::{
    Dictionary, DictionaryError, DictionaryLoader, DictionaryValidator, Locale, LocaleResolver,
    LocaleSet, MetricsReport, RequestPath, RoutingMetrics,
};
use crate::middleware::{locale_routing, X_PATHNAME};

/// Shared state for the storefront server.
#[derive(Clone)]
pub struct AppState {
    pub resolver: LocaleResolver,
    pub dictionaries: Arc<DictionaryLoader>,
    pub metrics: Arc<RoutingMetrics>,
    pub admin_token: Option<Arc<str>>,
}

impl AppState {
    /// Build the state for a locale set, loading and validating the
    /// embedded dictionaries. Missing dictionary data fails here, at startup.
    pub fn new(locales: Arc<LocaleSet>, admin_token: Option<String>) -> Result<Self, DictionaryError> {
        let dictionaries = DictionaryLoader::embedded(Arc::clone(&locales))?;
        DictionaryValidator::validate_loader(&dictionaries);

        Ok(Self {
            resolver: LocaleResolver::with_framework_defaults(locales),
            dictionaries: Arc::new(dictionaries),
            metrics: Arc::new(RoutingMetrics::new()),
            admin_token: admin_token.map(Arc::from),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, DictionaryError> {
        Self::new(LocaleSet::standard(), config.admin_token.clone())
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// What a page handler hands to the renderer.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContext {
    pub locale: Locale,
    pub path: String,
    pub site_name: String,
    pub description: String,
    pub alternates: Vec<AlternateLink>,
}

/// Language switcher entry: the current page in another locale.
#[derive(Debug, Serialize)]
pub struct AlternateLink {
    pub locale: String,
    pub label: String,
    pub href: String,
    pub current: bool,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/metrics", get(get_metrics))
        .route("/api/dictionaries/:locale", get(get_dictionary))
        .route("/:lang", get(page))
        .route("/:lang/*rest", get(page))
        // Also reached for `/{locale}/`, which no route pattern matches.
        .fallback(page)
        .layer(middleware::from_fn_with_state(state.clone(), locale_routing))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until Ctrl-C.
pub async fn serve(config: &Config, state: AppState) -> Result<()> {
    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!("✓ Listening on {}", address);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutting down");
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn get_metrics(State(state): State<AppState>) -> Json<MetricsReport> {
    Json(state.metrics.report())
}

async fn get_dictionary(
    State(state): State<AppState>,
    Path(locale): Path<String>,
) -> Json<Dictionary> {
    Json(state.dictionaries.load(&locale).as_ref().clone())
}

async fn page(
    State(state): State<AppState>,
    locale: Option<Extension<Locale>>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Json<PageContext>, StatusCode> {
    // Pages are only served once the middleware accepted a locale prefix.
    let Some(Extension(locale)) = locale else {
        return Err(StatusCode::NOT_FOUND);
    };

    let path = headers
        .get(X_PATHNAME)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_else(|| uri.path())
        .to_string();

    let dictionary = state.dictionaries.load(locale.code());
    let locales = state.resolver.locales();
    let request_path = RequestPath::parse(&path);

    let alternates = locales
        .iter()
        .map(|config| AlternateLink {
            locale: config.code.clone(),
            label: config.native_name.clone(),
            href: request_path.localized_for(&config.code, locales),
            current: config.code == locale.code(),
        })
        .collect();

    Ok(Json(PageContext {
        site_name: dictionary.lookup("siteName").unwrap_or_default().to_string(),
        description: dictionary.lookup("description").unwrap_or_default().to_string(),
        locale,
        path,
        alternates,
    }))
}
