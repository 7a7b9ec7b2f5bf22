//! Locale routing for the bookstore storefront.
//!
//! Every request is routed into a supported locale (`/en/...`, `/es/...`)
//! before it reaches a page, and pages read their display strings from the
//! matching dictionary.

pub mod config;
pub mod i18n;
pub mod middleware;
pub mod security;
pub mod server;
