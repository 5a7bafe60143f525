//! Tracing subscriber and Sentry setup for the storefront binary.
//!
//! Sentry must be initialized before the subscriber so the Sentry tracing
//! layer has a client to report to.

use std::borrow::Cow;

use secrecy::ExposeSecret;
use sentry::integrations::tracing::{self as sentry_tracing, EventFilter};
use tracing::{Level, Metadata};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::SentryConfig;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "pixel_store_storefront=info,tower_http=debug";

/// Start the Sentry client if a DSN is configured.
///
/// The returned guard flushes pending events on drop and must be held for the
/// life of the process.
#[must_use]
pub fn init_sentry(config: &SentryConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.dsn.as_ref()?;

    let options = sentry::ClientOptions {
        release: sentry::release_name!(),
        environment: config.environment.clone().map(Cow::Owned),
        sample_rate: config.sample_rate,
        traces_sample_rate: config.traces_sample_rate,
        attach_stacktrace: true,
        ..Default::default()
    };
    Some(sentry::init((dsn.expose_secret(), options)))
}

/// Route warnings and errors to Sentry events, info and debug to breadcrumbs.
#[must_use]
pub fn sentry_event_filter(metadata: &Metadata<'_>) -> EventFilter {
    match *metadata.level() {
        Level::ERROR | Level::WARN => EventFilter::Event,
        Level::INFO | Level::DEBUG => EventFilter::Breadcrumb,
        _ => EventFilter::Ignore,
    }
}

/// Install the global subscriber: `RUST_LOG` (or [`DEFAULT_LOG_FILTER`]),
/// a fmt layer, and the Sentry layer.
///
/// # Errors
///
/// Returns an error if a global subscriber is already set.
pub fn init_tracing() -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .try_init()
}
