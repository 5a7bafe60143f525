//! Rate limiting middleware using governor and `tower_governor`.
//!
//! Limits are per client IP and configured through
//! [`RateLimitConfig`](crate::config::RateLimitConfig).

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::extract::ConnectInfo;
use axum::http::Request;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use tower_governor::{GovernorError, GovernorLayer, governor::GovernorConfigBuilder};

use crate::config::RateLimitConfig;

// =============================================================================
// Client IP Key Extractor
// =============================================================================

/// Key extractor that prefers proxy headers and falls back to the peer address.
///
/// Order: first `X-Forwarded-For` entry, `X-Real-IP`, then the socket peer
/// from `ConnectInfo`.
#[derive(Clone, Copy)]
pub struct ClientIpKeyExtractor;

impl tower_governor::key_extractor::KeyExtractor for ClientIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        let headers = req.headers();

        if let Some(ip) = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.split(',').next())
            .and_then(|s| s.trim().parse::<IpAddr>().ok())
        {
            return Ok(ip);
        }

        if let Some(ip) = headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<IpAddr>().ok())
        {
            return Ok(ip);
        }

        req.extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip())
            .ok_or(GovernorError::UnableToExtractKey)
    }
}

// =============================================================================
// Rate Limiter Configuration
// =============================================================================

/// Rate limiter layer type for Axum.
pub type RateLimiterLayer =
    GovernorLayer<ClientIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Create the store's rate limiter.
///
/// # Panics
///
/// Panics if `per_second` or `burst_size` is zero. `StorefrontConfig::from_env`
/// rejects both.
#[must_use]
pub fn rate_limiter(config: RateLimitConfig) -> RateLimiterLayer {
    let governor = GovernorConfigBuilder::default()
        .key_extractor(ClientIpKeyExtractor)
        .per_second(config.per_second)
        .burst_size(config.burst_size)
        .finish()
        .expect("rate limiter config requires non-zero per_second and burst_size");
    GovernorLayer::new(Arc::new(governor))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tower_governor::key_extractor::KeyExtractor;

    use super::*;

    fn extract(request: &Request<()>) -> Result<IpAddr, GovernorError> {
        ClientIpKeyExtractor.extract(request)
    }

    #[test]
    fn test_forwarded_for_first_hop() {
        let request = Request::builder()
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .body(())
            .unwrap();
        assert_eq!(extract(&request).unwrap().to_string(), "203.0.113.7");
    }

    #[test]
    fn test_real_ip_header() {
        let request = Request::builder()
            .header("x-real-ip", "198.51.100.2")
            .body(())
            .unwrap();
        assert_eq!(extract(&request).unwrap().to_string(), "198.51.100.2");
    }

    #[test]
    fn test_connect_info_fallback() {
        let mut request = Request::builder().body(()).unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 0, 2, 9], 5000))));
        assert_eq!(extract(&request).unwrap().to_string(), "192.0.2.9");
    }

    #[test]
    fn test_no_source_fails() {
        let request = Request::builder().body(()).unwrap();
        assert!(extract(&request).is_err());
    }

    #[test]
    fn test_rate_limiter_builds_from_defaults() {
        let _layer = rate_limiter(RateLimitConfig::default());
    }
}
