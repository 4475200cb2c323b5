/// Factory: build the `AccessGate` (and its JWKS key source) from application `Config`.
use std::sync::Arc;
use std::time::Duration;

use crate::config::AuthSettings;
use crate::services::auth::AccessGate;
use crate::services::auth::jwks::{CachedJwks, HttpJwks, JwksError, KeySource};

pub fn build_access_gate(settings: &AuthSettings) -> Result<Arc<AccessGate>, JwksError> {
    let http = HttpJwks::new(
        settings.jwks_url.clone(),
        Duration::from_secs(settings.jwks_timeout_seconds),
    )?;

    // TTL 0 なら毎回取り直す
    let keys: Arc<dyn KeySource> = if settings.jwks_cache_ttl_seconds > 0 {
        Arc::new(CachedJwks::new(
            http,
            Duration::from_secs(settings.jwks_cache_ttl_seconds),
        ))
    } else {
        Arc::new(http)
    };

    tracing::info!(
        domain = %settings.domain,
        jwks_url = %settings.jwks_url,
        issuer = %settings.issuer,
        algorithm = ?settings.algorithm,
        jwks_cache_ttl_seconds = settings.jwks_cache_ttl_seconds,
        "access gate configured"
    );

    Ok(Arc::new(AccessGate::new(keys, settings)))
}
