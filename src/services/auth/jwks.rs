//! Signing key source (JWKS).
//!
//! The gate resolves the token's `kid` against whatever `KeySource::fetch`
//! returns. `HttpJwks` fetches on every call; wrap it in `CachedJwks` to keep
//! the last good key set for a while.
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use thiserror::Error;
use tokio::sync::RwLock;
use url::Url;

#[derive(Debug, Error)]
pub enum JwksError {
    #[error("jwks request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("jwks endpoint returned no keys")]
    NoKeys,
}

/// Where the gate gets its verification keys from.
///
/// Implementations must be cheap to share (`Arc<dyn KeySource>`).
#[async_trait]
pub trait KeySource: Send + Sync {
    // Returns the backend name (for logging).
    fn backend_name(&self) -> &'static str;

    async fn fetch(&self) -> Result<Arc<JwkSet>, JwksError>;
}

/// Fetches `{keys: [...]}` from a well-known JWKS endpoint.
#[derive(Clone, Debug)]
pub struct HttpJwks {
    client: reqwest::Client,
    url: Url,
}

impl HttpJwks {
    pub fn new(url: Url, timeout: Duration) -> Result<Self, JwksError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl KeySource for HttpJwks {
    fn backend_name(&self) -> &'static str {
        "http"
    }

    async fn fetch(&self) -> Result<Arc<JwkSet>, JwksError> {
        let jwks = self
            .client
            .get(self.url.clone())
            .send()
            .await?
            .error_for_status()?
            .json::<JwkSet>()
            .await?;

        if jwks.keys.is_empty() {
            return Err(JwksError::NoKeys);
        }

        tracing::debug!(url = %self.url, keys = jwks.keys.len(), "fetched jwks");
        Ok(Arc::new(jwks))
    }
}

/// Keeps the last successfully fetched key set for `ttl`.
///
/// Failed fetches are never cached.
pub struct CachedJwks<S> {
    inner: S,
    ttl: Duration,
    slot: RwLock<Option<(Instant, Arc<JwkSet>)>>,
}

impl<S: KeySource> CachedJwks<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            slot: RwLock::new(None),
        }
    }

    async fn fresh(&self) -> Option<Arc<JwkSet>> {
        let slot = self.slot.read().await;
        slot.as_ref()
            .filter(|(fetched_at, _)| fetched_at.elapsed() < self.ttl)
            .map(|(_, keys)| keys.clone())
    }
}

#[async_trait]
impl<S: KeySource> KeySource for CachedJwks<S> {
    fn backend_name(&self) -> &'static str {
        self.inner.backend_name()
    }

    async fn fetch(&self) -> Result<Arc<JwkSet>, JwksError> {
        if let Some(keys) = self.fresh().await {
            return Ok(keys);
        }

        let keys = self.inner.fetch().await?;
        *self.slot.write().await = Some((Instant::now(), keys.clone()));

        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::{Json, Router, http::StatusCode, routing::get};
    use serde_json::json;

    use super::*;
    use crate::test_support;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn source(base: &str) -> HttpJwks {
        source_with_timeout(base, Duration::from_secs(2))
    }

    fn source_with_timeout(base: &str, timeout: Duration) -> HttpJwks {
        let url = Url::parse(&format!("{}/.well-known/jwks.json", base)).unwrap();
        HttpJwks::new(url, timeout).unwrap()
    }

    #[tokio::test]
    async fn http_source_fetches_key_set() {
        let jwks = test_support::public_jwks();
        let app = Router::new().route(
            "/.well-known/jwks.json",
            get(move || {
                let jwks = jwks.clone();
                async move { Json(jwks) }
            }),
        );
        let base = serve(app).await;

        let keys = source(&base).fetch().await.unwrap();
        assert!(keys.find(test_support::KID).is_some());
    }

    #[tokio::test]
    async fn http_source_rejects_error_status_and_empty_sets() {
        let app = Router::new()
            .route(
                "/.well-known/jwks.json",
                get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
            )
            .route("/empty/.well-known/jwks.json", get(|| async { Json(json!({ "keys": [] })) }));
        let base = serve(app).await;

        let err = source(&base).fetch().await.unwrap_err();
        assert!(matches!(err, JwksError::Http(_)));

        let err = source(&format!("{}/empty", base)).fetch().await.unwrap_err();
        assert!(matches!(err, JwksError::NoKeys));
    }

    #[tokio::test]
    async fn http_source_fails_when_unreachable() {
        let err = source("http://127.0.0.1:1").fetch().await.unwrap_err();
        assert!(matches!(err, JwksError::Http(_)));
    }

    #[tokio::test]
    async fn http_source_gives_up_after_timeout() {
        let app = Router::new().route(
            "/.well-known/jwks.json",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Json(test_support::public_jwks())
            }),
        );
        let base = serve(app).await;

        let started = Instant::now();
        let err = source_with_timeout(&base, Duration::from_millis(100))
            .fetch()
            .await
            .unwrap_err();

        assert!(matches!(&err, JwksError::Http(e) if e.is_timeout()), "{err:?}");
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    struct Counting {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl KeySource for Counting {
        fn backend_name(&self) -> &'static str {
            "counting"
        }

        async fn fetch(&self) -> Result<Arc<JwkSet>, JwksError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(test_support::public_jwks()))
        }
    }

    #[tokio::test]
    async fn cache_reuses_key_set_within_ttl() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cached = CachedJwks::new(
            Counting {
                calls: calls.clone(),
            },
            Duration::from_secs(60),
        );

        let first = cached.fetch().await.unwrap();
        let second = cached.fetch().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn cache_refetches_after_ttl() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cached = CachedJwks::new(
            Counting {
                calls: calls.clone(),
            },
            Duration::from_millis(20),
        );

        cached.fetch().await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        cached.fetch().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
