//! Test helpers: RSA fixtures, token minting and an `AccessGate` wired to
//! in-memory keys.
use std::sync::Arc;

use async_trait::async_trait;
use jsonwebtoken::jwk::{Jwk, JwkSet};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::{Value, json};
use url::Url;

use crate::config::AuthSettings;
use crate::repos::memory::MemoryDrinkRepo;
use crate::services::auth::AccessGate;
use crate::services::auth::jwks::{JwksError, KeySource};
use crate::state::AppState;

pub const KID: &str = "test-key-1";
pub const ISSUER: &str = "https://coffee.test.auth0.com/";
pub const AUDIENCE: &str = "drinks";
pub const SUBJECT: &str = "auth0|barista";

const PRIVATE_PEM: &str = include_str!("../tests/fixtures/rsa_private.pem");
const OTHER_PRIVATE_PEM: &str = include_str!("../tests/fixtures/rsa_other_private.pem");
const PUBLIC_JWK: &str = include_str!("../tests/fixtures/rsa_public.jwk.json");

pub fn signing_key() -> EncodingKey {
    EncodingKey::from_rsa_pem(PRIVATE_PEM.as_bytes()).unwrap()
}

pub fn other_signing_key() -> EncodingKey {
    EncodingKey::from_rsa_pem(OTHER_PRIVATE_PEM.as_bytes()).unwrap()
}

pub fn public_jwks() -> JwkSet {
    let jwk: Jwk = serde_json::from_str(PUBLIC_JWK).unwrap();
    JwkSet { keys: vec![jwk] }
}

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

pub fn settings() -> AuthSettings {
    AuthSettings {
        domain: "coffee.test.auth0.com".to_string(),
        issuer: ISSUER.to_string(),
        audience: AUDIENCE.to_string(),
        algorithm: Algorithm::RS256,
        jwks_url: Url::parse("https://coffee.test.auth0.com/.well-known/jwks.json").unwrap(),
        jwks_timeout_seconds: 1,
        jwks_cache_ttl_seconds: 0,
        leeway_seconds: 0,
    }
}

/// Key source that always returns the fixture key set.
pub struct StaticKeys(pub Arc<JwkSet>);

#[async_trait]
impl KeySource for StaticKeys {
    fn backend_name(&self) -> &'static str {
        "static"
    }

    async fn fetch(&self) -> Result<Arc<JwkSet>, JwksError> {
        Ok(self.0.clone())
    }
}

/// Key source whose endpoint is "down".
pub struct FailingKeys;

#[async_trait]
impl KeySource for FailingKeys {
    fn backend_name(&self) -> &'static str {
        "failing"
    }

    async fn fetch(&self) -> Result<Arc<JwkSet>, JwksError> {
        Err(JwksError::NoKeys)
    }
}

pub fn gate() -> AccessGate {
    gate_with(Arc::new(StaticKeys(Arc::new(public_jwks()))))
}

pub fn gate_with(keys: Arc<dyn KeySource>) -> AccessGate {
    AccessGate::new(keys, &settings())
}

pub fn app_state() -> AppState {
    AppState::new(Arc::new(MemoryDrinkRepo::default()), Arc::new(gate()))
}

/// Valid claims for the test issuer/audience, good for one hour.
pub fn claims(permissions: &[&str]) -> Value {
    json!({
        "iss": ISSUER,
        "aud": AUDIENCE,
        "sub": SUBJECT,
        "iat": now(),
        "exp": now() + 3600,
        "permissions": permissions,
    })
}

pub fn sign_with(claims: &Value, kid: Option<&str>, key: &EncodingKey) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = kid.map(String::from);
    jsonwebtoken::encode(&header, claims, key).unwrap()
}

pub fn sign(claims: &Value) -> String {
    sign_with(claims, Some(KID), &signing_key())
}

pub fn token(permissions: &[&str]) -> String {
    sign(&claims(permissions))
}
