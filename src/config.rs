/*
 * Responsibility
 * - 環境変数や設定の読み込み (DATABASE_URL, CORS 許可、Auth 設定など)
 * - 設定値のバリデーション (不足なら起動失敗)
 * - AUTH_ISSUER / AUTH_JWKS_URL は AUTH_DOMAIN から導出 (明示指定があればそちらを優先)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use jsonwebtoken::Algorithm;
use url::Url;

// これ以上の clock skew 許容は設定ミスとみなす
const MAX_LEEWAY_SECONDS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.unwrap_or("development").to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Access Gate が必要とする設定 (issuer / audience / algorithm / JWKS)
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub domain: String,
    pub issuer: String,
    pub audience: String,
    pub algorithm: Algorithm,
    pub jwks_url: Url,
    pub jwks_timeout_seconds: u64,
    // 0 = cache しない (検証のたびに JWKS を取り直す)
    pub jwks_cache_ttl_seconds: u64,
    pub leeway_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub database_max_connections: u32,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub auth: AuthSettings,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// `from_env` の本体。テストから任意の値を差し込めるように lookup を受け取る。
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = var("PORT").and_then(|s| s.parse().ok()).unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url = var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let database_max_connections = var("DATABASE_MAX_CONNECTIONS")
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(5);

        let app_env = AppEnv::parse(var("APP_ENV").as_deref());

        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let auth = Self::auth_from_vars(&var)?;

        Ok(Self {
            addr,
            database_url,
            database_max_connections,
            app_env,
            cors_allowed_origins,
            auth,
        })
    }

    fn auth_from_vars<F>(var: &F) -> Result<AuthSettings, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let domain = var("AUTH_DOMAIN")
            .map(|d| d.trim().trim_end_matches('/').to_string())
            .filter(|d| !d.is_empty())
            .ok_or(ConfigError::Missing("AUTH_DOMAIN"))?;

        let audience = var("AUTH_AUDIENCE")
            .filter(|a| !a.trim().is_empty())
            .ok_or(ConfigError::Missing("AUTH_AUDIENCE"))?;

        let algorithm = match var("AUTH_ALGORITHM") {
            Some(raw) => {
                Algorithm::from_str(raw.trim()).map_err(|_| ConfigError::Invalid("AUTH_ALGORITHM"))?
            }
            None => Algorithm::RS256,
        };
        // 公開鍵 (JWKS) で検証するので対称鍵方式は受け付けない
        if matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(ConfigError::Invalid("AUTH_ALGORITHM"));
        }

        let issuer = var("AUTH_ISSUER").unwrap_or_else(|| format!("https://{}/", domain));

        let jwks_url = match var("AUTH_JWKS_URL") {
            Some(raw) => Url::parse(&raw).map_err(|_| ConfigError::Invalid("AUTH_JWKS_URL"))?,
            None => Url::parse(&format!("https://{}/", domain))
                .and_then(|base| base.join(".well-known/jwks.json"))
                .map_err(|_| ConfigError::Invalid("AUTH_DOMAIN"))?,
        };

        let jwks_timeout_seconds = var("AUTH_JWKS_TIMEOUT_SECONDS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(5);

        let jwks_cache_ttl_seconds = var("AUTH_JWKS_CACHE_TTL_SECONDS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);

        let leeway_seconds = match var("ACCESS_TOKEN_LEEWAY_SECONDS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|n| *n <= MAX_LEEWAY_SECONDS)
                .ok_or(ConfigError::Invalid("ACCESS_TOKEN_LEEWAY_SECONDS"))?,
            None => 0,
        };

        Ok(AuthSettings {
            domain,
            issuer,
            audience,
            algorithm,
            jwks_url,
            jwks_timeout_seconds,
            jwks_cache_ttl_seconds,
            leeway_seconds,
        })
    }
}
