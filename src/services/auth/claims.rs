use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::services::auth::error::AuthError;

/// Verified access-token payload.
///
/// Only `AccessGate` produces this type, after signature, `exp`, `nbf`, `iss`
/// and `aud` have been checked. Claims other than `sub` / `permissions` are kept
/// as-is in `other`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimSet {
    #[serde(default)]
    pub sub: Option<String>,

    // Missing claim stays `None` so it can be told apart from an empty list.
    #[serde(default)]
    pub permissions: Option<Vec<String>>,

    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl ClaimSet {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.other.get(name)
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions
            .as_deref()
            .is_some_and(|granted| granted.iter().any(|p| p == permission))
    }

    pub fn require_permission(&self, required: &str) -> Result<(), AuthError> {
        if self.permissions.is_none() {
            return Err(AuthError::permissions_missing());
        }
        if !self.has_permission(required) {
            return Err(AuthError::permission_denied());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn claims(value: Value) -> ClaimSet {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn keeps_unknown_claims() {
        let c = claims(json!({
            "sub": "auth0|barista",
            "iss": "https://coffee.eu.auth0.com/",
            "permissions": ["get:drinks-detail"]
        }));

        assert_eq!(c.sub.as_deref(), Some("auth0|barista"));
        assert_eq!(c.get("iss"), Some(&json!("https://coffee.eu.auth0.com/")));
        assert!(c.has_permission("get:drinks-detail"));
        assert!(!c.has_permission("post:drinks"));
    }

    #[test]
    fn permission_check_distinguishes_missing_from_denied() {
        let barista = claims(json!({ "permissions": ["get:drinks-detail"] }));
        assert_eq!(
            barista.require_permission("post:drinks"),
            Err(AuthError::permission_denied())
        );

        let manager = claims(json!({ "permissions": ["post:drinks"] }));
        assert_eq!(manager.require_permission("post:drinks"), Ok(()));

        let nobody = claims(json!({ "sub": "x" }));
        assert_eq!(
            nobody.require_permission("post:drinks"),
            Err(AuthError::permissions_missing())
        );

        let empty = claims(json!({ "permissions": [] }));
        assert_eq!(
            empty.require_permission("post:drinks"),
            Err(AuthError::permission_denied())
        );
    }
}
