use axum::http::{header, HeaderMap};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use service::booking::actor::Actor;
use service::booking::service::BookingPolicyConfig;

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub jwt_secret: String,
}

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: ServerAuthConfig,
    pub policy: BookingPolicyConfig,
}

/// Claims minted by the identity provider. Role capability travels as the
/// optional client/employee ids; a claim set carrying neither (for a
/// non-admin) does not form a valid principal.
#[derive(Debug, Serialize, Deserialize)]
pub struct IdentityClaims {
    pub sub: Uuid,
    #[serde(default)]
    pub client_id: Option<Uuid>,
    #[serde(default)]
    pub employee_id: Option<Uuid>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_banned: bool,
    pub exp: usize,
}

/// Resolve the request principal from `Authorization: Bearer <token>`,
/// falling back to the `auth_token` cookie. Anything missing, expired or
/// unverifiable is the anonymous caller.
pub fn resolve_actor(headers: &HeaderMap, jar: &CookieJar, jwt_secret: &str) -> Option<Actor> {
    let token = bearer_token(headers)
        .or_else(|| jar.get("auth_token").map(|c| c.value().to_string()))?;

    let key = DecodingKey::from_secret(jwt_secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let claims = match decode::<IdentityClaims>(&token, &key, &validation) {
        Ok(data) => data.claims,
        Err(e) => {
            warn!(err = %e, "token validation failed");
            return None;
        }
    };

    match Actor::new(
        claims.sub,
        claims.client_id,
        claims.employee_id,
        claims.is_admin,
        claims.is_banned,
    ) {
        Ok(actor) => Some(actor),
        Err(_) => {
            warn!(subject = %claims.sub, "principal without any role rejected");
            None
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let authz = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    authz.strip_prefix("Bearer ").map(|t| t.to_string())
}
