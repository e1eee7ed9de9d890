use serde::Deserialize;

use crate::models::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    Author,
    #[default]
    Reader,
}

impl From<String> for Role {
    fn from(role: String) -> Self {
        match role.trim().to_ascii_lowercase().as_str() {
            "author" => Role::Author,
            _ => Role::Reader,
        }
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(role) => Role::from(role),
            _ => Role::Reader,
        })
    }
}

/// Identity read from the session token. Unverified: only good for UI gating.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawClaims")]
pub struct Claims {
    pub id: UserId,
    pub role: Role,
    pub exp: Option<i64>,
}

impl Claims {
    #[inline]
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp.is_some_and(|exp| exp < now)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(UserId),
    Text(String),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawClaims {
    id: Option<RawId>,
    user_id: Option<RawId>,
    sub: Option<RawId>,
    #[serde(default)]
    role: Role,
    exp: Option<i64>,
}

impl TryFrom<RawClaims> for Claims {
    type Error = ClaimsError;

    fn try_from(raw: RawClaims) -> Result<Self, Self::Error> {
        let id = [raw.id, raw.user_id, raw.sub]
            .into_iter()
            .flatten()
            .find_map(|id| match id {
                RawId::Number(id) => Some(id),
                RawId::Text(text) => text.trim().parse().ok(),
            })
            .ok_or(ClaimsError::MissingId)?;

        Ok(Self {
            id,
            role: raw.role,
            exp: raw.exp,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClaimsError {
    #[error("token is not a JWT")]
    Malformed,

    #[error("token payload is not base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("token payload is not valid claims: {0}")]
    Json(#[from] serde_json::Error),

    #[error("token carries no user id")]
    MissingId,

    #[error("token has expired")]
    Expired,
}

fn decode_jwt_payload(token: &str) -> Result<Vec<u8>, ClaimsError> {
    let payload = token.split('.').nth(1).ok_or(ClaimsError::Malformed)?;
    Ok(base64::decode_config(
        payload.trim_end_matches('='),
        base64::URL_SAFE_NO_PAD,
    )?)
}

/// Reads the claims out of a bearer token without checking its signature.
#[tracing::instrument(skip(token))]
pub fn decode_claims(token: &str) -> Result<Claims, ClaimsError> {
    let claims: Claims = serde_json::from_slice(&decode_jwt_payload(token)?)?;
    if claims.is_expired_at(chrono::Utc::now().timestamp()) {
        return Err(ClaimsError::Expired);
    }
    Ok(claims)
}

#[cfg(test)]
pub(crate) fn encode_test_token(payload: serde_json::Value) -> String {
    format!(
        "eyJhbGciOiJIUzI1NiJ9.{}.signature",
        base64::encode_config(payload.to_string(), base64::URL_SAFE_NO_PAD)
    )
}
