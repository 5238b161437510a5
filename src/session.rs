use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use chrono::{DateTime, Utc};

use crate::api::client::ApiClient;
use crate::api::types::TokenResponse;
use crate::db::repos::settings;
use crate::db::settings_keys;
use crate::db::DbPool;
use crate::error::AppError;

/// How often the background task re-checks token freshness.
const REFRESH_CHECK_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Refresh when the token expires within this many seconds.
const REFRESH_WINDOW_SECS: i64 = 300;

// ============================================================================
// Pure credential validation
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialError {
    /// No token stored locally.
    Missing,
    /// Not a three-part dot-delimited token, even after quote repair.
    Malformed,
    /// The payload's `exp` claim is in the past.
    Expired,
}

impl From<CredentialError> for AppError {
    fn from(e: CredentialError) -> Self {
        match e {
            CredentialError::Missing => AppError::Unauthenticated,
            CredentialError::Malformed => AppError::MalformedCredential,
            CredentialError::Expired => AppError::ExpiredCredential,
        }
    }
}

/// Outcome of a successful validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedToken {
    pub token: String,
    /// True when a pair of wrapping quotes was stripped; callers should
    /// persist the repaired form.
    pub repaired: bool,
    /// `exp` claim in epoch seconds; None when the payload did not decode.
    pub expires_at: Option<i64>,
}

/// Validate a stored bearer token against the rules the backend enforces:
/// present, three dot-delimited parts (with a one-shot quote-stripping
/// repair), and an unexpired `exp` claim.
///
/// Payload decode failure is deliberately non-fatal: the authoritative
/// check is server-side, so we log and let the request proceed.
pub fn validate(raw: Option<&str>, now: DateTime<Utc>) -> Result<ValidatedToken, CredentialError> {
    let raw = match raw {
        Some(s) if !s.trim().is_empty() => s,
        _ => return Err(CredentialError::Missing),
    };

    let mut token = raw.to_string();
    let mut repaired = false;
    if token.split('.').count() != 3 {
        if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
            token = token[1..token.len() - 1].to_string();
            repaired = true;
            tracing::debug!("Stripped wrapping quotes from stored token");
            if token.split('.').count() != 3 {
                return Err(CredentialError::Malformed);
            }
        } else {
            return Err(CredentialError::Malformed);
        }
    }

    let expires_at = match decode_expiry(&token) {
        Ok(exp) => {
            if exp < now.timestamp() {
                return Err(CredentialError::Expired);
            }
            Some(exp)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Could not decode token payload; deferring to server");
            None
        }
    };

    Ok(ValidatedToken {
        token,
        repaired,
        expires_at,
    })
}

/// Extract the `exp` claim (epoch seconds) from the token's middle segment.
pub fn decode_expiry(token: &str) -> Result<i64, String> {
    let segment = token
        .split('.')
        .nth(1)
        .ok_or_else(|| "missing payload segment".to_string())?;
    let bytes = decode_segment(segment)?;
    let payload: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|e| format!("payload is not JSON: {e}"))?;
    payload
        .get("exp")
        .and_then(|v| v.as_i64())
        .ok_or_else(|| "no exp claim in payload".to_string())
}

/// JWT segments use the URL-safe alphabet and drop padding; tokens that went
/// through other tooling sometimes carry the standard alphabet or padding.
/// Normalize both before decoding.
fn decode_segment(segment: &str) -> Result<Vec<u8>, String> {
    let normalized: String = segment
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect();
    let trimmed = normalized.trim_end_matches('=');
    let padding = (4 - trimmed.len() % 4) % 4;
    let padded = format!("{}{}", trimmed, "=".repeat(padding));
    base64::engine::general_purpose::STANDARD
        .decode(padded)
        .map_err(|e| format!("base64 decode failed: {e}"))
}

// ============================================================================
// Token storage (the desktop analog of browser localStorage)
// ============================================================================

/// Read the stored token, validate it at the current instant, and persist
/// the repaired form when quote-stripping fixed it. This is the single gate
/// every authenticated command passes through before touching the network.
pub fn require_valid(db: &DbPool) -> Result<String, AppError> {
    let stored = settings::get(db, settings_keys::ACCESS_TOKEN)?;
    let validated = validate(stored.as_deref(), Utc::now())?;
    if validated.repaired {
        settings::set(db, settings_keys::ACCESS_TOKEN, &validated.token)?;
    }
    Ok(validated.token)
}

/// Store a token pair after login/register/refresh. A missing refresh token
/// in the response leaves any previously stored one in place.
pub fn store_tokens(db: &DbPool, tokens: &TokenResponse) -> Result<(), AppError> {
    settings::set(db, settings_keys::ACCESS_TOKEN, &tokens.access_token)?;
    if let Some(ref refresh) = tokens.refresh_token {
        settings::set(db, settings_keys::REFRESH_TOKEN, refresh)?;
    }
    Ok(())
}

/// Clear both tokens (logout, or authentication failure during generation).
pub fn clear_tokens(db: &DbPool) -> Result<(), AppError> {
    settings::delete(db, settings_keys::ACCESS_TOKEN)?;
    settings::delete(db, settings_keys::REFRESH_TOKEN)?;
    Ok(())
}

// ============================================================================
// Periodic freshness check
// ============================================================================

/// Spawn the credential freshness loop: every five minutes, refresh the token
/// pair when the access token is missing its margin or already expired.
/// Runs for the lifetime of the app.
pub fn start_refresh_loop(db: DbPool, api: Arc<ApiClient>) {
    tauri::async_runtime::spawn(async move {
        let mut interval = tokio::time::interval(REFRESH_CHECK_INTERVAL);
        loop {
            interval.tick().await;
            if let Err(e) = refresh_if_stale(&db, &api).await {
                tracing::warn!(error = %e, "Credential freshness check failed");
            }
        }
    });
    tracing::info!("Credential refresh loop started");
}

async fn refresh_if_stale(db: &DbPool, api: &ApiClient) -> Result<(), AppError> {
    let stored = settings::get(db, settings_keys::ACCESS_TOKEN)?;
    let now = Utc::now();

    match validate(stored.as_deref(), now) {
        Err(CredentialError::Missing) => return Ok(()),
        Ok(v) => {
            let fresh_enough = v
                .expires_at
                .map_or(true, |exp| exp - now.timestamp() >= REFRESH_WINDOW_SECS);
            if fresh_enough {
                if let Some(exp) = v.expires_at {
                    tracing::trace!(
                        minutes = (exp - now.timestamp()) / 60,
                        "Token still valid"
                    );
                }
                return Ok(());
            }
        }
        // Expired or malformed: fall through and attempt a refresh.
        Err(_) => {}
    }

    let Some(refresh_token) = settings::get(db, settings_keys::REFRESH_TOKEN)? else {
        tracing::warn!("Token is stale but no refresh token is available");
        return Ok(());
    };

    tracing::info!("Token is expired or about to expire, refreshing");
    match api.refresh(&refresh_token).await {
        Ok(tokens) => {
            store_tokens(db, &tokens)?;
            tracing::info!("Token refreshed successfully");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Token refresh failed; clearing credentials");
            clear_tokens(db)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use chrono::TimeZone;

    fn jwt_with_exp(exp: i64) -> String {
        let header = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .encode(r#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .encode(format!(r#"{{"sub":"user-1","exp":{exp}}}"#));
        format!("{header}.{payload}.signature")
    }

    fn at(ts: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(ts, 0).unwrap()
    }

    #[test]
    fn test_missing_token() {
        assert_eq!(validate(None, Utc::now()), Err(CredentialError::Missing));
        assert_eq!(
            validate(Some(""), Utc::now()),
            Err(CredentialError::Missing)
        );
    }

    #[test]
    fn test_malformed_token_no_dots() {
        assert_eq!(
            validate(Some("abc"), Utc::now()),
            Err(CredentialError::Malformed)
        );
    }

    #[test]
    fn test_quote_repair() {
        let token = jwt_with_exp(4_000_000_000);
        let quoted = format!("\"{token}\"");
        let v = validate(Some(&quoted), at(1_000_000_000)).unwrap();
        assert!(v.repaired);
        assert_eq!(v.token, token);
    }

    #[test]
    fn test_quote_repair_still_malformed() {
        assert_eq!(
            validate(Some("\"abc\""), Utc::now()),
            Err(CredentialError::Malformed)
        );
    }

    #[test]
    fn test_expired_token() {
        let now = at(1_700_000_000);
        // exp one second in the past
        let token = jwt_with_exp(1_699_999_999);
        assert_eq!(
            validate(Some(&token), now),
            Err(CredentialError::Expired)
        );
    }

    #[test]
    fn test_valid_token_reports_expiry() {
        let now = at(1_700_000_000);
        let token = jwt_with_exp(1_700_000_600);
        let v = validate(Some(&token), now).unwrap();
        assert!(!v.repaired);
        assert_eq!(v.expires_at, Some(1_700_000_600));
    }

    #[test]
    fn test_undecodable_payload_is_soft() {
        // Three parts but garbage payload: proceeds with no expiry info.
        let v = validate(Some("aaa.!!!.ccc"), Utc::now()).unwrap();
        assert_eq!(v.expires_at, None);
    }

    #[test]
    fn test_standard_alphabet_and_padding_accepted() {
        let payload = base64::engine::general_purpose::STANDARD
            .encode(r#"{"exp":4000000000}"#);
        let token = format!("hdr.{payload}.sig");
        let v = validate(Some(&token), at(1_000_000_000)).unwrap();
        assert_eq!(v.expires_at, Some(4_000_000_000));
    }
}
