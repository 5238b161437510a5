//! Canonical settings key constants for the `app_settings` table.
//!
//! Use these instead of raw string literals to prevent typo-based key
//! mismatches.

/// Bearer access token for the ClipKit backend.
pub const ACCESS_TOKEN: &str = "access_token";

/// Refresh token used by the periodic freshness check.
pub const REFRESH_TOKEN: &str = "refresh_token";
