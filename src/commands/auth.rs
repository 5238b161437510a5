use chrono::Utc;
use serde::Serialize;
use tauri::State;
use ts_rs::TS;

use crate::api::types::TokenResponse;
use crate::db::repos::settings;
use crate::db::settings_keys;
use crate::db::DbPool;
use crate::error::AppError;
use crate::{session, validation, AppState};

/// What the frontend needs to decide between the login screen and the app.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub authenticated: bool,
    /// Access token `exp` claim in epoch seconds, when decodable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}

fn current_auth_state(db: &DbPool) -> Result<AuthState, AppError> {
    let stored = settings::get(db, settings_keys::ACCESS_TOKEN)?;
    match session::validate(stored.as_deref(), Utc::now()) {
        Ok(v) => Ok(AuthState {
            authenticated: true,
            expires_at: v.expires_at,
        }),
        Err(_) => Ok(AuthState {
            authenticated: false,
            expires_at: None,
        }),
    }
}

#[tauri::command]
pub async fn login(
    state: State<'_, AppState>,
    username: String,
    password: String,
) -> Result<AuthState, AppError> {
    validation::require_non_empty("username", &username)?;
    validation::require_non_empty("password", &password)?;

    let tokens = state.api.login(&username, &password).await?;
    session::store_tokens(&state.db, &tokens)?;
    tracing::info!(user = %username, "Logged in");
    current_auth_state(&state.db)
}

#[tauri::command]
pub async fn register(
    state: State<'_, AppState>,
    email: String,
    password: String,
    name: String,
) -> Result<AuthState, AppError> {
    validation::require_non_empty("email", &email)?;
    validation::require_non_empty("password", &password)?;
    validation::require_non_empty("name", &name)?;

    let resp = state.api.register(&email, &password, &name).await?;
    // Some backend versions issue a session right away; store it when present.
    if let Some(access_token) = resp.access_token {
        session::store_tokens(
            &state.db,
            &TokenResponse {
                access_token,
                refresh_token: resp.refresh_token,
            },
        )?;
    }
    tracing::info!(user = %email, "Registered");
    current_auth_state(&state.db)
}

#[tauri::command]
pub fn logout(state: State<'_, AppState>) -> Result<(), AppError> {
    session::clear_tokens(&state.db)?;
    tracing::info!("Logged out");
    Ok(())
}

#[tauri::command]
pub fn get_auth_state(state: State<'_, AppState>) -> Result<AuthState, AppError> {
    current_auth_state(&state.db)
}
