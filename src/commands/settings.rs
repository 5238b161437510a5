use tauri::State;

use crate::db::repos::settings;
use crate::error::AppError;
use crate::AppState;

#[tauri::command]
pub fn get_app_setting(
    state: State<'_, AppState>,
    key: String,
) -> Result<Option<String>, AppError> {
    settings::get(&state.db, &key)
}

#[tauri::command]
pub fn set_app_setting(
    state: State<'_, AppState>,
    key: String,
    value: String,
) -> Result<(), AppError> {
    settings::set(&state.db, &key, &value)
}

#[tauri::command]
pub fn delete_app_setting(state: State<'_, AppState>, key: String) -> Result<bool, AppError> {
    settings::delete(&state.db, &key)
}
