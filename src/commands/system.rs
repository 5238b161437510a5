use crate::error::AppError;
use crate::validation;

/// Open a link clip's URL in the system browser. The URL is re-validated
/// here; clips created elsewhere may predate the client-side gate.
#[tauri::command]
pub fn open_external_url(url: String) -> Result<(), AppError> {
    validation::require_valid_url("url", &url)?;
    open::that(url.trim()).map_err(|e| AppError::Internal(format!("Failed to open URL: {e}")))?;
    Ok(())
}
