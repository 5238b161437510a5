use tauri::State;

use crate::error::AppError;
use crate::models::{Clip, ClipType};
use crate::{session, validation, AppState};

#[tauri::command]
pub async fn list_clips(state: State<'_, AppState>, idea_id: String) -> Result<Vec<Clip>, AppError> {
    let token = session::require_valid(&state.db)?;
    state.api.clips_by_idea(&token, &idea_id).await
}

#[tauri::command]
pub async fn create_clip(
    state: State<'_, AppState>,
    idea_id: String,
    clip_type: ClipType,
    content: String,
    tags: Option<Vec<String>>,
    lang: Option<String>,
) -> Result<Clip, AppError> {
    validation::require_valid_clip_content(clip_type, &content)?;

    let token = session::require_valid(&state.db)?;
    let clip = state
        .api
        .create_clip(
            &token,
            &idea_id,
            clip_type,
            &content,
            tags.as_deref().unwrap_or(&[]),
            lang.as_deref(),
        )
        .await?;
    tracing::info!(clip_id = %clip.id, idea_id = %idea_id, "Created clip");
    Ok(clip)
}

#[tauri::command]
pub async fn update_clip(
    state: State<'_, AppState>,
    clip_id: String,
    clip_type: Option<ClipType>,
    content: Option<String>,
    tags: Option<Vec<String>>,
) -> Result<Clip, AppError> {
    // The URL gate only applies when both halves are in the update; a
    // content-only change is checked by the backend against the stored type.
    if let (Some(t), Some(c)) = (clip_type, content.as_deref()) {
        validation::require_valid_clip_content(t, c)?;
    } else if let Some(c) = content.as_deref() {
        validation::require_non_empty("content", c)?;
    }

    let token = session::require_valid(&state.db)?;
    state
        .api
        .update_clip(&token, &clip_id, clip_type, content.as_deref(), tags.as_deref())
        .await
}

#[tauri::command]
pub async fn delete_clip(state: State<'_, AppState>, clip_id: String) -> Result<(), AppError> {
    let token = session::require_valid(&state.db)?;
    state.api.delete_clip(&token, &clip_id).await?;
    tracing::info!(clip_id = %clip_id, "Deleted clip");
    Ok(())
}
