use tauri::State;

use crate::error::AppError;
use crate::models::Idea;
use crate::{session, validation, AppState};

#[tauri::command]
pub async fn list_ideas(state: State<'_, AppState>) -> Result<Vec<Idea>, AppError> {
    let token = session::require_valid(&state.db)?;
    state.api.list_ideas(&token).await
}

#[tauri::command]
pub async fn get_idea(state: State<'_, AppState>, idea_id: String) -> Result<Idea, AppError> {
    let token = session::require_valid(&state.db)?;
    state.api.get_idea(&token, &idea_id).await
}

#[tauri::command]
pub async fn create_idea(
    state: State<'_, AppState>,
    title: String,
    description: Option<String>,
    tags: Option<Vec<String>>,
) -> Result<Idea, AppError> {
    validation::require_non_empty("title", &title)?;

    let token = session::require_valid(&state.db)?;
    let idea = state
        .api
        .create_idea(&token, &title, description.as_deref(), tags.as_deref())
        .await?;
    tracing::info!(idea_id = %idea.id, "Created idea");
    Ok(idea)
}

#[tauri::command]
pub async fn update_idea(
    state: State<'_, AppState>,
    idea_id: String,
    title: Option<String>,
    description: Option<String>,
    tags: Option<Vec<String>>,
) -> Result<Idea, AppError> {
    if let Some(ref title) = title {
        validation::require_non_empty("title", title)?;
    }

    let token = session::require_valid(&state.db)?;
    state
        .api
        .update_idea(
            &token,
            &idea_id,
            title.as_deref(),
            description.as_deref(),
            tags.as_deref(),
        )
        .await
}

#[tauri::command]
pub async fn delete_idea(state: State<'_, AppState>, idea_id: String) -> Result<(), AppError> {
    let token = session::require_valid(&state.db)?;
    state.api.delete_idea(&token, &idea_id).await?;

    // The idea is gone; its workspace and cached draft go with it.
    state.workspaces()?.remove(&idea_id);
    crate::db::repos::drafts::delete(&state.db, &idea_id)?;
    tracing::info!(idea_id = %idea_id, "Deleted idea");
    Ok(())
}
