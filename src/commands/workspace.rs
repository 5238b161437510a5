//! Workspace lifecycle and clip view-state commands.
//!
//! Every mutation returns a fresh `WorkspaceSnapshot` so the frontend never
//! has to reconcile partial updates.

use tauri::State;

use crate::db::repos::drafts;
use crate::error::AppError;
use crate::models::{ClipFilter, GenerationParams};
use crate::workspace::{coordinator, Workspace, WorkspaceSnapshot};
use crate::{session, AppState};

fn with_workspace<T>(
    state: &AppState,
    idea_id: &str,
    f: impl FnOnce(&mut Workspace) -> T,
) -> Result<T, AppError> {
    let mut map = state.workspaces()?;
    let ws = map
        .get_mut(idea_id)
        .ok_or_else(|| AppError::NotFound(format!("No open workspace for idea {idea_id}")))?;
    Ok(f(ws))
}

#[tauri::command]
pub async fn open_workspace(
    state: State<'_, AppState>,
    idea_id: String,
) -> Result<WorkspaceSnapshot, AppError> {
    let token = session::require_valid(&state.db)?;
    let idea = state.api.get_idea(&token, &idea_id).await?;
    let clips = state.api.clips_by_idea(&token, &idea_id).await?;
    let draft = drafts::get(&state.db, &idea_id)?;

    tracing::info!(idea_id = %idea_id, clips = clips.len(), cached_draft = draft.is_some(), "Opened workspace");

    let ws = Workspace::new(idea, clips, draft);
    let snapshot = ws.snapshot();
    state.workspaces()?.insert(idea_id, ws);
    Ok(snapshot)
}

/// Re-fetch the idea's clips from the backend. Order and selection reset to
/// the fetched list; the editor and draft are untouched.
#[tauri::command]
pub async fn refresh_workspace(
    state: State<'_, AppState>,
    idea_id: String,
) -> Result<WorkspaceSnapshot, AppError> {
    let token = session::require_valid(&state.db)?;
    let clips = state.api.clips_by_idea(&token, &idea_id).await?;

    with_workspace(&state, &idea_id, |ws| {
        ws.collection.replace(clips);
        ws.snapshot()
    })
}

#[tauri::command]
pub fn close_workspace(state: State<'_, AppState>, idea_id: String) -> Result<(), AppError> {
    state.workspaces()?.remove(&idea_id);
    Ok(())
}

#[tauri::command]
pub fn get_workspace(
    state: State<'_, AppState>,
    idea_id: String,
) -> Result<WorkspaceSnapshot, AppError> {
    with_workspace(&state, &idea_id, |ws| ws.snapshot())
}

// ----------------------------------------------------------------------------
// Clip view state
// ----------------------------------------------------------------------------

#[tauri::command]
pub fn set_clip_filter(
    state: State<'_, AppState>,
    idea_id: String,
    filter: ClipFilter,
) -> Result<WorkspaceSnapshot, AppError> {
    with_workspace(&state, &idea_id, |ws| {
        ws.collection.set_filter(filter);
        ws.snapshot()
    })
}

#[tauri::command]
pub fn toggle_clip_selection(
    state: State<'_, AppState>,
    idea_id: String,
    clip_id: String,
) -> Result<WorkspaceSnapshot, AppError> {
    with_workspace(&state, &idea_id, |ws| {
        ws.collection.toggle_selection(&clip_id);
        ws.snapshot()
    })
}

#[tauri::command]
pub fn select_all_clips(
    state: State<'_, AppState>,
    idea_id: String,
) -> Result<WorkspaceSnapshot, AppError> {
    with_workspace(&state, &idea_id, |ws| {
        ws.collection.select_all();
        ws.snapshot()
    })
}

#[tauri::command]
pub fn clear_clip_selection(
    state: State<'_, AppState>,
    idea_id: String,
) -> Result<WorkspaceSnapshot, AppError> {
    with_workspace(&state, &idea_id, |ws| {
        ws.collection.clear_selection();
        ws.snapshot()
    })
}

#[tauri::command]
pub fn clip_drag_start(
    state: State<'_, AppState>,
    idea_id: String,
    clip_id: String,
) -> Result<WorkspaceSnapshot, AppError> {
    with_workspace(&state, &idea_id, |ws| {
        ws.collection.drag_start(&clip_id);
        ws.snapshot()
    })
}

#[tauri::command]
pub fn clip_drag_over(
    state: State<'_, AppState>,
    idea_id: String,
    target_id: String,
) -> Result<WorkspaceSnapshot, AppError> {
    with_workspace(&state, &idea_id, |ws| {
        ws.collection.drag_over(&target_id);
        ws.snapshot()
    })
}

#[tauri::command]
pub fn clip_drag_end(
    state: State<'_, AppState>,
    idea_id: String,
) -> Result<WorkspaceSnapshot, AppError> {
    with_workspace(&state, &idea_id, |ws| {
        ws.collection.drag_end();
        ws.snapshot()
    })
}

// ----------------------------------------------------------------------------
// Generation
// ----------------------------------------------------------------------------

#[tauri::command]
pub fn set_generation_params(
    state: State<'_, AppState>,
    idea_id: String,
    params: GenerationParams,
) -> Result<WorkspaceSnapshot, AppError> {
    with_workspace(&state, &idea_id, |ws| {
        ws.params = params;
        ws.snapshot()
    })
}

/// Run one generation attempt. Credentials are validated up front; the
/// workspace lock is released while the request is in flight, and a result
/// that arrives after a newer attempt started is dropped on the floor.
#[tauri::command]
pub async fn generate_content(
    app: tauri::AppHandle,
    state: State<'_, AppState>,
    idea_id: String,
    custom_instructions: Option<String>,
) -> Result<WorkspaceSnapshot, AppError> {
    let token = match session::require_valid(&state.db) {
        Ok(token) => token,
        Err(e) => {
            // Surface the credential failure in the workspace message area.
            if let Some(ws) = state.workspaces()?.get_mut(&idea_id) {
                let seq = ws.begin_generation();
                ws.finish_failure(seq, e.to_string());
            }
            return Err(e);
        }
    };

    let (seq, request) = {
        let mut map = state.workspaces()?;
        let ws = map
            .get_mut(&idea_id)
            .ok_or_else(|| AppError::NotFound(format!("No open workspace for idea {idea_id}")))?;

        let seq = ws.begin_generation();
        if ws.collection.ordered_selected_ids().is_empty() {
            let err = AppError::Validation(
                "Select at least one clip to generate content".to_string(),
            );
            ws.finish_failure(seq, err.to_string());
            return Err(err);
        }
        let request =
            coordinator::build_request(&idea_id, &ws.collection, &ws.params, custom_instructions);
        (seq, request)
    };

    tracing::info!(
        idea_id = %idea_id,
        clips = request.clip_ids.len(),
        "Requesting content generation"
    );
    let outcome = state.api.generate(&token, &request).await;

    let mut map = state.workspaces()?;
    let ws = map
        .get_mut(&idea_id)
        .ok_or_else(|| AppError::NotFound(format!("No open workspace for idea {idea_id}")))?;

    match outcome {
        Ok(resp) => {
            if ws.finish_success(seq, resp.content.clone()) {
                drafts::set(&state.db, &idea_id, &resp.content)?;
                notify_generation_complete(&app, &ws.idea.title);
            } else {
                tracing::debug!(idea_id = %idea_id, seq, "Dropping superseded generation result");
            }
            Ok(ws.snapshot())
        }
        Err(failure) => {
            let err = coordinator::classify_failure(failure, &idea_id);
            if matches!(err, AppError::Unauthenticated) {
                session::clear_tokens(&state.db)?;
            }
            ws.finish_failure(seq, err.to_string());
            Err(err)
        }
    }
}

fn notify_generation_complete(app: &tauri::AppHandle, idea_title: &str) {
    use tauri_plugin_notification::NotificationExt;

    if let Err(e) = app
        .notification()
        .builder()
        .title("ClipKit")
        .body(format!("Content for \"{idea_title}\" is ready"))
        .show()
    {
        tracing::warn!(error = %e, "Could not show completion notification");
    }
}
