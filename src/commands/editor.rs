//! Editor and export commands. Content mutations write through to the draft
//! cache so a restart never loses the latest text.

use serde::Serialize;
use tauri::State;
use ts_rs::TS;

use crate::db::repos::drafts;
use crate::error::AppError;
use crate::workspace::export::{self, ExportFormat};
use crate::workspace::{Workspace, WorkspaceSnapshot};
use crate::AppState;

fn with_workspace<T>(
    state: &AppState,
    idea_id: &str,
    f: impl FnOnce(&mut Workspace) -> Result<T, AppError>,
) -> Result<T, AppError> {
    let mut map = state.workspaces()?;
    let ws = map
        .get_mut(idea_id)
        .ok_or_else(|| AppError::NotFound(format!("No open workspace for idea {idea_id}")))?;
    f(ws)
}

#[tauri::command]
pub fn begin_edit(
    state: State<'_, AppState>,
    idea_id: String,
) -> Result<WorkspaceSnapshot, AppError> {
    with_workspace(&state, &idea_id, |ws| {
        ws.editor.begin_edit();
        Ok(ws.snapshot())
    })
}

#[tauri::command]
pub fn update_edit_buffer(
    state: State<'_, AppState>,
    idea_id: String,
    text: String,
) -> Result<WorkspaceSnapshot, AppError> {
    with_workspace(&state, &idea_id, |ws| {
        ws.editor.update_buffer(text)?;
        Ok(ws.snapshot())
    })
}

#[tauri::command]
pub fn save_edit(state: State<'_, AppState>, idea_id: String) -> Result<WorkspaceSnapshot, AppError> {
    let snapshot = with_workspace(&state, &idea_id, |ws| {
        ws.editor.save_edit()?;
        Ok(ws.snapshot())
    })?;
    drafts::set(&state.db, &idea_id, &snapshot.content)?;
    Ok(snapshot)
}

#[tauri::command]
pub fn cancel_edit(
    state: State<'_, AppState>,
    idea_id: String,
) -> Result<WorkspaceSnapshot, AppError> {
    with_workspace(&state, &idea_id, |ws| {
        ws.editor.cancel_edit();
        Ok(ws.snapshot())
    })
}

/// Replace the content directly (in-place rich-text edits that bypass the
/// buffered edit mode).
#[tauri::command]
pub fn set_content(
    state: State<'_, AppState>,
    idea_id: String,
    content: String,
) -> Result<WorkspaceSnapshot, AppError> {
    let snapshot = with_workspace(&state, &idea_id, |ws| {
        ws.editor.set_content(content);
        Ok(ws.snapshot())
    })?;
    drafts::set(&state.db, &idea_id, &snapshot.content)?;
    Ok(snapshot)
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExportResult {
    pub path: String,
    pub filename: String,
}

/// Render the current content in the requested format and write it into the
/// user's download directory.
#[tauri::command]
pub fn export_content(
    state: State<'_, AppState>,
    idea_id: String,
    format: ExportFormat,
) -> Result<ExportResult, AppError> {
    let content = with_workspace(&state, &idea_id, |ws| {
        Ok(ws.editor.content().to_string())
    })?;
    if content.trim().is_empty() {
        return Err(AppError::Validation("No content to export".to_string()));
    }

    let path = export::write_download(format, &content)?;
    Ok(ExportResult {
        path: path.display().to_string(),
        filename: export::export_filename(format),
    })
}
