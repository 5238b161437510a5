pub mod api;
pub mod commands;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod session;
pub mod validation;
pub mod workspace;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tauri::Manager;

use api::client::ApiClient;
use db::DbPool;
use error::AppError;
use workspace::Workspace;

/// Shared application state, managed by Tauri and injected into commands.
pub struct AppState {
    pub db: DbPool,
    pub api: Arc<ApiClient>,
    /// Open workspaces keyed by idea id. Guarded by a blocking mutex; every
    /// holder does in-memory work only and never awaits.
    workspaces: Mutex<HashMap<String, Workspace>>,
}

impl AppState {
    pub fn new(db: DbPool, api: Arc<ApiClient>) -> Self {
        Self {
            db,
            api,
            workspaces: Mutex::new(HashMap::new()),
        }
    }

    pub fn workspaces(&self) -> Result<MutexGuard<'_, HashMap<String, Workspace>>, AppError> {
        self.workspaces
            .lock()
            .map_err(|_| AppError::Internal("workspace state is poisoned".to_string()))
    }
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    logging::init();

    // Optional .env for local development (CLIPKIT_API_URL etc).
    if dotenvy::dotenv().is_ok() {
        tracing::debug!("Loaded .env file");
    }

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_notification::init())
        .setup(|app| {
            let app_data_dir = app.path().app_data_dir()?;
            logging::install_crash_hook(&app_data_dir);

            let db = db::init_db(&app_data_dir)?;
            let api = Arc::new(ApiClient::new(api::config::api_base_url()));

            session::start_refresh_loop(db.clone(), api.clone());

            app.manage(AppState::new(db, api));
            tracing::info!("ClipKit desktop initialized");
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::auth::login,
            commands::auth::register,
            commands::auth::logout,
            commands::auth::get_auth_state,
            commands::ideas::list_ideas,
            commands::ideas::get_idea,
            commands::ideas::create_idea,
            commands::ideas::update_idea,
            commands::ideas::delete_idea,
            commands::clips::list_clips,
            commands::clips::create_clip,
            commands::clips::update_clip,
            commands::clips::delete_clip,
            commands::workspace::open_workspace,
            commands::workspace::refresh_workspace,
            commands::workspace::close_workspace,
            commands::workspace::get_workspace,
            commands::workspace::set_clip_filter,
            commands::workspace::toggle_clip_selection,
            commands::workspace::select_all_clips,
            commands::workspace::clear_clip_selection,
            commands::workspace::clip_drag_start,
            commands::workspace::clip_drag_over,
            commands::workspace::clip_drag_end,
            commands::workspace::set_generation_params,
            commands::workspace::generate_content,
            commands::editor::begin_edit,
            commands::editor::update_edit_buffer,
            commands::editor::save_edit,
            commands::editor::cancel_edit,
            commands::editor::set_content,
            commands::editor::export_content,
            commands::settings::get_app_setting,
            commands::settings::set_app_setting,
            commands::settings::delete_app_setting,
            commands::system::open_external_url,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
