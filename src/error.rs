use serde::Serialize;

/// App-wide error type. Every fallible function returns `Result<T, AppError>`.
/// Serializes cleanly for Tauri IPC so the frontend gets structured error messages.
///
/// The credential and generation variants form the fixed failure taxonomy the
/// workspace surfaces to the user; exactly one of them is active per attempt.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("You must be logged in to generate content. Please log in and try again.")]
    Unauthenticated,

    #[error("Invalid token format. Please log in again.")]
    MalformedCredential,

    #[error("Your session has expired. Please log in again.")]
    ExpiredCredential,

    #[error("This idea (ID: {0}) doesn't exist in the database or doesn't belong to your account. Make sure you've saved this idea first.")]
    IdeaNotFound(String),

    #[error("No clips were found for this idea. Please add some clips before generating content.")]
    NoClipsForIdea,

    #[error("None of the selected clips could be found in the database. This might be a mismatch between local and server clip IDs. Try refreshing the workspace or selecting different clips.")]
    ClipIdMismatch,

    #[error("API error: {status} - {detail}")]
    Server { status: u16, detail: String },

    #[error("Network error: no response received from server. Check if the backend is running. ({0})")]
    Network(String),

    #[error("Request error: {0}")]
    RequestConstruction(String),

    #[error("{0}")]
    Internal(String),
}

/// Tauri requires `Serialize` on command return errors.
/// We serialize as `{ error: "...", kind: "..." }` for frontend consumption.
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("AppError", 2)?;
        s.serialize_field("error", &self.to_string())?;
        s.serialize_field("kind", self.kind())?;
        s.end()
    }
}

impl AppError {
    /// Stable machine-readable discriminator for the frontend.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Database(_) => "database",
            AppError::Pool(_) => "pool",
            AppError::NotFound(_) => "not_found",
            AppError::Validation(_) => "validation",
            AppError::Io(_) => "io",
            AppError::Serde(_) => "serde",
            AppError::Auth(_) => "auth",
            AppError::Unauthenticated => "unauthenticated",
            AppError::MalformedCredential => "malformed_credential",
            AppError::ExpiredCredential => "expired_credential",
            AppError::IdeaNotFound(_) => "idea_not_found",
            AppError::NoClipsForIdea => "no_clips_for_idea",
            AppError::ClipIdMismatch => "clip_id_mismatch",
            AppError::Server { .. } => "server",
            AppError::Network(_) => "network",
            AppError::RequestConstruction(_) => "request_construction",
            AppError::Internal(_) => "internal",
        }
    }
}
