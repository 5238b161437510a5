use serde::de::DeserializeOwned;

use crate::api::types::{
    ClipCreateBody, ClipUpdateBody, ClipWire, ErrorBody, GenerateRequest, GenerateResponse,
    IdeaBody, IdeaUpdateBody, IdeaWire, RefreshBody, RegisterBody, RegisterResponse,
    TokenResponse,
};
use crate::error::AppError;
use crate::models::{Clip, ClipType, Idea};

// ============================================================================
// Failure shape
// ============================================================================

/// Raw API failure, preserved so the generation coordinator can classify
/// status codes and detail strings itself.
#[derive(Debug)]
pub enum ApiFailure {
    /// The server responded with a non-2xx status.
    Status { status: u16, detail: String },
    /// The request produced no response (or never left the client).
    Transport(reqwest::Error),
}

impl std::fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiFailure::Status { status, detail } => write!(f, "HTTP {status}: {detail}"),
            ApiFailure::Transport(e) => write!(f, "transport error: {e}"),
        }
    }
}

impl ApiFailure {
    /// Default mapping for CRUD endpoints, where the generation taxonomy
    /// does not apply.
    pub fn into_app_error(self) -> AppError {
        match self {
            ApiFailure::Status { status: 401, .. } => AppError::Unauthenticated,
            ApiFailure::Status { status: 404, detail } => AppError::NotFound(detail),
            ApiFailure::Status { status, detail } => AppError::Server { status, detail },
            ApiFailure::Transport(e) if e.is_builder() => {
                AppError::RequestConstruction(e.to_string())
            }
            ApiFailure::Transport(e) => AppError::Network(e.to_string()),
        }
    }
}

// ============================================================================
// ApiClient
// ============================================================================

/// HTTP client wrapping every ClipKit backend endpoint. Holds no session
/// state: authenticated calls take the bearer token explicitly.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new `ApiClient` for the given backend base URL.
    ///
    /// The underlying `reqwest::Client` is configured with a 30-second timeout.
    pub fn new(base_url: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("failed to build reqwest client");

        Self { http, base_url }
    }

    // --------------------------------------------------------------------
    // Private HTTP helpers
    // --------------------------------------------------------------------

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build an authenticated request to the given endpoint path.
    fn authed(&self, method: reqwest::Method, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.http.request(method, self.url(path)).bearer_auth(token)
    }

    /// Send a request and deserialize the JSON response, surfacing non-2xx
    /// statuses with the backend's `detail` string.
    async fn send<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<T, ApiFailure> {
        let resp = req.send().await.map_err(ApiFailure::Transport)?;
        let status = resp.status();
        if status.is_success() {
            resp.json().await.map_err(ApiFailure::Transport)
        } else {
            let detail = resp
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|b| b.detail)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());
            Err(ApiFailure::Status {
                status: status.as_u16(),
                detail,
            })
        }
    }

    /// Send a request and discard the response body.
    async fn send_ok(&self, req: reqwest::RequestBuilder) -> Result<(), ApiFailure> {
        let resp = req.send().await.map_err(ApiFailure::Transport)?;
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            let detail = resp
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|b| b.detail)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());
            Err(ApiFailure::Status {
                status: status.as_u16(),
                detail,
            })
        }
    }

    // --------------------------------------------------------------------
    // Auth
    // --------------------------------------------------------------------

    /// `POST /auth/login` -- OAuth2 password-grant form login.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, AppError> {
        let req = self.http.post(self.url("/auth/login")).form(&[
            ("username", username),
            ("password", password),
            ("grant_type", "password"),
        ]);
        self.send(req).await.map_err(|f| match f {
            ApiFailure::Status { detail, .. } => AppError::Auth(detail),
            other => other.into_app_error(),
        })
    }

    /// `POST /auth/register` -- create an account.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<RegisterResponse, AppError> {
        let req = self.http.post(self.url("/auth/register")).json(&RegisterBody {
            email,
            password,
            name,
        });
        self.send(req).await.map_err(|f| match f {
            ApiFailure::Status { detail, .. } => AppError::Auth(detail),
            other => other.into_app_error(),
        })
    }

    /// `POST /auth/refresh` -- exchange a refresh token for a new pair.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, AppError> {
        let req = self
            .http
            .post(self.url("/auth/refresh"))
            .json(&RefreshBody { refresh_token });
        self.send(req).await.map_err(|f| match f {
            ApiFailure::Status { detail, .. } => AppError::Auth(detail),
            other => other.into_app_error(),
        })
    }

    // --------------------------------------------------------------------
    // Ideas
    // --------------------------------------------------------------------

    /// `GET /ideas` -- all ideas for the authenticated user.
    pub async fn list_ideas(&self, token: &str) -> Result<Vec<Idea>, AppError> {
        let wires: Vec<IdeaWire> = self
            .send(self.authed(reqwest::Method::GET, "/ideas", token))
            .await
            .map_err(ApiFailure::into_app_error)?;
        Ok(wires.into_iter().map(Idea::from).collect())
    }

    /// `GET /ideas/{id}`.
    pub async fn get_idea(&self, token: &str, id: &str) -> Result<Idea, AppError> {
        let wire: IdeaWire = self
            .send(self.authed(reqwest::Method::GET, &format!("/ideas/{id}"), token))
            .await
            .map_err(ApiFailure::into_app_error)?;
        Ok(wire.into())
    }

    /// `POST /ideas`.
    pub async fn create_idea(
        &self,
        token: &str,
        title: &str,
        description: Option<&str>,
        tags: Option<&[String]>,
    ) -> Result<Idea, AppError> {
        let req = self
            .authed(reqwest::Method::POST, "/ideas", token)
            .json(&IdeaBody {
                name: title,
                category: description,
                tags,
            });
        let wire: IdeaWire = self.send(req).await.map_err(ApiFailure::into_app_error)?;
        Ok(wire.into())
    }

    /// `PUT /ideas/{id}` -- partial update, absent fields are untouched.
    pub async fn update_idea(
        &self,
        token: &str,
        id: &str,
        title: Option<&str>,
        description: Option<&str>,
        tags: Option<&[String]>,
    ) -> Result<Idea, AppError> {
        let req = self
            .authed(reqwest::Method::PUT, &format!("/ideas/{id}"), token)
            .json(&IdeaUpdateBody {
                name: title,
                category: description,
                tags,
            });
        let wire: IdeaWire = self.send(req).await.map_err(ApiFailure::into_app_error)?;
        Ok(wire.into())
    }

    /// `DELETE /ideas/{id}`.
    pub async fn delete_idea(&self, token: &str, id: &str) -> Result<(), AppError> {
        self.send_ok(self.authed(reqwest::Method::DELETE, &format!("/ideas/{id}"), token))
            .await
            .map_err(ApiFailure::into_app_error)
    }

    // --------------------------------------------------------------------
    // Clips
    // --------------------------------------------------------------------

    /// `GET /clips?idea={id}` -- clips belonging to one idea.
    pub async fn clips_by_idea(&self, token: &str, idea_id: &str) -> Result<Vec<Clip>, AppError> {
        let path = format!("/clips?idea={idea_id}");
        let wires: Vec<ClipWire> = self
            .send(self.authed(reqwest::Method::GET, &path, token))
            .await
            .map_err(ApiFailure::into_app_error)?;
        Ok(wires.into_iter().map(Clip::from).collect())
    }

    /// `POST /clips`.
    pub async fn create_clip(
        &self,
        token: &str,
        idea_id: &str,
        clip_type: ClipType,
        content: &str,
        tags: &[String],
        lang: Option<&str>,
    ) -> Result<Clip, AppError> {
        let req = self
            .authed(reqwest::Method::POST, "/clips", token)
            .json(&ClipCreateBody {
                clip_type,
                content,
                idea_id,
                tags,
                lang,
            });
        let wire: ClipWire = self.send(req).await.map_err(ApiFailure::into_app_error)?;
        Ok(wire.into())
    }

    /// `PUT /clips/{id}`.
    pub async fn update_clip(
        &self,
        token: &str,
        id: &str,
        clip_type: Option<ClipType>,
        content: Option<&str>,
        tags: Option<&[String]>,
    ) -> Result<Clip, AppError> {
        let req = self
            .authed(reqwest::Method::PUT, &format!("/clips/{id}"), token)
            .json(&ClipUpdateBody {
                clip_type,
                content,
                tags,
            });
        let wire: ClipWire = self.send(req).await.map_err(ApiFailure::into_app_error)?;
        Ok(wire.into())
    }

    /// `DELETE /clips/{id}`.
    pub async fn delete_clip(&self, token: &str, id: &str) -> Result<(), AppError> {
        self.send_ok(self.authed(reqwest::Method::DELETE, &format!("/clips/{id}"), token))
            .await
            .map_err(ApiFailure::into_app_error)
    }

    // --------------------------------------------------------------------
    // Generation
    // --------------------------------------------------------------------

    /// `POST /content/generate` -- synthesize the selected, ordered clips.
    ///
    /// Returns the raw `ApiFailure` so the coordinator can map status codes
    /// and detail strings onto the workspace error taxonomy.
    pub async fn generate(
        &self,
        token: &str,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, ApiFailure> {
        let req = self
            .authed(reqwest::Method::POST, "/content/generate", token)
            .json(request);
        self.send(req).await
    }
}
