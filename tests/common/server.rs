use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;

use axum::body::Body;
use axum::extract::{Path, Query, Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::sync::oneshot;

use gitlab_repository_files::types::{FileInfo, ProjectAccessToken, RepositoryFile};

use super::store::GitLabStore;

pub const TEST_TOKEN: &str = "glpat-test-token";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Raw request path, still percent-encoded.
    pub path: String,
    pub query: Option<String>,
    pub body: Option<Value>,
    pub user_agent: Option<String>,
}

#[derive(Default)]
pub struct Shared {
    pub store: GitLabStore,
    pub requests: Vec<RecordedRequest>,
}

type SharedState = Arc<Mutex<Shared>>;

/// GitLab v4 API double served over real HTTP on a background thread.
pub struct MockGitLab {
    pub base_url: String,
    state: SharedState,
    shutdown: Option<oneshot::Sender<()>>,
}

impl MockGitLab {
    pub fn start() -> Self {
        let state = SharedState::default();
        let app = router(state.clone());

        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.set_nonblocking(true).expect("nonblocking");
        let addr = listener.local_addr().expect("local addr");
        let (tx, rx) = oneshot::channel::<()>();

        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).expect("listener");
                axum::serve(listener, app)
                    .with_graceful_shutdown(async {
                        let _ = rx.await;
                    })
                    .await
                    .expect("serve");
            });
        });

        Self {
            base_url: format!("http://{addr}/"),
            state,
            shutdown: Some(tx),
        }
    }

    pub fn state(&self) -> MutexGuard<'_, Shared> {
        self.state.lock().expect("state lock")
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state().requests.clone()
    }
}

impl Drop for MockGitLab {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

struct ApiError(u16, String);

impl From<(u16, String)> for ApiError {
    fn from((status, message): (u16, String)) -> Self {
        Self(status, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(json!({ "message": self.1 }))).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

fn router(state: SharedState) -> Router {
    Router::new()
        .route(
            "/api/v4/projects/{project}/repository/files/{file_path}",
            get(get_file)
                .post(create_file)
                .put(update_file)
                .delete(delete_file),
        )
        .route(
            "/api/v4/projects/{project}/access_tokens",
            get(list_tokens).post(create_token),
        )
        .route(
            "/api/v4/projects/{project}/access_tokens/{token_id}",
            delete(delete_token),
        )
        .layer(middleware::from_fn_with_state(state.clone(), record_and_authorize))
        .with_state(state)
}

async fn record_and_authorize(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();

    let header = |headers: &HeaderMap, name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    state.lock().expect("state lock").requests.push(RecordedRequest {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(str::to_string),
        body: serde_json::from_slice(&bytes).ok(),
        user_agent: header(&parts.headers, "user-agent"),
    });

    if header(&parts.headers, "private-token").as_deref() != Some(TEST_TOKEN) {
        return ApiError(401, "401 Unauthorized".to_string()).into_response();
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

#[derive(Deserialize)]
struct FileBody {
    branch: String,
    content: Option<String>,
    commit_message: String,
    last_commit_id: Option<String>,
}

async fn get_file(
    State(state): State<SharedState>,
    Path((project, file_path)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult<Json<RepositoryFile>> {
    let ref_name = query.get("ref").cloned().unwrap_or_default();
    let state = state.lock().expect("state lock");
    Ok(Json(state.store.get_file(&project, &file_path, &ref_name)?))
}

async fn create_file(
    State(state): State<SharedState>,
    Path((project, file_path)): Path<(String, String)>,
    Json(body): Json<FileBody>,
) -> ApiResult<(StatusCode, Json<FileInfo>)> {
    let mut state = state.lock().expect("state lock");
    let info = state.store.create_file(
        &project,
        &file_path,
        &body.branch,
        body.content.as_deref().unwrap_or_default(),
        &body.commit_message,
    )?;
    Ok((StatusCode::CREATED, Json(info)))
}

async fn update_file(
    State(state): State<SharedState>,
    Path((project, file_path)): Path<(String, String)>,
    Json(body): Json<FileBody>,
) -> ApiResult<Json<FileInfo>> {
    let mut state = state.lock().expect("state lock");
    let info = state.store.update_file(
        &project,
        &file_path,
        &body.branch,
        body.content.as_deref().unwrap_or_default(),
        &body.commit_message,
        body.last_commit_id.as_deref().unwrap_or_default(),
    )?;
    Ok(Json(info))
}

async fn delete_file(
    State(state): State<SharedState>,
    Path((project, file_path)): Path<(String, String)>,
    Json(body): Json<FileBody>,
) -> ApiResult<StatusCode> {
    let mut state = state.lock().expect("state lock");
    state.store.delete_file(
        &project,
        &file_path,
        &body.branch,
        &body.commit_message,
        body.last_commit_id.as_deref().unwrap_or_default(),
    )?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
struct PageQuery {
    page: Option<u32>,
    per_page: Option<u32>,
}

async fn list_tokens(
    State(state): State<SharedState>,
    Path(project): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Response {
    let state = state.lock().expect("state lock");
    let (items, next) = state.store.list_tokens(
        project,
        query.page.unwrap_or(1),
        query.per_page.unwrap_or(20),
    );
    let next = next.map(|n| n.to_string()).unwrap_or_default();
    ([("x-next-page", next)], Json(items)).into_response()
}

#[derive(Deserialize)]
struct TokenBody {
    name: String,
    scopes: Vec<String>,
    expires_at: Option<NaiveDate>,
}

async fn create_token(
    State(state): State<SharedState>,
    Path(project): Path<i64>,
    Json(body): Json<TokenBody>,
) -> (StatusCode, Json<ProjectAccessToken>) {
    let mut state = state.lock().expect("state lock");
    let token = state
        .store
        .create_token(project, &body.name, body.scopes, body.expires_at);
    (StatusCode::CREATED, Json(token))
}

async fn delete_token(
    State(state): State<SharedState>,
    Path((project, token_id)): Path<(i64, i64)>,
) -> ApiResult<StatusCode> {
    let mut state = state.lock().expect("state lock");
    state.store.delete_token(project, token_id)?;
    Ok(StatusCode::NO_CONTENT)
}
