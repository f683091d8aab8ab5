//! HTTP API server for chat sessions.
//!
//! Each session keeps its own transcript; the movie index built at startup is
//! shared by all of them.

use crate::catalog::MovieRecord;
use crate::cli::Output;
use crate::config::Settings;
use crate::conversation::{ChatTurn, RenderedTurn, SessionState};
use crate::error::MoviewhizError;
use crate::runtime::Runtime;
use crate::sessions::{SessionId, SessionRegistry, SessionSummary};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

/// Shared application state.
pub struct AppState {
    runtime: Runtime,
    sessions: SessionRegistry,
}

impl AppState {
    pub fn new(runtime: Runtime) -> Self {
        Self {
            runtime,
            sessions: SessionRegistry::new(),
        }
    }
}

/// Build the API router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/sessions", get(list_sessions).post(create_session))
        .route("/sessions/{session_id}", delete(close_session))
        .route("/sessions/{session_id}/ask", post(ask))
        .route("/sessions/{session_id}/transcript", get(transcript))
        .route("/movies/search", get(search_movies))
        .layer(cors)
        .with_state(state)
}

/// Run the HTTP API server.
pub async fn run_serve(
    host: Option<String>,
    port: Option<u16>,
    settings: Settings,
) -> anyhow::Result<()> {
    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);

    let runtime = super::start_runtime(settings).await?;
    let state = Arc::new(AppState::new(runtime));
    let app = router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Moviewhiz API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET    /health");
    Output::kv("New session", "POST   /sessions");
    Output::kv("List sessions", "GET    /sessions");
    Output::kv("Ask", "POST   /sessions/{id}/ask");
    Output::kv("Transcript", "GET    /sessions/{id}/transcript");
    Output::kv("Close session", "DELETE /sessions/{id}");
    Output::kv("Movie search", "GET    /movies/search?query=...");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct AskRequest {
    question: String,
}

#[derive(Deserialize)]
struct SearchParams {
    query: String,
}

#[derive(Serialize)]
struct SessionCreated {
    session_id: SessionId,
}

#[derive(Serialize)]
struct SessionList {
    sessions: Vec<SessionSummary>,
}

#[derive(Serialize)]
struct TranscriptResponse {
    session_id: SessionId,
    state: SessionState,
    turns: Vec<ChatTurn>,
}

#[derive(Serialize)]
struct MovieList {
    movies: Vec<MovieRecord>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Library error mapped onto an HTTP status.
struct ApiError(MoviewhizError);

impl From<MoviewhizError> for ApiError {
    fn from(err: MoviewhizError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            MoviewhizError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            MoviewhizError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            MoviewhizError::ChainUnavailable(_) | MoviewhizError::CatalogUnavailable(_) => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            warn!("request failed: {}", self.0);
        }
        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

// === Handlers ===

async fn health(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let indexed_movies = state.runtime.indexed_movies().await?;
    Ok(Json(serde_json::json!({
        "status": "ok",
        "indexed_movies": indexed_movies,
    })))
}

async fn create_session(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let session_id = state.sessions.insert(state.runtime.session()).await;
    (StatusCode::CREATED, Json(SessionCreated { session_id }))
}

async fn list_sessions(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(SessionList {
        sessions: state.sessions.list().await,
    })
}

async fn ask(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<SessionId>,
    Json(req): Json<AskRequest>,
) -> Result<Json<RenderedTurn>, ApiError> {
    let session = state.sessions.get(session_id).await?;
    let mut session = session.lock().await;
    Ok(Json(session.ask(&req.question).await?))
}

async fn transcript(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<SessionId>,
) -> Result<Json<TranscriptResponse>, ApiError> {
    let session = state.sessions.get(session_id).await?;
    let session = session.lock().await;
    Ok(Json(TranscriptResponse {
        session_id,
        state: session.state(),
        turns: session.transcript().turns().to_vec(),
    }))
}

async fn close_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<SessionId>,
) -> Result<StatusCode, ApiError> {
    state.sessions.remove(session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn search_movies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<MovieList>, ApiError> {
    if params.query.trim().is_empty() {
        return Err(MoviewhizError::InvalidInput("query must not be empty".to_string()).into());
    }
    let movies = state.runtime.catalog().search(&params.query).await?;
    Ok(Json(MovieList { movies }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommend::PatternExtractor;
    use crate::testing::{movie, ScriptedChain, StubCatalog};
    use crate::vector_store::MemoryVectorStore;
    use serde_json::Value;

    async fn spawn_app(chain: ScriptedChain, catalog: StubCatalog) -> String {
        let runtime = Runtime::with_components(
            Settings::default(),
            Arc::new(catalog),
            Arc::new(chain),
            Arc::new(PatternExtractor::new()),
            Arc::new(MemoryVectorStore::new()),
        );
        let app = router(Arc::new(AppState::new(runtime)));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn new_session(client: &reqwest::Client, base: &str) -> String {
        let resp = client.post(format!("{}/sessions", base)).send().await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::CREATED);
        let body: Value = resp.json().await.unwrap();
        body["session_id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let base = spawn_app(ScriptedChain::new(Vec::<String>::new()), StubCatalog::new()).await;
        let body: Value = reqwest::get(format!("{}/health", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["indexed_movies"], 0);
    }

    #[tokio::test]
    async fn test_ask_returns_turns_and_cards() {
        let base = spawn_app(
            ScriptedChain::new(["You might enjoy the movie Interstellar."]),
            StubCatalog::new()
                .with_movies("Interstellar", vec![movie(157336, "Interstellar", Some("2014"))]),
        )
        .await;
        let client = reqwest::Client::new();
        let id = new_session(&client, &base).await;

        let resp = client
            .post(format!("{}/sessions/{}/ask", base, id))
            .json(&serde_json::json!({ "question": "Can you recommend a sci-fi film?" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["turns"].as_array().unwrap().len(), 2);
        assert_eq!(body["turns"][0]["role"], "human");
        assert_eq!(body["turns"][1]["role"], "assistant");
        assert_eq!(body["recommendations"][0]["query"], "Interstellar");
        assert_eq!(body["movies"][0]["title"], "Interstellar");
        assert_eq!(body["movies"][0]["release_year"], "2014");

        let body: Value = client
            .get(format!("{}/sessions/{}/transcript", base, id))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["state"], "active");
        assert_eq!(body["turns"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_chain_failure_is_bad_gateway_and_keeps_transcript() {
        let base = spawn_app(
            ScriptedChain::new(Vec::<String>::new()).then_fail(),
            StubCatalog::new(),
        )
        .await;
        let client = reqwest::Client::new();
        let id = new_session(&client, &base).await;

        let resp = client
            .post(format!("{}/sessions/{}/ask", base, id))
            .json(&serde_json::json!({ "question": "anything?" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_GATEWAY);
        let body: Value = resp.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("backend down"));

        let body: Value = client
            .get(format!("{}/sessions/{}/transcript", base, id))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["state"], "empty");
        assert!(body["turns"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_question_is_bad_request() {
        let base = spawn_app(ScriptedChain::new(["unused"]), StubCatalog::new()).await;
        let client = reqwest::Client::new();
        let id = new_session(&client, &base).await;

        let resp = client
            .post(format!("{}/sessions/{}/ask", base, id))
            .json(&serde_json::json!({ "question": "   " }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_and_closed_sessions_are_not_found() {
        let base = spawn_app(ScriptedChain::new(Vec::<String>::new()), StubCatalog::new()).await;
        let client = reqwest::Client::new();

        let resp = client
            .get(format!("{}/sessions/{}/transcript", base, uuid::Uuid::new_v4()))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

        let id = new_session(&client, &base).await;
        let sessions: Value = client
            .get(format!("{}/sessions", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(sessions["sessions"].as_array().unwrap().len(), 1);

        let resp = client
            .delete(format!("{}/sessions/{}", base, id))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::NO_CONTENT);

        let resp = client
            .delete(format!("{}/sessions/{}", base, id))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_movie_search() {
        let base = spawn_app(
            ScriptedChain::new(Vec::<String>::new()),
            StubCatalog::new()
                .with_movies("heat", vec![movie(949, "Heat", Some("1995"))])
                .with_failure("down"),
        )
        .await;
        let client = reqwest::Client::new();

        let body: Value = client
            .get(format!("{}/movies/search", base))
            .query(&[("query", "heat")])
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["movies"][0]["title"], "Heat");

        let resp = client
            .get(format!("{}/movies/search", base))
            .query(&[("query", "down")])
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_GATEWAY);

        let resp = client
            .get(format!("{}/movies/search", base))
            .query(&[("query", " ")])
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    }
}
