use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use async_trait::async_trait;
use include_dir::{Dir, include_dir};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    models::{EnhanceRequest, ErrorResult, Session},
    openai::OpenAiClient,
    store::SessionStore,
    template,
};

static ASSETS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/static");

/// Gate consulted before each enhancement request. Swap in a real limiter
/// here without touching the handler.
#[async_trait]
pub trait RateLimitPolicy: Send + Sync {
    async fn allow(&self, session_id: Uuid) -> bool;
}

/// No cooldown: every request is permitted.
pub struct AlwaysAllow;

#[async_trait]
impl RateLimitPolicy for AlwaysAllow {
    async fn allow(&self, _session_id: Uuid) -> bool {
        true
    }
}

#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub openai: Arc<OpenAiClient>,
    pub limiter: Arc<dyn RateLimitPolicy>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/session", post(create_session))
        .route("/api/session/:id", get(get_session))
        .route("/api/session/:id/enhance", post(enhance))
        .route("/api/session/:id/clear", post(clear_session))
        .route("/api/examples", get(examples))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    let page = ASSETS
        .get_file("index.html")
        .and_then(|f| f.contents_utf8())
        .expect("index.html is embedded at build time");
    Html(page)
}

pub async fn create_session(State(state): State<AppState>) -> Json<Session> {
    let session = state.sessions.create();
    tracing::info!("🆕 Session created: {}", session.id);
    Json(session)
}

pub async fn get_session(Path(id): Path<Uuid>, State(state): State<AppState>) -> Response {
    if let Some(session) = state.sessions.get(id) {
        Json(session).into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

pub async fn enhance(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(body): Json<EnhanceRequest>,
) -> Response {
    if state.sessions.get(id).is_none() {
        return StatusCode::NOT_FOUND.into_response();
    }

    if body.idea.trim().is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResult { error: "Please enter an image idea first.".to_string() }),
        )
            .into_response();
    }

    if !state.limiter.allow(id).await {
        return StatusCode::TOO_MANY_REQUESTS.into_response();
    }

    // At most one outstanding request per session; repeated triggers are
    // rejected rather than racing for the slot.
    match state.sessions.begin_request(id) {
        Some(true) => {}
        Some(false) => return StatusCode::CONFLICT.into_response(),
        None => return StatusCode::NOT_FOUND.into_response(),
    }

    tracing::info!("🚀 Enhancing idea for session {}: {}", id, body.idea);

    // Run on a dedicated task: a dropped connection cancels this handler,
    // but the request must still complete and release the in-flight mark.
    let sessions = state.sessions.clone();
    let openai = state.openai.clone();
    let idea = body.idea.clone();
    let handle = tokio::spawn(async move {
        let outcome = openai.enhance_prompt(&idea).await;
        sessions.set_result(id, outcome.clone());
        outcome
    });

    match handle.await {
        // Failures ride a 200 as well: the page surfaces them inline, the
        // session keeps going.
        Ok(outcome) => Json(outcome).into_response(),
        Err(e) => {
            tracing::error!("❌ Enhancement task failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn clear_session(Path(id): Path<Uuid>, State(state): State<AppState>) -> StatusCode {
    if state.sessions.clear(id) {
        tracing::info!("🧹 Session {} cleared", id);
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

pub async fn examples() -> Json<Vec<&'static str>> {
    Json(template::EXAMPLE_IDEAS.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_always_allow_permits_every_request() {
        let policy = AlwaysAllow;
        assert!(policy.allow(Uuid::new_v4()).await);
        assert!(policy.allow(Uuid::new_v4()).await);
    }
}
