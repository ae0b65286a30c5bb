//! Route handlers for the chat service HTTP surface.
//!
//! Five endpoints: service metadata, session start, chat, history,
//! session delete. JSON in/out, permissive CORS.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::info;

use mechbot_core::prompts;
use mechbot_core::types::HistoryMessage;

use crate::chat;
use crate::error::ApiError;
use crate::state::AppState;

// ─────────────────────────────────────────────
// Request / response DTOs
// ─────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct StartSessionResponse {
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub session_id: String,
    pub messages: Vec<HistoryMessage>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// Body of `GET /` — welcome text, live session count, endpoint listing.
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub message: String,
    pub active_sessions: usize,
    pub endpoints: Vec<String>,
}

// ─────────────────────────────────────────────
// Router
// ─────────────────────────────────────────────

/// Build the service router with permissive CORS.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/start_session", get(start_session))
        .route("/chat", post(chat_turn))
        .route("/history/{session_id}", get(history))
        .route("/session/{session_id}", delete(delete_session))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ─────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────

/// `GET /` — service metadata and live session count.
async fn root(State(state): State<Arc<AppState>>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "مرحباً بك في الميكانيكي الذكي".to_string(),
        active_sessions: state.store.len(),
        endpoints: vec![
            "/start_session - بدء جلسة جديدة".to_string(),
            "/chat - إرسال رسالة".to_string(),
            "/history/{session_id} - عرض التاريخ".to_string(),
            "/session/{session_id} - حذف جلسة".to_string(),
        ],
    })
}

/// `GET /start_session` — create a session seeded with the Arabic-only
/// instruction.
async fn start_session(State(state): State<Arc<AppState>>) -> Json<StartSessionResponse> {
    let session = state.store.create(prompts::STARTED_SESSION_SEED);
    info!(session = %session.id(), "session started");
    Json(StartSessionResponse {
        session_id: session.id().to_string(),
    })
}

/// `POST /chat` — one turn. An absent or unknown session id silently
/// creates a new session and returns its id alongside the reply.
async fn chat_turn(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::InvalidInput(e.body_text()))?;

    let turn = chat::run_turn(&state, request.session_id, &request.message).await?;

    Ok(Json(ChatResponse {
        session_id: turn.session_id,
        response: turn.response,
    }))
}

/// `GET /history/{session_id}` — the full transcript view, system seed
/// included.
async fn history(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let session = state
        .store
        .get(&session_id)
        .ok_or(ApiError::SessionNotFound)?;

    let messages = session.transcript().lock().await.view();

    Ok(Json(HistoryResponse {
        session_id,
        messages,
    }))
}

/// `DELETE /session/{session_id}` — terminal: the id is never recognized
/// again, and deleting twice is a 404.
async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    if !state.store.remove(&session_id) {
        return Err(ApiError::SessionNotFound);
    }

    info!(session = %session_id, "session deleted");
    Ok(Json(DeleteResponse {
        message: "تم حذف الجلسة".to_string(),
    }))
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
