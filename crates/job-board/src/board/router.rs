use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, post},
    Json, Router,
};
use serde_json::{json, Value};

use super::dispatch::{ButtonEvent, Dispatcher, InboundEvent, TextEvent};
use super::domain::ActorId;
use super::notify::Notifier;
use super::store::EntityStore;
use crate::error::AppError;

/// Router builder exposing the chat event endpoints and the maintenance wipe.
pub fn board_router<S, N>(dispatcher: Arc<Dispatcher<S, N>>) -> Router
where
    S: EntityStore + 'static,
    N: Notifier + 'static,
{
    Router::new()
        .route("/api/v1/events/text", post(text_handler::<S, N>))
        .route("/api/v1/events/button", post(button_handler::<S, N>))
        .route("/api/v1/accounts/:actor_id", delete(wipe_handler::<S, N>))
        .with_state(dispatcher)
}

fn effects_response<S, N>(dispatcher: &Dispatcher<S, N>, event: InboundEvent) -> Response
where
    S: EntityStore + 'static,
    N: Notifier + 'static,
{
    let session_id = event.session_id();
    let effects = dispatcher.handle(event);
    let payload = json!({
        "session_id": session_id,
        "effects": effects,
    });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn text_handler<S, N>(
    State(dispatcher): State<Arc<Dispatcher<S, N>>>,
    Json(event): Json<TextEvent>,
) -> Response
where
    S: EntityStore + 'static,
    N: Notifier + 'static,
{
    effects_response(&dispatcher, event.into())
}

pub(crate) async fn button_handler<S, N>(
    State(dispatcher): State<Arc<Dispatcher<S, N>>>,
    Json(event): Json<ButtonEvent>,
) -> Response
where
    S: EntityStore + 'static,
    N: Notifier + 'static,
{
    effects_response(&dispatcher, event.into())
}

pub(crate) async fn wipe_handler<S, N>(
    State(dispatcher): State<Arc<Dispatcher<S, N>>>,
    Path(actor_id): Path<i64>,
) -> Result<Json<Value>, AppError>
where
    S: EntityStore + 'static,
    N: Notifier + 'static,
{
    let report = dispatcher.wipe_account(ActorId(actor_id))?;
    Ok(Json(json!({
        "actor_id": actor_id,
        "removed": report,
    })))
}
