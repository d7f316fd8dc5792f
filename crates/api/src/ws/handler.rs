use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use futures::StreamExt;
use hopelink_core::workflow::EntityType;
use hopelink_events::Subscription;
use serde::Deserialize;

use crate::error::AppResult;
use crate::state::AppState;
use crate::ws::feed;
use crate::ws::manager::WsManager;

/// `?entity_type=` narrows the feed to one record kind.
#[derive(Debug, Deserialize)]
pub struct FeedParams {
    pub entity_type: Option<String>,
}

/// HTTP handler that upgrades the connection to WebSocket.
///
/// The entity filter is validated before the upgrade so a bad value gets a
/// plain 400 instead of a socket that never receives anything.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> AppResult<impl IntoResponse> {
    let entity_type = params
        .entity_type
        .as_deref()
        .map(str::parse::<EntityType>)
        .transpose()?;
    let changes = match entity_type {
        Some(entity_type) => state.event_bus.subscribe_to(entity_type),
        None => Subscription::from(state.event_bus.subscribe()),
    };
    Ok(ws.on_upgrade(move |socket| {
        handle_socket(socket, state.ws_manager, entity_type, changes)
    }))
}

/// Manage a single WebSocket connection after upgrade.
///
/// Splits the socket into a sink (outbound) and stream (inbound), then:
///   1. Registers the connection with `WsManager`.
///   2. Spawns a sender task that writes control frames from the manager
///      and change events from the bus subscription.
///   3. Drains inbound frames on the current task; the feed is one-way.
///   4. Cleans up on disconnect.
async fn handle_socket(
    socket: WebSocket,
    ws_manager: Arc<WsManager>,
    entity_type: Option<EntityType>,
    changes: Subscription,
) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, entity_type = ?entity_type, "WebSocket connected");

    let control = ws_manager.add(conn_id.clone()).await;

    let (sink, mut stream) = socket.split();

    let sender_conn_id = conn_id.clone();
    let send_task =
        tokio::spawn(async move { feed::pump(&sender_conn_id, sink, control, changes).await });

    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    ws_manager.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, "WebSocket disconnected");
}
