//! Chat WebSocket handlers

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::Response,
};
use chamapay_chats::{ChatEvent, ConversationController};
use futures_util::{stream::SplitSink, SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

use crate::error::GatewayResult;
use crate::rest::chat::{entry_responses, EntryResponse};
use crate::state::GatewayState;

/// Client events received from WebSocket
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatClientEvent {
    /// Heartbeat to keep connection alive
    Ping,
    /// Text typed into the chat input
    Submit { text: String },
}

/// Server events sent to WebSocket clients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatServerEvent {
    /// Full log, sent once right after the upgrade
    Snapshot {
        session_id: String,
        entries: Vec<EntryResponse>,
    },
    /// An entry was appended
    Entry { entry: EntryResponse },
    /// The screen was closed; the socket closes after this
    Closed { cancelled_replies: usize },
    /// Heartbeat response
    Pong,
    /// Error response
    Error { message: String },
}

impl From<ChatEvent> for ChatServerEvent {
    fn from(event: ChatEvent) -> Self {
        match event {
            ChatEvent::EntryAppended { entry, .. } => ChatServerEvent::Entry {
                entry: EntryResponse::from(&entry),
            },
            ChatEvent::SessionClosed {
                cancelled_replies, ..
            } => ChatServerEvent::Closed { cancelled_replies },
        }
    }
}

/// Chat WebSocket connection handler
pub async fn chat_websocket_handler(
    ws: WebSocketUpgrade,
    Path(session_id): Path<String>,
    State(state): State<Arc<GatewayState>>,
) -> GatewayResult<Response> {
    // Unknown sessions are rejected before the upgrade.
    let controller = state.sessions.get_by_str(&session_id).await?;

    Ok(ws.on_upgrade(move |socket| handle_chat_websocket(socket, controller)))
}

/// Handle chat WebSocket connection
async fn handle_chat_websocket(socket: WebSocket, controller: Arc<ConversationController>) {
    let session_id = controller.id();
    let (mut sender, mut receiver) = socket.split();

    // Subscribe before the snapshot so no entry falls between the two.
    let mut events = controller.subscribe();
    let snapshot = ChatServerEvent::Snapshot {
        session_id: session_id.to_string(),
        entries: entry_responses(&controller.entries().await),
    };
    if send_json(&mut sender, &snapshot).await.is_err() {
        return;
    }

    info!(%session_id, "chat websocket connected");

    let (reply_tx, mut reply_rx) = mpsc::channel::<ChatServerEvent>(16);

    let mut send_task = tokio::spawn(async move {
        loop {
            let outgoing = tokio::select! {
                event = events.recv() => match event {
                    Ok(event) => ChatServerEvent::from(event),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(%session_id, skipped, "websocket client lagged behind");
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
                Some(reply) = reply_rx.recv() => reply,
            };

            let closing = matches!(outgoing, ChatServerEvent::Closed { .. });
            if send_json(&mut sender, &outgoing).await.is_err() {
                break;
            }
            if closing {
                let _ = sender.send(Message::Close(None)).await;
                break;
            }
        }
    });

    let receive_controller = Arc::clone(&controller);
    let mut receive_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => {
                    let reply = match serde_json::from_str::<ChatClientEvent>(&text) {
                        Ok(event) => handle_chat_client_event(event, &receive_controller).await,
                        Err(e) => Some(ChatServerEvent::Error {
                            message: format!("Invalid event: {}", e),
                        }),
                    };
                    if let Some(reply) = reply {
                        if reply_tx.send(reply).await.is_err() {
                            break;
                        }
                    }
                }
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    // Wait for either task to complete
    tokio::select! {
        _ = &mut send_task => receive_task.abort(),
        _ = &mut receive_task => send_task.abort(),
    }

    debug!(%session_id, "chat websocket disconnected");
}

async fn handle_chat_client_event(
    event: ChatClientEvent,
    controller: &ConversationController,
) -> Option<ChatServerEvent> {
    match event {
        ChatClientEvent::Ping => Some(ChatServerEvent::Pong),
        // The appended entries arrive through the broadcast channel.
        ChatClientEvent::Submit { text } => {
            controller.submit(&text).await;
            None
        }
    }
}

async fn send_json(
    sender: &mut SplitSink<WebSocket, Message>,
    event: &ChatServerEvent,
) -> Result<(), axum::Error> {
    match serde_json::to_string(event) {
        Ok(text) => sender.send(Message::Text(text)).await,
        Err(e) => {
            warn!(error = %e, "failed to serialize websocket event");
            Ok(())
        }
    }
}
