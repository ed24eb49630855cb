use std::sync::Arc;
use std::time::Duration;

use chamapay_chats::services::reply_service::BALANCE_REPLY;
use chamapay_gateway::{
    build_router, state::create_test_gateway_state, websocket::ChatServerEvent, GatewayState,
};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

type Socket = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

const REPLY_DELAY: Duration = Duration::from_millis(50);
const WAIT: Duration = Duration::from_secs(5);

async fn spawn_server(state: GatewayState) -> std::net::SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    let app = build_router(state);

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    addr
}

async fn next_event(socket: &mut Socket) -> Option<ChatServerEvent> {
    loop {
        let message = tokio::time::timeout(WAIT, socket.next())
            .await
            .expect("event before timeout")?
            .expect("websocket frame");

        match message {
            Message::Text(text) => {
                return Some(serde_json::from_str(&text).expect("server event json"))
            }
            Message::Close(_) => return None,
            _ => continue,
        }
    }
}

#[tokio::test]
async fn websocket_streams_snapshot_submissions_and_replies() {
    let state = create_test_gateway_state(REPLY_DELAY);
    let sessions = Arc::clone(&state.sessions);
    let controller = sessions.open().await;
    let addr = spawn_server(state).await;

    let url = format!("ws://{addr}/ws/chat/{}", controller.id());
    let (mut socket, _) = connect_async(url).await.expect("connect websocket");

    match next_event(&mut socket).await {
        Some(ChatServerEvent::Snapshot {
            session_id,
            entries,
        }) => {
            assert_eq!(session_id, controller.id().to_string());
            assert_eq!(entries.len(), 2);
        }
        other => panic!("expected snapshot, got {other:?}"),
    }

    socket
        .send(Message::Text(
            r#"{"type":"submit","text":"balance please"}"#.to_string(),
        ))
        .await
        .expect("send submit");

    match next_event(&mut socket).await {
        Some(ChatServerEvent::Entry { entry }) => {
            assert_eq!(entry.from, "user");
            assert_eq!(entry.text, "balance please");
        }
        other => panic!("expected user entry, got {other:?}"),
    }

    match next_event(&mut socket).await {
        Some(ChatServerEvent::Entry { entry }) => {
            assert_eq!(entry.from, "bot");
            assert_eq!(entry.text, BALANCE_REPLY);
        }
        other => panic!("expected bot entry, got {other:?}"),
    }

    sessions.close(&controller.id()).await.expect("close session");
    assert!(matches!(
        next_event(&mut socket).await,
        Some(ChatServerEvent::Closed { .. })
    ));
    assert!(next_event(&mut socket).await.is_none());
}

#[tokio::test]
async fn websocket_answers_pings_and_reports_bad_events() {
    let state = create_test_gateway_state(REPLY_DELAY);
    let controller = state.sessions.open().await;
    let addr = spawn_server(state).await;

    let url = format!("ws://{addr}/ws/chat/{}", controller.id());
    let (mut socket, _) = connect_async(url).await.expect("connect websocket");
    next_event(&mut socket).await;

    socket
        .send(Message::Text(r#"{"type":"ping"}"#.to_string()))
        .await
        .expect("send ping");
    assert!(matches!(next_event(&mut socket).await, Some(ChatServerEvent::Pong)));

    socket
        .send(Message::Text("not json".to_string()))
        .await
        .expect("send garbage");
    assert!(matches!(
        next_event(&mut socket).await,
        Some(ChatServerEvent::Error { .. })
    ));
}

#[tokio::test]
async fn websocket_rejects_unknown_sessions() {
    let addr = spawn_server(create_test_gateway_state(REPLY_DELAY)).await;

    let url = format!("ws://{addr}/ws/chat/00000000-0000-4000-8000-000000000000");
    assert!(connect_async(url).await.is_err());
}
