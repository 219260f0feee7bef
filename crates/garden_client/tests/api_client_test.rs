//! Tests for the HTTP API client against a throwaway local server.

use garden_client::{ApiClient, BotApi};
use garden_error::{FetchErrorKind, GardenErrorKind};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve a single canned HTTP response and return the base URL.
async fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = vec![0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    format!("http://{}", addr)
}

/// Accept a connection and never answer it.
async fn serve_silence() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        if let Ok((socket, _)) = listener.accept().await {
            tokio::time::sleep(Duration::from_secs(30)).await;
            drop(socket);
        }
    });

    format!("http://{}", addr)
}

fn fetch_kind(err: &garden_error::GardenError) -> FetchErrorKind {
    match err.kind() {
        GardenErrorKind::Fetch(fetch) => fetch.kind.clone(),
        other => panic!("expected fetch error, got {}", other),
    }
}

#[tokio::test]
async fn test_fetch_stats_success() -> anyhow::Result<()> {
    let base = serve_once(
        "200 OK",
        r#"{"stats":{"guilds":10,"totalMembers":500,"notifications":{"total":20},"uptime":{"seconds":3661}}}"#,
    )
    .await;
    let client = ApiClient::new(base, Duration::from_secs(5))?;

    let response = client.fetch_stats().await?;

    assert_eq!(response.stats.guilds, Some(10));
    assert_eq!(response.stats.total_members, Some(500));
    assert_eq!(response.stats.notifications.unwrap().total, Some(20));
    assert_eq!(response.stats.uptime.unwrap().seconds, Some(3661));
    Ok(())
}

#[tokio::test]
async fn test_fetch_commands_success() -> anyhow::Result<()> {
    let base = serve_once(
        "200 OK",
        r#"{"commands":[{"name":"weather","description":"Current weather"}]}"#,
    )
    .await;
    let client = ApiClient::new(base, Duration::from_secs(5))?;

    let response = client.fetch_commands().await?;

    assert_eq!(response.commands.len(), 1);
    assert_eq!(response.commands[0].name, "weather");
    Ok(())
}

#[tokio::test]
async fn test_error_status_is_reported() -> anyhow::Result<()> {
    let base = serve_once("503 Service Unavailable", r#"{"error":"busy"}"#).await;
    let client = ApiClient::new(base, Duration::from_secs(5))?;

    let err = client.fetch_stats().await.unwrap_err();

    assert_eq!(fetch_kind(&err), FetchErrorKind::Status { status: 503 });
    Ok(())
}

#[tokio::test]
async fn test_malformed_body_is_reported() -> anyhow::Result<()> {
    let base = serve_once("200 OK", r#"{"commands": "soon"}"#).await;
    let client = ApiClient::new(base, Duration::from_secs(5))?;

    let err = client.fetch_commands().await.unwrap_err();

    assert!(matches!(fetch_kind(&err), FetchErrorKind::MalformedBody(_)));
    Ok(())
}

#[tokio::test]
async fn test_slow_server_times_out() -> anyhow::Result<()> {
    let base = serve_silence().await;
    let client = ApiClient::new(base, Duration::from_millis(200))?;

    let err = client.fetch_stats().await.unwrap_err();

    assert_eq!(fetch_kind(&err), FetchErrorKind::Timeout { after_ms: 200 });
    Ok(())
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() -> anyhow::Result<()> {
    // Bind then drop to get a port nothing is listening on.
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        listener.local_addr()?
    };
    let client = ApiClient::new(format!("http://{}", addr), Duration::from_secs(5))?;

    let err = client.fetch_stats().await.unwrap_err();

    assert!(matches!(fetch_kind(&err), FetchErrorKind::Transport(_)));
    Ok(())
}
