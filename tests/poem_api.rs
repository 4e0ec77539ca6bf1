// Poem flow wire format and the HTTP client, exercised against a tiny local server.

use photopoet::api::models::{ErrorBody, FlowRequest, GeneratePoemInput};
use photopoet::api::poem::{error_message, parse_output, GenerateError, HttpPoemGenerator, PoemGenerator};
use photopoet::config::GeneratorConfig;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

// ── Wire format ──────────────────────────────────────────────────────────────

#[test]
fn test_input_serializes_camel_case() {
    let input = GeneratePoemInput {
        photo_url: "data:image/png;base64,AAA".into(),
    };
    let json = serde_json::to_value(&input).unwrap();
    assert_eq!(json, serde_json::json!({ "photoUrl": "data:image/png;base64,AAA" }));

    let wrapped = serde_json::to_value(FlowRequest { data: &input }).unwrap();
    assert_eq!(
        wrapped,
        serde_json::json!({ "data": { "photoUrl": "data:image/png;base64,AAA" } })
    );
}

#[test]
fn test_parse_output_accepts_wrapped_and_bare() {
    let wrapped = parse_output(r#"{"result": {"poem": "Roses bloom"}}"#).unwrap();
    assert_eq!(wrapped.poem, "Roses bloom");

    let bare = parse_output(r#"{"poem": "Violets too"}"#).unwrap();
    assert_eq!(bare.poem, "Violets too");
}

#[test]
fn test_parse_output_rejects_missing_poem() {
    let err = parse_output(r#"{"result": {"text": "nope"}}"#).unwrap_err();
    assert!(matches!(err, GenerateError::Malformed(_)));

    assert!(parse_output("not json").is_err());
}

#[test]
fn test_error_message_prefers_most_specific_field() {
    let status = reqwest::StatusCode::TOO_MANY_REQUESTS;
    assert_eq!(
        error_message(status, r#"{"error": {"message": "quota exceeded", "status": "RESOURCE_EXHAUSTED"}}"#),
        "quota exceeded"
    );
    assert_eq!(
        error_message(status, r#"{"error": {"status": "RESOURCE_EXHAUSTED"}}"#),
        "RESOURCE_EXHAUSTED"
    );
    assert_eq!(error_message(status, r#"{"error": "bad key"}"#), "bad key");
    assert_eq!(error_message(status, r#"{"message": "slow down"}"#), "slow down");
    assert_eq!(error_message(status, "<html>oops</html>"), "HTTP 429 Too Many Requests");
}

#[test]
fn test_error_body_ignores_blank_messages() {
    let body: ErrorBody = serde_json::from_str(r#"{"message": "   "}"#).unwrap();
    assert_eq!(body.best_message(), None);
}

// ── HTTP client ──────────────────────────────────────────────────────────────

/// Serve one HTTP request with `status` and `body`; returns the raw request.
async fn serve_once(status: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/generatePoem", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            request.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&request);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|l| {
                        l.to_ascii_lowercase()
                            .strip_prefix("content-length:")
                            .map(|v| v.trim().parse::<usize>().unwrap())
                    })
                    .unwrap_or(0);
                if request.len() >= header_end + 4 + content_length {
                    break;
                }
            }
            if n == 0 {
                break;
            }
        }
        let response = format!(
            "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&request).into_owned()
    });

    (url, handle)
}

fn generator(endpoint: String, envelope: bool, api_key: Option<&str>) -> HttpPoemGenerator {
    HttpPoemGenerator::new(&GeneratorConfig {
        endpoint,
        api_key: api_key.map(String::from),
        timeout_secs: 5,
        envelope,
    })
}

fn input() -> GeneratePoemInput {
    GeneratePoemInput {
        photo_url: "data:image/png;base64,AAA".into(),
    }
}

#[tokio::test]
async fn test_http_generator_posts_envelope_and_reads_result() {
    let (url, server) = serve_once("200 OK", r#"{"result": {"poem": "Roses bloom"}}"#).await;
    let client = generator(url, true, Some("secret"));

    let output = client.generate(input()).await.unwrap();
    assert_eq!(output.poem, "Roses bloom");

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /generatePoem"));
    assert!(request.to_ascii_lowercase().contains("authorization: bearer secret"));
    assert!(request.contains(r#"{"data":{"photoUrl":"data:image/png;base64,AAA"}}"#));
}

#[tokio::test]
async fn test_http_generator_bare_request() {
    let (url, server) = serve_once("200 OK", r#"{"poem": "Violets too"}"#).await;
    let client = generator(url, false, None);

    let output = client.generate(input()).await.unwrap();
    assert_eq!(output.poem, "Violets too");

    let request = server.await.unwrap();
    assert!(request.contains(r#"{"photoUrl":"data:image/png;base64,AAA"}"#));
}

#[tokio::test]
async fn test_http_generator_surfaces_service_error() {
    let (url, _server) = serve_once(
        "429 Too Many Requests",
        r#"{"error": {"message": "quota exceeded"}}"#,
    )
    .await;
    let client = generator(url, true, None);

    let err = client.generate(input()).await.unwrap_err();
    assert_eq!(err.to_string(), "quota exceeded");
}

#[tokio::test]
async fn test_http_generator_connection_refused() {
    // Bind then drop to get a port nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/generatePoem", listener.local_addr().unwrap());
    drop(listener);

    let err = generator(url, true, None).generate(input()).await.unwrap_err();
    assert!(matches!(err, GenerateError::Transport(_)));
}
