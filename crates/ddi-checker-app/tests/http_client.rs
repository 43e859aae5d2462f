//! HttpDrugService against a canned local HTTP responder.

use std::time::Duration;

use ddi_checker_app::HttpDrugService;
use ddi_checker_core::{DrugService, ServiceError, Severity};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve one request with `status` and `body`, returning the raw request text.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let task = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        request
    });
    (base, task)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf);
        if let Some(end) = text.find("\r\n\r\n") {
            let content_length = text[..end]
                .lines()
                .find_map(|l| {
                    let (name, value) = l.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn client(base: &str) -> HttpDrugService {
    HttpDrugService::new(base, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_search_posts_query() {
    let (base, server) = serve_once("200 OK", r#"{"drugs":[{"name":"aspirin","id":7}]}"#).await;

    let drugs = client(&base).search_drugs("asp").await.unwrap();
    let request = server.await.unwrap();

    assert!(request.starts_with("POST /search_drugs/ "));
    assert!(request.contains(r#"{"query":"asp"}"#));
    assert_eq!(drugs.len(), 1);
    assert_eq!(drugs[0].name, "aspirin");
    assert_eq!(drugs[0].extra["id"], 7);
}

#[tokio::test]
async fn test_check_posts_names_in_order() {
    let body = r#"{"total_interactions":1,"interactions":[{"drug1":"warfarin","drug2":"aspirin","severity":"Major","severity_th":"รุนแรงมาก","description":"Bleeding","description_th":"เลือดออก"}]}"#;
    let (base, server) = serve_once("200 OK", body).await;

    let names = vec!["warfarin".to_string(), "aspirin".to_string()];
    let interactions = client(&base).check_interactions(&names).await.unwrap();
    let request = server.await.unwrap();

    assert!(request.starts_with("POST /check_interactions/ "));
    assert!(request.contains(r#"{"drugs":["warfarin","aspirin"]}"#));
    assert_eq!(interactions[0].severity, Severity::Major);
}

#[tokio::test]
async fn test_error_status() {
    let (base, server) = serve_once("400 Bad Request", r#"{"detail":"At least 2 drugs are required"}"#).await;

    let err = client(&base)
        .check_interactions(&["aspirin".to_string()])
        .await
        .unwrap_err();
    server.await.unwrap();

    assert_eq!(err, ServiceError::Status { status: 400 });
}

#[tokio::test]
async fn test_malformed_body() {
    let (base, server) = serve_once("200 OK", "<html>oops</html>").await;

    let err = client(&base).search_drugs("asp").await.unwrap_err();
    server.await.unwrap();

    assert!(matches!(err, ServiceError::Malformed(_)));
}

#[tokio::test]
async fn test_health_ok_with_body() {
    let (base, server) = serve_once("200 OK", r#"{"status":"healthy","data_loaded":false}"#).await;

    let report = client(&base).health().await.unwrap();
    let request = server.await.unwrap();

    assert!(request.starts_with("GET /health "));
    assert_eq!(report.data_loaded, Some(false));
}

#[tokio::test]
async fn test_health_non_success() {
    let (base, server) = serve_once("503 Service Unavailable", "{}").await;

    let err = client(&base).health().await.unwrap_err();
    server.await.unwrap();

    assert_eq!(err, ServiceError::Status { status: 503 });
}

#[tokio::test]
async fn test_unreachable_service() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = client(&base).health().await.unwrap_err();
    assert!(err.is_network());
}
