use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use media_gateway::config::Config;
use media_gateway::web::{create_router, AppState};

const RESOLVER_PATH: &str = "/api/proxy";

fn test_config(resolver: &MockServer) -> Config {
    let mut config = Config::default();
    config.upstream.resolver_url = format!("{}{}", resolver.uri(), RESOLVER_PATH);
    config
}

fn test_server(config: Config) -> TestServer {
    let state = AppState::new(config).unwrap();
    TestServer::new(create_router(state)).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let resolver = MockServer::start().await;
    let server = test_server(test_config(&resolver));

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["timestamp"].is_string());

    let response = server.get("/live").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn test_download_resolves_tiktok_link() {
    let resolver = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(RESOLVER_PATH))
        .and(body_json(json!({
            "url": "https://www.tiktok.com/@a/video/1",
            "platform": "tiktok",
            "isHomepage": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "title": "Cool Video!!",
            "medias": [{"type": "video", "quality": "720p", "extension": "mp4"}]
        })))
        .expect(1)
        .mount(&resolver)
        .await;

    let server = test_server(test_config(&resolver));
    let response = server
        .post("/api/download")
        .json(&json!({"url": "https://www.tiktok.com/@a/video/1"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["title"], "Cool Video");
    assert_eq!(body["platform"], "tiktok");
    assert_eq!(body["thumbnail"], "");
    assert_eq!(body["downloads"][0]["filename"], "Cool Video.mp4");
    assert_eq!(body["downloads"][0]["label"], "🎬 720p (mp4)");
    assert_eq!(body["downloads"][0]["size"], "?");
}

#[tokio::test]
async fn test_download_accepts_form_body() {
    let resolver = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(RESOLVER_PATH))
        .and(body_json(json!({
            "url": "https://www.tiktok.com/@a/video/1",
            "platform": "tiktok",
            "isHomepage": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "title": "Cool Video!!",
            "medias": [{"type": "video", "quality": "720p", "extension": "mp4"}]
        })))
        .expect(1)
        .mount(&resolver)
        .await;

    let server = test_server(test_config(&resolver));
    let response = server
        .post("/api/download")
        .form(&[("url", "https://www.tiktok.com/@a/video/1")])
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["title"], "Cool Video");
    assert_eq!(body["downloads"][0]["filename"], "Cool Video.mp4");

    let response = server.post("/api/download").form(&[("url", "")]).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["message"], "URL required");
}

#[tokio::test]
async fn test_download_sends_browser_headers() {
    let resolver = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(RESOLVER_PATH))
        .and(header("origin", "https://fsmvid.com"))
        .and(header("referer", "https://fsmvid.com/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "title": "Clip",
            "thumbnail": "https://img.example/t.jpg",
            "medias": [
                {"type": "video", "quality": "1080p", "extension": "mp4", "contentLength": 2097152},
                {"type": "audio", "extension": "m4a", "url": "https://cdn.example/a.m4a"}
            ]
        })))
        .expect(1)
        .mount(&resolver)
        .await;

    let server = test_server(test_config(&resolver));
    let response = server
        .post("/api/download")
        .json(&json!({"url": "https://youtu.be/abc"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["platform"], "youtube");
    assert_eq!(body["thumbnail"], "https://img.example/t.jpg");
    assert_eq!(body["downloads"][0]["label"], "🎬 1080p (mp4) 🔊");
    assert_eq!(body["downloads"][0]["size"], "2.0MB");
    assert_eq!(body["downloads"][1]["ext"], "mp3");
    assert_eq!(body["downloads"][1]["filename"], "Clip.mp3");
    assert_eq!(body["downloads"][1]["url"], "https://cdn.example/a.m4a");
}

#[tokio::test]
async fn test_download_rejection_is_ok_with_message() {
    let resolver = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(RESOLVER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "error"})))
        .mount(&resolver)
        .await;

    let server = test_server(test_config(&resolver));
    let response = server
        .post("/api/download")
        .json(&json!({"url": "https://www.instagram.com/p/xyz"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({"status": false, "message": "Gagal mengambil data."})
    );
}

#[tokio::test]
async fn test_download_requires_url() {
    let resolver = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&resolver)
        .await;

    let server = test_server(test_config(&resolver));
    let expected = json!({"status": false, "message": "URL required"});

    for body in [json!({}), json!({"url": ""}), json!({"url": null})] {
        let response = server.post("/api/download").json(&body).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(response.json::<Value>(), expected);
    }

    let response = server.post("/api/download").text("url=https://x.com/a").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>(), expected);
}

#[tokio::test]
async fn test_download_upstream_http_error_is_server_error() {
    let resolver = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(RESOLVER_PATH))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .expect(1)
        .mount(&resolver)
        .await;

    let server = test_server(test_config(&resolver));
    let response = server
        .post("/api/download")
        .json(&json!({"url": "https://fb.watch/abc"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({"status": false, "message": "Server Error / Timeout"})
    );
}

#[tokio::test]
async fn test_download_timeout_is_server_error() {
    let resolver = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(RESOLVER_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "success", "medias": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&resolver)
        .await;

    let mut config = test_config(&resolver);
    config.upstream.resolver_timeout = Duration::from_millis(200);
    let server = test_server(config);

    let response = server
        .post("/api/download")
        .json(&json!({"url": "https://x.com/u/status/1"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>()["message"], "Server Error / Timeout");
}

#[tokio::test]
async fn test_stream_relays_bytes_with_default_filename() {
    let resolver = MockServer::start().await;
    let media_host = MockServer::start().await;
    let payload = vec![7u8; 64 * 1024];

    Mock::given(method("GET"))
        .and(path("/v.mp4"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "video/mp4")
                .set_body_bytes(payload.clone()),
        )
        .expect(1)
        .mount(&media_host)
        .await;

    let server = test_server(test_config(&resolver));
    let response = server
        .get("/api/stream")
        .add_query_param("url", format!("{}/v.mp4", media_host.uri()))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.header("content-disposition"),
        "attachment; filename=\"media.mp4\""
    );
    assert_eq!(response.header("content-type"), "video/mp4");
    assert_eq!(response.header("content-length"), "65536");
    assert_eq!(response.as_bytes().as_ref(), payload.as_slice());
}

#[tokio::test]
async fn test_stream_uses_requested_filename() {
    let resolver = MockServer::start().await;
    let media_host = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ID3".to_vec()))
        .mount(&media_host)
        .await;

    let server = test_server(test_config(&resolver));
    let response = server
        .get("/api/stream")
        .add_query_param("url", format!("{}/a", media_host.uri()))
        .add_query_param("name", "Cool Video.mp3")
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.header("content-disposition"),
        "attachment; filename=\"Cool Video.mp3\""
    );
    assert_eq!(response.header("content-type"), "application/octet-stream");
    assert_eq!(response.text(), "ID3");
}

#[tokio::test]
async fn test_stream_requires_url() {
    let resolver = MockServer::start().await;
    let server = test_server(test_config(&resolver));

    let response = server.get("/api/stream").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), "No URL");

    let response = server.get("/api/stream").add_query_param("url", "").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), "No URL");
}

#[tokio::test]
async fn test_stream_unreadable_query_is_stream_failure() {
    let resolver = MockServer::start().await;
    let server = test_server(test_config(&resolver));

    let response = server.get("/api/stream?url=a&url=b").await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.text(), "Gagal Stream.");
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let resolver = MockServer::start().await;
    let server = test_server(test_config(&resolver));

    let first = server.get("/live").await;
    let second = server.get("/api/stream").await;

    let first_id = first.header("x-request-id");
    let second_id = second.header("x-request-id");
    let first_id = first_id.to_str().unwrap();
    assert!(uuid::Uuid::parse_str(first_id).is_ok(), "{first_id}");
    assert_ne!(first_id, second_id.to_str().unwrap());
}

#[tokio::test]
async fn test_stream_upstream_failure_is_server_error() {
    let resolver = MockServer::start().await;
    let media_host = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gone.mp4"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&media_host)
        .await;

    let server = test_server(test_config(&resolver));
    let response = server
        .get("/api/stream")
        .add_query_param("url", format!("{}/gone.mp4", media_host.uri()))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.text(), "Gagal Stream.");
}

#[tokio::test]
async fn test_stream_head_timeout_is_server_error() {
    let resolver = MockServer::start().await;
    let media_host = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&media_host)
        .await;

    let mut config = test_config(&resolver);
    config.upstream.relay_timeout = Duration::from_millis(200);
    let server = test_server(config);

    let response = server
        .get("/api/stream")
        .add_query_param("url", format!("{}/slow.mp4", media_host.uri()))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.text(), "Gagal Stream.");
}
