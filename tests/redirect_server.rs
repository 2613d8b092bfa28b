//! End-to-end tests over a real TCP listener.

use reqwest::header::{HOST, LOCATION};
use reqwest::StatusCode;
use subdomain_redirector::config::{RedirectConfig, RedirectorConfig};
use subdomain_redirector::http::X_REQUEST_ID;

mod common;

use common::{client, TestServer};

fn config(target_host: &str, host_query_param: &str, always_https: bool) -> RedirectorConfig {
    RedirectorConfig {
        redirect: RedirectConfig {
            target_host: target_host.to_string(),
            host_query_param: host_query_param.to_string(),
            always_https,
        },
        ..RedirectorConfig::default()
    }
}

#[tokio::test]
async fn test_redirects_to_subdomain_of_target() {
    let server = TestServer::start(config("example.org", "", false)).await;

    let res = client()
        .get(server.url("/path"))
        .header(HOST, "test.example.com")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()[LOCATION], "http://test.example.org/path");
    assert!(res.headers().contains_key(X_REQUEST_ID));

    server.stop().await;
}

#[tokio::test]
async fn test_query_param_and_existing_query() {
    let server = TestServer::start(config("example.org", "via", false)).await;

    let res = client()
        .get(server.url("/path?q=1"))
        .header(HOST, "test.example.com:8080")
        .send()
        .await
        .unwrap();

    assert_eq!(
        res.headers()[LOCATION],
        "http://test.example.org/path?q=1&via=test.example.com%3A8080"
    );

    server.stop().await;
}

#[tokio::test]
async fn test_default_host_header_is_local_address() {
    let server = TestServer::start(config("example.org", "via", true)).await;

    let res = client().get(server.url("/path")).send().await.unwrap();

    let expected = format!(
        "https://127.example.org/path?via=127.0.0.1%3A{}",
        server.addr.port()
    );
    assert_eq!(res.headers()[LOCATION], expected.as_str());

    server.stop().await;
}

#[tokio::test]
async fn test_forwarded_proto_and_access_log() {
    let server = TestServer::start(config("example.org", "via", false)).await;
    let log = server.log.clone();

    let res = client()
        .post(server.url("/submit?a=b"))
        .header(HOST, "shop.example.com")
        .header("referer", "http://example.com/")
        .header("user-agent", "Examplebot/1.0")
        .header("x-forwarded-proto", "https")
        .header("x-forwarded-host", "shop.example.com")
        .header("x-forwarded-for", "203.0.113.9")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(
        res.headers()[LOCATION],
        "https://shop.example.org/submit?a=b&via=shop.example.com"
    );

    server.stop().await;

    let entries = log.entries();
    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry.remote_ip, "127.0.0.1");
    assert_eq!(entry.method, "POST");
    assert_eq!(entry.host, "shop.example.com");
    assert_eq!(entry.request_uri, "/submit?a=b");
    assert_eq!(entry.referrer, "http://example.com/");
    assert_eq!(entry.user_agent, "Examplebot/1.0");
    assert_eq!(entry.forwarded_for, "203.0.113.9");
    assert_eq!(entry.forwarded_host, "shop.example.com");
    assert_eq!(entry.forwarded_proto, "https");
}

#[tokio::test]
async fn test_one_log_line_per_request() {
    let server = TestServer::start(config("", "via", false)).await;
    let log = server.log.clone();
    let client = client();

    let requests = (0..20).map(|i| {
        let client = client.clone();
        let url = server.url(&format!("/r/{i}"));
        async move {
            client
                .get(url)
                .header(HOST, "plain.example.com")
                .send()
                .await
                .unwrap()
        }
    });
    let mut handles = Vec::new();
    for request in requests {
        handles.push(tokio::spawn(request));
    }
    for handle in handles {
        let res = handle.await.unwrap();
        assert_eq!(res.status(), StatusCode::FOUND);
        let location = res.headers()[LOCATION].to_str().unwrap().to_string();
        assert!(location.starts_with("http://plain.example.com/r/"));
        assert!(!location.contains("via="));
    }

    server.stop().await;

    let lines = log.lines();
    assert_eq!(lines.len(), 20);
    for line in &lines {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert!(value["Time"].is_string());
        assert_eq!(value["Host"], "plain.example.com");
    }
}

#[tokio::test]
async fn test_get_body_links_to_target() {
    let server = TestServer::start(config("example.org", "", false)).await;

    let res = client()
        .get(server.url("/"))
        .header(HOST, "a.example.com")
        .send()
        .await
        .unwrap();

    assert_eq!(res.headers()["content-type"], "text/html; charset=utf-8");
    let body = res.text().await.unwrap();
    assert_eq!(body, "<a href=\"http://a.example.org/\">Found</a>.\n");

    server.stop().await;
}
