//! Probe tests against mock servers

use std::collections::HashMap;
use std::time::Duration;
use sumi_sieve::config::UserAgentConfig;
use sumi_sieve::crawler::{
    build_http_client, head_probe, probe_all, DispatchOptions, ProbeError, ProbeMode,
};
use sumi_sieve::{ProbeOutcome, SieveError};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::CLOSED_PORT_URL;

fn probe_client(timeout: Duration) -> reqwest::Client {
    let config = UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: "https://example.com/contact".to_string(),
    };
    build_http_client(&config, timeout).unwrap()
}

async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("HEAD"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_head_probe_reports_status() {
    let server = MockServer::start().await;
    mount_status(&server, "/ok", 200).await;
    mount_status(&server, "/private", 403).await;
    mount_status(&server, "/broken", 500).await;

    let client = probe_client(Duration::from_secs(2));
    let uri = server.uri();

    let cases = [
        ("/ok", 200),
        ("/private", 403),
        ("/broken", 500),
        // Unmatched routes fall through to wiremock's 404
        ("/missing", 404),
    ];
    for (route, expected) in cases {
        let status = head_probe(format!("{}{}", uri, route), client.clone()).await;
        assert_eq!(status, Ok(expected), "status for {}", route);
    }
}

#[tokio::test]
async fn test_head_probe_sends_user_agent() {
    let server = MockServer::start().await;
    let agent = "TestBot/1.0.0 (+https://example.com/contact)";
    Mock::given(method("HEAD"))
        .and(path("/ua"))
        .and(header("user-agent", agent))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = probe_client(Duration::from_secs(2));
    let status = head_probe(format!("{}/ua", server.uri()), client).await;
    assert_eq!(status, Ok(200));
}

#[tokio::test]
async fn test_head_probe_follows_redirect() {
    let server = MockServer::start().await;
    let to: &str = &format!("{}/new", server.uri());
    Mock::given(method("HEAD"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", to))
        .mount(&server)
        .await;
    mount_status(&server, "/new", 200).await;

    let client = probe_client(Duration::from_secs(2));
    let status = head_probe(format!("{}/old", server.uri()), client).await;
    assert_eq!(status, Ok(200));
}

#[tokio::test]
async fn test_head_probe_timeout() {
    let server = MockServer::start().await;
    let slow = ResponseTemplate::new(200).set_delay(Duration::from_secs(2));
    Mock::given(method("HEAD"))
        .and(path("/slow"))
        .respond_with(slow)
        .mount(&server)
        .await;

    let client = probe_client(Duration::from_millis(200));
    let result = head_probe(format!("{}/slow", server.uri()), client).await;
    assert_eq!(result, Err(ProbeError::Timeout));
}

#[tokio::test]
async fn test_head_probe_connection_refused() {
    let client = probe_client(Duration::from_secs(2));
    let result = head_probe(CLOSED_PORT_URL.to_string(), client).await;
    assert!(matches!(result, Err(ProbeError::Connect(_))));
}

#[tokio::test]
async fn test_probe_all_maps_every_link() {
    let server = MockServer::start().await;
    mount_status(&server, "/ok", 200).await;
    mount_status(&server, "/private", 403).await;
    mount_status(&server, "/broken", 500).await;

    let uri = server.uri();
    let links: HashMap<String, u32> = ["/ok", "/private", "/broken"]
        .iter()
        .map(|p| (format!("{}{}", uri, p), 1))
        .collect();

    let client = probe_client(Duration::from_secs(2));
    let results = probe_all(&links, &client, head_probe, &DispatchOptions::default())
        .await
        .unwrap();

    assert_eq!(results.len(), 3);
    for (route, status) in [("/ok", 200), ("/private", 403), ("/broken", 500)] {
        let url = format!("{}{}", uri, route);
        assert_eq!(results[&url], ProbeOutcome::Status(status));
    }
}

#[tokio::test]
async fn test_probe_all_strict_connection_refused() {
    let server = MockServer::start().await;
    mount_status(&server, "/ok", 200).await;

    let links = HashMap::from([
        (format!("{}/ok", server.uri()), 1),
        (CLOSED_PORT_URL.to_string(), 1),
    ]);
    let options = DispatchOptions {
        mode: ProbeMode::Strict,
        batch_deadline: None,
    };

    let client = probe_client(Duration::from_secs(2));
    let result = probe_all(&links, &client, head_probe, &options).await;

    match result {
        Err(SieveError::ProbeTransport { url, source }) => {
            assert_eq!(url, CLOSED_PORT_URL);
            assert!(matches!(source, ProbeError::Connect(_)));
        }
        other => panic!("expected ProbeTransport, got {:?}", other),
    }
}

#[tokio::test]
async fn test_probe_all_relaxed_connection_refused() {
    let server = MockServer::start().await;
    mount_status(&server, "/ok", 200).await;

    let ok_url = format!("{}/ok", server.uri());
    let links = HashMap::from([(ok_url.clone(), 1), (CLOSED_PORT_URL.to_string(), 1)]);
    let options = DispatchOptions {
        mode: ProbeMode::Relaxed,
        batch_deadline: None,
    };

    let client = probe_client(Duration::from_secs(2));
    let results = probe_all(&links, &client, head_probe, &options)
        .await
        .unwrap();

    assert_eq!(results[&ok_url], ProbeOutcome::Status(200));
    assert!(results[CLOSED_PORT_URL].is_unreachable());
    assert_eq!(results[CLOSED_PORT_URL].status_code(), 0);
}
