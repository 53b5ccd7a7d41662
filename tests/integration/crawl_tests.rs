//! End-to-end sieve tests against mock servers
//!
//! The seed page is served by wiremock; its links point back at the same
//! server (plus one closed port), so every stage runs over real HTTP.

use sumi_sieve::config::Config;
use sumi_sieve::crawler::{fetch_page, run_crawl, Crawler, ProbeMode};
use sumi_sieve::url::MatchPolicy;
use sumi_sieve::{FetchError, ProbeOutcome, SieveError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::{create_test_config, CLOSED_PORT_URL};

/// Seed the page is analyzed as, so the domain token is "example"
const SEED: &str = "https://www.example.com";

const HTML_MIME: &str = "text/html; charset=utf-8";

/// A 200 response whose body is served as `mime`
fn page_of_type(body: &str, mime: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, mime)
}

/// Mounts the seed page and the HEAD routes its links point at
async fn mount_site(server: &MockServer) {
    let uri = server.uri();
    let html = format!(
        r##"<!DOCTYPE html>
<html>
<head><title>Example Domain</title></head>
<body>
    <nav><a href="/example/about">About</a></nav>
    <a href="{uri}/example/about#team">About (again)</a>
    <a href="{uri}/private">Members only</a>
    <a href="{uri}/gone">Old page</a>
    <a href="{closed}">Dead host</a>
    <a href="mailto:team@example.com">Mail</a>
    <a href="javascript:void(0)">Menu</a>
    <a href="#top">Top</a>
</body>
</html>"##,
        uri = uri,
        closed = CLOSED_PORT_URL
    );

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(page_of_type(&html, HTML_MIME))
        .mount(server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/example/about"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/private"))
        .respond_with(ResponseTemplate::new(403))
        .mount(server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(410))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_page_extracts_counted_links() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let client = reqwest::Client::new();
    let page = fetch_page(&client, &server.uri()).await.unwrap();

    let about = format!("{}/example/about", server.uri());
    assert_eq!(page.title.as_deref(), Some("Example Domain"));
    assert_eq!(page.links.len(), 4);
    assert_eq!(page.links.get(&about), Some(&2));
    assert_eq!(page.links.get(CLOSED_PORT_URL), Some(&1));
    assert!(page.links.keys().all(|l| !l.starts_with("mailto:")));
}

#[tokio::test]
async fn test_full_sieve_relaxed() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    let uri = server.uri();

    let crawler = Crawler::new(&create_test_config(ProbeMode::Relaxed)).unwrap();
    let client = reqwest::Client::new();
    let page = fetch_page(&client, &uri).await.unwrap();
    let result = crawler.analyze(SEED, page).await.unwrap();

    let about = format!("{}/example/about", uri);
    let private = format!("{}/private", uri);
    let gone = format!("{}/gone", uri);

    assert_eq!(result.domain_token.as_str(), "example");
    assert_eq!(result.internal_links, vec![about.clone()]);
    assert_eq!(result.external_links.len(), 3);
    assert_eq!(result.occurrences(&about), 2);

    // Every discovered link got exactly one probe outcome
    assert_eq!(result.probe_results.len(), result.total_links());
    assert_eq!(result.outcome(&about), Some(&ProbeOutcome::Status(200)));
    assert_eq!(result.outcome(&private), Some(&ProbeOutcome::Status(403)));
    assert_eq!(result.outcome(&gone), Some(&ProbeOutcome::Status(410)));
    assert!(result.outcome(CLOSED_PORT_URL).unwrap().is_unreachable());

    let mut expected = vec![CLOSED_PORT_URL.to_string(), gone, private];
    expected.sort();
    assert_eq!(result.forbidden_links, expected);
}

#[tokio::test]
async fn test_full_sieve_strict_aborts_on_refused_connection() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let crawler = Crawler::new(&create_test_config(ProbeMode::Strict)).unwrap();
    let client = reqwest::Client::new();
    let page = fetch_page(&client, &server.uri()).await.unwrap();
    let result = crawler.analyze(SEED, page).await;

    match result {
        Err(SieveError::ProbeTransport { url, .. }) => assert_eq!(url, CLOSED_PORT_URL),
        other => panic!("expected ProbeTransport, got {:?}", other),
    }
}

#[tokio::test]
async fn test_host_label_policy_over_http() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let mut config = create_test_config(ProbeMode::Relaxed);
    config.classify.match_policy = MatchPolicy::HostLabel;
    let crawler = Crawler::new(&config).unwrap();

    let client = reqwest::Client::new();
    let page = fetch_page(&client, &server.uri()).await.unwrap();
    let result = crawler.analyze(SEED, page).await.unwrap();

    // "/example/about" only matches on the path, so it is external here
    assert!(result.internal_links.is_empty());
    assert_eq!(result.external_links.len(), 4);
}

#[tokio::test]
async fn test_run_fetches_and_probes() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let crawler = Crawler::new(&create_test_config(ProbeMode::Relaxed)).unwrap();
    let result = crawler.run(&server.uri()).await.unwrap();

    assert_eq!(result.seed_url, server.uri());
    assert_eq!(result.page_title.as_deref(), Some("Example Domain"));
    assert_eq!(result.total_links(), 4);
    assert_eq!(
        result.internal_links.len() + result.external_links.len(),
        result.total_links()
    );
    assert_eq!(result.forbidden_links.len(), 3);
}

#[tokio::test]
async fn test_seed_page_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = run_crawl(&create_test_config(ProbeMode::Relaxed), &server.uri()).await;

    match result {
        Err(SieveError::Fetch(FetchError::Status { status, .. })) => assert_eq!(status, 500),
        other => panic!("expected fetch status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_seed_page_unreachable() {
    let result = run_crawl(&Config::default(), CLOSED_PORT_URL).await;
    assert!(matches!(
        result,
        Err(SieveError::Fetch(FetchError::Request { .. }))
    ));
}

#[tokio::test]
async fn test_page_without_links() {
    let server = MockServer::start().await;
    let html = "<html><head><title>Empty</title></head><body></body></html>";
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(page_of_type(html, "text/html"))
        .mount(&server)
        .await;

    let result = run_crawl(&create_test_config(ProbeMode::Strict), &server.uri())
        .await
        .unwrap();

    assert_eq!(result.total_links(), 0);
    assert!(result.probe_results.is_empty());
    assert!(result.forbidden_links.is_empty());
}

#[tokio::test]
async fn test_seed_page_not_html() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/report.pdf"))
        .respond_with(page_of_type("%PDF-1.7", "application/pdf"))
        .mount(&server)
        .await;

    let seed = format!("{}/report.pdf", server.uri());
    let err = run_crawl(&create_test_config(ProbeMode::Relaxed), &seed)
        .await
        .unwrap_err();

    match err {
        SieveError::Fetch(FetchError::ContentMismatch { content_type, .. }) => {
            assert_eq!(content_type, "application/pdf");
        }
        other => panic!("expected content mismatch, got {:?}", other),
    }
}
