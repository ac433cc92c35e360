use crate::helpers::TestApp;
use redirect_checker::generator::{self, CmsClient, GeneratorError, ListingShape};
use redirect_checker::{ExpectedStatus, RedirectSpec, load_spec_file};
use secrecy::SecretString;
use serde_json::json;
use std::time::Duration;
use wiremock::{
    Mock, ResponseTemplate,
    matchers::{bearer_token, method, path, query_param},
};

const CONTENT_PATH: &str = "/api/v3/content/url-redirects";

fn cms_client(app: &TestApp) -> CmsClient {
    CmsClient::new(
        app.server.uri(),
        CONTENT_PATH.to_string(),
        SecretString::from("cms-key".to_string()),
        2,
        Duration::from_secs(5),
    )
    .unwrap()
}

async fn mount_page(app: &TestApp, offset: &str, results: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(CONTENT_PATH))
        .and(bearer_token("cms-key"))
        .and(query_param("limit", "2"))
        .and(query_param("offset", offset))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": results })))
        .expect(1)
        .mount(&app.server)
        .await;
}

fn entry(
    published: &str,
    name: &str,
    source: &str,
    destination: &str,
    permanent: bool,
) -> serde_json::Value {
    json!({
        "published": published,
        "name": name,
        "data": {"source": source, "destination": destination, "permanent": permanent}
    })
}

#[tokio::test]
async fn generated_list_feeds_the_checker() {
    // Arrange
    let app = TestApp::new().await;
    mount_page(
        &app,
        "0",
        json!([
            entry("published", "blog moved", "/blog", "/articles", true),
            entry("draft", "blog draft", "/blog-draft", "/articles", true),
        ]),
    )
    .await;
    mount_page(
        &app,
        "2",
        json!([entry("published", "blog promo", "/promo", "/sale", false)]),
    )
    .await;
    let output = app.dir.path().join("jsons/redirects.json");

    // Act
    let listing = generator::generate(&cms_client(&app), Some("blog"), ListingShape::Permanent)
        .await
        .unwrap();
    generator::write_listing(&output, &listing).unwrap();

    // Assert
    let specs = load_spec_file(&output).unwrap();
    assert_eq!(
        specs,
        vec![
            RedirectSpec::new("/blog", "/articles", ExpectedStatus::from_permanent(true)),
            RedirectSpec::new("/promo", "/sale", ExpectedStatus::from_permanent(false)),
        ]
    );

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written["redirects"][0]["permanent"], json!(true));
}

#[tokio::test]
async fn failed_page_writes_nothing() {
    let app = TestApp::new().await;
    mount_page(
        &app,
        "0",
        json!([
            entry("published", "a", "/a", "/b", true),
            entry("published", "c", "/c", "/d", true),
        ]),
    )
    .await;
    Mock::given(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .expect(1)
        .mount(&app.server)
        .await;

    let outcome = generator::generate(&cms_client(&app), None, ListingShape::StatusCode).await;

    assert!(matches!(
        outcome,
        Err(GeneratorError::UnexpectedStatus { status: 401, .. })
    ));
    assert!(!app.dir.path().join("redirects.json").exists());
}

#[tokio::test]
async fn unfinished_draft_is_skipped() {
    let app = TestApp::new().await;
    mount_page(
        &app,
        "0",
        json!([
            {"published": "draft", "name": "wip", "data": {"source": "/x"}},
            entry("published", "live", "/a", "/b", false),
        ]),
    )
    .await;
    mount_page(&app, "2", json!([])).await;

    let listing = generator::generate(&cms_client(&app), None, ListingShape::StatusCode)
        .await
        .unwrap();

    assert_eq!(listing.len(), 1);
    assert_eq!(listing.redirects[0].initial_url, "/a");
    assert_eq!(listing.redirects[0].status_code, Some(ExpectedStatus::Code(302)));
}

#[tokio::test]
async fn published_entry_without_destination_fails() {
    let app = TestApp::new().await;
    mount_page(
        &app,
        "0",
        json!([{"published": "published", "name": "broken", "data": {"source": "/x"}}]),
    )
    .await;

    let outcome = generator::generate(&cms_client(&app), None, ListingShape::StatusCode).await;

    assert!(matches!(
        outcome,
        Err(GeneratorError::IncompleteEntry { field: "destination", .. })
    ));
}
