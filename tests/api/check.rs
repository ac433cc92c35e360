use crate::helpers::{TestApp, test_checker};
use redirect_checker::report::{FAILED_TEXT_FILE, RESULTS_FILE};
use redirect_checker::{
    BatchRunner, ExpectedStatus, FailedReportFormat, RedirectSpec, ReportWriter,
    VerificationResult, VerificationStatus, load_spec_file,
};
use std::fs;

#[tokio::test]
async fn permanent_redirect_to_expected_destination_passes() {
    // Arrange
    let app = TestApp::new().await;
    app.redirect("/old", 301, "/new").await;
    let specs = vec![RedirectSpec::new("/old", "/new", 301)];

    // Act
    let report = BatchRunner::new(&test_checker())
        .run(&specs, Some(&app.base_url()))
        .await
        .unwrap();

    // Assert
    let result = &report.results()[0];
    assert_eq!(result.status, VerificationStatus::Passed);
    assert_eq!(result.actual_status_code, Some(301));
}

#[tokio::test]
async fn temporary_redirect_where_permanent_expected_fails() {
    let app = TestApp::new().await;
    app.redirect("/old", 302, "/new").await;
    let specs = vec![RedirectSpec::new("/old", "/new", 301)];

    let report = BatchRunner::new(&test_checker())
        .run(&specs, Some(&app.base_url()))
        .await
        .unwrap();

    let result = &report.results()[0];
    assert_eq!(result.status, VerificationStatus::Failed);
    assert_eq!(result.actual_status_code, Some(302));
}

#[tokio::test]
async fn unresolvable_host_is_recorded_as_error() {
    let specs = vec![RedirectSpec::new(
        "http://nonexistent.invalid/x",
        "http://nonexistent.invalid/y",
        301,
    )];

    let report = BatchRunner::new(&test_checker())
        .run(&specs, None)
        .await
        .unwrap();

    let result = &report.results()[0];
    assert_eq!(result.status, VerificationStatus::Error);
    assert!(result.actual_redirect_url.is_none());
    assert!(result.actual_status_code.is_none());
    assert!(result.error.as_deref().is_some_and(|e| !e.is_empty()));
}

#[tokio::test]
async fn rerunning_the_same_list_gives_the_same_outcomes() {
    let app = TestApp::new().await;
    wiremock::Mock::given(wiremock::matchers::path("/old"))
        .respond_with(wiremock::ResponseTemplate::new(301).insert_header("Location", "/new/"))
        .expect(2)
        .mount(&app.server)
        .await;
    let specs = vec![RedirectSpec::new("/old", "/new", 301)];
    let checker = test_checker();
    let runner = BatchRunner::new(&checker);

    let first = runner.run(&specs, Some(&app.base_url())).await.unwrap();
    let second = runner.run(&specs, Some(&app.base_url())).await.unwrap();

    let statuses = |report: &redirect_checker::BatchReport| -> Vec<VerificationStatus> {
        report.results().iter().map(|r| r.status).collect()
    };
    assert_eq!(statuses(&first), statuses(&second));
    assert_eq!(statuses(&first), vec![VerificationStatus::Passed]);
}

#[tokio::test]
async fn wrapped_list_runs_end_to_end_and_writes_reports() {
    // Arrange
    let app = TestApp::new().await;
    app.redirect("/blog", 308, "/articles/").await;
    app.redirect("/promo/wildcard", 302, "/sale").await;
    app.redirect("/about", 301, "/team").await;
    let spec_file = app.write_file(
        "redirects.json",
        r#"{"redirects": [
            {"initial_url": "/blog", "redirected_url": "/articles", "permanent": true},
            {"initial_url": "/promo/*", "redirected_url": "/sale", "permanent": false},
            {"initial_url": "/about", "redirected_url": "/company", "status_code": 301}
        ]}"#,
    );

    // Act
    let specs = load_spec_file(&spec_file).unwrap();
    let report = BatchRunner::new(&test_checker())
        .run(&specs, Some(&app.base_url()))
        .await
        .unwrap();
    let written = ReportWriter::new(app.report_dir(), FailedReportFormat::Text)
        .write(&report)
        .unwrap();

    // Assert
    assert_eq!(
        (report.passed(), report.failed(), report.errors()),
        (2, 1, 0)
    );

    assert_eq!(written.results, app.report_dir().join(RESULTS_FILE));
    let results: Vec<VerificationResult> =
        serde_json::from_str(&fs::read_to_string(&written.results).unwrap()).unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].expected_status_code, ExpectedStatus::AnyOf(vec![301, 308]));
    assert_eq!(results[1].initial_url, app.url("/promo/wildcard"));

    let failed = fs::read_to_string(app.report_dir().join(FAILED_TEXT_FILE)).unwrap();
    assert!(failed.starts_with(&format!("URL: {}\n", app.url("/about"))));
    assert!(failed.contains(&format!("Actual Redirected URL: {}\n", app.url("/team"))));
    assert!(failed.contains("Status: Failed\n"));
    assert_eq!(failed.matches(&"-".repeat(50)).count(), 1);
}
