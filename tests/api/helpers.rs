use redirect_checker::{CheckOptions, RedirectChecker};
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;
use url::Url;
use wiremock::{Mock, MockServer, ResponseTemplate, matchers::path};

/// A mock site to check redirects against, plus a scratch directory for files.
pub struct TestApp {
    pub server: MockServer,
    pub dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn base_url(&self) -> Url {
        Url::parse(&self.server.uri()).unwrap()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.server.uri(), path)
    }

    pub async fn redirect(&self, from: &str, status: u16, to: &str) {
        Mock::given(path(from))
            .respond_with(ResponseTemplate::new(status).insert_header("Location", to))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn report_dir(&self) -> PathBuf {
        self.dir.path().join("reports")
    }
}

pub fn test_checker() -> RedirectChecker {
    RedirectChecker::new(CheckOptions {
        timeout: Duration::from_secs(5),
        ..CheckOptions::default()
    })
    .unwrap()
}
