use crate::domain::ExpectedStatus;

/// A single redirect expectation: requesting `source_url` should answer
/// with one of `expected_status` and point at `expected_destination`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectSpec {
    source_url: String,
    expected_destination: String,
    expected_status: ExpectedStatus,
}

impl RedirectSpec {
    pub fn new(
        source_url: impl Into<String>,
        expected_destination: impl Into<String>,
        expected_status: impl Into<ExpectedStatus>,
    ) -> Self {
        Self {
            source_url: source_url.into(),
            expected_destination: expected_destination.into(),
            expected_status: expected_status.into(),
        }
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn expected_destination(&self) -> &str {
        &self.expected_destination
    }

    pub fn expected_status(&self) -> &ExpectedStatus {
        &self.expected_status
    }
}
