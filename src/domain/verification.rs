use crate::domain::ExpectedStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationStatus {
    Passed,
    Failed,
    Error,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Passed => "Passed",
            VerificationStatus::Failed => "Failed",
            VerificationStatus::Error => "Error",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of checking one redirect.
///
/// `actual_redirect_url` and `actual_status_code` are `None` when the request
/// never produced a response, and `actual_redirect_url` alone is `None` when the
/// response carried no redirect. `error` is only set for [`VerificationStatus::Error`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub initial_url: String,
    pub expected_redirect_url: String,
    pub actual_redirect_url: Option<String>,
    pub expected_status_code: ExpectedStatus,
    pub actual_status_code: Option<u16>,
    pub status: VerificationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl VerificationResult {
    pub fn is_passed(&self) -> bool {
        self.status == VerificationStatus::Passed
    }

    /// A request that could not be completed at the transport level.
    pub fn transport_error(
        initial_url: String,
        expected_redirect_url: String,
        expected_status_code: ExpectedStatus,
        error: String,
    ) -> Self {
        Self {
            initial_url,
            expected_redirect_url,
            actual_redirect_url: None,
            expected_status_code,
            actual_status_code: None,
            status: VerificationStatus::Error,
            error: Some(error),
        }
    }
}
