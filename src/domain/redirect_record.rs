use crate::domain::{ExpectedStatus, RedirectSpec};
use serde::{Deserialize, Serialize};

/// One entry of a redirect list file, as read from disk or emitted by the generator.
///
/// Accepts both the wrapped shape (`redirected_url`, `status_code` or `permanent`)
/// and the flat shape (`expected_redirect_url`, `expected_status_code`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectRecord {
    pub initial_url: String,
    #[serde(alias = "expected_redirect_url")]
    pub redirected_url: String,
    #[serde(
        default,
        alias = "expected_status_code",
        skip_serializing_if = "Option::is_none"
    )]
    pub status_code: Option<ExpectedStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permanent: Option<bool>,
}

impl RedirectRecord {
    /// An explicit status code wins over the `permanent` flag.
    pub fn expected_status(&self) -> Option<ExpectedStatus> {
        match (&self.status_code, self.permanent) {
            (Some(status), _) => Some(status.clone()),
            (None, Some(permanent)) => Some(ExpectedStatus::from_permanent(permanent)),
            (None, None) => None,
        }
    }

    pub fn into_spec(self) -> Option<RedirectSpec> {
        let expected_status = self.expected_status()?;
        Some(RedirectSpec::new(
            self.initial_url,
            self.redirected_url,
            expected_status,
        ))
    }
}

/// Generator output: `{ "redirects": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectListing {
    pub redirects: Vec<RedirectRecord>,
}

impl RedirectListing {
    pub fn len(&self) -> usize {
        self.redirects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.redirects.is_empty()
    }
}

/// Flat-list entry, the shape written by the list assembler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRedirectRecord {
    pub initial_url: String,
    pub expected_redirect_url: String,
    pub expected_status_code: ExpectedStatus,
}
