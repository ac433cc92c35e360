use crate::domain::{ExpectedStatus, VerificationResult, VerificationStatus};
use crate::redirect_checker::normalize::{
    DEFAULT_WILDCARD_TOKEN, Normalization, destinations_match, substitute_wildcard,
};
use clap::ValueEnum;
use reqwest::header::LOCATION;
use serde::Deserialize;
use std::error::Error as _;
use std::time::Duration;
use url::Url;

/// How the destination of a redirect is observed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RedirectMode {
    /// Read the `Location` header of the first response only.
    #[default]
    Manual,
    /// Follow the whole chain; the destination is the last URL reached.
    Follow,
}

#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub mode: RedirectMode,
    pub normalization: Normalization,
    pub wildcard_token: String,
    pub timeout: Duration,
    pub max_redirects: usize,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            mode: RedirectMode::Manual,
            normalization: Normalization::Full,
            wildcard_token: DEFAULT_WILDCARD_TOKEN.to_string(),
            timeout: Duration::from_secs(10),
            max_redirects: 10,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum TransportError {
    #[error("{}", describe(.0))]
    Request(#[from] reqwest::Error),
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("redirect chain exceeded {0} hops")]
    TooManyRedirects(usize),
}

/// reqwest hides the root cause (DNS, refused connection) behind `source()`.
fn describe(error: &reqwest::Error) -> String {
    let mut description = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        description.push_str(": ");
        description.push_str(&cause.to_string());
        source = cause.source();
    }
    description
}

#[derive(Debug)]
struct Observation {
    status_code: u16,
    destination: Option<String>,
}

pub struct RedirectChecker {
    client: reqwest::Client,
    options: CheckOptions,
}

impl RedirectChecker {
    pub fn new(options: CheckOptions) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(RedirectChecker { client, options })
    }

    /// Requests `source_url` once and compares what came back against the expectation.
    ///
    /// Both URLs must already be absolute. Transport failures are reported as
    /// [`VerificationStatus::Error`] and never returned as `Err`.
    pub async fn verify(
        &self,
        source_url: &str,
        expected_destination: &str,
        expected_status: &ExpectedStatus,
    ) -> VerificationResult {
        let initial_url = substitute_wildcard(source_url, &self.options.wildcard_token);
        let expected_redirect_url =
            substitute_wildcard(expected_destination, &self.options.wildcard_token);

        let observation = match self.observe(&initial_url).await {
            Ok(observation) => observation,
            Err(e) => {
                return VerificationResult::transport_error(
                    initial_url,
                    expected_redirect_url,
                    expected_status.clone(),
                    e.to_string(),
                );
            }
        };

        let destination_matches = observation.destination.as_deref().is_some_and(|actual| {
            destinations_match(actual, &expected_redirect_url, self.options.normalization)
        });
        let status = if destination_matches && expected_status.accepts(observation.status_code) {
            VerificationStatus::Passed
        } else {
            VerificationStatus::Failed
        };

        VerificationResult {
            initial_url,
            expected_redirect_url,
            actual_redirect_url: observation.destination,
            expected_status_code: expected_status.clone(),
            actual_status_code: Some(observation.status_code),
            status,
            error: None,
        }
    }

    async fn observe(&self, url: &str) -> Result<Observation, TransportError> {
        let url = Url::parse(url).map_err(|source| TransportError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        match self.options.mode {
            RedirectMode::Manual => self.observe_first_hop(url).await,
            RedirectMode::Follow => self.observe_chain(url).await,
        }
    }

    async fn observe_first_hop(&self, url: Url) -> Result<Observation, TransportError> {
        let response = self.client.get(url.clone()).send().await?;
        Ok(Observation {
            status_code: response.status().as_u16(),
            destination: location(&response, &url),
        })
    }

    /// Walks the chain hop by hop; the reported status is the first hop's.
    async fn observe_chain(&self, url: Url) -> Result<Observation, TransportError> {
        let mut current = url;
        let mut first_status = None;
        let mut hops = 0;

        loop {
            let response = self.client.get(current.clone()).send().await?;
            let status = response.status();
            let status_code = *first_status.get_or_insert(status.as_u16());

            let next = if status.is_redirection() {
                location(&response, &current)
            } else {
                None
            };
            let Some(next) = next else {
                return Ok(Observation {
                    status_code,
                    destination: Some(current.to_string()),
                });
            };

            if hops == self.options.max_redirects {
                return Err(TransportError::TooManyRedirects(self.options.max_redirects));
            }
            hops += 1;
            current = Url::parse(&next).map_err(|source| TransportError::InvalidUrl {
                url: next.clone(),
                source,
            })?;
        }
    }
}

/// The `Location` header, joined onto `request_url` when it has no scheme.
///
/// Bytes that are not UTF-8 are replaced rather than dropping the header.
fn location(response: &reqwest::Response, request_url: &Url) -> Option<String> {
    let location = response.headers().get(LOCATION)?;
    let location = String::from_utf8_lossy(location.as_bytes());
    Some(resolve_location(request_url, &location))
}

fn resolve_location(request_url: &Url, location: &str) -> String {
    if Url::parse(location).is_ok() {
        return location.to_string();
    }
    request_url
        .join(location)
        .map(String::from)
        .unwrap_or_else(|_| location.to_string())
}
