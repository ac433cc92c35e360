use clap::ValueEnum;
use serde::Deserialize;
use std::fmt::Write;
use url::Url;

pub const DEFAULT_WILDCARD_TOKEN: &str = "wildcard";

/// How two destination URLs are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    /// `scheme://host[:port]/path`, trailing slash and query dropped.
    #[default]
    Full,
    /// Path only, trailing slash dropped. Scheme, host and query are ignored.
    Path,
}

pub fn normalize(url: &Url, normalization: Normalization) -> String {
    let path = url.path().trim_end_matches('/');
    match normalization {
        Normalization::Path => path.to_string(),
        Normalization::Full => {
            let mut normalized = format!("{}://{}", url.scheme(), url.host_str().unwrap_or(""));
            if let Some(port) = url.port() {
                let _ = write!(normalized, ":{port}");
            }
            normalized.push_str(path);
            normalized
        }
    }
}

/// Compares an observed destination with the expected one.
///
/// Strings that do not parse as absolute URLs only match when identical.
pub fn destinations_match(actual: &str, expected: &str, normalization: Normalization) -> bool {
    match (Url::parse(actual), Url::parse(expected)) {
        (Ok(actual), Ok(expected)) => {
            normalize(&actual, normalization) == normalize(&expected, normalization)
        }
        _ => actual == expected,
    }
}

pub fn substitute_wildcard(url: &str, token: &str) -> String {
    url.replace('*', token)
}
