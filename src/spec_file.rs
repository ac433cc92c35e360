use crate::domain::{RedirectRecord, RedirectSpec};
use serde_json::Value;
use std::path::{Path, PathBuf};
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum SpecFileError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid redirect list: {0}")]
    Json(#[from] serde_json::Error),
    #[error("redirect list must be an array or an object with a `redirects` array")]
    UnsupportedShape,
    #[error("entry {index} ({initial_url}) has neither a status code nor a `permanent` flag")]
    MissingStatus { index: usize, initial_url: String },
    #[error("{url} is relative but no base URL was given")]
    RelativeWithoutBase { url: String },
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
}

pub fn load_spec_file(path: impl AsRef<Path>) -> Result<Vec<RedirectSpec>, SpecFileError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| SpecFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_spec_file(&content)
}

/// Accepts both `[ {...}, ... ]` and `{ "redirects": [ {...}, ... ] }`.
pub fn parse_spec_file(content: &str) -> Result<Vec<RedirectSpec>, SpecFileError> {
    let entries = match serde_json::from_str::<Value>(content)? {
        Value::Array(entries) => entries,
        Value::Object(mut object) => match object.remove("redirects") {
            Some(Value::Array(entries)) => entries,
            _ => return Err(SpecFileError::UnsupportedShape),
        },
        _ => return Err(SpecFileError::UnsupportedShape),
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let record: RedirectRecord = serde_json::from_value(entry)?;
            let initial_url = record.initial_url.clone();
            record
                .into_spec()
                .ok_or(SpecFileError::MissingStatus { index, initial_url })
        })
        .collect()
}

/// Resolves a spec URL against an optional base.
///
/// An absolute URL is returned unchanged. A relative one is appended under the
/// base, keeping any path the base already has.
pub fn resolve_url(base: Option<&Url>, raw: &str) -> Result<Url, SpecFileError> {
    match Url::parse(raw) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = base.ok_or_else(|| SpecFileError::RelativeWithoutBase {
                url: raw.to_string(),
            })?;
            let mut base = base.clone();
            if !base.path().ends_with('/') {
                let path = format!("{}/", base.path());
                base.set_path(&path);
            }
            base.join(raw.trim_start_matches('/'))
                .map_err(|source| SpecFileError::InvalidUrl {
                    url: raw.to_string(),
                    source,
                })
        }
        Err(source) => Err(SpecFileError::InvalidUrl {
            url: raw.to_string(),
            source,
        }),
    }
}
