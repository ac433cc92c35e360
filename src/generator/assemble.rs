use crate::domain::{ExpectedStatus, FlatRedirectRecord};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum AssembleError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{path} is not a JSON list: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(
        "all lists must have the same length (urls: {urls}, redirect urls: {redirect_urls}, status codes: {status_codes})"
    )]
    LengthMismatch {
        urls: usize,
        redirect_urls: usize,
        status_codes: usize,
    },
}

/// Zips parallel lists of source URLs, destinations and status codes into flat records.
pub fn assemble(
    urls: Vec<String>,
    redirect_urls: Vec<String>,
    status_codes: Vec<ExpectedStatus>,
) -> Result<Vec<FlatRedirectRecord>, AssembleError> {
    if urls.len() != redirect_urls.len() || urls.len() != status_codes.len() {
        return Err(AssembleError::LengthMismatch {
            urls: urls.len(),
            redirect_urls: redirect_urls.len(),
            status_codes: status_codes.len(),
        });
    }

    Ok(urls
        .into_iter()
        .zip(redirect_urls)
        .zip(status_codes)
        .map(
            |((initial_url, expected_redirect_url), expected_status_code)| FlatRedirectRecord {
                initial_url,
                expected_redirect_url,
                expected_status_code,
            },
        )
        .collect())
}

pub fn assemble_files(
    urls: &Path,
    redirect_urls: &Path,
    status_codes: &Path,
) -> Result<Vec<FlatRedirectRecord>, AssembleError> {
    assemble(
        read_list(urls)?,
        read_list(redirect_urls)?,
        read_list(status_codes)?,
    )
}

fn read_list<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, AssembleError> {
    let content = std::fs::read_to_string(path).map_err(|source| AssembleError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| AssembleError::Json {
        path: path.to_path_buf(),
        source,
    })
}
