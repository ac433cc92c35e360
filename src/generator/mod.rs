mod assemble;
mod cms_client;
mod listing;

pub use assemble::{AssembleError, assemble, assemble_files};
pub use cms_client::{CmsClient, CmsEntry, CmsRedirect, DEFAULT_PAGE_SIZE};
pub use listing::{ListingShape, build_listing, is_retained, to_record};

use crate::domain::RedirectListing;
use crate::output::write_json_file;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("CMS request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("CMS answered {status} at offset {offset}: {body}")]
    UnexpectedStatus {
        status: u16,
        offset: usize,
        body: String,
    },
    #[error("page size must be greater than zero")]
    InvalidPageSize,
    #[error("published entry `{name}` has no {field}")]
    IncompleteEntry { name: String, field: &'static str },
    #[error("no CMS API key configured; set CMS_API_KEY")]
    MissingCredential,
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Fetches every page, then filters and maps the entries.
///
/// Nothing is returned unless every page was fetched successfully.
#[instrument(level = "info", skip(client))]
pub async fn generate(
    client: &CmsClient,
    name_filter: Option<&str>,
    shape: ListingShape,
) -> Result<RedirectListing, GeneratorError> {
    let entries = client.fetch_all().await?;
    let fetched = entries.len();
    let listing = build_listing(entries, name_filter, shape)?;
    info!(fetched, retained = listing.len(), "redirect listing built");
    Ok(listing)
}

pub fn write_listing(path: &Path, listing: &RedirectListing) -> Result<(), GeneratorError> {
    write_json_file(path, listing).map_err(|source| GeneratorError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Redirect list saved as {}", path.display());
    Ok(())
}
