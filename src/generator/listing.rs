use crate::domain::{ExpectedStatus, RedirectListing, RedirectRecord};
use crate::generator::{CmsEntry, GeneratorError};
use clap::ValueEnum;
use serde::Deserialize;

const PUBLISHED: &str = "published";

/// How the expected status of a generated redirect is written out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ListingShape {
    /// `status_code`: 301 for permanent redirects, 302 otherwise.
    #[default]
    StatusCode,
    /// `permanent`: the CMS flag, expanded into a set of codes by the checker.
    Permanent,
}

pub fn is_retained(entry: &CmsEntry, name_filter: Option<&str>) -> bool {
    entry.published == PUBLISHED && name_filter.is_none_or(|filter| entry.name.contains(filter))
}

/// Fails when a retained entry is missing its source or destination.
pub fn to_record(
    entry: CmsEntry,
    shape: ListingShape,
) -> Result<RedirectRecord, GeneratorError> {
    let CmsEntry { name, data, .. } = entry;
    let missing = |field| GeneratorError::IncompleteEntry {
        name: name.clone(),
        field,
    };
    let initial_url = data.source.ok_or_else(|| missing("source"))?;
    let redirected_url = data.destination.ok_or_else(|| missing("destination"))?;

    let (status_code, permanent) = match shape {
        ListingShape::StatusCode => {
            let code = if data.permanent { 301 } else { 302 };
            (Some(ExpectedStatus::Code(code)), None)
        }
        ListingShape::Permanent => (None, Some(data.permanent)),
    };
    Ok(RedirectRecord {
        initial_url,
        redirected_url,
        status_code,
        permanent,
    })
}

/// Keeps published entries matching `name_filter`, in fetch order.
///
/// Dropped entries are never inspected beyond `published` and `name`.
pub fn build_listing(
    entries: Vec<CmsEntry>,
    name_filter: Option<&str>,
    shape: ListingShape,
) -> Result<RedirectListing, GeneratorError> {
    let redirects = entries
        .into_iter()
        .filter(|entry| is_retained(entry, name_filter))
        .map(|entry| to_record(entry, shape))
        .collect::<Result<_, _>>()?;
    Ok(RedirectListing { redirects })
}
