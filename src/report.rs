use crate::domain::{BatchReport, VerificationResult};
use crate::output::{write_file, write_json_file};
use clap::ValueEnum;
use serde::Deserialize;
use std::fmt::Write;
use std::path::PathBuf;
use std::{fs, io};
use tracing::{debug, info};

pub const RESULTS_FILE: &str = "results.json";
pub const FAILED_JSON_FILE: &str = "failed_tests.json";
pub const FAILED_TEXT_FILE: &str = "failed_tests.txt";

const DIVIDER_WIDTH: usize = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum FailedReportFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, thiserror::Error)]
#[error("failed to write report {path}: {source}")]
pub struct ReportError {
    path: PathBuf,
    source: std::io::Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReports {
    pub results: PathBuf,
    pub failed: Option<PathBuf>,
}

pub struct ReportWriter {
    directory: PathBuf,
    failed_format: FailedReportFormat,
}

impl ReportWriter {
    pub fn new(directory: impl Into<PathBuf>, failed_format: FailedReportFormat) -> Self {
        Self {
            directory: directory.into(),
            failed_format,
        }
    }

    /// Writes the full results, then the non-passed subset if there is one.
    ///
    /// Failed-subset files from an earlier run are removed first, so the
    /// directory never shows failures that this run did not produce.
    pub fn write(&self, report: &BatchReport) -> Result<WrittenReports, ReportError> {
        for stale in [FAILED_JSON_FILE, FAILED_TEXT_FILE] {
            self.remove_stale(stale)?;
        }

        let results = self.directory.join(RESULTS_FILE);
        write_json_file(&results, report.results()).map_err(|source| ReportError {
            path: results.clone(),
            source,
        })?;
        info!("JSON report saved as {}", results.display());

        if !report.has_failures() {
            return Ok(WrittenReports {
                results,
                failed: None,
            });
        }

        let non_passed = report.non_passed();
        let failed = match self.failed_format {
            FailedReportFormat::Json => {
                let path = self.directory.join(FAILED_JSON_FILE);
                write_json_file(&path, &non_passed).map_err(|source| ReportError {
                    path: path.clone(),
                    source,
                })?;
                path
            }
            FailedReportFormat::Text => {
                let path = self.directory.join(FAILED_TEXT_FILE);
                let content: String = non_passed.iter().map(|r| format_failed_block(r)).collect();
                write_file(&path, content.as_bytes()).map_err(|source| ReportError {
                    path: path.clone(),
                    source,
                })?;
                path
            }
        };
        info!("Failed tests report saved as {}", failed.display());

        Ok(WrittenReports {
            results,
            failed: Some(failed),
        })
    }

    fn remove_stale(&self, file_name: &str) -> Result<(), ReportError> {
        let path = self.directory.join(file_name);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Removed stale report {}", path.display());
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(ReportError { path, source }),
        }
    }
}

/// One human-readable block per non-passed check, closed by a divider line.
pub fn format_failed_block(result: &VerificationResult) -> String {
    let mut block = String::new();
    let actual_url = result.actual_redirect_url.as_deref().unwrap_or("None");
    let actual_status = result
        .actual_status_code
        .map_or_else(|| "None".to_string(), |code| code.to_string());

    let _ = writeln!(block, "URL: {}", result.initial_url);
    let _ = writeln!(block, "Expected Redirect: {}", result.expected_redirect_url);
    let _ = writeln!(block, "Actual Redirected URL: {actual_url}");
    let _ = writeln!(block, "Expected Status Code: {}", result.expected_status_code);
    let _ = writeln!(block, "Actual Status Code: {actual_status}");
    let _ = writeln!(block, "Status: {}", result.status);
    if let Some(error) = &result.error {
        let _ = writeln!(block, "Error: {error}");
    }
    let _ = writeln!(block, "{}", "-".repeat(DIVIDER_WIDTH));
    block
}
