use std::time::Instant;
use tracing::{info, instrument, warn};
use url::Url;

use crate::domain::{
    BatchReport, ExpectedStatus, RedirectSpec, TimeEstimate, VerificationResult,
    VerificationStatus,
};
use crate::redirect_checker::RedirectChecker;
use crate::spec_file::{SpecFileError, resolve_url};

pub const DEFAULT_ESTIMATE_SAMPLE: usize = 5;

#[derive(Debug)]
struct ResolvedSpec {
    source_url: String,
    expected_destination: String,
    expected_status: ExpectedStatus,
}

pub struct BatchRunner<'a> {
    checker: &'a RedirectChecker,
    estimate_sample: Option<usize>,
}

impl<'a> BatchRunner<'a> {
    pub fn new(checker: &'a RedirectChecker) -> Self {
        Self {
            checker,
            estimate_sample: None,
        }
    }

    /// Time the first `sample` checks and log an estimate for the whole batch.
    pub fn with_estimate(mut self, sample: usize) -> Self {
        self.estimate_sample = Some(sample);
        self
    }

    /// Checks every spec, one after another, in input order.
    ///
    /// All URLs are resolved before the first request, so an unresolvable entry
    /// aborts the run without touching the network.
    #[instrument(level = "info", skip_all, fields(total = specs.len(), base_url = ?base_url.map(Url::as_str)))]
    pub async fn run(
        &self,
        specs: &[RedirectSpec],
        base_url: Option<&Url>,
    ) -> Result<BatchReport, SpecFileError> {
        let resolved = specs
            .iter()
            .map(|spec| -> Result<ResolvedSpec, SpecFileError> {
                Ok(ResolvedSpec {
                    source_url: resolve_url(base_url, spec.source_url())?.into(),
                    expected_destination: resolve_url(base_url, spec.expected_destination())?
                        .into(),
                    expected_status: spec.expected_status().clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!("Checking {} redirects", resolved.len());

        let sample_size = self
            .estimate_sample
            .map(|sample| sample.min(resolved.len()))
            .filter(|sample| *sample > 0);
        let started = Instant::now();
        let mut estimate = None;
        let mut results = Vec::with_capacity(resolved.len());

        for (index, entry) in resolved.iter().enumerate() {
            let result = self
                .checker
                .verify(
                    &entry.source_url,
                    &entry.expected_destination,
                    &entry.expected_status,
                )
                .await;
            log_result(&result);
            results.push(result);

            if sample_size == Some(index + 1) {
                estimate = TimeEstimate::extrapolate(started.elapsed(), index + 1, resolved.len());
                if let Some(estimate) = &estimate {
                    info!(
                        sample = estimate.sample_count,
                        sample_secs = estimate.sample_elapsed.as_secs_f64(),
                        estimated_total_secs = estimate.estimated_total.as_secs_f64(),
                        "estimated run time"
                    );
                }
            }
        }

        let report = BatchReport::new(results, estimate);
        info!(
            total = report.total(),
            passed = report.passed(),
            failed = report.failed(),
            errors = report.errors(),
            "redirect check summary"
        );
        Ok(report)
    }
}

fn log_result(result: &VerificationResult) {
    let actual = result
        .actual_redirect_url
        .as_deref()
        .unwrap_or("None (no redirection)");
    match result.status {
        VerificationStatus::Passed => info!(
            url = %result.initial_url,
            expected = %result.expected_redirect_url,
            actual = %actual,
            expected_status = %result.expected_status_code,
            actual_status = ?result.actual_status_code,
            status = %result.status,
            "redirect check"
        ),
        VerificationStatus::Failed => warn!(
            url = %result.initial_url,
            expected = %result.expected_redirect_url,
            actual = %actual,
            expected_status = %result.expected_status_code,
            actual_status = ?result.actual_status_code,
            status = %result.status,
            "redirect check"
        ),
        VerificationStatus::Error => warn!(
            url = %result.initial_url,
            error = result.error.as_deref().unwrap_or(""),
            status = %result.status,
            "redirect check"
        ),
    }
}
