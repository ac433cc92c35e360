use crate::domain::{VerificationResult, VerificationStatus};
use std::time::Duration;

/// Extrapolated duration of a full run, measured on the first few checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeEstimate {
    pub sample_count: usize,
    pub sample_elapsed: Duration,
    pub estimated_total: Duration,
}

impl TimeEstimate {
    /// `(sample_elapsed / sample_count) * total_count`, or `None` for an empty sample.
    pub fn extrapolate(
        sample_elapsed: Duration,
        sample_count: usize,
        total_count: usize,
    ) -> Option<Self> {
        if sample_count == 0 {
            return None;
        }
        let per_check = sample_elapsed.as_secs_f64() / sample_count as f64;
        Some(Self {
            sample_count,
            sample_elapsed,
            estimated_total: Duration::from_secs_f64(per_check * total_count as f64),
        })
    }
}

/// Results of one run, in input order.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    results: Vec<VerificationResult>,
    estimate: Option<TimeEstimate>,
}

impl BatchReport {
    pub fn new(results: Vec<VerificationResult>, estimate: Option<TimeEstimate>) -> Self {
        Self { results, estimate }
    }

    pub fn results(&self) -> &[VerificationResult] {
        &self.results
    }

    pub fn estimate(&self) -> Option<&TimeEstimate> {
        self.estimate.as_ref()
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn passed(&self) -> usize {
        self.count(VerificationStatus::Passed)
    }

    pub fn failed(&self) -> usize {
        self.count(VerificationStatus::Failed)
    }

    pub fn errors(&self) -> usize {
        self.count(VerificationStatus::Error)
    }

    pub fn has_failures(&self) -> bool {
        self.results.iter().any(|result| !result.is_passed())
    }

    /// Every result that did not pass, failed and errored alike.
    pub fn non_passed(&self) -> Vec<&VerificationResult> {
        self.results
            .iter()
            .filter(|result| !result.is_passed())
            .collect()
    }

    fn count(&self, status: VerificationStatus) -> usize {
        self.results
            .iter()
            .filter(|result| result.status == status)
            .count()
    }
}
