use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SnapshotError};
use crate::github::types::RepositoryDetail;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// A fetched repository with the derived metrics appended. The original
/// fields are flattened in unchanged, so the JSON keeps the wire layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedRepository {
    #[serde(flatten)]
    pub detail: RepositoryDetail,
    pub age_in_days: i64,
    pub days_since_last_update: i64,
    pub days_since_last_push: i64,
    pub closed_issues_ratio: f64,
}

pub struct MetricsCalculator;

impl MetricsCalculator {
    /// Whole days from `created_at` to `now`, floored. Negative for future
    /// timestamps; never clamped.
    pub fn age_in_days(created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
        Self::whole_days_between(created_at, now)
    }

    pub fn days_since_update(updated_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
        Self::whole_days_between(updated_at, now)
    }

    pub fn days_since_push(pushed_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
        Self::whole_days_between(pushed_at, now)
    }

    /// `closed / total` to two decimals, halves rounded away from zero.
    /// Zero issues gives `0.0`.
    pub fn closed_issues_ratio(total: u64, closed: u64) -> f64 {
        if total == 0 {
            return 0.0;
        }
        let ratio = closed as f64 / total as f64;
        (ratio * 100.0).round() / 100.0
    }

    pub fn enrich(detail: RepositoryDetail, now: DateTime<Utc>) -> Result<EnrichedRepository> {
        let created_at = Self::timestamp(&detail, detail.created_at.as_deref(), "createdAt")?;
        let updated_at = Self::timestamp(&detail, detail.updated_at.as_deref(), "updatedAt")?;
        let pushed_at = Self::timestamp(&detail, detail.pushed_at.as_deref(), "pushedAt")?;
        let total = detail
            .total_issues()
            .ok_or_else(|| SnapshotError::malformed(&detail.name, "issues.totalCount"))?;
        let closed = detail
            .closed_issues()
            .ok_or_else(|| SnapshotError::malformed(&detail.name, "closedIssues.totalCount"))?;

        Ok(EnrichedRepository {
            age_in_days: Self::age_in_days(created_at, now),
            days_since_last_update: Self::days_since_update(updated_at, now),
            days_since_last_push: Self::days_since_push(pushed_at, now),
            closed_issues_ratio: Self::closed_issues_ratio(total, closed),
            detail,
        })
    }

    /// Enriches every record in order. Stops at the first malformed one.
    pub fn enrich_all(
        details: Vec<RepositoryDetail>,
        now: DateTime<Utc>,
    ) -> Result<Vec<EnrichedRepository>> {
        details
            .into_iter()
            .map(|detail| Self::enrich(detail, now))
            .collect()
    }

    /// Enriches every well-formed record in order and sets aside the
    /// malformed ones with the error naming their missing field.
    pub fn enrich_each(
        details: Vec<RepositoryDetail>,
        now: DateTime<Utc>,
    ) -> (Vec<EnrichedRepository>, Vec<SnapshotError>) {
        let mut records = Vec::with_capacity(details.len());
        let mut rejected = Vec::new();
        for detail in details {
            match Self::enrich(detail, now) {
                Ok(record) => records.push(record),
                Err(e) => rejected.push(e),
            }
        }
        (records, rejected)
    }

    fn timestamp(
        detail: &RepositoryDetail,
        value: Option<&str>,
        field: &'static str,
    ) -> Result<DateTime<Utc>> {
        let raw = value.ok_or_else(|| SnapshotError::malformed(&detail.name, field))?;
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| SnapshotError::malformed(&detail.name, field))
    }

    fn whole_days_between(then: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
        (now - then).num_milliseconds().div_euclid(MILLIS_PER_DAY)
    }
}
