//! Submission service.
//!
//! Shapes submissions into persisted records and wraps results in a
//! [`SuccessResponse`]. Every call is one store round trip.

use chrono::Utc;

use colorsync_core::records::{build_color_record, ColorRecord, ColorSubmission};
use colorsync_core::response::SuccessResponse;
use colorsync_core::storage::Result;

use crate::record_store::RecordStore;

/// The business entry points for color submissions.
#[derive(Debug, Clone)]
pub struct ColorService {
    records: RecordStore,
}

impl ColorService {
    /// Creates a service on top of a record store.
    pub fn new(records: RecordStore) -> Self {
        Self { records }
    }

    /// Returns the underlying record store, for callers that need
    /// `update_colors` or the generic accessors.
    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    /// Persists a submission under its first name and returns the record
    /// with status 201.
    ///
    /// A repeat submission for the same first name replaces the earlier
    /// record; its colors are not accumulated.
    pub async fn submit_color(
        &self,
        submission: ColorSubmission,
    ) -> Result<SuccessResponse<ColorRecord>> {
        let record = build_color_record(submission, Utc::now());
        tracing::debug!(?record, "Created color record");

        let record = self.records.save_color_submission(record).await?;
        tracing::debug!(pk = %record.pk, "Saved record successfully");

        Ok(SuccessResponse::created(record))
    }

    /// Returns every record whose key starts with `first_name`, with status
    /// 200. No matches is an empty list, not an error.
    pub async fn search_colors(
        &self,
        first_name: &str,
    ) -> Result<SuccessResponse<Vec<ColorRecord>>> {
        let results = self.records.search_colors(first_name).await?;
        tracing::debug!(count = results.len(), "Found results");

        Ok(SuccessResponse::ok(results))
    }
}
