//! Logging and settlement of service records.

use chrono::NaiveDate;
use uuid::Uuid;

use trackserv_domain::{ProviderBook, ServiceRecord};

use crate::commission::compute_split;
use crate::error::{CoreError, CoreResult};

/// Input for logging a freshly rendered service. The commission rate is
/// not part of it: the provider's current rate is snapshotted at log
/// time.
#[derive(Debug, Clone)]
pub struct NewServiceRecord {
    pub client_id: Uuid,
    pub payment_period_id: Uuid,
    pub description: String,
    pub service_date: Option<NaiveDate>,
    pub amount_cents: i64,
    /// Missing tip is treated as zero, the one documented coercion.
    pub tip_amount_cents: Option<i64>,
}

/// Partial update for an existing record. `None` fields are left alone.
#[derive(Debug, Clone, Default)]
pub struct RecordChanges {
    pub description: Option<String>,
    pub service_date: Option<Option<NaiveDate>>,
    pub amount_cents: Option<i64>,
    pub tip_amount_cents: Option<i64>,
}

/// Provides validated mutations for [`ServiceRecord`] entities.
pub struct ServiceRecordService;

impl ServiceRecordService {
    /// Logs a service: snapshots the provider's current commission rate,
    /// computes the split, and appends the record to the book.
    pub fn log(book: &mut ProviderBook, draft: NewServiceRecord) -> CoreResult<Uuid> {
        if book.client(draft.client_id).is_none() {
            return Err(CoreError::ClientNotFound(draft.client_id.to_string()));
        }
        let period = book
            .period(draft.payment_period_id)
            .ok_or(CoreError::PeriodNotFound(draft.payment_period_id))?;
        if period.is_closed {
            return Err(CoreError::InvalidOperation(
                "cannot log a service into a closed period".into(),
            ));
        }
        let tip_amount_cents = draft.tip_amount_cents.unwrap_or(0);
        if tip_amount_cents < 0 {
            return Err(CoreError::Validation(format!(
                "tip must be non-negative, got {tip_amount_cents}"
            )));
        }

        let rate = book.provider.commission_rate_percent;
        let split = compute_split(draft.amount_cents, rate)?;
        let record = ServiceRecord::new(
            draft.client_id,
            draft.payment_period_id,
            draft.description,
            draft.service_date,
            draft.amount_cents,
            tip_amount_cents,
            rate,
            split,
        );
        Ok(book.add_record(record))
    }

    /// Applies a changeset. An amount change recomputes the split with
    /// the record's snapshotted rate, keeping the invariant intact.
    pub fn edit(book: &mut ProviderBook, id: Uuid, changes: RecordChanges) -> CoreResult<()> {
        let snapshot_rate = book
            .record(id)
            .ok_or(CoreError::RecordNotFound(id))?
            .commission_rate_percent;
        let new_split = match changes.amount_cents {
            Some(amount) => Some((amount, compute_split(amount, snapshot_rate)?)),
            None => None,
        };
        if let Some(tip) = changes.tip_amount_cents {
            if tip < 0 {
                return Err(CoreError::Validation(format!(
                    "tip must be non-negative, got {tip}"
                )));
            }
        }

        let record = book.record_mut(id).ok_or(CoreError::RecordNotFound(id))?;
        if let Some(description) = changes.description {
            record.description = description;
        }
        if let Some(date) = changes.service_date {
            record.service_date = date;
        }
        if let Some(tip) = changes.tip_amount_cents {
            record.tip_amount_cents = tip;
        }
        if let Some((amount, split)) = new_split {
            record.reprice(amount, split);
        } else {
            record.touch();
        }
        book.touch();
        Ok(())
    }

    pub fn remove(book: &mut ProviderBook, id: Uuid) -> CoreResult<()> {
        let before = book.records.len();
        book.records.retain(|record| record.id != id);
        if book.records.len() == before {
            return Err(CoreError::RecordNotFound(id));
        }
        book.touch();
        Ok(())
    }

    pub fn mark_paid(book: &mut ProviderBook, id: Uuid) -> CoreResult<()> {
        let record = book.record_mut(id).ok_or(CoreError::RecordNotFound(id))?;
        record.mark_paid();
        book.touch();
        Ok(())
    }

    /// Settles every pending record and returns how many were flipped.
    pub fn mark_all_paid(book: &mut ProviderBook) -> usize {
        let mut flipped = 0;
        for record in book.records.iter_mut().filter(|record| !record.is_paid) {
            record.mark_paid();
            flipped += 1;
        }
        if flipped > 0 {
            book.touch();
        }
        flipped
    }

    /// All records, most recent service date first, undated entries last.
    pub fn list(book: &ProviderBook) -> Vec<&ServiceRecord> {
        let mut records: Vec<&ServiceRecord> = book.records.iter().collect();
        Self::sort_by_date_desc(&mut records);
        records
    }

    pub fn list_for_period(book: &ProviderBook, period_id: Uuid) -> Vec<&ServiceRecord> {
        let mut records: Vec<&ServiceRecord> = book.records_in_period(period_id).collect();
        Self::sort_by_date_desc(&mut records);
        records
    }

    // `None < Some` for Option<NaiveDate>, so the reversed comparison
    // yields newest-first with undated records at the end.
    fn sort_by_date_desc(records: &mut [&ServiceRecord]) {
        records.sort_by(|a, b| {
            b.service_date
                .cmp(&a.service_date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
    }
}
