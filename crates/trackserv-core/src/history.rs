//! Rolling monthly paid/pending history for the dashboard chart.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use trackserv_domain::{MonthBucket, MonthKey, ServiceRecord};

use crate::error::{CoreError, CoreResult};

/// Buckets records into the `months` calendar months ending at `as_of`'s
/// month, oldest first.
///
/// Every month in the window appears exactly once, zero-valued when
/// nothing matched; the key space is seeded up front rather than derived
/// from the records present. Each dated record contributes its owed value
/// (net plus tip) to the paid or pending side of its month. Records with
/// no date or outside the window are ignored. Consumers rely on the
/// ascending chronological order.
pub fn bucket_last_months(
    records: &[ServiceRecord],
    months: usize,
    as_of: NaiveDate,
) -> CoreResult<Vec<MonthBucket>> {
    if months == 0 {
        return Err(CoreError::Validation(
            "history window must cover at least one month".into(),
        ));
    }

    let newest = MonthKey::from_date(as_of);
    let mut buckets: BTreeMap<MonthKey, MonthBucket> = (0..months)
        .map(|back| {
            let month = newest.shift(-(back as i32));
            (month, MonthBucket::empty(month))
        })
        .collect();

    for record in records {
        let Some(date) = record.service_date else {
            continue;
        };
        let Some(bucket) = buckets.get_mut(&MonthKey::from_date(date)) else {
            continue;
        };
        if record.is_paid {
            bucket.paid_cents += record.owed_cents();
        } else {
            bucket.pending_cents += record.owed_cents();
        }
    }

    Ok(buckets.into_values().collect())
}
