//! Period aggregation: linear-pass totals over service records.

use trackserv_domain::{PeriodTotals, ServiceRecord};

/// Sums a set of records into [`PeriodTotals`].
///
/// Empty input yields all-zero totals. The result is independent of the
/// order of `records`.
pub fn aggregate<'a, I>(records: I) -> PeriodTotals
where
    I: IntoIterator<Item = &'a ServiceRecord>,
{
    let mut totals = PeriodTotals::default();
    for record in records {
        totals.total_amount_cents += record.amount_cents;
        totals.total_commission_cents += record.commission_amount_cents;
        totals.total_net_amount_cents += record.net_amount_cents;
        totals.total_tip_cents += record.tip_amount_cents;
        if record.is_paid {
            totals.paid_count += 1;
        } else {
            totals.pending_count += 1;
            totals.pending_owed_cents += record.owed_cents();
        }
    }
    totals
}
