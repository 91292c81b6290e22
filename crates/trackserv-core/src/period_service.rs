//! Payment period lifecycle: the single-open-period invariant lives here.

use chrono::NaiveDate;
use uuid::Uuid;

use trackserv_domain::{PaymentPeriod, PeriodTotals, ProviderBook};

use crate::aggregate::aggregate;
use crate::error::{CoreError, CoreResult};

/// Opens, closes, and rolls payment periods. At most one period per book
/// is ever open; the auto-create behavior of the app is the explicit
/// [`PeriodService::ensure_open`] operation.
pub struct PeriodService;

impl PeriodService {
    /// Returns the open period's id, opening one starting `today` when
    /// none exists.
    pub fn ensure_open(book: &mut ProviderBook, today: NaiveDate) -> Uuid {
        if let Some(period) = book.open_period() {
            return period.id;
        }
        let provider_id = book.provider.id;
        book.add_period(PaymentPeriod::open(provider_id, today))
    }

    /// Opens a fresh period; fails while another one is still open.
    pub fn open(book: &mut ProviderBook, period_start: NaiveDate) -> CoreResult<Uuid> {
        if let Some(open) = book.open_period() {
            return Err(CoreError::InvalidOperation(format!(
                "period {} is still open",
                open.id
            )));
        }
        let provider_id = book.provider.id;
        Ok(book.add_period(PaymentPeriod::open(provider_id, period_start)))
    }

    /// Closes a period, stamping its end date and aggregator totals.
    pub fn close(book: &mut ProviderBook, id: Uuid, period_end: NaiveDate) -> CoreResult<()> {
        let period = book.period(id).ok_or(CoreError::PeriodNotFound(id))?;
        if period.is_closed {
            return Err(CoreError::InvalidOperation(format!(
                "period {id} is already closed"
            )));
        }
        let totals = aggregate(book.records_in_period(id));
        if totals.pending_count > 0 {
            tracing::warn!(
                period = %id,
                pending = totals.pending_count,
                "closing period with unpaid records"
            );
        }
        let period = book.period_mut(id).ok_or(CoreError::PeriodNotFound(id))?;
        period.close(period_end, &totals);
        book.touch();
        Ok(())
    }

    /// The app's "reset period": closes the open period (when there is
    /// one) and opens a new one starting `today`.
    pub fn reset(book: &mut ProviderBook, today: NaiveDate) -> CoreResult<Uuid> {
        if let Some(open_id) = book.open_period().map(|period| period.id) {
            Self::close(book, open_id, today)?;
        }
        Self::open(book, today)
    }

    pub fn current(book: &ProviderBook) -> Option<&PaymentPeriod> {
        book.open_period()
    }

    /// Periods newest first, the order the settlement history is shown in.
    pub fn list(book: &ProviderBook) -> Vec<&PaymentPeriod> {
        let mut periods: Vec<&PaymentPeriod> = book.periods.iter().collect();
        periods.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        periods
    }

    /// Live totals for any period, closed or open.
    pub fn totals_for(book: &ProviderBook, id: Uuid) -> CoreResult<PeriodTotals> {
        if book.period(id).is_none() {
            return Err(CoreError::PeriodNotFound(id));
        }
        Ok(aggregate(book.records_in_period(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trackserv_domain::{Client, ServiceProvider, ServiceRecord};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_book() -> ProviderBook {
        ProviderBook::new(ServiceProvider::new(Uuid::new_v4()))
    }

    fn log_record(book: &mut ProviderBook, period: Uuid, amount_cents: i64, paid: bool) {
        let provider_id = book.provider.id;
        let client = book.add_client(Client::new(provider_id, format!("c-{amount_cents}")));
        let split = crate::commission::compute_split(amount_cents, 10.0).unwrap();
        let mut record = ServiceRecord::new(
            client,
            period,
            "Cut",
            Some(date(2025, 1, 10)),
            amount_cents,
            0,
            10.0,
            split,
        );
        record.is_paid = paid;
        book.add_record(record);
    }

    #[test]
    fn ensure_open_creates_once_and_then_reuses() {
        let mut book = sample_book();
        let first = PeriodService::ensure_open(&mut book, date(2025, 1, 1));
        let second = PeriodService::ensure_open(&mut book, date(2025, 2, 1));
        assert_eq!(first, second);
        assert_eq!(book.periods.len(), 1);
    }

    #[test]
    fn open_enforces_the_single_open_invariant() {
        let mut book = sample_book();
        PeriodService::open(&mut book, date(2025, 1, 1)).expect("first open succeeds");
        let err = PeriodService::open(&mut book, date(2025, 2, 1)).expect_err("second must fail");
        assert!(matches!(err, CoreError::InvalidOperation(_)));
    }

    #[test]
    fn close_stamps_end_date_and_totals() {
        let mut book = sample_book();
        let id = PeriodService::open(&mut book, date(2025, 1, 1)).expect("open");
        log_record(&mut book, id, 5_000, true);
        log_record(&mut book, id, 3_000, false);

        PeriodService::close(&mut book, id, date(2025, 1, 31)).expect("close succeeds");
        let period = book.period(id).expect("period exists");
        assert!(period.is_closed);
        assert_eq!(period.period_end, Some(date(2025, 1, 31)));
        assert_eq!(period.total_amount_cents, 8_000);
        assert_eq!(period.total_commission_cents, 800);
        assert_eq!(period.total_net_amount_cents, 7_200);

        let err = PeriodService::close(&mut book, id, date(2025, 2, 1))
            .expect_err("closing twice must fail");
        assert!(matches!(err, CoreError::InvalidOperation(_)));
    }

    #[test]
    fn reset_rolls_into_a_fresh_period() {
        let mut book = sample_book();
        let first = PeriodService::ensure_open(&mut book, date(2025, 1, 1));
        let second = PeriodService::reset(&mut book, date(2025, 2, 1)).expect("reset succeeds");
        assert_ne!(first, second);
        assert!(book.period(first).unwrap().is_closed);
        assert_eq!(book.open_period().map(|p| p.id), Some(second));
    }

    #[test]
    fn totals_for_unknown_period_fails() {
        let book = sample_book();
        let err = PeriodService::totals_for(&book, Uuid::new_v4()).expect_err("must fail");
        assert!(matches!(err, CoreError::PeriodNotFound(_)));
    }
}
