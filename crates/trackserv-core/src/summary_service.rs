//! Read-path façade over the aggregation engine.

use chrono::NaiveDate;
use uuid::Uuid;

use trackserv_domain::{MonthBucket, MonthKey, PeriodTotals, ProviderBook, ServiceRecord};

use crate::aggregate::aggregate;
use crate::error::CoreResult;
use crate::history::bucket_last_months;
use crate::period_service::PeriodService;

pub struct SummaryService;

impl SummaryService {
    /// Totals for the open period, or all zeros when none is open.
    pub fn current_totals(book: &ProviderBook) -> PeriodTotals {
        match book.open_period() {
            Some(period) => aggregate(book.records_in_period(period.id)),
            None => PeriodTotals::default(),
        }
    }

    pub fn period_totals(book: &ProviderBook, period_id: Uuid) -> CoreResult<PeriodTotals> {
        PeriodService::totals_for(book, period_id)
    }

    /// Rolling paid/pending history, oldest month first. The dashboard
    /// charts twelve months.
    pub fn monthly_history(
        book: &ProviderBook,
        months: usize,
        as_of: NaiveDate,
    ) -> CoreResult<Vec<MonthBucket>> {
        bucket_last_months(&book.records, months, as_of)
    }

    /// Records dated within `month`, most recent first.
    pub fn month_records(book: &ProviderBook, month: MonthKey) -> Vec<&ServiceRecord> {
        let mut records: Vec<&ServiceRecord> = book
            .records
            .iter()
            .filter(|record| {
                record
                    .service_date
                    .map(|date| month.contains(date))
                    .unwrap_or(false)
            })
            .collect();
        records.sort_by(|a, b| b.service_date.cmp(&a.service_date));
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trackserv_domain::{Client, PaymentPeriod, ServiceProvider};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn book_with_activity() -> ProviderBook {
        let mut book = ProviderBook::new(ServiceProvider::new(Uuid::new_v4()));
        let provider_id = book.provider.id;
        let client = book.add_client(Client::new(provider_id, "Ana"));
        let period = book.add_period(PaymentPeriod::open(provider_id, date(2025, 3, 1)));

        for (amount, day, paid) in [(2_000, 5, true), (1_000, 20, false)] {
            let split = crate::commission::compute_split(amount, 10.0).unwrap();
            let mut record = ServiceRecord::new(
                client,
                period,
                "Cut",
                Some(date(2025, 3, day)),
                amount,
                0,
                10.0,
                split,
            );
            record.is_paid = paid;
            book.add_record(record);
        }
        book
    }

    #[test]
    fn current_totals_cover_the_open_period() {
        let book = book_with_activity();
        let totals = SummaryService::current_totals(&book);
        assert_eq!(totals.total_amount_cents, 3_000);
        assert_eq!(totals.paid_count, 1);
        assert_eq!(totals.pending_count, 1);
        // 1000 - 100 still owed
        assert_eq!(totals.pending_owed_cents, 900);
    }

    #[test]
    fn current_totals_are_zero_without_an_open_period() {
        let book = ProviderBook::new(ServiceProvider::new(Uuid::new_v4()));
        assert!(SummaryService::current_totals(&book).is_empty());
    }

    #[test]
    fn monthly_history_reflects_march_activity() {
        let book = book_with_activity();
        let buckets =
            SummaryService::monthly_history(&book, 12, date(2025, 3, 31)).expect("history");
        assert_eq!(buckets.len(), 12);
        let march = buckets.last().unwrap();
        assert_eq!(march.month, MonthKey::new(2025, 3).unwrap());
        assert_eq!(march.paid_cents, 1_800);
        assert_eq!(march.pending_cents, 900);
    }

    #[test]
    fn month_records_filters_and_sorts_desc() {
        let book = book_with_activity();
        let march = SummaryService::month_records(&book, MonthKey::new(2025, 3).unwrap());
        assert_eq!(march.len(), 2);
        assert!(march[0].service_date >= march[1].service_date);
        let feb = SummaryService::month_records(&book, MonthKey::new(2025, 2).unwrap());
        assert!(feb.is_empty());
    }
}
