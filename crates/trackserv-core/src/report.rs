//! Monthly report assembly with fixed-size pagination.

use trackserv_domain::{MonthKey, PeriodTotals, ProviderBook, ServiceRecord};

use crate::aggregate::aggregate;
use crate::summary_service::SummaryService;

/// Rows shown per report page.
pub const REPORT_PAGE_SIZE: usize = 10;

/// One page of a larger listing. `page` is 1-based and always within
/// `1..=total_pages`.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// A month's totals plus one page of its records.
#[derive(Debug, Clone)]
pub struct MonthlyReport<'a> {
    pub month: MonthKey,
    pub totals: PeriodTotals,
    pub page: Page<&'a ServiceRecord>,
}

pub struct ReportService;

impl ReportService {
    /// Builds the report for `month`: full-month totals regardless of the
    /// requested page, plus the page itself.
    pub fn monthly_report(book: &ProviderBook, month: MonthKey, page: usize) -> MonthlyReport<'_> {
        let records = SummaryService::month_records(book, month);
        let totals = aggregate(records.iter().copied());
        let page = paginate(records, page, REPORT_PAGE_SIZE);
        MonthlyReport {
            month,
            totals,
            page,
        }
    }
}

/// Slices `items` into the requested 1-based page, clamping the index
/// into range. An empty listing still reports one (empty) page.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * per_page;
    let items: Vec<T> = items
        .into_iter()
        .skip(start)
        .take(per_page)
        .collect();

    Page {
        items,
        page,
        per_page,
        total_items,
        total_pages,
    }
}
