//! trackserv-core
//!
//! Business logic and services for TrackServ: the commission/aggregation
//! engine plus validated mutations over a [`ProviderBook`]. Depends on
//! trackserv-domain. No CLI, no terminal I/O, no direct storage
//! interactions beyond the [`storage::BookStorage`] seam.
//!
//! [`ProviderBook`]: trackserv_domain::ProviderBook

pub mod aggregate;
pub mod client_service;
pub mod commission;
pub mod error;
pub mod format;
pub mod history;
pub mod period_service;
pub mod provider_service;
pub mod record_service;
pub mod report;
pub mod storage;
pub mod summary_service;
pub mod time;

pub use aggregate::aggregate;
pub use client_service::ClientService;
pub use commission::compute_split;
pub use error::{CoreError, CoreResult};
pub use format::format_cents;
pub use history::bucket_last_months;
pub use period_service::PeriodService;
pub use provider_service::ProviderService;
pub use record_service::{NewServiceRecord, RecordChanges, ServiceRecordService};
pub use report::{MonthlyReport, Page, ReportService, REPORT_PAGE_SIZE};
pub use storage::{book_warnings, BookBackupInfo, BookStorage};
pub use summary_service::SummaryService;
pub use time::{Clock, SystemClock};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("trackserv_core=info".parse().unwrap());
        fmt().with_env_filter(filter).init();
        tracing::info!("TrackServ core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
