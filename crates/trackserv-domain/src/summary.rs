//! Derived summary shapes handed to report consumers.

use serde::{Deserialize, Serialize};

use crate::common::MonthKey;

/// Linear-pass totals over a set of service records.
///
/// `pending_owed_cents` is the amount still owed to the provider: the sum
/// of net plus tip over unpaid records.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeriodTotals {
    pub total_amount_cents: i64,
    pub total_commission_cents: i64,
    pub total_net_amount_cents: i64,
    pub total_tip_cents: i64,
    pub paid_count: usize,
    pub pending_count: usize,
    pub pending_owed_cents: i64,
}

impl PeriodTotals {
    pub fn record_count(&self) -> usize {
        self.paid_count + self.pending_count
    }

    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }
}

/// One calendar month of paid/pending history for the rolling chart.
///
/// Values are owed amounts (net plus tip), split by settlement status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthBucket {
    pub month: MonthKey,
    pub paid_cents: i64,
    pub pending_cents: i64,
}

impl MonthBucket {
    pub fn empty(month: MonthKey) -> Self {
        Self {
            month,
            paid_cents: 0,
            pending_cents: 0,
        }
    }

    pub fn total_cents(&self) -> i64 {
        self.paid_cents + self.pending_cents
    }

    /// Chart label, e.g. `Jan 2025`.
    pub fn label(&self) -> String {
        self.month.label()
    }
}
