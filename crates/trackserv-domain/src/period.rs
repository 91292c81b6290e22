//! Domain model for payment periods.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{Displayable, Identifiable};
use crate::summary::PeriodTotals;

/// A settlement window grouping service records. Open-ended while
/// `is_closed` is false; the surrounding book allows at most one open
/// period per provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentPeriod {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub period_start: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_end: Option<NaiveDate>,
    #[serde(default)]
    pub is_closed: bool,
    #[serde(default)]
    pub total_amount_cents: i64,
    #[serde(default)]
    pub total_commission_cents: i64,
    #[serde(default)]
    pub total_net_amount_cents: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PaymentPeriod {
    /// Opens a fresh period starting on `period_start`.
    pub fn open(provider_id: Uuid, period_start: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            provider_id,
            period_start,
            period_end: None,
            is_closed: false,
            total_amount_cents: 0,
            total_commission_cents: 0,
            total_net_amount_cents: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_open(&self) -> bool {
        !self.is_closed
    }

    /// Closes the period, stamping its end date and final totals.
    pub fn close(&mut self, period_end: NaiveDate, totals: &PeriodTotals) {
        self.is_closed = true;
        self.period_end = Some(period_end);
        self.total_amount_cents = totals.total_amount_cents;
        self.total_commission_cents = totals.total_commission_cents;
        self.total_net_amount_cents = totals.total_net_amount_cents;
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Identifiable for PaymentPeriod {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for PaymentPeriod {
    fn display_label(&self) -> String {
        match self.period_end {
            Some(end) => format!("{} – {}", self.period_start, end),
            None => format!("{} – open", self.period_start),
        }
    }
}

impl fmt::Display for PaymentPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_label())
    }
}
