//! Domain model for logged services and their commission split.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{Displayable, Identifiable};

/// Commission/net breakdown of a gross amount, in cents.
///
/// Invariant: `commission_cents + net_cents` equals the gross amount the
/// split was computed from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommissionSplit {
    pub commission_cents: i64,
    pub net_cents: i64,
}

/// One service rendered to a client.
///
/// `commission_rate_percent` is a historical snapshot of the provider's
/// rate at the moment the record was logged; later rate changes never
/// touch it. `commission_amount_cents`/`net_amount_cents` always satisfy
/// the split invariant against `amount_cents` and that snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub id: Uuid,
    pub client_id: Uuid,
    pub payment_period_id: Uuid,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_date: Option<NaiveDate>,
    pub amount_cents: i64,
    #[serde(default)]
    pub tip_amount_cents: i64,
    pub commission_rate_percent: f64,
    pub commission_amount_cents: i64,
    pub net_amount_cents: i64,
    #[serde(default)]
    pub is_paid: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ServiceRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        client_id: Uuid,
        payment_period_id: Uuid,
        description: impl Into<String>,
        service_date: Option<NaiveDate>,
        amount_cents: i64,
        tip_amount_cents: i64,
        commission_rate_percent: f64,
        split: CommissionSplit,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            client_id,
            payment_period_id,
            description: description.into(),
            service_date,
            amount_cents,
            tip_amount_cents,
            commission_rate_percent,
            commission_amount_cents: split.commission_cents,
            net_amount_cents: split.net_cents,
            is_paid: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// What the provider is owed for this record: net plus tip.
    pub fn owed_cents(&self) -> i64 {
        self.net_amount_cents + self.tip_amount_cents
    }

    pub fn mark_paid(&mut self) {
        self.is_paid = true;
        self.touch();
    }

    /// Replaces the gross amount and its derived split. The rate snapshot
    /// stays as logged.
    pub fn reprice(&mut self, amount_cents: i64, split: CommissionSplit) {
        self.amount_cents = amount_cents;
        self.commission_amount_cents = split.commission_cents;
        self.net_amount_cents = split.net_cents;
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Identifiable for ServiceRecord {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for ServiceRecord {
    fn display_label(&self) -> String {
        format!("service:{} [{}]", self.id, self.settlement())
    }
}

impl ServiceRecord {
    pub fn settlement(&self) -> Settlement {
        if self.is_paid {
            Settlement::Paid
        } else {
            Settlement::Pending
        }
    }
}

/// Settlement status of a record, independent of its period's state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Settlement {
    Paid,
    Pending,
}

impl fmt::Display for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Settlement::Paid => "Paid",
            Settlement::Pending => "Pending",
        };
        f.write_str(label)
    }
}
