//! Aggregate root holding one provider's data set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    client::Client,
    period::PaymentPeriod,
    provider::ServiceProvider,
    record::ServiceRecord,
};

const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Everything TrackServ knows about one provider: the profile plus all
/// clients, payment periods, and logged service records. Serialized
/// wholesale as the persistence unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderBook {
    pub id: Uuid,
    pub provider: ServiceProvider,
    #[serde(default)]
    pub clients: Vec<Client>,
    #[serde(default)]
    pub periods: Vec<PaymentPeriod>,
    #[serde(default)]
    pub records: Vec<ServiceRecord>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "ProviderBook::schema_version_default")]
    pub schema_version: u8,
}

impl ProviderBook {
    pub fn new(provider: ServiceProvider) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            provider,
            clients: Vec::new(),
            periods: Vec::new(),
            records: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn add_client(&mut self, client: Client) -> Uuid {
        let id = client.id;
        self.clients.push(client);
        self.touch();
        id
    }

    pub fn add_period(&mut self, period: PaymentPeriod) -> Uuid {
        let id = period.id;
        self.periods.push(period);
        self.touch();
        id
    }

    pub fn add_record(&mut self, record: ServiceRecord) -> Uuid {
        let id = record.id;
        self.records.push(record);
        self.touch();
        id
    }

    pub fn client(&self, id: Uuid) -> Option<&Client> {
        self.clients.iter().find(|client| client.id == id)
    }

    pub fn client_mut(&mut self, id: Uuid) -> Option<&mut Client> {
        self.clients.iter_mut().find(|client| client.id == id)
    }

    pub fn period(&self, id: Uuid) -> Option<&PaymentPeriod> {
        self.periods.iter().find(|period| period.id == id)
    }

    pub fn period_mut(&mut self, id: Uuid) -> Option<&mut PaymentPeriod> {
        self.periods.iter_mut().find(|period| period.id == id)
    }

    pub fn record(&self, id: Uuid) -> Option<&ServiceRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn record_mut(&mut self, id: Uuid) -> Option<&mut ServiceRecord> {
        self.records.iter_mut().find(|record| record.id == id)
    }

    /// The single open period, if any.
    pub fn open_period(&self) -> Option<&PaymentPeriod> {
        self.periods.iter().find(|period| period.is_open())
    }

    pub fn records_in_period(&self, period_id: Uuid) -> impl Iterator<Item = &ServiceRecord> {
        self.records
            .iter()
            .filter(move |record| record.payment_period_id == period_id)
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}
