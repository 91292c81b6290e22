//! Domain model for the service provider profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{Displayable, Identifiable};

/// Fallback commission cut for new profiles, in percent.
pub const DEFAULT_COMMISSION_RATE: f64 = 15.0;
pub const DEFAULT_LANGUAGE: &str = "pt";
pub const DEFAULT_CURRENCY: &str = "BRL";

/// An independent service provider (barber, stylist, ...). Owns the
/// commission rate that gets snapshotted into every logged service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceProvider {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    pub commission_rate_percent: f64,
    #[serde(default = "ServiceProvider::default_language")]
    pub language_code: String,
    #[serde(default = "ServiceProvider::default_currency")]
    pub currency_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ServiceProvider {
    pub fn new(user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            business_name: None,
            commission_rate_percent: DEFAULT_COMMISSION_RATE,
            language_code: Self::default_language(),
            currency_code: Self::default_currency(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_business_name(mut self, name: impl Into<String>) -> Self {
        self.business_name = Some(name.into());
        self
    }

    pub fn with_commission_rate(mut self, rate_percent: f64) -> Self {
        self.commission_rate_percent = rate_percent;
        self
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn default_language() -> String {
        DEFAULT_LANGUAGE.into()
    }

    pub fn default_currency() -> String {
        DEFAULT_CURRENCY.into()
    }
}

impl Identifiable for ServiceProvider {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for ServiceProvider {
    fn display_label(&self) -> String {
        match &self.business_name {
            Some(name) => name.clone(),
            None => format!("provider:{}", self.id),
        }
    }
}
