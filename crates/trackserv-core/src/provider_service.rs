//! Profile mutations for the service provider.

use trackserv_domain::ProviderBook;

use crate::commission::validate_rate;
use crate::error::{CoreError, CoreResult};
use crate::format::{is_supported_currency, is_supported_language};

/// Provides validated mutations for the provider profile. Rate changes
/// only affect services logged afterwards; existing records keep their
/// snapshot.
pub struct ProviderService;

impl ProviderService {
    pub fn set_commission_rate(book: &mut ProviderBook, rate_percent: f64) -> CoreResult<()> {
        validate_rate(rate_percent)?;
        book.provider.commission_rate_percent = rate_percent;
        book.provider.touch();
        book.touch();
        Ok(())
    }

    pub fn set_language(book: &mut ProviderBook, language_code: &str) -> CoreResult<()> {
        if !is_supported_language(language_code) {
            return Err(CoreError::Validation(format!(
                "unsupported language `{language_code}`"
            )));
        }
        book.provider.language_code = language_code.into();
        book.provider.touch();
        book.touch();
        Ok(())
    }

    pub fn set_currency(book: &mut ProviderBook, currency_code: &str) -> CoreResult<()> {
        if !is_supported_currency(currency_code) {
            return Err(CoreError::Validation(format!(
                "unsupported currency `{currency_code}`"
            )));
        }
        book.provider.currency_code = currency_code.into();
        book.provider.touch();
        book.touch();
        Ok(())
    }

    pub fn set_business_name(book: &mut ProviderBook, name: Option<String>) {
        book.provider.business_name = name.filter(|n| !n.trim().is_empty());
        book.provider.touch();
        book.touch();
    }
}
